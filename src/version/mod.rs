//! Version-feed parsing and version-range coercion.
//!
//! Two small pieces of version plumbing used by the resolver:
//!
//! - [`parse_feed_entry`] splits one line of the build tool's version-info
//!   feed (`"<name>@<version> <anything>"`) into a name/version pair.
//! - [`coerce_range`] turns a declared dependency range (`^16.8.0`, `~2.1`,
//!   `>=1`) into the concrete [`semver::Version`] it is anchored on,
//!   zero-filling missing parts.
//!
//! Feed versions are taken verbatim; only manifest ranges go through
//! coercion.

use std::sync::OnceLock;

use regex::Regex;
use semver::Version;

/// A `name@version` pair parsed from the version-info feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Package name, possibly scoped (`@scope/pkg`).
    pub name: String,
    /// Version string, verbatim from the feed.
    pub version: String,
}

/// Parse one feed entry.
///
/// Only the substring before the first whitespace is significant; the split
/// is on the *last* `@` so scoped package names parse correctly. Entries
/// without a name or version yield `None` and are skipped by the resolver.
///
/// ```
/// use auto_externals::version::parse_feed_entry;
///
/// let entry = parse_feed_entry("react@16.8.0 (other info)").unwrap();
/// assert_eq!(entry.name, "react");
/// assert_eq!(entry.version, "16.8.0");
///
/// let scoped = parse_feed_entry("@scope/ui@3.2.1 (bundled)").unwrap();
/// assert_eq!(scoped.name, "@scope/ui");
/// ```
pub fn parse_feed_entry(raw: &str) -> Option<FeedEntry> {
    let head = raw.split_whitespace().next()?;
    let (name, version) = head.rsplit_once('@')?;
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some(FeedEntry {
        name: name.to_string(),
        version: version.to_string(),
    })
}

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| {
        Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("anchor pattern is valid")
    })
}

/// Coerce a declared version range to the version it is anchored on.
///
/// Takes the first numeric anchor in the range string and zero-fills the
/// missing minor/patch parts, so `^16.8.0` → `16.8.0`, `~2.1` → `2.1.0`,
/// `>=1` → `1.0.0`. Ranges with no numeric anchor (`*`, `latest`) yield
/// `None`; the resolver reports those as version-not-found.
pub fn coerce_range(range: &str) -> Option<Version> {
    let caps = anchor_regex().captures(range)?;
    let part = |i: usize| {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}
