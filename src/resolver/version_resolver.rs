//! Version resolution for requested libraries.
//!
//! Builds the complete key → version map the renderer needs, in two phases:
//!
//! 1. **Feed phase**: index the build tool's version-info feed (lines shaped
//!    `"<name>@<version> <anything>"`, contributed by other build
//!    components) by package name.
//! 2. **Fallback phase**: any requested key absent from the feed is looked
//!    up in the project's declared dependency manifest through the
//!    [`MetadataOracle`] and its range coerced to a concrete version.
//!
//! Resolution is all-or-nothing: the result maps every requested key, or the
//! call fails with [`ExternalsError::VersionNotFound`] naming the first key
//! that neither source could answer. Identical inputs always produce an
//! identical map.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::ExternalsError;
use crate::version::{coerce_range, parse_feed_entry};

/// Complete mapping from requested key to resolved version string.
pub type VersionMap = BTreeMap<String, String>;

/// Keyed lookup into the project's declared dependency manifest.
///
/// This is the "installed version" oracle: the engine only ever asks for the
/// declared range of a key, never enumerates the manifest.
pub trait MetadataOracle {
    /// Declared version range for `key`, if the manifest declares one.
    fn version_range(&self, key: &str) -> Option<String>;
}

/// Serde shape of a `package.json`-style manifest; only the dependency
/// tables are read.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawManifest {
    dependencies: BTreeMap<String, String>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, String>,
}

/// [`MetadataOracle`] over a JSON package manifest.
///
/// Runtime `dependencies` are consulted before `devDependencies`.
pub struct ManifestOracle {
    manifest: RawManifest,
}

impl ManifestOracle {
    /// Parse a manifest from its JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let manifest: RawManifest =
            serde_json::from_str(raw).context("failed to parse package manifest")?;
        Ok(Self {
            manifest,
        })
    }

    /// Read and parse a manifest file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read package manifest at {}", path.display()))?;
        Self::from_json_str(&raw)
    }
}

impl MetadataOracle for ManifestOracle {
    fn version_range(&self, key: &str) -> Option<String> {
        self.manifest
            .dependencies
            .get(key)
            .or_else(|| self.manifest.dev_dependencies.get(key))
            .cloned()
    }
}

/// Resolves versions for a requested key sequence.
pub struct VersionResolver<'a> {
    feed: &'a [String],
    oracle: &'a dyn MetadataOracle,
}

impl<'a> VersionResolver<'a> {
    /// Create a resolver over a version-info feed and a metadata oracle.
    pub fn new(feed: &'a [String], oracle: &'a dyn MetadataOracle) -> Self {
        Self {
            feed,
            oracle,
        }
    }

    /// Resolve every key in `keys` to a version string.
    pub fn resolve(&self, keys: &[String]) -> Result<VersionMap, ExternalsError> {
        let index = self.index_feed();
        let mut versions = VersionMap::new();

        for key in keys {
            let version = match index.get(key.as_str()) {
                Some(version) => (*version).to_string(),
                None => self.fallback_version(key)?,
            };
            versions.insert(key.clone(), version);
        }

        Ok(versions)
    }

    /// Index the feed by package name; the first entry for a name wins.
    fn index_feed(&self) -> HashMap<String, String> {
        let mut index = HashMap::new();
        for raw in self.feed {
            let Some(entry) = parse_feed_entry(raw) else {
                tracing::debug!("skipping malformed version-info entry: {:?}", raw);
                continue;
            };
            index.entry(entry.name).or_insert(entry.version);
        }
        index
    }

    fn fallback_version(&self, key: &str) -> Result<String, ExternalsError> {
        let range = self.oracle.version_range(key).ok_or_else(|| {
            ExternalsError::VersionNotFound {
                key: key.to_string(),
            }
        })?;
        let version = coerce_range(&range).ok_or_else(|| ExternalsError::VersionNotFound {
            key: key.to_string(),
        })?;
        tracing::debug!("resolved '{}' to {} from manifest range {:?}", key, version, range);
        Ok(version.to_string())
    }
}
