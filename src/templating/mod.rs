//! URL template rendering.
//!
//! Templates are plain path strings containing zero or more `{{ name }}`
//! placeholders. The substitution vocabulary is closed: `library` (the
//! catalog key), `path` (the raw template path, for self-referential
//! templates), and `version` (the resolved version string). Placeholders
//! with any other name are left verbatim - partial template vocabularies
//! are tolerated, not rejected.
//!
//! Rendering is a pure function of its inputs: same descriptor, environment,
//! and version always produce the same URLs.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::catalog::{Environment, LibraryDescriptor};

/// Default URL template: the rendered path, unchanged.
pub const DEFAULT_URL_TEMPLATE: &str = "{{ path }}";

/// Substitution context for one template expansion.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The library key being rendered.
    pub library: &'a str,
    /// The raw path template, exposed for self-referential templates.
    pub path: &'a str,
    /// The resolved version string.
    pub version: &'a str,
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}")
            .expect("placeholder pattern is valid")
    })
}

/// Expand every recognized placeholder in `template`.
///
/// Unknown placeholder names pass through unchanged:
///
/// ```
/// use auto_externals::templating::{RenderContext, expand};
///
/// let ctx = RenderContext { library: "react", path: "p", version: "16.8.0" };
/// assert_eq!(expand("react@{{ version }}.js", &ctx), "react@16.8.0.js");
/// assert_eq!(expand("{{ unknown }}", &ctx), "{{ unknown }}");
/// ```
pub fn expand(template: &str, ctx: &RenderContext<'_>) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| match &caps[1] {
            "library" => ctx.library.to_string(),
            "path" => ctx.path.to_string(),
            "version" => ctx.version.to_string(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

/// Rendered URL references for one library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedUrls {
    /// Polyfill URLs followed by script URLs, in that order.
    pub scripts: Vec<String>,
    /// Stylesheet URLs.
    pub styles: Vec<String>,
}

/// Renders a descriptor's URL templates for one environment.
pub struct TemplateRenderer {
    environment: Environment,
    url_template: String,
}

impl TemplateRenderer {
    /// Create a renderer for `environment`. A `None` template falls back to
    /// [`DEFAULT_URL_TEMPLATE`].
    pub fn new(environment: Environment, url_template: Option<String>) -> Self {
        Self {
            environment,
            url_template: url_template.unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string()),
        }
    }

    /// Render `descriptor`'s URL sets for this renderer's environment.
    ///
    /// Scripts are the rendered polyfill URLs concatenated ahead of the
    /// rendered script URLs; absent lists render to an empty sequence.
    pub fn render(&self, key: &str, descriptor: &LibraryDescriptor, version: &str) -> RenderedUrls {
        let mut scripts =
            self.render_list(key, descriptor.polyfill_urls.select(self.environment), version);
        scripts.extend(self.render_list(key, descriptor.scripts.select(self.environment), version));
        let styles = self.render_list(key, descriptor.styles.select(self.environment), version);
        RenderedUrls {
            scripts,
            styles,
        }
    }

    /// Render one template list. Each path entry is expanded with the full
    /// context, then substituted as `path` into the configured URL template.
    fn render_list(&self, key: &str, paths: &[String], version: &str) -> Vec<String> {
        paths
            .iter()
            .map(|raw| {
                let path = expand(
                    raw,
                    &RenderContext {
                        library: key,
                        path: raw,
                        version,
                    },
                );
                expand(
                    &self.url_template,
                    &RenderContext {
                        library: key,
                        path: &path,
                        version,
                    },
                )
            })
            .collect()
    }
}
