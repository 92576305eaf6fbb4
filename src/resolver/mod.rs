//! End-to-end externals resolution.
//!
//! [`ExternalsPipeline`] composes the pipeline stages:
//! validate → normalize → resolve versions → sort → render. Any stage
//! failure aborts the whole call with no partial output.
//!
//! # Modules
//!
//! - [`validator`] - catalog membership, exclusivity, and closure checks
//! - [`version_resolver`] - feed-first, manifest-fallback version lookup
//! - [`dependency_graph`] - cycle detection and stable topological ordering

pub mod dependency_graph;
pub mod validator;
pub mod version_resolver;

pub use dependency_graph::DependencyGraph;
pub use validator::Validator;
pub use version_resolver::{ManifestOracle, MetadataOracle, VersionMap, VersionResolver};

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::catalog::{Catalog, Environment};
use crate::config::ExternalsOptions;
use crate::templating::TemplateRenderer;

/// One resolved external library, ready for script-tag emission.
///
/// Entries are produced in dependency-safe order: a library's entry never
/// precedes the entries of its declared dependencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputEntry {
    /// The library key.
    pub key: String,
    /// Global variable the bundler should map the module to.
    pub global: String,
    /// Rendered script URLs; polyfill URLs come first.
    pub scripts: Vec<String>,
    /// Rendered stylesheet URLs.
    pub styles: Vec<String>,
    /// Module names the polyfill loader must skip.
    pub polyfill_exclude: BTreeSet<String>,
}

/// The end-to-end resolution pipeline.
///
/// Holds the immutable catalog and the active environment; each
/// [`resolve`](Self::resolve) call is independent and builds its version map
/// fresh, so a pipeline value can be reused across builds.
pub struct ExternalsPipeline {
    catalog: Catalog,
    environment: Environment,
}

impl ExternalsPipeline {
    /// Create a pipeline over `catalog` for `environment`.
    pub fn new(catalog: Catalog, environment: Environment) -> Self {
        Self {
            catalog,
            environment,
        }
    }

    /// The catalog this pipeline resolves against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Resolve `options` into an ordered list of output entries.
    ///
    /// All-or-nothing: validation or version-resolution failure aborts the
    /// call with no partial output.
    pub fn resolve(
        &self,
        options: &ExternalsOptions,
        feed: &[String],
        oracle: &dyn MetadataOracle,
    ) -> Result<Vec<OutputEntry>> {
        let validator = Validator::new(&self.catalog);
        let keys = validator.validate(&options.packages, &options.externals)?;
        tracing::debug!("externalizing {} libraries: {:?}", keys.len(), keys);

        let versions = VersionResolver::new(feed, oracle).resolve(&keys)?;
        // Observability side channel only; not part of the resolution contract
        if let Ok(dump) = serde_json::to_string(&versions) {
            tracing::debug!("resolved external versions: {}", dump);
        }

        let graph = DependencyGraph::from_request(&keys, &self.catalog);
        let ordered = graph.sorted_keys()?;

        let renderer = TemplateRenderer::new(self.environment, options.url_template.clone());
        let mut entries = Vec::with_capacity(ordered.len());
        for key in ordered {
            let descriptor = self
                .catalog
                .get(&key)
                .with_context(|| format!("validated key '{key}' missing from catalog"))?;
            let version = versions
                .get(&key)
                .with_context(|| format!("validated key '{key}' missing from version map"))?;
            let rendered = renderer.render(&key, descriptor, version);
            entries.push(OutputEntry {
                key,
                global: descriptor.global.clone(),
                scripts: rendered.scripts,
                styles: rendered.styles,
                polyfill_exclude: descriptor.polyfill_exclude.clone(),
            });
        }

        Ok(entries)
    }
}
