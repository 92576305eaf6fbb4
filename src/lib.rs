//! auto-externals - externalized dependency resolution for web build pipelines
//!
//! Given a set of "auto-externalized" library keys, this crate validates the
//! configuration, resolves each library's installed version, orders the
//! libraries so that script tags can be emitted in dependency-safe order, and
//! renders per-environment URL references (scripts, styles, polyfills) from
//! templates.
//!
//! # Architecture Overview
//!
//! Resolution is a single synchronous pipeline:
//!
//! 1. **Validate** the requested keys against the [`catalog::Catalog`] and the
//!    host build tool's `externals` configuration (unknown keys, conflicting
//!    declarations, missing transitive declarations).
//! 2. **Resolve versions** for every key, preferring the build tool's
//!    version-info feed and falling back to the installed-package metadata
//!    oracle.
//! 3. **Sort** the keys topologically so a library never precedes its
//!    declared dependencies; ties keep the original request order.
//! 4. **Render** each library's URL templates for the active environment into
//!    an ordered list of [`resolver::OutputEntry`] records.
//!
//! Any failure aborts the whole pipeline; partial output is never produced.
//!
//! # Core Modules
//!
//! - [`catalog`] - Static registry of supported external libraries and their
//!   descriptors (dependencies, globals, URL templates)
//! - [`config`] - Host-facing configuration surface and requested-key parsing
//! - [`core`] - Error types and the bundler diagnostics classifier
//! - [`resolver`] - Validation, version resolution, dependency ordering, and
//!   the end-to-end pipeline
//! - [`templating`] - `{{ name }}` placeholder expansion for URL templates
//! - [`version`] - Version-feed parsing and version-range coercion
//!
//! # Example
//!
//! ```rust
//! use auto_externals::catalog::{Catalog, Environment};
//! use auto_externals::config::ExternalsOptions;
//! use auto_externals::resolver::{ExternalsPipeline, MetadataOracle};
//!
//! struct NoOracle;
//! impl MetadataOracle for NoOracle {
//!     fn version_range(&self, _key: &str) -> Option<String> {
//!         None
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let options = ExternalsOptions {
//!     packages: serde_json::json!(["react", "react-dom"]),
//!     ..Default::default()
//! };
//! let feed = vec![
//!     "react@16.8.0 (provided by dll)".to_string(),
//!     "react-dom@16.8.0 (provided by dll)".to_string(),
//! ];
//!
//! let pipeline = ExternalsPipeline::new(Catalog::builtin(), Environment::Production);
//! let entries = pipeline.resolve(&options, &feed, &NoOracle)?;
//!
//! assert_eq!(entries[0].key, "react");
//! assert_eq!(entries[1].key, "react-dom");
//! # Ok(())
//! # }
//! ```

// Core functionality modules
pub mod catalog;
pub mod config;
pub mod core;
pub mod resolver;

// Supporting modules
pub mod templating;
pub mod version;
