//! Static catalog of supported external libraries.
//!
//! The catalog maps a library key (the bare module name used in import
//! statements, e.g. `react`) to a [`LibraryDescriptor`]: its dependencies on
//! other catalog keys, the global variable the library exposes when loaded
//! via a script tag, and per-environment URL templates for scripts, styles,
//! and polyfills.
//!
//! A catalog is an immutable value constructed once and passed into the
//! pipeline - there is no process-wide registry. It can be built three ways:
//!
//! - [`Catalog::builtin`] - the hand-authored set of common web libraries
//! - [`Catalog::from_toml_str`] - a project-supplied TOML catalog file
//! - [`Catalog::new`] - programmatically, from descriptor values
//!
//! All three validate at load time: a descriptor whose `dependencies` name a
//! key absent from the same catalog is rejected with
//! [`ExternalsError::InvalidCatalog`] instead of failing later, mid-pipeline.
//!
//! # Catalog file format
//!
//! ```toml
//! [libraries.react]
//! global = "React"
//! scripts = { development = ["react@{{ version }}/umd/react.development.js"], production = ["react@{{ version }}/umd/react.production.min.js"] }
//!
//! [libraries.react-dom]
//! global = "ReactDOM"
//! dependencies = ["react"]
//! scripts = { production = ["react-dom@{{ version }}/umd/react-dom.production.min.js"] }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::ExternalsError;

/// Build mode selecting which URL variant set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Development build: unminified assets, debug-friendly bundles.
    Development,
    /// Production build: minified assets.
    Production,
}

impl Environment {
    /// Derive the environment from the externally supplied
    /// "is development build" flag.
    pub fn from_dev_flag(is_development: bool) -> Self {
        if is_development {
            Self::Development
        } else {
            Self::Production
        }
    }
}

/// Per-environment URL template lists.
///
/// Exactly one of the two lists is selected per resolution, based on the
/// active [`Environment`]. A missing list is an empty list, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentUrlSet {
    /// Templates used for development builds.
    pub development: Vec<String>,
    /// Templates used for production builds.
    pub production: Vec<String>,
}

impl EnvironmentUrlSet {
    /// Select the template list for `environment`.
    pub fn select(&self, environment: Environment) -> &[String] {
        match environment {
            Environment::Development => &self.development,
            Environment::Production => &self.production,
        }
    }

    /// Convenience constructor for a set that uses the same templates in
    /// both environments.
    pub fn same(urls: Vec<String>) -> Self {
        Self {
            development: urls.clone(),
            production: urls,
        }
    }
}

/// Descriptor for one externalizable library.
///
/// Immutable once the owning [`Catalog`] is constructed. The key itself is
/// catalog-assigned (the map key), so it does not appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryDescriptor {
    /// Catalog keys this library must be loaded after.
    pub dependencies: Vec<String>,
    /// Global variable the library exposes (the bundler's `externals` value).
    pub global: String,
    /// Polyfill URL templates, emitted ahead of the library's own scripts.
    pub polyfill_urls: EnvironmentUrlSet,
    /// Script URL templates.
    pub scripts: EnvironmentUrlSet,
    /// Stylesheet URL templates.
    pub styles: EnvironmentUrlSet,
    /// Module names the polyfill loader must not polyfill again.
    pub polyfill_exclude: BTreeSet<String>,
}

/// Serde shape of a catalog file: a `[libraries.<key>]` table per entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    libraries: BTreeMap<String, LibraryDescriptor>,
}

/// Immutable registry of supported external libraries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    libraries: BTreeMap<String, LibraryDescriptor>,
}

impl Catalog {
    /// Construct a catalog from descriptor values, validating that every
    /// dependency edge points at a key in the same catalog.
    pub fn new(libraries: BTreeMap<String, LibraryDescriptor>) -> Result<Self, ExternalsError> {
        let catalog = Self {
            libraries,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a TOML catalog file.
    pub fn from_toml_str(raw: &str) -> Result<Self, ExternalsError> {
        let file: CatalogFile = toml::from_str(raw)?;
        Self::new(file.libraries)
    }

    /// Read, parse, and validate a catalog file from disk.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog file at {}", path.display()))?;
        Ok(Self::from_toml_str(&raw)?)
    }

    /// The hand-authored catalog of common web libraries, referenced against
    /// an unpkg-style CDN layout.
    pub fn builtin() -> Self {
        let mut libraries = BTreeMap::new();

        libraries.insert(
            "react".to_string(),
            LibraryDescriptor {
                global: "React".to_string(),
                scripts: EnvironmentUrlSet {
                    development: vec!["react@{{ version }}/umd/react.development.js".to_string()],
                    production: vec![
                        "react@{{ version }}/umd/react.production.min.js".to_string(),
                    ],
                },
                ..Default::default()
            },
        );

        libraries.insert(
            "react-dom".to_string(),
            LibraryDescriptor {
                dependencies: vec!["react".to_string()],
                global: "ReactDOM".to_string(),
                scripts: EnvironmentUrlSet {
                    development: vec![
                        "react-dom@{{ version }}/umd/react-dom.development.js".to_string(),
                    ],
                    production: vec![
                        "react-dom@{{ version }}/umd/react-dom.production.min.js".to_string(),
                    ],
                },
                ..Default::default()
            },
        );

        libraries.insert(
            "redux".to_string(),
            LibraryDescriptor {
                global: "Redux".to_string(),
                scripts: EnvironmentUrlSet {
                    development: vec!["redux@{{ version }}/dist/redux.js".to_string()],
                    production: vec!["redux@{{ version }}/dist/redux.min.js".to_string()],
                },
                ..Default::default()
            },
        );

        libraries.insert(
            "react-redux".to_string(),
            LibraryDescriptor {
                dependencies: vec!["react".to_string(), "redux".to_string()],
                global: "ReactRedux".to_string(),
                scripts: EnvironmentUrlSet {
                    development: vec![
                        "react-redux@{{ version }}/dist/react-redux.js".to_string(),
                    ],
                    production: vec![
                        "react-redux@{{ version }}/dist/react-redux.min.js".to_string(),
                    ],
                },
                ..Default::default()
            },
        );

        libraries.insert(
            "vue".to_string(),
            LibraryDescriptor {
                global: "Vue".to_string(),
                scripts: EnvironmentUrlSet {
                    development: vec!["vue@{{ version }}/dist/vue.js".to_string()],
                    production: vec!["vue@{{ version }}/dist/vue.min.js".to_string()],
                },
                ..Default::default()
            },
        );

        libraries.insert(
            "moment".to_string(),
            LibraryDescriptor {
                global: "moment".to_string(),
                scripts: EnvironmentUrlSet {
                    development: vec!["moment@{{ version }}/moment.js".to_string()],
                    production: vec!["moment@{{ version }}/min/moment.min.js".to_string()],
                },
                ..Default::default()
            },
        );

        libraries.insert(
            "antd".to_string(),
            LibraryDescriptor {
                dependencies: vec![
                    "react".to_string(),
                    "react-dom".to_string(),
                    "moment".to_string(),
                ],
                global: "antd".to_string(),
                polyfill_urls: EnvironmentUrlSet::same(vec![
                    "es6-promise@4.2.8/dist/es6-promise.auto.min.js".to_string(),
                ]),
                scripts: EnvironmentUrlSet {
                    development: vec!["antd@{{ version }}/dist/antd.js".to_string()],
                    production: vec!["antd@{{ version }}/dist/antd.min.js".to_string()],
                },
                styles: EnvironmentUrlSet::same(vec![
                    "antd@{{ version }}/dist/antd.min.css".to_string(),
                ]),
                polyfill_exclude: ["es6-promise".to_string()].into_iter().collect(),
            },
        );

        Self::new(libraries).expect("built-in catalog is internally consistent")
    }

    /// Whether `key` exists in the catalog.
    pub fn contains(&self, key: &str) -> bool {
        self.libraries.contains_key(key)
    }

    /// Look up the descriptor for `key`.
    pub fn get(&self, key: &str) -> Option<&LibraryDescriptor> {
        self.libraries.get(key)
    }

    /// All catalog keys, in deterministic (sorted) order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    fn validate(&self) -> Result<(), ExternalsError> {
        for (key, descriptor) in &self.libraries {
            for dependency in &descriptor.dependencies {
                if !self.libraries.contains_key(dependency) {
                    return Err(ExternalsError::InvalidCatalog {
                        reason: format!(
                            "'{key}' depends on '{dependency}', which is not defined in the catalog"
                        ),
                    });
                }
                if dependency == key {
                    return Err(ExternalsError::InvalidCatalog {
                        reason: format!("'{key}' depends on itself"),
                    });
                }
            }
        }
        Ok(())
    }
}
