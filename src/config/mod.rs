//! Host-facing configuration surface.
//!
//! The host build tool hands the engine an opaque key-value configuration.
//! [`ExternalsOptions`] is the typed view of the slice this engine consumes:
//! the `packages` request, the optional URL template, and the `externals` map
//! (read only for the mutual-exclusivity check - its values stay opaque).
//!
//! The `packages` value keeps its raw JSON shape until validation so that a
//! malformed value surfaces as a configuration-type error rather than a
//! deserialization failure in the host tool. [`RequestedKeys`] is the
//! normalized form: an explicit key list, or the "all known libraries"
//! sentinel.

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::Catalog;
use crate::core::ExternalsError;

/// Configuration consumed from the host build tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExternalsOptions {
    /// Requested library keys: a JSON array of strings, or a boolean
    /// (`true` meaning "every catalog key"). Kept raw until validation.
    pub packages: Value,
    /// Template applied to every rendered path (defaults to `{{ path }}`).
    pub url_template: Option<String>,
    /// The bundler `externals` map, used only for the exclusivity check.
    pub externals: serde_json::Map<String, Value>,
}

impl Default for ExternalsOptions {
    fn default() -> Self {
        Self {
            packages: Value::Bool(false),
            url_template: None,
            externals: serde_json::Map::new(),
        }
    }
}

/// The normalized requested-key specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedKeys {
    /// An explicit ordered sequence of library keys.
    Explicit(Vec<String>),
    /// Every key the catalog knows about.
    AllKnownKeys,
}

impl RequestedKeys {
    /// Parse the raw `packages` configuration value.
    ///
    /// Accepts an array of strings or a boolean; `true` selects every
    /// catalog key, `false` selects none. Any other shape - including an
    /// array with non-string elements - is a
    /// [`ExternalsError::ConfigurationType`] error.
    pub fn from_config_value(value: &Value) -> Result<Self, ExternalsError> {
        match value {
            Value::Bool(true) => Ok(Self::AllKnownKeys),
            Value::Bool(false) => Ok(Self::Explicit(Vec::new())),
            Value::Array(items) => {
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(key) => keys.push(key.clone()),
                        other => {
                            return Err(ExternalsError::ConfigurationType {
                                found: format!("a list containing {}", json_shape(other)),
                            });
                        }
                    }
                }
                Ok(Self::Explicit(keys))
            }
            other => Err(ExternalsError::ConfigurationType {
                found: json_shape(other).to_string(),
            }),
        }
    }

    /// Normalize into an ordered key sequence.
    ///
    /// Explicit requests keep their order; the all-keys sentinel expands to
    /// the catalog's deterministic key order. Duplicates are the caller's
    /// responsibility and are not removed here.
    pub fn normalize(&self, catalog: &Catalog) -> Vec<String> {
        match self {
            Self::Explicit(keys) => keys.clone(),
            Self::AllKnownKeys => catalog.keys().map(str::to_owned).collect(),
        }
    }
}

fn json_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
