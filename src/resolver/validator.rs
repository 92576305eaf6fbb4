//! Request validation against the catalog and the `externals` configuration.
//!
//! Validation is a single left-to-right scan over the normalized key
//! sequence, failing fast on the first violation so the same input always
//! reports the same first failure. Per key, in order:
//!
//! 1. catalog membership ([`ExternalsError::UnsupportedDependency`])
//! 2. mutual exclusivity with the `externals` map
//!    ([`ExternalsError::ConflictingConfiguration`])
//! 3. dependency closure ([`ExternalsError::MissingDependencyDeclaration`])
//!
//! The closure check is what lets the sorter operate on a closed graph: the
//! engine never auto-expands the request to pull in missing dependencies.

use serde_json::Value;

use crate::catalog::Catalog;
use crate::config::RequestedKeys;
use crate::core::ExternalsError;

/// Validates a requested key set before resolution proceeds.
pub struct Validator<'a> {
    catalog: &'a Catalog,
}

impl<'a> Validator<'a> {
    /// Create a validator over `catalog`.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
        }
    }

    /// Type-check the raw `packages` value, normalize it, and run the
    /// per-key checks. Returns the normalized key sequence on success.
    pub fn validate(
        &self,
        packages: &Value,
        externals: &serde_json::Map<String, Value>,
    ) -> Result<Vec<String>, ExternalsError> {
        let requested = RequestedKeys::from_config_value(packages)?;
        let keys = requested.normalize(self.catalog);
        self.check_keys(&keys, externals)?;
        Ok(keys)
    }

    /// Run the per-key checks over an already-normalized sequence.
    pub fn check_keys(
        &self,
        keys: &[String],
        externals: &serde_json::Map<String, Value>,
    ) -> Result<(), ExternalsError> {
        for key in keys {
            let Some(descriptor) = self.catalog.get(key) else {
                return Err(ExternalsError::UnsupportedDependency {
                    key: key.clone(),
                });
            };
            if externals.contains_key(key) {
                return Err(ExternalsError::ConflictingConfiguration {
                    key: key.clone(),
                });
            }
            for dependency in &descriptor.dependencies {
                if !keys.contains(dependency) {
                    return Err(ExternalsError::MissingDependencyDeclaration {
                        key: key.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
