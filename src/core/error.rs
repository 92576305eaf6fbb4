//! Error handling for externals resolution.
//!
//! The error system is built around a single strongly-typed enum,
//! [`ExternalsError`], covering every failure mode of the resolution pipeline:
//!
//! - **Configuration**: [`ExternalsError::ConfigurationType`],
//!   [`ExternalsError::ConflictingConfiguration`]
//! - **Catalog**: [`ExternalsError::UnsupportedDependency`],
//!   [`ExternalsError::InvalidCatalog`]
//! - **Dependencies**: [`ExternalsError::MissingDependencyDeclaration`],
//!   [`ExternalsError::CyclicDependency`]
//! - **Versions**: [`ExternalsError::VersionNotFound`]
//!
//! Common parsing errors are converted automatically:
//! - [`toml::de::Error`] → [`ExternalsError::TomlError`]
//! - [`semver::Error`] → [`ExternalsError::SemverError`]
//!
//! Every message names the offending key(s) so the build step that receives
//! the error can surface an actionable diagnostic without extra lookups.

use thiserror::Error;

/// The error type for every fallible operation in the resolution pipeline.
///
/// Variants carry the offending key(s) as named fields; messages are written
/// for the person reading the build output, not only for code. All variants
/// are terminal for the resolution call - the pipeline produces either a
/// complete output sequence or one of these.
#[derive(Error, Debug)]
pub enum ExternalsError {
    /// The `packages` configuration value has an unsupported shape.
    ///
    /// The requested-key specification must be either an ordered list of
    /// library keys or a boolean (`true` meaning "all known libraries").
    #[error(
        "invalid `packages` configuration: expected a list of library keys or a boolean, got {found}"
    )]
    ConfigurationType {
        /// Human-readable description of the shape that was found.
        found: String,
    },

    /// A requested key does not exist in the catalog.
    #[error("'{key}' is not a supported external library")]
    UnsupportedDependency {
        /// The unknown library key.
        key: String,
    },

    /// A key is declared both in `externals` and in the auto-externalized
    /// packages list.
    #[error("'{key}' is configured in both `packages` and `externals`; declare it in only one")]
    ConflictingConfiguration {
        /// The doubly-declared library key.
        key: String,
    },

    /// A requested key's declared dependency is not itself requested.
    ///
    /// The engine never auto-expands the request to close the dependency
    /// graph; the caller must list every transitive dependency explicitly.
    #[error("'{key}' depends on '{dependency}', which must also be listed in `packages`")]
    MissingDependencyDeclaration {
        /// The requested key with the unmet dependency.
        key: String,
        /// The dependency key missing from the request.
        dependency: String,
    },

    /// No version could be obtained for a requested key from either the
    /// version-info feed or the package-metadata oracle.
    #[error("unable to resolve an installed version for '{key}'")]
    VersionNotFound {
        /// The key whose version lookup failed.
        key: String,
    },

    /// The dependency subgraph induced by the requested keys contains a cycle.
    #[error("circular dependency detected: {chain}")]
    CyclicDependency {
        /// The cycle path, rendered as `a → b → a`.
        chain: String,
    },

    /// Catalog data failed load-time validation.
    #[error("invalid catalog: {reason}")]
    InvalidCatalog {
        /// What the validation found.
        reason: String,
    },

    /// TOML parsing error while loading a catalog file.
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Semantic version parsing error.
    #[error("Semantic version error: {0}")]
    SemverError(#[from] semver::Error),
}
