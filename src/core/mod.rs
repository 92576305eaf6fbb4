//! Core types for the externals resolution engine.
//!
//! This module provides the strongly-typed error taxonomy shared by every
//! pipeline stage ([`ExternalsError`]) and the flat bundler diagnostics
//! classifier ([`diagnostics`]).
//!
//! Every error is fatal to the resolution call that raised it: the pipeline
//! fails fast on the first violation, never aggregates, and never retries
//! internally. The invoking build step is expected to abort on error.

pub mod diagnostics;
pub mod error;

pub use diagnostics::{ResolutionDiagnostic, classify_resolution_failure};
pub use error::ExternalsError;
