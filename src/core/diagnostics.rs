//! Classification of bundler module-resolution failures.
//!
//! When the underlying bundler reports that a module could not be resolved,
//! the build step wants to distinguish a missing DLL bundle (the vendor
//! bundle that auto-externalized libraries are compiled into) from an
//! ordinary missing module. The rule is flat: module-not-found with the
//! `dll` context flag set is a DLL problem, module-not-found without it is a
//! plain missing module, anything else is not ours to classify.

use std::fmt;

/// Diagnostic emitted for a bundler module-resolution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionDiagnostic {
    /// The module was expected to come from the prebuilt DLL bundle.
    DllNotFound {
        /// The module request that failed to resolve.
        request: String,
    },
    /// An ordinary module-not-found failure.
    ModuleNotFound {
        /// The module request that failed to resolve.
        request: String,
    },
}

impl fmt::Display for ResolutionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DllNotFound {
                request,
            } => {
                write!(f, "DLL not found: '{request}' (rebuild the vendor bundle)")
            }
            Self::ModuleNotFound {
                request,
            } => write!(f, "module not found: '{request}'"),
        }
    }
}

/// Classify a bundler resolution failure.
///
/// Returns `None` when the failure is not a module-not-found condition;
/// such errors belong to the bundler's own diagnostics, not to this engine.
pub fn classify_resolution_failure(
    request: &str,
    module_not_found: bool,
    dll_context: bool,
) -> Option<ResolutionDiagnostic> {
    if !module_not_found {
        return None;
    }
    if dll_context {
        Some(ResolutionDiagnostic::DllNotFound {
            request: request.to_string(),
        })
    } else {
        Some(ResolutionDiagnostic::ModuleNotFound {
            request: request.to_string(),
        })
    }
}
