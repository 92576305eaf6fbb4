//! Integration test suite for auto-externals
//!
//! End-to-end tests that drive the full resolution pipeline the way a host
//! build tool would: opaque configuration values in, ordered output entries
//! (or a first-failure error) out.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **catalog_files**: catalog TOML files and the package-manifest oracle,
//!   loaded from disk
//! - **pipeline**: end-to-end resolution scenarios and failure ordering

mod pipeline;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing once for the whole suite so `RUST_LOG=auto_externals=debug`
/// surfaces the pipeline's debug events (including the version-map dump).
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}
