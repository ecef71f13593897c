#![forbid(unsafe_code)]

//! Test harness for Glint.
//!
//! - **[`MemoryHost`]**: an editor made of strings that implements every
//!   host trait and logs annotation churn.
//! - **[`invariants`]**: cross-checks that the engine's bookkeeping matches
//!   what the host renders.
//!
//! # Quick Start
//!
//! ```ignore
//! use glint_core::{GlintConfig, HighlightMode};
//! use glint_harness::{MemoryHost, assert_invariants};
//!
//! let mut host = MemoryHost::new();
//! let buf = host.add_buffer("foo bar foo");
//! host.open_full_viewport(buf);
//! host.select(buf, 0, 3);
//!
//! let mut mode = HighlightMode::new(GlintConfig::default())?;
//! mode.on_activate(&mut host);
//! assert_invariants!(&mode, &host);
//! ```
//!
//! Set `RUST_LOG=glint_core=debug` and call [`init_test_logging`] to see the
//! engine's reconcile decisions in test output.

pub mod invariants;
pub mod memory_host;

pub use invariants::{Violation, check};
pub use memory_host::{BlockMode, Churn, HostOp, LiveAnnotation, MemoryHost};

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Panic with the violation if any engine/host invariant is broken.
#[macro_export]
macro_rules! assert_invariants {
    ($mode:expr, $host:expr) => {
        if let Err(violation) = $crate::invariants::check($mode, $host) {
            panic!("invariant violated: {violation}");
        }
    };
}
