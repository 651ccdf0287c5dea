//! yh-bench: criterion benchmarks for the scoring hot path.
//!
//! See `benches/scoring.rs`.

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
