//! Logging for the `pwguard` host binary.
//!
//! Policy decisions (session restrictions, rejected password changes,
//! stamped timestamps) are emitted as JSON events on stderr with user ids and
//! violation counts only; password material is never logged.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
