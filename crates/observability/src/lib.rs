//! Tracing/logging setup shared by MES binaries.

pub mod tracing;

pub use tracing::LogFormat;

/// Initialize process-wide logging with an explicit filter and output format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with(filter: &str, format: LogFormat) {
    tracing::init(filter, format);
}
