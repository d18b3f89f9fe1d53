//! Error types for snaplag-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// A merge or blend produced a NaN or infinite component
    #[error("non-finite value produced by {operation}")]
    NonFinite {
        /// Which strategy step produced the value ("merge" or "blend")
        operation: &'static str,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
