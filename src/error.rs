//! Error types for the posit8 arithmetic engine.
//!
//! Domain signals (NaR) never surface here — they propagate in-band
//! through the octet values themselves. This module only covers the
//! out-of-band, structural failures: bad kernel dimensions and the
//! device back end's own failure modes.

use thiserror::Error;

/// Primary error type for fallible posit8 operations.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PositError {
    /// A kernel argument's length did not match the stated dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The device back end could not be initialized.
    #[error("device unavailable: {message}")]
    DeviceUnavailable { message: String },

    /// The requested buffers exceed the device's capacity.
    #[error("device capacity exceeded: requested {requested} bytes, limit {limit} bytes")]
    DeviceCapacity { requested: usize, limit: usize },

    /// The device kernel failed to launch.
    #[error("kernel launch failed: {message}")]
    KernelLaunch { message: String },

    /// Reading the result buffer back from the device failed.
    #[error("buffer transfer failed: {message}")]
    BufferTransfer { message: String },
}

/// Result type alias for posit8 operations.
pub type Result<T> = std::result::Result<T, PositError>;
