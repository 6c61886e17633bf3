//! Error types for device access.

use thiserror::Error;

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur when talking to a registered device.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DeviceError {
    /// A sensor could not produce a reading right now.
    #[error("Sensor not available: {what}")]
    NotAvailable { what: String },

    /// A switch rejected a state or value write.
    #[error("Switch write rejected: {what}")]
    WriteRejected { what: String },

    /// A handle does not refer to a registered device.
    #[error("Unknown {kind} handle (index={index})")]
    UnknownDevice { kind: &'static str, index: u32 },

    /// A device was registered under an already-taken name.
    #[error("Duplicate device name: {name}")]
    DuplicateName { name: String },
}
