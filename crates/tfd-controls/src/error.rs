//! Error types for fader construction.

use thiserror::Error;

/// Result type for fader construction.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur when building a fader controller.
///
/// Note that runtime tick handling never returns errors: sensor failures are
/// absorbed into the max-temperature fold and output failures are logged and
/// dropped. Only construction is fallible.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
