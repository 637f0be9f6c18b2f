//! Error types for room-grid operations.

use thiserror::Error;

/// Errors raised while parsing schedules or building a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A clock string did not look like `hh:mm AM` / `hh:mm PM`.
    #[error("Invalid clock string: '{0}'")]
    Format(String),

    /// The slot window or step size cannot produce a grid.
    #[error("Invalid grid configuration: {0}")]
    Config(String),

    /// A backend payload was not valid JSON of the expected shape.
    #[error("Invalid payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        GridError::Payload(e.to_string())
    }
}

/// A failed poll cycle. The previous panel stays on screen.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned HTTP {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("Undecodable response: {0}")]
    Decode(String),
}

impl From<GridError> for FetchError {
    fn from(e: GridError) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Convenience alias used throughout room-grid.
pub type Result<T> = std::result::Result<T, GridError>;
