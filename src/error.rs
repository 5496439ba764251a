//! Error types for the payment gateway.

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while running the gateway.
///
/// A payment id that does not exist is not an error: lookups return `None`.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Failed to read from or write to the console
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Amount text that is not a positive decimal number
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// Stored details could not be encoded or decoded
    #[error("Details encoding error: {0}")]
    DetailsEncoding(#[from] serde_json::Error),

    /// Every drawn payment id was already taken
    #[error("No free payment id after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },

    /// Rejected gateway configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
