//! Error types for the video-wall control library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when addressing panels or a wall.
#[derive(Error, Debug)]
pub enum Error {
    /// Command name is not in the control registry.
    #[error("{0} is not an available command")]
    UnknownCommand(String),

    /// Source name is not in the source registry.
    #[error("{0} is not an available source")]
    UnknownSource(String),

    /// Packet payload does not fit the one-byte length field.
    #[error("Payload too large (max 255 bytes): {0}")]
    PayloadTooLarge(usize),

    /// Serial port could not be opened.
    #[error("Failed to open serial port {port}: {source}")]
    TransportOpen {
        port: String,
        #[source]
        source: tokio_serial::Error,
    },

    /// Serial port opened but the packet could not be written.
    #[error("Failed to write to serial port {port}: {source}")]
    TransportWrite {
        port: String,
        #[source]
        source: std::io::Error,
    },

    /// Panel lacks the x/y coordinates needed for wall activation.
    #[error("Panel {0} does not have a position")]
    NotPositioned(u8),

    /// Wall arrangement failed strict validation.
    #[error("Invalid wall arrangement: {0}")]
    InvalidArrangement(String),
}
