//! Error types for the simulator
//!
//! Every failure inside the frame engine is a reason to drop a datagram.
//! The variants carry enough context to log why a request went unanswered.

use thiserror::Error;

/// Result alias used across the crate
pub type ModbusResult<T> = Result<T, ModbusError>;

/// Errors raised while parsing, dispatching or serving frames
#[derive(Debug, Error)]
pub enum ModbusError {
    /// Frame is too short or its declared lengths do not fit the datagram
    #[error("Malformed frame: {message}")]
    Frame { message: String },

    /// Function code not handled by the simulated device
    #[error("Unsupported function code: 0x{code:02X}")]
    InvalidFunction { code: u8 },

    /// Field values outside the accepted range
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Request checksum does not match its contents
    #[error("CRC mismatch: expected 0x{expected:04X}, got 0x{actual:04X}")]
    CrcMismatch { expected: u16, actual: u16 },

    /// Invalid simulator configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Socket level failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModbusError {
    pub fn frame(message: impl Into<String>) -> Self {
        Self::Frame {
            message: message.into(),
        }
    }

    pub fn invalid_function(code: u8) -> Self {
        Self::InvalidFunction { code }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error means "drop the request silently" rather than a
    /// failure of the simulator itself.
    pub fn is_dropped_request(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ModbusError::invalid_function(0x99).to_string(),
            "Unsupported function code: 0x99"
        );
        assert_eq!(
            ModbusError::CrcMismatch {
                expected: 0x0BC4,
                actual: 0x0000
            }
            .to_string(),
            "CRC mismatch: expected 0x0BC4, got 0x0000"
        );
        assert_eq!(
            ModbusError::frame("3 bytes").to_string(),
            "Malformed frame: 3 bytes"
        );
    }

    #[test]
    fn test_dropped_request_classification() {
        assert!(ModbusError::frame("short").is_dropped_request());
        assert!(ModbusError::invalid_function(0x01).is_dropped_request());
        assert!(!ModbusError::configuration("bad").is_dropped_request());

        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy");
        assert!(!ModbusError::from(io).is_dropped_request());
    }
}
