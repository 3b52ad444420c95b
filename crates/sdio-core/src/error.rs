//! Error types for sdio-core
//!
//! This module provides a no_std compatible error type shared by every
//! protocol operation. Transport failures are carried verbatim, tagged with
//! the phase (command or data) in which they happened.

use core::fmt;

/// Failure reported by the host transport
///
/// The transport owns timeout and retry policy; these values are passed
/// through the protocol layer without reinterpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    /// No response (or no data) within the transport's deadline
    Timeout,
    /// CRC mismatch on the response or a data block
    Crc,
    /// Response carried the wrong command index
    CommandIndex,
    /// Start, transmission, or end bit was not correct
    Bit,
    /// The bus is busy with another transaction
    Busy,
    /// The host controller does not support the request
    NotSupported,
    /// Some other, controller-specific failure
    Other(Option<&'static str>),
}

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Argument rejected before issuing a command, or the card flagged the
    /// function number as invalid
    InvalidArgument,
    /// The card flagged a generic error in its R5 status
    IoError,
    /// The card flagged the register address as out of range
    OutOfRange,
    /// The card never reported ready within the poll budget
    Timeout,
    /// Command phase failed in the transport
    Command(TransportError),
    /// Command phase succeeded but the data phase failed
    Data(TransportError),
}

impl Error {
    /// Returns true for the poll-loop timeout and for transport timeouts in
    /// either phase
    pub const fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::Command(TransportError::Timeout)
                | Self::Data(TransportError::Timeout)
        )
    }

    /// Returns the underlying transport failure, if any
    pub const fn transport(&self) -> Option<TransportError> {
        match self {
            Self::Command(e) | Self::Data(e) => Some(*e),
            _ => None,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out"),
            Self::Crc => write!(f, "CRC error"),
            Self::CommandIndex => write!(f, "response index mismatch"),
            Self::Bit => write!(f, "start/end bit error"),
            Self::Busy => write!(f, "bus busy"),
            Self::NotSupported => write!(f, "not supported by host"),
            Self::Other(Some(what)) => write!(f, "{}", what),
            Self::Other(None) => write!(f, "host controller error"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::IoError => write!(f, "I/O error reported by card"),
            Self::OutOfRange => write!(f, "address out of range"),
            Self::Timeout => write!(f, "card did not become ready"),
            Self::Command(e) => write!(f, "command failed: {}", e),
            Self::Data(e) => write!(f, "data transfer failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
