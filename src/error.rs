//! Error types for conversion and console streaming.
//!
//! Malformed and truncated input never show up here: they are repaired with
//! the replacement character. `BridgeError` only covers conditions the caller
//! has to decide about.

use core::fmt;

/// Bridge error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Bounded conversion result does not fit the destination buffer
    CapacityExceeded,

    /// Physical read from the wide console failed
    PhysicalRead,

    /// Physical write to the wide console failed
    PhysicalWrite,

    /// Physical write transmitted fewer units than were staged
    ShortWrite {
        /// Units handed to the device
        staged: usize,
        /// Units the device reported as written
        written: usize,
    },

    /// Console context was already initialized
    AlreadyInitialized,

    /// Console context used before initialization
    NotInitialized,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::CapacityExceeded => write!(f, "Capacity exceeded"),
            BridgeError::PhysicalRead => write!(f, "Console read failed"),
            BridgeError::PhysicalWrite => write!(f, "Console write failed"),
            BridgeError::ShortWrite { staged, written } => {
                write!(f, "Console wrote {} of {} units", written, staged)
            }
            BridgeError::AlreadyInitialized => write!(f, "Console context already initialized"),
            BridgeError::NotInitialized => write!(f, "Console context not initialized"),
        }
    }
}

impl core::error::Error for BridgeError {}

#[cfg(feature = "std")]
impl From<BridgeError> for std::io::Error {
    fn from(err: BridgeError) -> Self {
        let kind = match err {
            BridgeError::ShortWrite { .. } => std::io::ErrorKind::WriteZero,
            BridgeError::CapacityExceeded => std::io::ErrorKind::OutOfMemory,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, err)
    }
}
