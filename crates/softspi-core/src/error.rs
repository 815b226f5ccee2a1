//! Error types for softspi-core
//!
//! This module provides a no_std compatible error type that can be used
//! throughout the crate.

use core::fmt;

use crate::pin::Pin;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // Transfer errors
    /// Requested transfer is longer than the bus capacity
    BufferTooLarge {
        /// Number of bytes requested
        len: usize,
        /// Maximum number of bytes a single transaction may move
        max: usize,
    },
    /// Transmit and receive buffers differ in length
    BufferSizeMismatch {
        /// Length of the transmit buffer
        tx: usize,
        /// Length of the receive buffer
        rx: usize,
    },

    // Configuration errors
    /// The same pin is assigned to more than one SPI signal
    DuplicatePin {
        /// The pin that appears twice
        pin: Pin,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooLarge { len, max } => {
                write!(f, "transfer of {} bytes exceeds capacity of {} bytes", len, max)
            }
            Self::BufferSizeMismatch { tx, rx } => {
                write!(
                    f,
                    "buffer size mismatch: {} bytes to send, {} bytes to receive",
                    tx, rx
                )
            }
            Self::DuplicatePin { pin } => {
                write!(f, "pin {} is assigned to more than one SPI signal", pin)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
