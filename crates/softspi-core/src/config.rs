//! Bus configuration
//!
//! A [`SpiConfig`] names the four pins the bit engine drives. It is plain
//! data: copying it around is free and it never changes after the bus has
//! been initialized.

use crate::error::{Error, Result};
use crate::pin::Pin;

/// Maximum number of bytes a single transaction may move
///
/// Transactions longer than this are rejected before any pin is touched.
/// A bus can be built with a different bound through the `MAX` const
/// parameter of [`SoftSpi`](crate::SoftSpi).
pub const SPI_MAX_BUFFER_SIZE: usize = 256;

/// Pin assignment for a bit-banged SPI bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiConfig {
    /// MOSI (Master Out Slave In) pin
    pub mosi: Pin,
    /// MISO (Master In Slave Out) pin
    pub miso: Pin,
    /// SCK (serial clock) pin
    pub sck: Pin,
    /// SS (slave select, active low) pin
    pub ss: Pin,
}

impl SpiConfig {
    /// Create a new configuration from the four pin assignments
    pub const fn new(mosi: Pin, miso: Pin, sck: Pin, ss: Pin) -> Self {
        Self {
            mosi,
            miso,
            sck,
            ss,
        }
    }

    /// Pins in signal order: MOSI, MISO, SCK, SS
    pub const fn pins(&self) -> [Pin; 4] {
        [self.mosi, self.miso, self.sck, self.ss]
    }

    /// Check that no pin is assigned to two signals
    pub fn validate(&self) -> Result<()> {
        let pins = self.pins();
        for (i, &pin) in pins.iter().enumerate() {
            if pins[i + 1..].contains(&pin) {
                return Err(Error::DuplicatePin { pin });
            }
        }
        Ok(())
    }
}
