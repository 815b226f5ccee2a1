//! Bit and byte engines for SPI Mode 0
//!
//! [`SoftSpi`] is the bus context: it owns (or borrows) a [`PinController`]
//! together with the [`SpiConfig`] naming the four signals. The clock idles
//! low and the slave samples MOSI on the rising edge (CPOL=0, CPHA=0); no
//! other mode is supported.
//!
//! ## Signal sequence
//!
//! ```text
//! transmit_bit:  MOSI <- bit, SCK high, SCK low
//! receive_bit:   SCK high, sample MISO, SCK low
//! transfer_byte: 8 x (transmit_bit, receive_bit), MSB first
//! ```
//!
//! The clock is always left low when an operation returns, so consecutive
//! calls and the end of a transfer start from the idle level.

use crate::config::{SpiConfig, SPI_MAX_BUFFER_SIZE};
use crate::error::Result;
use crate::pin::PinController;

/// Bit-banged SPI master
///
/// `MAX` is the largest number of bytes a single framed transfer may move;
/// it is fixed at build time and defaults to [`SPI_MAX_BUFFER_SIZE`].
///
/// The bus assumes exclusive, uninterrupted control of its pins for the
/// duration of every operation. There is no locking: a caller running under
/// preemption must keep other users off the pins until a transaction
/// returns.
#[derive(Debug)]
pub struct SoftSpi<P, const MAX: usize = SPI_MAX_BUFFER_SIZE> {
    pins: P,
    config: SpiConfig,
}

impl<P: PinController> SoftSpi<P> {
    /// Initialize a bus with the default transfer bound
    ///
    /// Drives MOSI low, SCK low and SS high: clock idle, device deselected.
    /// Pin assignments are not checked; see [`SoftSpi::try_new`].
    pub fn new(pins: P, config: SpiConfig) -> Self {
        Self::new_bounded(pins, config)
    }

    /// Validate `config`, then initialize a bus with the default bound
    ///
    /// On error no pin is touched.
    pub fn try_new(pins: P, config: SpiConfig) -> Result<Self> {
        Self::try_new_bounded(pins, config)
    }
}

impl<P: PinController, const MAX: usize> SoftSpi<P, MAX> {
    /// Largest transfer accepted by this bus, in bytes
    pub const MAX_BUFFER_SIZE: usize = MAX;

    /// Initialize a bus whose transfer bound is the `MAX` parameter
    pub fn new_bounded(mut pins: P, config: SpiConfig) -> Self {
        log::debug!(
            "softspi: init mosi={} miso={} sck={} ss={} max={}",
            config.mosi,
            config.miso,
            config.sck,
            config.ss,
            MAX
        );

        pins.set_low(config.mosi);
        pins.set_low(config.sck);
        pins.set_high(config.ss);

        Self { pins, config }
    }

    /// Validate `config`, then initialize a bus bounded by `MAX`
    pub fn try_new_bounded(pins: P, config: SpiConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new_bounded(pins, config))
    }

    /// Get the pin assignment
    pub fn config(&self) -> &SpiConfig {
        &self.config
    }

    /// Get a reference to the pin controller
    pub fn pins(&self) -> &P {
        &self.pins
    }

    /// Get a mutable reference to the pin controller
    ///
    /// Changing any of the four bus pins through this handle between
    /// transfers leaves the bus in whatever state the caller set.
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Give the pin controller back, ending the bus session
    ///
    /// No pin is touched; the lines keep their current levels.
    pub fn release(self) -> P {
        self.pins
    }

    /// Clock one bit out on MOSI
    ///
    /// MOSI is set up before the rising edge; SCK returns low afterwards.
    pub fn transmit_bit(&mut self, bit: bool) {
        self.pins.set(self.config.mosi, bit);
        self.pins.set_high(self.config.sck);
        self.pins.set_low(self.config.sck);
    }

    /// Clock one bit in from MISO
    ///
    /// MISO is sampled while SCK is high; SCK returns low afterwards.
    pub fn receive_bit(&mut self) -> bool {
        self.pins.set_high(self.config.sck);
        let bit = self.pins.read(self.config.miso);
        self.pins.set_low(self.config.sck);
        bit
    }

    /// Exchange one byte, most significant bit first
    ///
    /// SS is not touched; framing is the caller's job (see
    /// [`SoftSpi::transaction`]).
    pub fn transfer_byte(&mut self, byte: u8) -> u8 {
        let mut rx = 0u8;
        for i in (0..8).rev() {
            self.transmit_bit((byte >> i) & 1 != 0);
            if self.receive_bit() {
                rx |= 1 << i;
            }
        }
        rx
    }
}
