//! softspi-core - Bit-banged SPI master
//!
//! This crate drives four general-purpose pins (MOSI, MISO, SCK, SS) to
//! emulate an SPI master in software. It targets SPI Mode 0 only: clock
//! idles low, data is sampled on the rising edge, bytes go MSB first.
//!
//! The crate is `no_std` and never allocates. Pin access goes through the
//! [`PinController`] trait, so the platform layer (Linux GPIO, a
//! microcontroller port, a test double) is supplied by the caller.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for [`Error`]
//!
//! # Example
//!
//! ```ignore
//! use softspi_core::{SoftSpi, SpiConfig};
//!
//! fn read_id<P: softspi_core::PinController>(pins: P) -> softspi_core::Result<[u8; 4]> {
//!     let mut spi = SoftSpi::new(pins, SpiConfig::new(10, 11, 12, 13));
//!     let mut rx = [0u8; 4];
//!     spi.transaction(&[0x9F, 0, 0, 0], &mut rx)?;
//!     Ok(rx)
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub mod bitbang;
pub mod config;
pub mod error;
pub mod pin;
pub mod transaction;

#[cfg(test)]
mod testing;

pub use bitbang::SoftSpi;
pub use config::{SpiConfig, SPI_MAX_BUFFER_SIZE};
pub use error::{Error, Result};
pub use pin::{Pin, PinController};
