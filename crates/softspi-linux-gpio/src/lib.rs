//! softspi-linux-gpio - Linux GPIO pins for softspi
//!
//! This crate lets the softspi bit engine drive GPIO lines through the Linux
//! character device interface (gpiocdev), the modern replacement for the
//! deprecated sysfs GPIO interface.
//!
//! # Example
//!
//! ```no_run
//! use softspi_linux_gpio::{open_bus, LinuxGpioSpiConfig};
//!
//! //                                   device          MOSI MISO SCK SS
//! let config = LinuxGpioSpiConfig::new("/dev/gpiochip0", 10, 9, 11, 25);
//! let mut spi = open_bus(&config)?;
//!
//! let mut rx = [0u8; 4];
//! spi.transaction(&[0x9F, 0, 0, 0], &mut rx)?;
//! println!("ID: {:02X} {:02X} {:02X}", rx[1], rx[2], rx[3]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Options
//!
//! [`parse_options`] accepts key-value pairs such as
//! `dev=/dev/gpiochip0,mosi=10,miso=9,sck=11,cs=25`.
//!
//! # System Requirements
//!
//! - Linux kernel 4.8+ with GPIO character device support (kernel 5.5+ for v2 API)
//! - Access to `/dev/gpiochipN` devices (may require root or udev rules)

pub mod device;
pub mod error;

// Re-exports
pub use device::{open_bus, parse_options, LinuxGpioPins, LinuxGpioSpiConfig};
pub use error::{LinuxGpioError, Result};

/// Parse options, open the lines and initialize a bus in one step
///
/// # Arguments
///
/// * `options` - Slice of (key, value) pairs, see [`parse_options`]
pub fn open_linux_gpio_spi(
    options: &[(&str, &str)],
) -> Result<softspi_core::SoftSpi<LinuxGpioPins>> {
    let config = parse_options(options)?;
    open_bus(&config)
}
