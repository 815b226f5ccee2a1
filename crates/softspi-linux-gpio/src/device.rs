//! Linux GPIO pin controller
//!
//! This module provides `LinuxGpioPins`, a [`PinController`] backed by the
//! Linux GPIO character device interface (gpiocdev). The four SPI lines
//! are requested once when the controller is opened and released when it
//! is dropped.

use crate::error::{LinuxGpioError, Result};

use gpiocdev::line::{Offset, Value};
use gpiocdev::request::{Config, Request};

use softspi_core::{Pin, PinController, SoftSpi, SpiConfig};

/// Consumer label shown by `gpioinfo` for the requested lines
const CONSUMER: &str = "softspi";

/// Configuration for opening Linux GPIO lines as an SPI bus
#[derive(Debug, Clone, Default)]
pub struct LinuxGpioSpiConfig {
    /// Device path (e.g., "/dev/gpiochip0")
    pub device: String,
    /// MOSI (Master Out Slave In) GPIO line offset
    pub mosi: Offset,
    /// MISO (Master In Slave Out) GPIO line offset
    pub miso: Offset,
    /// SCK (Clock) GPIO line offset
    pub sck: Offset,
    /// SS (Slave Select) GPIO line offset
    pub ss: Offset,
}

impl LinuxGpioSpiConfig {
    /// Create a new configuration with the given device path and pins
    pub fn new(
        device: impl Into<String>,
        mosi: Offset,
        miso: Offset,
        sck: Offset,
        ss: Offset,
    ) -> Self {
        Self {
            device: device.into(),
            mosi,
            miso,
            sck,
            ss,
        }
    }

    /// Set the device path from a gpiochip number
    pub fn with_gpiochip(mut self, n: u32) -> Self {
        self.device = format!("/dev/gpiochip{}", n);
        self
    }

    /// Pin assignment for the bus
    pub fn spi_config(&self) -> SpiConfig {
        SpiConfig::new(self.mosi, self.miso, self.sck, self.ss)
    }
}

/// Pin controller driving Linux GPIO lines
///
/// Errors from individual line accesses are logged and otherwise ignored:
/// the bit engine has no failure path for pin calls.
pub struct LinuxGpioPins {
    /// GPIO line request handle
    request: Request,
}

impl LinuxGpioPins {
    /// Request the four SPI lines from the configured GPIO chip
    ///
    /// Outputs start in the idle bus state (SS high, SCK and MOSI low);
    /// MISO is requested as an input.
    pub fn open(config: &LinuxGpioSpiConfig) -> Result<Self> {
        if config.device.is_empty() {
            return Err(LinuxGpioError::NoDevice);
        }
        config.spi_config().validate()?;

        log::debug!("linux_gpio: Opening device {}", config.device);

        let mut req_config = Config::default();
        req_config.with_line(config.ss).as_output(Value::Active);
        req_config.with_line(config.sck).as_output(Value::Inactive);
        req_config.with_line(config.mosi).as_output(Value::Inactive);
        req_config.with_line(config.miso).as_input();

        let request = Request::from_config(req_config)
            .on_chip(&config.device)
            .with_consumer(CONSUMER)
            .request()
            .map_err(LinuxGpioError::LineRequestFailed)?;

        log::info!(
            "linux_gpio: Opened {} (mosi={}, miso={}, sck={}, ss={})",
            config.device,
            config.mosi,
            config.miso,
            config.sck,
            config.ss
        );

        Ok(Self { request })
    }

    fn set_value(&mut self, pin: Pin, value: Value) {
        if let Err(e) = self.request.set_value(pin, value) {
            log::error!("Failed to set GPIO line {}: {}", pin, e);
        }
    }
}

impl PinController for LinuxGpioPins {
    fn set_high(&mut self, pin: Pin) {
        self.set_value(pin, Value::Active);
    }

    fn set_low(&mut self, pin: Pin) {
        self.set_value(pin, Value::Inactive);
    }

    fn read(&mut self, pin: Pin) -> bool {
        match self.request.value(pin) {
            Ok(Value::Active) => true,
            Ok(Value::Inactive) => false,
            Err(e) => {
                log::error!("Failed to get GPIO line {}: {}", pin, e);
                false
            }
        }
    }
}

/// Open the configured lines and initialize an SPI bus on them
pub fn open_bus(config: &LinuxGpioSpiConfig) -> Result<SoftSpi<LinuxGpioPins>> {
    let pins = LinuxGpioPins::open(config)?;
    Ok(SoftSpi::try_new(pins, config.spi_config())?)
}

fn parse_line(name: &'static str, value: &str) -> Result<Offset> {
    value
        .parse()
        .map_err(|_| LinuxGpioError::InvalidLineNumber {
            name,
            value: value.to_string(),
        })
}

/// Parse bus options from a list of key-value pairs
///
/// # Supported Options
///
/// - `dev=/dev/gpiochipN` - GPIO chip device path (required, or use gpiochip)
/// - `gpiochip=N` - GPIO chip number (alternative to dev)
/// - `mosi=N` or `io0=N` - MOSI GPIO line offset (required)
/// - `miso=N` or `io1=N` - MISO GPIO line offset (required)
/// - `sck=N` or `clk=N` - SCK (clock) GPIO line offset (required)
/// - `ss=N` or `cs=N` - SS (slave select) GPIO line offset (required)
pub fn parse_options(options: &[(&str, &str)]) -> Result<LinuxGpioSpiConfig> {
    let mut config = LinuxGpioSpiConfig::default();
    let mut mosi = None;
    let mut miso = None;
    let mut sck = None;
    let mut ss = None;
    let mut gpiochip: Option<u32> = None;

    for (key, value) in options {
        match *key {
            "dev" => {
                config.device = value.to_string();
            }
            "gpiochip" => {
                gpiochip = Some(value.parse().map_err(|_| {
                    LinuxGpioError::InvalidParameter(format!("gpiochip={}", value))
                })?);
            }
            "mosi" | "io0" => mosi = Some(parse_line("mosi", value)?),
            "miso" | "io1" => miso = Some(parse_line("miso", value)?),
            "sck" | "clk" => sck = Some(parse_line("sck", value)?),
            "ss" | "cs" => ss = Some(parse_line("ss", value)?),
            _ => {
                log::warn!("linux_gpio: Unknown option: {}={}", key, value);
            }
        }
    }

    match (config.device.is_empty(), gpiochip) {
        (true, Some(n)) => config = config.with_gpiochip(n),
        (true, None) => return Err(LinuxGpioError::NoDevice),
        (false, Some(_)) => {
            return Err(LinuxGpioError::InvalidParameter(
                "only one of 'dev' or 'gpiochip' can be specified".to_string(),
            ))
        }
        (false, None) => {}
    }

    config.mosi = mosi.ok_or(LinuxGpioError::MissingParameter("mosi (or io0)"))?;
    config.miso = miso.ok_or(LinuxGpioError::MissingParameter("miso (or io1)"))?;
    config.sck = sck.ok_or(LinuxGpioError::MissingParameter("sck"))?;
    config.ss = ss.ok_or(LinuxGpioError::MissingParameter("ss (or cs)"))?;

    Ok(config)
}
