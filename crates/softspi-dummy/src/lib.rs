//! softspi-dummy - In-memory pin controller for testing
//!
//! This crate provides a dummy [`PinController`] that keeps pin levels in
//! memory. It's useful for testing and development without real hardware:
//!
//! - every output pin remembers the last level written to it
//! - the MISO pin replays a caller-supplied bit sequence, wrapping around
//! - every access is appended to a bounded event log
//!
//! Everything is fixed capacity (`heapless`), so the dummy also builds
//! without `std`.

#![cfg_attr(not(feature = "std"), no_std)]

use heapless::{FnvIndexMap, Vec};
use softspi_core::{Pin, PinController};

/// Number of distinct pins the dummy can track (power of two)
pub const MAX_PINS: usize = 64;

/// Longest MISO input sequence
pub const MAX_SEQUENCE: usize = 64;

/// Number of events kept in the access log
pub const MAX_EVENTS: usize = 2048;

/// A single pin access, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinEvent {
    /// Pin driven high
    High(Pin),
    /// Pin driven low
    Low(Pin),
    /// Pin sampled, with the level returned
    Read(Pin, bool),
}

impl PinEvent {
    /// The pin this event touched
    pub fn pin(&self) -> Pin {
        match *self {
            Self::High(pin) | Self::Low(pin) | Self::Read(pin, _) => pin,
        }
    }

    /// Whether this event drove an output
    pub fn is_write(&self) -> bool {
        !matches!(self, Self::Read(..))
    }
}

/// Dummy pin controller
///
/// Reads of the configured MISO pin come from the input sequence; reads of
/// any other pin return the level last written (low if never written).
#[derive(Debug)]
pub struct DummyPins {
    miso: Pin,
    levels: FnvIndexMap<Pin, bool, MAX_PINS>,
    sequence: Vec<bool, MAX_SEQUENCE>,
    read_index: usize,
    events: Vec<PinEvent, MAX_EVENTS>,
    overflowed: bool,
}

impl DummyPins {
    /// Create a dummy whose `miso` pin replays an input sequence
    ///
    /// With an empty sequence MISO reads like any other pin.
    pub fn new(miso: Pin) -> Self {
        Self {
            miso,
            levels: FnvIndexMap::new(),
            sequence: Vec::new(),
            read_index: 0,
            events: Vec::new(),
            overflowed: false,
        }
    }

    /// Create a dummy with a preloaded MISO sequence
    pub fn with_miso_sequence(miso: Pin, bits: &[bool]) -> Self {
        let mut pins = Self::new(miso);
        pins.set_miso_sequence(bits);
        pins
    }

    /// Replace the MISO input sequence and rewind it
    ///
    /// Bits beyond [`MAX_SEQUENCE`] are dropped.
    pub fn set_miso_sequence(&mut self, bits: &[bool]) {
        self.sequence.clear();
        for &bit in bits {
            if self.sequence.push(bit).is_err() {
                log::warn!(
                    "dummy: MISO sequence truncated to {} bits",
                    MAX_SEQUENCE
                );
                break;
            }
        }
        self.read_index = 0;
    }

    /// Replace the MISO input sequence with the bits of `bytes`, MSB first
    pub fn set_miso_bytes(&mut self, bytes: &[u8]) {
        self.sequence.clear();
        'outer: for &byte in bytes {
            for i in (0..8).rev() {
                if self.sequence.push((byte >> i) & 1 != 0).is_err() {
                    log::warn!(
                        "dummy: MISO sequence truncated to {} bits",
                        MAX_SEQUENCE
                    );
                    break 'outer;
                }
            }
        }
        self.read_index = 0;
    }

    /// Force the level seen on `pin` without logging a write
    ///
    /// Simulates a level driven from outside, e.g. by the slave device.
    pub fn set_input(&mut self, pin: Pin, high: bool) {
        self.store(pin, high);
    }

    /// Get the current level of `pin` (low if it was never driven)
    pub fn level(&self, pin: Pin) -> bool {
        self.levels.get(&pin).copied().unwrap_or(false)
    }

    /// Get the logged pin accesses, oldest first
    pub fn events(&self) -> &[PinEvent] {
        &self.events
    }

    /// Number of logged output writes
    pub fn write_count(&self) -> usize {
        self.events.iter().filter(|e| e.is_write()).count()
    }

    /// Whether events were dropped because the log was full
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Clear the event log, keeping pin levels and the input sequence
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.overflowed = false;
    }

    /// Forget all pin levels, the input sequence and the event log
    pub fn reset(&mut self) {
        self.levels.clear();
        self.sequence.clear();
        self.read_index = 0;
        self.clear_events();
    }

    fn store(&mut self, pin: Pin, high: bool) {
        if self.levels.insert(pin, high).is_err() {
            log::error!("dummy: pin table full, dropping level for pin {}", pin);
        }
    }

    fn log(&mut self, event: PinEvent) {
        if self.events.push(event).is_err() && !self.overflowed {
            log::warn!("dummy: event log full ({} events)", MAX_EVENTS);
            self.overflowed = true;
        }
    }
}

impl PinController for DummyPins {
    fn set_high(&mut self, pin: Pin) {
        self.store(pin, true);
        self.log(PinEvent::High(pin));
    }

    fn set_low(&mut self, pin: Pin) {
        self.store(pin, false);
        self.log(PinEvent::Low(pin));
    }

    fn read(&mut self, pin: Pin) -> bool {
        let value = if pin == self.miso && !self.sequence.is_empty() {
            let bit = self.sequence[self.read_index];
            self.read_index = (self.read_index + 1) % self.sequence.len();
            bit
        } else {
            self.level(pin)
        };
        self.log(PinEvent::Read(pin, value));
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softspi_core::{Error, SoftSpi, SpiConfig, SPI_MAX_BUFFER_SIZE};

    const MOSI: Pin = 10;
    const MISO: Pin = 11;
    const SCK: Pin = 12;
    const SS: Pin = 13;

    fn setup(bits: &[bool]) -> SoftSpi<DummyPins> {
        let _ = env_logger::builder().is_test(true).try_init();
        let pins = DummyPins::with_miso_sequence(MISO, bits);
        SoftSpi::new(pins, SpiConfig::new(MOSI, MISO, SCK, SS))
    }

    #[test]
    fn test_initialization_sets_idle_state() {
        let spi = setup(&[]);
        assert!(!spi.pins().level(MOSI));
        assert!(!spi.pins().level(SCK));
        assert!(spi.pins().level(SS));
    }

    #[test]
    fn test_transmit_bit_returns_clock_low() {
        let mut spi = setup(&[]);

        spi.transmit_bit(true);
        assert!(spi.pins().level(MOSI));
        assert!(!spi.pins().level(SCK));

        spi.transmit_bit(false);
        assert!(!spi.pins().level(MOSI));
        assert!(!spi.pins().level(SCK));
    }

    #[test]
    fn test_mode0_timing() {
        let mut spi = setup(&[]);
        spi.pins_mut().clear_events();

        spi.transmit_bit(true);

        // Data is stable before the rising edge, clock ends idle
        assert_eq!(
            spi.pins().events(),
            &[PinEvent::High(MOSI), PinEvent::High(SCK), PinEvent::Low(SCK)]
        );
    }

    #[test]
    fn test_receive_bit_reads_miso_sequence() {
        let mut spi = setup(&[true, false]);

        assert!(spi.receive_bit());
        assert!(!spi.pins().level(SCK));
        assert!(!spi.receive_bit());
        assert!(!spi.pins().level(SCK));
    }

    #[test]
    fn test_transfer_byte_full_byte() {
        let mut spi = setup(&[true, false, true, false, true, false, true, false]);
        spi.pins_mut().clear_events();

        assert_eq!(spi.transfer_byte(0xA5), 0xAA);
        assert!(spi.pins().level(SS));
        assert!(spi.pins().events().iter().all(|e| e.pin() != SS));
    }

    #[test]
    fn test_transfer_byte_from_miso_bytes() {
        let mut spi = setup(&[]);
        spi.pins_mut().set_miso_bytes(&[0x3C, 0xC3]);

        assert_eq!(spi.transfer_byte(0x00), 0x3C);
        assert_eq!(spi.transfer_byte(0x00), 0xC3);
        // Sequence wraps around
        assert_eq!(spi.transfer_byte(0x00), 0x3C);
    }

    #[test]
    fn test_transaction_multiple_bytes() {
        let mut spi = setup(&[true; 8]);

        let tx = [0x55, 0xAA, 0x33];
        let mut rx = [0u8; 3];
        spi.transaction(&tx, &mut rx).unwrap();

        assert_eq!(rx, [0xFF, 0xFF, 0xFF]);
        assert!(spi.pins().level(SS));
    }

    #[test]
    fn test_transaction_max_buffer_size() {
        let mut spi = setup(&[]);
        spi.pins_mut().set_input(SS, false);
        spi.pins_mut().clear_events();

        let tx = [0u8; SPI_MAX_BUFFER_SIZE + 1];
        let mut rx = [0u8; SPI_MAX_BUFFER_SIZE + 1];
        let result = spi.transaction(&tx, &mut rx);

        assert_eq!(
            result,
            Err(Error::BufferTooLarge {
                len: SPI_MAX_BUFFER_SIZE + 1,
                max: SPI_MAX_BUFFER_SIZE,
            })
        );
        assert_eq!(spi.pins().write_count(), 0);
        assert!(spi.pins().events().is_empty());
        // SS keeps whatever level it had
        assert!(!spi.pins().level(SS));
    }

    #[test]
    fn test_other_pins_keep_their_level() {
        let mut spi = setup(&[true, false]);
        spi.pins_mut().set_high(20);
        spi.pins_mut().set_low(21);
        spi.pins_mut().clear_events();

        let mut rx = [0u8; 3];
        spi.transaction(&[0x55, 0xAA, 0x33], &mut rx).unwrap();

        assert!(!spi.pins().overflowed());
        for event in spi.pins().events() {
            match *event {
                PinEvent::Read(pin, _) => assert_eq!(pin, MISO),
                _ => assert!([MOSI, SCK, SS].contains(&event.pin())),
            }
        }
        assert!(spi.pins_mut().read(20));
        assert!(!spi.pins_mut().read(21));
    }

    #[test]
    fn test_read_of_unsequenced_miso_returns_input_level() {
        let mut pins = DummyPins::new(MISO);
        assert!(!pins.read(MISO));
        pins.set_input(MISO, true);
        assert!(pins.read(MISO));
        assert_eq!(pins.write_count(), 0);
    }

    #[test]
    fn test_event_log_overflow() {
        let mut pins = DummyPins::new(MISO);
        for _ in 0..MAX_EVENTS + 1 {
            pins.set_high(MOSI);
        }
        assert!(pins.overflowed());
        assert_eq!(pins.events().len(), MAX_EVENTS);

        pins.clear_events();
        assert!(!pins.overflowed());
        assert!(pins.level(MOSI));

        pins.reset();
        assert!(!pins.level(MOSI));
    }

    #[test]
    fn test_sequence_truncated_at_capacity() {
        let pins = DummyPins::with_miso_sequence(MISO, &[true; MAX_SEQUENCE + 4]);
        assert_eq!(pins.sequence.len(), MAX_SEQUENCE);
    }
}
