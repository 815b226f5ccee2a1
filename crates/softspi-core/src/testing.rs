//! Recording pin controller for unit tests

use crate::pin::{Pin, PinController};

pub(crate) const MOSI: Pin = 10;
pub(crate) const MISO: Pin = 11;
pub(crate) const SCK: Pin = 12;
pub(crate) const SS: Pin = 13;

/// One pin access, in call order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Set(Pin, bool),
    Read(Pin),
}

/// Keeps the last level of every pin and feeds MISO from a cyclic sequence
#[derive(Debug)]
pub(crate) struct Recorder {
    pub levels: [bool; 32],
    pub miso: [bool; 8],
    pub miso_len: usize,
    pub miso_index: usize,
    pub log: [Option<Access>; 512],
    pub log_len: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            levels: [false; 32],
            miso: [false; 8],
            miso_len: 0,
            miso_index: 0,
            log: [None; 512],
            log_len: 0,
        }
    }

    pub fn with_miso(bits: &[bool]) -> Self {
        let mut rec = Self::new();
        rec.miso[..bits.len()].copy_from_slice(bits);
        rec.miso_len = bits.len();
        rec
    }

    pub fn level(&self, pin: Pin) -> bool {
        self.levels[pin as usize]
    }

    pub fn accesses(&self) -> impl Iterator<Item = Access> + '_ {
        self.log[..self.log_len].iter().flatten().copied()
    }

    pub fn clear_log(&mut self) {
        self.log_len = 0;
    }

    fn record(&mut self, access: Access) {
        if self.log_len < self.log.len() {
            self.log[self.log_len] = Some(access);
            self.log_len += 1;
        }
    }
}

impl PinController for Recorder {
    fn set_high(&mut self, pin: Pin) {
        self.levels[pin as usize] = true;
        self.record(Access::Set(pin, true));
    }

    fn set_low(&mut self, pin: Pin) {
        self.levels[pin as usize] = false;
        self.record(Access::Set(pin, false));
    }

    fn read(&mut self, pin: Pin) -> bool {
        self.record(Access::Read(pin));
        if pin == MISO && self.miso_len > 0 {
            let bit = self.miso[self.miso_index];
            self.miso_index = (self.miso_index + 1) % self.miso_len;
            bit
        } else {
            self.levels[pin as usize]
        }
    }
}

pub(crate) fn config() -> crate::SpiConfig {
    crate::SpiConfig::new(MOSI, MISO, SCK, SS)
}

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
