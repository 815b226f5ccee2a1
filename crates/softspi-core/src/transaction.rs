//! Chip-select framed transfers
//!
//! Every framed transfer follows the same state machine:
//!
//! ```text
//! IDLE --(len <= MAX)--> SELECTED --(byte)*--> IDLE
//! ```
//!
//! The length check is the only guarded transition. Once SS is asserted the
//! transfer always runs to completion and deasserts SS; there is no
//! cancellation and no partial transfer. A rejected request touches no pin.

use crate::bitbang::SoftSpi;
use crate::error::{Error, Result};
use crate::pin::PinController;

/// Byte clocked out on MOSI while only receiving
pub const FILL_BYTE: u8 = 0x00;

impl<P: PinController, const MAX: usize> SoftSpi<P, MAX> {
    /// Full-duplex transfer framed by SS
    ///
    /// Sends `tx` and stores the byte received in each slot into the same
    /// index of `rx`. Both buffers must have the same length, which must not
    /// exceed `MAX`.
    pub fn transaction(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        Self::check_len(tx.len())?;
        if rx.len() != tx.len() {
            log::warn!(
                "softspi: rejected transaction, tx={} rx={}",
                tx.len(),
                rx.len()
            );
            return Err(Error::BufferSizeMismatch {
                tx: tx.len(),
                rx: rx.len(),
            });
        }

        log::trace!("softspi: transaction {} bytes", tx.len());

        self.select();
        for (out, &byte) in rx.iter_mut().zip(tx) {
            *out = self.transfer_byte(byte);
        }
        self.deselect();

        Ok(())
    }

    /// Send `tx` framed by SS, discarding whatever the device returns
    pub fn write(&mut self, tx: &[u8]) -> Result<()> {
        Self::check_len(tx.len())?;
        log::trace!("softspi: write {} bytes", tx.len());

        self.select();
        for &byte in tx {
            self.transfer_byte(byte);
        }
        self.deselect();

        Ok(())
    }

    /// Fill `rx` framed by SS, clocking out [`FILL_BYTE`] for every byte
    pub fn read(&mut self, rx: &mut [u8]) -> Result<()> {
        Self::check_len(rx.len())?;
        log::trace!("softspi: read {} bytes", rx.len());

        self.select();
        for byte in rx.iter_mut() {
            *byte = self.transfer_byte(FILL_BYTE);
        }
        self.deselect();

        Ok(())
    }

    /// Full-duplex transfer framed by SS, replacing each byte of `buf` with
    /// the byte received in its slot
    pub fn transfer_in_place(&mut self, buf: &mut [u8]) -> Result<()> {
        Self::check_len(buf.len())?;
        log::trace!("softspi: transfer in place {} bytes", buf.len());

        self.select();
        for byte in buf.iter_mut() {
            *byte = self.transfer_byte(*byte);
        }
        self.deselect();

        Ok(())
    }

    fn check_len(len: usize) -> Result<()> {
        if len > MAX {
            log::warn!(
                "softspi: rejected transfer of {} bytes (max {})",
                len,
                MAX
            );
            return Err(Error::BufferTooLarge { len, max: MAX });
        }
        Ok(())
    }

    /// Assert SS (active low)
    #[inline]
    fn select(&mut self) {
        let ss = self.config().ss;
        self.pins_mut().set_low(ss);
    }

    /// Deassert SS, returning the bus to idle
    #[inline]
    fn deselect(&mut self) {
        let ss = self.config().ss;
        self.pins_mut().set_high(ss);
    }
}
