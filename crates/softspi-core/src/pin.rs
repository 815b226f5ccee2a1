//! Pin controller abstraction
//!
//! The bit engine never touches hardware directly. Every level change and
//! every sample goes through a [`PinController`] handed to the bus when it
//! is created, so the same engine drives Linux GPIO lines, microcontroller
//! ports, or an in-memory test double.

/// Identifier of a digital pin
///
/// Wide enough for Linux GPIO line offsets; microcontroller ports usually
/// fit in the low byte.
pub type Pin = u32;

/// Trait for low-level digital pin access
///
/// Implementations must apply output levels before returning (no posted
/// writes) and sample inputs synchronously. Pin errors are the platform's
/// concern: they are logged by the implementation, not reported to the bus.
pub trait PinController {
    /// Drive `pin` to the high level
    fn set_high(&mut self, pin: Pin);

    /// Drive `pin` to the low level
    fn set_low(&mut self, pin: Pin);

    /// Sample the current level of `pin` (`true` = high)
    ///
    /// Takes `&mut self` because sampling may have side effects on the
    /// platform (for example advancing a recorded input sequence).
    fn read(&mut self, pin: Pin) -> bool;

    /// Drive `pin` to the given level
    ///
    /// Default implementation dispatches to `set_high` / `set_low`.
    fn set(&mut self, pin: Pin, high: bool) {
        if high {
            self.set_high(pin);
        } else {
            self.set_low(pin);
        }
    }
}

impl<P: PinController + ?Sized> PinController for &mut P {
    fn set_high(&mut self, pin: Pin) {
        (**self).set_high(pin);
    }

    fn set_low(&mut self, pin: Pin) {
        (**self).set_low(pin);
    }

    fn read(&mut self, pin: Pin) -> bool {
        (**self).read(pin)
    }

    fn set(&mut self, pin: Pin, high: bool) {
        (**self).set(pin, high);
    }
}
