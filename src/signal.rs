//! Cancellation signal for a running sequence.
//!
//! The flag is built on `critical-section`, so it can be raised from a
//! button interrupt and polled by the render loop.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

/// Boolean-readable cancellation request
///
/// Polled by the driver at every suspension point of a sequence.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;

    /// Lower the signal before a new sequence starts
    ///
    /// Signals that cannot be lowered from here keep the default no-op.
    fn reset(&self) {}
}

impl CancelSignal for bool {
    fn is_cancelled(&self) -> bool {
        *self
    }
}

impl CancelSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.store(false, Ordering::Release);
    }
}

impl<S: CancelSignal + ?Sized> CancelSignal for &S {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn reset(&self) {
        (**self).reset();
    }
}

/// Interrupt-safe cancellation flag
///
/// Typically a `static`, raised by the dismiss button and cleared by the
/// wake loop before the next sequence starts.
pub struct CancelFlag {
    inner: Mutex<Cell<bool>>,
}

impl CancelFlag {
    /// Create a lowered flag.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(false)),
        }
    }

    /// Request cancellation.
    pub fn raise(&self) {
        critical_section::with(|cs| self.inner.borrow(cs).set(true));
    }

    /// Lower the flag, returning whether it was raised.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).replace(false))
    }
}

impl Default for CancelFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelSignal for CancelFlag {
    fn is_cancelled(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    fn reset(&self) {
        self.take();
    }
}
