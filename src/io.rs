//! Wide console I/O abstraction.
//!
//! The `WideConsole` trait is the physical side of the streaming adapters: a
//! device that moves wide units (UTF-16 or UTF-32) in bounded blocking calls.
//! Platform glue (e.g. `ReadConsoleW`/`WriteConsoleW`) implements it; this
//! crate never talks to the OS itself.

use crate::utf::UtfUnit;

/// Platform-agnostic wide console trait.
///
/// Calls are blocking and single threaded. The adapters never retry a failed
/// call; retry policy belongs to the implementation.
pub trait WideConsole {
    /// Unit the device reads and writes
    type Unit: UtfUnit;

    /// Platform-specific error type
    type Error: core::fmt::Debug;

    /// Capability probe: whether this handle is an interactive console.
    ///
    /// Queried once when a stream is constructed. Non-interactive handles are
    /// passed through untouched and never transcoded.
    fn is_interactive(&self) -> bool;

    /// Read at most `buf.len()` units.
    ///
    /// Returns:
    /// - `Ok(n)` with `n > 0` units stored at the front of `buf`
    /// - `Ok(0)` at end of input
    /// - `Err(Self::Error)` on I/O error
    fn read_wide(&mut self, buf: &mut [Self::Unit]) -> Result<usize, Self::Error>;

    /// Write `buf` in one call, returning the number of units transmitted.
    fn write_wide(&mut self, buf: &[Self::Unit]) -> Result<usize, Self::Error>;
}

impl<T: WideConsole + ?Sized> WideConsole for &mut T {
    type Unit = T::Unit;
    type Error = T::Error;

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn read_wide(&mut self, buf: &mut [Self::Unit]) -> Result<usize, Self::Error> {
        (**self).read_wide(buf)
    }

    fn write_wide(&mut self, buf: &[Self::Unit]) -> Result<usize, Self::Error> {
        (**self).write_wide(buf)
    }
}

impl<T: WideConsole + ?Sized> WideConsole for alloc::boxed::Box<T> {
    type Unit = T::Unit;
    type Error = T::Error;

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn read_wide(&mut self, buf: &mut [Self::Unit]) -> Result<usize, Self::Error> {
        (**self).read_wide(buf)
    }

    fn write_wide(&mut self, buf: &[Self::Unit]) -> Result<usize, Self::Error> {
        (**self).write_wide(buf)
    }
}
