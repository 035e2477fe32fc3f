//! One-shot transcoding between UTF-8 and the platform wide encoding.
//!
//! Two flavours share the same replacement policy:
//! - [`bounded`]: writes into a caller-supplied fixed-capacity buffer and
//!   fails cleanly on overflow.
//! - [`unbounded`]: grows its result as needed and never fails.
//!
//! The `widen`/`narrow` helpers are the UTF-8 <-> [`WideChar`] entry points
//! for native API glue.

pub mod bounded;
pub mod unbounded;

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::BridgeError;
use crate::utf::{UtfUnit, WideChar, until_nul};

pub use bounded::{convert_bounded, convert_heapless};
pub use unbounded::{convert, convert_nul};

/// Convert UTF-8 text to native wide text.
pub fn widen(s: &str) -> Vec<WideChar> {
    convert(s.as_bytes())
}

/// Convert possibly malformed UTF-8 bytes to native wide text.
pub fn widen_bytes(bytes: &[u8]) -> Vec<WideChar> {
    convert(bytes)
}

/// Convert wide text (UTF-16 or UTF-32) to UTF-8.
pub fn narrow<In: UtfUnit>(source: &[In]) -> String {
    unbounded::convert_to_string(source)
}

/// Convert NUL-terminated wide text to UTF-8.
pub fn narrow_nul<In: UtfUnit>(source: &[In]) -> String {
    unbounded::convert_to_string(until_nul(source))
}

/// Convert UTF-8 bytes into `buffer` as NUL-terminated wide text.
///
/// Returns the converted units without the terminator.
pub fn widen_bounded<'a>(
    buffer: &'a mut [WideChar],
    source: &[u8],
) -> Result<&'a [WideChar], BridgeError> {
    convert_bounded(buffer, source)
}

/// Convert wide text into `buffer` as NUL-terminated UTF-8.
///
/// Returns the converted bytes without the terminator.
pub fn narrow_bounded<'a, In: UtfUnit>(
    buffer: &'a mut [u8],
    source: &[In],
) -> Result<&'a [u8], BridgeError> {
    convert_bounded(buffer, source)
}
