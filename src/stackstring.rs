//! Small-buffer NUL-terminated strings for native API calls.
//!
//! A [`StackString`] converts its source into an inline `heapless::Vec` and
//! only moves to a heap buffer when the converted text (plus terminator) does
//! not fit. The move happens mid-conversion, so each source is decoded once.

use alloc::vec;
use alloc::vec::Vec;

use crate::config::{SHORT_INLINE, STACK_INLINE};
use crate::utf::{UtfUnit, WideChar, until_nul};

/// Wide text converted from UTF-8, 256 units inline.
pub type WideStackString = StackString<WideChar, u8, STACK_INLINE>;

/// UTF-8 text converted from wide text, 256 bytes inline.
pub type NarrowStackString = StackString<u8, WideChar, STACK_INLINE>;

/// Wide text converted from UTF-8, 16 units inline.
pub type WideShortStackString = StackString<WideChar, u8, SHORT_INLINE>;

/// UTF-8 text converted from wide text, 16 bytes inline.
pub type NarrowShortStackString = StackString<u8, WideChar, SHORT_INLINE>;

/// Where the converted units live.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Storage<Out, const N: usize> {
    /// Terminated text that fits the inline capacity
    Inline(heapless::Vec<Out, N>),

    /// Terminated text that spilled to the heap
    Owned(Vec<Out>),
}

/// NUL-terminated transcoded string with `N` units of inline storage.
///
/// `N` counts the terminator, so up to `N - 1` converted units stay inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackString<Out: UtfUnit, In: UtfUnit, const N: usize> {
    storage: Storage<Out, N>,
    _source: core::marker::PhantomData<fn(&[In])>,
}

impl<Out: UtfUnit, In: UtfUnit, const N: usize> StackString<Out, In, N> {
    /// Create an empty, terminated string.
    pub fn new() -> Self {
        Self {
            storage: Self::terminate(heapless::Vec::new(), None),
            _source: core::marker::PhantomData,
        }
    }

    /// Create a string holding the conversion of `source`.
    pub fn from_source(source: &[In]) -> Self {
        let mut s = Self::new();
        s.convert(source);
        s
    }

    /// Create a string holding the conversion of NUL-terminated `source`.
    pub fn from_nul(source: &[In]) -> Self {
        Self::from_source(until_nul(source))
    }

    /// Replace the contents with the conversion of `source`.
    ///
    /// Illegal and truncated sequences become the replacement character.
    /// Returns `false` only if the heap buffer could not be allocated, in
    /// which case the string is left empty.
    pub fn convert(&mut self, source: &[In]) -> bool {
        let mut inline: heapless::Vec<Out, N> = heapless::Vec::new();
        let mut owned: Option<Vec<Out>> = None;
        let mut scratch = [Out::default(); 4];
        let mut src = source;

        while !src.is_empty() {
            let (code_point, consumed) = In::decode(src);
            src = &src[consumed..];
            let written = Out::encode(code_point.or_replacement(), &mut scratch);
            let units = &scratch[..written];

            match owned.as_mut() {
                Some(buf) => {
                    if buf.try_reserve(units.len() + 1).is_err() {
                        return self.allocation_failed();
                    }
                    buf.extend_from_slice(units);
                }
                // Keep one slot free for the terminator
                None if inline.len() + units.len() < N => {
                    let fitted = inline.extend_from_slice(units);
                    debug_assert!(fitted.is_ok(), "inline bound checked above");
                }
                None => {
                    let mut buf = Vec::new();
                    if buf.try_reserve(inline.len() + source.len() + 1).is_err() {
                        return self.allocation_failed();
                    }
                    buf.extend_from_slice(&inline);
                    buf.extend_from_slice(units);
                    owned = Some(buf);
                }
            }
        }

        self.storage = Self::terminate(inline, owned);
        true
    }

    /// Replace the contents with the conversion of NUL-terminated `source`.
    pub fn convert_nul(&mut self, source: &[In]) -> bool {
        self.convert(until_nul(source))
    }

    /// Pointer to the terminated text, valid until the next conversion or drop.
    pub fn as_ptr(&self) -> *const Out {
        self.as_slice_with_nul().as_ptr()
    }

    /// Converted units including the terminator.
    pub fn as_slice_with_nul(&self) -> &[Out] {
        match &self.storage {
            Storage::Inline(buf) => buf.as_slice(),
            Storage::Owned(buf) => buf.as_slice(),
        }
    }

    /// Converted units without the terminator.
    pub fn as_slice(&self) -> &[Out] {
        let with_nul = self.as_slice_with_nul();
        &with_nul[..with_nul.len() - 1]
    }

    /// Mutable converted units without the terminator.
    pub fn as_mut_slice(&mut self) -> &mut [Out] {
        let with_nul = match &mut self.storage {
            Storage::Inline(buf) => buf.as_mut_slice(),
            Storage::Owned(buf) => buf.as_mut_slice(),
        };
        let len = with_nul.len() - 1;
        &mut with_nul[..len]
    }

    /// Number of converted units, terminator excluded.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Whether the converted text is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the text lives in the inline buffer.
    pub fn is_inline(&self) -> bool {
        matches!(self.storage, Storage::Inline(_))
    }

    /// Exchange contents with `other`, whichever storage each one uses.
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.storage, &mut other.storage);
    }

    fn terminate(mut inline: heapless::Vec<Out, N>, owned: Option<Vec<Out>>) -> Storage<Out, N> {
        match owned {
            Some(mut buf) => {
                buf.push(Out::default());
                Storage::Owned(buf)
            }
            None => match inline.push(Out::default()) {
                Ok(()) => Storage::Inline(inline),
                // Zero inline capacity
                Err(nul) => Storage::Owned(vec![nul]),
            },
        }
    }

    fn allocation_failed(&mut self) -> bool {
        log::warn!("stack string heap allocation failed");
        self.storage = Self::terminate(heapless::Vec::new(), None);
        false
    }
}

impl<Out: UtfUnit, In: UtfUnit, const N: usize> Default for StackString<Out, In, N> {
    fn default() -> Self {
        Self::new()
    }
}
