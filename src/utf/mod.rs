//! Single code point codec for UTF-8, UTF-16 and UTF-32 units.
//!
//! Every converter and streaming adapter in this crate is built on the
//! [`UtfUnit`] trait: decode one code point from the front of a unit slice,
//! or encode one scalar into a destination slice.
//!
//! Decoding never fails hard. It reports [`CodePoint::Illegal`] for units that
//! cannot start (or continue) a valid sequence and [`CodePoint::Incomplete`]
//! when the slice ends inside an otherwise valid sequence. Whether an
//! incomplete tail is replaced or retained is the caller's decision.

mod utf16;
mod utf32;
mod utf8;

/// Substituted for illegal input and for input truncated at true end-of-input.
pub const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Platform-native wide unit (`wchar_t`).
#[cfg(windows)]
pub type WideChar = u16;

/// Platform-native wide unit (`wchar_t`).
#[cfg(not(windows))]
pub type WideChar = u32;

/// Result of decoding one code point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CodePoint {
    /// Valid Unicode scalar value
    Scalar(char),

    /// Units cannot form a valid sequence
    Illegal,

    /// Input ended before the sequence was complete
    Incomplete,
}

impl CodePoint {
    /// Resolve both sentinels to [`REPLACEMENT_CHARACTER`].
    pub fn or_replacement(self) -> char {
        match self {
            CodePoint::Scalar(c) => c,
            CodePoint::Illegal | CodePoint::Incomplete => REPLACEMENT_CHARACTER,
        }
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// A UTF code unit: `u8` (UTF-8), `u16` (UTF-16) or `u32` (UTF-32).
///
/// `Default::default()` is the NUL terminator.
pub trait UtfUnit: Copy + Default + Eq + core::fmt::Debug + sealed::Sealed + 'static {
    /// Largest number of units a single code point can occupy.
    const MAX_WIDTH: usize;

    /// Decode one code point from the front of `src`.
    ///
    /// Returns the code point and the number of units consumed. An empty
    /// slice yields `(Incomplete, 0)`; any non-empty slice consumes at least
    /// one unit.
    fn decode(src: &[Self]) -> (CodePoint, usize);

    /// Number of units `c` occupies in this encoding.
    fn width(c: char) -> usize;

    /// Encode `c` into the front of `dst`, returning the units written.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than [`UtfUnit::width`] of `c`.
    fn encode(c: char, dst: &mut [Self]) -> usize;

    /// Whether this unit is the NUL terminator.
    fn is_nul(self) -> bool {
        self == Self::default()
    }
}

/// Whether `value` is a Unicode scalar (in range and not a surrogate).
pub fn is_valid_codepoint(value: u32) -> bool {
    char::from_u32(value).is_some()
}

/// Prefix of `src` up to (not including) the first NUL unit.
pub fn until_nul<U: UtfUnit>(src: &[U]) -> &[U] {
    let end = src.iter().position(|unit| unit.is_nul()).unwrap_or(src.len());
    &src[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;

    fn roundtrip<U: UtfUnit>(c: char) -> bool {
        let mut buf = [U::default(); 4];
        let written = U::encode(c, &mut buf);
        written == U::width(c) && U::decode(&buf[..written]) == (CodePoint::Scalar(c), written)
    }

    #[test]
    fn test_roundtrip_quickcheck() {
        fn prop(c: char) -> bool {
            roundtrip::<u8>(c) && roundtrip::<u16>(c) && roundtrip::<u32>(c)
        }

        QuickCheck::new()
            .tests(10_000)
            .quickcheck(prop as fn(char) -> bool);
    }

    #[test]
    fn test_roundtrip_boundaries() {
        for c in [
            '\0',
            '\u{7F}',
            '\u{80}',
            '\u{7FF}',
            '\u{800}',
            '\u{D7FF}',
            '\u{E000}',
            '\u{FFFD}',
            '\u{FFFF}',
            '\u{10000}',
            '\u{10FFFF}',
        ] {
            assert!(roundtrip::<u8>(c), "utf-8 {:?}", c);
            assert!(roundtrip::<u16>(c), "utf-16 {:?}", c);
            assert!(roundtrip::<u32>(c), "utf-32 {:?}", c);
        }
    }

    #[test]
    fn test_or_replacement() {
        assert_eq!(CodePoint::Scalar('a').or_replacement(), 'a');
        assert_eq!(CodePoint::Illegal.or_replacement(), REPLACEMENT_CHARACTER);
        assert_eq!(CodePoint::Incomplete.or_replacement(), REPLACEMENT_CHARACTER);
    }

    #[test]
    fn test_is_valid_codepoint() {
        assert!(is_valid_codepoint(0));
        assert!(is_valid_codepoint(0x10FFFF));
        assert!(!is_valid_codepoint(0xD800));
        assert!(!is_valid_codepoint(0xDFFF));
        assert!(!is_valid_codepoint(0x110000));
    }

    #[test]
    fn test_until_nul() {
        assert_eq!(until_nul(b"ab\0cd"), b"ab");
        assert_eq!(until_nul(b"abcd"), b"abcd");
        assert_eq!(until_nul::<u16>(&[0, 1]), &[] as &[u16]);
    }

    #[test]
    fn test_empty_source_is_incomplete() {
        assert_eq!(u8::decode(&[]), (CodePoint::Incomplete, 0));
        assert_eq!(u16::decode(&[]), (CodePoint::Incomplete, 0));
        assert_eq!(u32::decode(&[]), (CodePoint::Incomplete, 0));
    }
}
