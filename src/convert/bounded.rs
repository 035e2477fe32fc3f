//! Conversion into fixed-capacity destinations.

use crate::error::BridgeError;
use crate::utf::UtfUnit;

/// Convert `source` into `buffer`, NUL-terminating the result.
///
/// The capacity is `buffer.len()`, one unit of which is reserved for the
/// terminator. Illegal and truncated sequences become the replacement
/// character. Fails with [`BridgeError::CapacityExceeded`] as soon as the next
/// code point does not fit; the contents of `buffer` are then unspecified.
/// Nothing is ever written past `buffer.len()`.
///
/// Returns the converted units without the terminator.
pub fn convert_bounded<'a, Out: UtfUnit, In: UtfUnit>(
    buffer: &'a mut [Out],
    source: &[In],
) -> Result<&'a [Out], BridgeError> {
    let Some(mut remaining) = buffer.len().checked_sub(1) else {
        return Err(BridgeError::CapacityExceeded);
    };

    let mut written = 0;
    let mut src = source;
    while !src.is_empty() {
        let (code_point, consumed) = In::decode(src);
        src = &src[consumed..];

        let c = code_point.or_replacement();
        let width = Out::width(c);
        if remaining < width {
            return Err(BridgeError::CapacityExceeded);
        }
        written += Out::encode(c, &mut buffer[written..]);
        remaining -= width;
    }

    buffer[written] = Out::default();
    Ok(&buffer[..written])
}

/// Convert `source` into a `heapless::Vec` of capacity `N`.
///
/// Same contract as [`convert_bounded`]: `N` includes the terminator, which is
/// the last element of the returned vector.
pub fn convert_heapless<Out: UtfUnit, In: UtfUnit, const N: usize>(
    source: &[In],
) -> Result<heapless::Vec<Out, N>, BridgeError> {
    let mut buffer = [Out::default(); N];
    let len = convert_bounded(&mut buffer, source)?.len();
    heapless::Vec::from_slice(&buffer[..=len]).map_err(|_| BridgeError::CapacityExceeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utf::REPLACEMENT_CHARACTER;
    extern crate std;
    use rstest::rstest;
    use std::vec::Vec;

    const HELLO: &[u8] = b"\xd7\xa9\xd7\x9c\xd7\x95\xd7\x9d";
    const WHELLO: [u16; 4] = [0x05E9, 0x05DC, 0x05D5, 0x05DD];
    const FFFD: u16 = REPLACEMENT_CHARACTER as u16;

    #[test]
    fn test_widen_exact_fit() {
        let mut buf: [u16; 6] = [0, 0, 0, 0, 0, 1];
        let out = convert_bounded(&mut buf[..5], HELLO).unwrap();
        assert_eq!(out, WHELLO);
        assert_eq!(buf[4], 0);
        assert_eq!(buf[5], 1);
    }

    #[test]
    fn test_widen_one_short_fails() {
        let mut buf = [0u16; 4];
        assert_eq!(
            convert_bounded(&mut buf, HELLO),
            Err(BridgeError::CapacityExceeded)
        );
    }

    #[test]
    fn test_widen_truncated_tail_replaced() {
        let mut buf = [0u16; 5];
        let out = convert_bounded(&mut buf, &HELLO[..7]).unwrap();
        assert_eq!(out, [0x05E9, 0x05DC, 0x05D5, FFFD]);

        let out = convert_bounded(&mut buf, &HELLO[..6]).unwrap();
        assert_eq!(out, [0x05E9, 0x05DC, 0x05D5]);
    }

    #[test]
    fn test_empty_source() {
        let mut buf = [7u16; 5];
        let out = convert_bounded(&mut buf, &HELLO[..0]).unwrap();
        assert!(out.is_empty());
        assert_eq!(buf[0], 0);

        let mut buf = [7u16; 1];
        assert!(convert_bounded(&mut buf, &HELLO[..0]).unwrap().is_empty());
    }

    #[rstest]
    #[case(b"")]
    #[case(b"a")]
    #[case(b"\xd7\xa9\xd7\x9c")]
    fn test_capacity_zero_always_fails(#[case] source: &[u8]) {
        let mut buf: [u16; 0] = [];
        assert_eq!(
            convert_bounded(&mut buf, source),
            Err(BridgeError::CapacityExceeded)
        );
    }

    #[rstest]
    #[case(b"\xFF\xFF", &[FFFD, FFFD])]
    #[case(b"\xd7\xa9\xFF", &[0x05E9, FFFD])]
    #[case(b"\xd7", &[FFFD])]
    #[case(b"\xFF\xd7\xa9", &[FFFD, 0x05E9])]
    #[case(b"1\xC02", &[0x31, FFFD, 0x32])]
    #[case(b"1\xF52", &[0x31, FFFD, 0x32])]
    fn test_widen_replacement(#[case] source: &[u8], #[case] expected: &[u16]) {
        let mut buf = [0u16; 5];
        assert_eq!(convert_bounded(&mut buf, source).unwrap(), expected);
    }

    #[test]
    fn test_narrow_exact_fit() {
        let mut buf = [0u8; 10];
        buf[9] = 1;
        assert_eq!(convert_bounded(&mut buf[..9], &WHELLO).unwrap(), HELLO);
        assert_eq!(buf[9], 1);

        let mut buf = [0u8; 8];
        assert_eq!(
            convert_bounded(&mut buf, &WHELLO),
            Err(BridgeError::CapacityExceeded)
        );

        let mut buf = [0u8; 7];
        assert_eq!(convert_bounded(&mut buf, &WHELLO[..3]).unwrap(), &HELLO[..6]);
    }

    #[test]
    fn test_narrow_lone_surrogates() {
        let mut buf = [0u8; 10];
        let out = convert_bounded(&mut buf, &[0xDC01u16, 0x05E9]).unwrap();
        assert_eq!(out, b"\xEF\xBF\xBD\xd7\xa9");

        let out = convert_bounded(&mut buf, &[0x05E9u16, 0xD800]).unwrap();
        assert_eq!(out, b"\xd7\xa9\xEF\xBF\xBD");
    }

    #[test]
    fn test_never_writes_past_capacity() {
        let source = "a\u{5E9}\u{548C}\u{1D11E}z".as_bytes();
        for capacity in 0..12 {
            let mut backing = [0xAAu8; 16];
            let result = convert_bounded(&mut backing[..capacity], source).map(<[u8]>::len);
            assert!(backing[capacity..].iter().all(|&b| b == 0xAA));
            match result {
                Ok(len) => {
                    assert!(len < capacity);
                    assert_eq!(&backing[..len], source);
                    assert_eq!(backing[len], 0);
                }
                Err(err) => assert_eq!(err, BridgeError::CapacityExceeded),
            }
        }
    }

    #[test]
    fn test_heapless_variant() {
        let out: heapless::Vec<u16, 5> = convert_heapless(HELLO).unwrap();
        assert_eq!(out.as_slice(), [0x05E9, 0x05DC, 0x05D5, 0x05DD, 0]);

        let err = convert_heapless::<u16, u8, 4>(HELLO);
        assert_eq!(err, Err(BridgeError::CapacityExceeded));
    }

    #[test]
    fn test_utf32_to_utf16() {
        let mut buf = [0u16; 4];
        let out: Vec<u16> = convert_bounded(&mut buf, &[0x1D11Eu32, 0x41]).unwrap().to_vec();
        assert_eq!(out, [0xD834, 0xDD1E, 0x41]);
    }
}
