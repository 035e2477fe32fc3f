//! UTF-16 units.

use super::{CodePoint, UtfUnit};

const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

impl UtfUnit for u16 {
    const MAX_WIDTH: usize = 2;

    fn decode(src: &[u16]) -> (CodePoint, usize) {
        let Some(&first) = src.first() else {
            return (CodePoint::Incomplete, 0);
        };
        if !HIGH_SURROGATES.contains(&first) {
            return match char::from_u32(u32::from(first)) {
                Some(c) => (CodePoint::Scalar(c), 1),
                // Low surrogate without a lead
                None => (CodePoint::Illegal, 1),
            };
        }
        let Some(&second) = src.get(1) else {
            return (CodePoint::Incomplete, 1);
        };
        if !LOW_SURROGATES.contains(&second) {
            return (CodePoint::Illegal, 1);
        }

        let value = 0x10000 + ((u32::from(first) - 0xD800) << 10) + (u32::from(second) - 0xDC00);
        match char::from_u32(value) {
            Some(c) => (CodePoint::Scalar(c), 2),
            None => (CodePoint::Illegal, 2),
        }
    }

    fn width(c: char) -> usize {
        c.len_utf16()
    }

    fn encode(c: char, dst: &mut [u16]) -> usize {
        c.encode_utf16(dst).len()
    }
}
