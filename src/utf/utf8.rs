//! UTF-8 units.

use super::{CodePoint, UtfUnit};

/// Trailing units announced by a lead byte, `None` if it cannot lead.
fn trail_length(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(0),
        0x80..=0xC1 => None,
        0xC2..=0xDF => Some(1),
        0xE0..=0xEF => Some(2),
        0xF0..=0xF4 => Some(3),
        0xF5..=0xFF => None,
    }
}

fn is_trail(unit: u8) -> bool {
    unit & 0xC0 == 0x80
}

impl UtfUnit for u8 {
    const MAX_WIDTH: usize = 4;

    fn decode(src: &[u8]) -> (CodePoint, usize) {
        let Some(&lead) = src.first() else {
            return (CodePoint::Incomplete, 0);
        };
        let Some(trail) = trail_length(lead) else {
            return (CodePoint::Illegal, 1);
        };
        if trail == 0 {
            return (CodePoint::Scalar(char::from(lead)), 1);
        }

        let mut value = u32::from(lead) & ((1 << (6 - trail)) - 1);
        for i in 1..=trail {
            let Some(&unit) = src.get(i) else {
                return (CodePoint::Incomplete, i);
            };
            if !is_trail(unit) {
                // Resynchronize at the unit that broke the sequence
                return (CodePoint::Illegal, i);
            }
            value = (value << 6) | u32::from(unit & 0x3F);
        }

        let consumed = trail + 1;
        match char::from_u32(value) {
            // Rejects overlong forms as well as surrogates
            Some(c) if c.len_utf8() == consumed => (CodePoint::Scalar(c), consumed),
            _ => (CodePoint::Illegal, consumed),
        }
    }

    fn width(c: char) -> usize {
        c.len_utf8()
    }

    fn encode(c: char, dst: &mut [u8]) -> usize {
        c.encode_utf8(dst).len()
    }
}
