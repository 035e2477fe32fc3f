//! UTF-32 units.

use super::{CodePoint, UtfUnit};

impl UtfUnit for u32 {
    const MAX_WIDTH: usize = 1;

    fn decode(src: &[u32]) -> (CodePoint, usize) {
        match src.first() {
            None => (CodePoint::Incomplete, 0),
            Some(&value) => match char::from_u32(value) {
                Some(c) => (CodePoint::Scalar(c), 1),
                None => (CodePoint::Illegal, 1),
            },
        }
    }

    fn width(_c: char) -> usize {
        1
    }

    fn encode(c: char, dst: &mut [u32]) -> usize {
        dst[0] = u32::from(c);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        assert_eq!(u32::decode(&[0x1D11E]), (CodePoint::Scalar('\u{1D11E}'), 1));
    }

    #[test]
    fn test_surrogate_and_out_of_range() {
        assert_eq!(u32::decode(&[0xDFFF]), (CodePoint::Illegal, 1));
        assert_eq!(u32::decode(&[0x110000, 0x41]), (CodePoint::Illegal, 1));
    }
}
