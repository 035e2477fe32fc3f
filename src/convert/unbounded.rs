//! Conversion into growable destinations.

use alloc::string::String;
use alloc::vec::Vec;

use crate::utf::{CodePoint, UtfUnit, until_nul};

/// Convert `source`, replacing illegal and truncated sequences.
///
/// Never fails due to capacity. No terminator is appended.
pub fn convert<Out: UtfUnit, In: UtfUnit>(source: &[In]) -> Vec<Out> {
    let mut result = Vec::with_capacity(source.len());
    extend_converted(&mut result, source);
    result
}

/// Convert the NUL-terminated prefix of `source`.
pub fn convert_nul<Out: UtfUnit, In: UtfUnit>(source: &[In]) -> Vec<Out> {
    convert(until_nul(source))
}

/// Append the conversion of `source` to `dst`.
pub fn extend_converted<Out: UtfUnit, In: UtfUnit>(dst: &mut Vec<Out>, source: &[In]) {
    let mut scratch = [Out::default(); 4];
    let mut src = source;
    while !src.is_empty() {
        let (code_point, consumed) = In::decode(src);
        src = &src[consumed..];
        let written = Out::encode(code_point.or_replacement(), &mut scratch);
        dst.extend_from_slice(&scratch[..written]);
    }
}

/// Convert `source` straight into a `String`.
pub(crate) fn convert_to_string<In: UtfUnit>(source: &[In]) -> String {
    let mut result = String::with_capacity(source.len());
    let mut src = source;
    while !src.is_empty() {
        let (code_point, consumed) = In::decode(src);
        src = &src[consumed..];
        if let CodePoint::Illegal | CodePoint::Incomplete = code_point {
            log::debug!("replacing malformed sequence of {} unit(s)", consumed);
        }
        result.push(code_point.or_replacement());
    }
    result
}
