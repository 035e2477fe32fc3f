//! Wide console reads to a UTF-8 byte stream.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use log::{debug, trace, warn};

use super::pushback::PushbackBuffer;
use crate::config::{BridgeConfig, DefaultConfig};
use crate::error::BridgeError;
use crate::io::WideConsole;
use crate::utf::{CodePoint, REPLACEMENT_CHARACTER, UtfUnit};

/// Presents a wide console as a logical UTF-8 byte stream.
///
/// Each physical read moves at most `C::WIDE_BUFFER` units. A code point cut
/// off by the end of a read is retained and completed by the next one.
#[derive(Debug)]
pub struct StreamingDecoder<D: WideConsole, C: BridgeConfig = DefaultConfig> {
    device: D,

    /// Physical read buffer; the first `retained` units are a partial tail
    wide: Box<[D::Unit]>,
    retained: usize,

    /// Logical UTF-8 buffer and read cursor into it
    narrow: Vec<u8>,
    cursor: usize,

    pushback: PushbackBuffer,
    _config: PhantomData<C>,
}

impl<D: WideConsole, C: BridgeConfig> StreamingDecoder<D, C> {
    /// Create a decoder reading from `device`.
    pub fn new(device: D) -> Self {
        debug_assert!(C::WIDE_BUFFER >= 4, "WIDE_BUFFER must hold a partial tail");
        Self {
            device,
            wide: vec![D::Unit::default(); C::WIDE_BUFFER].into_boxed_slice(),
            retained: 0,
            narrow: Vec::with_capacity(C::WIDE_BUFFER * 3),
            cursor: 0,
            pushback: PushbackBuffer::new(C::PUSHBACK_INITIAL),
            _config: PhantomData,
        }
    }

    /// Bytes available without another physical read.
    ///
    /// Pushed-back bytes come first; they are returned on their own until
    /// consumed.
    pub fn buffered(&self) -> &[u8] {
        if self.pushback.is_empty() {
            &self.narrow[self.cursor..]
        } else {
            self.pushback.as_slice()
        }
    }

    /// Return buffered bytes, reading from the device when none are left.
    ///
    /// An empty slice means end of input.
    pub fn fill_buf(&mut self) -> Result<&[u8], BridgeError> {
        if self.pushback.is_empty() && self.cursor >= self.narrow.len() {
            self.read()?;
        }
        Ok(self.buffered())
    }

    /// Mark `amt` bytes of [`buffered`](Self::buffered) as read.
    pub fn consume(&mut self, amt: usize) {
        if self.pushback.is_empty() {
            self.cursor = (self.cursor + amt).min(self.narrow.len());
        } else {
            self.pushback.consume(amt);
        }
    }

    /// Read the next byte, `None` at end of input.
    pub fn get(&mut self) -> Result<Option<u8>, BridgeError> {
        let next = self.fill_buf()?.first().copied();
        if next.is_some() {
            self.consume(1);
        }
        Ok(next)
    }

    /// Return `byte` so the next read yields it.
    ///
    /// The slot of the previously delivered byte is reused when available;
    /// otherwise the byte goes to the growable pushback buffer.
    pub fn putback(&mut self, byte: u8) {
        if self.pushback.is_empty() && self.cursor > 0 {
            self.cursor -= 1;
            self.narrow[self.cursor] = byte;
        } else {
            self.pushback.push(byte);
        }
    }

    /// Refill the logical buffer from the device.
    ///
    /// Appends newly read units to the retained tail, decodes every complete
    /// code point into UTF-8 and retains a trailing partial sequence. Illegal
    /// units are dropped. Reads again while a read produced no output, so a
    /// return of 0 always means end of input. At end of input a retained tail
    /// becomes one replacement character.
    ///
    /// Does nothing while unread bytes remain in the logical buffer.
    ///
    /// Returns the number of unread bytes in the logical buffer.
    pub fn read(&mut self) -> Result<usize, BridgeError> {
        if self.cursor < self.narrow.len() {
            return Ok(self.narrow.len() - self.cursor);
        }
        self.narrow.clear();
        self.cursor = 0;

        while self.narrow.is_empty() {
            let free = &mut self.wide[self.retained..];
            let capacity = free.len();
            let read = self.device.read_wide(free).map_err(|err| {
                warn!("console read failed: {:?}", err);
                BridgeError::PhysicalRead
            })?;
            trace!("console read of {} unit(s)", read);

            if read == 0 {
                if self.retained > 0 {
                    debug!("replacing {} truncated unit(s) at end of input", self.retained);
                    self.retained = 0;
                    push_utf8(&mut self.narrow, REPLACEMENT_CHARACTER);
                }
                break;
            }
            self.decode_units(self.retained + read.min(capacity));
        }

        Ok(self.narrow.len())
    }

    /// Underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Underlying device (mutable).
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    fn decode_units(&mut self, total: usize) {
        let mut offset = 0;
        while offset < total {
            let (code_point, consumed) = D::Unit::decode(&self.wide[offset..total]);
            match code_point {
                CodePoint::Scalar(c) => push_utf8(&mut self.narrow, c),
                CodePoint::Incomplete => break,
                CodePoint::Illegal => debug!("dropping {} illegal console unit(s)", consumed),
            }
            offset += consumed;
        }

        self.wide.copy_within(offset..total, 0);
        self.retained = total - offset;
    }
}

fn push_utf8(dst: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    dst.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
