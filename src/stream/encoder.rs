//! UTF-8 to wide console writes.

use alloc::boxed::Box;
use alloc::vec;
use core::marker::PhantomData;

use log::{debug, trace, warn};

use crate::config::{BridgeConfig, DefaultConfig};
use crate::error::BridgeError;
use crate::io::WideConsole;
use crate::utf::{CodePoint, REPLACEMENT_CHARACTER, UtfUnit};

/// Transcodes UTF-8 writes into bounded physical writes of wide units.
///
/// # Caller contract
///
/// When [`write`](Self::write) reports fewer bytes consumed than supplied
/// because the input ended inside a code point, the unconsumed bytes must be
/// passed again, unchanged, at the start of the next call. Supplying different
/// bytes silently corrupts the output: no state is kept between calls, so the
/// encoder cannot detect it.
#[derive(Debug)]
pub struct StreamingEncoder<D: WideConsole, C: BridgeConfig = DefaultConfig> {
    device: D,
    staging: Box<[D::Unit]>,
    _config: PhantomData<C>,
}

impl<D: WideConsole, C: BridgeConfig> StreamingEncoder<D, C> {
    /// Create an encoder writing to `device`.
    pub fn new(device: D) -> Self {
        debug_assert!(C::WIDE_BUFFER >= 4, "WIDE_BUFFER must hold a surrogate pair");
        Self {
            device,
            staging: vec![D::Unit::default(); C::WIDE_BUFFER].into_boxed_slice(),
            _config: PhantomData,
        }
    }

    /// Transcode a prefix of `bytes` and emit it in one physical write.
    ///
    /// Stops at the first code point that does not fit the staging buffer or
    /// that is cut off by the end of `bytes`. Illegal sequences are replaced.
    ///
    /// Returns the number of bytes consumed; see the caller contract on the
    /// type for the bytes that were not.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, BridgeError> {
        self.emit(bytes, false)
    }

    /// Like [`write`](Self::write), but `bytes` ends the stream.
    ///
    /// A truncated sequence at the end is replaced instead of left unconsumed.
    pub fn finish(&mut self, bytes: &[u8]) -> Result<usize, BridgeError> {
        self.emit(bytes, true)
    }

    /// Underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Underlying device (mutable).
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consume the encoder, returning the device.
    pub fn into_inner(self) -> D {
        self.device
    }

    fn emit(&mut self, bytes: &[u8], end_of_input: bool) -> Result<usize, BridgeError> {
        let mut consumed = 0;
        let mut staged = 0;

        while consumed < bytes.len() {
            let (code_point, len) = u8::decode(&bytes[consumed..]);
            let c = match code_point {
                CodePoint::Scalar(c) => c,
                CodePoint::Incomplete if !end_of_input => break,
                CodePoint::Illegal | CodePoint::Incomplete => {
                    debug!("replacing {} malformed byte(s) in console output", len);
                    REPLACEMENT_CHARACTER
                }
            };
            if staged + D::Unit::width(c) > self.staging.len() {
                break;
            }
            staged += D::Unit::encode(c, &mut self.staging[staged..]);
            consumed += len;
        }

        if staged > 0 {
            trace!("console write of {} unit(s)", staged);
            let written = self.device.write_wide(&self.staging[..staged]).map_err(|err| {
                warn!("console write failed: {:?}", err);
                BridgeError::PhysicalWrite
            })?;
            if written != staged {
                warn!("console wrote {} of {} unit(s)", written, staged);
                return Err(BridgeError::ShortWrite { staged, written });
            }
        }

        Ok(consumed)
    }
}
