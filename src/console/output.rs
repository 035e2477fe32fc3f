//! Console output streams.

use alloc::vec::Vec;
use core::fmt;
use std::io::{self, Write};

use crate::config::{BridgeConfig, DefaultConfig};
use crate::error::BridgeError;
use crate::io::WideConsole;
use crate::stream::StreamingEncoder;

/// Buffered UTF-8 writer over a wide console.
///
/// Bytes are staged in a `C::NARROW_BUFFER` buffer and transcoded when it
/// fills or on flush. A code point split across writes stays staged until it
/// is complete, which is how the encoder's resupply contract is honoured.
/// Dropping the writer ends the stream and replaces a truncated tail.
///
/// The first physical failure is sticky: staged bytes are never sent again,
/// and every later `write` or `flush` returns the same error without
/// touching the device.
#[derive(Debug)]
pub struct ConsoleWriter<D: WideConsole, C: BridgeConfig = DefaultConfig> {
    encoder: StreamingEncoder<D, C>,
    pending: Vec<u8>,
    failed: Option<BridgeError>,
}

impl<D: WideConsole, C: BridgeConfig> ConsoleWriter<D, C> {
    /// Create a writer for `device`.
    pub fn new(device: D) -> Self {
        Self {
            encoder: StreamingEncoder::new(device),
            pending: Vec::with_capacity(C::NARROW_BUFFER),
            failed: None,
        }
    }

    /// Staged bytes not yet sent to the device.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Underlying device.
    pub fn device(&self) -> &D {
        self.encoder.device()
    }

    /// The physical failure that stopped this writer, if any.
    pub fn failure(&self) -> Option<&BridgeError> {
        self.failed.as_ref()
    }

    /// Send every complete code point, keeping only a cut-off tail staged.
    fn drain(&mut self) -> Result<(), BridgeError> {
        self.emit(false)
    }

    /// Send everything, replacing a cut-off tail.
    fn finish(&mut self) -> Result<(), BridgeError> {
        self.emit(false)?;
        self.emit(true)
    }

    fn emit(&mut self, end_of_input: bool) -> Result<(), BridgeError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        while !self.pending.is_empty() {
            let result = if end_of_input {
                self.encoder.finish(&self.pending)
            } else {
                self.encoder.write(&self.pending)
            };
            let consumed = match result {
                Ok(consumed) => consumed,
                Err(err) => {
                    self.pending.clear();
                    self.failed = Some(err.clone());
                    return Err(err);
                }
            };
            if consumed == 0 {
                break;
            }
            self.pending.drain(..consumed);
        }
        Ok(())
    }
}

impl<D: WideConsole, C: BridgeConfig> Write for ConsoleWriter<D, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(err) = &self.failed {
            return Err(err.clone().into());
        }
        if buf.is_empty() {
            return Ok(0);
        }
        if self.pending.len() >= C::NARROW_BUFFER {
            self.drain()?;
        }
        let room = C::NARROW_BUFFER.saturating_sub(self.pending.len());
        if room == 0 {
            return Err(io::Error::from(io::ErrorKind::WriteZero));
        }
        let n = room.min(buf.len());
        self.pending.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.drain()?;
        Ok(())
    }
}

impl<D: WideConsole, C: BridgeConfig> Drop for ConsoleWriter<D, C> {
    fn drop(&mut self) {
        if self.failed.is_some() {
            return;
        }
        if let Err(err) = self.finish() {
            log::warn!("console output lost on close: {}", err);
        }
    }
}

/// Output stream selected once by the device's capability probe.
///
/// Interactive consoles are transcoded through a [`ConsoleWriter`]; anything
/// else (files, pipes, no console at all) goes to the byte-stream fallback
/// untouched.
pub enum ConsoleOutput<D: WideConsole, W: Write, C: BridgeConfig = DefaultConfig> {
    /// Interactive wide console
    Console(ConsoleWriter<D, C>),

    /// Plain byte stream
    Passthrough(W),
}

impl<D: WideConsole, W: Write, C: BridgeConfig> ConsoleOutput<D, W, C> {
    /// Probe `device` and build the matching stream.
    pub fn new(device: Option<D>, fallback: W) -> Self {
        match device {
            Some(device) if device.is_interactive() => {
                log::debug!("console output: transcoding to wide console");
                ConsoleOutput::Console(ConsoleWriter::new(device))
            }
            _ => ConsoleOutput::Passthrough(fallback),
        }
    }

    /// Whether output is transcoded for a wide console.
    pub fn is_console(&self) -> bool {
        matches!(self, ConsoleOutput::Console(_))
    }
}

impl<D: WideConsole, W: Write, C: BridgeConfig> Write for ConsoleOutput<D, W, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ConsoleOutput::Console(writer) => writer.write(buf),
            ConsoleOutput::Passthrough(inner) => inner.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ConsoleOutput::Console(writer) => writer.flush(),
            ConsoleOutput::Passthrough(inner) => inner.flush(),
        }
    }
}

impl<D: WideConsole, W: Write, C: BridgeConfig> fmt::Debug for ConsoleOutput<D, W, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleOutput::Console(writer) => f
                .debug_struct("ConsoleOutput::Console")
                .field("pending", &writer.pending().len())
                .finish_non_exhaustive(),
            ConsoleOutput::Passthrough(_) => f.write_str("ConsoleOutput::Passthrough"),
        }
    }
}
