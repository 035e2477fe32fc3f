//! Console input streams.

use core::fmt;
use std::io::{self, BufRead, Read};

use crate::config::{BridgeConfig, DefaultConfig};
use crate::io::WideConsole;
use crate::stream::{PushbackBuffer, StreamingDecoder};

/// Input stream selected once by the device's capability probe.
///
/// Interactive consoles are decoded to UTF-8 through a [`StreamingDecoder`];
/// anything else is read as a plain byte stream. Both variants support
/// unbounded [`putback`](Self::putback).
pub enum ConsoleInput<D: WideConsole, R: BufRead, C: BridgeConfig = DefaultConfig> {
    /// Interactive wide console
    Console(StreamingDecoder<D, C>),

    /// Plain byte stream
    Passthrough {
        /// Fallback reader
        inner: R,
        /// Bytes returned for re-reading
        pushback: PushbackBuffer,
    },
}

impl<D: WideConsole, R: BufRead, C: BridgeConfig> ConsoleInput<D, R, C> {
    /// Probe `device` and build the matching stream.
    pub fn new(device: Option<D>, fallback: R) -> Self {
        match device {
            Some(device) if device.is_interactive() => {
                log::debug!("console input: decoding from wide console");
                ConsoleInput::Console(StreamingDecoder::new(device))
            }
            _ => ConsoleInput::Passthrough {
                inner: fallback,
                pushback: PushbackBuffer::new(C::PUSHBACK_INITIAL),
            },
        }
    }

    /// Whether input is decoded from a wide console.
    pub fn is_console(&self) -> bool {
        matches!(self, ConsoleInput::Console(_))
    }

    /// Read the next byte, `None` at end of input.
    pub fn get(&mut self) -> io::Result<Option<u8>> {
        let next = self.fill_buf()?.first().copied();
        if next.is_some() {
            self.consume(1);
        }
        Ok(next)
    }

    /// Return `byte` so the next read yields it.
    pub fn putback(&mut self, byte: u8) {
        match self {
            ConsoleInput::Console(decoder) => decoder.putback(byte),
            ConsoleInput::Passthrough { pushback, .. } => pushback.push(byte),
        }
    }
}

impl<D: WideConsole, R: BufRead, C: BridgeConfig> Read for ConsoleInput<D, R, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<D: WideConsole, R: BufRead, C: BridgeConfig> BufRead for ConsoleInput<D, R, C> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            ConsoleInput::Console(decoder) => Ok(decoder.fill_buf()?),
            ConsoleInput::Passthrough { inner, pushback } => {
                if pushback.is_empty() {
                    inner.fill_buf()
                } else {
                    Ok(pushback.as_slice())
                }
            }
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            ConsoleInput::Console(decoder) => decoder.consume(amt),
            ConsoleInput::Passthrough { inner, pushback } => {
                if pushback.is_empty() {
                    inner.consume(amt);
                } else {
                    pushback.consume(amt);
                }
            }
        }
    }
}

impl<D: WideConsole, R: BufRead, C: BridgeConfig> fmt::Debug for ConsoleInput<D, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleInput::Console(decoder) => f
                .debug_struct("ConsoleInput::Console")
                .field("buffered", &decoder.buffered().len())
                .finish_non_exhaustive(),
            ConsoleInput::Passthrough { pushback, .. } => f
                .debug_struct("ConsoleInput::Passthrough")
                .field("pushback", &pushback.len())
                .finish_non_exhaustive(),
        }
    }
}
