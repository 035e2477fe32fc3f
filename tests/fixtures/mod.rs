//! Test fixtures for wide-bridge testing.
//!
//! Provides:
//! - `MockConsole`: scripted implementation of the WideConsole trait
//! - `Transcript`: shared record of physical writes
//! - Helpers for building wide input from text

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use wide_bridge::{UtfUnit, WideConsole};

// ============================================================================
// Transcript - Shared Write Record
// ============================================================================

/// Physical writes seen by a `MockConsole`, one entry per call.
///
/// Cloned handles share the record, so a test can keep one after the console
/// has been moved into a stream.
#[derive(Debug, Clone)]
pub struct Transcript<U>(Arc<Mutex<Vec<Vec<U>>>>);

impl<U: UtfUnit> Transcript<U> {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn record(&self, units: &[U]) {
        self.0.lock().unwrap().push(units.to_vec());
    }

    /// Units of every write call, in order.
    pub fn calls(&self) -> Vec<Vec<U>> {
        self.0.lock().unwrap().clone()
    }

    /// All written units concatenated.
    pub fn units(&self) -> Vec<U> {
        self.calls().concat()
    }

    /// Number of write calls.
    pub fn call_count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

// ============================================================================
// MockConsole - Test WideConsole Implementation
// ============================================================================

/// Mock wide console.
///
/// Reads are served from scripted chunks: each chunk is delivered by one or
/// more `read_wide` calls (split if the caller's buffer is smaller), and an
/// exhausted script means end of input. Writes are captured in a `Transcript`.
#[derive(Debug)]
pub struct MockConsole<U> {
    interactive: bool,
    reads: VecDeque<Vec<U>>,
    transcript: Transcript<U>,

    /// Units accepted per write call; `None` accepts everything
    write_limit: Option<usize>,
    fail_reads: bool,
    fail_writes: bool,

    /// Number of `read_wide` calls so far
    pub read_calls: usize,
}

impl<U: UtfUnit> MockConsole<U> {
    /// Interactive console with no input.
    pub fn new() -> Self {
        Self {
            interactive: true,
            reads: VecDeque::new(),
            transcript: Transcript::new(),
            write_limit: None,
            fail_reads: false,
            fail_writes: false,
            read_calls: 0,
        }
    }

    /// Console whose probe reports a redirected handle.
    pub fn redirected() -> Self {
        Self {
            interactive: false,
            ..Self::new()
        }
    }

    /// Interactive console delivering `chunks`, one per read.
    pub fn with_reads(chunks: Vec<Vec<U>>) -> Self {
        Self {
            reads: chunks.into(),
            ..Self::new()
        }
    }

    /// Queue another read chunk.
    pub fn push_read(&mut self, chunk: Vec<U>) {
        self.reads.push_back(chunk);
    }

    /// Accept at most `limit` units per write call.
    pub fn with_write_limit(mut self, limit: usize) -> Self {
        self.write_limit = Some(limit);
        self
    }

    /// Fail every read.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Fail every write.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Handle on the write record.
    pub fn transcript(&self) -> Transcript<U> {
        self.transcript.clone()
    }
}

impl<U: UtfUnit> Default for MockConsole<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: UtfUnit> WideConsole for MockConsole<U> {
    type Unit = U;
    type Error = io::Error;

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn read_wide(&mut self, buf: &mut [U]) -> Result<usize, Self::Error> {
        self.read_calls += 1;
        if self.fail_reads {
            return Err(io::Error::other("mock read failure"));
        }
        let Some(mut chunk) = self.reads.pop_front() else {
            return Ok(0);
        };
        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.reads.push_front(chunk.split_off(n));
        }
        Ok(n)
    }

    fn write_wide(&mut self, buf: &[U]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(io::Error::other("mock write failure"));
        }
        let n = self.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        self.transcript.record(&buf[..n]);
        Ok(n)
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// UTF-16 units of `s`.
pub fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// UTF-32 units of `s`.
pub fn utf32(s: &str) -> Vec<u32> {
    s.chars().map(u32::from).collect()
}

/// Decode UTF-16 units, panicking on invalid input.
pub fn from_utf16(units: &[u16]) -> String {
    String::from_utf16(units).expect("valid UTF-16")
}
