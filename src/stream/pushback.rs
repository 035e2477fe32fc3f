//! Growable pushback storage.

use alloc::vec;
use alloc::vec::Vec;

/// Bytes returned to a stream for re-reading.
///
/// Pushed bytes are stored back to front so the unread bytes always form one
/// contiguous slice in read order. When the front is reached the storage
/// doubles and the unread bytes move to its upper half, giving amortized O(1)
/// pushback with unbounded depth.
#[derive(Debug, Clone)]
pub struct PushbackBuffer {
    data: Vec<u8>,
    start: usize,
    initial: usize,
}

impl PushbackBuffer {
    /// Create an empty buffer; nothing is allocated until the first push.
    pub fn new(initial: usize) -> Self {
        Self {
            data: Vec::new(),
            start: 0,
            initial: initial.max(1),
        }
    }

    /// Return `byte` to the front of the unread bytes.
    pub fn push(&mut self, byte: u8) {
        if self.start == 0 {
            self.grow();
        }
        self.start -= 1;
        self.data[self.start] = byte;
    }

    /// Unread bytes, next byte first.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.start..]
    }

    /// Mark `amt` bytes as read.
    pub fn consume(&mut self, amt: usize) {
        self.start = (self.start + amt).min(self.data.len());
    }

    /// Remove and return the next byte.
    pub fn pop(&mut self) -> Option<u8> {
        let byte = self.as_slice().first().copied()?;
        self.start += 1;
        Some(byte)
    }

    /// Whether there is nothing to re-read.
    pub fn is_empty(&self) -> bool {
        self.start == self.data.len()
    }

    /// Number of unread bytes.
    pub fn len(&self) -> usize {
        self.data.len() - self.start
    }

    /// Current storage size.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    fn grow(&mut self) {
        let old = self.data.len();
        let new = if old == 0 { self.initial } else { old * 2 };
        let unread = self.len();

        let mut data = vec![0u8; new];
        data[new - unread..].copy_from_slice(self.as_slice());
        self.data = data;
        self.start = new - unread;
    }
}
