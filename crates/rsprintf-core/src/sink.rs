//! Capacity-bounded output writer with logical-length accounting.
//!
//! Mirrors the write discipline of `snprintf`: at most `capacity - 1`
//! content bytes reach the destination, the final byte is reserved for a
//! NUL terminator, and the running logical length counts every byte the
//! call *would* have produced with unlimited room.
//!
//! Reference: POSIX.1-2024 snprintf specification, ISO C11 7.21.6.5.
//!
//! Invariants:
//! - `written <= capacity - 1` whenever `capacity > 0`; `written == 0`
//!   when `capacity == 0`.
//! - `logical >= written` always.
//! - Oversized pad runs cost O(1): the destination fill is bounded, the
//!   logical count takes the full run.

/// Bounded destination writer for one formatting call.
pub struct BoundedSink<'a> {
    dest: &'a mut [u8],
    written: usize,
    logical: usize,
}

impl<'a> BoundedSink<'a> {
    /// Wrap a destination slice. The slice length is the capacity.
    pub fn new(dest: &'a mut [u8]) -> Self {
        BoundedSink {
            dest,
            written: 0,
            logical: 0,
        }
    }

    /// Room left for content bytes (capacity minus the terminator slot).
    fn content_room(&self) -> usize {
        self.dest.len().saturating_sub(1) - self.written
    }

    /// Append one byte. Dropped from the destination when full, always
    /// counted toward the logical length.
    pub fn push(&mut self, byte: u8) {
        if self.content_room() > 0 {
            self.dest[self.written] = byte;
            self.written += 1;
        }
        self.logical = self.logical.saturating_add(1);
    }

    /// Append a run of bytes, truncating at the content bound.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let take = bytes.len().min(self.content_room());
        self.dest[self.written..self.written + take].copy_from_slice(&bytes[..take]);
        self.written += take;
        self.logical = self.logical.saturating_add(bytes.len());
    }

    /// Append `count` copies of `byte`. The destination fill is bounded;
    /// the logical length takes the full count.
    pub fn pad(&mut self, byte: u8, count: usize) {
        let take = count.min(self.content_room());
        self.dest[self.written..self.written + take].fill(byte);
        self.written += take;
        self.logical = self.logical.saturating_add(count);
    }

    /// Content bytes actually present in the destination.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Logical length accumulated so far (the `n`-directive reads this).
    pub fn logical_len(&self) -> usize {
        self.logical
    }

    /// Write the terminator and return the logical length. The
    /// terminator lands at `written`, which the invariants keep at or
    /// below `capacity - 1`; a zero-capacity destination is untouched.
    pub fn finish(self) -> usize {
        if !self.dest.is_empty() {
            self.dest[self.written] = 0;
        }
        self.logical
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
