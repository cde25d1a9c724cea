//! Per-directive content buffer.
//!
//! Conversion output (sign, prefix, digits) is assembled here before the
//! driver applies field padding and copies it to the caller's
//! destination. The capacity matches the intermediate buffer of the C
//! engine this crate mirrors, but every append is bounds-checked instead
//! of advancing a raw pointer.
//!
//! Invariants:
//! - `len <= SCRATCH_CAPACITY` at all times.
//! - An append beyond capacity is an engine bug, not a caller error:
//!   resolved precision is clamped (see `convert::MAX_PRECISION`) so the
//!   worst-case rendered content always fits. The check stays as a hard
//!   stop in case that bound is ever broken.

/// Size of the per-directive content buffer.
pub const SCRATCH_CAPACITY: usize = 2048;

/// Fixed-capacity append-only byte buffer for one directive's content.
pub struct Scratch {
    buf: [u8; SCRATCH_CAPACITY],
    len: usize,
}

impl Scratch {
    pub fn new() -> Self {
        Scratch {
            buf: [0; SCRATCH_CAPACITY],
            len: 0,
        }
    }

    /// Append one byte.
    ///
    /// # Panics
    /// Panics if the buffer is full. Unreachable for clamped precision;
    /// see the module invariants.
    pub fn push(&mut self, byte: u8) {
        assert!(
            self.len < SCRATCH_CAPACITY,
            "conversion content exceeded {SCRATCH_CAPACITY} bytes"
        );
        self.buf[self.len] = byte;
        self.len += 1;
    }

    /// Append a run of bytes. Same panic condition as [`Scratch::push`].
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        assert!(
            bytes.len() <= SCRATCH_CAPACITY - self.len,
            "conversion content exceeded {SCRATCH_CAPACITY} bytes"
        );
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Drop content from `new_len` onward. No-op if already shorter.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len < self.len {
            self.len = new_len;
        }
    }

    /// Reverse the bytes from `start` to the end in place. Used by the
    /// integer renderer, which emits digits least-significant-first.
    pub fn reverse_from(&mut self, start: usize) {
        debug_assert!(start <= self.len);
        self.buf[start..self.len].reverse();
    }

    /// Remove `start..end`, shifting any tail left. Used by the
    /// shortest-form strip to drop mantissa zeros ahead of an exponent.
    pub fn remove_range(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end && end <= self.len);
        self.buf.copy_within(end..self.len, start);
        self.len -= end - start;
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Scratch::new()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read_back() {
        let mut s = Scratch::new();
        s.push(b'a');
        s.push(b'b');
        assert_eq!(s.as_slice(), b"ab");
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
    }

    #[test]
    fn test_extend_from_slice() {
        let mut s = Scratch::new();
        s.extend_from_slice(b"hello");
        s.extend_from_slice(b" world");
        assert_eq!(s.as_slice(), b"hello world");
    }

    #[test]
    fn test_fill_to_capacity() {
        let mut s = Scratch::new();
        for _ in 0..SCRATCH_CAPACITY {
            s.push(b'x');
        }
        assert_eq!(s.len(), SCRATCH_CAPACITY);
    }

    #[test]
    #[should_panic(expected = "conversion content exceeded")]
    fn test_push_past_capacity_panics() {
        let mut s = Scratch::new();
        for _ in 0..SCRATCH_CAPACITY {
            s.push(b'x');
        }
        s.push(b'x');
    }

    #[test]
    #[should_panic(expected = "conversion content exceeded")]
    fn test_extend_past_capacity_panics() {
        let mut s = Scratch::new();
        s.extend_from_slice(&[0u8; SCRATCH_CAPACITY]);
        s.extend_from_slice(b"x");
    }

    #[test]
    fn test_reverse_from() {
        let mut s = Scratch::new();
        s.extend_from_slice(b"-x321");
        s.reverse_from(2);
        assert_eq!(s.as_slice(), b"-x123");
        s.reverse_from(5);
        assert_eq!(s.as_slice(), b"-x123");
    }

    #[test]
    fn test_truncate() {
        let mut s = Scratch::new();
        s.extend_from_slice(b"3.1400");
        s.truncate(4);
        assert_eq!(s.as_slice(), b"3.14");
        s.truncate(100);
        assert_eq!(s.as_slice(), b"3.14");
    }

    #[test]
    fn test_remove_range_shifts_tail() {
        let mut s = Scratch::new();
        s.extend_from_slice(b"1.500e+02");
        s.remove_range(3, 5);
        assert_eq!(s.as_slice(), b"1.5e+02");
        s.remove_range(0, 0);
        assert_eq!(s.as_slice(), b"1.5e+02");
    }
}
