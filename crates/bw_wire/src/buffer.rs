//! Segmented append-only output buffer.
//!
//! Large outputs are assembled from fixed-size segments instead of one
//! growing allocation, and can be flushed segment by segment.

use alloc::vec::Vec;
use core::fmt;
use std::io;

/// The default segment size in bytes.
pub const DEFAULT_SEGMENT_SIZE: usize = 4096;

// -----------------------------------------------------------------------------
// SegmentedBuffer

/// An append-only byte buffer made of segments.
///
/// Only the last segment may receive more bytes, and only when it was
/// created by the buffer itself. Segments copied or adopted whole are
/// never written to again.
///
/// # Examples
///
/// ```
/// use bw_wire::buffer::SegmentedBuffer;
///
/// let mut buffer = SegmentedBuffer::with_segment_size(4);
/// buffer.write_byte(b'[');
/// buffer.write_slice(b"1,2,3,4,5");
/// buffer.write_vec(b"..6]".to_vec(), 2, 2);
///
/// assert_eq!(buffer.len(), 12);
/// assert_eq!(buffer.materialize(), b"[1,2,3,4,56]");
///
/// let mut out = Vec::new();
/// buffer.flush_to(&mut out).unwrap();
/// assert_eq!(out, b"[1,2,3,4,56]");
/// ```
pub struct SegmentedBuffer {
    segments: Vec<Segment>,
    segment_size: usize,
    len: usize,
    /// Whether the last segment accepts more bytes.
    open: bool,
}

/// A segment's bytes start at `start` in an adopted allocation, at zero
/// otherwise.
struct Segment {
    bytes: Vec<u8>,
    start: usize,
}

impl Segment {
    #[inline]
    fn owned(bytes: Vec<u8>) -> Self {
        Self { bytes, start: 0 }
    }

    #[inline]
    fn as_slice(&self) -> &[u8] {
        &self.bytes[self.start..]
    }
}

impl Default for SegmentedBuffer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentedBuffer {
    /// Creates a buffer with [`DEFAULT_SEGMENT_SIZE`] segments.
    #[inline]
    pub const fn new() -> Self {
        Self::with_segment_size(DEFAULT_SEGMENT_SIZE)
    }

    /// Creates a buffer, a zero size is raised to one byte.
    pub const fn with_segment_size(segment_size: usize) -> Self {
        Self {
            segments: Vec::new(),
            segment_size: if segment_size == 0 { 1 } else { segment_size },
            len: 0,
            open: false,
        }
    }

    #[inline]
    pub const fn segment_size(&self) -> usize {
        self.segment_size
    }

    /// Returns the number of bytes written.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the segments in order.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &[u8]> {
        self.segments.iter().map(Segment::as_slice)
    }

    fn open_segment(&mut self) {
        let bytes = Vec::with_capacity(self.segment_size);
        self.segments.push(Segment::owned(bytes));
        self.open = true;
    }

    /// Copies as much as fits into the open tail segment, returns the rest.
    fn fill_tail<'a>(&mut self, bytes: &'a [u8]) -> &'a [u8] {
        if !self.open {
            return bytes;
        }
        let segment_size = self.segment_size;
        let Some(Segment { bytes: tail, .. }) = self.segments.last_mut() else {
            return bytes;
        };
        let (head, rest) = bytes.split_at(bytes.len().min(segment_size - tail.len()));
        tail.extend_from_slice(head);
        if tail.len() == segment_size {
            self.open = false;
        }
        self.len += head.len();
        rest
    }

    pub fn write_byte(&mut self, byte: u8) {
        if !self.open {
            self.open_segment();
        }
        self.fill_tail(&[byte]);
    }

    /// Appends a slice.
    ///
    /// A remainder of at least one segment after filling the tail is
    /// copied into a segment of its exact size.
    pub fn write_slice(&mut self, bytes: &[u8]) {
        let rest = self.fill_tail(bytes);
        if rest.is_empty() {
            return;
        }
        if rest.len() >= self.segment_size {
            self.segments.push(Segment::owned(rest.to_vec()));
            self.open = false;
            self.len += rest.len();
        } else {
            self.open_segment();
            self.fill_tail(rest);
        }
    }

    /// Appends `len` bytes of `vec` starting at `offset`.
    ///
    /// A remainder of at least one segment after filling the tail is kept
    /// in place in the allocation of `vec`, its bytes are not moved.
    ///
    /// # Panics
    ///
    /// Panics if `offset + len` is past the end of `vec`.
    pub fn write_vec(&mut self, mut vec: Vec<u8>, offset: usize, len: usize) {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= vec.len())
            .unwrap_or_else(|| {
                panic!("range {offset}+{len} out of bounds for length {}", vec.len())
            });

        let filled = len - self.fill_tail(&vec[offset..end]).len();
        let start = offset + filled;
        if start == end {
            return;
        }
        if end - start >= self.segment_size {
            vec.truncate(end);
            self.len += end - start;
            self.segments.push(Segment { bytes: vec, start });
            self.open = false;
        } else {
            self.open_segment();
            self.fill_tail(&vec[start..end]);
        }
    }

    /// Copies every segment into one contiguous vector.
    pub fn materialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for segment in self.segments() {
            out.extend_from_slice(segment);
        }
        out
    }

    /// Writes every segment to `out`, one write per segment.
    pub fn flush_to<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        for segment in self.segments() {
            out.write_all(segment)?;
        }
        out.flush()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
        self.open = false;
    }
}

impl io::Write for SegmentedBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_slice(buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for SegmentedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentedBuffer")
            .field("len", &self.len)
            .field("segments", &self.segments.len())
            .field("segment_size", &self.segment_size)
            .finish()
    }
}
