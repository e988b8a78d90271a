// src/pass/iovec.rs
use bytes::BytesMut;
use smallvec::SmallVec;
use crate::error::{Result, SwapError};

/// Segmented byte buffer that passes read from and write back into.
///
/// Segments are appended with [`take`](IoVec::take) and flattened with
/// [`consume`](IoVec::consume). Trailer-based passes (padding, selectors)
/// only look at the end, so [`last_byte`](IoVec::last_byte) and
/// [`drop_tail`](IoVec::drop_tail) work across segment boundaries without
/// flattening.
///
/// # Example
///
/// ```
/// use bxswap::pass::IoVec;
///
/// let mut v = IoVec::new();
/// v.take_slice(b"hello ");
/// v.take_slice(b"world");
///
/// assert_eq!(v.len(), 11);
/// assert_eq!(v.last_byte().unwrap(), b'd');
///
/// v.drop_tail(6).unwrap();
/// assert_eq!(&v.consume()[..], b"hello");
/// assert!(v.is_empty());
/// ```
#[derive(Default, Clone)]
pub struct IoVec {
    segments: SmallVec<[BytesMut; 4]>,
    len: usize,
}

impl IoVec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment. Empty segments are discarded.
    pub fn take(&mut self, buf: BytesMut) {
        if buf.is_empty() {
            return;
        }
        self.len += buf.len();
        self.segments.push(buf);
    }

    /// Append a copy of `data` as a new segment.
    pub fn take_slice(&mut self, data: &[u8]) {
        self.take(BytesMut::from(data));
    }

    /// Flatten every segment into one contiguous buffer, leaving `self` empty.
    ///
    /// A single segment is handed back without copying.
    pub fn consume(&mut self) -> BytesMut {
        let total = self.len;
        self.len = 0;

        if self.segments.len() == 1 {
            if let Some(only) = self.segments.pop() {
                return only;
            }
        }

        let mut out = BytesMut::with_capacity(total);
        for segment in self.segments.drain(..) {
            out.extend_from_slice(&segment);
        }
        out
    }

    /// Total number of bytes across all segments
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over the segments in order
    pub fn segments(&self) -> impl Iterator<Item = &[u8]> {
        self.segments.iter().map(|s| &s[..])
    }

    pub fn last_byte(&self) -> Result<u8> {
        self.segments
            .last()
            .and_then(|s| s.last().copied())
            .ok_or(SwapError::EmptyBuffer)
    }

    /// Remove the last `n` bytes.
    ///
    /// Fails with [`SwapError::Truncated`] and leaves the buffer untouched
    /// when fewer than `n` bytes are held.
    pub fn drop_tail(&mut self, n: usize) -> Result<()> {
        if n > self.len {
            return Err(SwapError::Truncated {
                requested: n,
                available: self.len,
            });
        }

        let mut remaining = n;
        while remaining > 0 {
            let Some(last) = self.segments.last_mut() else {
                break;
            };

            if last.len() <= remaining {
                remaining -= last.len();
                self.segments.pop();
            } else {
                let keep = last.len() - remaining;
                last.truncate(keep);
                remaining = 0;
            }
        }

        self.len -= n;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }
}

impl From<BytesMut> for IoVec {
    fn from(buf: BytesMut) -> Self {
        let mut v = IoVec::new();
        v.take(buf);
        v
    }
}

impl From<&[u8]> for IoVec {
    fn from(data: &[u8]) -> Self {
        let mut v = IoVec::new();
        v.take_slice(data);
        v
    }
}

impl From<Vec<u8>> for IoVec {
    fn from(data: Vec<u8>) -> Self {
        IoVec::from(&data[..])
    }
}

// Segment contents are omitted to keep large payloads out of logs
impl std::fmt::Debug for IoVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IoVec")
            .field("len", &self.len)
            .field("segments", &self.segments.len())
            .finish()
    }
}
