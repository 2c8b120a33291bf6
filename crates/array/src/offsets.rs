use crate::buffer::{BufferOptions, GrowableBuffer};
use crate::error::{Error, Result};
use arrow_buffer::ScalarBuffer;


/// N+1 monotonically non-decreasing offsets describing N variable-length
/// runs into a shared child array. The first offset is 0 for a freshly
/// built array and may be non-zero for a sliced view.
#[derive(Clone, Debug)]
pub struct Offsets {
    offsets: ScalarBuffer<i64>,
}


impl Offsets {
    pub fn new(offsets: ScalarBuffer<i64>) -> Self {
        Self::try_new(offsets).unwrap()
    }

    pub fn try_new(offsets: ScalarBuffer<i64>) -> Result<Self> {
        if offsets.is_empty() {
            return Err(Error::Index { index: 0, len: 0 });
        }
        for i in 1..offsets.len() {
            if offsets[i - 1] > offsets[i] {
                return Err(Error::Index {
                    index: i,
                    len: offsets.len(),
                });
            }
        }
        Ok(Self { offsets })
    }

    /// # Safety
    /// The buffer must be non-empty and monotonically non-decreasing.
    pub unsafe fn new_unchecked(offsets: ScalarBuffer<i64>) -> Self {
        Self { offsets }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn first_offset(&self) -> i64 {
        self.offsets[0]
    }

    #[inline]
    pub fn last_offset(&self) -> i64 {
        self.offsets[self.len()]
    }

    /// Offset at position `i` as a child array index.
    #[inline]
    pub fn index(&self, i: usize) -> usize {
        self.offsets[i] as usize
    }

    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        Self {
            offsets: self.offsets.slice(offset, len + 1),
        }
    }

    pub fn values(&self) -> &[i64] {
        &self.offsets
    }
}


/// Accumulates run lengths into an offsets buffer. Always starts at 0.
pub struct OffsetsBuilder {
    offsets: GrowableBuffer<i64>,
    last_offset: i64,
}


impl OffsetsBuilder {
    pub fn new(options: BufferOptions) -> Self {
        let mut offsets = GrowableBuffer::new(options);
        offsets.append(0);
        Self {
            offsets,
            last_offset: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn last_offset(&self) -> i64 {
        self.last_offset
    }

    /// Closes a run of `len` child elements.
    #[inline]
    pub fn append_len(&mut self, len: usize) {
        self.last_offset += len as i64;
        self.offsets.append(self.last_offset)
    }

    /// Appends an absolute end offset.
    #[inline]
    pub fn append(&mut self, offset: i64) {
        assert!(self.last_offset <= offset);
        self.last_offset = offset;
        self.offsets.append(offset)
    }

    /// Appends `count` empty runs at once.
    pub fn append_empty(&mut self, count: usize) -> Result<()> {
        self.offsets.extend_by(count, self.last_offset)
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
        self.offsets.append(0);
        self.last_offset = 0
    }

    pub fn snapshot(&self) -> Offsets {
        unsafe {
            // SAFETY: monotonicity and non-emptiness are guaranteed by construction
            Offsets::new_unchecked(self.offsets.to_buffer())
        }
    }

    pub fn finish(self) -> Offsets {
        unsafe {
            // SAFETY: monotonicity and non-emptiness are guaranteed by construction
            Offsets::new_unchecked(self.offsets.into_buffer())
        }
    }
}
