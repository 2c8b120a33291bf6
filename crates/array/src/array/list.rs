use crate::array::Array;
use crate::buffer::BufferOptions;
use crate::error::Result;
use crate::nullmask::Nullmask;
use crate::offsets::{Offsets, OffsetsBuilder};
use std::sync::Arc;


/// Variable-length runs into a shared child array. Element `i` spans
/// `offsets[i]..offsets[i+1]` of the child. Slicing narrows the offsets
/// window and never touches the child payload.
#[derive(Clone, Debug)]
pub struct ListArray {
    offsets: Offsets,
    values: Arc<Array>,
    nulls: Nullmask,
}


impl ListArray {
    pub fn new(offsets: Offsets, values: Arc<Array>, nulls: Nullmask) -> Self {
        assert!(offsets.last_offset() as usize <= values.len());
        assert_eq!(offsets.len(), nulls.len());
        Self {
            offsets,
            values,
            nulls,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    pub fn values(&self) -> &Arc<Array> {
        &self.values
    }

    pub fn nulls(&self) -> &Nullmask {
        &self.nulls
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.nulls.is_valid(i)
    }

    /// Child view of element `i`, zero-copy.
    pub fn item(&self, i: usize) -> Array {
        let beg = self.offsets.index(i);
        let end = self.offsets.index(i + 1);
        self.values.slice(beg, end - beg)
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Self {
        Self {
            offsets: self.offsets.slice(offset, len),
            values: self.values.clone(),
            nulls: self.nulls.slice(offset, len),
        }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Result<Self> {
        let mut offsets = OffsetsBuilder::new(BufferOptions::default());
        let mut value_indices = Vec::new();
        for &i in indices {
            let beg = self.offsets.index(i);
            let end = self.offsets.index(i + 1);
            offsets.append_len(end - beg);
            value_indices.extend(beg..end);
        }
        let values = self.values.carry(&value_indices)?;
        Ok(Self {
            offsets: offsets.finish(),
            values: Arc::new(values),
            nulls: self.nulls.gather(indices),
        })
    }
}
