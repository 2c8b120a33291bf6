use arrow_buffer::{BooleanBufferBuilder, NullBuffer};


/// Validity of a finished array. `nulls == None` means all elements
/// are present.
#[derive(Clone, Debug)]
pub struct Nullmask {
    len: usize,
    nulls: Option<NullBuffer>,
}


impl Nullmask {
    pub fn new(len: usize, nulls: Option<NullBuffer>) -> Self {
        if let Some(nulls) = nulls.as_ref() {
            assert_eq!(nulls.len(), len);
        }
        Self { len, nulls }
    }

    /// All-valid mask of the given length.
    pub fn trivial(len: usize) -> Self {
        Self { len, nulls: None }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_nulls(&self) -> bool {
        self.nulls.is_some()
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        assert!(i < self.len);
        self.nulls.as_ref().map(|nulls| nulls.is_valid(i)).unwrap_or(true)
    }

    pub fn slice(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len);
        Self {
            len,
            nulls: self.nulls.as_ref().map(|nulls| nulls.slice(offset, len)),
        }
    }

    /// Validity of `self.at(indices[j])` for each `j`. Indices must be
    /// in bounds.
    pub fn gather(&self, indices: &[usize]) -> Self {
        match self.nulls.as_ref() {
            None => Self::trivial(indices.len()),
            Some(nulls) => {
                let mut builder = NullmaskBuilder::new();
                for &i in indices {
                    builder.append(nulls.is_valid(i));
                }
                builder.finish()
            }
        }
    }
}


/// Validity accumulator. The bit mask is not materialized until the first
/// null arrives; all-valid sequences cost a counter.
pub struct NullmaskBuilder {
    nulls: BooleanBufferBuilder,
    len: usize,
    has_nulls: bool,
}


impl NullmaskBuilder {
    pub fn new() -> Self {
        Self {
            nulls: BooleanBufferBuilder::new(0),
            len: 0,
            has_nulls: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn append(&mut self, valid: bool) {
        if self.has_nulls {
            self.nulls.append(valid);
        } else if !valid {
            self.init_nulls();
            self.nulls.append(false);
        }
        self.len += 1
    }

    pub fn append_many(&mut self, valid: bool, count: usize) {
        if count == 0 {
            return;
        }
        if self.has_nulls {
            self.nulls.append_n(count, valid);
        } else if !valid {
            self.init_nulls();
            self.nulls.append_n(count, false);
        }
        self.len += count
    }

    fn init_nulls(&mut self) {
        self.nulls.append_n(self.len, true);
        self.has_nulls = true
    }

    pub fn clear(&mut self) {
        self.nulls = BooleanBufferBuilder::new(0);
        self.len = 0;
        self.has_nulls = false
    }

    pub fn snapshot(&self) -> Nullmask {
        if self.has_nulls {
            Nullmask::new(self.len, Some(NullBuffer::new(self.nulls.finish_cloned())))
        } else {
            Nullmask::trivial(self.len)
        }
    }

    pub fn finish(mut self) -> Nullmask {
        if self.has_nulls {
            Nullmask::new(self.len, Some(NullBuffer::new(self.nulls.finish())))
        } else {
            Nullmask::trivial(self.len)
        }
    }
}


impl Default for NullmaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}
