use crate::nullmask::Nullmask;
use arrow_buffer::{ArrowNativeType, BooleanBuffer, BooleanBufferBuilder, ScalarBuffer};


/// Array of elements about which nothing is known except that they are
/// absent. The snapshot of a builder that has only received `null` events.
#[derive(Clone, Debug)]
pub struct NullArray {
    len: usize,
}


impl NullArray {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn slice(&self, _offset: usize, len: usize) -> Self {
        Self { len }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Self {
        Self {
            len: indices.len(),
        }
    }
}


#[derive(Clone, Debug)]
pub struct BooleanArray {
    values: BooleanBuffer,
    nulls: Nullmask,
}


impl BooleanArray {
    pub fn new(values: BooleanBuffer, nulls: Nullmask) -> Self {
        assert_eq!(values.len(), nulls.len());
        Self { values, nulls }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn value(&self, i: usize) -> bool {
        self.values.value(i)
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.nulls.is_valid(i)
    }

    pub fn nulls(&self) -> &Nullmask {
        &self.nulls
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Self {
        Self {
            values: self.values.slice(offset, len),
            nulls: self.nulls.slice(offset, len),
        }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Self {
        let mut values = BooleanBufferBuilder::new(indices.len());
        for &i in indices {
            values.append(self.values.value(i));
        }
        Self {
            values: values.finish(),
            nulls: self.nulls.gather(indices),
        }
    }
}


#[derive(Clone, Debug)]
pub struct PrimitiveArray<T: ArrowNativeType> {
    values: ScalarBuffer<T>,
    nulls: Nullmask,
}


impl <T: ArrowNativeType> PrimitiveArray<T> {
    pub fn new(values: ScalarBuffer<T>, nulls: Nullmask) -> Self {
        assert_eq!(values.len(), nulls.len());
        Self { values, nulls }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn value(&self, i: usize) -> T {
        self.values[i]
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.nulls.is_valid(i)
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn nulls(&self) -> &Nullmask {
        &self.nulls
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Self {
        Self {
            values: self.values.slice(offset, len),
            nulls: self.nulls.slice(offset, len),
        }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Self {
        let values: Vec<T> = indices.iter().map(|&i| self.values[i]).collect();
        Self {
            values: values.into(),
            nulls: self.nulls.gather(indices),
        }
    }
}
