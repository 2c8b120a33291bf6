use crate::array::{BooleanArray, NullArray, PrimitiveArray};
use crate::buffer::{BufferOptions, GrowableBuffer};
use crate::error::Result;
use crate::nullmask::NullmaskBuilder;
use arrow_buffer::{ArrowNativeType, BooleanBufferBuilder};


/// Builder that has not seen a concrete value yet. Only counts nulls and
/// stands ready to specialize into any shape.
pub struct UnknownBuilder {
    options: BufferOptions,
    nulls: usize,
}


impl UnknownBuilder {
    pub fn new(options: BufferOptions) -> Self {
        Self { options, nulls: 0 }
    }

    pub fn with_nulls(options: BufferOptions, count: usize) -> Self {
        Self {
            options,
            nulls: count,
        }
    }

    pub fn options(&self) -> BufferOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.nulls
    }

    pub fn append_null(&mut self) {
        self.nulls += 1
    }

    pub fn clear(&mut self) {
        self.nulls = 0
    }

    pub fn snapshot(&self) -> NullArray {
        NullArray::new(self.nulls)
    }

    pub fn finish(self) -> NullArray {
        NullArray::new(self.nulls)
    }
}


pub struct PrimitiveBuilder<T> {
    values: GrowableBuffer<T>,
    nulls: NullmaskBuilder,
}


impl <T: ArrowNativeType> PrimitiveBuilder<T> {
    pub fn new(options: BufferOptions) -> Self {
        Self {
            values: GrowableBuffer::new(options),
            nulls: NullmaskBuilder::new(),
        }
    }

    /// Builder pre-filled with `count` nulls - the back-fill applied when
    /// this shape joins a union late.
    pub fn with_nulls(options: BufferOptions, count: usize) -> Result<Self> {
        let mut builder = Self::new(options);
        builder.append_nulls(count)?;
        Ok(builder)
    }

    pub fn options(&self) -> BufferOptions {
        self.values.options()
    }

    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    #[inline]
    pub fn append(&mut self, value: T) {
        self.values.append(value);
        self.nulls.append(true)
    }

    #[inline]
    pub fn append_null(&mut self) {
        self.values.append(T::default());
        self.nulls.append(false)
    }

    pub fn append_nulls(&mut self, count: usize) -> Result<()> {
        self.values.extend_by(count, T::default())?;
        self.nulls.append_many(false, count);
        Ok(())
    }

    pub fn values(&self) -> &[T] {
        self.values.values()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.nulls.clear()
    }

    pub fn snapshot(&self) -> PrimitiveArray<T> {
        PrimitiveArray::new(self.values.to_buffer(), self.nulls.snapshot())
    }

    pub fn finish(self) -> PrimitiveArray<T> {
        PrimitiveArray::new(self.values.into_buffer(), self.nulls.finish())
    }
}


impl PrimitiveBuilder<i64> {
    /// Element-wise widening to float64. Exact for the values this builder
    /// accepts; null positions stay null.
    pub fn widen(self) -> PrimitiveBuilder<f64> {
        let mut values = GrowableBuffer::new(self.values.options());
        for &v in self.values.values() {
            values.append(v as f64);
        }
        PrimitiveBuilder {
            values,
            nulls: self.nulls,
        }
    }
}


pub struct BooleanBuilder {
    options: BufferOptions,
    values: BooleanBufferBuilder,
    nulls: NullmaskBuilder,
}


impl BooleanBuilder {
    pub fn new(options: BufferOptions) -> Self {
        Self {
            options,
            values: BooleanBufferBuilder::new(0),
            nulls: NullmaskBuilder::new(),
        }
    }

    pub fn with_nulls(options: BufferOptions, count: usize) -> Self {
        let mut builder = Self::new(options);
        builder.append_nulls(count);
        builder
    }

    pub fn options(&self) -> BufferOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    #[inline]
    pub fn append(&mut self, value: bool) {
        self.values.append(value);
        self.nulls.append(true)
    }

    #[inline]
    pub fn append_null(&mut self) {
        self.values.append(false);
        self.nulls.append(false)
    }

    pub fn append_nulls(&mut self, count: usize) {
        self.values.append_n(count, false);
        self.nulls.append_many(false, count)
    }

    pub fn clear(&mut self) {
        self.values = BooleanBufferBuilder::new(0);
        self.nulls.clear()
    }

    pub fn snapshot(&self) -> BooleanArray {
        BooleanArray::new(self.values.finish_cloned(), self.nulls.snapshot())
    }

    pub fn finish(mut self) -> BooleanArray {
        BooleanArray::new(self.values.finish(), self.nulls.finish())
    }
}
