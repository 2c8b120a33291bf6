use crate::error::{Error, Result};
use arrow_buffer::{ArrowNativeType, ScalarBuffer};


/// Buffer tuning knobs. Purely a performance matter, no semantic effect.
#[derive(Clone, Copy, Debug)]
pub struct BufferOptions {
    pub initial_capacity: usize,
    pub growth_factor: f64,
}


impl Default for BufferOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 1024,
            growth_factor: 2.0,
        }
    }
}


/// Appendable, contiguous buffer of a single primitive type.
///
/// Growth is amortized O(1): when full, capacity goes to
/// `max(capacity * growth_factor, capacity + 1)`. There is no shrink
/// operation; the buffer ends its life frozen into a shared [`ScalarBuffer`]
/// without copying.
#[derive(Debug)]
pub struct GrowableBuffer<T> {
    values: Vec<T>,
    options: BufferOptions,
}


impl <T: ArrowNativeType> GrowableBuffer<T> {
    pub fn new(options: BufferOptions) -> Self {
        Self {
            values: Vec::with_capacity(options.initial_capacity),
            options,
        }
    }

    pub fn options(&self) -> BufferOptions {
        self.options
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Value at position `i`. Out-of-range access is a programming error
    /// and panics.
    #[inline]
    pub fn get(&self, i: usize) -> T {
        self.values[i]
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    #[inline]
    pub fn append(&mut self, value: T) {
        if self.values.len() == self.values.capacity() {
            self.grow(1);
        }
        self.values.push(value)
    }

    /// Bulk extension with a fill value, used to back-fill a freshly added
    /// shape alternative up to the current length.
    pub fn extend_by(&mut self, count: usize, fill: T) -> Result<()> {
        let required = self.values.len() + count;
        if required > self.values.capacity() {
            let target = self.next_capacity(required);
            let additional = target - self.values.len();
            self.values.try_reserve_exact(additional).map_err(|_| {
                Error::Allocation {
                    bytes: additional * std::mem::size_of::<T>(),
                }
            })?;
        }
        self.values.resize(required, fill);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.values.clear()
    }

    /// Copying snapshot of the current contents.
    pub fn to_buffer(&self) -> ScalarBuffer<T> {
        self.values.clone().into()
    }

    /// Transfers the backing store into an immutable buffer. No copy.
    pub fn into_buffer(self) -> ScalarBuffer<T> {
        self.values.into()
    }

    fn next_capacity(&self, required: usize) -> usize {
        let cap = self.values.capacity();
        let grown = (cap as f64 * self.options.growth_factor) as usize;
        grown.max(cap + 1).max(required)
    }

    fn grow(&mut self, additional: usize) {
        let target = self.next_capacity(self.values.len() + additional);
        self.values.reserve_exact(target - self.values.len())
    }
}
