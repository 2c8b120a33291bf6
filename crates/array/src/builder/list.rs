use crate::array::ListArray;
use crate::buffer::BufferOptions;
use crate::builder::{Builder, Event, UnknownBuilder};
use crate::error::{Error, Result};
use crate::nullmask::NullmaskBuilder;
use crate::offsets::OffsetsBuilder;
use crate::types::DataType;
use std::sync::Arc;


pub struct ListBuilder {
    offsets: OffsetsBuilder,
    values: Builder,
    nulls: NullmaskBuilder,
    begun: bool,
}


impl ListBuilder {
    pub fn new(options: BufferOptions) -> Self {
        Self {
            offsets: OffsetsBuilder::new(options),
            values: Builder::Unknown(UnknownBuilder::new(options)),
            nulls: NullmaskBuilder::new(),
            begun: false,
        }
    }

    pub fn with_nulls(options: BufferOptions, count: usize) -> Result<Self> {
        let mut builder = Self::new(options);
        builder.offsets.append_empty(count)?;
        builder.nulls.append_many(false, count);
        Ok(builder)
    }

    pub fn options(&self) -> BufferOptions {
        self.values.options()
    }

    /// Closed top-level elements. A list that is still open does not count.
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    pub fn begun(&self) -> bool {
        self.begun
    }

    pub fn values(&self) -> &Builder {
        &self.values
    }

    pub fn begin(&mut self) {
        debug_assert!(!self.begun);
        self.begun = true
    }

    pub fn append_null(&mut self) {
        debug_assert!(!self.begun);
        self.offsets.append_len(0);
        self.nulls.append(false)
    }

    /// Event delivery while this list is open.
    pub(crate) fn event(&mut self, ev: Event<'_>) -> Result<()> {
        debug_assert!(self.begun);
        if self.values.is_active() {
            return self.values.event(ev);
        }
        match ev {
            Event::EndList => {
                self.close();
                Ok(())
            }
            Event::Index(_) | Event::EndTuple => {
                Err(Error::Sequence("tuple operation outside of an open tuple"))
            }
            Event::Field(_) | Event::EndRecord => {
                Err(Error::Sequence("record operation outside of an open record"))
            }
            ev => self.values.event(ev),
        }
    }

    fn close(&mut self) {
        self.offsets.append(self.values.len() as i64);
        self.nulls.append(true);
        self.begun = false
    }

    pub fn clear(&mut self) {
        self.offsets.clear();
        self.values.clear();
        self.nulls.clear();
        self.begun = false
    }

    pub fn data_type(&self) -> DataType {
        DataType::List(Box::new(self.values.data_type()))
    }

    pub fn snapshot(&self) -> ListArray {
        let offsets = self.offsets.snapshot();
        let limit = offsets.last_offset() as usize;
        let values = self.values.snapshot().slice(0, limit);
        ListArray::new(offsets, Arc::new(values), self.nulls.snapshot())
    }

    pub fn finish(self) -> ListArray {
        let offsets = self.offsets.finish();
        let limit = offsets.last_offset() as usize;
        let values = self.values.finish().slice(0, limit);
        ListArray::new(offsets, Arc::new(values), self.nulls.finish())
    }
}
