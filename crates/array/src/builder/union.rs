use crate::array::UnionArray;
use crate::buffer::{BufferOptions, GrowableBuffer};
use crate::builder::{
    BooleanBuilder, Builder, Event, ListBuilder, PrimitiveBuilder, RecordBuilder, TupleBuilder,
};
use crate::error::{Error, Result};
use crate::types::DataType;


/// Sparse union builder: the fallback shape when a single-kind assumption
/// breaks. Every alternative is kept at the full union length; appending
/// through one alternative appends a null to all the others.
pub struct UnionBuilder {
    tags: GrowableBuffer<i8>,
    alternatives: Vec<Builder>,
    options: BufferOptions,
}


impl UnionBuilder {
    /// Wraps an existing builder as the first alternative. All elements
    /// appended so far keep tag 0.
    pub(crate) fn promote(existing: Builder) -> Result<Self> {
        let options = existing.options();
        let mut tags = GrowableBuffer::new(options);
        tags.extend_by(existing.len(), 0)?;
        Ok(Self {
            tags,
            alternatives: vec![existing],
            options,
        })
    }

    pub fn options(&self) -> BufferOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn alternatives(&self) -> &[Builder] {
        &self.alternatives
    }

    pub fn is_active(&self) -> bool {
        self.alternatives.iter().any(|a| a.is_active())
    }

    pub(crate) fn event(&mut self, ev: Event<'_>) -> Result<()> {
        if let Some(k) = self.alternatives.iter().position(|a| a.is_active()) {
            self.alternatives[k].event(ev)?;
            if !self.alternatives[k].is_active() {
                self.seal(k)?;
            }
            return Ok(());
        }
        match ev {
            Event::Null => {
                for alt in self.alternatives.iter_mut() {
                    alt.event(Event::Null)?;
                }
                self.tags.append(0);
                Ok(())
            }
            Event::EndList => Err(Error::Sequence("end_list without a matching begin_list")),
            Event::Index(_) | Event::EndTuple => {
                Err(Error::Sequence("tuple operation outside of an open tuple"))
            }
            Event::Field(_) | Event::EndRecord => {
                Err(Error::Sequence("record operation outside of an open record"))
            }
            ev => {
                let k = self.select(&ev)?;
                self.alternatives[k].event(ev)?;
                if !self.alternatives[k].is_active() {
                    self.seal(k)?;
                }
                Ok(())
            }
        }
    }

    /// Finalizes one top-level element produced by alternative `k`.
    fn seal(&mut self, k: usize) -> Result<()> {
        for (j, alt) in self.alternatives.iter_mut().enumerate() {
            if j != k {
                alt.event(Event::Null)?;
            }
        }
        self.tags.append(k as i8);
        Ok(())
    }

    /// Picks the alternative that accepts the event, creating a new
    /// back-filled one when none does.
    fn select(&mut self, ev: &Event<'_>) -> Result<usize> {
        let found = self.alternatives.iter().position(|alt| match (alt, ev) {
            (Builder::Boolean(_), Event::Boolean(_)) => true,
            (Builder::Int64(_), Event::Integer(_) | Event::Real(_)) => true,
            (Builder::Float64(_), Event::Integer(_) | Event::Real(_)) => true,
            (Builder::List(_), Event::BeginList) => true,
            (Builder::Tuple(t), Event::BeginTuple(n)) => t.arity() == *n,
            (Builder::Record(r), Event::BeginRecord(d)) => r.disambiguator() == *d,
            _ => false,
        });
        if let Some(k) = found {
            return Ok(k);
        }

        let len = self.len();
        let alt = match ev {
            Event::Boolean(_) => {
                Builder::Boolean(BooleanBuilder::with_nulls(self.options, len))
            }
            Event::Integer(_) => {
                Builder::Int64(PrimitiveBuilder::with_nulls(self.options, len)?)
            }
            Event::Real(_) => {
                Builder::Float64(PrimitiveBuilder::with_nulls(self.options, len)?)
            }
            Event::BeginList => {
                Builder::List(Box::new(ListBuilder::with_nulls(self.options, len)?))
            }
            Event::BeginTuple(n) => {
                Builder::Tuple(TupleBuilder::with_nulls(self.options, *n, len))
            }
            Event::BeginRecord(d) => {
                Builder::Record(RecordBuilder::with_nulls(self.options, *d, len))
            }
            _ => unreachable!("only value and begin events reach select"),
        };
        self.alternatives.push(alt);
        Ok(self.alternatives.len() - 1)
    }

    pub fn clear(&mut self) {
        self.tags.clear();
        for alt in self.alternatives.iter_mut() {
            alt.clear();
        }
    }

    pub fn data_type(&self) -> DataType {
        DataType::Union(self.alternatives.iter().map(|a| a.data_type()).collect())
    }

    pub fn snapshot(&self) -> UnionArray {
        let len = self.len();
        UnionArray::new(
            self.tags.to_buffer(),
            self.alternatives
                .iter()
                .map(|a| a.snapshot().slice(0, len))
                .collect(),
        )
    }

    pub fn finish(self) -> UnionArray {
        let len = self.tags.len();
        UnionArray::new(
            self.tags.into_buffer(),
            self.alternatives
                .into_iter()
                .map(|a| a.finish().slice(0, len))
                .collect(),
        )
    }
}
