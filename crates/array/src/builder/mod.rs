mod list;
mod primitive;
mod record;
mod union;

pub use list::*;
pub use primitive::*;
pub use record::*;
pub use union::*;

use crate::array::Array;
use crate::buffer::BufferOptions;
use crate::error::{Error, Result};
use crate::types::DataType;


/// Internal event protocol. Public builder methods translate one-to-one
/// into events, which then travel down the builder tree to the single
/// active node.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Event<'a> {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    BeginList,
    EndList,
    BeginTuple(usize),
    Index(usize),
    EndTuple,
    BeginRecord(i64),
    Field(&'a str),
    EndRecord,
}


/// Mutable array under construction.
///
/// Starts shapeless and specializes on the first concrete value. When a
/// later value does not fit the shape chosen so far, the builder promotes
/// itself in place: int64 widens to float64, anything else falls back to a
/// union that keeps the old data intact.
pub enum Builder {
    Unknown(UnknownBuilder),
    Boolean(BooleanBuilder),
    Int64(PrimitiveBuilder<i64>),
    Float64(PrimitiveBuilder<f64>),
    List(Box<ListBuilder>),
    Tuple(TupleBuilder),
    Record(RecordBuilder),
    Union(Box<UnionBuilder>),
}


impl Builder {
    pub fn new(options: BufferOptions) -> Self {
        Builder::Unknown(UnknownBuilder::new(options))
    }

    pub fn options(&self) -> BufferOptions {
        match self {
            Builder::Unknown(b) => b.options(),
            Builder::Boolean(b) => b.options(),
            Builder::Int64(b) => b.options(),
            Builder::Float64(b) => b.options(),
            Builder::List(b) => b.options(),
            Builder::Tuple(b) => b.options(),
            Builder::Record(b) => b.options(),
            Builder::Union(b) => b.options(),
        }
    }

    /// Number of completed top-level elements. An element still being
    /// assembled is not counted until its closing event arrives.
    pub fn len(&self) -> usize {
        match self {
            Builder::Unknown(b) => b.len(),
            Builder::Boolean(b) => b.len(),
            Builder::Int64(b) => b.len(),
            Builder::Float64(b) => b.len(),
            Builder::List(b) => b.len(),
            Builder::Tuple(b) => b.len(),
            Builder::Record(b) => b.len(),
            Builder::Union(b) => b.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Builder::Unknown(_) => DataType::Null,
            Builder::Boolean(_) => DataType::Boolean,
            Builder::Int64(_) => DataType::Int64,
            Builder::Float64(_) => DataType::Float64,
            Builder::List(b) => b.data_type(),
            Builder::Tuple(b) => b.data_type(),
            Builder::Record(b) => b.data_type(),
            Builder::Union(b) => b.data_type(),
        }
    }

    pub fn null(&mut self) -> Result<()> {
        self.event(Event::Null)
    }

    pub fn boolean(&mut self, value: bool) -> Result<()> {
        self.event(Event::Boolean(value))
    }

    pub fn integer(&mut self, value: i64) -> Result<()> {
        self.event(Event::Integer(value))
    }

    pub fn real(&mut self, value: f64) -> Result<()> {
        self.event(Event::Real(value))
    }

    pub fn begin_list(&mut self) -> Result<()> {
        self.event(Event::BeginList)
    }

    pub fn end_list(&mut self) -> Result<()> {
        self.event(Event::EndList)
    }

    pub fn begin_tuple(&mut self, arity: usize) -> Result<()> {
        self.event(Event::BeginTuple(arity))
    }

    pub fn index(&mut self, slot: usize) -> Result<()> {
        self.event(Event::Index(slot))
    }

    pub fn end_tuple(&mut self) -> Result<()> {
        self.event(Event::EndTuple)
    }

    pub fn begin_record(&mut self, disambiguator: i64) -> Result<()> {
        self.event(Event::BeginRecord(disambiguator))
    }

    pub fn field(&mut self, name: &str) -> Result<()> {
        self.event(Event::Field(name))
    }

    pub fn end_record(&mut self) -> Result<()> {
        self.event(Event::EndRecord)
    }

    /// True while a container element rooted here is open and awaiting
    /// its closing event.
    pub(crate) fn is_active(&self) -> bool {
        match self {
            Builder::Unknown(_)
            | Builder::Boolean(_)
            | Builder::Int64(_)
            | Builder::Float64(_) => false,
            Builder::List(b) => b.begun(),
            Builder::Tuple(b) => b.begun(),
            Builder::Record(b) => b.begun(),
            Builder::Union(b) => b.is_active(),
        }
    }

    pub(crate) fn event(&mut self, ev: Event<'_>) -> Result<()> {
        match self {
            Builder::Unknown(_) => self.unknown_event(ev),
            Builder::Boolean(b) => match ev {
                Event::Null => {
                    b.append_null();
                    Ok(())
                }
                Event::Boolean(v) => {
                    b.append(v);
                    Ok(())
                }
                Event::EndList => {
                    Err(Error::Sequence("end_list without a matching begin_list"))
                }
                Event::Index(_) | Event::EndTuple => {
                    Err(Error::Sequence("tuple operation outside of an open tuple"))
                }
                Event::Field(_) | Event::EndRecord => {
                    Err(Error::Sequence("record operation outside of an open record"))
                }
                ev => self.promote(ev),
            },
            Builder::Int64(b) => match ev {
                Event::Null => {
                    b.append_null();
                    Ok(())
                }
                Event::Integer(v) => {
                    b.append(v);
                    Ok(())
                }
                Event::Real(v) => {
                    // lossless widening, no union needed
                    let options = b.options();
                    let existing = std::mem::replace(self, Builder::new(options));
                    let mut widened = match existing {
                        Builder::Int64(b) => b.widen(),
                        _ => unreachable!(),
                    };
                    widened.append(v);
                    *self = Builder::Float64(widened);
                    Ok(())
                }
                Event::EndList => {
                    Err(Error::Sequence("end_list without a matching begin_list"))
                }
                Event::Index(_) | Event::EndTuple => {
                    Err(Error::Sequence("tuple operation outside of an open tuple"))
                }
                Event::Field(_) | Event::EndRecord => {
                    Err(Error::Sequence("record operation outside of an open record"))
                }
                ev => self.promote(ev),
            },
            Builder::Float64(b) => match ev {
                Event::Null => {
                    b.append_null();
                    Ok(())
                }
                Event::Integer(v) => {
                    b.append(v as f64);
                    Ok(())
                }
                Event::Real(v) => {
                    b.append(v);
                    Ok(())
                }
                Event::EndList => {
                    Err(Error::Sequence("end_list without a matching begin_list"))
                }
                Event::Index(_) | Event::EndTuple => {
                    Err(Error::Sequence("tuple operation outside of an open tuple"))
                }
                Event::Field(_) | Event::EndRecord => {
                    Err(Error::Sequence("record operation outside of an open record"))
                }
                ev => self.promote(ev),
            },
            Builder::List(b) => {
                if b.begun() {
                    return b.event(ev);
                }
                match ev {
                    Event::Null => {
                        b.append_null();
                        Ok(())
                    }
                    Event::BeginList => {
                        b.begin();
                        Ok(())
                    }
                    Event::EndList => {
                        Err(Error::Sequence("end_list without a matching begin_list"))
                    }
                    Event::Index(_) | Event::EndTuple => {
                        Err(Error::Sequence("tuple operation outside of an open tuple"))
                    }
                    Event::Field(_) | Event::EndRecord => {
                        Err(Error::Sequence("record operation outside of an open record"))
                    }
                    ev => self.promote(ev),
                }
            }
            Builder::Tuple(b) => {
                if b.begun() {
                    return b.event(ev);
                }
                match ev {
                    Event::Null => b.append_null(),
                    Event::BeginTuple(n) if n == b.arity() => {
                        b.begin();
                        Ok(())
                    }
                    Event::EndList => {
                        Err(Error::Sequence("end_list without a matching begin_list"))
                    }
                    Event::Index(_) | Event::EndTuple => {
                        Err(Error::Sequence("tuple operation outside of an open tuple"))
                    }
                    Event::Field(_) | Event::EndRecord => {
                        Err(Error::Sequence("record operation outside of an open record"))
                    }
                    ev => self.promote(ev),
                }
            }
            Builder::Record(b) => {
                if b.begun() {
                    return b.event(ev);
                }
                match ev {
                    Event::Null => b.append_null(),
                    Event::BeginRecord(d) if d == b.disambiguator() => {
                        b.begin();
                        Ok(())
                    }
                    Event::EndList => {
                        Err(Error::Sequence("end_list without a matching begin_list"))
                    }
                    Event::Index(_) | Event::EndTuple => {
                        Err(Error::Sequence("tuple operation outside of an open tuple"))
                    }
                    Event::Field(_) | Event::EndRecord => {
                        Err(Error::Sequence("record operation outside of an open record"))
                    }
                    ev => self.promote(ev),
                }
            }
            Builder::Union(b) => b.event(ev),
        }
    }

    fn unknown_event(&mut self, ev: Event<'_>) -> Result<()> {
        let (options, nulls) = match self {
            Builder::Unknown(b) => (b.options(), b.len()),
            _ => unreachable!(),
        };
        let mut replacement = match ev {
            Event::Null => {
                if let Builder::Unknown(b) = self {
                    b.append_null();
                }
                return Ok(());
            }
            Event::Boolean(_) => Builder::Boolean(BooleanBuilder::with_nulls(options, nulls)),
            Event::Integer(_) => Builder::Int64(PrimitiveBuilder::with_nulls(options, nulls)?),
            Event::Real(_) => Builder::Float64(PrimitiveBuilder::with_nulls(options, nulls)?),
            Event::BeginList => {
                Builder::List(Box::new(ListBuilder::with_nulls(options, nulls)?))
            }
            Event::BeginTuple(n) => Builder::Tuple(TupleBuilder::with_nulls(options, n, nulls)),
            Event::BeginRecord(d) => {
                Builder::Record(RecordBuilder::with_nulls(options, d, nulls))
            }
            Event::EndList => {
                return Err(Error::Sequence("end_list without a matching begin_list"))
            }
            Event::Index(_) | Event::EndTuple => {
                return Err(Error::Sequence("tuple operation outside of an open tuple"))
            }
            Event::Field(_) | Event::EndRecord => {
                return Err(Error::Sequence("record operation outside of an open record"))
            }
        };
        replacement.event(ev)?;
        *self = replacement;
        Ok(())
    }

    /// Falls back to a sparse union: existing data becomes alternative 0,
    /// the offending event goes to a freshly created alternative.
    fn promote(&mut self, ev: Event<'_>) -> Result<()> {
        let options = self.options();
        let existing = std::mem::replace(self, Builder::new(options));
        *self = Builder::Union(Box::new(UnionBuilder::promote(existing)?));
        self.event(ev)
    }

    /// Resets to empty while keeping the shape and allocations learned
    /// so far.
    pub fn clear(&mut self) {
        match self {
            Builder::Unknown(b) => b.clear(),
            Builder::Boolean(b) => b.clear(),
            Builder::Int64(b) => b.clear(),
            Builder::Float64(b) => b.clear(),
            Builder::List(b) => b.clear(),
            Builder::Tuple(b) => b.clear(),
            Builder::Record(b) => b.clear(),
            Builder::Union(b) => b.clear(),
        }
    }

    /// Immutable copy of everything appended and closed so far. The
    /// builder stays usable and the snapshot never changes afterwards.
    pub fn snapshot(&self) -> Array {
        match self {
            Builder::Unknown(b) => Array::Null(b.snapshot()),
            Builder::Boolean(b) => Array::Boolean(b.snapshot()),
            Builder::Int64(b) => Array::Int64(b.snapshot()),
            Builder::Float64(b) => Array::Float64(b.snapshot()),
            Builder::List(b) => Array::List(b.snapshot()),
            Builder::Tuple(b) => Array::Tuple(b.snapshot()),
            Builder::Record(b) => Array::Record(b.snapshot()),
            Builder::Union(b) => Array::Union(b.snapshot()),
        }
    }

    /// Consumes the builder, handing its buffers to the resulting array
    /// without copying.
    pub fn finish(self) -> Array {
        match self {
            Builder::Unknown(b) => Array::Null(b.finish()),
            Builder::Boolean(b) => Array::Boolean(b.finish()),
            Builder::Int64(b) => Array::Int64(b.finish()),
            Builder::Float64(b) => Array::Float64(b.finish()),
            Builder::List(b) => Array::List(b.finish()),
            Builder::Tuple(b) => Array::Tuple(b.finish()),
            Builder::Record(b) => Array::Record(b.finish()),
            Builder::Union(b) => Array::Union(b.finish()),
        }
    }
}


impl Default for Builder {
    fn default() -> Self {
        Builder::new(BufferOptions::default())
    }
}
