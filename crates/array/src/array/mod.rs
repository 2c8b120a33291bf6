mod list;
mod primitive;
mod record;
mod union;

pub use list::*;
pub use primitive::*;
pub use record::*;
pub use union::*;

use crate::error::{Error, Result};
use crate::types::DataType;


/// Immutable, finished columnar data.
///
/// Nodes share their buffers: cloning is cheap and `range` produces a view
/// without copying any payload. All operations that "modify" an array
/// return a new one.
#[derive(Clone, Debug)]
pub enum Array {
    Null(NullArray),
    Boolean(BooleanArray),
    Int64(PrimitiveArray<i64>),
    Float64(PrimitiveArray<f64>),
    List(ListArray),
    Tuple(TupleArray),
    Record(RecordArray),
    Union(UnionArray),
}


/// A single element resolved out of an [`Array`].
///
/// List elements stay zero-copy array views; tuple and record rows are
/// materialized field by field.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    List(Array),
    Tuple(Vec<Item>),
    Record(Vec<(String, Item)>),
}


impl Array {
    pub fn len(&self) -> usize {
        match self {
            Array::Null(a) => a.len(),
            Array::Boolean(a) => a.len(),
            Array::Int64(a) => a.len(),
            Array::Float64(a) => a.len(),
            Array::List(a) => a.len(),
            Array::Tuple(a) => a.len(),
            Array::Record(a) => a.len(),
            Array::Union(a) => a.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Array::Null(_) => DataType::Null,
            Array::Boolean(_) => DataType::Boolean,
            Array::Int64(_) => DataType::Int64,
            Array::Float64(_) => DataType::Float64,
            Array::List(a) => DataType::List(Box::new(a.values().data_type())),
            Array::Tuple(a) => {
                DataType::Tuple(a.fields().iter().map(|f| f.data_type()).collect())
            }
            Array::Record(a) => DataType::Record(
                a.fields()
                    .iter()
                    .map(|(n, f)| (n.clone(), f.data_type()))
                    .collect(),
            ),
            Array::Union(a) => DataType::Union(
                a.alternatives().iter().map(|a| a.data_type()).collect(),
            ),
        }
    }

    /// Element at position `i`.
    pub fn at(&self, index: usize) -> Result<Item> {
        if index >= self.len() {
            return Err(Error::Index {
                index,
                len: self.len(),
            });
        }
        Ok(self.item(index))
    }

    /// Zero-copy view restricted to `start..stop`.
    pub fn range(&self, start: usize, stop: usize) -> Result<Array> {
        if start > stop {
            return Err(Error::Index {
                index: start,
                len: stop,
            });
        }
        if stop > self.len() {
            return Err(Error::Index {
                index: stop,
                len: self.len(),
            });
        }
        Ok(self.slice(start, stop - start))
    }

    /// Projects the named field of a record array.
    pub fn field(&self, name: &str) -> Result<Array> {
        match self {
            Array::Record(a) => a.field(name).cloned(),
            _ => Err(Error::Field(name.to_string())),
        }
    }

    /// Gather: element `j` of the result is `self.at(indices[j])`.
    /// Indices may repeat and come in any order; the result owns fresh
    /// buffers and `self` is left untouched.
    pub fn carry(&self, indices: &[usize]) -> Result<Array> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::Index { index: bad, len });
        }
        Ok(match self {
            Array::Null(a) => Array::Null(a.gather(indices)),
            Array::Boolean(a) => Array::Boolean(a.gather(indices)),
            Array::Int64(a) => Array::Int64(a.gather(indices)),
            Array::Float64(a) => Array::Float64(a.gather(indices)),
            Array::List(a) => Array::List(a.gather(indices)?),
            Array::Tuple(a) => Array::Tuple(a.gather(indices)?),
            Array::Record(a) => Array::Record(a.gather(indices)?),
            Array::Union(a) => Array::Union(a.gather(indices)?),
        })
    }

    /// Minimum and maximum list-nesting depth reachable from this node.
    /// The two differ when union or record branches nest unevenly.
    pub fn minmax_depth(&self) -> (usize, usize) {
        match self {
            Array::Null(_) | Array::Boolean(_) | Array::Int64(_) | Array::Float64(_) => (1, 1),
            Array::List(a) => {
                let (min, max) = a.values().minmax_depth();
                (min + 1, max + 1)
            }
            Array::Tuple(a) => fold_depth(a.fields().iter()),
            Array::Record(a) => fold_depth(a.fields().iter().map(|(_, f)| f)),
            Array::Union(a) => fold_depth(a.alternatives().iter()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        (0..self.len()).map(|i| self.item(i))
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Array {
        match self {
            Array::Null(a) => Array::Null(a.slice(offset, len)),
            Array::Boolean(a) => Array::Boolean(a.slice(offset, len)),
            Array::Int64(a) => Array::Int64(a.slice(offset, len)),
            Array::Float64(a) => Array::Float64(a.slice(offset, len)),
            Array::List(a) => Array::List(a.slice(offset, len)),
            Array::Tuple(a) => Array::Tuple(a.slice(offset, len)),
            Array::Record(a) => Array::Record(a.slice(offset, len)),
            Array::Union(a) => Array::Union(a.slice(offset, len)),
        }
    }

    // bounds are the caller's responsibility
    fn item(&self, i: usize) -> Item {
        match self {
            Array::Null(_) => Item::Null,
            Array::Boolean(a) => {
                if a.is_valid(i) {
                    Item::Boolean(a.value(i))
                } else {
                    Item::Null
                }
            }
            Array::Int64(a) => {
                if a.is_valid(i) {
                    Item::Int64(a.value(i))
                } else {
                    Item::Null
                }
            }
            Array::Float64(a) => {
                if a.is_valid(i) {
                    Item::Float64(a.value(i))
                } else {
                    Item::Null
                }
            }
            Array::List(a) => {
                if a.is_valid(i) {
                    Item::List(a.item(i))
                } else {
                    Item::Null
                }
            }
            Array::Tuple(a) => {
                if a.is_valid(i) {
                    Item::Tuple(a.fields().iter().map(|f| f.item(i)).collect())
                } else {
                    Item::Null
                }
            }
            Array::Record(a) => {
                if a.is_valid(i) {
                    Item::Record(
                        a.fields()
                            .iter()
                            .map(|(n, f)| (n.clone(), f.item(i)))
                            .collect(),
                    )
                } else {
                    Item::Null
                }
            }
            Array::Union(a) => a.alternatives()[a.tag(i)].item(i),
        }
    }
}


/// Value-wise equality: two arrays are equal when they resolve to equal
/// items at every position, regardless of how the data is buffered.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && (0..self.len()).all(|i| self.item(i) == other.item(i))
    }
}


fn fold_depth<'a>(arrays: impl Iterator<Item = &'a Array>) -> (usize, usize) {
    let mut min = usize::MAX;
    let mut max = 0;
    for array in arrays {
        let (lo, hi) = array.minmax_depth();
        min = min.min(lo);
        max = max.max(hi);
    }
    if max == 0 {
        (1, 1)
    } else {
        (min, max)
    }
}
