//! Columnar arrays for ragged, dynamically shaped data.
//!
//! A [`Builder`] consumes a flat event stream (values, nulls, container
//! open/close markers) and discovers the column shape as it goes,
//! widening or falling back to unions when the data disagrees with
//! itself. [`Builder::finish`] and [`Builder::snapshot`] produce an
//! immutable [`Array`] that supports zero-copy slicing, gathering and
//! element access.
//!
//! ```
//! use ragged_array::Builder;
//!
//! let mut b = Builder::default();
//! b.begin_list()?;
//! b.integer(1)?;
//! b.integer(2)?;
//! b.end_list()?;
//! b.null()?;
//! b.begin_list()?;
//! b.real(3.5)?;
//! b.end_list()?;
//!
//! let array = b.finish();
//! assert_eq!(array.len(), 3);
//! # Ok::<(), ragged_array::Error>(())
//! ```

pub mod array;
pub mod builder;
mod buffer;
mod error;
mod nullmask;
mod offsets;
mod types;

pub use array::{Array, Item};
pub use buffer::{BufferOptions, GrowableBuffer};
pub use builder::Builder;
pub use error::{Error, Result};
pub use nullmask::{Nullmask, NullmaskBuilder};
pub use offsets::{Offsets, OffsetsBuilder};
pub use types::DataType;
