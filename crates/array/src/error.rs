use thiserror::Error;


pub type Result<T, E = Error> = std::result::Result<T, E>;


/// Failure taxonomy of the crate.
///
/// Type mismatches during building are never errors - the builder absorbs
/// them by promoting its own shape. Only grammar violations, out-of-bounds
/// access and failed bulk reservations surface here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("event sequence violation: {0}")]
    Sequence(&'static str),

    #[error("index {index} is out of bounds for length {len}")]
    Index { index: usize, len: usize },

    #[error("no field named `{0}`")]
    Field(String),

    #[error("failed to reserve {bytes} bytes")]
    Allocation { bytes: usize },
}
