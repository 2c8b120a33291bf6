/// Shape of an array or of an in-progress builder.
///
/// `Null` is the shape of data about which nothing is known yet - a builder
/// that has only seen `null` events, or a fresh one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataType {
    Null,
    Boolean,
    Int64,
    Float64,
    List(Box<DataType>),
    Tuple(Vec<DataType>),
    Record(Vec<(String, DataType)>),
    Union(Vec<DataType>),
}


impl DataType {
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DataType::Boolean | DataType::Int64 | DataType::Float64
        )
    }
}
