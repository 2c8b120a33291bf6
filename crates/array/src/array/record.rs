use crate::array::Array;
use crate::error::{Error, Result};
use crate::nullmask::Nullmask;


/// Positional product type: equal-length sibling children, one per slot.
#[derive(Clone, Debug)]
pub struct TupleArray {
    fields: Vec<Array>,
    nulls: Nullmask,
}


impl TupleArray {
    pub fn new(fields: Vec<Array>, nulls: Nullmask) -> Self {
        for field in fields.iter() {
            assert_eq!(field.len(), nulls.len());
        }
        Self { fields, nulls }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fields(&self) -> &[Array] {
        &self.fields
    }

    pub fn nulls(&self) -> &Nullmask {
        &self.nulls
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.nulls.is_valid(i)
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Self {
        Self {
            fields: self.fields.iter().map(|f| f.slice(offset, len)).collect(),
            nulls: self.nulls.slice(offset, len),
        }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Result<Self> {
        let fields = self
            .fields
            .iter()
            .map(|f| f.carry(indices))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            fields,
            nulls: self.nulls.gather(indices),
        })
    }
}


/// Keyed product type. Field order is the order in which the fields were
/// first seen during building.
#[derive(Clone, Debug)]
pub struct RecordArray {
    fields: Vec<(String, Array)>,
    nulls: Nullmask,
}


impl RecordArray {
    pub fn new(fields: Vec<(String, Array)>, nulls: Nullmask) -> Self {
        for (_, field) in fields.iter() {
            assert_eq!(field.len(), nulls.len());
        }
        Self { fields, nulls }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fields(&self) -> &[(String, Array)] {
        &self.fields
    }

    pub fn nulls(&self) -> &Nullmask {
        &self.nulls
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.nulls.is_valid(i)
    }

    /// Projects the named child. Same length as the record itself.
    pub fn field(&self, name: &str) -> Result<&Array> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
            .ok_or_else(|| Error::Field(name.to_string()))
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(n, f)| (n.clone(), f.slice(offset, len)))
                .collect(),
            nulls: self.nulls.slice(offset, len),
        }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Result<Self> {
        let fields = self
            .fields
            .iter()
            .map(|(n, f)| Ok((n.clone(), f.carry(indices)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            fields,
            nulls: self.nulls.gather(indices),
        })
    }
}
