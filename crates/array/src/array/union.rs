use crate::array::Array;
use crate::error::Result;
use arrow_buffer::ScalarBuffer;


/// Sparse union: every alternative has the full length of the union and
/// holds nulls at positions tagged for another alternative. `tags[i]`
/// selects the alternative that produced element `i`.
#[derive(Clone, Debug)]
pub struct UnionArray {
    tags: ScalarBuffer<i8>,
    alternatives: Vec<Array>,
}


impl UnionArray {
    pub fn new(tags: ScalarBuffer<i8>, alternatives: Vec<Array>) -> Self {
        for alt in alternatives.iter() {
            assert_eq!(alt.len(), tags.len());
        }
        Self { tags, alternatives }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tags(&self) -> &[i8] {
        &self.tags
    }

    #[inline]
    pub fn tag(&self, i: usize) -> usize {
        self.tags[i] as usize
    }

    pub fn alternatives(&self) -> &[Array] {
        &self.alternatives
    }

    pub(crate) fn slice(&self, offset: usize, len: usize) -> Self {
        Self {
            tags: self.tags.slice(offset, len),
            alternatives: self
                .alternatives
                .iter()
                .map(|a| a.slice(offset, len))
                .collect(),
        }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Result<Self> {
        let tags: Vec<i8> = indices.iter().map(|&i| self.tags[i]).collect();
        let alternatives = self
            .alternatives
            .iter()
            .map(|a| a.carry(indices))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            tags: tags.into(),
            alternatives,
        })
    }
}
