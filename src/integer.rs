//! A columnar store for integers, with a sentinel for missing values.
//!
//! Integers have no spare state to mark absence, so one value, [`NAN_INT`], is reserved for it.
//! Callers must not store `NAN_INT` as data.

use smallvec::SmallVec;

use crate::{AsBytes, Clear, Elements, ElementValue, ElementsError, FromBytes, HeapSize, Len, Push, Result, Scalar, Type};

/// The value that marks a missing integer.
pub const NAN_INT: i64 = i64::MIN;

/// A store for maintaining `Vec<i64>` with [`NAN_INT`] as the missing marker.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntColumn {
    values: Vec<i64>,
}

impl IntColumn {
    pub fn new() -> Self { Self::default() }

    /// The stored values, sentinels included.
    #[inline(always)] pub fn values(&self) -> &[i64] { &self.values[..] }

    /// The raw value at `position`, which may be the sentinel.
    pub fn get(&self, position: usize) -> Result<i64> {
        self.values
            .get(position)
            .copied()
            .ok_or(ElementsError::InvalidIndex { index: position, len: self.values.len() })
    }

    /// An iterator over the elements, with the sentinel read as `None`.
    pub fn iter(&self) -> impl Iterator<Item=Option<i64>> + '_ {
        self.values.iter().map(|value| if *value == NAN_INT { None } else { Some(*value) })
    }
}

impl Len for IntColumn {
    #[inline(always)] fn len(&self) -> usize { self.values.len() }
}

impl Push<i64> for IntColumn {
    #[inline(always)] fn push(&mut self, item: i64) { self.values.push(item) }
    #[inline(always)]
    fn extend(&mut self, iter: impl IntoIterator<Item=i64>) {
        std::iter::Extend::extend(&mut self.values, iter)
    }
}

impl Clear for IntColumn {
    #[inline(always)] fn clear(&mut self) { self.values.clear() }
}

impl HeapSize for IntColumn {
    fn heap_size(&self) -> (usize, usize) { self.values.heap_size() }
}

impl Elements for IntColumn {
    #[inline(always)] fn ty(&self) -> Type { Type::Int }

    fn subset(&self, indices: &[usize]) -> Result<Self> {
        let len = self.values.len();
        if indices.len() > len {
            return Err(ElementsError::SizeMismatch { requested: indices.len(), available: len });
        }
        let values = indices
            .iter()
            .map(|index| self.get(*index))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.context("subset"))?;
        Ok(Self { values })
    }

    fn is_nan(&self) -> Vec<bool> {
        self.values.iter().map(|value| *value == NAN_INT).collect()
    }

    fn location(&self, position: usize) -> Result<ElementValue> {
        let value = self.get(position).map_err(|e| e.context("location"))?;
        Ok(ElementValue { value: Scalar::Int(value), is_nan: value == NAN_INT, is_null: false })
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.get(i).and(self.get(j)).map_err(|e| e.context("swap"))?;
        self.values.swap(i, j);
        Ok(())
    }

    fn append(&mut self, values: &[Scalar]) -> Result<()> {
        let ints = values
            .iter()
            .map(|value| match value {
                Scalar::Int(int) => Ok(*int),
                other => Err(ElementsError::TypeMismatch { expected: Type::Int, found: other.ty() }),
            })
            .collect::<Result<SmallVec<[i64; 16]>>>()?;
        self.values.extend_from_slice(&ints[..]);
        Ok(())
    }
}

impl From<Vec<i64>> for IntColumn {
    fn from(values: Vec<i64>) -> Self { Self { values } }
}

impl FromIterator<i64> for IntColumn {
    fn from_iter<I: IntoIterator<Item=i64>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

/// Missing values become [`NAN_INT`].
impl FromIterator<Option<i64>> for IntColumn {
    fn from_iter<I: IntoIterator<Item=Option<i64>>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|value| value.unwrap_or(NAN_INT)).collect() }
    }
}

impl std::fmt::Display for IntColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (position, value) in self.iter().enumerate() {
            if position > 0 { f.write_str(" ")?; }
            match value {
                Some(value) => write!(f, "{}", value)?,
                None => f.write_str("NaN")?,
            }
        }
        f.write_str("]")
    }
}

impl AsBytes for IntColumn {
    fn as_bytes(&self) -> impl Iterator<Item=(u64, &[u8])> {
        std::iter::once((std::mem::align_of::<i64>() as u64, bytemuck::cast_slice(&self.values[..])))
    }
}
impl<'a> FromBytes<'a> for IntColumn {
    fn from_bytes(bytes: &mut impl Iterator<Item=&'a [u8]>) -> Result<Self> {
        let bytes = bytes.next().ok_or(ElementsError::BytesExhausted)?;
        Ok(Self { values: crate::common::words_from_bytes(bytes)? })
    }
}
