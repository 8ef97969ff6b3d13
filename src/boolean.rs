//! A columnar store for four-state booleans.
//!
//! Each element is a [`BitBool`] packed into a 2-bit slot of a `u32` chunk. The column does not
//! record its length: it is derived from the chunks by finding the first `Null` slot of the last
//! chunk. Unused capacity is always filled with `Null`, so the reserved tail of the last chunk
//! reads as "not yet written".
//!
//! One consequence is that an explicit `Null` stored in the last chunk truncates the column at
//! that position, exactly as if the slots from there on had never been written. `Null` values
//! in earlier chunks are counted normally.

use smallvec::SmallVec;

use crate::masks::{self, Chunk, CHUNK_NULL, SLOTS_PER_CHUNK};
use crate::{AsBytes, BitBool, Clear, Elements, ElementValue, ElementsError, FromBytes, HeapSize, Len, Push, Result, Scalar, Type};

/// A store for maintaining `Vec<BitBool>` at two bits per element.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoolColumn {
    /// Packed slots; `chunks.len() * SLOTS_PER_CHUNK` is the capacity.
    chunks: Vec<Chunk>,
}

impl BoolColumn {
    /// An empty column with no allocated chunks.
    pub fn new() -> Self { Self::default() }

    /// A column with room for at least `slots` elements, all `Null`.
    ///
    /// Only the last chunk is scanned for the length, so every chunk before it counts as full:
    /// a column reserved for more than one chunk reports `Null` elements up to the last chunk.
    pub fn with_capacity(slots: usize) -> Self {
        Self { chunks: vec![CHUNK_NULL; masks::chunks_for(slots)] }
    }

    /// The number of addressable slots, a whole multiple of `SLOTS_PER_CHUNK`.
    #[inline(always)] pub fn capacity(&self) -> usize { self.chunks.len() * SLOTS_PER_CHUNK }

    /// The packed storage.
    #[inline(always)] pub fn chunks(&self) -> &[Chunk] { &self.chunks[..] }

    /// The state at logical position `position`.
    pub fn get(&self, position: usize) -> Result<BitBool> {
        let len = self.len();
        if position >= len {
            return Err(ElementsError::InvalidIndex { index: position, len });
        }
        Ok(self.read(position))
    }

    /// Writes `state` at `position`, which may lie anywhere within the capacity.
    ///
    /// Writing past the current length does not extend it unless the slots between are filled;
    /// writing `Null` into the last chunk shortens it.
    pub fn set(&mut self, position: usize, state: BitBool) -> Result<()> {
        let capacity = self.capacity();
        if position >= capacity {
            return Err(ElementsError::InvalidIndex { index: position, len: capacity });
        }
        self.write(position, state);
        Ok(())
    }

    /// As `set`, from a raw 2-bit state code.
    pub fn set_code(&mut self, position: usize, code: u8) -> Result<()> {
        self.set(position, BitBool::try_from(code)?)
    }

    /// An iterator over the states of the logical elements.
    pub fn iter(&self) -> impl Iterator<Item=BitBool> + '_ {
        (0 .. self.len()).map(move |position| self.read(position))
    }

    #[inline(always)]
    fn read(&self, position: usize) -> BitBool {
        let (chunk, slot) = masks::locate(position);
        masks::decode(self.chunks[chunk], slot)
    }

    #[inline(always)]
    fn write(&mut self, position: usize, state: BitBool) {
        let (chunk, slot) = masks::locate(position);
        self.chunks[chunk] = masks::encode(self.chunks[chunk], slot, state);
    }

    /// Adds `Null` chunks until at least `slots` slots are addressable.
    fn reserve_slots(&mut self, slots: usize) {
        let needed = masks::chunks_for(slots);
        if needed > self.chunks.len() {
            log::trace!("growing bool column from {} to {} chunks", self.chunks.len(), needed);
            self.chunks.resize(needed, CHUNK_NULL);
        }
    }

    /// Writes `bits` at the positions following the current length.
    fn append_bits(&mut self, bits: &[bool]) {
        let start = self.len();
        self.reserve_slots(start + bits.len());
        for (offset, bit) in bits.iter().enumerate() {
            self.write(start + offset, BitBool::from(*bit));
        }
    }
}

impl Len for BoolColumn {
    fn len(&self) -> usize {
        match self.chunks.split_last() {
            Some((last, full)) => full.len() * SLOTS_PER_CHUNK + masks::leading_len(*last),
            None => 0,
        }
    }
}

impl Push<bool> for BoolColumn {
    #[inline] fn push(&mut self, bit: bool) { self.append_bits(&[bit]) }
    fn extend(&mut self, iter: impl IntoIterator<Item=bool>) {
        let bits: SmallVec<[bool; SLOTS_PER_CHUNK]> = iter.into_iter().collect();
        self.append_bits(&bits[..]);
    }
}

impl Clear for BoolColumn {
    /// Resets every slot to `Null`, keeping the allocated chunks.
    fn clear(&mut self) { self.chunks.fill(CHUNK_NULL) }
}

impl HeapSize for BoolColumn {
    fn heap_size(&self) -> (usize, usize) { self.chunks.heap_size() }
}

impl Elements for BoolColumn {
    #[inline(always)] fn ty(&self) -> Type { Type::Bool }

    fn subset(&self, indices: &[usize]) -> Result<Self> {
        let len = self.len();
        if indices.len() > len {
            return Err(ElementsError::SizeMismatch { requested: indices.len(), available: len });
        }
        let mut subset = BoolColumn::with_capacity(indices.len());
        log::trace!("subset of {} bools into {} chunks", indices.len(), subset.chunks.len());
        for (position, index) in indices.iter().enumerate() {
            if *index >= len {
                return Err(ElementsError::InvalidIndex { index: *index, len }.context("subset"));
            }
            subset.write(position, self.read(*index));
        }
        Ok(subset)
    }

    fn is_nan(&self) -> Vec<bool> {
        self.iter().map(|state| state == BitBool::NaN).collect()
    }

    fn location(&self, position: usize) -> Result<ElementValue> {
        self.get(position).map(ElementValue::from).map_err(|e| e.context("location"))
    }

    fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        let a = self.get(i).map_err(|e| e.context("swap"))?;
        let b = self.get(j).map_err(|e| e.context("swap"))?;
        self.write(i, b);
        self.write(j, a);
        Ok(())
    }

    fn append(&mut self, values: &[Scalar]) -> Result<()> {
        let bits = values
            .iter()
            .map(|value| match value {
                Scalar::Bool(bit) => Ok(*bit),
                other => Err(ElementsError::TypeMismatch { expected: Type::Bool, found: other.ty() }),
            })
            .collect::<Result<SmallVec<[bool; SLOTS_PER_CHUNK]>>>()?;
        self.append_bits(&bits[..]);
        Ok(())
    }
}

impl FromIterator<bool> for BoolColumn {
    fn from_iter<I: IntoIterator<Item=bool>>(iter: I) -> Self {
        let mut column = BoolColumn::new();
        column.extend(iter);
        column
    }
}

impl From<Vec<bool>> for BoolColumn {
    fn from(bits: Vec<bool>) -> Self {
        let mut column = BoolColumn::new();
        column.append_bits(&bits[..]);
        column
    }
}

/// Packs states in order. A `Null` that lands in the last chunk truncates the column there.
impl FromIterator<BitBool> for BoolColumn {
    fn from_iter<I: IntoIterator<Item=BitBool>>(iter: I) -> Self {
        let states: Vec<BitBool> = iter.into_iter().collect();
        let mut column = BoolColumn::with_capacity(states.len());
        for (position, state) in states.into_iter().enumerate() {
            column.write(position, state);
        }
        column
    }
}

impl std::fmt::Display for BoolColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (position, state) in self.iter().enumerate() {
            if position > 0 { f.write_str(" ")?; }
            std::fmt::Display::fmt(&state, f)?;
        }
        f.write_str("]")
    }
}

impl AsBytes for BoolColumn {
    fn as_bytes(&self) -> impl Iterator<Item=(u64, &[u8])> {
        std::iter::once((std::mem::align_of::<Chunk>() as u64, bytemuck::cast_slice(&self.chunks[..])))
    }
}
impl<'a> FromBytes<'a> for BoolColumn {
    fn from_bytes(bytes: &mut impl Iterator<Item=&'a [u8]>) -> Result<Self> {
        let bytes = bytes.next().ok_or(ElementsError::BytesExhausted)?;
        Ok(Self { chunks: crate::common::words_from_bytes(bytes)? })
    }
}
