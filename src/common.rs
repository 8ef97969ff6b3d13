//! Common traits and types that are re-used throughout the module.

use crate::{ElementsError, Result};

/// A type with a length.
pub trait Len {
    /// The number of contained elements.
    fn len(&self) -> usize;
    /// Whether this contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl<L: Len + ?Sized> Len for &L {
    #[inline(always)] fn len(&self) -> usize { L::len(*self) }
}
impl<L: Len + ?Sized> Len for &mut L {
    #[inline(always)] fn len(&self) -> usize { L::len(*self) }
}

/// A type that can accept items of type `T`.
pub trait Push<T> {
    /// Pushes an item onto `self`.
    fn push(&mut self, item: T);
    /// Pushes elements of an iterator onto `self`.
    #[inline(always)] fn extend(&mut self, iter: impl IntoIterator<Item=T>) {
        for item in iter {
            self.push(item);
        }
    }
}

/// A type that can reset its contents without releasing storage.
pub trait Clear {
    /// Clears `self`, without changing its capacity.
    fn clear(&mut self);
}

pub trait HeapSize {
    /// Active (len) and allocated (cap) heap sizes in bytes.
    /// This should not include the size of `self` itself.
    fn heap_size(&self) -> (usize, usize) { (0, 0) }
}

macro_rules! implement_heapsize {
    ($($index_type:ty),*) => { $(
        impl HeapSize for $index_type { }
    )* }
}

implement_heapsize!(u8, u32, u64, i64);

impl<T: HeapSize> HeapSize for Vec<T> {
    fn heap_size(&self) -> (usize, usize) {
        let mut l = std::mem::size_of::<T>() * self.len();
        let mut c = std::mem::size_of::<T>() * self.capacity();
        for item in (self[..]).iter() {
            let (il, ic) = item.heap_size();
            l += il;
            c += ic;
        }
        (l, c)
    }
}

/// A type whose backing storage can be viewed as byte slices.
pub trait AsBytes {
    /// Presents `self` as a sequence of byte slices, with their required alignment.
    fn as_bytes(&self) -> impl Iterator<Item=(u64, &[u8])>;
}

/// A type that can be rebuilt from the byte slices produced by [`AsBytes`].
///
/// Unlike a zero-copy view, implementations copy the bytes into owned storage,
/// so the slices need not be aligned.
pub trait FromBytes<'a> : Sized {
    /// Reconstructs `self` from a sequence of byte slices.
    ///
    /// The implementation is expected to consume the right number of items from the iterator,
    /// which may go on to be used by other implementations of `FromBytes`.
    fn from_bytes(bytes: &mut impl Iterator<Item=&'a [u8]>) -> Result<Self>;
}

/// Reads `bytes` as a sequence of native-endian `W` words.
pub(crate) fn words_from_bytes<W: bytemuck::Pod>(bytes: &[u8]) -> Result<Vec<W>> {
    let width = std::mem::size_of::<W>();
    if bytes.len() % width != 0 {
        return Err(ElementsError::ByteLength { len: bytes.len(), width });
    }
    // `try_cast_slice` only succeeds for aligned input; otherwise copy word by word.
    match bytemuck::try_cast_slice::<u8, W>(bytes) {
        Ok(words) => Ok(words.to_vec()),
        Err(_) => Ok(bytes.chunks_exact(width).map(bytemuck::pod_read_unaligned).collect()),
    }
}
