//! Typed element storage for one column of a columnar data library.
//!
//! A column holds an ordered run of scalar values, any of which may be missing.
//! Two encodings are provided: [`BoolColumn`] packs four-state booleans
//! (`False`, `True`, `NaN`, `Null`) into 2-bit slots of `u32` chunks, and
//! [`IntColumn`] stores `i64` values with [`NAN_INT`] reserved as the missing marker.
//!
//! Higher layers talk to columns only through the [`Elements`] trait, or through
//! the closed [`Column`] enum when the concrete type is chosen at runtime.

pub mod common;
pub mod error;
pub mod masks;
pub mod value;
pub mod boolean;
pub mod integer;

pub use common::{Len, Push, Clear, HeapSize, AsBytes, FromBytes};
pub use error::{ElementsError, Result};
pub use value::{Type, Scalar, ElementValue, BitBool};
pub use boolean::BoolColumn;
pub use integer::{IntColumn, NAN_INT};

/// The operations every column offers to the layers above it.
///
/// Positions are logical: they range over `0 .. self.len()`, independent of how much
/// storage the column has reserved. Columns are values; the only mutating operations
/// are `swap` and `append`, and `appended` is available when the receiver must stay intact.
pub trait Elements : Len + Clone + std::fmt::Display {
    /// The type discriminant of the stored values.
    fn ty(&self) -> Type;
    /// A column with independent storage and identical contents.
    #[inline(always)] fn copy(&self) -> Self { self.clone() }
    /// The values at `indices`, in the order given.
    ///
    /// Fails if more indices are requested than the column holds, or if any index is out of bounds.
    fn subset(&self, indices: &[usize]) -> Result<Self>;
    /// For each logical position, whether it holds the type's not-a-value marker.
    fn is_nan(&self) -> Vec<bool>;
    /// The element at `position`.
    fn location(&self, position: usize) -> Result<ElementValue>;
    /// Exchanges the elements at `i` and `j`. Nothing is written unless both positions are valid.
    fn swap(&mut self, i: usize, j: usize) -> Result<()>;
    /// Appends `values` to `self` in place.
    ///
    /// Every value must have the column's type; otherwise nothing is appended.
    fn append(&mut self, values: &[Scalar]) -> Result<()>;
    /// Appends `values` to a copy of `self`, leaving `self` untouched.
    fn appended(&self, values: &[Scalar]) -> Result<Self> {
        let mut copy = self.copy();
        copy.append(values)?;
        Ok(copy)
    }
}

/// A column whose concrete encoding is selected by its [`Type`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Column {
    Bool(BoolColumn),
    Int(IntColumn),
}

macro_rules! dispatch {
    ($self:expr, $col:ident => $body:expr) => {
        match $self {
            Column::Bool($col) => $body,
            Column::Int($col) => $body,
        }
    };
}

impl Column {
    /// An empty column of type `ty`.
    pub fn new(ty: Type) -> Self {
        match ty {
            Type::Bool => Column::Bool(BoolColumn::new()),
            Type::Int => Column::Int(IntColumn::new()),
        }
    }
}

impl From<BoolColumn> for Column {
    fn from(column: BoolColumn) -> Self { Column::Bool(column) }
}
impl From<IntColumn> for Column {
    fn from(column: IntColumn) -> Self { Column::Int(column) }
}

impl Len for Column {
    #[inline(always)] fn len(&self) -> usize { dispatch!(self, c => c.len()) }
}

impl HeapSize for Column {
    fn heap_size(&self) -> (usize, usize) { dispatch!(self, c => c.heap_size()) }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, c => std::fmt::Display::fmt(c, f))
    }
}

impl Elements for Column {
    fn ty(&self) -> Type { dispatch!(self, c => c.ty()) }
    fn subset(&self, indices: &[usize]) -> Result<Self> {
        match self {
            Column::Bool(c) => c.subset(indices).map(Column::Bool),
            Column::Int(c) => c.subset(indices).map(Column::Int),
        }
    }
    fn is_nan(&self) -> Vec<bool> { dispatch!(self, c => c.is_nan()) }
    fn location(&self, position: usize) -> Result<ElementValue> { dispatch!(self, c => c.location(position)) }
    fn swap(&mut self, i: usize, j: usize) -> Result<()> { dispatch!(self, c => c.swap(i, j)) }
    fn append(&mut self, values: &[Scalar]) -> Result<()> { dispatch!(self, c => c.append(values)) }
}
