//! Scalar values as seen through the column interface.

use crate::{ElementsError, Result};

/// The type discriminant of a column.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Bool,
    Int,
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Int => f.write_str("int"),
        }
    }
}

/// A raw value of some column's native type.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
}

impl Scalar {
    #[inline] pub fn ty(&self) -> Type {
        match self {
            Scalar::Bool(_) => Type::Bool,
            Scalar::Int(_) => Type::Int,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self { Scalar::Bool(value) }
}
impl From<i64> for Scalar {
    fn from(value: i64) -> Self { Scalar::Int(value) }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Bool(value) => std::fmt::Display::fmt(value, f),
            Scalar::Int(value) => std::fmt::Display::fmt(value, f),
        }
    }
}

/// The element found at one position of a column.
///
/// `value` is the concrete value when the element is present. For missing elements it holds
/// whatever the encoding carries: the sentinel for integers, `false` for booleans.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElementValue {
    pub value: Scalar,
    /// The element is the type's not-a-value marker.
    pub is_nan: bool,
    /// The element is an explicitly absent boolean. Never set for integers.
    pub is_null: bool,
}

impl ElementValue {
    #[inline] pub fn ty(&self) -> Type { self.value.ty() }
    /// Whether the element is either kind of missing.
    #[inline] pub fn is_missing(&self) -> bool { self.is_nan || self.is_null }
}

impl From<BitBool> for ElementValue {
    fn from(state: BitBool) -> Self {
        ElementValue {
            value: Scalar::Bool(state == BitBool::True),
            is_nan: state == BitBool::NaN,
            is_null: state == BitBool::Null,
        }
    }
}

/// One of the four states a packed boolean slot can hold.
///
/// The discriminants are the 2-bit slot codes written by [`crate::masks`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BitBool {
    False = 0b00,
    NaN = 0b01,
    Null = 0b10,
    True = 0b11,
}

impl BitBool {
    #[inline(always)] pub const fn code(self) -> u8 { self as u8 }
    /// The concrete boolean, if the state is `True` or `False`.
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            BitBool::True => Some(true),
            BitBool::False => Some(false),
            _ => None,
        }
    }
}

impl From<bool> for BitBool {
    #[inline(always)] fn from(value: bool) -> Self { if value { BitBool::True } else { BitBool::False } }
}

impl TryFrom<u8> for BitBool {
    type Error = ElementsError;
    fn try_from(code: u8) -> Result<Self> {
        match code {
            0b00 => Ok(BitBool::False),
            0b01 => Ok(BitBool::NaN),
            0b10 => Ok(BitBool::Null),
            0b11 => Ok(BitBool::True),
            other => Err(ElementsError::InvalidState(other)),
        }
    }
}

impl std::fmt::Display for BitBool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BitBool::False => f.write_str("false"),
            BitBool::True => f.write_str("true"),
            BitBool::NaN => f.write_str("NaN"),
            BitBool::Null => f.write_str("Null"),
        }
    }
}
