//! Data type tags for stridr tensors
//!
//! This module provides the `DType` enum identifying the element type of a
//! tensor at runtime, and the [`Element`] trait that maps Rust scalar types to
//! it at compile time.

mod element;

pub use element::{Element, Numeric};

use std::fmt;

// ============================================================================
// DType Enum
// ============================================================================

/// Element types recognized by stridr tensors
///
/// The tag is informational only: tensors are generic over their element type,
/// and the tag is stamped from [`Element::DTYPE`] when a tensor is built.
///
/// # Discriminant Values
///
/// - Floats: F64=0, F32=1
/// - Signed ints: I64=10, I32=11
/// - Unsigned ints: U8=23
/// - Bool: 30
/// - Unknown: 255
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// 64-bit signed integer
    I64 = 10,
    /// 32-bit signed integer
    I32 = 11,
    /// 8-bit unsigned integer
    U8 = 23,
    /// Boolean
    Bool = 30,
    /// Element type without a dedicated tag
    Unknown = 255,
}

impl DType {
    /// Size of one element in bytes, if the tag identifies a concrete type
    #[inline]
    pub const fn size_in_bytes(self) -> Option<usize> {
        match self {
            Self::F64 | Self::I64 => Some(8),
            Self::F32 | Self::I32 => Some(4),
            Self::U8 | Self::Bool => Some(1),
            Self::Unknown => None,
        }
    }

    /// Returns true for floating point tags
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F64 | Self::F32)
    }

    /// Returns true for integer tags (signed or unsigned)
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::I64 | Self::I32 | Self::U8)
    }

    /// Returns true for the boolean tag
    #[inline]
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Returns true when the element type has no dedicated tag
    #[inline]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Short name used in Display output
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
            Self::U8 => "u8",
            Self::Bool => "bool",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
