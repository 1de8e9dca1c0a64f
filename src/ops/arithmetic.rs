//! Arithmetic operation helpers
//!
//! This module contains the operation kind shared by the element-wise engine
//! and the kernels. The tensor-level methods live in `elementwise`.

use crate::dtype::Numeric;
use crate::error::{Error, Result};

/// Binary operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b
    Div,
}

impl BinaryOp {
    /// Operation name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
        }
    }

    /// Apply the operation to one pair of elements
    ///
    /// Integer overflow wraps, see [`Numeric`].
    ///
    /// # Errors
    /// [`Error::DivideByZero`] for `Div` when `b` is zero.
    #[inline]
    pub fn apply<T: Numeric>(self, a: T, b: T) -> Result<T> {
        Ok(match self {
            Self::Add => a.elem_add(b),
            Self::Sub => a.elem_sub(b),
            Self::Mul => a.elem_mul(b),
            Self::Div => {
                if b.is_zero() {
                    return Err(Error::DivideByZero);
                }
                a.elem_div(b)
            }
        })
    }
}

/// Which side of the operation a scalar operand sits on
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScalarSide {
    /// `tensor ⊕ scalar`
    Right,
    /// `scalar ⊕ tensor` (reflected)
    Left,
}

impl ScalarSide {
    #[inline]
    pub(crate) fn apply<T: Numeric>(self, op: BinaryOp, elem: T, scalar: T) -> Result<T> {
        match self {
            Self::Right => op.apply(elem, scalar),
            Self::Left => op.apply(scalar, elem),
        }
    }
}
