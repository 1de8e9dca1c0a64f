//! Element-wise arithmetic on tensors
//!
//! Every operation branches once on the operands' contiguity: contiguous
//! operands are swept linearly from their offsets, anything else is walked
//! with an [`Odometer`] that maps the shared logical index through each
//! operand's own strides.
//!
//! Out-of-place results are fresh, contiguous tensors. In-place variants write
//! through the receiver's own layout, so other views of its buffer observe the
//! update.

use super::arithmetic::{BinaryOp, ScalarSide};
use crate::dtype::Numeric;
use crate::error::{Error, Result};
use crate::tensor::{Odometer, StridedOffsets, Tensor};

impl<T: Numeric> Tensor<T> {
    // ===== Tensor ⊕ Tensor (out-of-place) =====

    /// Element-wise sum into a new tensor
    ///
    /// # Errors
    /// [`Error::ShapeMismatch`] if the shapes differ (no broadcasting).
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, BinaryOp::Add)
    }

    /// Element-wise difference into a new tensor
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, BinaryOp::Sub)
    }

    /// Element-wise product into a new tensor
    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, BinaryOp::Mul)
    }

    /// Element-wise quotient into a new tensor
    ///
    /// # Errors
    /// - [`Error::ShapeMismatch`] if the shapes differ
    /// - [`Error::DivideByZero`] if any element of `other` is zero; no tensor
    ///   is returned in that case
    pub fn div(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, BinaryOp::Div)
    }

    // ===== Tensor ⊕ Scalar (out-of-place) =====

    /// Add `scalar` to every element
    pub fn add_scalar(&self, scalar: T) -> Result<Self> {
        self.scalar_map(BinaryOp::Add, scalar, ScalarSide::Right)
    }

    /// Subtract `scalar` from every element
    pub fn sub_scalar(&self, scalar: T) -> Result<Self> {
        self.scalar_map(BinaryOp::Sub, scalar, ScalarSide::Right)
    }

    /// Multiply every element by `scalar`
    pub fn mul_scalar(&self, scalar: T) -> Result<Self> {
        self.scalar_map(BinaryOp::Mul, scalar, ScalarSide::Right)
    }

    /// Divide every element by `scalar`
    ///
    /// # Errors
    /// [`Error::DivideByZero`] if `scalar` is zero, even for empty tensors.
    pub fn div_scalar(&self, scalar: T) -> Result<Self> {
        if scalar.is_zero() {
            return Err(Error::DivideByZero);
        }
        self.scalar_map(BinaryOp::Div, scalar, ScalarSide::Right)
    }

    /// `scalar - x` for every element `x`
    pub fn rsub(&self, scalar: T) -> Result<Self> {
        self.scalar_map(BinaryOp::Sub, scalar, ScalarSide::Left)
    }

    /// `scalar / x` for every element `x`
    ///
    /// # Errors
    /// [`Error::DivideByZero`] if any element is zero.
    pub fn rdiv(&self, scalar: T) -> Result<Self> {
        self.scalar_map(BinaryOp::Div, scalar, ScalarSide::Left)
    }

    // ===== Tensor ⊕= Tensor (in-place) =====

    /// Add `other` into `self` element-wise
    ///
    /// # Errors
    /// [`Error::ShapeMismatch`] if the shapes differ.
    pub fn add_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_assign(other, BinaryOp::Add)
    }

    /// Subtract `other` from `self` element-wise
    pub fn sub_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_assign(other, BinaryOp::Sub)
    }

    /// Multiply `self` by `other` element-wise
    pub fn mul_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_assign(other, BinaryOp::Mul)
    }

    /// Divide `self` by `other` element-wise
    ///
    /// The divisor is scanned before anything is written, so a zero divisor
    /// leaves `self` untouched.
    ///
    /// # Errors
    /// - [`Error::ShapeMismatch`] if the shapes differ
    /// - [`Error::DivideByZero`] if any element of `other` is zero
    pub fn div_assign(&mut self, other: &Self) -> Result<()> {
        self.zip_assign(other, BinaryOp::Div)
    }

    // ===== Tensor ⊕= Scalar (in-place) =====

    /// Add `scalar` to every element in place
    pub fn add_scalar_assign(&mut self, scalar: T) -> Result<()> {
        self.scalar_assign(BinaryOp::Add, scalar)
    }

    /// Subtract `scalar` from every element in place
    pub fn sub_scalar_assign(&mut self, scalar: T) -> Result<()> {
        self.scalar_assign(BinaryOp::Sub, scalar)
    }

    /// Multiply every element by `scalar` in place
    pub fn mul_scalar_assign(&mut self, scalar: T) -> Result<()> {
        self.scalar_assign(BinaryOp::Mul, scalar)
    }

    /// Divide every element by `scalar` in place
    ///
    /// # Errors
    /// [`Error::DivideByZero`] if `scalar` is zero; nothing is written.
    pub fn div_scalar_assign(&mut self, scalar: T) -> Result<()> {
        if scalar.is_zero() {
            return Err(Error::DivideByZero);
        }
        self.scalar_assign(BinaryOp::Div, scalar)
    }

    // ===== Engine =====

    fn check_same_shape(&self, other: &Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::shape_mismatch(self.shape(), other.shape()));
        }
        Ok(())
    }

    fn zip_map(&self, other: &Self, op: BinaryOp) -> Result<Self> {
        self.check_same_shape(other)?;
        let contiguous = self.is_contiguous() && other.is_contiguous();
        tracing::trace!(op = op.name(), shape = ?self.shape(), contiguous, "elementwise");

        let result = Tensor::new(self.shape());
        {
            let mut out = result.storage().borrow_mut();
            let a = self.storage().try_borrow()?;
            let b = other.storage().try_borrow()?;
            let n = self.size();

            if contiguous {
                let (ao, bo) = (self.offset(), other.offset());
                for i in 0..n {
                    out[i] = op.apply(a[ao + i], b[bo + i])?;
                }
            } else {
                let (am, bm) = (self.metadata(), other.metadata());
                let mut odometer = Odometer::new(self.shape());
                let mut i = 0;
                while let Some(index) = odometer.next_index() {
                    out[i] = op.apply(a[am.offset_of(index)], b[bm.offset_of(index)])?;
                    i += 1;
                }
            }
        }
        Ok(result)
    }

    fn scalar_map(&self, op: BinaryOp, scalar: T, side: ScalarSide) -> Result<Self> {
        tracing::trace!(
            op = op.name(),
            shape = ?self.shape(),
            contiguous = self.is_contiguous(),
            reflected = side == ScalarSide::Left,
            "elementwise scalar"
        );

        let result = Tensor::new(self.shape());
        {
            let mut out = result.storage().borrow_mut();
            let a = self.storage().try_borrow()?;

            if self.is_contiguous() {
                let ao = self.offset();
                for i in 0..self.size() {
                    out[i] = side.apply(op, a[ao + i], scalar)?;
                }
            } else {
                for (i, pos) in StridedOffsets::new(self.metadata()).enumerate() {
                    out[i] = side.apply(op, a[pos], scalar)?;
                }
            }
        }
        Ok(result)
    }

    fn zip_assign(&mut self, other: &Self, op: BinaryOp) -> Result<()> {
        self.check_same_shape(other)?;
        if self.shares_storage(other) {
            // Read the right operand before any of it is overwritten
            let values = other.gather(&other.storage().try_borrow()?);
            let snapshot = Tensor::from_vec(values, other.shape())?;
            return self.zip_assign(&snapshot, op);
        }
        if op == BinaryOp::Div && other.has_zero()? {
            return Err(Error::DivideByZero);
        }

        let contiguous = self.is_contiguous() && other.is_contiguous();
        tracing::trace!(op = op.name(), shape = ?self.shape(), contiguous, "elementwise in-place");

        let mut a = self.storage().try_borrow_mut()?;
        let b = other.storage().try_borrow()?;
        if contiguous {
            let (ao, bo) = (self.offset(), other.offset());
            for i in 0..self.size() {
                a[ao + i] = op.apply(a[ao + i], b[bo + i])?;
            }
        } else {
            let (am, bm) = (self.metadata(), other.metadata());
            let mut odometer = Odometer::new(self.shape());
            while let Some(index) = odometer.next_index() {
                let pos = am.offset_of(index);
                a[pos] = op.apply(a[pos], b[bm.offset_of(index)])?;
            }
        }
        Ok(())
    }

    fn scalar_assign(&mut self, op: BinaryOp, scalar: T) -> Result<()> {
        tracing::trace!(
            op = op.name(),
            shape = ?self.shape(),
            contiguous = self.is_contiguous(),
            "elementwise scalar in-place"
        );

        let mut a = self.storage().try_borrow_mut()?;
        if self.is_contiguous() {
            let ao = self.offset();
            for pos in ao..ao + self.size() {
                a[pos] = op.apply(a[pos], scalar)?;
            }
        } else {
            for pos in StridedOffsets::new(self.metadata()) {
                a[pos] = op.apply(a[pos], scalar)?;
            }
        }
        Ok(())
    }

    fn has_zero(&self) -> Result<bool> {
        if self.size() == 0 {
            return Ok(false);
        }
        let data = self.storage().try_borrow()?;
        Ok(if self.is_contiguous() {
            let start = self.offset();
            data[start..start + self.size()].iter().any(|x| x.is_zero())
        } else {
            StridedOffsets::new(self.metadata()).any(|pos| data[pos].is_zero())
        })
    }
}
