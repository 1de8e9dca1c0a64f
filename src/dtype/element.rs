//! Element trait for mapping Rust types to DType

use super::DType;
use num_traits::{WrappingAdd, WrappingMul, WrappingSub, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to stridr's runtime dtype tag.
/// `DTYPE` defaults to [`DType::Unknown`], so a type only needs an empty impl
/// to be storable:
///
/// ```
/// use stridr::dtype::{DType, Element};
///
/// #[derive(Copy, Clone, Debug, Default)]
/// struct Rgb(u8, u8, u8);
///
/// impl Element for Rgb {}
///
/// assert_eq!(Rgb::DTYPE, DType::Unknown);
/// assert_eq!(f32::DTYPE, DType::F32);
/// ```
///
/// # Bounds
/// - `Copy + Default + Debug + 'static` - elements are plain values; `Default`
///   is the initial value of freshly allocated buffers
pub trait Element: Copy + Default + Debug + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType = DType::Unknown;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
}

impl Element for i64 {
    const DTYPE: DType = DType::I64;
}

impl Element for i32 {
    const DTYPE: DType = DType::I32;
}

impl Element for u8 {
    const DTYPE: DType = DType::U8;
}

impl Element for bool {
    const DTYPE: DType = DType::Bool;
}

// Storable, but without a dedicated tag.
impl Element for i8 {}
impl Element for i16 {}
impl Element for u16 {}
impl Element for u32 {}
impl Element for u64 {}
impl Element for usize {}

/// Elements that support element-wise arithmetic
///
/// Implemented for the built-in integer and float types. `bool` is storable
/// but not `Numeric`.
///
/// The `elem_*` operations are what the element-wise engine applies. They never
/// panic on valid operands: integer results wrap on overflow (so
/// `i32::MIN / -1` is `i32::MIN` and `0u8 - 1` is `255`), float results follow
/// IEEE 754. A zero divisor is rejected before [`Numeric::elem_div`] runs.
pub trait Numeric:
    Element
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Zero
    + PartialEq
{
    /// `self + rhs`
    fn elem_add(self, rhs: Self) -> Self;

    /// `self - rhs`
    fn elem_sub(self, rhs: Self) -> Self;

    /// `self * rhs`
    fn elem_mul(self, rhs: Self) -> Self;

    /// `self / rhs`; `rhs` must be nonzero
    fn elem_div(self, rhs: Self) -> Self;
}

macro_rules! impl_numeric_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn elem_add(self, rhs: Self) -> Self {
                    WrappingAdd::wrapping_add(&self, &rhs)
                }

                #[inline]
                fn elem_sub(self, rhs: Self) -> Self {
                    WrappingSub::wrapping_sub(&self, &rhs)
                }

                #[inline]
                fn elem_mul(self, rhs: Self) -> Self {
                    WrappingMul::wrapping_mul(&self, &rhs)
                }

                #[inline]
                fn elem_div(self, rhs: Self) -> Self {
                    self.wrapping_div(rhs)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn elem_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn elem_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn elem_mul(self, rhs: Self) -> Self {
                    self * rhs
                }

                #[inline]
                fn elem_div(self, rhs: Self) -> Self {
                    self / rhs
                }
            }
        )*
    };
}

impl_numeric_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);
impl_numeric_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_types() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i64::DTYPE, DType::I64);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
        assert_eq!(bool::DTYPE, DType::Bool);
    }

    #[test]
    fn test_untagged_types_fall_back_to_unknown() {
        assert_eq!(i16::DTYPE, DType::Unknown);
        assert_eq!(u64::DTYPE, DType::Unknown);
        assert_eq!(usize::DTYPE, DType::Unknown);
    }

    #[test]
    fn test_integer_ops_wrap() {
        assert_eq!(i32::MIN.elem_div(-1), i32::MIN);
        assert_eq!(i64::MIN.elem_div(-1), i64::MIN);
        assert_eq!(i8::MIN.elem_div(-1), i8::MIN);
        assert_eq!(0u8.elem_sub(1), 255);
        assert_eq!(i32::MAX.elem_add(1), i32::MIN);
        assert_eq!(200u8.elem_mul(2), 144);
        assert_eq!((-7i32).elem_div(2), -3);
    }

    #[test]
    fn test_float_ops_follow_ieee() {
        assert_eq!(1.5f64.elem_add(2.0), 3.5);
        assert_eq!(f32::MAX.elem_mul(2.0), f32::INFINITY);
        assert_eq!(1.0f32.elem_div(4.0), 0.25);
    }
}
