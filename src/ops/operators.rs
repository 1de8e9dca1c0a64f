//! `std::ops` operators for tensors
//!
//! Thin forwarding impls over the named element-wise methods. Every operator
//! returns `Result<Tensor<T>>` since shapes are checked at runtime:
//!
//! ```
//! use stridr::tensor::Tensor;
//!
//! let a = Tensor::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], &[2, 2])?;
//! let b = Tensor::full(&[2, 2], 2.0f32);
//!
//! let c = (&a + &b)?;
//! let d = (1.0f32 - &a)?; // reflected: 1 - a
//! assert_eq!(c.to_vec(), vec![3.0, 4.0, 5.0, 6.0]);
//! assert_eq!(d.to_vec(), vec![0.0, -1.0, -2.0, -3.0]);
//! # Ok::<(), stridr::error::Error>(())
//! ```
//!
//! Operators are implemented on references only, so method calls like
//! `a.add(&b)` always resolve to the inherent methods.

use crate::dtype::Numeric;
use crate::error::Result;
use crate::tensor::Tensor;
use std::ops::{Add, Div, Mul, Sub};

macro_rules! impl_tensor_binary_op {
    ($trait:ident, $method:ident, $scalar_method:ident) => {
        impl<T: Numeric> $trait<&Tensor<T>> for &Tensor<T> {
            type Output = Result<Tensor<T>>;

            fn $method(self, rhs: &Tensor<T>) -> Self::Output {
                Tensor::$method(self, rhs)
            }
        }

        impl<T: Numeric> $trait<T> for &Tensor<T> {
            type Output = Result<Tensor<T>>;

            fn $method(self, rhs: T) -> Self::Output {
                self.$scalar_method(rhs)
            }
        }
    };
}

impl_tensor_binary_op!(Add, add, add_scalar);
impl_tensor_binary_op!(Sub, sub, sub_scalar);
impl_tensor_binary_op!(Mul, mul, mul_scalar);
impl_tensor_binary_op!(Div, div, div_scalar);

// Scalar on the left. Coherence rules require one impl per concrete type.
macro_rules! impl_scalar_lhs_ops {
    ($($t:ty),* $(,)?) => {
        $(
            impl Add<&Tensor<$t>> for $t {
                type Output = Result<Tensor<$t>>;

                fn add(self, rhs: &Tensor<$t>) -> Self::Output {
                    rhs.add_scalar(self)
                }
            }

            impl Sub<&Tensor<$t>> for $t {
                type Output = Result<Tensor<$t>>;

                fn sub(self, rhs: &Tensor<$t>) -> Self::Output {
                    rhs.rsub(self)
                }
            }

            impl Mul<&Tensor<$t>> for $t {
                type Output = Result<Tensor<$t>>;

                fn mul(self, rhs: &Tensor<$t>) -> Self::Output {
                    rhs.mul_scalar(self)
                }
            }

            impl Div<&Tensor<$t>> for $t {
                type Output = Result<Tensor<$t>>;

                fn div(self, rhs: &Tensor<$t>) -> Self::Output {
                    rhs.rdiv(self)
                }
            }
        )*
    };
}

impl_scalar_lhs_ops!(f32, f64, i32, i64, u8);
