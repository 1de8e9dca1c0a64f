//! Tensor operations
//!
//! Element-wise arithmetic is exposed three ways:
//!
//! - named methods on [`Tensor`](crate::tensor::Tensor): `add`, `sub_scalar`,
//!   `rdiv`, `mul_assign`, ...
//! - `std::ops` operators on tensor references, forwarding to those methods
//! - [`crate::kernels`], the raw-buffer path used for addition
//!
//! All of them require equal shapes. There is no broadcasting.

mod arithmetic;
mod elementwise;
mod operators;

pub use arithmetic::BinaryOp;
