//! # stridr
//!
//! **Strided, typed n-dimensional tensors for Rust.**
//!
//! stridr interprets a flat element buffer through shape, strides, and an
//! offset. Reshape, transpose, and slice produce views that share the buffer
//! with their parent, so writes through any view are visible through all of
//! them.
//!
//! ## Features
//!
//! - **Tensors**: N-dimensional arrays with multi-index and flat access
//! - **Views**: Zero-copy reshape, transpose, and slice
//! - **Element-wise ops**: Add, subtract, multiply, divide with tensors or scalars,
//!   reflected scalar forms, and in-place variants
//! - **Element tags**: f64, f32, i64, i32, u8, bool, plus an `Unknown` tag for
//!   any other `Copy` type
//!
//! ## Quick Start
//!
//! ```rust
//! use stridr::prelude::*;
//!
//! let a = Tensor::from_vec(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])?;
//! let t = a.transpose(0, 1)?;
//! assert_eq!(t.shape(), &[3, 2]);
//! assert!(!t.is_contiguous());
//!
//! let b = Tensor::full(&[3, 2], 10.0f32);
//! let c = (&t + &b)?;
//! assert_eq!(c.to_vec(), vec![11.0, 14.0, 12.0, 15.0, 13.0, 16.0]);
//! # Ok::<(), stridr::error::Error>(())
//! ```
//!
//! ## Threading
//!
//! Tensors share their buffer through reference counting with interior
//! mutability and are neither `Send` nor `Sync`. Use [`Tensor::to_vec`] to move
//! data across threads.
//!
//! [`Tensor::to_vec`]: tensor::Tensor::to_vec

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod kernels;
pub mod ops;
pub mod tensor;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element, Numeric};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::ops::BinaryOp;
    pub use crate::tensor::{Metadata, Tensor};
}
