//! Tensor types and index arithmetic
//!
//! This module provides the core `Tensor` type, which interprets a shared,
//! flat element buffer through shape/strides/offset [`Metadata`], along with
//! the pure index arithmetic both are built on.

mod core;
mod dims;
mod index;
mod iter;
mod metadata;
mod storage;

pub use core::Tensor;
pub use dims::{STACK_DIMS, Shape, Strides};
pub use index::{compute_size, compute_strides, flatten_index, is_contiguous, unflatten_index};
pub use iter::{Odometer, StridedOffsets};
pub use metadata::Metadata;
pub use storage::Storage;
