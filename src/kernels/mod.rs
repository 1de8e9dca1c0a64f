//! Buffer-level compute kernels
//!
//! Kernels operate on raw element pointers and know nothing about shapes,
//! strides or shared storage. The tensor-level entry points here validate
//! operands, allocate the result and hand packed buffers to a kernel, which is
//! the point where a vectorized or multi-threaded implementation would be
//! swapped in without touching [`Tensor`](crate::tensor::Tensor).
//!
//! ```text
//! kernels::add(&a, &b)
//!   ├── shape check          (Error::ShapeMismatch)
//!   ├── pack operands        (Tensor::contiguous)
//!   ├── allocate result      (Tensor::new)
//!   └── add_kernel(a, b, out, len)
//! ```

mod binary;

pub use binary::{add, add_kernel};
