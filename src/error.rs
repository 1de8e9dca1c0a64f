//! Error types for stridr

use thiserror::Error;

/// Result type alias using stridr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
///
/// Callers that only care about which family of failure occurred can match on
/// this instead of the individual variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Shape/strides rank mismatch or a malformed stride layout
    InvalidLayout,
    /// Operand shapes differ, or a reshape changes the element count
    Shape,
    /// Dimension index or slice bounds out of range
    Range,
    /// Wrong index count or out-of-bounds coordinate in element access
    Index,
    /// Operation requires a contiguous tensor
    Layout,
    /// Division by a zero element or scalar
    DivideByZero,
    /// The shared buffer is held by an outstanding element guard
    Borrow,
}

/// Errors that can occur in stridr operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Shape and strides do not describe a valid layout
    #[error("Invalid layout: {reason}")]
    InvalidLayout {
        /// What is wrong with the layout
        reason: String,
    },

    /// Shape mismatch in an operation
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Invalid dimension index
    #[error("Invalid dimension {dim} for tensor with {ndim} dimensions")]
    InvalidDimension {
        /// The invalid dimension
        dim: usize,
        /// Number of dimensions
        ndim: usize,
    },

    /// Slice bounds are reversed or exceed the dimension's extent
    #[error("Invalid range {start}..{end} for dimension {dim} of size {size}")]
    InvalidRange {
        /// Sliced dimension
        dim: usize,
        /// Requested start (inclusive)
        start: usize,
        /// Requested end (exclusive)
        end: usize,
        /// Extent of the dimension
        size: usize,
    },

    /// Number of indices does not match the tensor rank
    #[error("Expected {expected} indices, got {got}")]
    IndexCount {
        /// Rank of the tensor
        expected: usize,
        /// Number of indices supplied
        got: usize,
    },

    /// Index out of bounds
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// Tensor is not contiguous when contiguous memory is required
    #[error("Operation '{op}' requires contiguous tensor")]
    NotContiguous {
        /// The operation name
        op: &'static str,
    },

    /// Division by zero
    #[error("Division by zero")]
    DivideByZero,

    /// The buffer is borrowed through a guard from [`Tensor::at`] or
    /// [`Tensor::at_mut`] on a tensor sharing it
    ///
    /// [`Tensor::at`]: crate::tensor::Tensor::at
    /// [`Tensor::at_mut`]: crate::tensor::Tensor::at_mut
    #[error("Tensor buffer is already borrowed")]
    BufferBorrowed,
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid layout error
    pub fn invalid_layout(reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            reason: reason.into(),
        }
    }

    /// Family this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLayout { .. } => ErrorKind::InvalidLayout,
            Self::ShapeMismatch { .. } => ErrorKind::Shape,
            Self::InvalidDimension { .. } | Self::InvalidRange { .. } => ErrorKind::Range,
            Self::IndexCount { .. } | Self::IndexOutOfBounds { .. } => ErrorKind::Index,
            Self::NotContiguous { .. } => ErrorKind::Layout,
            Self::DivideByZero => ErrorKind::DivideByZero,
            Self::BufferBorrowed => ErrorKind::Borrow,
        }
    }
}
