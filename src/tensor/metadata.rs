//! Metadata: dtype, shape, strides, and offset describing a view into a buffer

use super::dims::{Shape, Strides};
use super::index::{compute_size, compute_strides, flatten_index, is_contiguous};
use crate::dtype::DType;
use crate::error::{Error, Result};
use std::fmt;

/// Metadata describes how a flat buffer is interpreted as a tensor
///
/// The elements live in a flat buffer, but not necessarily in row-major order.
/// Metadata records how to compute the buffer position of any element given
/// its indices:
///
///   offset + i0 * strides[0] + i1 * strides[1] + ... + in * strides[n]
///
/// Size, rank and contiguity are derived once at construction. Metadata is
/// never mutated afterwards; every view gets its own instance.
#[derive(Clone, PartialEq, Eq)]
pub struct Metadata {
    dtype: DType,
    shape: Shape,
    strides: Strides,
    offset: usize,
    size: usize,
    contiguous: bool,
}

impl Metadata {
    /// Create row-major metadata for a shape, starting at offset 0
    ///
    /// # Example
    /// ```
    /// use stridr::dtype::DType;
    /// use stridr::tensor::Metadata;
    ///
    /// let meta = Metadata::new(&[2, 3, 4], DType::F32);
    /// assert_eq!(meta.shape(), &[2, 3, 4]);
    /// assert_eq!(meta.strides(), &[12, 4, 1]);
    /// assert!(meta.is_contiguous());
    /// ```
    pub fn new(shape: &[usize], dtype: DType) -> Self {
        Self::with_offset(shape, dtype, 0)
    }

    /// Create row-major metadata for a shape starting at `offset`
    pub fn with_offset(shape: &[usize], dtype: DType, offset: usize) -> Self {
        Self {
            dtype,
            shape: Shape::from(shape),
            strides: compute_strides(shape),
            offset,
            size: compute_size(shape),
            // Row-major strides are contiguous by construction
            contiguous: true,
        }
    }

    /// Create metadata with explicit strides
    ///
    /// This is how non-canonical layouts such as transposed views are described.
    /// A layout whose last stride is not 1 is accepted and classified as
    /// non-contiguous.
    ///
    /// # Errors
    /// [`Error::InvalidLayout`] if `shape` and `strides` differ in length.
    pub fn with_strides(
        shape: &[usize],
        strides: &[usize],
        dtype: DType,
        offset: usize,
    ) -> Result<Self> {
        if shape.len() != strides.len() {
            return Err(Error::invalid_layout(format!(
                "shape has {} dimensions but strides have {}",
                shape.len(),
                strides.len()
            )));
        }

        let contiguous = match strides.last() {
            Some(&last) if last != 1 => false,
            _ => is_contiguous(shape, strides)?,
        };

        Ok(Self {
            dtype,
            shape: Shape::from(shape),
            strides: Strides::from(strides),
            offset,
            size: compute_size(shape),
            contiguous,
        })
    }

    /// Element type tag
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Extent of each dimension
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Buffer-element step of each dimension
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Starting element index in the underlying buffer
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total number of logical elements
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of dimensions
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.ndim()
    }

    /// Whether the last dimension is densely packed and each dimension
    /// steps over exactly the dimensions to its right
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.contiguous
    }

    /// Buffer position of the element at `indices` (no bounds check)
    #[inline]
    pub fn offset_of(&self, indices: &[usize]) -> usize {
        self.offset + flatten_index(&self.strides, indices)
    }

    /// Minimum buffer length needed to address every element of this layout
    ///
    /// Zero when the layout holds no elements.
    pub fn span(&self) -> usize {
        if self.size == 0 {
            return 0;
        }
        let last: usize = self
            .shape
            .iter()
            .zip(self.strides.iter())
            .map(|(&dim, &stride)| (dim - 1) * stride)
            .sum();
        self.offset + last + 1
    }

    /// Row-major metadata for `shape` keeping this dtype and offset
    pub(crate) fn reshaped(&self, shape: &[usize]) -> Self {
        Self::with_offset(shape, self.dtype, self.offset)
    }

    /// Metadata with dimensions `d0` and `d1` swapped
    ///
    /// Both dimensions must be in range.
    pub(crate) fn transposed(&self, d0: usize, d1: usize) -> Self {
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.swap(d0, d1);
        strides.swap(d0, d1);
        self.derived(shape, strides, self.offset)
    }

    /// Metadata restricted to `start..end` along `dim`
    ///
    /// Bounds must already be validated.
    pub(crate) fn narrowed(&self, dim: usize, start: usize, end: usize) -> Self {
        let mut shape = self.shape.clone();
        shape.set(dim, end - start);
        let offset = self.offset + start * self.strides[dim];
        self.derived(shape, self.strides.clone(), offset)
    }

    fn derived(&self, shape: Shape, strides: Strides, offset: usize) -> Self {
        let contiguous = match strides.last() {
            Some(&last) if last != 1 => false,
            // Rank always matches here, so classification cannot fail
            _ => is_contiguous(&shape, &strides).unwrap_or(false),
        };
        Self {
            dtype: self.dtype,
            size: compute_size(&shape),
            shape,
            strides,
            offset,
            contiguous,
        }
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Metadata {{ dtype: {}, shape: {:?}, strides: {:?}, offset: {}, contiguous: {} }}",
            self.dtype,
            self.shape.as_slice(),
            self.strides.as_slice(),
            self.offset,
            self.contiguous
        )
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.shape.as_slice())
    }
}
