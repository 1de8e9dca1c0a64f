//! Core Tensor type

use super::index::compute_size;
use super::iter::StridedOffsets;
use super::{Metadata, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use num_traits::{One, Zero};
use std::cell::{Ref, RefMut};
use std::fmt;

/// N-dimensional array over a shared, reference-counted buffer
///
/// `Tensor` is the fundamental data structure in stridr. It consists of:
/// - **Storage**: Reference-counted element buffer
/// - **Metadata**: Shape, strides, offset and dtype defining the view into storage
///
/// # Zero-Copy Views
///
/// Operations like `transpose`, `slice`, and `reshape` create new tensors
/// that share the same underlying storage. This is achieved through:
/// - Rc-wrapped storage (reference counting)
/// - Derived metadata (different shape/strides/offset)
///
/// Writing through a view is visible through the tensor it came from, and
/// the other way around. `Clone` also shares the buffer; use
/// [`Tensor::contiguous`] on a non-contiguous view or [`Tensor::to_vec`] to
/// obtain independent data.
///
/// # Example
///
/// ```
/// use stridr::tensor::Tensor;
///
/// let a = Tensor::from_vec(vec![1.0f32, 2.0, 3.0, 4.0], &[2, 2])?;
/// let mut b = a.transpose(0, 1)?; // Zero-copy, shares storage with a
/// b.set(&[1, 0], 20.0)?;
/// assert_eq!(a.get(&[0, 1])?, 20.0);
/// # Ok::<(), stridr::error::Error>(())
/// ```
pub struct Tensor<T: Element> {
    /// Element buffer, possibly shared with other views
    storage: Storage<T>,
    /// Shape, strides, offset, dtype
    metadata: Metadata,
}

impl<T: Element> Tensor<T> {
    /// Create a tensor from storage and metadata
    pub(crate) fn from_parts(storage: Storage<T>, metadata: Metadata) -> Self {
        Self { storage, metadata }
    }

    /// Create a row-major tensor owning a fresh, default-initialized buffer
    ///
    /// No memory is allocated when the shape holds zero elements.
    pub fn new(shape: &[usize]) -> Self {
        let metadata = Metadata::new(shape, T::DTYPE);
        let storage = Storage::new(metadata.size());
        Self::from_parts(storage, metadata)
    }

    /// Create a tensor owning a fresh buffer laid out with explicit strides and offset
    ///
    /// The buffer is sized so that every element addressable through
    /// `strides` and `offset` exists.
    ///
    /// # Errors
    /// [`Error::InvalidLayout`] if `shape` and `strides` differ in length.
    pub fn with_strides(shape: &[usize], strides: &[usize], offset: usize) -> Result<Self> {
        let metadata = Metadata::with_strides(shape, strides, T::DTYPE, offset)?;
        let len = metadata.size().max(metadata.span());
        let storage = Storage::new(len);
        Ok(Self::from_parts(storage, metadata))
    }

    /// Create a row-major tensor taking ownership of `data`
    ///
    /// # Errors
    /// [`Error::ShapeMismatch`] if `data.len()` does not equal the product of
    /// the `shape` dimensions.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self> {
        let expected_len = compute_size(shape);
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let metadata = Metadata::new(shape, T::DTYPE);
        Ok(Self::from_parts(Storage::from_vec(data), metadata))
    }

    /// Create a row-major tensor copying `data`
    pub fn from_slice(data: &[T], shape: &[usize]) -> Result<Self> {
        Self::from_vec(data.to_vec(), shape)
    }

    /// Create a tensor filled with `value`
    pub fn full(shape: &[usize], value: T) -> Self {
        let metadata = Metadata::new(shape, T::DTYPE);
        let storage = Storage::from_vec(vec![value; metadata.size()]);
        Self::from_parts(storage, metadata)
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// Get the metadata
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get the element type tag
    #[inline]
    pub fn dtype(&self) -> DType {
        self.metadata.dtype()
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.metadata.shape()
    }

    /// Get the strides
    #[inline]
    pub fn strides(&self) -> &[usize] {
        self.metadata.strides()
    }

    /// Get the offset into the storage
    #[inline]
    pub fn offset(&self) -> usize {
        self.metadata.offset()
    }

    /// Get the total number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.metadata.size()
    }

    /// Get the number of dimensions
    #[inline]
    pub fn rank(&self) -> usize {
        self.metadata.rank()
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.metadata.is_contiguous()
    }

    /// Number of tensors (this one included) sharing the buffer
    #[inline]
    pub fn ref_count(&self) -> usize {
        self.storage.ref_count()
    }

    /// Whether `self` and `other` are views of the same buffer
    #[inline]
    pub fn shares_storage(&self, other: &Self) -> bool {
        self.storage.same_buffer(&other.storage)
    }

    // ===== Element Access =====

    /// Buffer position of `indices`, validating count and bounds
    fn checked_offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.rank() {
            return Err(Error::IndexCount {
                expected: self.rank(),
                got: indices.len(),
            });
        }
        for (&index, &size) in indices.iter().zip(self.shape()) {
            if index >= size {
                return Err(Error::IndexOutOfBounds { index, size });
            }
        }
        Ok(self.metadata.offset_of(indices))
    }

    /// Read the element at `indices`
    ///
    /// Exactly `rank` indices are required; a rank-1 tensor takes one.
    ///
    /// # Errors
    /// - [`Error::IndexCount`] if `indices.len() != rank`
    /// - [`Error::IndexOutOfBounds`] if any index reaches its dimension's extent
    /// - [`Error::BufferBorrowed`] if an [`at_mut`](Tensor::at_mut) guard on a
    ///   sharing tensor is alive
    pub fn get(&self, indices: &[usize]) -> Result<T> {
        let pos = self.checked_offset(indices)?;
        Ok(self.storage.try_borrow()?[pos])
    }

    /// Write the element at `indices`
    ///
    /// Same contract as [`Tensor::get`].
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        let pos = self.checked_offset(indices)?;
        self.storage.try_borrow_mut()?[pos] = value;
        Ok(())
    }

    /// Borrow the element at `indices`
    ///
    /// The returned guard keeps the shared buffer borrowed; writing through
    /// any tensor sharing it fails with [`Error::BufferBorrowed`] until the
    /// guard is dropped.
    pub fn at(&self, indices: &[usize]) -> Result<Ref<'_, T>> {
        let pos = self.checked_offset(indices)?;
        Ok(Ref::map(self.storage.try_borrow()?, |data| &data[pos]))
    }

    /// Mutably borrow the element at `indices`
    ///
    /// The returned guard keeps the shared buffer exclusively borrowed.
    pub fn at_mut(&mut self, indices: &[usize]) -> Result<RefMut<'_, T>> {
        let pos = self.checked_offset(indices)?;
        Ok(RefMut::map(self.storage.try_borrow_mut()?, |data| &mut data[pos]))
    }

    /// Read the element at `indices` without validating them
    ///
    /// # Safety
    /// `indices` must contain exactly `rank` entries, each below the extent of
    /// its dimension. Bounds are asserted in debug builds only.
    ///
    /// # Panics
    /// Panics if an [`at_mut`](Tensor::at_mut) guard on the shared buffer is
    /// alive.
    pub unsafe fn get_unchecked(&self, indices: &[usize]) -> T {
        debug_assert!(self.checked_offset(indices).is_ok());
        let pos = self.metadata.offset_of(indices);
        let data = self.storage.borrow();
        // SAFETY: the caller guarantees `indices` addresses an element of this layout
        unsafe { *data.get_unchecked(pos) }
    }

    /// Write the element at `indices` without validating them
    ///
    /// # Safety
    /// Same requirements as [`Tensor::get_unchecked`].
    pub unsafe fn set_unchecked(&mut self, indices: &[usize], value: T) {
        debug_assert!(self.checked_offset(indices).is_ok());
        let pos = self.metadata.offset_of(indices);
        let mut data = self.storage.borrow_mut();
        // SAFETY: the caller guarantees `indices` addresses an element of this layout
        unsafe { *data.get_unchecked_mut(pos) = value };
    }

    /// Buffer position of flat index `idx` in a contiguous tensor
    fn flat_offset(&self, idx: usize, op: &'static str) -> Result<usize> {
        if !self.is_contiguous() {
            return Err(Error::NotContiguous { op });
        }
        if idx >= self.size() {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                size: self.size(),
            });
        }
        Ok(self.offset() + idx)
    }

    /// Read the `idx`-th element in row-major order, ignoring dimensions
    ///
    /// # Errors
    /// - [`Error::NotContiguous`] if the tensor is not contiguous
    /// - [`Error::IndexOutOfBounds`] if `idx >= size`
    pub fn get_flat(&self, idx: usize) -> Result<T> {
        let pos = self.flat_offset(idx, "get_flat")?;
        Ok(self.storage.try_borrow()?[pos])
    }

    /// Write the `idx`-th element in row-major order, ignoring dimensions
    ///
    /// Same contract as [`Tensor::get_flat`].
    pub fn set_flat(&mut self, idx: usize, value: T) -> Result<()> {
        let pos = self.flat_offset(idx, "set_flat")?;
        self.storage.try_borrow_mut()?[pos] = value;
        Ok(())
    }

    // ===== Fill =====

    /// Write `value` to every logical element
    ///
    /// Contiguous tensors are filled with a single linear sweep; other layouts
    /// are walked element by element through their strides.
    ///
    /// # Errors
    /// [`Error::BufferBorrowed`] if an element guard on the shared buffer is
    /// alive. Nothing is written in that case.
    pub fn fill(&mut self, value: T) -> Result<()> {
        if self.size() == 0 {
            return Ok(());
        }
        let mut data = self.storage.try_borrow_mut()?;
        if self.metadata.is_contiguous() {
            let start = self.metadata.offset();
            data[start..start + self.metadata.size()].fill(value);
        } else {
            for pos in StridedOffsets::new(&self.metadata) {
                data[pos] = value;
            }
        }
        Ok(())
    }

    /// Set every element to zero
    pub fn zeros(&mut self) -> Result<()>
    where
        T: Zero,
    {
        self.fill(T::zero())
    }

    /// Set every element to one
    pub fn ones(&mut self) -> Result<()>
    where
        T: One,
    {
        self.fill(T::one())
    }

    // ===== View Operations (Zero-Copy) =====

    fn view(&self, metadata: Metadata, op: &'static str) -> Self {
        tracing::trace!(
            op,
            shape = ?metadata.shape(),
            strides = ?metadata.strides(),
            offset = metadata.offset(),
            contiguous = metadata.is_contiguous(),
            "derived view"
        );
        Self::from_parts(self.storage.clone(), metadata)
    }

    /// Reinterpret the elements under a new shape (zero-copy)
    ///
    /// # Errors
    /// - [`Error::NotContiguous`] if the tensor is not contiguous
    /// - [`Error::ShapeMismatch`] if `shape` holds a different number of elements
    pub fn reshape(&self, shape: &[usize]) -> Result<Self> {
        if !self.is_contiguous() {
            return Err(Error::NotContiguous { op: "reshape" });
        }
        if compute_size(shape) != self.size() {
            return Err(Error::shape_mismatch(self.shape(), shape));
        }
        Ok(self.view(self.metadata.reshaped(shape), "reshape"))
    }

    /// Swap two dimensions (zero-copy)
    ///
    /// # Errors
    /// [`Error::InvalidDimension`] if either dimension is not below the rank.
    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Self> {
        for dim in [dim0, dim1] {
            if dim >= self.rank() {
                return Err(Error::InvalidDimension {
                    dim,
                    ndim: self.rank(),
                });
            }
        }
        Ok(self.view(self.metadata.transposed(dim0, dim1), "transpose"))
    }

    /// Restrict dimension `dim` to `start..end` (zero-copy)
    ///
    /// # Errors
    /// - [`Error::InvalidDimension`] if `dim` is not below the rank
    /// - [`Error::InvalidRange`] if `start > end` or `end` exceeds the extent
    ///
    /// # Example
    ///
    /// ```
    /// use stridr::tensor::Tensor;
    ///
    /// let t = Tensor::from_vec((0..12).collect::<Vec<i32>>(), &[3, 4])?;
    /// let rows = t.slice(0, 1, 3)?;
    /// assert_eq!(rows.shape(), &[2, 4]);
    /// assert_eq!(rows.get(&[0, 0])?, 4);
    /// # Ok::<(), stridr::error::Error>(())
    /// ```
    pub fn slice(&self, dim: usize, start: usize, end: usize) -> Result<Self> {
        if dim >= self.rank() {
            return Err(Error::InvalidDimension {
                dim,
                ndim: self.rank(),
            });
        }
        let size = self.shape()[dim];
        if start > end || end > size {
            return Err(Error::InvalidRange {
                dim,
                start,
                end,
                size,
            });
        }
        Ok(self.view(self.metadata.narrowed(dim, start, end), "slice"))
    }

    // ===== Data Access =====

    /// Copy the logical elements into a Vec, in row-major order
    ///
    /// # Panics
    /// Panics if an [`at_mut`](Tensor::at_mut) guard on the shared buffer is
    /// alive.
    pub fn to_vec(&self) -> Vec<T> {
        self.gather(&self.storage.borrow())
    }

    /// Logical elements of this layout read out of an already borrowed buffer
    pub(crate) fn gather(&self, data: &[T]) -> Vec<T> {
        // A zero-size layout may carry an offset past the end of its buffer
        if self.size() == 0 {
            return Vec::new();
        }
        if self.is_contiguous() {
            let start = self.offset();
            data[start..start + self.size()].to_vec()
        } else {
            StridedOffsets::new(&self.metadata)
                .map(|pos| data[pos])
                .collect()
        }
    }

    /// Make tensor contiguous (copy if needed)
    ///
    /// If the tensor is already contiguous, returns a view (zero-copy).
    /// Otherwise, allocates new storage and copies the elements in row-major
    /// order.
    pub fn contiguous(&self) -> Self {
        if self.is_contiguous() {
            self.clone()
        } else {
            self.packed(self.to_vec())
        }
    }

    /// [`Tensor::contiguous`] reporting a borrowed buffer as an error
    pub(crate) fn try_contiguous(&self) -> Result<Self> {
        if self.is_contiguous() {
            return Ok(self.clone());
        }
        let values = self.gather(&self.storage.try_borrow()?);
        Ok(self.packed(values))
    }

    fn packed(&self, values: Vec<T>) -> Self {
        let metadata = Metadata::new(self.shape(), self.dtype());
        Self::from_parts(Storage::from_vec(values), metadata)
    }
}

impl<T: Element> Clone for Tensor<T> {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            metadata: self.metadata.clone(),
        }
    }
}

impl<T: Element> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("strides", &self.strides())
            .field("offset", &self.offset())
            .field("dtype", &self.dtype())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl<T: Element> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({:?}, dtype={})", self.shape(), self.dtype())
    }
}
