//! Storage: reference-counted element buffers shared between views

use crate::dtype::Element;
use crate::error::{Error, Result};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Flat element buffer shared by a tensor and all of its views
///
/// Storage wraps a `Vec<T>` with reference counting, enabling zero-copy
/// views (transpose, slice, reshape) that share the underlying buffer.
/// Writes through any sharing tensor are visible to all of them.
///
/// Memory is released when the last reference is dropped. The buffer is not
/// thread-safe: `Storage` is neither `Send` nor `Sync`.
pub struct Storage<T> {
    inner: Rc<RefCell<Vec<T>>>,
}

impl<T: Element> Storage<T> {
    /// Allocate `len` default-initialized elements
    ///
    /// A zero-length storage performs no heap allocation.
    pub fn new(len: usize) -> Self {
        tracing::trace!(len, dtype = %T::DTYPE, "allocating tensor storage");
        Self::from_vec(vec![T::default(); len])
    }

    /// Take ownership of an existing buffer
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(data)),
        }
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the reference count
    #[inline]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Check if this is the only reference
    #[inline]
    pub fn is_unique(&self) -> bool {
        Rc::strong_count(&self.inner) == 1
    }

    /// Whether two storages refer to the same buffer
    #[inline]
    pub fn same_buffer(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Borrow the whole buffer for reading
    ///
    /// # Panics
    /// Panics if the buffer is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.inner.borrow()
    }

    /// Borrow the whole buffer for writing
    ///
    /// # Panics
    /// Panics if the buffer is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.inner.borrow_mut()
    }

    /// Borrow the whole buffer for reading, failing instead of panicking
    ///
    /// # Errors
    /// [`Error::BufferBorrowed`] if the buffer is currently mutably borrowed.
    #[inline]
    pub fn try_borrow(&self) -> Result<Ref<'_, Vec<T>>> {
        self.inner.try_borrow().map_err(|_| Error::BufferBorrowed)
    }

    /// Borrow the whole buffer for writing, failing instead of panicking
    ///
    /// # Errors
    /// [`Error::BufferBorrowed`] if the buffer is currently borrowed.
    #[inline]
    pub fn try_borrow_mut(&self) -> Result<RefMut<'_, Vec<T>>> {
        self.inner.try_borrow_mut().map_err(|_| Error::BufferBorrowed)
    }
}

impl<T> Clone for Storage<T> {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Element> std::fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("len", &self.len())
            .field("dtype", &T::DTYPE)
            .field("refs", &Rc::strong_count(&self.inner))
            .finish()
    }
}
