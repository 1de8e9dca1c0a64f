//! Binary operations kernels

use crate::dtype::Numeric;
use crate::error::{Error, Result};
use crate::tensor::Tensor;

/// Element-wise sum of two packed buffers
///
/// Integer sums wrap on overflow.
///
/// # Safety
/// - `a`, `b`, and `out` must be valid pointers to `len` elements
/// - `out` must not overlap with `a` or `b`
#[inline]
pub unsafe fn add_kernel<T: Numeric>(a: *const T, b: *const T, out: *mut T, len: usize) {
    // SAFETY: upheld by the caller
    let (a_slice, b_slice, out_slice) = unsafe {
        (
            std::slice::from_raw_parts(a, len),
            std::slice::from_raw_parts(b, len),
            std::slice::from_raw_parts_mut(out, len),
        )
    };

    for i in 0..len {
        out_slice[i] = a_slice[i].elem_add(b_slice[i]);
    }
}

/// Add two equally shaped tensors through [`add_kernel`]
///
/// Non-contiguous operands are packed first. The result is a fresh,
/// contiguous tensor.
///
/// # Errors
/// - [`Error::ShapeMismatch`] if the shapes differ
/// - [`Error::BufferBorrowed`] if an operand's buffer is held by a mutable
///   element guard
pub fn add<T: Numeric>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>> {
    if a.shape() != b.shape() {
        return Err(Error::shape_mismatch(a.shape(), b.shape()));
    }

    let a = a.try_contiguous()?;
    let b = b.try_contiguous()?;
    let result = Tensor::new(a.shape());
    let len = a.size();
    tracing::trace!(len, dtype = %a.dtype(), "add kernel");
    if len == 0 {
        // Nothing to read, and an empty operand's offset may lie past its buffer
        return Ok(result);
    }

    {
        let a_data = a.storage().try_borrow()?;
        let b_data = b.storage().try_borrow()?;
        let mut out = result.storage().borrow_mut();
        let a_packed = &a_data[a.offset()..a.offset() + len];
        let b_packed = &b_data[b.offset()..b.offset() + len];

        // SAFETY: both inputs hold `len` elements, `out` is the freshly
        // allocated result buffer of exactly `len` elements
        unsafe { add_kernel(a_packed.as_ptr(), b_packed.as_ptr(), out.as_mut_ptr(), len) };
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_add_kernel() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [10.0f32, 20.0, 30.0];
        let mut out = [0.0f32; 3];
        unsafe { add_kernel(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), 3) };
        assert_eq!(out, [11.0, 22.0, 33.0]);
    }

    #[test]
    fn test_add_matches_method() {
        let a = Tensor::from_vec((0..6).collect::<Vec<i64>>(), &[2, 3]).unwrap();
        let b = Tensor::full(&[2, 3], 5i64);
        let via_kernel = add(&a, &b).unwrap();
        assert_eq!(via_kernel.to_vec(), a.add(&b).unwrap().to_vec());
        assert!(via_kernel.is_contiguous());
    }

    #[test]
    fn test_add_strided_operands() {
        let base = Tensor::from_vec((0..6).collect::<Vec<i32>>(), &[2, 3]).unwrap();
        let t = base.transpose(0, 1).unwrap();
        let rows = Tensor::from_vec((0..12).collect::<Vec<i32>>(), &[4, 2])
            .unwrap()
            .slice(0, 1, 4)
            .unwrap();
        // t = [[0, 3], [1, 4], [2, 5]], rows = [[2, 3], [4, 5], [6, 7]]
        assert_eq!(add(&t, &rows).unwrap().to_vec(), vec![2, 6, 5, 9, 8, 12]);
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = Tensor::<f64>::new(&[2, 3]);
        let b = Tensor::<f64>::new(&[3, 2]);
        assert_eq!(add(&a, &b).unwrap_err().kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_add_empty() {
        let a = Tensor::<f32>::new(&[0, 2]);
        assert_eq!(add(&a, &a).unwrap().size(), 0);
    }

    #[test]
    fn test_add_empty_with_offset() {
        let a = Tensor::<i32>::with_strides(&[0], &[1], 10).unwrap();
        let c = add(&a, &a).unwrap();
        assert_eq!(c.shape(), &[0]);
        assert!(c.to_vec().is_empty());
    }

    #[test]
    fn test_add_wraps_integer_overflow() {
        let a = Tensor::from_vec(vec![i32::MAX, 250], &[2]).unwrap();
        let b = Tensor::from_vec(vec![1, 10], &[2]).unwrap();
        assert_eq!(add(&a, &b).unwrap().to_vec(), vec![i32::MIN, 260]);

        let c = Tensor::full(&[2], 250u8);
        assert_eq!(add(&c, &c).unwrap().to_vec(), vec![244, 244]);
    }

    #[test]
    fn test_add_borrowed_operand() {
        let mut a = Tensor::from_vec(vec![1i64, 2, 3, 4], &[2, 2]).unwrap();
        let t = a.transpose(0, 1).unwrap();
        let guard = a.at_mut(&[0, 0]).unwrap();
        assert_eq!(add(&t, &t).unwrap_err().kind(), ErrorKind::Borrow);
        drop(guard);
        assert_eq!(add(&t, &t).unwrap().to_vec(), vec![2, 6, 4, 8]);
    }
}
