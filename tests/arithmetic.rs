//! Integration tests for element-wise arithmetic
//!
//! Tests verify correctness across:
//! - Contiguous and strided operands
//! - Tensor, scalar, and reflected scalar forms
//! - In-place updates and their visibility through other views
//! - Operators and the kernel entry point
//! - Error contracts (shape mismatch, division by zero)

use stridr::kernels;
use stridr::prelude::*;

fn iota(shape: &[usize]) -> Tensor<i64> {
    let size: usize = shape.iter().product();
    Tensor::from_vec((1..=size as i64).collect(), shape).unwrap()
}

// ============================================================================
// Out-of-place Tests
// ============================================================================

#[test]
fn test_add_self() {
    let a = Tensor::full(&[2, 2], 1i32);
    let b = a.add(&a).unwrap();

    assert_eq!(b.to_vec(), vec![2, 2, 2, 2]);
    assert_eq!(a.to_vec(), vec![1, 1, 1, 1]);
    assert!(!b.shares_storage(&a));
}

#[test]
fn test_mixed_layouts() {
    let a = iota(&[2, 3]);
    let at = a.transpose(0, 1).unwrap();
    let b = iota(&[3, 2]);

    // at = [[1, 4], [2, 5], [3, 6]], b = [[1, 2], [3, 4], [5, 6]]
    assert_eq!(at.add(&b).unwrap().to_vec(), vec![2, 6, 5, 9, 8, 12]);
    assert_eq!(at.sub(&b).unwrap().to_vec(), vec![0, 2, -1, 1, -2, 0]);
    assert_eq!(at.mul(&b).unwrap().to_vec(), vec![1, 8, 6, 20, 15, 36]);
    assert_eq!(at.div(&b).unwrap().to_vec(), vec![1, 2, 0, 1, 0, 1]);
}

#[test]
fn test_result_is_packed() {
    let a = iota(&[4, 4]).slice(1, 1, 3).unwrap();
    let c = a.mul_scalar(2).unwrap();

    assert!(c.is_contiguous());
    assert_eq!(c.offset(), 0);
    assert_eq!(c.strides(), &[2, 1]);
    assert_eq!(c.to_vec(), vec![4, 6, 12, 14, 20, 22, 28, 30]);
}

#[test]
fn test_scalar_forms() {
    let a = Tensor::from_vec(vec![1.0f64, 2.0, 4.0], &[3]).unwrap();

    assert_eq!(a.add_scalar(1.0).unwrap().to_vec(), vec![2.0, 3.0, 5.0]);
    assert_eq!(a.sub_scalar(1.0).unwrap().to_vec(), vec![0.0, 1.0, 3.0]);
    assert_eq!(a.mul_scalar(0.5).unwrap().to_vec(), vec![0.5, 1.0, 2.0]);
    assert_eq!(a.div_scalar(2.0).unwrap().to_vec(), vec![0.5, 1.0, 2.0]);
    assert_eq!(a.rsub(10.0).unwrap().to_vec(), vec![9.0, 8.0, 6.0]);
    assert_eq!(a.rdiv(8.0).unwrap().to_vec(), vec![8.0, 4.0, 2.0]);
}

#[test]
fn test_scalar_tensor() {
    let a = Tensor::full(&[], 6u8);
    let b = Tensor::full(&[], 3u8);
    let c = a.div(&b).unwrap();
    assert_eq!(c.rank(), 0);
    assert_eq!(c.get(&[]).unwrap(), 2);
}

// ============================================================================
// In-place Tests
// ============================================================================

#[test]
fn test_in_place_visible_through_parent() {
    let base = iota(&[3, 3]);
    let mut block = base.slice(0, 1, 3).unwrap().slice(1, 1, 3).unwrap();
    let hundreds = Tensor::full(&[2, 2], 100i64);

    block.add_assign(&hundreds).unwrap();
    assert_eq!(base.to_vec(), vec![1, 2, 3, 4, 105, 106, 7, 108, 109]);
}

#[test]
fn test_in_place_through_transpose() {
    let base = iota(&[2, 3]);
    let mut t = base.transpose(0, 1).unwrap();
    let rhs = iota(&[3, 2]);

    t.mul_assign(&rhs).unwrap();
    // t[i][j] = base[j][i] * rhs[i][j]
    assert_eq!(base.to_vec(), vec![1, 6, 15, 8, 20, 36]);
}

#[test]
fn test_in_place_aliased_operand() {
    let base = iota(&[2, 2]);
    let mut a = base.clone();
    let at = base.transpose(0, 1).unwrap();

    // Reads the transpose as it was before the update
    a.add_assign(&at).unwrap();
    assert_eq!(base.to_vec(), vec![2, 5, 5, 8]);
}

#[test]
fn test_in_place_scalar_forms() {
    let mut a = iota(&[2, 2]);
    a.add_scalar_assign(1).unwrap();
    a.mul_scalar_assign(3).unwrap();
    a.sub_scalar_assign(6).unwrap();
    a.div_scalar_assign(3).unwrap();
    assert_eq!(a.to_vec(), vec![0, 1, 2, 3]);
}

#[test]
fn test_in_place_shape_mismatch_leaves_receiver() {
    let mut a = iota(&[2, 3]);
    let b = iota(&[3, 2]);
    assert_eq!(a.sub_assign(&b).unwrap_err().kind(), ErrorKind::Shape);
    assert_eq!(a.to_vec(), vec![1, 2, 3, 4, 5, 6]);
}

// ============================================================================
// Division by Zero Tests
// ============================================================================

#[test]
fn test_divide_self_with_zero() {
    let a = Tensor::from_vec(vec![3i32, 0, 2], &[3]).unwrap();
    assert_eq!(a.div(&a).unwrap_err(), Error::DivideByZero);
    assert_eq!(a.rdiv(1).unwrap_err(), Error::DivideByZero);
}

#[test]
fn test_divide_by_zero_scalar() {
    let a = Tensor::from_vec(vec![1.0f32, 2.0], &[2]).unwrap();
    assert_eq!(a.div_scalar(0.0).unwrap_err(), Error::DivideByZero);

    let empty = Tensor::<f32>::new(&[0]);
    assert_eq!(empty.div_scalar(0.0).unwrap_err(), Error::DivideByZero);
}

#[test]
fn test_div_assign_is_atomic() {
    let mut a = Tensor::from_vec(vec![8i64, 8, 8, 8], &[2, 2]).unwrap();
    let b = Tensor::from_vec(vec![2i64, 4, 0, 1], &[2, 2]).unwrap();

    assert_eq!(a.div_assign(&b).unwrap_err(), Error::DivideByZero);
    assert_eq!(a.to_vec(), vec![8, 8, 8, 8]);

    assert_eq!(a.div_scalar_assign(0).unwrap_err(), Error::DivideByZero);
    assert_eq!(a.to_vec(), vec![8, 8, 8, 8]);
}

// ============================================================================
// Overflow Tests
// ============================================================================

#[test]
fn test_min_divided_by_minus_one() {
    let a = Tensor::from_vec(vec![i32::MIN], &[1]).unwrap();
    let b = Tensor::from_vec(vec![-1], &[1]).unwrap();

    assert_eq!(a.div(&b).unwrap().to_vec(), vec![i32::MIN]);
    assert_eq!((&a / &b).unwrap().to_vec(), vec![i32::MIN]);
    assert_eq!((i32::MIN / &b).unwrap().to_vec(), vec![i32::MIN]);

    let c = Tensor::full(&[2, 2], i64::MIN);
    assert_eq!((&c / -1i64).unwrap().to_vec(), vec![i64::MIN; 4]);
}

#[test]
fn test_unsigned_underflow_wraps() {
    let a = Tensor::from_vec(vec![0u8, 5, 255], &[3]).unwrap();
    let b = Tensor::full(&[3], 6u8);

    assert_eq!(a.sub(&b).unwrap().to_vec(), vec![250, 255, 249]);
    assert_eq!((&a + &b).unwrap().to_vec(), vec![6, 11, 5]);
    assert_eq!((2u8 * &a).unwrap().to_vec(), vec![0, 10, 254]);
}

// ============================================================================
// Zero-size Tests
// ============================================================================

#[test]
fn test_zero_size_tensor_with_offset() {
    let mut a = Tensor::<f64>::with_strides(&[0], &[1], 10).unwrap();
    let b = Tensor::<f64>::new(&[0]);

    assert!(a.to_vec().is_empty());
    assert!(a.add(&b).unwrap().to_vec().is_empty());
    assert!(kernels::add(&a, &a).unwrap().to_vec().is_empty());
    a.div_assign(&b).unwrap();
    a.add_scalar_assign(1.0).unwrap();
    assert_eq!(a.div_scalar(0.0).unwrap_err(), Error::DivideByZero);
}

// ============================================================================
// Shape Mismatch Tests
// ============================================================================

#[test]
fn test_shape_mismatch_law() {
    let a = Tensor::<f32>::new(&[2, 3]);
    let b = Tensor::<f32>::new(&[3, 2]);

    for result in [a.add(&b), a.sub(&b), a.mul(&b), a.div(&b)] {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(
            err,
            Error::ShapeMismatch {
                expected: vec![2, 3],
                got: vec![3, 2],
            }
        );
    }
    assert_eq!(kernels::add(&a, &b).unwrap_err().kind(), ErrorKind::Shape);
}

#[test]
fn test_same_size_different_rank() {
    let a = Tensor::<i32>::new(&[6]);
    let b = Tensor::<i32>::new(&[2, 3]);
    assert_eq!(a.add(&b).unwrap_err().kind(), ErrorKind::Shape);
}

// ============================================================================
// Operator Tests
// ============================================================================

#[test]
fn test_operators_forward_to_methods() {
    let a = iota(&[2, 2]);
    let b = Tensor::full(&[2, 2], 2i64);

    assert_eq!((&a + &b).unwrap().to_vec(), a.add(&b).unwrap().to_vec());
    assert_eq!((&a / &b).unwrap().to_vec(), a.div(&b).unwrap().to_vec());
    assert_eq!((&a - 1i64).unwrap().to_vec(), a.sub_scalar(1).unwrap().to_vec());
    assert_eq!((12i64 / &a).unwrap().to_vec(), vec![12, 6, 4, 3]);
    assert_eq!((0i64 - &a).unwrap().to_vec(), vec![-1, -2, -3, -4]);
}

// ============================================================================
// Kernel Tests
// ============================================================================

#[test]
fn test_kernel_add_strided() {
    let a = iota(&[3, 2]).transpose(0, 1).unwrap();
    let b = iota(&[2, 3]);

    let via_kernel = kernels::add(&a, &b).unwrap();
    assert!(via_kernel.is_contiguous());
    assert_eq!(via_kernel.to_vec(), a.add(&b).unwrap().to_vec());
}

#[test]
fn test_dtype_tags() {
    assert_eq!(Tensor::<f32>::new(&[1]).dtype(), DType::F32);
    assert_eq!(Tensor::<f64>::new(&[1]).dtype(), DType::F64);
    assert_eq!(Tensor::<i32>::new(&[1]).dtype(), DType::I32);
    assert_eq!(Tensor::<i64>::new(&[1]).dtype(), DType::I64);
    assert_eq!(Tensor::<u8>::new(&[1]).dtype(), DType::U8);
    assert_eq!(Tensor::<bool>::new(&[1]).dtype(), DType::Bool);
    assert_eq!(Tensor::<u16>::new(&[1]).dtype(), DType::Unknown);

    let sum = Tensor::full(&[2], 1u32).add(&Tensor::full(&[2], 2u32)).unwrap();
    assert_eq!(sum.dtype(), DType::Unknown);
    assert_eq!(sum.to_vec(), vec![3, 3]);
}
