//! Index arithmetic: strides, sizes, flat offsets and contiguity
//!
//! Pure functions shared by [`Metadata`](super::Metadata) and the tensor
//! container. All strides are row-major (C-order) unless stated otherwise.

use super::dims::Strides;
use crate::error::{Error, Result};

/// Compute row-major strides for a shape
///
/// The last dimension has stride 1 and every other dimension's stride is the
/// product of the extents to its right. An empty shape yields empty strides.
///
/// # Example
/// ```
/// use stridr::tensor::compute_strides;
/// assert_eq!(compute_strides(&[2, 3, 4]).as_slice(), &[12, 4, 1]);
/// ```
pub fn compute_strides(shape: &[usize]) -> Strides {
    let mut strides = Strides::with_capacity(shape.len());
    let mut stride = 1usize;

    // Compute strides from last dimension to first
    for &dim in shape.iter().rev() {
        strides.push(stride);
        stride *= dim;
    }

    strides.reverse();
    strides
}

/// Total number of elements described by a shape
///
/// The empty shape is a scalar and holds one element; any zero extent collapses
/// the count to zero.
#[inline]
pub fn compute_size(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Dot product of strides and indices
///
/// Both slices must have the same length; this is not checked.
#[inline]
pub fn flatten_index(strides: &[usize], indices: &[usize]) -> usize {
    strides.iter().zip(indices).map(|(&s, &i)| s * i).sum()
}

/// Recover a multi-dimensional index from a flat offset
///
/// Applies successive division and remainder against `strides` in declared
/// order. This is only the inverse of [`flatten_index`] for canonical row-major
/// strides as produced by [`compute_strides`]; transposed or otherwise permuted
/// strides give meaningless results. A zero stride (which row-major layouts
/// only produce next to a zero extent) maps to coordinate 0.
pub fn unflatten_index(strides: &[usize], mut index: usize) -> Vec<usize> {
    strides
        .iter()
        .map(|&stride| {
            if stride == 0 {
                return 0;
            }
            let coord = index / stride;
            index %= stride;
            coord
        })
        .collect()
}

/// Classify a layout as contiguous (row-major, no gaps) or not
///
/// # Errors
/// - [`Error::InvalidLayout`] if `shape` and `strides` differ in length
/// - [`Error::InvalidLayout`] if the last stride is not 1
pub fn is_contiguous(shape: &[usize], strides: &[usize]) -> Result<bool> {
    if shape.len() != strides.len() {
        return Err(Error::invalid_layout(format!(
            "shape has {} dimensions but strides have {}",
            shape.len(),
            strides.len()
        )));
    }

    let Some(&last) = strides.last() else {
        return Ok(true);
    };
    if last != 1 {
        return Err(Error::invalid_layout(format!(
            "last stride must be 1, got {last}"
        )));
    }

    for i in (1..shape.len()).rev() {
        if strides[i - 1] != strides[i] * shape[i] {
            return Ok(false);
        }
    }
    Ok(true)
}
