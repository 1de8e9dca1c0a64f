//! Odometer walk over the logical index space of a shape

use super::dims::STACK_DIMS;
use super::index::{compute_size, flatten_index};
use super::metadata::Metadata;
use smallvec::{SmallVec, smallvec};

/// Multi-index counter that visits every coordinate of a shape in row-major order
///
/// The last dimension is incremented first and overflow carries into the next
/// dimension to the left, like the wheels of an odometer. Several operands of
/// the same shape can share one `Odometer` and each map the current index
/// through its own strides.
///
/// ```
/// use stridr::tensor::Odometer;
///
/// let mut odo = Odometer::new(&[2, 2]);
/// let mut seen = Vec::new();
/// while let Some(idx) = odo.next_index() {
///     seen.push(idx.to_vec());
/// }
/// assert_eq!(seen, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
/// ```
#[derive(Clone, Debug)]
pub struct Odometer<'a> {
    shape: &'a [usize],
    index: SmallVec<[usize; STACK_DIMS]>,
    remaining: usize,
    started: bool,
}

impl<'a> Odometer<'a> {
    /// Start a walk at the all-zeros coordinate
    pub fn new(shape: &'a [usize]) -> Self {
        Self {
            shape,
            index: smallvec![0; shape.len()],
            remaining: compute_size(shape),
            started: false,
        }
    }

    /// Advance to the next coordinate, or `None` once every coordinate was visited
    ///
    /// A rank-0 shape yields the empty index exactly once; a shape with a zero
    /// extent yields nothing.
    pub fn next_index(&mut self) -> Option<&[usize]> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            self.carry();
        } else {
            self.started = true;
        }
        self.remaining -= 1;
        Some(&self.index)
    }

    /// Coordinates left to visit
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    fn carry(&mut self) {
        for d in (0..self.shape.len()).rev() {
            self.index[d] += 1;
            if self.index[d] < self.shape[d] {
                return;
            }
            self.index[d] = 0;
        }
    }
}

/// Buffer offsets of every logical element of a layout, in row-major order
#[derive(Clone, Debug)]
pub struct StridedOffsets<'a> {
    odometer: Odometer<'a>,
    strides: &'a [usize],
    offset: usize,
}

impl<'a> StridedOffsets<'a> {
    /// Walk the elements described by `metadata`
    pub fn new(metadata: &'a Metadata) -> Self {
        Self {
            odometer: Odometer::new(metadata.shape()),
            strides: metadata.strides(),
            offset: metadata.offset(),
        }
    }
}

impl Iterator for StridedOffsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.odometer.next_index()?;
        Some(self.offset + flatten_index(self.strides, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.odometer.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for StridedOffsets<'_> {}
