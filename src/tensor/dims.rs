//! Per-dimension lists: [`Shape`] and [`Strides`]
//!
//! Both are `usize` lists kept inline up to [`STACK_DIMS`] entries, so views of
//! typical tensors never touch the heap for their layout.

use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;

/// Number of dimensions stored inline before spilling to the heap
pub const STACK_DIMS: usize = 4;

macro_rules! dim_list {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name(SmallVec<[usize; STACK_DIMS]>);

        impl $name {
            /// Empty list (rank 0)
            pub fn new() -> Self {
                Self(SmallVec::new())
            }

            /// Empty list with room for `capacity` dimensions
            pub fn with_capacity(capacity: usize) -> Self {
                Self(SmallVec::with_capacity(capacity))
            }

            /// Append one dimension's entry
            pub fn push(&mut self, value: usize) {
                self.0.push(value);
            }

            /// Swap the entries of dimensions `a` and `b`
            pub fn swap(&mut self, a: usize, b: usize) {
                self.0.swap(a, b);
            }

            /// Reverse the dimension order
            pub fn reverse(&mut self) {
                self.0.reverse();
            }

            /// Entries as a plain slice
            #[inline]
            pub fn as_slice(&self) -> &[usize] {
                self.0.as_slice()
            }
        }

        impl Deref for $name {
            type Target = [usize];

            fn deref(&self) -> &[usize] {
                self.as_slice()
            }
        }

        impl AsRef<[usize]> for $name {
            fn as_ref(&self) -> &[usize] {
                self.as_slice()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list().entries(self.iter()).finish()
            }
        }

        impl From<&[usize]> for $name {
            fn from(value: &[usize]) -> Self {
                Self(SmallVec::from_slice(value))
            }
        }

        impl From<Vec<usize>> for $name {
            fn from(value: Vec<usize>) -> Self {
                Self(SmallVec::from_vec(value))
            }
        }

        impl<const N: usize> From<[usize; N]> for $name {
            fn from(value: [usize; N]) -> Self {
                Self::from(&value[..])
            }
        }

        impl FromIterator<usize> for $name {
            fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }
    };
}

dim_list! {
    /// Extent of a tensor along each dimension
    Shape
}

dim_list! {
    /// Buffer step between neighbouring coordinates along each dimension
    ///
    /// Measured in elements, not bytes. Strides are never negative.
    Strides
}

impl Shape {
    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn set(&mut self, dim: usize, extent: usize) {
        self.0[dim] = extent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let a = Shape::from([2, 3, 4]);
        let b = Shape::from(vec![2, 3, 4]);
        let c: Shape = [2usize, 3, 4].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.ndim(), 3);
        assert_eq!(format!("{a:?}"), "[2, 3, 4]");
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let dims: Vec<usize> = (1..=STACK_DIMS + 2).collect();
        let s = Strides::from(dims.clone());
        assert_eq!(s.as_slice(), dims.as_slice());
    }

    #[test]
    fn test_mutation() {
        let mut s = Strides::with_capacity(3);
        for v in [1, 4, 12] {
            s.push(v);
        }
        s.reverse();
        assert_eq!(&*s, &[12, 4, 1]);
        s.swap(0, 2);
        assert_eq!(&*s, &[1, 4, 12]);

        let mut shape = Shape::from([3, 4]);
        shape.set(0, 0);
        assert_eq!(shape.as_slice(), &[0, 4]);
    }
}
