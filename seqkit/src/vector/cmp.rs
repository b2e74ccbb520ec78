use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use allocator_api2::alloc::Allocator;

use super::Vector;

impl<T, U, A, A2> PartialEq<Vector<U, A2>> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &Vector<U, A2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, A> PartialEq<[U]> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U, A> PartialEq<&[U]> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, A, const N: usize> PartialEq<&[U; N]> for Vector<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, A> Eq for Vector<T, A>
where
    T: Eq,
    A: Allocator,
{
}

impl<T, A, A2> PartialOrd<Vector<T, A2>> for Vector<T, A>
where
    T: PartialOrd,
    A: Allocator,
    A2: Allocator,
{
    #[inline]
    fn partial_cmp(&self, other: &Vector<T, A2>) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T, A> Ord for Vector<T, A>
where
    T: Ord,
    A: Allocator,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T, A> Hash for Vector<T, A>
where
    T: Hash,
    A: Allocator,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

#[cfg(test)]
mod test {
    use core::hash::BuildHasher;
    use std::hash::RandomState;

    use crate::{vector, Vector};

    #[test]
    fn compares_like_slices() {
        let numbers = vector![1_u8, 2, 3];

        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(numbers, &[1, 2, 3]);
        assert_eq!(numbers, [1, 2, 3][..]);
        assert_ne!(numbers, [1, 2]);
        assert!(numbers < vector![1, 2, 4]);
        assert!(numbers > Vector::new());
    }

    #[test]
    fn hashes_like_slices() {
        let state = RandomState::new();
        let numbers = vector![7_u32, 8];

        assert_eq!(state.hash_one(&numbers), state.hash_one([7_u32, 8].as_slice()));
    }
}
