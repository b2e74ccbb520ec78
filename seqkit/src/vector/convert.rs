#[cfg(feature = "alloc")]
use crate::alloc;
use core::slice;

use allocator_api2::alloc::Allocator;

use super::Vector;

#[cfg(feature = "alloc")]
impl<T> From<&[T]> for Vector<T>
where
    T: Clone,
{
    #[inline]
    fn from(values: &[T]) -> Self {
        Self::from_slice(values)
    }
}

#[cfg(feature = "alloc")]
impl<T, const N: usize> From<[T; N]> for Vector<T> {
    fn from(values: [T; N]) -> Self {
        let mut vector = Self::with_capacity_in(N, alloc::Global);
        for value in values {
            // SAFETY:
            // The capacity is exactly `N`, one slot for each value.
            unsafe { vector.push_unchecked(value) };
        }
        vector
    }
}

impl<T, A> Extend<T> for Vector<T, A>
where
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.reserve(lower);

        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T, A> Extend<&'a T> for Vector<T, A>
where
    T: Copy,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(feature = "alloc")]
impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<'a, T, A> IntoIterator for &'a Vector<T, A>
where
    A: Allocator,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A> IntoIterator for &'a mut Vector<T, A>
where
    A: Allocator,
{
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A> AsRef<[T]> for Vector<T, A>
where
    A: Allocator,
{
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A> AsMut<[T]> for Vector<T, A>
where
    A: Allocator,
{
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

#[cfg(test)]
mod test {
    use crate::{test_utils::Copyable, Vector};

    #[test]
    fn collects_in_order() {
        let squares: Vector<u32> = (1..=4).map(|n| n * n).collect();

        assert_eq!(squares, [1, 4, 9, 16]);
        assert_eq!(squares.capacity(), 4);
    }

    #[test]
    fn extend_reuses_spare_capacity() {
        let mut numbers = Vector::with_capacity(8);
        numbers.extend([1_i64, 2]);
        numbers.extend(&[3, 4]);

        assert_eq!(numbers, [1, 2, 3, 4]);
        assert_eq!(numbers.capacity(), 8);
    }

    #[test]
    fn from_slice_clones_each_element() {
        let kittens = [Copyable::new(1), Copyable::new(2)];
        let before = Copyable::clones();
        let copied = Vector::from(&kittens[..]);

        assert_eq!(Copyable::clones(), before + 2);
        assert_eq!(copied, kittens);
        assert_eq!(copied.capacity(), 2);
    }
}
