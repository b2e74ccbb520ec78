#[cfg(feature = "alloc")]
use crate::alloc;
use core::{fmt, iter::FusedIterator, marker::PhantomData, ptr, slice};

use allocator_api2::alloc::Allocator;
use seqstore::RawBuffer;

use super::Vector;

/// An iterator over owned elements of a [`Vector`].
///
/// This is created by [`Vector::into_iter`].
/// Elements that are not yielded are dropped with the iterator, which then frees the buffer.
pub struct IntoIter<
    T,
    #[cfg(feature = "alloc")] A = alloc::Global,
    #[cfg(not(feature = "alloc"))] A,
> where
    A: Allocator,
{
    buffer: RawBuffer<T>,
    allocator: A,
    start: usize,
    end: usize,
    _phantom: PhantomData<T>,
}

impl<T, A> IntoIter<T, A>
where
    A: Allocator,
{
    #[must_use]
    pub(crate) fn new(vector: Vector<T, A>) -> Self {
        let (buffer, len, allocator) = vector.into_parts();
        Self {
            buffer,
            allocator,
            start: 0,
            end: len,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    #[inline]
    /// Gets the elements that have not been yielded yet.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY:
        // `start <= end <= capacity`, so this is inside the buffer or one past its end.
        let start = unsafe { self.buffer.as_ptr().add(self.start) };
        // SAFETY:
        // The slots in `start..end` are initialised and owned by the iterator.
        unsafe { slice::from_raw_parts(start.as_ptr(), self.end - self.start) }
    }
}

impl<T, A> Iterator for IntoIter<T, A>
where
    A: Allocator,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        // SAFETY:
        // `start < end <= capacity`, so the slot is inside the buffer.
        let slot = unsafe { self.buffer.as_ptr().add(self.start) };
        // SAFETY:
        // The slot is initialised and has not been yielded.
        let value = unsafe { slot.read() };
        self.start += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A> DoubleEndedIterator for IntoIter<T, A>
where
    A: Allocator,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;
        // SAFETY:
        // `end` is below the old `end`, so the slot is inside the buffer.
        let slot = unsafe { self.buffer.as_ptr().add(self.end) };
        // SAFETY:
        // The slot is initialised and has not been yielded.
        Some(unsafe { slot.read() })
    }
}

impl<T, A> ExactSizeIterator for IntoIter<T, A> where A: Allocator {}

impl<T, A> FusedIterator for IntoIter<T, A> where A: Allocator {}

impl<T, A> Drop for IntoIter<T, A>
where
    A: Allocator,
{
    fn drop(&mut self) {
        struct DropGuard<'a, T, A: Allocator> {
            iter: &'a mut IntoIter<T, A>,
        }

        impl<T, A: Allocator> Drop for DropGuard<'_, T, A> {
            fn drop(&mut self) {
                let iter = &mut *self.iter;
                // SAFETY:
                // The buffer was allocated with `iter.allocator` and every element has been
                // yielded, dropped or forgotten.
                unsafe { iter.buffer.deallocate(iter.allocator.by_ref()) };
            }
        }

        let guard = DropGuard { iter: self };
        // SAFETY:
        // `start <= end <= capacity`, so this is inside the buffer or one past its end.
        let start = unsafe { guard.iter.buffer.as_ptr().add(guard.iter.start) };
        let remaining =
            ptr::slice_from_raw_parts_mut(start.as_ptr(), guard.iter.end - guard.iter.start);
        guard.iter.start = guard.iter.end;
        // SAFETY:
        // The remaining elements are initialised and can no longer be yielded.
        unsafe { ptr::drop_in_place(remaining) };
    }
}

impl<T, A> IntoIterator for Vector<T, A>
where
    A: Allocator,
{
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

// SAFETY:
// The iterator owns the remaining elements and the buffer, like the vector it came from.
unsafe impl<T, A> Send for IntoIter<T, A>
where
    T: Send,
    A: Allocator + Send,
{
}

// SAFETY:
// Only `as_slice` gives access through a shared reference, and it is immutable.
unsafe impl<T, A> Sync for IntoIter<T, A>
where
    T: Sync,
    A: Allocator + Sync,
{
}

impl<T, A> fmt::Debug for IntoIter<T, A>
where
    T: fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod test {
    use crate::vector;

    #[test]
    fn yields_from_both_ends() {
        let mut iter = vector![1_u8, 2, 3, 4].into_iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.as_slice(), [2, 3]);
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), Some(3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn drops_unyielded_strings() {
        let mut iter = vector![String::from("a"), String::from("b")].into_iter();

        assert_eq!(iter.next().as_deref(), Some("a"));
        assert_eq!(format!("{iter:?}"), r#"IntoIter(["b"])"#);
    }
}
