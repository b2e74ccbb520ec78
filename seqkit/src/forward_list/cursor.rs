#[cfg(feature = "alloc")]
use crate::alloc;
use core::{fmt, ptr};

use allocator_api2::alloc::Allocator;

use super::{node::Node, ForwardList};

/// A cursor over a [`ForwardList`].
///
/// Cursors point to an element in the list, or to the "ghost" position before the front.
/// Moving past the back returns to the "ghost" position.
///
/// Two cursors are equal when they sit on the same node of the same list, whatever the values.
pub struct Cursor<
    'a,
    T,
    #[cfg(feature = "alloc")] A = alloc::Global,
    #[cfg(not(feature = "alloc"))] A,
> where
    A: Allocator,
{
    pub(crate) current: Option<Node<T>>,
    pub(crate) list: &'a ForwardList<T, A>,
}

impl<T, A> Clone for Cursor<'_, T, A>
where
    A: Allocator,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            list: self.list,
        }
    }
}

impl<'a, T, A> Cursor<'a, T, A>
where
    A: Allocator,
{
    /// Moves the cursor to the next element.
    ///
    /// If the cursor is on the "ghost" position, this moves to the front of the list.
    /// If the cursor is at the back of the list, this moves to the "ghost" position.
    pub fn move_next(&mut self) {
        self.current = match self.current {
            None => self.list.head,
            // SAFETY:
            // As the node is in the list, its header is initialised.
            Some(node) => unsafe { node.header_ptr().as_ref() }.next,
        }
    }

    #[must_use]
    /// Moves forward until the current element satisfies `predicate`.
    ///
    /// The current element is checked first.
    /// If nothing matches, the cursor ends on the "ghost" position.
    ///
    /// ```
    /// use seqkit::forward_list;
    ///
    /// let list = forward_list![5, 6, 7];
    /// let cursor = list.cursor_front().find(|n| n % 2 == 0);
    /// assert_eq!(cursor.current(), Some(&6));
    /// assert!(cursor.find(|n| *n > 10).is_ghost());
    /// ```
    pub fn find<P>(mut self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        while let Some(value) = self.current() {
            if predicate(value) {
                break;
            }
            self.move_next();
        }
        self
    }

    #[must_use]
    #[inline]
    /// Returns [`true`] if the cursor is on the "ghost" position.
    pub const fn is_ghost(&self) -> bool {
        self.current.is_none()
    }

    #[must_use]
    /// Gets a reference to the current element.
    ///
    /// If the cursor is on the "ghost" position, this returns [`None`].
    pub fn current(&self) -> Option<&'a T> {
        self.current.map(|node| {
            // SAFETY:
            // As the node is in the list, its value is initialised, and the list is borrowed for
            // `'a`.
            unsafe { node.data_ptr().as_ref() }
        })
    }

    #[must_use]
    /// Gets a reference to the element after the current one.
    ///
    /// On the "ghost" position this is the front; at the back of the list this returns [`None`].
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut next = self.clone();
        next.move_next();
        next.current()
    }

    #[must_use]
    #[inline]
    /// Returns a reference to the underlying list.
    pub const fn as_list(&self) -> &'a ForwardList<T, A> {
        self.list
    }
}

impl<T, A> PartialEq for Cursor<'_, T, A>
where
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && ptr::eq(self.list, other.list)
    }
}

impl<T, A> Eq for Cursor<'_, T, A> where A: Allocator {}

// SAFETY:
// - `Cursor`s only provide immutable access
// - `Cursor`s hold a reference to the list, so the data cannot be mutated whilst they are alive
// - the data implements `Sync` (trait bound)
// - the allocator implements `Sync` (trait bound)
unsafe impl<T, A> Send for Cursor<'_, T, A>
where
    T: Sync,
    A: Allocator + Sync,
{
}

// SAFETY:
// As above.
unsafe impl<T, A> Sync for Cursor<'_, T, A>
where
    T: Sync,
    A: Allocator + Sync,
{
}

impl<T, A> fmt::Debug for Cursor<'_, T, A>
where
    T: fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

#[cfg(test)]
mod test {
    use crate::forward_list;

    #[test]
    fn walks_through_ghost() {
        let list = forward_list!['a', 'b'];
        let mut cursor = list.cursor_before_front();

        assert!(cursor.is_ghost());
        assert_eq!(cursor.peek_next(), Some(&'a'));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&'a'));
        cursor.move_next();
        assert_eq!(cursor.current(), Some(&'b'));
        assert_eq!(cursor.peek_next(), None);
        cursor.move_next();
        assert!(cursor.is_ghost());
        cursor.move_next();
        assert_eq!(cursor, list.cursor_front());
    }

    #[test]
    fn equality_is_identity() {
        let first = forward_list![1_u8, 1];
        let second = forward_list![1_u8, 1];

        let mut a = first.cursor_front();
        let b = first.cursor_front();
        assert_eq!(a, b);
        assert_ne!(a, second.cursor_front());
        assert_ne!(first.cursor_before_front(), second.cursor_before_front());

        a.move_next();
        assert_eq!(a.current(), b.current());
        assert_ne!(a, b);
        assert_eq!(format!("{a:?}"), "Cursor(Some(1))");
    }
}
