#[cfg(feature = "alloc")]
use crate::alloc;
use core::{fmt, iter::FusedIterator, marker::PhantomData};

use allocator_api2::alloc::Allocator;

use super::{node::Node, ForwardList};

#[inline]
fn next_of<T>(node: Node<T>) -> Option<Node<T>> {
    // SAFETY:
    // Nodes reachable from a list have initialised headers.
    unsafe { node.header_ptr().as_ref() }.next
}

/// An iterator over references to the elements of a [`ForwardList`].
///
/// This is created by [`ForwardList::iter`].
pub struct Iter<'a, T> {
    next: Option<Node<T>>,
    _phantom: PhantomData<&'a T>,
}

impl<T> Iter<'_, T> {
    #[must_use]
    #[inline]
    pub(crate) const fn new(head: Option<Node<T>>) -> Self {
        Self {
            next: head,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = next_of(node);
        // SAFETY:
        // The list is borrowed immutably for `'a` and the node's value is initialised.
        Some(unsafe { node.data_ptr().as_ref() })
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.next)
    }
}

impl<T> Default for Iter<'_, T> {
    #[inline]
    fn default() -> Self {
        Self::new(None)
    }
}

struct Remaining<'a, T>(Iter<'a, T>);

impl<T> fmt::Debug for Remaining<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.clone()).finish()
    }
}

impl<T> fmt::Debug for Iter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter")
            .field(&Remaining(self.clone()))
            .finish()
    }
}

// SAFETY:
// `Iter` behaves like `&T`.
unsafe impl<T> Send for Iter<'_, T> where T: Sync {}

// SAFETY:
// As above.
unsafe impl<T> Sync for Iter<'_, T> where T: Sync {}

/// An iterator over mutable references to the elements of a [`ForwardList`].
///
/// This is created by [`ForwardList::iter_mut`].
pub struct IterMut<'a, T> {
    next: Option<Node<T>>,
    _phantom: PhantomData<&'a mut T>,
}

impl<T> IterMut<'_, T> {
    #[must_use]
    #[inline]
    pub(crate) const fn new(head: Option<Node<T>>) -> Self {
        Self {
            next: head,
            _phantom: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = next_of(node);
        // SAFETY:
        // The list is borrowed mutably for `'a` and each node is yielded at most once.
        Some(unsafe { node.data_ptr().as_mut() })
    }
}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> Default for IterMut<'_, T> {
    #[inline]
    fn default() -> Self {
        Self::new(None)
    }
}

impl<T> fmt::Debug for IterMut<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IterMut")
            .field(&Remaining(Iter::new(self.next)))
            .finish()
    }
}

// SAFETY:
// `IterMut` behaves like `&mut T`.
unsafe impl<T> Send for IterMut<'_, T> where T: Send {}

// SAFETY:
// Nothing can be reached through `&IterMut` but `Debug`, which only reads.
unsafe impl<T> Sync for IterMut<'_, T> where T: Sync {}

/// An iterator over owned elements of a [`ForwardList`].
///
/// This is created by [`ForwardList::into_iter`].
pub struct IntoIter<
    T,
    #[cfg(feature = "alloc")] A = alloc::Global,
    #[cfg(not(feature = "alloc"))] A,
> where
    A: Allocator,
{
    list: ForwardList<T, A>,
}

impl<T, A> IntoIter<T, A>
where
    A: Allocator,
{
    #[must_use]
    #[inline]
    /// Gets a reference to the remainder of the [`ForwardList`].
    pub const fn remainder(&self) -> &ForwardList<T, A> {
        &self.list
    }

    #[must_use]
    #[inline]
    /// Converts the remaining iterator back into a [`ForwardList`].
    pub fn take_remainder(self) -> ForwardList<T, A> {
        self.list
    }
}

#[cfg(feature = "alloc")]
impl<T> Default for IntoIter<T> {
    #[inline]
    fn default() -> Self {
        ForwardList::new().into_iter()
    }
}

impl<T, A> Iterator for IntoIter<T, A>
where
    A: Allocator,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }
}

impl<T, A> FusedIterator for IntoIter<T, A> where A: Allocator {}

impl<T, A> fmt::Debug for IntoIter<T, A>
where
    T: fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T, A> IntoIterator for ForwardList<T, A>
where
    A: Allocator,
{
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T, A> IntoIterator for &'a ForwardList<T, A>
where
    A: Allocator,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, A> IntoIterator for &'a mut ForwardList<T, A>
where
    A: Allocator,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, A> Extend<T> for ForwardList<T, A>
where
    A: Allocator,
{
    /// Appends the items to the back of the list, in order.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut cursor = self.cursor_back_mut();
        for item in iter {
            cursor.insert_after(item);
        }
    }
}

impl<'a, T, A> Extend<&'a T> for ForwardList<T, A>
where
    T: Copy,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(feature = "alloc")]
impl<T> FromIterator<T> for ForwardList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

#[cfg(feature = "alloc")]
impl<T, const N: usize> From<[T; N]> for ForwardList<T> {
    #[inline]
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}
