//! A singly-linked list with in-place construction and cursors.
//!
//! See [`ForwardList`].

#[cfg(feature = "alloc")]
use crate::alloc;
use core::{fmt, marker::PhantomData, mem};

use allocator_api2::alloc::Allocator;
use seqstore::AllocateError;

use crate::utility::{Forward, Take};

mod cmp;
mod cursor;
mod cursor_mut;
mod iter;
mod node;

pub use cursor::Cursor;
pub use cursor_mut::CursorMut;
pub use iter::{IntoIter, Iter, IterMut};
pub use node::{Link, MaybeUninitNode};
use node::Node;

/// A singly-linked list.
///
/// Each element lives in its own node, a single allocation holding the link to the next node followed by the value.
/// Elements are added and removed at the front in O(1), and anywhere else through a [`CursorMut`].
///
/// ```
/// use seqkit::ForwardList;
///
/// let mut list: ForwardList<i32> = ForwardList::new();
/// for n in [4, 3, 2, 1] {
///     list.emplace_front(n);
/// }
///
/// assert!(list.iter().eq(&[1, 2, 3, 4]));
/// assert_eq!(list.pop_front(), Some(1));
/// assert_eq!(list.front(), Some(&2));
/// ```
pub struct ForwardList<
    T,
    #[cfg(feature = "alloc")] A = alloc::Global,
    #[cfg(not(feature = "alloc"))] A,
> where
    A: Allocator,
{
    head: Option<Node<T>>,
    allocator: A,
    _phantom: PhantomData<T>,
}

impl<T, A> ForwardList<T, A>
where
    A: Allocator,
{
    #[must_use]
    #[inline]
    /// Creates an empty [`ForwardList`] in the given allocator.
    pub const fn new_in(allocator: A) -> Self {
        Self {
            head: None,
            allocator,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    #[inline]
    /// Returns [`true`] if the list holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[must_use]
    /// Counts the elements.
    ///
    /// This walks the whole list.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    #[inline]
    /// Gets a reference to the allocator.
    pub const fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline]
    /// Attempts to allocate an uninitialised node at the front of the list.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    pub fn try_allocate_uninit_front(
        &mut self,
    ) -> Result<MaybeUninitNode<'_, T, A>, AllocateError> {
        // SAFETY:
        // There is no previous node.
        unsafe { node::try_new(self, None) }
    }

    #[must_use]
    #[inline]
    /// Allocates an uninitialised node at the front of the list.
    ///
    /// ```
    /// use seqkit::ForwardList;
    ///
    /// let mut list = ForwardList::new();
    /// let mut node = list.allocate_uninit_front();
    /// node.write(String::from("in place"));
    /// // SAFETY: the value was written above
    /// unsafe { node.insert() };
    ///
    /// assert_eq!(list.front().map(String::as_str), Some("in place"));
    /// ```
    pub fn allocate_uninit_front(&mut self) -> MaybeUninitNode<'_, T, A> {
        AllocateError::unwrap_result(self.try_allocate_uninit_front())
    }

    /// Attempts to push `value` to the front of the list.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`] holding `value`.
    /// The list is left untouched.
    pub fn try_push_front(&mut self, value: T) -> Result<(), AllocateError<T>> {
        let mut node = match self.try_allocate_uninit_front() {
            Ok(node) => node,
            Err(error) => return Err(error.with_value(value)),
        };
        node.write(value);
        // SAFETY:
        // The value was written above.
        unsafe { node.insert() };
        Ok(())
    }

    /// Pushes a value to the front of the list.
    ///
    /// An owned `T` is moved in and a `&T` is cloned in, after the node has been allocated.
    pub fn push_front<V>(&mut self, value: V)
    where
        V: Forward<T>,
    {
        let mut node = self.allocate_uninit_front();
        node.write(value.forward());
        // SAFETY:
        // The value was written above.
        unsafe { node.insert() };
    }

    #[inline]
    /// Constructs a `T` from `args` directly in a new node at the front and returns it.
    pub fn emplace_front<Args>(&mut self, args: Args) -> &mut T
    where
        T: From<Args>,
    {
        self.emplace_front_with(|| T::from(args))
    }

    /// Constructs a value with `f` directly in a new node at the front and returns it.
    ///
    /// The node is allocated before `f` is called.
    /// If `f` panics, the node is freed and the list is left untouched.
    pub fn emplace_front_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let mut node = self.allocate_uninit_front();
        node.write(f());
        let mut value = node.as_ptr();
        // SAFETY:
        // The value was written above.
        unsafe { node.insert() };
        // SAFETY:
        // The node is now owned by the list, which we borrow mutably.
        unsafe { value.as_mut() }
    }

    #[must_use]
    /// Gets a reference to the element at the front of the list.
    ///
    /// If the list is empty, this returns [`None`].
    pub fn front(&self) -> Option<&T> {
        let front = self.head?;
        // SAFETY:
        // As the node is in the list, its value is initialised.
        Some(unsafe { front.data_ptr().as_ref() })
    }

    #[must_use]
    /// Gets a mutable reference to the element at the front of the list.
    ///
    /// If the list is empty, this returns [`None`].
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let front = self.head?;
        // SAFETY:
        // As the node is in the list, its value is initialised, and we borrow the list mutably.
        Some(unsafe { front.data_ptr().as_mut() })
    }

    #[must_use]
    /// Unlinks the front node of the list.
    /// If you do not want a [`MaybeUninitNode`], this is the wrong function!
    pub fn pop_front_node(&mut self) -> Option<MaybeUninitNode<'_, T, A>> {
        let front = self.head?;
        // SAFETY:
        // As the node is in the list, its header is initialised.
        self.head = unsafe { front.header_ptr().as_ref() }.next;

        let link = node::Link {
            list: self,
            previous: None,
        };
        // SAFETY:
        // The node has been unlinked, so nothing else aliases it, and its header still points to
        // the new front.
        Some(unsafe { seqstore::new_maybe_uninit(link, front.to_header_opaque()) })
    }

    #[must_use]
    #[inline]
    /// Removes the front element and returns it.
    ///
    /// If the list is empty, this returns [`None`].
    pub fn pop_front(&mut self) -> Option<T> {
        self.pop_front_node().map(|front| {
            // SAFETY:
            // Every node in the list holds an initialised value.
            unsafe { front.take() }
        })
    }

    #[inline]
    /// Deletes and drops the front element.
    ///
    /// Returns [`true`] if an element was removed and [`false`] if the list was empty.
    pub fn delete_front(&mut self) -> bool {
        self.pop_front_node()
            .map(|mut front| {
                // SAFETY:
                // Every node in the list holds an initialised value.
                unsafe { front.drop_in_place() };
            })
            .is_some()
    }

    #[inline]
    /// Drops every element.
    pub fn clear(&mut self) {
        while self.delete_front() {}
    }

    #[must_use]
    #[inline]
    /// Creates a cursor on the front element, or on the "ghost" position if the list is empty.
    pub const fn cursor_front(&self) -> Cursor<'_, T, A> {
        Cursor {
            current: self.head,
            list: self,
        }
    }

    #[must_use]
    #[inline]
    /// Creates a cursor on the "ghost" position before the front element.
    pub const fn cursor_before_front(&self) -> Cursor<'_, T, A> {
        Cursor {
            current: None,
            list: self,
        }
    }

    #[must_use]
    #[inline]
    /// Creates a mutable cursor on the front element, or on the "ghost" position if the list is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut {
            current: self.head,
            list: self,
        }
    }

    #[must_use]
    #[inline]
    /// Creates a mutable cursor on the "ghost" position before the front element.
    ///
    /// Inserting after the "ghost" position inserts at the front.
    pub fn cursor_before_front_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut {
            current: None,
            list: self,
        }
    }

    fn back_node(&self) -> Option<Node<T>> {
        let mut node = self.head?;
        // SAFETY:
        // Nodes in the list have initialised headers.
        while let Some(next) = unsafe { node.header_ptr().as_ref() }.next {
            node = next;
        }
        Some(node)
    }

    #[must_use]
    #[inline]
    /// Creates a mutable cursor on the back element, or on the "ghost" position if the list is empty.
    ///
    /// This walks the whole list.
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, T, A> {
        CursorMut {
            current: self.back_node(),
            list: self,
        }
    }

    #[must_use]
    #[inline]
    /// Creates an iterator over references to the elements, front to back.
    pub const fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head)
    }

    #[must_use]
    #[inline]
    /// Creates an iterator over mutable references to the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head)
    }

    /// Attempts to clone the list into another allocator.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    /// Nodes cloned so far are freed and `self` is untouched.
    pub fn try_clone_in<A2>(&self, allocator: A2) -> Result<ForwardList<T, A2>, AllocateError>
    where
        T: Clone,
        A2: Allocator,
    {
        let mut list = ForwardList::new_in(allocator);
        let mut cursor = list.cursor_before_front_mut();

        for value in self {
            cursor.try_emplace_after_with(|| value.clone())?;
        }

        Ok(list)
    }

    #[must_use]
    #[inline]
    /// Clones the list into another allocator.
    pub fn clone_in<A2>(&self, allocator: A2) -> ForwardList<T, A2>
    where
        T: Clone,
        A2: Allocator,
    {
        AllocateError::unwrap_result(self.try_clone_in(allocator))
    }

    /// Attempts to clone the list.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    pub fn try_clone(&self) -> Result<Self, AllocateError>
    where
        T: Clone,
        A: Clone,
    {
        self.try_clone_in(self.allocator.clone())
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        // Floyd's cycle detection; a well-formed list always ends.
        let next = |node: Node<T>| {
            // SAFETY:
            // Nodes in the list have initialised headers.
            unsafe { node.header_ptr().as_ref() }.next
        };

        let mut slow = self.head;
        let mut fast = self.head;
        while let Some(step) = fast.and_then(next) {
            fast = next(step);
            slow = slow.and_then(next);
            assert!(fast.is_none() || fast != slow, "the list has a cycle");
        }

        assert_eq!(self.is_empty(), self.len() == 0);
    }
}

#[cfg(feature = "alloc")]
impl<T> ForwardList<T> {
    #[must_use]
    #[inline]
    /// Creates an empty [`ForwardList`].
    pub const fn new() -> Self {
        Self::new_in(alloc::Global)
    }
}

impl<T, A> Default for ForwardList<T, A>
where
    A: Allocator + Default,
{
    #[inline]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A> Drop for ForwardList<T, A>
where
    A: Allocator,
{
    fn drop(&mut self) {
        struct DropGuard<'a, T, A: Allocator> {
            list: &'a mut ForwardList<T, A>,
        }

        impl<T, A: Allocator> Drop for DropGuard<'_, T, A> {
            // Only runs when an element's destructor panicked; keep freeing the rest of the chain.
            fn drop(&mut self) {
                while self.list.delete_front() {}
            }
        }

        let guard = DropGuard { list: self };
        while guard.list.delete_front() {}
        mem::forget(guard);
    }
}

impl<T, A> Clone for ForwardList<T, A>
where
    T: Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        self.clone_in(self.allocator.clone())
    }
}

impl<T, A> Take for ForwardList<T, A>
where
    A: Allocator + Clone,
{
    #[inline]
    fn take(&mut self) -> Self {
        let empty = Self::new_in(self.allocator.clone());
        mem::replace(self, empty)
    }
}

impl<T, A> fmt::Debug for ForwardList<T, A>
where
    T: fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY:
// - the list owns every node and its value
// - the data implements `Send` (trait bound)
// - the allocator implements `Send` (trait bound)
unsafe impl<T, A> Send for ForwardList<T, A>
where
    T: Send,
    A: Allocator + Send,
{
}

// SAFETY:
// - the data cannot be mutated behind an immutable reference
// - the data implements `Sync` (trait bound)
// - the allocator implements `Sync` (trait bound)
unsafe impl<T, A> Sync for ForwardList<T, A>
where
    T: Sync,
    A: Allocator + Sync,
{
}

#[cfg(test)]
mod test {
    use std::panic::{self, AssertUnwindSafe};

    use crate::{
        forward_list,
        test_utils::{Budget, Copyable, DropCounter, Fragile},
        utility::take,
        ForwardList,
    };

    type Kittens = ForwardList<Copyable>;

    const IDS: [i32; 4] = [4, 3, 2, 1];

    fn kittens() -> Kittens {
        let mut list = Kittens::new();
        for id in IDS {
            list.emplace_front(id);
        }
        list.check_invariants();
        list
    }

    #[test]
    fn empty() {
        let list = Kittens::new();

        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.front().is_none());
        list.check_invariants();
    }

    #[test]
    fn emplace_front_reverses_insertion_order() {
        let list = kittens();

        assert!(!list.is_empty());
        assert_eq!(list.len(), 4);
        assert!(list.iter().map(Copyable::id).eq([1, 2, 3, 4]));
    }

    #[test]
    fn front_tracks_latest_insertion() {
        let mut list = Kittens::new();

        for id in IDS {
            let kitten = list.emplace_front(id);
            assert_eq!(kitten.id(), id);
            assert_eq!(list.front(), Some(&Copyable::new(id)));
        }

        *list.front_mut().unwrap() = Copyable::new(10);
        assert_eq!(list.front().map(Copyable::id), Some(10));
    }

    #[test]
    fn pop_front_until_empty() {
        let mut list = kittens();

        for id in [1, 2, 3, 4] {
            assert!(!list.is_empty());
            assert_eq!(list.pop_front(), Some(Copyable::new(id)));
            list.check_invariants();
        }
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);
        assert!(!list.delete_front());
    }

    #[test]
    fn push_front_moves_or_clones() {
        let mut list = Kittens::new();
        let kitten = Copyable::new(3);

        let before = Copyable::clones();
        list.push_front(&kitten);
        assert_eq!(Copyable::clones(), before + 1);
        list.push_front(kitten);
        assert_eq!(Copyable::clones(), before + 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn cursor_find_and_compare() {
        let list = kittens();

        let cursor = list.cursor_front();
        assert_eq!(cursor.current(), Some(&Copyable::new(1)));

        let copy = cursor.clone();
        assert_eq!(cursor, copy);
        assert_eq!(cursor.current(), copy.current());

        let found = list
            .cursor_front()
            .find(|kitten| *kitten == Copyable::new(2));
        assert_eq!(found.current(), Some(&Copyable::new(2)));
        assert_ne!(found, cursor);

        let missing = list
            .cursor_front()
            .find(|kitten| *kitten == Copyable::new(-2));
        assert!(missing.is_ghost());
        assert_eq!(missing, list.cursor_before_front());
    }

    #[test]
    fn emplace_after_found_element() {
        let mut list = kittens();

        let mut cursor = list.cursor_front_mut();
        while cursor.current().is_some_and(|kitten| kitten.id() != 2) {
            cursor.move_next();
        }
        let inserted = cursor.emplace_after(0_i32);
        assert_eq!(*inserted, Copyable::new(0));
        assert_eq!(cursor.current(), Some(&mut Copyable::new(0)));
        assert_eq!(cursor.peek_next(), Some(&mut Copyable::new(3)));

        list.check_invariants();
        let mut ids = Vec::new();
        while let Some(kitten) = list.pop_front() {
            ids.push(kitten.id());
        }
        assert_eq!(ids, [1, 2, 0, 3, 4]);
    }

    #[test]
    fn emplace_after_ghost_inserts_at_front() {
        let mut list = kittens();

        list.cursor_before_front_mut().emplace_after(9_i32);
        assert_eq!(list.front(), Some(&Copyable::new(9)));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn remove_after() {
        let mut list = forward_list![1_u8, 2, 3];

        let mut cursor = list.cursor_front_mut();
        assert_eq!(cursor.remove_next(), Some(2));
        assert_eq!(cursor.peek_next(), Some(&mut 3));
        cursor.move_next();
        assert_eq!(cursor.remove_next(), None);
        assert!(!cursor.delete_next());

        let mut ghost = list.cursor_before_front_mut();
        assert!(ghost.delete_next());
        assert_eq!(list.front(), Some(&3));
        list.check_invariants();
    }

    #[test]
    fn equality() {
        let list = kittens();
        let other = kittens();

        assert_eq!(list, list);
        assert_eq!(other, list);
        assert!(list == other);

        let mut shorter = kittens();
        shorter.delete_front();
        assert_ne!(shorter, list);
    }

    #[test]
    fn copies_are_independent() {
        let list = kittens();

        let mut copy = list.clone();
        assert_eq!(copy, list);

        copy.clone_from(&list);
        assert_eq!(copy, list);

        copy = copy.clone();
        assert_eq!(copy, list);

        *copy.front_mut().unwrap() = Copyable::new(100);
        assert_eq!(list.front(), Some(&Copyable::new(1)));
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut list = kittens();
        let copy = list.clone();

        let mut moved = take(&mut list);
        assert_eq!(moved, copy);
        assert!(list.is_empty());

        list = take(&mut copy.clone());
        assert_eq!(moved, list);

        moved = take(&mut moved);
        assert_eq!(moved, list);
    }

    #[test]
    fn allocation_failure_keeps_contents() {
        let budget = Budget::new(2);
        let mut list = ForwardList::new_in(&budget);

        list.try_push_front(2_u16).unwrap();
        list.try_push_front(1).unwrap();

        let error = list.try_push_front(0).unwrap_err();
        assert!(error.is_alloc());
        assert_eq!(error.into_value(), 0);
        assert!(list.iter().eq(&[1, 2]));

        budget.refill(1);
        assert!(list.try_clone_in(&budget).is_err());
        assert_eq!(budget.live(), 2);
        assert!(list.iter().eq(&[1, 2]));

        drop(list);
        assert_eq!(budget.live(), 0);
    }

    #[test]
    fn every_element_dropped_once() {
        let (counter, drops) = DropCounter::new();
        let mut list = ForwardList::<DropCounter>::new();
        for _ in 0..6 {
            list.push_front(&counter);
        }
        drop(counter);
        assert_eq!(drops.get(), 1);

        list.delete_front();
        drop(list.pop_front());
        assert_eq!(drops.get(), 3);

        let mut iter = list.into_iter();
        drop(iter.next());
        assert_eq!(drops.get(), 4);
        drop(iter);
        assert_eq!(drops.get(), 7);
    }

    #[test]
    fn long_lists_drop_iteratively() {
        let mut list = ForwardList::<u32>::new();
        for n in 0..1_000_000 {
            list.push_front(n);
        }
        assert_eq!(list.front(), Some(&999_999));

        drop(list);
    }

    #[test]
    fn zero_sized_elements() {
        let mut list = ForwardList::<()>::new();
        list.push_front(());
        list.emplace_front(());

        assert_eq!(list.len(), 2);
        assert_eq!(list.pop_front(), Some(()));
        list.check_invariants();
    }

    #[test]
    fn panicking_destructor_still_frees_the_rest() {
        let budget = Budget::new(5);
        let (calm, live) = Fragile::new(usize::MAX);
        let mut list: ForwardList<Fragile, &Budget> = ForwardList::new_in(&budget);

        list.push_front(calm.clone());
        list.push_front(calm.clone());
        list.push_front(calm.clone().panicking_on_drop());
        list.push_front(calm.clone());
        list.push_front(calm);
        assert_eq!(live.get(), 5);
        assert_eq!(budget.live(), 5);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| drop(list)));
        assert!(outcome.is_err());
        assert_eq!(live.get(), 0);
        assert_eq!(budget.live(), 0);
    }
}
