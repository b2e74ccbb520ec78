#[cfg(feature = "alloc")]
use crate::alloc;
use core::fmt;

use allocator_api2::alloc::Allocator;
use seqstore::AllocateError;

use crate::utility::Forward;

use super::{
    node::{self, Link, Node},
    Cursor, ForwardList, MaybeUninitNode,
};

/// A mutable cursor over a [`ForwardList`].
///
/// Cursors point to an element in the list, or to the "ghost" position before the front.
/// Elements are inserted and removed after the cursor; on the "ghost" position that means at the front.
///
/// ```
/// use seqkit::forward_list;
///
/// let mut list = forward_list![1, 2, 3, 4];
/// let mut cursor = list.cursor_front_mut();
/// cursor.move_next();
/// *cursor.emplace_after_with(|| 0) += 10;
/// assert_eq!(cursor.remove_next(), Some(3));
///
/// assert!(list.iter().eq(&[1, 2, 10, 4]));
/// ```
pub struct CursorMut<
    'a,
    T,
    #[cfg(feature = "alloc")] A = alloc::Global,
    #[cfg(not(feature = "alloc"))] A,
> where
    A: Allocator,
{
    pub(crate) current: Option<Node<T>>,
    pub(crate) list: &'a mut ForwardList<T, A>,
}

impl<T, A> CursorMut<'_, T, A>
where
    A: Allocator,
{
    #[must_use]
    #[inline]
    /// Gets an immutable cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, A> {
        Cursor {
            current: self.current,
            list: self.list,
        }
    }

    /// Moves the cursor to the next element.
    ///
    /// If the cursor is on the "ghost" position, this moves to the front of the list.
    /// If the cursor is at the back of the list, this moves to the "ghost" position.
    pub fn move_next(&mut self) {
        self.current = self.next_node();
    }

    fn next_node(&self) -> Option<Node<T>> {
        match self.current {
            None => self.list.head,
            // SAFETY:
            // As the node is in the list, its header is initialised.
            Some(node) => unsafe { node.header_ptr().as_ref() }.next,
        }
    }

    #[must_use]
    #[inline]
    /// Returns [`true`] if the cursor is on the "ghost" position.
    pub const fn is_ghost(&self) -> bool {
        self.current.is_none()
    }

    #[must_use]
    /// Gets a mutable reference to the current element.
    ///
    /// If the cursor is on the "ghost" position, this returns [`None`].
    pub fn current(&mut self) -> Option<&mut T> {
        self.current.map(|node| {
            // SAFETY:
            // As the node is in the list, its value is initialised, and the list is borrowed
            // mutably through `self`.
            unsafe { node.data_ptr().as_mut() }
        })
    }

    #[must_use]
    /// Gets a mutable reference to the element after the current one.
    ///
    /// On the "ghost" position this is the front; at the back of the list this returns [`None`].
    pub fn peek_next(&mut self) -> Option<&mut T> {
        self.next_node().map(|node| {
            // SAFETY:
            // As above.
            unsafe { node.data_ptr().as_mut() }
        })
    }

    #[must_use]
    #[inline]
    /// Returns a reference to the underlying list.
    pub fn as_list(&self) -> &ForwardList<T, A> {
        self.list
    }

    #[inline]
    /// Attempts to allocate an uninitialised node after the current element.
    ///
    /// If the cursor is on the "ghost" position, the node will be inserted at the front of the list.
    /// The cursor does not move.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    pub fn try_allocate_uninit_after(
        &mut self,
    ) -> Result<MaybeUninitNode<'_, T, A>, AllocateError> {
        // SAFETY:
        // The current node is in the list.
        unsafe { node::try_new(&mut *self.list, self.current) }
    }

    #[must_use]
    #[inline]
    /// Allocates an uninitialised node after the current element.
    ///
    /// See [`Self::try_allocate_uninit_after`].
    pub fn allocate_uninit_after(&mut self) -> MaybeUninitNode<'_, T, A> {
        AllocateError::unwrap_result(self.try_allocate_uninit_after())
    }

    /// Attempts to construct a value with `f` in a new node after the current element.
    ///
    /// The node is allocated before `f` is called.
    /// On success, the cursor moves onto the new element and a reference to it is returned.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`] without calling `f`.
    /// The list and the cursor are left untouched.
    pub fn try_emplace_after_with<F>(&mut self, f: F) -> Result<&mut T, AllocateError>
    where
        F: FnOnce() -> T,
    {
        let mut node = self.try_allocate_uninit_after()?;
        node.write(f());
        let inserted = node.node();
        // SAFETY:
        // The value was written above.
        unsafe { node.insert() };

        // SAFETY:
        // Nodes handed out for a `ForwardList` are always allocated with `Header<T>`.
        let inserted = unsafe { inserted.to_transparent() };
        self.current = Some(inserted);
        // SAFETY:
        // The node is now in the list, which is borrowed mutably through `self`.
        Ok(unsafe { inserted.data_ptr().as_mut() })
    }

    #[inline]
    /// Constructs a value with `f` in a new node after the current element.
    ///
    /// The cursor moves onto the new element and a reference to it is returned.
    pub fn emplace_after_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        AllocateError::unwrap_result(self.try_emplace_after_with(f))
    }

    #[inline]
    /// Constructs a `T` from `args` in a new node after the current element.
    ///
    /// The cursor moves onto the new element and a reference to it is returned.
    pub fn emplace_after<Args>(&mut self, args: Args) -> &mut T
    where
        T: From<Args>,
    {
        self.emplace_after_with(|| T::from(args))
    }

    /// Attempts to insert `value` after the current element and move onto it.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`] holding `value`.
    /// The list and the cursor are left untouched.
    pub fn try_insert_after(&mut self, value: T) -> Result<(), AllocateError<T>> {
        let mut node = match self.try_allocate_uninit_after() {
            Ok(node) => node,
            Err(error) => return Err(error.with_value(value)),
        };
        node.write(value);
        let inserted = node.node();
        // SAFETY:
        // The value was written above.
        unsafe { node.insert() };

        // SAFETY:
        // Nodes handed out for a `ForwardList` are always allocated with `Header<T>`.
        self.current = Some(unsafe { inserted.to_transparent() });
        Ok(())
    }

    /// Inserts a value after the current element and moves onto it.
    ///
    /// An owned `T` is moved in and a `&T` is cloned in, after the node has been allocated.
    pub fn insert_after<V>(&mut self, value: V)
    where
        V: Forward<T>,
    {
        self.emplace_after_with(|| value.forward());
    }

    #[must_use]
    /// Unlinks the node after the current element.
    /// If you do not want a [`MaybeUninitNode`], this is the wrong function!
    ///
    /// The cursor does not move.
    /// If the cursor is at the back of the list, this returns [`None`].
    pub fn remove_next_node(&mut self) -> Option<MaybeUninitNode<'_, T, A>> {
        let next = self.next_node()?;
        // SAFETY:
        // As the node is in the list, its header is initialised.
        let after = unsafe { next.header_ptr().as_ref() }.next;

        match self.current {
            None => {
                debug_assert_eq!(self.list.head, Some(next));
                self.list.head = after;
            }
            Some(current) => {
                // SAFETY:
                // As we have a mutable reference to the list, the current node's header is not
                // aliased and is valid for reads and writes.
                let header = unsafe { current.header_ptr().as_mut() };

                debug_assert_eq!(header.next, Some(next));
                header.next = after;
            }
        }

        let link = Link {
            list: &mut *self.list,
            previous: self.current,
        };
        // SAFETY:
        // The node has been unlinked, so nothing else aliases it, and its header still points to
        // the node that now follows the current one.
        Some(unsafe { seqstore::new_maybe_uninit(link, next.to_header_opaque()) })
    }

    #[must_use]
    #[inline]
    /// Removes the element after the current one and returns it.
    ///
    /// If the cursor is at the back of the list, this returns [`None`].
    pub fn remove_next(&mut self) -> Option<T> {
        self.remove_next_node().map(|next| {
            // SAFETY:
            // Every node in the list holds an initialised value.
            unsafe { next.take() }
        })
    }

    #[inline]
    /// Deletes and drops the element after the current one.
    ///
    /// Returns [`true`] if an element was removed and [`false`] if the cursor was at the back.
    pub fn delete_next(&mut self) -> bool {
        self.remove_next_node()
            .map(|mut next| {
                // SAFETY:
                // Every node in the list holds an initialised value.
                unsafe { next.drop_in_place() };
            })
            .is_some()
    }
}

// SAFETY:
// - `CursorMut`s hold a mutable reference to the list, so they have exclusive access to the data
// - the data implements `Send` (trait bound)
// - the allocator implements `Send` (trait bound)
unsafe impl<T, A> Send for CursorMut<'_, T, A>
where
    T: Send,
    A: Allocator + Send,
{
}

// SAFETY:
// - the data cannot be mutated through an immutable reference to a `CursorMut`
// - the data implements `Sync` (trait bound)
// - the allocator implements `Sync` (trait bound)
unsafe impl<T, A> Sync for CursorMut<'_, T, A>
where
    T: Sync,
    A: Allocator + Sync,
{
}

impl<T, A> fmt::Debug for CursorMut<'_, T, A>
where
    T: fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut")
            .field(&self.as_cursor().current())
            .finish()
    }
}
