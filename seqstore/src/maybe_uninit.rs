use core::{
    any::type_name,
    fmt,
    mem::{ManuallyDrop, MaybeUninit},
    ptr::{self, NonNull},
};

use allocator_api2::alloc::Allocator;

use crate::HeaderOpaqueNodePtr;

/// The link between a [`MaybeUninitNode`] and the container it will be spliced into.
///
/// Containers implement this on a small handle (usually a mutable borrow of the container plus
/// whatever position information the splice needs) and hand out
/// `MaybeUninitNode<T, TheirHandle>` values, typically behind a type alias.
/// The methods here are called by [`MaybeUninitNode`]; containers should not call them directly.
///
/// The node's header is written by the container before [`new_maybe_uninit`], so by the time
/// [`insert`](Self::insert) runs the header already describes where the node goes.
///
/// ```rust
/// # use allocator_api2::alloc::{Allocator, Global};
/// # use seqstore::{self, HeaderOpaqueNodePtr, NodePtr, StructureHandle};
/// type Node<T> = NodePtr<Below<T>, T>;
///
/// struct Below<T>(Option<Node<T>>);
///
/// pub struct LinkedStack<T> {
///     top: Option<Node<T>>,
/// }
///
/// struct PushHandle<'a, T>(&'a mut LinkedStack<T>);
///
/// pub type UninitTop<'a, T> = seqstore::MaybeUninitNode<T, PushHandle<'a, T>>;
///
/// impl<T> StructureHandle<T> for PushHandle<'_, T> {
///     type Allocator = Global;
///
///     unsafe fn insert(self, node: HeaderOpaqueNodePtr<T>) {
///         // `Below` was pointed at the old top before the node was handed out
///         self.0.top = Some(unsafe { node.to_transparent::<Below<T>>() });
///     }
///
///     fn allocator(&self) -> &Global {
///         &Global
///     }
///
///     unsafe fn deallocate(&self, node: HeaderOpaqueNodePtr<T>) {
///         unsafe { node.to_transparent::<Below<T>>().deallocate_global() };
///     }
/// }
/// ```
pub trait StructureHandle<T> {
    type Allocator: Allocator;

    /// Links the node into the container.
    ///
    /// # Safety
    /// Only [`MaybeUninitNode::insert`] calls this. Implementations may rely on:
    /// - the header being exactly as it was when the node was wrapped
    /// - the value being initialised
    /// - the node being allocated and owned solely by the caller
    unsafe fn insert(self, node: HeaderOpaqueNodePtr<T>);

    /// The allocator the node lives in.
    fn allocator(&self) -> &Self::Allocator;

    /// Frees the node without touching its value, which may be uninitialised.
    ///
    /// Implement it with [`NodePtr::deallocate`](crate::NodePtr::deallocate).
    ///
    /// # Safety
    /// Only the destructor of [`MaybeUninitNode`] calls this. Implementations may rely on:
    /// - the header being exactly as it was when the node was wrapped
    /// - the node still being the allocation it was wrapped with
    /// - the node being owned solely by the caller
    unsafe fn deallocate(&self, node: HeaderOpaqueNodePtr<T>);
}

// Every `MaybeUninitNode` owns its node outright: the node stays allocated, is never aliased,
// never moves and keeps the header it was wrapped with until it is inserted or freed.

/// An allocated node, outside any container, whose value may not be initialised yet.
///
/// The usual life of one is: allocate it through the container, [`write`](Self::write) a value,
/// then [`insert`](Self::insert) it.
/// A node taken out of a container can go the other way with [`take`](Self::take).
///
/// Dropping it frees the allocation but never drops the value.
pub struct MaybeUninitNode<T, S>
where
    S: StructureHandle<T>,
{
    structure: S,
    node: HeaderOpaqueNodePtr<T>,
}

macro_rules! initialised_value_safety {
    () => {
        r"
# Safety
The node must hold a live value: written, not yet dropped or moved out, and not a bitwise
duplicate of a value owned elsewhere (unless `T` is [`Copy`]).
"
    };
}

/// Wraps a detached node and the handle of the container it belongs to.
///
/// # Safety
/// Only the crate implementing [`StructureHandle`] for `S` may call this.
/// `node` must be allocated, its header must already be written the way `S::insert` expects,
/// and no other copy of `node` may be used afterwards.
pub const unsafe fn new_maybe_uninit<T, S>(
    structure: S,
    node: HeaderOpaqueNodePtr<T>,
) -> MaybeUninitNode<T, S>
where
    S: StructureHandle<T>,
{
    MaybeUninitNode { structure, node }
}

impl<T, S> MaybeUninitNode<T, S>
where
    S: StructureHandle<T>,
{
    #[must_use]
    #[inline]
    /// Gets a pointer to the value.
    pub const fn as_ptr(&self) -> NonNull<T> {
        self.node.data_ptr()
    }

    #[must_use]
    #[inline]
    /// The wrapped node.
    ///
    /// After [`Self::insert`] it keeps pointing at the same value for as long as the container holds it.
    pub const fn node(&self) -> HeaderOpaqueNodePtr<T> {
        self.node
    }

    fn into_handle(self) -> (S, HeaderOpaqueNodePtr<T>) {
        let this = ManuallyDrop::new(self);
        // SAFETY:
        // `this` is never dropped or used again, so reading the handle out moves it.
        let structure = unsafe { ptr::read(&this.structure) };
        (structure, this.node)
    }

    #[inline]
    /// Writes `value` into the node and returns a reference to it.
    ///
    /// A value already in the node is overwritten without being dropped.
    pub fn write(&mut self, value: T) -> &mut T {
        self.as_mut().write(value)
    }

    #[inline]
    /// Drops the value in place, leaving the node allocated.
    ///
    #[doc = initialised_value_safety!()]
    pub unsafe fn drop_in_place(&mut self) {
        // SAFETY:
        // The node is owned by `self` alone and holds a live value (safety condition).
        unsafe { self.as_ptr().drop_in_place() };
    }

    /// Splices the node into its container.
    ///
    #[doc = initialised_value_safety!()]
    pub unsafe fn insert(self) {
        let (structure, node) = self.into_handle();
        // SAFETY:
        // The header is untouched since wrapping, the value is live (safety condition) and the
        // node is still allocated and unaliased.
        unsafe { structure.insert(node) };
    }

    #[must_use]
    #[inline]
    /// Moves the value out and frees the node.
    ///
    #[doc = initialised_value_safety!()]
    pub unsafe fn take(self) -> T {
        // SAFETY:
        // The node is owned by `self` alone and holds a live value (safety condition).
        // Dropping `self` afterwards only frees the allocation.
        unsafe { self.as_ptr().read() }
    }
}

impl<T, S> Drop for MaybeUninitNode<T, S>
where
    S: StructureHandle<T>,
{
    fn drop(&mut self) {
        // SAFETY:
        // The node is still the allocation it was wrapped with, with the same header, and nothing
        // else refers to it.
        unsafe { self.structure.deallocate(self.node) };
    }
}

// SAFETY:
// A `MaybeUninitNode` owns its value and its handle, like a `Box<T>` paired with `S`, so it can
// move between threads when both can.
unsafe impl<T, S> Send for MaybeUninitNode<T, S>
where
    T: Send,
    S: StructureHandle<T> + Send,
{
}

// SAFETY:
// Shared access only reads the value or the handle.
unsafe impl<T, S> Sync for MaybeUninitNode<T, S>
where
    T: Sync,
    S: StructureHandle<T> + Sync,
{
}

impl<T, S> AsRef<MaybeUninit<T>> for MaybeUninitNode<T, S>
where
    S: StructureHandle<T>,
{
    #[inline]
    fn as_ref(&self) -> &MaybeUninit<T> {
        // SAFETY:
        // The slot is reachable only through `self`, and `MaybeUninit<T>` has the layout of `T`.
        unsafe { self.as_ptr().cast::<MaybeUninit<T>>().as_ref() }
    }
}

impl<T, S> AsMut<MaybeUninit<T>> for MaybeUninitNode<T, S>
where
    S: StructureHandle<T>,
{
    #[inline]
    fn as_mut(&mut self) -> &mut MaybeUninit<T> {
        // SAFETY:
        // As above, and `self` is borrowed mutably.
        unsafe { self.as_ptr().cast::<MaybeUninit<T>>().as_mut() }
    }
}

impl<T, S> fmt::Debug for MaybeUninitNode<T, S>
where
    S: StructureHandle<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MaybeUninitNode")
            .field(&type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use allocator_api2::alloc::Global;

    use crate::{new_maybe_uninit, HeaderOpaqueNodePtr, NodePtr, StructureHandle};

    type Node<T> = NodePtr<Header<T>, T>;

    struct Header<T> {
        below: Option<Node<T>>,
    }

    struct Stack<T> {
        top: Option<Node<T>>,
    }

    impl<T> StructureHandle<T> for &mut Stack<T> {
        type Allocator = Global;

        unsafe fn insert(self, node: HeaderOpaqueNodePtr<T>) {
            // SAFETY:
            // Nodes in this test are always allocated with `Header<T>`.
            let node = unsafe { node.to_transparent::<Header<T>>() };
            // SAFETY:
            // The header was initialised before the node was handed out.
            debug_assert_eq!(unsafe { node.header_ptr().as_ref() }.below, self.top);
            self.top = Some(node);
        }

        fn allocator(&self) -> &Self::Allocator {
            &Global
        }

        unsafe fn deallocate(&self, node: HeaderOpaqueNodePtr<T>) {
            // SAFETY:
            // Nodes in this test are always allocated with `Header<T>` in the global allocator.
            unsafe { node.to_transparent::<Header<T>>().deallocate_global() };
        }
    }

    fn push<T>(stack: &mut Stack<T>, value: T) {
        let node = Node::<T>::allocate();
        // SAFETY:
        // The header pointer of a fresh node is valid for writes.
        unsafe { node.header_ptr().write(Header { below: stack.top }) };
        // SAFETY:
        // The node has not been deallocated and its header is initialised.
        let mut uninit = unsafe { new_maybe_uninit(stack, node.to_header_opaque()) };
        uninit.write(value);
        // SAFETY:
        // The value was written above.
        unsafe { uninit.insert() };
    }

    fn pop<T>(stack: &mut Stack<T>) -> Option<T> {
        let top = stack.top?;
        // SAFETY:
        // Nodes in the stack have initialised headers.
        stack.top = unsafe { top.header_ptr().as_ref() }.below;
        // SAFETY:
        // The node was just unlinked, so nothing else aliases it.
        let uninit = unsafe { new_maybe_uninit(stack, top.to_header_opaque()) };
        // SAFETY:
        // Every node in the stack holds an initialised value.
        Some(unsafe { uninit.take() })
    }

    #[test]
    fn insert_then_take() {
        let mut stack = Stack { top: None };
        push(&mut stack, String::from("a"));
        push(&mut stack, String::from("b"));

        assert_eq!(pop(&mut stack).as_deref(), Some("b"));
        assert_eq!(pop(&mut stack).as_deref(), Some("a"));
        assert!(pop(&mut stack).is_none());
    }

    #[test]
    fn dropping_uninit_node_only_deallocates() {
        let mut stack = Stack::<String> { top: None };
        let node = Node::<String>::allocate();
        // SAFETY:
        // The header pointer of a fresh node is valid for writes.
        unsafe { node.header_ptr().write(Header { below: None }) };
        // SAFETY:
        // The node has not been deallocated and its header is initialised.
        let uninit = unsafe { new_maybe_uninit(&mut stack, node.to_header_opaque()) };
        assert!(format!("{uninit:?}").contains("String"));
        drop(uninit);

        assert!(stack.top.is_none());
    }
}
