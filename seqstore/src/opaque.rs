use core::{marker::PhantomData, ptr::NonNull};

use crate::NodePtr;

/// A [`NodePtr`] whose header type has been forgotten.
///
/// Code that only deals in values (such as [`MaybeUninitNode`](crate::MaybeUninitNode)) passes
/// these around; the container that owns the node restores the header type when it needs it.
/// ```rust
/// # use seqstore::{NodePtr, HeaderOpaqueNodePtr};
/// # type Header = Option<u8>;
/// let node: NodePtr<Header, u32> = NodePtr::allocate();
/// let opaque: HeaderOpaqueNodePtr<u32> = node.to_header_opaque();
/// // SAFETY: the node was allocated with `Header`
/// let node: NodePtr<Header, u32> = unsafe { opaque.to_transparent() };
/// // SAFETY: allocated globally, never used again
/// unsafe { node.deallocate_global() };
/// ```
#[repr(transparent)]
pub struct HeaderOpaqueNodePtr<T> {
    mid: NonNull<()>,
    _phantom: PhantomData<*mut T>,
}

impl<T> Clone for HeaderOpaqueNodePtr<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for HeaderOpaqueNodePtr<T> {}

impl<T> HeaderOpaqueNodePtr<T> {
    #[must_use]
    #[inline]
    /// Restores the header type.
    ///
    /// # Safety
    /// `Header` must be the type the node was allocated with.
    pub const unsafe fn to_transparent<Header>(self) -> NodePtr<Header, T> {
        // SAFETY:
        // `self.mid` is the value address of a node with this header (safety condition).
        unsafe { NodePtr::from_value_ptr(self.mid) }
    }

    #[must_use]
    #[inline]
    /// The untyped address of the value.
    pub const fn value_ptr(self) -> NonNull<()> {
        self.mid
    }

    #[must_use]
    #[inline]
    /// Rebuilds an opaque node from its value address.
    ///
    /// # Safety
    /// `ptr` must come from [`Self::value_ptr`] or [`NodePtr::value_ptr`].
    pub const unsafe fn from_value_ptr(ptr: NonNull<()>) -> Self {
        Self {
            mid: ptr,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    #[inline]
    /// The address of the value.
    pub const fn data_ptr(self) -> NonNull<T> {
        self.mid.cast()
    }
}

impl<Header, T> From<NodePtr<Header, T>> for HeaderOpaqueNodePtr<T> {
    #[inline]
    fn from(value: NodePtr<Header, T>) -> Self {
        value.to_header_opaque()
    }
}
