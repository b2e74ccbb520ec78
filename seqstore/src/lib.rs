#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(not(debug_assertions), warn(clippy::panic_in_result_fn))]
#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

use core::{
    alloc::{Layout, LayoutError},
    marker::PhantomData,
    ptr::NonNull,
};

use allocator_api2::alloc::Allocator;

mod buffer;
mod cmp;
mod errors;
mod fmt;
mod maybe_uninit;
mod opaque;
pub use buffer::RawBuffer;
pub use errors::AllocateError;
pub use maybe_uninit::{new_maybe_uninit, MaybeUninitNode, StructureHandle};
pub use opaque::HeaderOpaqueNodePtr;

#[cfg(feature = "alloc")]
mod alloc {
    extern crate alloc;
    pub use alloc::alloc::handle_alloc_error;
    pub use allocator_api2::alloc::Global;
}

/// A pointer into a single allocation that holds a `Header` followed by a `T`.
///
/// The pointer addresses the value; the header sits at a fixed negative offset computed from the
/// two types. Containers keep their links in the header and hand the value out directly.
#[repr(transparent)]
pub struct NodePtr<Header, T> {
    mid: NonNull<()>,
    _phantom: PhantomData<(*mut Header, *mut T)>,
}

impl<Header, T> Clone for NodePtr<Header, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

// No `T: Copy` bound: this copies the pointer, not the node.
impl<Header, T> Copy for NodePtr<Header, T> {}

/// Moves `ptr` back by `count` bytes.
///
/// # Safety
/// The result must stay inside the allocation `ptr` points into.
#[inline]
pub(crate) const unsafe fn byte_sub<T>(ptr: NonNull<T>, count: usize) -> NonNull<T> {
    // SAFETY:
    // The result stays inside the same allocation (safety condition).
    let moved = unsafe { ptr.as_ptr().cast::<u8>().sub(count) };
    // SAFETY:
    // An allocation cannot contain the null address.
    unsafe { NonNull::new_unchecked(moved.cast::<T>()) }
}

/// Moves `ptr` forward by `count` bytes.
///
/// # Safety
/// The result must stay inside (or one past the end of) the allocation `ptr` points into.
#[inline]
pub(crate) const unsafe fn byte_add<T>(ptr: NonNull<T>, count: usize) -> NonNull<T> {
    // SAFETY:
    // The result stays inside (or one past the end of) the same allocation (safety condition).
    let moved = unsafe { ptr.as_ptr().cast::<u8>().add(count) };
    // SAFETY:
    // An allocation, and the address one past its end, cannot be null.
    unsafe { NonNull::new_unchecked(moved.cast::<T>()) }
}

impl<Header, T> NodePtr<Header, T> {
    /// The layout of the whole node and the byte offset of the value inside it.
    fn layout() -> Result<(Layout, usize), LayoutError> {
        let (layout, value_offset) = Layout::new::<Header>().extend(Layout::new::<T>())?;
        Ok((layout.pad_to_align(), value_offset))
    }

    /// [`Self::layout`] for a node type that is known to have been allocated already.
    ///
    /// # Safety
    /// A node of this exact type must have been allocated before, so the layout cannot overflow.
    unsafe fn known_layout() -> (Layout, usize) {
        let layout = Self::layout();
        debug_assert!(layout.is_ok());
        // SAFETY:
        // The same calculation succeeded when the node was allocated (safety condition).
        unsafe { layout.unwrap_unchecked() }
    }

    #[must_use]
    #[inline]
    /// Forgets the header type, so the node can be passed around by code that only knows `T`.
    pub const fn to_header_opaque(self) -> HeaderOpaqueNodePtr<T> {
        // SAFETY:
        // `self.mid` addresses the value of a node.
        unsafe { HeaderOpaqueNodePtr::from_value_ptr(self.mid) }
    }

    #[must_use]
    /// The address of the header.
    pub fn header_ptr(self) -> NonNull<Header> {
        // SAFETY:
        // `self` exists, so a node of this type was allocated.
        let (_, value_offset) = unsafe { Self::known_layout() };
        // SAFETY:
        // The header starts the allocation, `value_offset` bytes before the value.
        let ptr = unsafe { byte_sub(self.mid, value_offset) }.cast::<Header>();
        debug_assert!(ptr.as_ptr().is_aligned());
        ptr
    }

    #[must_use]
    #[inline]
    /// The untyped address of the value; [`Self::data_ptr`] is the typed one.
    pub const fn value_ptr(self) -> NonNull<()> {
        self.mid
    }

    #[must_use]
    #[inline]
    /// The address of the value.
    pub const fn data_ptr(self) -> NonNull<T> {
        self.mid.cast()
    }

    #[must_use]
    #[inline]
    /// Rebuilds a node from [`Self::value_ptr`].
    ///
    /// # Safety
    /// `ptr` must be the value address of a node allocated with this `Header` and `T`.
    pub const unsafe fn from_value_ptr(ptr: NonNull<()>) -> Self {
        Self {
            mid: ptr,
            _phantom: PhantomData,
        }
    }

    /// Attempts to allocate a node in `allocator`.
    ///
    /// Both the header and the value are left uninitialised, ready to be written.
    ///
    /// # Errors
    /// If the combined layout overflows or the allocator refuses it, this will return an
    /// [`AllocateError`].
    pub fn try_allocate_in<A>(allocator: A) -> Result<Self, AllocateError>
    where
        A: Allocator,
    {
        let (layout, value_offset) = Self::layout()?;
        let base = allocator
            .allocate(layout)
            .map_err(|error| AllocateError::new_alloc(error, layout))?;
        // SAFETY:
        // `value_offset` lies inside `layout`, which is what was just allocated.
        let mid = unsafe { byte_add(base.cast::<u8>(), value_offset) };
        Ok(Self {
            mid: mid.cast(),
            _phantom: PhantomData,
        })
    }

    #[cfg(feature = "alloc")]
    /// Attempts to allocate a node in the global allocator.
    ///
    /// # Errors
    /// See [`Self::try_allocate_in`].
    pub fn try_allocate() -> Result<Self, AllocateError> {
        Self::try_allocate_in(crate::alloc::Global)
    }

    #[must_use]
    /// Allocates a node in `allocator`, diverging through [`AllocateError::handle`] on failure.
    pub fn allocate_in<A>(allocator: A) -> Self
    where
        A: Allocator,
    {
        AllocateError::unwrap_result(Self::try_allocate_in(allocator))
    }

    #[cfg(feature = "alloc")]
    #[must_use]
    /// Allocates a node in the global allocator.
    pub fn allocate() -> Self {
        Self::allocate_in(crate::alloc::Global)
    }

    /// Frees the node's memory. Neither the header nor the value is dropped.
    ///
    /// # Safety
    /// - the node must be allocated in `allocator` and not freed yet
    /// - no reference into the node may be alive, and no copy of the pointer may be used afterwards
    pub unsafe fn deallocate<A>(self, allocator: A)
    where
        A: Allocator,
    {
        // SAFETY:
        // `self` exists, so a node of this type was allocated.
        let (layout, value_offset) = unsafe { Self::known_layout() };
        // SAFETY:
        // The allocation starts `value_offset` bytes before the value.
        let base = unsafe { byte_sub(self.mid, value_offset) }.cast();
        // SAFETY:
        // `base` and `layout` describe the allocation made in `allocator` (safety condition).
        unsafe { allocator.deallocate(base, layout) };
    }

    #[cfg(feature = "alloc")]
    /// [`Self::deallocate`] for a node allocated in the global allocator.
    ///
    /// # Safety
    /// As for [`Self::deallocate`], with the global allocator.
    pub unsafe fn deallocate_global(self) {
        // SAFETY:
        // Forwarded from the caller.
        unsafe { self.deallocate(crate::alloc::Global) };
    }
}

#[cfg(test)]
mod test {
    use core::mem::align_of;

    use crate::NodePtr;

    struct Header {
        next: Option<NodePtr<Header, u16>>,
        tag: u8,
    }

    #[test]
    fn header_and_value_share_allocation() {
        let node = NodePtr::<Header, u16>::allocate();
        // SAFETY:
        // The node is freshly allocated and its header pointer is valid for writes.
        unsafe { node.header_ptr().write(Header { next: None, tag: 7 }) };
        // SAFETY:
        // The value pointer is valid for writes of `u16`.
        unsafe { node.data_ptr().write(0xBEEF) };

        assert_eq!(node.data_ptr().as_ptr() as usize % align_of::<u16>(), 0);
        assert!(node.header_ptr().as_ptr() as usize <= node.value_ptr().as_ptr() as usize);

        // SAFETY:
        // Both were initialised above.
        let (header, value) = unsafe { (node.header_ptr().as_ref(), node.data_ptr().read()) };
        assert!(header.next.is_none());
        assert_eq!(header.tag, 7);
        assert_eq!(value, 0xBEEF);

        // SAFETY:
        // The node was allocated in the global allocator and is not used again.
        unsafe { node.deallocate_global() };
    }

    #[test]
    fn round_trips_through_value_pointer() {
        let node = NodePtr::<Header, u64>::allocate();
        // SAFETY:
        // The pointer came from `value_ptr` on the same node type.
        let again = unsafe { NodePtr::<Header, u64>::from_value_ptr(node.value_ptr()) };
        assert_eq!(node, again);
        assert_eq!(node.header_ptr(), again.header_ptr());

        // SAFETY:
        // The node was allocated in the global allocator and is not used again.
        unsafe { node.deallocate_global() };
    }

    #[test]
    fn zero_sized_values_still_get_a_header() {
        let node = NodePtr::<Header, ()>::allocate();
        // SAFETY:
        // The header pointer is valid for writes.
        unsafe { node.header_ptr().write(Header { next: None, tag: 1 }) };
        // SAFETY:
        // The header was initialised above.
        assert_eq!(unsafe { node.header_ptr().as_ref() }.tag, 1);
        // SAFETY:
        // The node was allocated in the global allocator and is not used again.
        unsafe { node.deallocate_global() };
    }
}
