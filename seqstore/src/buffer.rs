use core::{alloc::Layout, mem::size_of, ptr::NonNull};

use allocator_api2::alloc::Allocator;

use crate::AllocateError;

/// An uninitialised, contiguous buffer of `T` with a capacity.
///
/// The buffer does not know which of its slots are initialised and never drops values.
/// It does not hold its allocator either; every call that touches the allocation takes the allocator it was created with.
///
/// Zero-sized types never allocate and report a capacity of [`usize::MAX`].
pub struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = size_of::<T>() == 0;

    #[must_use]
    #[inline]
    /// Creates a buffer that has not allocated.
    pub const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: if Self::IS_ZST { usize::MAX } else { 0 },
        }
    }

    #[must_use]
    #[inline]
    /// Gets the number of `T` the buffer can hold.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    #[inline]
    /// Gets the pointer to the first slot.
    ///
    /// This is dangling (but aligned) if the buffer has not allocated.
    pub const fn as_ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[must_use]
    #[inline]
    /// Returns [`true`] if the buffer owns an allocation.
    pub const fn is_allocated(&self) -> bool {
        !Self::IS_ZST && self.capacity != 0
    }

    /// Attempts to allocate a buffer for `capacity` values in the given allocator.
    ///
    /// # Errors
    /// If allocation fails, or the size of the buffer overflows, this will return an [`AllocateError`].
    pub fn try_allocate_in<A>(capacity: usize, allocator: A) -> Result<Self, AllocateError>
    where
        A: Allocator,
    {
        if Self::IS_ZST || capacity == 0 {
            return Ok(Self::dangling());
        }

        let layout = Layout::array::<T>(capacity)?;
        match allocator.allocate(layout) {
            Ok(ptr) => Ok(Self {
                ptr: ptr.cast(),
                capacity,
            }),
            Err(error) => Err(AllocateError::new_alloc(error, layout)),
        }
    }

    #[cfg(feature = "alloc")]
    /// Attempts to allocate a buffer for `capacity` values in the global allocator.
    ///
    /// # Errors
    /// If allocation fails, or the size of the buffer overflows, this will return an [`AllocateError`].
    pub fn try_allocate(capacity: usize) -> Result<Self, AllocateError> {
        Self::try_allocate_in(capacity, crate::alloc::Global)
    }

    #[must_use]
    /// Allocates a buffer for `capacity` values in the given allocator.
    pub fn allocate_in<A>(capacity: usize, allocator: A) -> Self
    where
        A: Allocator,
    {
        AllocateError::unwrap_result(Self::try_allocate_in(capacity, allocator))
    }

    #[cfg(feature = "alloc")]
    #[must_use]
    /// Allocates a buffer for `capacity` values in the global allocator.
    pub fn allocate(capacity: usize) -> Self {
        Self::allocate_in(capacity, crate::alloc::Global)
    }

    /// Attempts to grow the buffer so that it can hold `new_capacity` values.
    ///
    /// The first `capacity` slots are moved into the new allocation bit for bit.
    /// If `new_capacity` is not larger than the current capacity, this does nothing.
    ///
    /// # Safety
    /// `allocator` must be the allocator the buffer was allocated with.
    ///
    /// # Errors
    /// If allocation fails, or the size of the buffer overflows, this will return an [`AllocateError`].
    /// The buffer is left untouched.
    pub unsafe fn try_grow_in<A>(
        &mut self,
        new_capacity: usize,
        allocator: A,
    ) -> Result<(), AllocateError>
    where
        A: Allocator,
    {
        if Self::IS_ZST || new_capacity <= self.capacity {
            return Ok(());
        }

        let new_layout = Layout::array::<T>(new_capacity)?;
        let result = if self.capacity == 0 {
            allocator.allocate(new_layout)
        } else {
            let old_layout = Layout::array::<T>(self.capacity);
            debug_assert!(old_layout.is_ok());
            // SAFETY:
            // This layout was calculated when the buffer was allocated, so it cannot fail.
            let old_layout = unsafe { old_layout.unwrap_unchecked() };
            // SAFETY:
            // - `self.ptr` was allocated by `allocator` (safety condition) with `old_layout`
            // - `new_layout` is at least as large as `old_layout` and has the same alignment
            unsafe { allocator.grow(self.ptr.cast(), old_layout, new_layout) }
        };

        match result {
            Ok(ptr) => {
                self.ptr = ptr.cast();
                self.capacity = new_capacity;
                Ok(())
            }
            Err(error) => Err(AllocateError::new_alloc(error, new_layout)),
        }
    }

    /// Attempts to shrink the buffer so that it holds exactly `new_capacity` values.
    ///
    /// The first `new_capacity` slots are moved into the new allocation bit for bit.
    /// Shrinking to zero deallocates the buffer.
    /// If `new_capacity` is not smaller than the current capacity, this does nothing.
    ///
    /// # Safety
    /// `allocator` must be the allocator the buffer was allocated with.
    /// Any values in slots past `new_capacity` are forgotten.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    /// The buffer is left untouched.
    pub unsafe fn try_shrink_in<A>(
        &mut self,
        new_capacity: usize,
        allocator: A,
    ) -> Result<(), AllocateError>
    where
        A: Allocator,
    {
        if Self::IS_ZST || new_capacity >= self.capacity {
            return Ok(());
        }

        if new_capacity == 0 {
            // SAFETY:
            // `allocator` is the allocator the buffer was allocated with (safety condition).
            unsafe { self.deallocate(allocator) };
            return Ok(());
        }

        let old_layout = Layout::array::<T>(self.capacity);
        let new_layout = Layout::array::<T>(new_capacity);
        debug_assert!(old_layout.is_ok() && new_layout.is_ok());
        // SAFETY:
        // The old layout was calculated when the buffer was allocated.
        let old_layout = unsafe { old_layout.unwrap_unchecked() };
        // SAFETY:
        // The new layout is smaller than the old one.
        let new_layout = unsafe { new_layout.unwrap_unchecked() };

        // SAFETY:
        // - `self.ptr` was allocated by `allocator` (safety condition) with `old_layout`
        // - `new_layout` is smaller than `old_layout` and has the same alignment
        match unsafe { allocator.shrink(self.ptr.cast(), old_layout, new_layout) } {
            Ok(ptr) => {
                self.ptr = ptr.cast();
                self.capacity = new_capacity;
                Ok(())
            }
            Err(error) => Err(AllocateError::new_alloc(error, new_layout)),
        }
    }

    /// Deallocates the buffer, leaving it dangling with no capacity.
    ///
    /// Note that this does not drop any contained values.
    ///
    /// # Safety
    /// `allocator` must be the allocator the buffer was allocated with.
    /// This must not be called whilst there is a living reference into the buffer.
    pub unsafe fn deallocate<A>(&mut self, allocator: A)
    where
        A: Allocator,
    {
        if !self.is_allocated() {
            return;
        }

        let layout = Layout::array::<T>(self.capacity);
        debug_assert!(layout.is_ok());
        // SAFETY:
        // This was calculated when the buffer was allocated, so it cannot fail.
        let layout = unsafe { layout.unwrap_unchecked() };
        // SAFETY:
        // `allocator` is the allocator used to allocate the buffer (safety condition) and `layout`
        // is the layout it was allocated with.
        unsafe { allocator.deallocate(self.ptr.cast(), layout) };
        *self = Self::dangling();
    }

    #[cfg(feature = "alloc")]
    /// Deallocates a buffer that was allocated in the global allocator.
    ///
    /// # Safety
    /// The buffer must have been allocated in the global allocator.
    /// This must not be called whilst there is a living reference into the buffer.
    pub unsafe fn deallocate_global(&mut self) {
        // SAFETY:
        // The buffer was allocated with `alloc::Global` (safety condition).
        unsafe { self.deallocate(crate::alloc::Global) };
    }
}

#[cfg(test)]
mod test {
    use core::{alloc::Layout, ptr::NonNull};

    use allocator_api2::alloc::{AllocError, Allocator};

    use crate::RawBuffer;

    struct Refuse;

    // SAFETY:
    // Every allocation fails, so there is nothing to free.
    unsafe impl Allocator for Refuse {
        fn allocate(&self, _layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
            Err(AllocError)
        }

        unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {
            unreachable!("nothing was allocated");
        }
    }

    #[test]
    fn grow_keeps_contents() {
        let mut buffer = RawBuffer::<u32>::allocate(2);
        assert_eq!(buffer.capacity(), 2);

        // SAFETY:
        // The first slot is inside the allocation.
        unsafe { buffer.as_ptr().write(10) };
        // SAFETY:
        // The buffer holds two slots.
        let second = unsafe { buffer.as_ptr().add(1) };
        // SAFETY:
        // The second slot is inside the allocation.
        unsafe { second.write(20) };

        // SAFETY:
        // The buffer was allocated in the global allocator.
        unsafe { buffer.try_grow_in(5, allocator_api2::alloc::Global) }.unwrap();
        assert_eq!(buffer.capacity(), 5);
        // SAFETY:
        // The first two slots were initialised and moved by the grow.
        let second = unsafe { buffer.as_ptr().add(1) };
        // SAFETY:
        // As above.
        assert_eq!(unsafe { buffer.as_ptr().read() }, 10);
        // SAFETY:
        // As above.
        assert_eq!(unsafe { second.read() }, 20);

        // SAFETY:
        // The buffer was allocated in the global allocator.
        unsafe { buffer.try_shrink_in(1, allocator_api2::alloc::Global) }.unwrap();
        assert_eq!(buffer.capacity(), 1);
        // SAFETY:
        // The first slot survived the shrink.
        assert_eq!(unsafe { buffer.as_ptr().read() }, 10);

        // SAFETY:
        // The buffer was allocated in the global allocator.
        unsafe { buffer.deallocate_global() };
        assert_eq!(buffer.capacity(), 0);
        assert!(!buffer.is_allocated());
    }

    #[test]
    fn failed_allocation_leaves_buffer_untouched() {
        assert!(RawBuffer::<u8>::try_allocate_in(4, Refuse).is_err());

        let mut buffer = RawBuffer::<u8>::dangling();
        // SAFETY:
        // A dangling buffer has no allocation to mismatch.
        let error = unsafe { buffer.try_grow_in(8, Refuse) }.unwrap_err();
        assert_eq!(error.layout(), Some(Layout::array::<u8>(8).unwrap()));
        assert_eq!(buffer.capacity(), 0);
    }

    #[test]
    fn oversized_requests_are_layout_errors() {
        let error = RawBuffer::<u64>::try_allocate(usize::MAX).unwrap_err();
        assert!(!error.is_alloc());
    }

    #[test]
    fn zero_sized_types_never_allocate() {
        let mut buffer = RawBuffer::<()>::try_allocate_in(1024, Refuse).unwrap();
        assert_eq!(buffer.capacity(), usize::MAX);
        assert!(!buffer.is_allocated());

        // SAFETY:
        // Nothing is ever allocated for a zero-sized type.
        unsafe { buffer.try_grow_in(usize::MAX, Refuse) }.unwrap();
        // SAFETY:
        // As above.
        unsafe { buffer.deallocate(Refuse) };
    }
}
