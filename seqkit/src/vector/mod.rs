//! A contiguous growable array with an explicit allocator.
//!
//! See [`Vector`].

#[cfg(feature = "alloc")]
use crate::alloc;
use core::{
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut, Index, IndexMut},
    ptr::{self, NonNull},
    slice::{self, SliceIndex},
};

use allocator_api2::alloc::Allocator;
use seqstore::{AllocateError, RawBuffer};

use crate::{
    utility::{Forward, Take},
    OutOfRange,
};

mod cmp;
mod convert;
mod into_iter;

pub use core::slice::{Iter, IterMut};
pub use into_iter::IntoIter;

/// A contiguous, growable array.
///
/// The first [`len`](Self::len) slots of the buffer hold live elements and the rest of the [`capacity`](Self::capacity) is uninitialised.
/// When a push would exceed the capacity, the buffer grows to `len + max(len, additional)`, so a run of pushes costs amortised O(1) each.
///
/// Iterators and references borrow the vector, so anything that can reallocate is rejected while they are alive.
///
/// ```
/// use seqkit::Vector;
///
/// let mut numbers: Vector<i32> = Vector::new();
/// for n in [4, 3, 2, 1] {
///     numbers.push_back(n);
/// }
///
/// assert_eq!(numbers, [4, 3, 2, 1]);
/// assert_eq!(numbers.capacity(), 4);
/// assert_eq!(numbers.at(7).unwrap_err().index(), 7);
/// ```
pub struct Vector<
    T,
    #[cfg(feature = "alloc")] A = alloc::Global,
    #[cfg(not(feature = "alloc"))] A,
> where
    A: Allocator,
{
    buffer: RawBuffer<T>,
    len: usize,
    allocator: A,
    _phantom: PhantomData<T>,
}

impl<T, A> Vector<T, A>
where
    A: Allocator,
{
    #[must_use]
    #[inline]
    /// Creates an empty [`Vector`] in the given allocator.
    ///
    /// This does not allocate.
    pub const fn new_in(allocator: A) -> Self {
        Self {
            buffer: RawBuffer::dangling(),
            len: 0,
            allocator,
            _phantom: PhantomData,
        }
    }

    /// Attempts to create an empty [`Vector`] with room for exactly `capacity` elements in the given allocator.
    ///
    /// # Errors
    /// If allocation fails, or the size of the buffer overflows, this will return an [`AllocateError`].
    pub fn try_with_capacity_in(capacity: usize, allocator: A) -> Result<Self, AllocateError> {
        let buffer = RawBuffer::try_allocate_in(capacity, allocator.by_ref())?;
        Ok(Self {
            buffer,
            len: 0,
            allocator,
            _phantom: PhantomData,
        })
    }

    #[must_use]
    #[inline]
    /// Creates an empty [`Vector`] with room for exactly `capacity` elements in the given allocator.
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
        AllocateError::unwrap_result(Self::try_with_capacity_in(capacity, allocator))
    }

    #[must_use]
    /// Creates a [`Vector`] of `len` default values in the given allocator.
    ///
    /// The capacity is exactly `len`.
    pub fn with_len_in(len: usize, allocator: A) -> Self
    where
        T: Default,
    {
        let mut vector = Self::with_capacity_in(len, allocator);
        vector.resize_with(len, T::default);
        vector
    }

    #[must_use]
    /// Creates a [`Vector`] of `len` clones of `value` in the given allocator.
    ///
    /// The capacity is exactly `len`.
    pub fn from_elem_in(len: usize, value: T, allocator: A) -> Self
    where
        T: Clone,
    {
        let mut vector = Self::with_capacity_in(len, allocator);
        vector.resize(len, value);
        vector
    }

    /// Attempts to create a [`Vector`] holding clones of the elements of `values` in the given allocator.
    ///
    /// The capacity is exactly `values.len()`.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    pub fn try_from_slice_in(values: &[T], allocator: A) -> Result<Self, AllocateError>
    where
        T: Clone,
    {
        let mut vector = Self::try_with_capacity_in(values.len(), allocator)?;
        vector.try_extend_from_slice(values)?;
        Ok(vector)
    }

    #[must_use]
    #[inline]
    /// Creates a [`Vector`] holding clones of the elements of `values` in the given allocator.
    pub fn from_slice_in(values: &[T], allocator: A) -> Self
    where
        T: Clone,
    {
        AllocateError::unwrap_result(Self::try_from_slice_in(values, allocator))
    }

    #[must_use]
    #[inline]
    /// Gets the number of elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    #[inline]
    /// Returns [`true`] if the vector holds no elements.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    #[inline]
    /// Gets the number of elements the vector can hold without reallocating.
    ///
    /// This is [`usize::MAX`] for zero-sized types.
    pub const fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    #[must_use]
    #[inline]
    /// Gets a reference to the allocator.
    pub const fn allocator(&self) -> &A {
        &self.allocator
    }

    #[must_use]
    #[inline]
    /// Gets a pointer to the start of the buffer.
    ///
    /// The pointer is dangling (but aligned) if the vector has not allocated.
    pub const fn as_ptr(&self) -> *const T {
        self.buffer.as_ptr().as_ptr()
    }

    #[must_use]
    #[inline]
    /// Gets a mutable pointer to the start of the buffer.
    ///
    /// The pointer is dangling (but aligned) if the vector has not allocated.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buffer.as_ptr().as_ptr()
    }

    #[must_use]
    #[inline]
    /// Views the live elements as a slice.
    pub const fn as_slice(&self) -> &[T] {
        // SAFETY:
        // The first `len` slots are initialised, and the pointer is aligned and non-null even when
        // nothing is allocated.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[must_use]
    #[inline]
    /// Views the live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.len;
        // SAFETY:
        // The first `len` slots are initialised, and we hold the only reference to them.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), len) }
    }

    #[must_use]
    #[inline]
    /// Iterates over references to the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        self.as_slice().iter()
    }

    #[must_use]
    #[inline]
    /// Iterates over mutable references to the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    #[inline]
    fn spare_ptr(&self) -> NonNull<T> {
        // SAFETY:
        // `len <= capacity`, so this is inside the buffer or one past its end.
        unsafe { self.buffer.as_ptr().add(self.len) }
    }

    /// Writes `value` into the first spare slot.
    ///
    /// # Safety
    /// There must be spare capacity.
    unsafe fn push_unchecked(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < self.capacity());

        let mut slot = self.spare_ptr();
        // SAFETY:
        // The slot is inside the buffer (safety condition) and uninitialised.
        unsafe { slot.write(value) };
        self.len += 1;
        // SAFETY:
        // The slot was initialised above and is borrowed through `self`.
        unsafe { slot.as_mut() }
    }

    fn try_grow_to(&mut self, capacity: usize) -> Result<(), AllocateError> {
        // SAFETY:
        // The buffer was allocated with `self.allocator`.
        unsafe { self.buffer.try_grow_in(capacity, self.allocator.by_ref()) }
    }

    /// Attempts to reserve room for at least `additional` more elements.
    ///
    /// If the vector has to grow, it grows to `len + max(len, additional)` so that repeated pushes stay amortised O(1).
    ///
    /// # Errors
    /// If allocation fails, or the new capacity overflows, this will return an [`AllocateError`].
    /// The vector is left untouched.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocateError> {
        if additional <= self.capacity() - self.len {
            return Ok(());
        }

        let required = self
            .len
            .checked_add(additional)
            .ok_or_else(AllocateError::new_capacity_overflow)?;
        let amortised = self
            .len
            .checked_add(self.len.max(additional))
            .unwrap_or(required);

        self.try_grow_to(amortised)
    }

    /// Attempts to reserve room for exactly `additional` more elements.
    ///
    /// # Errors
    /// If allocation fails, or the new capacity overflows, this will return an [`AllocateError`].
    /// The vector is left untouched.
    pub fn try_reserve_exact(&mut self, additional: usize) -> Result<(), AllocateError> {
        if additional <= self.capacity() - self.len {
            return Ok(());
        }

        let required = self
            .len
            .checked_add(additional)
            .ok_or_else(AllocateError::new_capacity_overflow)?;

        self.try_grow_to(required)
    }

    #[inline]
    /// Reserves room for at least `additional` more elements.
    ///
    /// See [`Self::try_reserve`].
    pub fn reserve(&mut self, additional: usize) {
        AllocateError::unwrap_result(self.try_reserve(additional));
    }

    #[inline]
    /// Reserves room for exactly `additional` more elements.
    pub fn reserve_exact(&mut self, additional: usize) {
        AllocateError::unwrap_result(self.try_reserve_exact(additional));
    }

    /// Attempts to shrink the capacity to the length.
    ///
    /// An empty vector releases its buffer.
    ///
    /// # Errors
    /// If reallocation fails, this will return an [`AllocateError`].
    /// The vector is left untouched.
    pub fn try_shrink_to_fit(&mut self) -> Result<(), AllocateError> {
        // SAFETY:
        // The buffer was allocated with `self.allocator` and every slot past `len` is
        // uninitialised.
        unsafe { self.buffer.try_shrink_in(self.len, self.allocator.by_ref()) }
    }

    #[inline]
    /// Shrinks the capacity to the length.
    pub fn shrink_to_fit(&mut self) {
        AllocateError::unwrap_result(self.try_shrink_to_fit());
    }

    /// Attempts to append `value`.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`] holding `value`.
    /// The vector is left untouched.
    pub fn try_push_back(&mut self, value: T) -> Result<(), AllocateError<T>> {
        if let Err(error) = self.try_reserve(1) {
            return Err(error.with_value(value));
        }

        // SAFETY:
        // There is room for at least one more element.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Appends a value.
    ///
    /// An owned `T` is moved in and a `&T` is cloned in, after any growth has happened.
    pub fn push_back<V>(&mut self, value: V)
    where
        V: Forward<T>,
    {
        self.reserve(1);
        // SAFETY:
        // There is room for at least one more element.
        unsafe { self.push_unchecked(value.forward()) };
    }

    #[inline]
    /// Constructs a `T` from `args` directly in a new slot at the back and returns it.
    pub fn emplace_back<Args>(&mut self, args: Args) -> &mut T
    where
        T: From<Args>,
    {
        self.emplace_back_with(|| T::from(args))
    }

    /// Constructs a value with `f` directly in a new slot at the back and returns it.
    ///
    /// The vector grows before `f` is called.
    pub fn emplace_back_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.reserve(1);
        // SAFETY:
        // There is room for at least one more element.
        unsafe { self.push_unchecked(f()) }
    }

    #[must_use]
    /// Removes the last element and returns it.
    ///
    /// If the vector is empty, this returns [`None`].
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY:
        // The slot at the old `len - 1` is initialised and is no longer part of the live range.
        Some(unsafe { self.spare_ptr().read() })
    }

    /// Deletes and drops the last element.
    ///
    /// Returns [`true`] if an element was removed and [`false`] if the vector was empty.
    pub fn delete_back(&mut self) -> bool {
        if self.len == 0 {
            return false;
        }

        self.len -= 1;
        // SAFETY:
        // The slot at the old `len - 1` is initialised and is no longer part of the live range.
        unsafe { self.spare_ptr().drop_in_place() };
        true
    }

    #[must_use]
    #[inline]
    /// Gets a reference to the first element.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    #[must_use]
    #[inline]
    /// Gets a reference to the last element.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[must_use]
    #[inline]
    /// Gets a mutable reference to the first element.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[must_use]
    #[inline]
    /// Gets a mutable reference to the last element.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Gets a reference to the element at `index`.
    ///
    /// # Errors
    /// If `index` is not less than the length, this will return [`OutOfRange`].
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        self.as_slice()
            .get(index)
            .ok_or_else(|| OutOfRange::new(index, self.len))
    }

    /// Gets a mutable reference to the element at `index`.
    ///
    /// # Errors
    /// If `index` is not less than the length, this will return [`OutOfRange`].
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or_else(|| OutOfRange::new(index, len))
    }

    /// Shortens the vector to `len` elements, dropping the rest.
    ///
    /// This does nothing if `len` is not less than the current length.
    /// The capacity is kept.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        // SAFETY:
        // `len` is less than the current length, so it is inside the buffer.
        let start = unsafe { self.buffer.as_ptr().add(len) };
        let tail = ptr::slice_from_raw_parts_mut(start.as_ptr(), self.len - len);
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = len;
        // SAFETY:
        // The tail was initialised and is no longer part of the live range.
        unsafe { ptr::drop_in_place(tail) };
    }

    #[inline]
    /// Drops every element, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Attempts to resize the vector to `new_len`, filling new slots with values from `f`.
    ///
    /// The vector grows before `f` is called, so on error nothing has been constructed.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    /// The vector is left untouched.
    pub fn try_resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), AllocateError>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.try_reserve(new_len - self.len)?;
        while self.len < new_len {
            // SAFETY:
            // Room for `new_len` elements was reserved above.
            unsafe { self.push_unchecked(f()) };
        }
        Ok(())
    }

    #[inline]
    /// Resizes the vector to `new_len`, filling new slots with values from `f`.
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        AllocateError::unwrap_result(self.try_resize_with(new_len, f));
    }

    /// Resizes the vector to `new_len`, filling new slots with clones of `value`.
    ///
    /// The last new slot receives `value` itself.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve(new_len - self.len);
        while self.len + 1 < new_len {
            // SAFETY:
            // Room for `new_len` elements was reserved above.
            unsafe { self.push_unchecked(value.clone()) };
        }
        // SAFETY:
        // As above, and this is the last slot.
        unsafe { self.push_unchecked(value) };
    }

    #[inline]
    /// Resizes the vector to `new_len`, filling new slots with default values.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Attempts to append clones of every element of `values`.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    /// The vector is left untouched.
    pub fn try_extend_from_slice(&mut self, values: &[T]) -> Result<(), AllocateError>
    where
        T: Clone,
    {
        self.try_reserve(values.len())?;
        for value in values {
            // SAFETY:
            // Room for every element of `values` was reserved above.
            unsafe { self.push_unchecked(value.clone()) };
        }
        Ok(())
    }

    #[inline]
    /// Appends clones of every element of `values`.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        AllocateError::unwrap_result(self.try_extend_from_slice(values));
    }

    #[inline]
    /// Exchanges the contents, capacity and allocator of two vectors.
    ///
    /// No element is moved or cloned.
    ///
    /// This shadows the slice method `swap`; to exchange two elements, call
    /// `as_mut_slice().swap(i, j)`.
    /// ```
    /// use seqkit::vector;
    ///
    /// let mut numbers = vector![1, 2, 3];
    /// numbers.as_mut_slice().swap(0, 2);
    /// assert_eq!(numbers, [3, 2, 1]);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Attempts to clone the vector into another allocator.
    ///
    /// The capacity of the clone is exactly the length.
    ///
    /// # Errors
    /// If allocation fails, this will return an [`AllocateError`].
    pub fn try_clone_in<A2>(&self, allocator: A2) -> Result<Vector<T, A2>, AllocateError>
    where
        T: Clone,
        A2: Allocator,
    {
        Vector::try_from_slice_in(self.as_slice(), allocator)
    }

    #[must_use]
    #[inline]
    /// Clones the vector into another allocator.
    pub fn clone_in<A2>(&self, allocator: A2) -> Vector<T, A2>
    where
        T: Clone,
        A2: Allocator,
    {
        AllocateError::unwrap_result(self.try_clone_in(allocator))
    }

    /// Attempts to clone the vector.
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

    fn into_parts(self) -> (RawBuffer<T>, usize, A) {
        let me = ManuallyDrop::new(self);
        // SAFETY:
        // `me` is never dropped or read from again, so these are moves.
        let buffer = unsafe { ptr::read(&me.buffer) };
        // SAFETY:
        // As above.
        let allocator = unsafe { ptr::read(&me.allocator) };

        (buffer, me.len, allocator)
    }

    #[cfg(test)]
    fn check_invariants(&self) {
        assert!(self.len <= self.capacity());
        if mem::size_of::<T>() == 0 {
            assert_eq!(self.capacity(), usize::MAX);
        } else {
            assert_eq!(self.buffer.is_allocated(), self.capacity() != 0);
        }
    }
}

#[cfg(feature = "alloc")]
impl<T> Vector<T> {
    #[must_use]
    #[inline]
    /// Creates an empty [`Vector`].
    ///
    /// This does not allocate.
    pub const fn new() -> Self {
        Self::new_in(alloc::Global)
    }

    /// Attempts to create an empty [`Vector`] with room for exactly `capacity` elements.
    ///
    /// # Errors
    /// If allocation fails, or the size of the buffer overflows, this will return an [`AllocateError`].
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocateError> {
        Self::try_with_capacity_in(capacity, alloc::Global)
    }

    #[must_use]
    #[inline]
    /// Creates an empty [`Vector`] with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, alloc::Global)
    }

    #[must_use]
    #[inline]
    /// Creates a [`Vector`] of `len` default values.
    ///
    /// The capacity is exactly `len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::with_len_in(len, alloc::Global)
    }

    #[must_use]
    #[inline]
    /// Creates a [`Vector`] of `len` clones of `value`.
    ///
    /// The capacity is exactly `len`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(len, value, alloc::Global)
    }

    #[must_use]
    #[inline]
    /// Creates a [`Vector`] holding clones of the elements of `values`.
    pub fn from_slice(values: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_in(values, alloc::Global)
    }
}

impl<T, A> Default for Vector<T, A>
where
    A: Allocator + Default,
{
    #[inline]
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T, A> Drop for Vector<T, A>
where
    A: Allocator,
{
    fn drop(&mut self) {
        struct DropGuard<'a, T, A: Allocator> {
            vector: &'a mut Vector<T, A>,
        }

        impl<T, A: Allocator> Drop for DropGuard<'_, T, A> {
            // Runs whether or not an element's destructor panicked.
            fn drop(&mut self) {
                let vector = &mut *self.vector;
                // SAFETY:
                // The buffer was allocated with `vector.allocator` and every element has been
                // dropped or forgotten.
                unsafe { vector.buffer.deallocate(vector.allocator.by_ref()) };
            }
        }

        let guard = DropGuard { vector: self };
        let elements: *mut [T] = guard.vector.as_mut_slice();
        guard.vector.len = 0;
        // SAFETY:
        // The elements are initialised and no longer reachable through the vector.
        unsafe { ptr::drop_in_place(elements) };
    }
}

impl<T, A> Clone for Vector<T, A>
where
    T: Clone,
    A: Allocator + Clone,
{
    fn clone(&self) -> Self {
        self.clone_in(self.allocator.clone())
    }

    fn clone_from(&mut self, source: &Self) {
        self.truncate(source.len);
        let (init, tail) = source.split_at(self.len);
        self.as_mut_slice().clone_from_slice(init);
        self.extend_from_slice(tail);
    }
}

impl<T, A> Take for Vector<T, A>
where
    A: Allocator + Clone,
{
    #[inline]
    fn take(&mut self) -> Self {
        let empty = Self::new_in(self.allocator.clone());
        mem::replace(self, empty)
    }
}

impl<T, A> Deref for Vector<T, A>
where
    A: Allocator,
{
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A> DerefMut for Vector<T, A>
where
    A: Allocator,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, I, A> Index<I> for Vector<T, A>
where
    I: SliceIndex<[T]>,
    A: Allocator,
{
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I, A> IndexMut<I> for Vector<T, A>
where
    I: SliceIndex<[T]>,
    A: Allocator,
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T, A> fmt::Debug for Vector<T, A>
where
    T: fmt::Debug,
    A: Allocator,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// SAFETY:
// - the vector owns its elements and its buffer
// - the data implements `Send` (trait bound)
// - the allocator implements `Send` (trait bound)
unsafe impl<T, A> Send for Vector<T, A>
where
    T: Send,
    A: Allocator + Send,
{
}

// SAFETY:
// - the data cannot be mutated behind an immutable reference
// - the data implements `Sync` (trait bound)
// - the allocator implements `Sync` (trait bound)
unsafe impl<T, A> Sync for Vector<T, A>
where
    T: Sync,
    A: Allocator + Sync,
{
}
