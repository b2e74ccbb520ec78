use core::{alloc::Layout, cell::Cell, ptr::NonNull};
use std::rc::Rc;

use allocator_api2::alloc::{AllocError, Allocator, Global};

std::thread_local! {
    static CLONES: Cell<usize> = const { Cell::new(0) };
}

/// A cloneable value with an identity, used to check copy and move semantics.
#[derive(Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Copyable {
    id: i32,
}

impl Copyable {
    pub const fn new(id: i32) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Number of clones made on this thread so far.
    pub fn clones() -> usize {
        CLONES.with(Cell::get)
    }
}

impl Clone for Copyable {
    fn clone(&self) -> Self {
        CLONES.with(|clones| clones.set(clones.get() + 1));
        Self { id: self.id }
    }
}

impl From<i32> for Copyable {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Counts how many times values sharing the counter have been dropped.
#[derive(Debug, Clone)]
pub struct DropCounter {
    drops: Rc<Cell<usize>>,
}

impl DropCounter {
    pub fn new() -> (Self, Rc<Cell<usize>>) {
        let drops = Rc::new(Cell::new(0));
        (
            Self {
                drops: Rc::clone(&drops),
            },
            drops,
        )
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// Tracks how many of its copies are alive, and panics when told to.
#[derive(Debug)]
pub struct Fragile {
    live: Rc<Cell<usize>>,
    clones_left: Rc<Cell<usize>>,
    panics_on_drop: bool,
}

impl Fragile {
    /// The first value. Cloning it, or any of its copies, succeeds `clones` times and then panics.
    pub fn new(clones: usize) -> (Self, Rc<Cell<usize>>) {
        let live = Rc::new(Cell::new(1));
        (
            Self {
                live: Rc::clone(&live),
                clones_left: Rc::new(Cell::new(clones)),
                panics_on_drop: false,
            },
            live,
        )
    }

    #[must_use]
    pub fn panicking_on_drop(mut self) -> Self {
        self.panics_on_drop = true;
        self
    }
}

impl Clone for Fragile {
    fn clone(&self) -> Self {
        let left = self.clones_left.get();
        assert!(left > 0, "out of clones");
        self.clones_left.set(left - 1);
        self.live.set(self.live.get() + 1);
        Self {
            live: Rc::clone(&self.live),
            clones_left: Rc::clone(&self.clones_left),
            panics_on_drop: false,
        }
    }
}

impl Drop for Fragile {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
        assert!(!self.panics_on_drop, "dropped a fragile value");
    }
}

/// An allocator that allows a fixed number of allocations before failing.
///
/// Use it by reference so containers can share it.
#[derive(Debug)]
pub struct Budget {
    remaining: Cell<usize>,
    live: Cell<usize>,
}

impl Budget {
    pub const fn new(allocations: usize) -> Self {
        Self {
            remaining: Cell::new(allocations),
            live: Cell::new(0),
        }
    }

    pub fn refill(&self, allocations: usize) {
        self.remaining.set(allocations);
    }

    /// Number of allocations that have not been freed yet.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

// SAFETY:
// Every allocation is forwarded to `Global`, and freed there too.
unsafe impl Allocator for Budget {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Err(AllocError);
        }
        let ptr = Global.allocate(layout)?;
        self.remaining.set(remaining - 1);
        self.live.set(self.live.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live.set(self.live.get() - 1);
        // SAFETY:
        // `ptr` was allocated by `Global` in `allocate` with `layout`.
        unsafe { Global.deallocate(ptr, layout) };
    }
}
