use allocator_api2::alloc::Global;
use seqstore::RawBuffer;

#[cfg_attr(test, test)]
fn main() {
    let mut stack = Stack::<String>::new();

    stack.push(String::from("a"));
    stack.push(String::from("b"));
    println!("{:?}", stack.pop());
    stack.push(String::from("c"));
    stack.push(String::from("d"));
    println!("{:?}", stack.pop());
    println!("{:?}", stack.pop());
    println!("{:?}", stack.pop());

    assert!(stack.pop().is_none());

    stack.push(String::from("left behind"));
}

struct Stack<T> {
    buffer: RawBuffer<T>,
    len: usize,
}

impl<T> Stack<T> {
    const fn new() -> Self {
        Self {
            buffer: RawBuffer::dangling(),
            len: 0,
        }
    }

    fn push(&mut self, value: T) {
        if self.len == self.buffer.capacity() {
            let new_capacity = (self.len * 2).max(1);
            // SAFETY:
            // The buffer is only ever allocated in `Global`.
            unsafe { self.buffer.try_grow_in(new_capacity, Global) }
                .unwrap_or_else(|error| error.handle());
        }

        // SAFETY:
        // `len < capacity` after the grow above.
        let slot = unsafe { self.buffer.as_ptr().add(self.len) };
        // SAFETY:
        // Slots at `len` and beyond are uninitialised.
        unsafe { slot.write(value) };
        self.len += 1;
    }

    fn pop(&mut self) -> Option<T> {
        self.len = self.len.checked_sub(1)?;
        // SAFETY:
        // The new `len` is below the old one, which was at most the capacity.
        let slot = unsafe { self.buffer.as_ptr().add(self.len) };
        // SAFETY:
        // The slot was initialised and is no longer counted in `len`.
        Some(unsafe { slot.read() })
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        while self.pop().is_some() {}
        // SAFETY:
        // The buffer was allocated in `Global` and every element has been moved out.
        unsafe { self.buffer.deallocate_global() };
    }
}
