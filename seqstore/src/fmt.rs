use core::fmt;

use crate::{HeaderOpaqueNodePtr, NodePtr, RawBuffer};

impl<Header, T> fmt::Debug for NodePtr<Header, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodePtr({:p})", self.value_ptr())
    }
}

impl<T> fmt::Debug for HeaderOpaqueNodePtr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeaderOpaqueNodePtr({:p})", self.value_ptr())
    }
}

impl<T> fmt::Debug for RawBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBuffer")
            .field("ptr", &self.as_ptr())
            .field("capacity", &self.capacity())
            .finish()
    }
}
