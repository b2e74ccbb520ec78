use core::hash::{Hash, Hasher};

use crate::{HeaderOpaqueNodePtr, NodePtr};

// Nodes are compared and hashed by address, never by the value they hold.

impl<Header, T> PartialEq for NodePtr<Header, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value_ptr() == other.value_ptr()
    }
}

impl<Header, T> Eq for NodePtr<Header, T> {}

impl<Header, T> Hash for NodePtr<Header, T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_ptr().hash(state);
    }
}

impl<Header, T> PartialEq<HeaderOpaqueNodePtr<T>> for NodePtr<Header, T> {
    #[inline]
    fn eq(&self, other: &HeaderOpaqueNodePtr<T>) -> bool {
        self.value_ptr() == other.value_ptr()
    }
}

impl<T> PartialEq for HeaderOpaqueNodePtr<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value_ptr() == other.value_ptr()
    }
}

impl<T> Eq for HeaderOpaqueNodePtr<T> {}

impl<T> Hash for HeaderOpaqueNodePtr<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value_ptr().hash(state);
    }
}
