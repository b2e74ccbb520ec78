use allocator_api2::alloc::Allocator;
use seqstore::{AllocateError, HeaderOpaqueNodePtr, NodePtr, StructureHandle};

use super::ForwardList;

pub struct Header<T> {
    pub next: Option<Node<T>>,
}

pub type Node<T> = NodePtr<Header<T>, T>;

/// A handle to the place in a [`ForwardList`] where a node will be linked in.
///
/// `previous` is the node the new node will follow, or [`None`] to link it in as the new front.
pub struct Link<'a, T, A>
where
    A: Allocator,
{
    pub(crate) list: &'a mut ForwardList<T, A>,
    pub(crate) previous: Option<Node<T>>,
}

/// A node with a possibly uninitialised value that is ready to be linked into a [`ForwardList`].
///
/// Write a value into it and call [`insert`](seqstore::MaybeUninitNode::insert) to link it in.
/// Dropping it frees the node without touching the list.
pub type MaybeUninitNode<'a, T, A> = seqstore::MaybeUninitNode<T, Link<'a, T, A>>;

impl<T, A> StructureHandle<T> for Link<'_, T, A>
where
    A: Allocator,
{
    type Allocator = A;

    unsafe fn insert(self, node: HeaderOpaqueNodePtr<T>) {
        // SAFETY:
        // Nodes handed out for a `ForwardList` are always allocated with `Header<T>`.
        let node = unsafe { node.to_transparent::<Header<T>>() };
        // SAFETY:
        // `node`'s header was initialised in `try_new` and nothing else aliases it.
        let next = unsafe { node.header_ptr().as_ref() }.next;

        if let Some(previous) = self.previous {
            // SAFETY:
            // As we have a mutable reference to the list, `previous`' header is not aliased and is
            // valid for reads and writes.
            let previous_header = unsafe { previous.header_ptr().as_mut() };

            debug_assert_eq!(previous_header.next, next);
            previous_header.next = Some(node);
        } else {
            debug_assert_eq!(self.list.head, next);
            self.list.head = Some(node);
        }
    }

    #[inline]
    fn allocator(&self) -> &Self::Allocator {
        self.list.allocator.by_ref()
    }

    unsafe fn deallocate(&self, node: HeaderOpaqueNodePtr<T>) {
        // SAFETY:
        // Nodes handed out for a `ForwardList` are always allocated with `Header<T>`.
        let node = unsafe { node.to_transparent::<Header<T>>() };
        // SAFETY:
        // The node was allocated in the list's allocator and is not linked into the list.
        unsafe { node.deallocate(self.list.allocator.by_ref()) };
    }
}

/// Attempts to allocate an unlinked node that will follow `previous` (or become the front if [`None`]).
///
/// # Safety
/// `previous` must be a node in `list`.
pub unsafe fn try_new<T, A>(
    list: &mut ForwardList<T, A>,
    previous: Option<Node<T>>,
) -> Result<MaybeUninitNode<'_, T, A>, AllocateError>
where
    A: Allocator,
{
    let next = match previous {
        None => list.head,
        // SAFETY:
        // `previous` is in the list (safety condition), so its header is initialised.
        Some(previous) => unsafe { previous.header_ptr().as_ref() }.next,
    };

    let node = Node::try_allocate_in(list.allocator.by_ref())?;
    // SAFETY:
    // The allocated node's header pointer is valid for writes.
    unsafe { node.header_ptr().write(Header { next }) };
    Ok(
        // SAFETY:
        // - the node is freshly allocated and its header is initialised
        // - `previous` and `next` are adjacent nodes in `list` (safety condition)
        unsafe { seqstore::new_maybe_uninit(Link { list, previous }, node.to_header_opaque()) },
    )
}
