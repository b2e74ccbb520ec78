use core::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use allocator_api2::alloc::Allocator;

use super::ForwardList;

impl<T, U, A, A2> PartialEq<ForwardList<U, A2>> for ForwardList<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    A2: Allocator,
{
    #[inline]
    fn eq(&self, other: &ForwardList<U, A2>) -> bool {
        self.iter().eq(other)
    }
}

impl<T, A> Eq for ForwardList<T, A>
where
    T: Eq,
    A: Allocator,
{
}

impl<T, A, A2> PartialOrd<ForwardList<T, A2>> for ForwardList<T, A>
where
    T: PartialOrd,
    A: Allocator,
    A2: Allocator,
{
    #[inline]
    fn partial_cmp(&self, other: &ForwardList<T, A2>) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T, A> Ord for ForwardList<T, A>
where
    T: Ord,
    A: Allocator,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T, A> Hash for ForwardList<T, A>
where
    T: Hash,
    A: Allocator,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut len = 0_usize;
        for value in self {
            value.hash(state);
            len += 1;
        }
        state.write_usize(len);
    }
}

#[cfg(test)]
mod test {
    use std::hash::{BuildHasher, RandomState};

    use crate::{forward_list, test_utils::Budget, ForwardList};

    #[test]
    fn compares_across_allocators() {
        let budget = Budget::new(8);
        let mut other = ForwardList::new_in(&budget);
        other.extend([3_u8, 2, 1]);

        assert_eq!(forward_list![3_u8, 2, 1], other);
        assert_ne!(forward_list![3_u8, 2], other);
        assert!(forward_list![3_u8, 1] < other);
        assert!(forward_list![3_u8, 2, 1, 0] > other);
    }

    #[test]
    fn ordering_is_lexicographic() {
        let mut lists = [
            forward_list![2_i32],
            ForwardList::new(),
            forward_list![1, 5],
            forward_list![1],
        ];
        lists.sort();

        assert_eq!(lists[0], ForwardList::<i32>::new());
        assert_eq!(lists[1], forward_list![1]);
        assert_eq!(lists[2], forward_list![1, 5]);
        assert_eq!(lists[3], forward_list![2]);
    }

    #[test]
    fn equal_lists_hash_alike() {
        let state = RandomState::new();

        assert_eq!(
            state.hash_one(forward_list!["a", "b"]),
            state.hash_one(forward_list!["a", "b"])
        );
        assert_ne!(
            state.hash_one(forward_list![(), ()]),
            state.hash_one(forward_list![()])
        );
    }
}
