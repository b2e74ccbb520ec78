#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(not(debug_assertions), warn(clippy::panic_in_result_fn))]
#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
mod alloc {
    pub use allocator_api2::alloc::Global;
}

mod errors;
pub mod forward_list;
#[cfg(test)]
mod test_utils;
pub mod utility;
pub mod vector;

pub use errors::OutOfRange;
pub use forward_list::ForwardList;
pub use seqstore::AllocateError;
pub use utility::{Forward, Take};
pub use vector::Vector;

#[cfg(feature = "alloc")]
#[macro_export]
/// Creates a [`Vector`] containing the arguments.
///
/// Like [`vec!`], this accepts either a list of elements or an element and a length.
/// ```
/// use seqkit::vector;
///
/// let numbers = vector![1, 2, 3];
/// assert_eq!(numbers, [1, 2, 3]);
///
/// let zeros = vector![0_u8; 4];
/// assert_eq!(zeros.capacity(), 4);
/// assert_eq!(zeros, [0; 4]);
/// ```
macro_rules! vector {
    () => {
        $crate::Vector::new()
    };
    ($element:expr; $len:expr) => {
        $crate::Vector::from_elem($len, $element)
    };
    ($($element:expr),+ $(,)?) => {
        $crate::Vector::from([$($element),+])
    };
}

#[cfg(feature = "alloc")]
#[macro_export]
/// Creates a [`ForwardList`] containing the arguments, in order.
/// ```
/// use seqkit::forward_list;
///
/// let list = forward_list!['a', 'b', 'c'];
/// assert_eq!(list.front(), Some(&'a'));
/// assert!(list.iter().eq(&['a', 'b', 'c']));
/// ```
macro_rules! forward_list {
    () => {
        $crate::ForwardList::new()
    };
    ($($element:expr),+ $(,)?) => {
        $crate::ForwardList::from([$($element),+])
    };
}
