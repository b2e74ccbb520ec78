//! Value-category helpers shared by the containers.
//!
//! [`Forward`] lets one insertion method accept either an owned value, which is moved in, or a reference, which is cloned at the last moment.
//! [`Take`] steals the contents of a container and leaves an empty one behind.

/// A value that can be handed onward either by moving it or by cloning from a borrow.
///
/// Owned values are forwarded untouched, so passing a `T` never clones.
/// Borrowed values are cloned only when the container constructs the element.
///
/// ```
/// use seqkit::Vector;
///
/// let name = String::from("kitten");
/// let mut names: Vector<String> = Vector::new();
/// names.push_back(&name); // cloned
/// names.push_back(name); // moved
/// assert_eq!(names, ["kitten", "kitten"]);
/// ```
pub trait Forward<T> {
    /// Produces the owned value.
    fn forward(self) -> T;
}

impl<T> Forward<T> for T {
    #[inline]
    fn forward(self) -> T {
        self
    }
}

impl<T> Forward<T> for &T
where
    T: Clone,
{
    #[inline]
    fn forward(self) -> T {
        self.clone()
    }
}

impl<T> Forward<T> for &mut T
where
    T: Clone,
{
    #[inline]
    fn forward(self) -> T {
        (*self).clone()
    }
}

/// Containers whose resources can be stolen.
///
/// The source is always left empty and ready for reuse.
pub trait Take {
    /// Moves the contents out into a new container, leaving `self` empty.
    #[must_use]
    fn take(&mut self) -> Self;
}

#[inline]
/// Steals the contents of `source`, leaving it empty.
///
/// Taking from a value and assigning the result back to it keeps its contents.
/// ```
/// use seqkit::{utility::take, vector};
///
/// let mut a = vector![1, 2, 3];
/// let b = take(&mut a);
/// assert!(a.is_empty());
/// assert_eq!(b, [1, 2, 3]);
///
/// let mut c = b.clone();
/// c = take(&mut c);
/// assert_eq!(c, b);
/// ```
pub fn take<C>(source: &mut C) -> C
where
    C: Take,
{
    source.take()
}

#[cfg(test)]
mod test {
    use super::Forward;
    use crate::test_utils::Copyable;

    fn forward_into<V>(value: V) -> Copyable
    where
        V: Forward<Copyable>,
    {
        value.forward()
    }

    #[test]
    fn owned_values_are_not_cloned() {
        let before = Copyable::clones();
        let kitten = forward_into(Copyable::new(5));

        assert_eq!(kitten.id(), 5);
        assert_eq!(Copyable::clones(), before);
    }

    #[test]
    fn borrowed_values_are_cloned() {
        let kitten = Copyable::new(9);
        let before = Copyable::clones();
        let copy = forward_into(&kitten);

        assert_eq!(copy, kitten);
        assert_eq!(Copyable::clones(), before + 1);
    }
}
