use core::{error::Error, fmt};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
/// The error type returned by checked element access when the index is past the end.
pub struct OutOfRange {
    index: usize,
    len: usize,
}

impl OutOfRange {
    #[must_use]
    #[inline]
    pub(crate) const fn new(index: usize, len: usize) -> Self {
        Self { index, len }
    }

    #[must_use]
    #[inline]
    /// Gets the index that was requested.
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    #[inline]
    /// Gets the length of the container at the time of the access.
    pub const fn length(&self) -> usize {
        self.len
    }
}

impl fmt::Debug for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutOfRange")
            .field("index", &self.index)
            .field("len", &self.len)
            .finish()
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of range for length {}",
            self.index, self.len
        )
    }
}

impl Error for OutOfRange {}

#[cfg(test)]
mod test {
    use super::OutOfRange;

    #[test]
    fn message_names_index_and_length() {
        let error = OutOfRange::new(4, 0);

        assert_eq!(error.index(), 4);
        assert_eq!(error.length(), 0);
        assert_eq!(format!("{error}"), "index 4 out of range for length 0");
        assert_eq!(format!("{error:?}"), "OutOfRange { index: 4, len: 0 }");
    }
}
