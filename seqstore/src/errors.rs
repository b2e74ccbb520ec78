use core::{
    alloc::{Layout, LayoutError},
    error::Error,
    fmt,
};

use allocator_api2::alloc::AllocError;

#[derive(Clone, PartialEq, Eq)]
enum Cause {
    /// The byte size of the request does not fit a [`Layout`].
    Layout(LayoutError),
    /// The element count itself overflowed a [`usize`].
    Capacity,
    /// The allocator refused a well-formed request.
    Refused(Layout),
}

impl Cause {
    #[cold]
    fn diverge(self) -> ! {
        #[cfg(feature = "alloc")]
        match self {
            Self::Capacity => panic!("capacity overflow"),
            Self::Layout(_) => crate::alloc::handle_alloc_error(Layout::new::<()>()),
            Self::Refused(layout) => crate::alloc::handle_alloc_error(layout),
        }

        #[cfg(not(feature = "alloc"))]
        panic!("{self}")
    }
}

#[derive(Clone, PartialEq, Eq)]
/// The error returned by every fallible allocation in this crate and the containers built on it.
///
/// The request either could not be described (its size overflowed) or the allocator refused it.
/// `Value` carries whatever the caller wanted to store, so fallible insertions can give it back.
pub struct AllocateError<Value = ()> {
    cause: Cause,
    value: Value,
}

impl<Value> AllocateError<Value> {
    #[inline]
    /// Gives up on the error the way infallible APIs do.
    ///
    /// With the `alloc` feature this calls [`handle_alloc_error`](std::alloc::handle_alloc_error);
    /// without it, or for capacity overflows, it panics.
    pub fn handle(self) -> ! {
        self.cause.diverge()
    }

    #[inline]
    /// Returns the carried value, dropping the error.
    pub fn into_value(self) -> Value {
        self.value
    }

    #[inline]
    /// Splits off the carried value, keeping a value-less error.
    pub fn into_parts(self) -> (Value, AllocateError) {
        let Self { cause, value } = self;
        (value, AllocateError { cause, value: () })
    }

    #[inline]
    /// Returns the success value, or calls [`Self::handle`].
    ///
    /// This is how the infallible counterparts of `try_` methods are written.
    pub fn unwrap_result<T>(result: Result<T, Self>) -> T {
        result.unwrap_or_else(|error| error.handle())
    }

    #[inline]
    /// The layout the allocator refused.
    ///
    /// [`None`] when the request overflowed before reaching the allocator.
    pub const fn layout(&self) -> Option<Layout> {
        match self.cause {
            Cause::Refused(layout) => Some(layout),
            Cause::Layout(_) | Cause::Capacity => None,
        }
    }

    #[must_use]
    #[inline]
    /// Returns [`true`] if the allocator refused the request, as opposed to an overflow.
    pub const fn is_alloc(&self) -> bool {
        matches!(self.cause, Cause::Refused(_))
    }

    #[inline]
    /// Transforms the carried value, keeping the cause.
    pub fn map<U, F>(self, f: F) -> AllocateError<U>
    where
        F: FnOnce(Value) -> U,
    {
        AllocateError {
            cause: self.cause,
            value: f(self.value),
        }
    }
}

impl AllocateError {
    #[inline]
    /// Attaches a value to a value-less error.
    pub fn with_value<Value>(self, value: Value) -> AllocateError<Value> {
        AllocateError {
            cause: self.cause,
            value,
        }
    }

    #[must_use]
    #[inline]
    /// An error for a request whose size overflowed while building its [`Layout`].
    pub const fn new_layout(source: LayoutError) -> Self {
        Self {
            cause: Cause::Layout(source),
            value: (),
        }
    }

    #[must_use]
    #[inline]
    /// An error for an element count that does not fit in a [`usize`].
    pub const fn new_capacity_overflow() -> Self {
        Self {
            cause: Cause::Capacity,
            value: (),
        }
    }

    #[must_use]
    #[inline]
    /// An error for a `layout` the allocator refused.
    pub const fn new_alloc(_source: AllocError, layout: Layout) -> Self {
        Self {
            cause: Cause::Refused(layout),
            value: (),
        }
    }
}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(_) => f.write_str("AllocateError::Layout"),
            Self::Capacity => f.write_str("AllocateError::CapacityOverflow"),
            Self::Refused(layout) => f.debug_tuple("AllocateError::Alloc").field(layout).finish(),
        }
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(error) => fmt::Display::fmt(error, f),
            Self::Capacity => f.write_str("capacity overflow"),
            Self::Refused(layout) => write!(
                f,
                "allocator refused {} bytes aligned to {}",
                layout.size(),
                layout.align()
            ),
        }
    }
}

impl<Value> fmt::Debug for AllocateError<Value> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.cause, f)
    }
}

impl<Value> fmt::Display for AllocateError<Value> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl Error for AllocateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Cause::Layout(error) => Some(error),
            Cause::Capacity | Cause::Refused(_) => None,
        }
    }
}

impl From<LayoutError> for AllocateError {
    #[inline]
    fn from(error: LayoutError) -> Self {
        Self::new_layout(error)
    }
}

impl<Value> From<AllocateError<Value>> for AllocError {
    #[inline]
    fn from(_error: AllocateError<Value>) -> Self {
        Self
    }
}

#[cfg(test)]
mod test {
    use core::alloc::Layout;

    use allocator_api2::alloc::AllocError;

    use super::AllocateError;

    #[test]
    fn value_comes_back_out() {
        let layout = Layout::new::<u64>();
        let error = AllocateError::new_alloc(AllocError, layout).with_value("payload");

        assert!(error.is_alloc());
        assert_eq!(error.layout(), Some(layout));

        let (value, bare) = error.into_parts();
        assert_eq!(value, "payload");
        assert_eq!(bare.layout(), Some(layout));
    }

    #[test]
    fn map_keeps_cause() {
        let error = AllocateError::new_capacity_overflow().with_value(3_u8);
        let mapped = error.map(u32::from);

        assert!(!mapped.is_alloc());
        assert_eq!(mapped.layout(), None);
        assert_eq!(mapped.into_value(), 3);
    }

    #[test]
    fn display_mentions_layout() {
        let layout = Layout::from_size_align(48, 8).unwrap();
        let error = AllocateError::new_alloc(AllocError, layout);

        assert_eq!(error.to_string(), "allocator refused 48 bytes aligned to 8");
        assert!(format!("{error:?}").starts_with("AllocateError::Alloc(Layout"));
        assert_eq!(
            AllocateError::new_capacity_overflow().to_string(),
            "capacity overflow"
        );
    }

    #[test]
    fn layout_errors_convert() {
        let layout_error = Layout::array::<u64>(usize::MAX).unwrap_err();
        let error: AllocateError = layout_error.into();

        assert_eq!(error.layout(), None);
        assert!(core::error::Error::source(&error).is_some());
    }
}
