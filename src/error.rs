use core::{alloc::Layout, fmt};

/// The reason a [`ManagedVec`](crate::ManagedVec) operation was rejected.
///
/// A rejected operation never has an observable effect on the vector.
/// Every error is also reported through the [`log`] facade at the point it happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The vector was used before [`init`](crate::ManagedVec::init).
    NotInitialized,
    /// The vector was used after [`destroy`](crate::ManagedVec::destroy).
    Destroyed,
    /// [`init`](crate::ManagedVec::init) was called on an active vector.
    AlreadyInitialized,
    /// [`destroy`](crate::ManagedVec::destroy) was called on a destroyed vector.
    AlreadyDestroyed,
    /// The allocator could not provide memory for `layout`.
    AllocationFailed {
        /// The layout of the buffer that was requested.
        layout: Layout,
    },
    /// The requested capacity exceeds `isize::MAX` bytes.
    CapacityOverflow,
    /// An index or insertion position was out of bounds.
    OutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the vector at the time.
        len: usize,
    },
    /// A bulk insertion was given no elements.
    EmptySource,
    /// An element was requested from an empty vector.
    Empty,
}

impl Error {
    /// Returns `true` if the error was caused by calling an operation in the wrong lifecycle state.
    #[must_use]
    pub const fn is_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized | Self::Destroyed | Self::AlreadyInitialized | Self::AlreadyDestroyed
        )
    }

    /// Returns `true` if the error was caused by the allocator or the capacity arithmetic.
    #[must_use]
    pub const fn is_allocation(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. } | Self::CapacityOverflow)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => f.write_str("vector is not initialized"),
            Self::Destroyed => f.write_str("vector has been destroyed"),
            Self::AlreadyInitialized => f.write_str("vector is already initialized"),
            Self::AlreadyDestroyed => f.write_str("vector is already destroyed"),
            Self::AllocationFailed { layout } => {
                write!(f, "memory allocation of {} bytes failed", layout.size())
            }
            Self::CapacityOverflow => f.write_str("capacity overflow"),
            Self::OutOfBounds { index, len } => {
                write!(f, "index (is {index}) is out of bounds for len (is {len})")
            }
            Self::EmptySource => f.write_str("source is empty"),
            Self::Empty => f.write_str("vector is empty"),
        }
    }
}

impl core::error::Error for Error {}
