use core::{alloc::Layout, convert::Infallible};

use crate::{Error, capacity_overflow, handle_alloc_error};

/// Decides what happens when growing the buffer fails.
///
/// The growth code is written once, generic over this trait:
/// - [`Error`] returns the failure to the caller, which is what every public operation does.
/// - [`Infallible`] panics or aborts, for trait implementations that have no way to return an error
///   (`Extend`, `FromIterator`, `Clone`).
pub(crate) trait ErrorBehavior: Sized {
    fn allocation(layout: Layout) -> Self;
    fn capacity_overflow() -> Self;
}

impl ErrorBehavior for Infallible {
    #[inline(always)]
    fn allocation(layout: Layout) -> Self {
        handle_alloc_error(layout)
    }

    #[inline(always)]
    fn capacity_overflow() -> Self {
        capacity_overflow()
    }
}

impl ErrorBehavior for Error {
    #[inline(always)]
    fn allocation(layout: Layout) -> Self {
        Self::AllocationFailed { layout }
    }

    #[inline(always)]
    fn capacity_overflow() -> Self {
        Self::CapacityOverflow
    }
}
