use core::fmt;

use crate::Error;

/// The state of a [`ManagedVec`](crate::ManagedVec).
///
/// ```text
///                 init               destroy
/// Uninitialized -------> Active ---------------> Destroyed
///                          ^                         |
///                          +-------------------------+
///                                    init
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Created by [`uninit`](crate::ManagedVec::uninit) and not yet initialized.
    Uninitialized,
    /// Usable. This is the only state in which elements can be read or written.
    Active,
    /// Released by [`destroy`](crate::ManagedVec::destroy).
    Destroyed,
}

impl Lifecycle {
    /// Returns `true` for [`Lifecycle::Active`].
    #[must_use]
    #[inline(always)]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// The error for using a vector in this state.
    #[inline(always)]
    pub(crate) const fn check(self) -> Result<(), Error> {
        match self {
            Self::Active => Ok(()),
            Self::Uninitialized => Err(Error::NotInitialized),
            Self::Destroyed => Err(Error::Destroyed),
        }
    }

    /// The error for calling `init` in this state, if any.
    #[inline(always)]
    pub(crate) const fn check_init(self) -> Result<(), Error> {
        match self {
            Self::Active => Err(Error::AlreadyInitialized),
            Self::Uninitialized | Self::Destroyed => Ok(()),
        }
    }

    /// The error for calling `destroy` in this state, if any.
    #[inline(always)]
    pub(crate) const fn check_destroy(self) -> Result<(), Error> {
        match self {
            Self::Active => Ok(()),
            Self::Uninitialized => Err(Error::NotInitialized),
            Self::Destroyed => Err(Error::AlreadyDestroyed),
        }
    }
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Active => "active",
            Self::Destroyed => "destroyed",
        })
    }
}
