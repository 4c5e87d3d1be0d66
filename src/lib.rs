// NB: We avoid using closures to map `Result` and `Option`s in the growth paths because they result in less readable assembly output.
// When using closures, cold functions like `capacity_overflow` can get the name of some closure that invokes it instead.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::correctness,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_docs,
    rustdoc::missing_crate_level_docs
)]
#![allow(
    clippy::inline_always,
    clippy::module_name_repetitions,
    clippy::items_after_statements,
    clippy::collapsible_else_if,
    unknown_lints
)]
#![doc(test(attr(warn(dead_code))))]
//! A growable array with an explicit lifecycle.
//!
//! [`ManagedVec<T>`] is a contiguous, growable buffer of `T` in the spirit of `Vec<T>`, with three twists:
//!
//! - **It has a lifecycle.** An instance is [`Uninitialized`](Lifecycle::Uninitialized),
//!   [`Active`](Lifecycle::Active) or [`Destroyed`](Lifecycle::Destroyed). Only active vectors can be
//!   read or modified. Operations on any other state are rejected with an [`Error`] instead of touching memory.
//! - **Every recoverable failure is a value.** Allocation failure, a bad insertion position or a lifecycle
//!   violation leaves the vector exactly as it was and returns an [`Error`]. The failure is also reported
//!   through the [`log`] facade together with the name of the operation and the caller's source location.
//! - **Growth is predictable.** Capacity follows a fixed policy described below, so
//!   [`capacity`](ManagedVec::capacity) can be relied upon in tests and when handing buffers to other systems.
//!
//! The only fatal operation is checked access through [`at`](ManagedVec::at) and [`at_mut`](ManagedVec::at_mut),
//! which panics on an out of bounds index or an inactive vector.
//!
//! ```
//! use managed_vec::ManagedVec;
//!
//! let mut vec = ManagedVec::new();
//! vec.push_back(5)?;
//! vec.push_back(12)?;
//! vec.push_back(13)?;
//! vec.push_back_bulk(&[14, 48, 50])?;
//!
//! assert_eq!(vec, [5, 12, 13, 14, 48, 50]);
//! assert_eq!(vec.find(&48), Some(4));
//! assert_eq!(vec.find(&99), None);
//!
//! vec.destroy()?;
//! assert!(vec.destroy().is_err());
//! # Ok::<(), managed_vec::Error>(())
//! ```
//!
//! # Lifecycle
//! [`ManagedVec::new`] returns a vector that is already active.
//! [`ManagedVec::uninit`] returns one that must be [`init`](ManagedVec::init)ialized first.
//!
//! - `init` on an active vector is rejected with [`Error::AlreadyInitialized`] so a live buffer is never orphaned.
//! - `destroy` drops the elements and releases the buffer. Destroying twice is rejected with
//!   [`Error::AlreadyDestroyed`], destroying an uninitialized vector with [`Error::NotInitialized`].
//! - A destroyed vector can be initialized again.
//!
//! Dropping a vector releases whatever it still owns, so calling `destroy` is optional.
//!
//! # Growth policy
//! - Appending or inserting a single element into a full vector grows the capacity to `max(4, capacity * 2)`.
//! - Appending or inserting `k` elements at once grows an unallocated vector to `max(4, k)` and otherwise
//!   doubles the capacity until it fits. There is at most one reallocation per call.
//! - [`reserve(n)`](ManagedVec::reserve) grows to exactly `max(4, n)` if `n` exceeds the capacity.
//! - [`shrink_to_fit`](ManagedVec::shrink_to_fit) reallocates to exactly `len`, or releases the buffer if the vector is empty.
//!
//! # Diagnostics
//! Rejected operations are logged under the `managed_vec` target.
//! Double initialization is a `warn`, everything else an `error`:
//!
//! ```text
//! [ERROR managed_vec] pop_back: vector is empty at src/main.rs:12:9
//! ```
//!
//! # Feature Flags
//! * **`std`** *(enabled by default)*: Enables the `std` integration of the allocator.
//! * **`alloc`** *(enabled by default)*: Adds `Global` as the default allocator, [`ManagedVec::new`], `FromIterator` and [`managed_vec!`].
//! * **`serde`**: Adds `Serialize` and `Deserialize` for `ManagedVec`, plus `DeserializeSeed` for appending to an existing vector.
//! * **`bytemuck`**: Adds [`bytemuck::VecExt`] with `as_bytes`, `as_bytes_mut`, `extend_zeroed` and `resize_zeroed`.

#[doc(hidden)]
#[cfg(feature = "alloc")]
extern crate alloc;

mod diagnostic;
mod error;
mod error_behavior;
mod features;
mod lifecycle;
mod raw_buf;
mod set_len_on_drop;
/// Contains [`ManagedVec`] and associated types.
pub mod vec;

pub use allocator_api2;
#[cfg(feature = "alloc")]
pub use allocator_api2::alloc::Global;
pub use error::Error;
#[cfg(feature = "bytemuck")]
pub use features::bytemuck;
pub use lifecycle::Lifecycle;
#[doc(inline)]
pub use vec::ManagedVec;

use core::{convert::Infallible, mem};
use error_behavior::ErrorBehavior;
use set_len_on_drop::SetLenOnDrop;

#[cold]
#[inline(never)]
#[cfg(not(feature = "alloc"))]
fn handle_alloc_error(_layout: core::alloc::Layout) -> ! {
    panic!("allocation failed")
}

#[cfg(feature = "alloc")]
use allocator_api2::alloc::handle_alloc_error;

#[cold]
#[inline(never)]
const fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

// this is just `Result::into_ok` but with a name to match our use case
#[inline(always)]
#[allow(unreachable_patterns)]
fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(_) => unreachable!(),
    }
}

trait SizedTypeProperties: Sized {
    const SIZE: usize = mem::size_of::<Self>();
    const IS_ZST: bool = mem::size_of::<Self>() == 0;
}

impl<T> SizedTypeProperties for T {}

macro_rules! maybe_default_allocator {
    ($macro:ident) => {
        #[cfg(feature = "alloc")]
        $macro!(A = allocator_api2::alloc::Global);

        #[cfg(not(feature = "alloc"))]
        $macro!(A);
    };
}

pub(crate) use maybe_default_allocator;

#[cfg(test)]
mod tests;
