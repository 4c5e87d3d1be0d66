use ::bytemuck::{NoUninit, Pod, Zeroable};
use allocator_api2::alloc::Allocator;

use crate::{diagnostic::diagnose, Error, ManagedVec};

mod private {
    use super::{Allocator, ManagedVec};

    pub trait Sealed {}

    impl<T, A: Allocator> Sealed for ManagedVec<T, A> {}
}

/// Extension trait for [`ManagedVec`] holding plain data.
pub trait VecExt: private::Sealed {
    /// The element type of this vector.
    type T;

    /// Views the elements as bytes.
    ///
    /// This is what gets uploaded when the vector is handed to a graphics or IO API.
    ///
    /// # Examples
    /// ```
    /// use managed_vec::{ managed_vec, bytemuck::VecExt };
    ///
    /// let vec = managed_vec![1u16, 2];
    /// assert_eq!(vec.as_bytes(), &[1u16.to_ne_bytes(), 2u16.to_ne_bytes()].concat()[..]);
    /// ```
    #[must_use]
    fn as_bytes(&self) -> &[u8]
    where
        Self::T: NoUninit;

    /// Views the elements as mutable bytes.
    #[must_use]
    fn as_bytes_mut(&mut self) -> &mut [u8]
    where
        Self::T: Pod;

    /// Appends `additional` elements with all bits zero.
    ///
    /// Grows like [`push_back_bulk`](ManagedVec::push_back_bulk).
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure.
    ///
    /// # Examples
    /// ```
    /// use managed_vec::{ managed_vec, bytemuck::VecExt };
    ///
    /// let mut vec = managed_vec![1, 2, 3];
    /// vec.extend_zeroed(2)?;
    /// assert_eq!(vec, [1, 2, 3, 0, 0]);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    fn extend_zeroed(&mut self, additional: usize) -> Result<(), Error>
    where
        Self::T: Zeroable;

    /// Resizes the vector so that `len` is equal to `new_len`, filling new slots with zeroes.
    ///
    /// Grows like [`resize`](ManagedVec::resize).
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure.
    ///
    /// # Examples
    /// ```
    /// use managed_vec::{ managed_vec, bytemuck::VecExt };
    ///
    /// let mut vec = managed_vec![1, 2, 3];
    /// vec.resize_zeroed(5)?;
    /// assert_eq!(vec, [1, 2, 3, 0, 0]);
    ///
    /// vec.resize_zeroed(2)?;
    /// assert_eq!(vec, [1, 2]);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    fn resize_zeroed(&mut self, new_len: usize) -> Result<(), Error>
    where
        Self::T: Zeroable;
}

impl<T, A: Allocator> VecExt for ManagedVec<T, A> {
    type T = T;

    #[inline]
    fn as_bytes(&self) -> &[u8]
    where
        T: NoUninit,
    {
        ::bytemuck::cast_slice(self.as_slice())
    }

    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8]
    where
        T: Pod,
    {
        ::bytemuck::cast_slice_mut(self.as_mut_slice())
    }

    #[track_caller]
    fn extend_zeroed(&mut self, additional: usize) -> Result<(), Error>
    where
        T: Zeroable,
    {
        diagnose(
            "extend_zeroed",
            self.guarded(|vec| {
                vec.generic_reserve_bulk::<Error>(additional)?;
                // SAFETY: we just made room for `additional` elements, all-zero is a valid `T`
                unsafe { write_zeroed(vec, additional) };
                Ok(())
            }),
        )
    }

    #[track_caller]
    fn resize_zeroed(&mut self, new_len: usize) -> Result<(), Error>
    where
        T: Zeroable,
    {
        diagnose(
            "resize_zeroed",
            self.guarded(|vec| {
                let len = vec.len();

                if new_len > len {
                    vec.generic_reserve_exact::<Error>(new_len)?;
                    // SAFETY: we just made room for `new_len` elements, all-zero is a valid `T`
                    unsafe { write_zeroed(vec, new_len - len) };
                } else {
                    vec.truncate_unguarded(new_len);
                }

                Ok(())
            }),
        )
    }
}

/// # Safety
/// There must be room for `count` more elements and the all-zero bit pattern must be a valid `T`.
unsafe fn write_zeroed<T, A: Allocator>(vec: &mut ManagedVec<T, A>, count: usize) {
    unsafe {
        vec.spare_ptr().write_bytes(0, count);
        vec.set_len(vec.len() + count);
    }
}
