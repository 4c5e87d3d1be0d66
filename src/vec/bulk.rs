use core::{mem::ManuallyDrop, ptr};

use allocator_api2::alloc::Allocator;

use crate::{diagnostic::diagnose, Error};

use super::ManagedVec;

/// Operations that add several elements with at most one reallocation.
///
/// Growth for `k` elements goes to `max(4, k)` for an unallocated vector,
/// otherwise the capacity doubles until the elements fit.
impl<T, A: Allocator> ManagedVec<T, A> {
    /// Copies the elements of `items` to the back of the vector.
    ///
    /// An empty `items` does nothing.
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::ManagedVec;
    /// let mut vec = ManagedVec::new();
    /// vec.push_back_bulk(&[1, 2, 3, 4, 5])?;
    /// assert_eq!(vec.capacity(), 5);
    ///
    /// vec.push_back_bulk(&[6])?;
    /// assert_eq!(vec.capacity(), 10);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn push_back_bulk(&mut self, items: &[T]) -> Result<(), Error>
    where
        T: Copy,
    {
        diagnose(
            "push_back_bulk",
            self.guarded(|vec| {
                vec.generic_reserve_bulk::<Error>(items.len())?;
                // SAFETY: we just made room for `items.len()` elements
                unsafe { vec.insert_nonoverlapping(vec.len, items.as_ptr(), items.len()) };
                Ok(())
            }),
        )
    }

    /// Moves the elements of `items` to the back of the vector.
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure. The elements are dropped in that case.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let mut vec = managed_vec![String::from("a")];
    /// vec.push_back_args([String::from("b"), String::from("c")])?;
    /// assert_eq!(vec, ["a", "b", "c"]);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn push_back_args<const N: usize>(&mut self, items: [T; N]) -> Result<(), Error> {
        diagnose(
            "push_back_args",
            self.guarded(|vec| {
                vec.generic_reserve_bulk::<Error>(N)?;
                // SAFETY: we just made room for `N` elements
                unsafe { vec.append_array_unchecked(items) };
                Ok(())
            }),
        )
    }

    /// Copies the elements of `items` into the vector at `index`, shifting the tail to the right.
    ///
    /// # Errors
    /// Errors if the vector is not active, if `index > len`, with [`Error::EmptySource`] if `items` is empty,
    /// or on allocation failure.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::{ managed_vec, Error };
    /// let mut vec = managed_vec![1, 5];
    /// vec.insert_range(1, &[2, 3, 4])?;
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    /// assert_eq!(vec.insert_range(1, &[]), Err(Error::EmptySource));
    /// # Ok::<(), Error>(())
    /// ```
    #[track_caller]
    pub fn insert_range(&mut self, index: usize, items: &[T]) -> Result<(), Error>
    where
        T: Copy,
    {
        diagnose(
            "insert_range",
            self.guarded(|vec| {
                vec.check_insert(index, items.len())?;
                // SAFETY: `check_insert` made room for `items.len()` elements and validated `index`
                unsafe { vec.insert_nonoverlapping(index, items.as_ptr(), items.len()) };
                Ok(())
            }),
        )
    }

    /// Moves the elements of `items` into the vector at `index`, shifting the tail to the right.
    ///
    /// # Errors
    /// Errors if the vector is not active, if `index > len`, with [`Error::EmptySource`] if `N` is zero,
    /// or on allocation failure. The elements are dropped in that case.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let mut vec = managed_vec!['a', 'd'];
    /// vec.insert_args(1, ['b', 'c'])?;
    /// assert_eq!(vec, ['a', 'b', 'c', 'd']);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn insert_args<const N: usize>(&mut self, index: usize, items: [T; N]) -> Result<(), Error> {
        diagnose(
            "insert_args",
            self.guarded(|vec| {
                vec.check_insert(index, N)?;
                let items = ManuallyDrop::new(items);
                // SAFETY: `check_insert` made room for `N` elements and validated `index`,
                // ownership of the elements moves into the vector
                unsafe { vec.insert_nonoverlapping(index, items.as_ptr(), N) };
                Ok(())
            }),
        )
    }

    /// Validates a bulk insertion and reserves room for it.
    fn check_insert(&mut self, index: usize, count: usize) -> Result<(), Error> {
        let len = self.len;

        if index > len {
            return Err(Error::OutOfBounds { index, len });
        }

        if count == 0 {
            return Err(Error::EmptySource);
        }

        self.generic_reserve_bulk(count)
    }

    /// Moves `count` elements from `src` to `index`, shifting the tail to the right.
    ///
    /// # Safety
    /// - There must be room for `count` more elements.
    /// - `index <= len`.
    /// - `src` must be valid for reading `count` elements and must not point into this vector.
    ///   The caller gives up ownership of them.
    unsafe fn insert_nonoverlapping(&mut self, index: usize, src: *const T, count: usize) {
        let len = self.len;
        debug_assert!(index <= len && self.buf.capacity() - len >= count);

        unsafe {
            let dst = self.buf.ptr().as_ptr().add(index);

            if index != len {
                ptr::copy(dst, dst.add(count), len - index);
            }

            ptr::copy_nonoverlapping(src, dst, count);
        }

        self.len = len + count;
    }
}
