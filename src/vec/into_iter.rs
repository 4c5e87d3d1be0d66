use core::{fmt::Debug, iter::FusedIterator, ptr, slice};

use allocator_api2::alloc::Allocator;

use crate::raw_buf::RawBuf;

macro_rules! into_iter_declaration {
    ($($allocator_parameter:tt)*) => {
        /// An iterator that moves out of a vector.
        ///
        /// This `struct` is created by the `into_iter` method on
        /// [`ManagedVec`](crate::ManagedVec::into_iter),
        /// (provided by the [`IntoIterator`] trait).
        pub struct IntoIter<T, $($allocator_parameter)*>
        where
            A: Allocator,
        {
            buf: RawBuf<T, A>,

            /// Elements in `start..end` are initialized and not yet yielded.
            start: usize,
            end: usize,
        }
    };
}

crate::maybe_default_allocator!(into_iter_declaration);

impl<T, A: Allocator> IntoIter<T, A> {
    /// # Safety
    /// The first `len` slots of `buf` must be initialized.
    #[inline(always)]
    pub(super) unsafe fn new(buf: RawBuf<T, A>, len: usize) -> Self {
        Self { buf, start: 0, end: len }
    }

    /// Returns the remaining items of this iterator as a slice.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let vec = managed_vec![1, 2, 3];
    /// let mut into_iter = vec.into_iter();
    /// assert_eq!(into_iter.as_slice(), &[1, 2, 3]);
    /// assert_eq!(into_iter.next(), Some(1));
    /// assert_eq!(into_iter.next_back(), Some(3));
    /// assert_eq!(into_iter.as_slice(), &[2]);
    /// ```
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr().add(self.start), self.end - self.start) }
    }

    /// Returns the remaining items of this iterator as a mutable slice.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr().add(self.start), self.end - self.start) }
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline(always)]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }
}

impl<T: Debug, A: Allocator> Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> AsRef<[T]> for IntoIter<T, A> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        let index = self.start;
        self.start += 1;

        // SAFETY: `index` was in the initialized range and is now outside of it
        Some(unsafe { self.buf.ptr().as_ptr().add(index).read() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let exact = self.end - self.start;
        (exact, Some(exact))
    }

    #[inline]
    fn count(self) -> usize {
        self.len()
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            return None;
        }

        self.end -= 1;

        // SAFETY: `end` was in the initialized range and is now outside of it
        Some(unsafe { self.buf.ptr().as_ptr().add(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        // destroy the remaining elements, `buf` releases the memory afterwards even if this panics
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}
