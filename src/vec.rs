mod bulk;
mod into_iter;
mod search;

use core::{
    borrow::{Borrow, BorrowMut},
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ops::{Deref, DerefMut},
    panic::Location,
    ptr, slice,
};

use allocator_api2::alloc::Allocator;

#[cfg(feature = "alloc")]
use allocator_api2::alloc::Global;

use crate::{
    diagnostic::{diagnose, report},
    infallible,
    raw_buf::{self, RawBuf},
    Error, ErrorBehavior, Lifecycle, SetLenOnDrop,
};

pub use into_iter::IntoIter;

/// This is like [`vec!`] but creates a [`ManagedVec`] in the global allocator.
///
/// There are three forms of this macro:
///
/// - Create an empty [`ManagedVec`]:
/// ```
/// # use managed_vec::{ managed_vec, ManagedVec };
/// let vec: ManagedVec<i32> = managed_vec![];
/// assert!(vec.is_empty());
/// assert!(vec.is_active());
/// ```
///
/// - Create a [`ManagedVec`] containing a given list of elements:
/// ```
/// # use managed_vec::managed_vec;
/// let vec = managed_vec![1, 2, 3];
/// assert_eq!(vec[0], 1);
/// assert_eq!(vec[2], 3);
/// ```
///
/// - Create a [`ManagedVec`] from a given element and size:
/// ```
/// # use managed_vec::managed_vec;
/// let vec = managed_vec![1; 3];
/// assert_eq!(vec, [1, 1, 1]);
/// ```
///
/// # Panics
/// Panics on allocation failure.
#[macro_export]
#[cfg(feature = "alloc")]
macro_rules! managed_vec {
    [$value:expr; $count:expr] => {
        $crate::ManagedVec::from_elem($value, $count)
    };
    [$($values:expr),+ $(,)?] => {
        $crate::ManagedVec::from_array([$($values),+])
    };
    [] => {
        $crate::ManagedVec::new()
    };
}

macro_rules! managed_vec_declaration {
    ($($allocator_parameter:tt)*) => {
        /// A growable array with an explicit [`Lifecycle`].
        ///
        /// Elements can only be read or written while the vector is [active](Lifecycle::Active).
        /// Every operation that can fail returns an [`Error`] and leaves the vector unchanged.
        /// Rejected operations are reported through [`log`] as well.
        ///
        /// The vector dereferences to a slice, so everything `[T]` offers is available
        /// on an active vector. An inactive vector dereferences to an empty slice.
        ///
        /// # Examples
        /// ```
        /// use managed_vec::{ ManagedVec, Error };
        ///
        /// let mut vec = ManagedVec::uninit();
        /// assert_eq!(vec.push_back(1), Err(Error::NotInitialized));
        ///
        /// vec.init()?;
        /// vec.push_back(1)?;
        /// vec.push_back(2)?;
        /// assert_eq!(vec, [1, 2]);
        ///
        /// vec.destroy()?;
        /// assert_eq!(vec.capacity(), 0);
        /// # Ok::<(), Error>(())
        /// ```
        pub struct ManagedVec<T, $($allocator_parameter)*>
        where
            A: Allocator,
        {
            buf: RawBuf<T, A>,
            len: usize,
            lifecycle: Lifecycle,
        }
    };
}

crate::maybe_default_allocator!(managed_vec_declaration);

#[cfg(feature = "alloc")]
impl<T> ManagedVec<T> {
    /// Constructs a new, empty and [active](Lifecycle::Active) `ManagedVec<T>`.
    ///
    /// The vector will not allocate until elements are pushed onto it.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::ManagedVec;
    /// let vec = ManagedVec::<i32>::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// Constructs a new, [uninitialized](Lifecycle::Uninitialized) `ManagedVec<T>`.
    ///
    /// It must be [`init`](Self::init)ialized before use.
    #[must_use]
    #[inline]
    pub const fn uninit() -> Self {
        Self::uninit_in(Global)
    }

    /// Constructs a new, empty and active `ManagedVec<T>` with at least the specified capacity.
    ///
    /// The capacity follows [`reserve`](Self::reserve), so it is `max(4, capacity)` unless `capacity` is zero.
    ///
    /// # Panics
    /// Panics on allocation failure.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::ManagedVec;
    /// let vec = ManagedVec::<i32>::with_capacity(2);
    /// assert_eq!(vec.capacity(), 4);
    ///
    /// let vec = ManagedVec::<i32>::with_capacity(10);
    /// assert_eq!(vec.capacity(), 10);
    /// ```
    #[must_use]
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_in(capacity, Global)
    }

    /// Like [`with_capacity`](Self::with_capacity) but returns an error on allocation failure.
    ///
    /// # Errors
    /// Errors on allocation failure.
    #[track_caller]
    #[inline]
    pub fn try_with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::try_with_capacity_in(capacity, Global)
    }

    /// Constructs an active vector holding the elements of `array`.
    ///
    /// # Panics
    /// Panics on allocation failure.
    #[must_use]
    #[inline]
    pub fn from_array<const N: usize>(array: [T; N]) -> Self {
        Self::from_array_in(array, Global)
    }

    /// Constructs an active vector holding `count` clones of `value`.
    ///
    /// # Panics
    /// Panics on allocation failure.
    #[must_use]
    #[inline]
    pub fn from_elem(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_elem_in(value, count, Global)
    }
}

impl<T, A: Allocator> ManagedVec<T, A> {
    /// Constructs a new, empty and active `ManagedVec<T, A>` in the provided allocator.
    #[must_use]
    #[inline]
    pub const fn new_in(allocator: A) -> Self {
        Self {
            buf: RawBuf::new_in(allocator),
            len: 0,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Constructs a new, uninitialized `ManagedVec<T, A>` in the provided allocator.
    #[must_use]
    #[inline]
    pub const fn uninit_in(allocator: A) -> Self {
        Self {
            buf: RawBuf::new_in(allocator),
            len: 0,
            lifecycle: Lifecycle::Uninitialized,
        }
    }

    /// Constructs an active vector with at least the specified capacity in the provided allocator.
    ///
    /// # Panics
    /// Panics on allocation failure.
    #[must_use]
    #[inline]
    pub fn with_capacity_in(capacity: usize, allocator: A) -> Self {
        infallible(Self::generic_with_capacity_in(capacity, allocator))
    }

    /// Like [`with_capacity_in`](Self::with_capacity_in) but returns an error on allocation failure.
    ///
    /// # Errors
    /// Errors on allocation failure.
    #[track_caller]
    #[inline]
    pub fn try_with_capacity_in(capacity: usize, allocator: A) -> Result<Self, Error> {
        diagnose("with_capacity", Self::generic_with_capacity_in(capacity, allocator))
    }

    fn generic_with_capacity_in<E: ErrorBehavior>(capacity: usize, allocator: A) -> Result<Self, E> {
        let mut vec = Self::new_in(allocator);
        vec.generic_reserve_exact::<E>(capacity)?;
        Ok(vec)
    }

    /// Constructs an active vector holding the elements of `array` in the provided allocator.
    ///
    /// # Panics
    /// Panics on allocation failure.
    #[must_use]
    pub fn from_array_in<const N: usize>(array: [T; N], allocator: A) -> Self {
        let mut vec = Self::with_capacity_in(N, allocator);
        // SAFETY: we just reserved space for `N` elements
        unsafe { vec.append_array_unchecked(array) };
        vec
    }

    /// Constructs an active vector holding `count` clones of `value` in the provided allocator.
    ///
    /// # Panics
    /// Panics on allocation failure.
    #[must_use]
    pub fn from_elem_in(value: T, count: usize, allocator: A) -> Self
    where
        T: Clone,
    {
        let mut vec = Self::with_capacity_in(count, allocator);
        // SAFETY: we just reserved space for `count` elements
        unsafe { vec.extend_with_unchecked(count, value) };
        vec
    }

    /// Returns the number of elements in the vector.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the total number of elements the vector can hold without reallocating.
    #[must_use]
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns `true` if the vector contains no elements.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the elements in bytes, `len * size_of::<T>()`.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let vertices = managed_vec![0.0f32; 9];
    /// assert_eq!(vertices.byte_len(), 36);
    /// ```
    #[must_use]
    #[inline(always)]
    pub const fn byte_len(&self) -> usize {
        self.len * mem::size_of::<T>()
    }

    /// Returns the current lifecycle state.
    #[must_use]
    #[inline(always)]
    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Returns `true` if the vector is [`Lifecycle::Active`].
    #[must_use]
    #[inline(always)]
    pub const fn is_active(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Returns a reference to the allocator.
    #[must_use]
    #[inline(always)]
    pub const fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Extracts a slice containing the entire vector.
    #[must_use]
    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` elements are initialized
        unsafe { slice::from_raw_parts(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing the entire vector.
    #[must_use]
    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: the first `len` elements are initialized
        unsafe { slice::from_raw_parts_mut(self.buf.ptr().as_ptr(), self.len) }
    }

    /// Returns a raw pointer to the vector's buffer, or null if nothing is allocated.
    ///
    /// The pointer is valid for reading `len` elements until the vector is modified.
    /// This is the pointer to hand to APIs that copy [`byte_len`](Self::byte_len) bytes out of the buffer.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::{ managed_vec, ManagedVec };
    /// let empty = ManagedVec::<u32>::new();
    /// assert!(empty.as_ptr().is_null());
    ///
    /// let indices = managed_vec![0u32, 1, 2];
    /// let first = unsafe { *indices.as_ptr() };
    /// assert_eq!(first, 0);
    /// ```
    #[must_use]
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        if self.buf.capacity() == 0 {
            ptr::null()
        } else {
            self.buf.ptr().as_ptr()
        }
    }

    /// Returns a raw mutable pointer to the vector's buffer, or null if nothing is allocated.
    #[must_use]
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        if self.buf.capacity() == 0 {
            ptr::null_mut()
        } else {
            self.buf.ptr().as_ptr()
        }
    }

    /// Forces the length of the vector to `new_len`.
    ///
    /// # Safety
    /// - `new_len` must be less than or equal to [`capacity`](Self::capacity).
    /// - The elements at `old_len..new_len` must be initialized.
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.buf.capacity());
        self.len = new_len;
    }

    /// Pointer to the first unused slot. Valid for writes of `capacity - len` elements.
    #[inline(always)]
    pub(crate) fn spare_ptr(&mut self) -> *mut T {
        // SAFETY: `len <= capacity`, so this stays in or one past the allocation
        unsafe { self.buf.ptr().as_ptr().add(self.len) }
    }

    #[inline(always)]
    pub(crate) fn guarded<'s, R>(&'s mut self, f: impl FnOnce(&'s mut Self) -> Result<R, Error>) -> Result<R, Error> {
        self.lifecycle.check()?;
        f(self)
    }

    /// Makes an uninitialized or destroyed vector active.
    ///
    /// # Errors
    /// Errors with [`Error::AlreadyInitialized`] if the vector is active.
    /// The buffer of an active vector is left alone.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::{ ManagedVec, Error };
    /// let mut vec = ManagedVec::<i32>::uninit();
    /// vec.init()?;
    /// assert!(vec.is_active());
    /// assert_eq!(vec.init(), Err(Error::AlreadyInitialized));
    /// # Ok::<(), Error>(())
    /// ```
    #[track_caller]
    pub fn init(&mut self) -> Result<(), Error> {
        diagnose("init", self.lifecycle.check_init())?;
        debug_assert!(self.len == 0 && self.buf.capacity() == 0);
        self.lifecycle = Lifecycle::Active;
        Ok(())
    }

    /// Drops all elements, releases the buffer and marks the vector as destroyed.
    ///
    /// # Errors
    /// Errors with [`Error::AlreadyDestroyed`] if the vector was already destroyed and
    /// with [`Error::NotInitialized`] if it was never initialized.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::{ managed_vec, Error };
    /// let mut vec = managed_vec![1, 2, 3];
    /// vec.destroy()?;
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// assert_eq!(vec.destroy(), Err(Error::AlreadyDestroyed));
    /// # Ok::<(), Error>(())
    /// ```
    #[track_caller]
    pub fn destroy(&mut self) -> Result<(), Error> {
        diagnose("destroy", self.lifecycle.check_destroy())?;
        self.lifecycle = Lifecycle::Destroyed;
        self.truncate_unguarded(0);
        self.buf.release();
        Ok(())
    }

    /// Appends an element to the back of the vector.
    ///
    /// A full vector grows to `max(4, capacity * 2)`.
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure. The element is dropped in that case.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::ManagedVec;
    /// let mut vec = ManagedVec::new();
    /// vec.push_back(1)?;
    /// assert_eq!(vec.capacity(), 4);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn push_back(&mut self, value: T) -> Result<(), Error> {
        diagnose(
            "push_back",
            self.guarded(|vec| {
                vec.generic_push_with::<Error>(|| value)?;
                Ok(())
            }),
        )
    }

    /// Appends an element produced by `f` to the back of the vector and returns a reference to it.
    ///
    /// `f` is only called once there is room for its result.
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure. `f` is not called in that case.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::ManagedVec;
    /// #[derive(Debug, PartialEq)]
    /// struct Point { x: i32, y: i32 }
    ///
    /// let mut points = ManagedVec::new();
    /// let point = points.emplace_back(|| Point { x: 1, y: 2 })?;
    /// point.y = 3;
    /// assert_eq!(points, [Point { x: 1, y: 3 }]);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn emplace_back(&mut self, f: impl FnOnce() -> T) -> Result<&mut T, Error> {
        diagnose("emplace_back", self.guarded(|vec| vec.generic_push_with(f)))
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if the vector is not active or `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let vec = managed_vec![10, 20, 30];
    /// assert_eq!(*vec.at(1), 20);
    /// ```
    #[track_caller]
    #[inline]
    pub fn at(&self, index: usize) -> &T {
        if let Err(error) = self.checked_index(index) {
            access_failed("at", error);
        }

        // SAFETY: `index` is in bounds
        unsafe { &*self.buf.ptr().as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    /// Panics if the vector is not active or `index` is out of bounds.
    #[track_caller]
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        if let Err(error) = self.checked_index(index) {
            access_failed("at_mut", error);
        }

        // SAFETY: `index` is in bounds
        unsafe { &mut *self.buf.ptr().as_ptr().add(index) }
    }

    #[inline(always)]
    fn checked_index(&self, index: usize) -> Result<(), Error> {
        self.lifecycle.check()?;

        if index >= self.len {
            return Err(Error::OutOfBounds { index, len: self.len });
        }

        Ok(())
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    /// Errors with [`Error::Empty`] if there is nothing to remove, or if the vector is not active.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::{ managed_vec, Error };
    /// let mut vec = managed_vec![1, 2];
    /// assert_eq!(vec.pop_back(), Ok(2));
    /// assert_eq!(vec.pop_back(), Ok(1));
    /// assert_eq!(vec.pop_back(), Err(Error::Empty));
    /// ```
    #[track_caller]
    pub fn pop_back(&mut self) -> Result<T, Error> {
        diagnose(
            "pop_back",
            self.guarded(|vec| {
                if vec.len == 0 {
                    return Err(Error::Empty);
                }

                vec.len -= 1;

                // SAFETY: the element at the old `len - 1` is initialized and no longer part of the vector
                Ok(unsafe { vec.buf.ptr().as_ptr().add(vec.len).read() })
            }),
        )
    }

    /// Drops all elements. The capacity is kept.
    ///
    /// # Errors
    /// Errors if the vector is not active.
    #[track_caller]
    pub fn clear(&mut self) -> Result<(), Error> {
        diagnose(
            "clear",
            self.guarded(|vec| {
                vec.truncate_unguarded(0);
                Ok(())
            }),
        )
    }

    /// Shortens the vector, keeping the first `len` elements and dropping the rest.
    ///
    /// If `len` is greater than or equal to the vector's current length, this has no effect.
    ///
    /// # Errors
    /// Errors if the vector is not active.
    #[track_caller]
    pub fn truncate(&mut self, len: usize) -> Result<(), Error> {
        diagnose(
            "truncate",
            self.guarded(|vec| {
                vec.truncate_unguarded(len);
                Ok(())
            }),
        )
    }

    pub(crate) fn truncate_unguarded(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let remaining_len = self.len - len;

        // SAFETY: the elements in `len..self.len` are initialized. The length is updated
        // first so a panicking destructor can't cause a double drop.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.ptr().as_ptr().add(len), remaining_len);
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Removes and returns the element at `index`, shifting all elements after it to the left.
    ///
    /// # Errors
    /// Errors if the vector is not active or `index` is out of bounds.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let mut vec = managed_vec![1, 2, 3];
    /// assert_eq!(vec.remove(1), Ok(2));
    /// assert_eq!(vec, [1, 3]);
    /// assert!(vec.remove(2).is_err());
    /// ```
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        diagnose(
            "remove",
            self.guarded(|vec| {
                let len = vec.len;

                if index >= len {
                    return Err(Error::OutOfBounds { index, len });
                }

                // SAFETY: `index < len`, the tail is moved over the read element
                unsafe {
                    let ptr = vec.buf.ptr().as_ptr().add(index);
                    let value = ptr.read();
                    ptr::copy(ptr.add(1), ptr, len - index - 1);
                    vec.len = len - 1;
                    Ok(value)
                }
            }),
        )
    }

    /// Returns the first element, or `None` if the vector is empty or not active.
    ///
    /// Calling this on an inactive vector is logged.
    #[must_use]
    #[track_caller]
    pub fn front(&self) -> Option<&T> {
        if diagnose("front", self.lifecycle.check()).is_err() {
            return None;
        }

        self.as_slice().first()
    }

    /// Returns the last element, or `None` if the vector is empty or not active.
    #[must_use]
    #[track_caller]
    pub fn back(&self) -> Option<&T> {
        if diagnose("back", self.lifecycle.check()).is_err() {
            return None;
        }

        self.as_slice().last()
    }

    /// Returns a mutable reference to the first element, or `None` if the vector is empty or not active.
    #[must_use]
    #[track_caller]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if diagnose("front_mut", self.lifecycle.check()).is_err() {
            return None;
        }

        self.as_mut_slice().first_mut()
    }

    /// Returns a mutable reference to the last element, or `None` if the vector is empty or not active.
    #[must_use]
    #[track_caller]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if diagnose("back_mut", self.lifecycle.check()).is_err() {
            return None;
        }

        self.as_mut_slice().last_mut()
    }

    /// Returns the first element without checking.
    ///
    /// # Safety
    /// The vector must not be empty.
    #[must_use]
    #[inline(always)]
    pub unsafe fn front_unchecked(&self) -> &T {
        debug_assert!(!self.is_empty());
        unsafe { &*self.buf.ptr().as_ptr() }
    }

    /// Returns the last element without checking.
    ///
    /// # Safety
    /// The vector must not be empty.
    #[must_use]
    #[inline(always)]
    pub unsafe fn back_unchecked(&self) -> &T {
        debug_assert!(!self.is_empty());
        unsafe { &*self.buf.ptr().as_ptr().add(self.len - 1) }
    }

    /// Inserts an element at position `index`, shifting all elements after it to the right.
    ///
    /// `index == len` appends.
    ///
    /// # Errors
    /// Errors if the vector is not active, if `index > len` or on allocation failure.
    /// The element is dropped in that case.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::{ managed_vec, Error };
    /// let mut vec = managed_vec![1, 3];
    /// vec.insert(1, 2)?;
    /// vec.insert(3, 4)?;
    /// assert_eq!(vec, [1, 2, 3, 4]);
    /// assert_eq!(vec.insert(9, 5), Err(Error::OutOfBounds { index: 9, len: 4 }));
    /// # Ok::<(), Error>(())
    /// ```
    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        diagnose(
            "insert",
            self.guarded(|vec| {
                let len = vec.len;

                if index > len {
                    return Err(Error::OutOfBounds { index, len });
                }

                vec.generic_reserve_one::<Error>()?;

                // SAFETY: there is room for one more element and `index <= len`
                unsafe {
                    let ptr = vec.buf.ptr().as_ptr().add(index);

                    if index != len {
                        ptr::copy(ptr, ptr.add(1), len - index);
                    }

                    ptr.write(value);
                    vec.len = len + 1;
                }

                Ok(())
            }),
        )
    }

    /// Resizes the vector so that `len` is equal to `new_len`.
    ///
    /// Growing fills the new slots with clones of `value`. If `new_len` exceeds the capacity,
    /// the buffer is first grown to exactly `max(4, new_len)`, like [`reserve`](Self::reserve).
    /// Shrinking drops the excess elements and keeps the capacity.
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let mut vec = managed_vec![1];
    /// vec.resize(5, 0)?;
    /// assert_eq!(vec, [1, 0, 0, 0, 0]);
    /// assert_eq!(vec.capacity(), 5);
    ///
    /// vec.resize(2, 0)?;
    /// assert_eq!(vec, [1, 0]);
    /// assert_eq!(vec.capacity(), 5);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), Error>
    where
        T: Clone,
    {
        diagnose(
            "resize",
            self.guarded(|vec| {
                let len = vec.len;

                if new_len > len {
                    vec.generic_reserve_exact::<Error>(new_len)?;
                    // SAFETY: we just made room for `new_len` elements
                    unsafe { vec.extend_with_unchecked(new_len - len, value) };
                } else {
                    vec.truncate_unguarded(new_len);
                }

                Ok(())
            }),
        )
    }

    /// Makes sure the vector can hold `capacity` elements.
    ///
    /// If `capacity` exceeds the current capacity the buffer is reallocated to exactly `max(4, capacity)`.
    /// Otherwise nothing happens.
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::ManagedVec;
    /// let mut vec = ManagedVec::<u8>::new();
    /// vec.reserve(1)?;
    /// assert_eq!(vec.capacity(), 4);
    /// vec.reserve(10)?;
    /// assert_eq!(vec.capacity(), 10);
    /// vec.reserve(5)?;
    /// assert_eq!(vec.capacity(), 10);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn reserve(&mut self, capacity: usize) -> Result<(), Error> {
        diagnose("reserve", self.guarded(|vec| vec.generic_reserve_exact(capacity)))
    }

    /// Reallocates the buffer to exactly `len` elements. An empty vector releases its buffer.
    ///
    /// # Errors
    /// Errors if the vector is not active or on allocation failure.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::ManagedVec;
    /// let mut vec = ManagedVec::with_capacity(10);
    /// vec.push_back(1)?;
    /// vec.shrink_to_fit()?;
    /// assert_eq!(vec.capacity(), 1);
    ///
    /// vec.clear()?;
    /// vec.shrink_to_fit()?;
    /// assert_eq!(vec.capacity(), 0);
    /// assert!(vec.as_ptr().is_null());
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn shrink_to_fit(&mut self) -> Result<(), Error> {
        diagnose(
            "shrink_to_fit",
            self.guarded(|vec| {
                if vec.len == vec.buf.capacity() {
                    return Ok(());
                }

                if vec.len == 0 {
                    vec.buf.release();
                    return Ok(());
                }

                vec.buf.generic_shrink_to(vec.len)
            }),
        )
    }

    /// Exchanges the contents of two vectors without copying elements.
    ///
    /// Buffers, lengths and capacities trade places. Both vectors must be active.
    /// See also the free function [`swap`].
    ///
    /// # Errors
    /// Errors if either vector is not active. Neither vector is changed in that case.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let mut a = managed_vec![1, 2, 3];
    /// let mut b = managed_vec![4];
    /// a.swap_with(&mut b)?;
    /// assert_eq!(a, [4]);
    /// assert_eq!(b, [1, 2, 3]);
    /// # Ok::<(), managed_vec::Error>(())
    /// ```
    #[track_caller]
    pub fn swap_with(&mut self, other: &mut Self) -> Result<(), Error> {
        diagnose("swap", self.lifecycle.check())?;
        diagnose("swap", other.lifecycle.check())?;

        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
        Ok(())
    }

    #[inline(always)]
    fn generic_push_with<E: ErrorBehavior>(&mut self, f: impl FnOnce() -> T) -> Result<&mut T, E> {
        self.generic_reserve_one::<E>()?;

        // SAFETY: there is room for one more element
        unsafe {
            let slot = self.buf.ptr().as_ptr().add(self.len);
            slot.write(f());
            self.len += 1;
            Ok(&mut *slot)
        }
    }

    #[inline(always)]
    fn generic_reserve_one<E: ErrorBehavior>(&mut self) -> Result<(), E> {
        if self.len == self.buf.capacity() {
            self.generic_grow_one_cold::<E>()?;
        }

        Ok(())
    }

    #[cold]
    #[inline(never)]
    fn generic_grow_one_cold<E: ErrorBehavior>(&mut self) -> Result<(), E> {
        let new_capacity = match raw_buf::grown_capacity(self.buf.capacity()) {
            Some(new_capacity) => new_capacity,
            None => return Err(E::capacity_overflow()),
        };

        self.buf.generic_grow_to(new_capacity)
    }

    #[inline(always)]
    pub(crate) fn generic_reserve_bulk<E: ErrorBehavior>(&mut self, additional: usize) -> Result<(), E> {
        if additional > self.buf.capacity() - self.len {
            self.generic_grow_bulk_cold::<E>(additional)?;
        }

        Ok(())
    }

    #[cold]
    #[inline(never)]
    fn generic_grow_bulk_cold<E: ErrorBehavior>(&mut self, additional: usize) -> Result<(), E> {
        let Some(required) = self.len.checked_add(additional) else {
            return Err(E::capacity_overflow());
        };

        let new_capacity = match raw_buf::bulk_capacity(self.buf.capacity(), required) {
            Some(new_capacity) => new_capacity,
            None => return Err(E::capacity_overflow()),
        };

        self.buf.generic_grow_to(new_capacity)
    }

    #[inline]
    pub(crate) fn generic_reserve_exact<E: ErrorBehavior>(&mut self, capacity: usize) -> Result<(), E> {
        if capacity > self.buf.capacity() {
            self.buf.generic_grow_to::<E>(raw_buf::reserve_capacity(capacity))?;
        }

        Ok(())
    }

    /// Moves the elements of `array` to the back.
    ///
    /// # Safety
    /// There must be room for `N` more elements.
    unsafe fn append_array_unchecked<const N: usize>(&mut self, array: [T; N]) {
        debug_assert!(self.buf.capacity() - self.len >= N);

        let array = ManuallyDrop::new(array);

        unsafe {
            let dst = self.buf.ptr().as_ptr().add(self.len);
            ptr::copy_nonoverlapping(array.as_ptr(), dst, N);
        }

        self.len += N;
    }

    /// Appends `n` clones of `value`, moving `value` itself into the last slot.
    ///
    /// # Safety
    /// There must be room for `n` more elements.
    unsafe fn extend_with_unchecked(&mut self, n: usize, value: T)
    where
        T: Clone,
    {
        debug_assert!(self.buf.capacity() - self.len >= n);

        let mut ptr = unsafe { self.buf.ptr().as_ptr().add(self.len) };

        // Use SetLenOnDrop to work around bug where compiler
        // might not realize the store through `ptr` through self.set_len()
        // don't alias.
        let mut local_len = SetLenOnDrop::new(&mut self.len);

        unsafe {
            // Write all elements except the last one
            for _ in 1..n {
                ptr.write(value.clone());
                ptr = ptr.add(1);
                // Increment the length in every step in case clone() panics
                local_len.increment_len(1);
            }

            if n > 0 {
                // We can write the last element directly without cloning needlessly
                ptr.write(value);
                local_len.increment_len(1);
            }
        }
    }

    /// Appends clones of the elements of `slice`.
    ///
    /// # Safety
    /// There must be room for `slice.len()` more elements.
    unsafe fn extend_from_slice_clone_unchecked(&mut self, slice: &[T])
    where
        T: Clone,
    {
        debug_assert!(self.buf.capacity() - self.len >= slice.len());

        let base = self.buf.ptr().as_ptr();
        let mut local_len = SetLenOnDrop::new(&mut self.len);

        for value in slice {
            unsafe { base.add(local_len.current_len()).write(value.clone()) };
            local_len.increment_len(1);
        }
    }
}

/// Exchanges the contents of `a` and `b`.
///
/// Both vectors must hold the same element type and share an allocator type,
/// exchanging a `ManagedVec<f32>` with a `ManagedVec<u32>` does not compile.
///
/// # Errors
/// Errors if either vector is not active.
///
/// # Examples
/// ```
/// # use managed_vec::{ managed_vec, vec::swap };
/// let mut a = managed_vec![1.0f32, 2.0];
/// let mut b = managed_vec![3.0f32];
/// swap(&mut a, &mut b)?;
/// assert_eq!(a, [3.0]);
/// # Ok::<(), managed_vec::Error>(())
/// ```
#[track_caller]
#[inline]
pub fn swap<T, A: Allocator>(a: &mut ManagedVec<T, A>, b: &mut ManagedVec<T, A>) -> Result<(), Error> {
    a.swap_with(b)
}

#[cold]
#[inline(never)]
#[track_caller]
fn access_failed(operation: &'static str, error: Error) -> ! {
    let error = report(operation, error, Location::caller());
    panic!("{operation}: {error}")
}

impl<T, A: Allocator> Drop for ManagedVec<T, A> {
    fn drop(&mut self) {
        // SAFETY: the first `len` elements are initialized, `RawBuf` releases the memory afterwards
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

#[cfg(feature = "alloc")]
impl<T> Default for ManagedVec<T> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Allocator> Deref for ManagedVec<T, A> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for ManagedVec<T, A> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T, A: Allocator> AsRef<[T]> for ManagedVec<T, A> {
    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> AsMut<[T]> for ManagedVec<T, A> {
    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T, A: Allocator> Borrow<[T]> for ManagedVec<T, A> {
    #[inline(always)]
    fn borrow(&self) -> &[T] {
        self
    }
}

impl<T, A: Allocator> BorrowMut<[T]> for ManagedVec<T, A> {
    #[inline(always)]
    fn borrow_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Debug, A: Allocator> Debug for ManagedVec<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for ManagedVec<T, A> {
    /// Clones the elements into a buffer of the same allocator.
    ///
    /// The clone has the same lifecycle state. Its capacity follows [`reserve`](ManagedVec::reserve)
    /// so it may differ from the original's.
    ///
    /// # Panics
    /// Panics on allocation failure.
    fn clone(&self) -> Self {
        let mut vec = Self::new_in(self.allocator().clone());
        infallible(vec.generic_reserve_exact(self.len));
        // SAFETY: we just reserved space for `self.len` elements
        unsafe { vec.extend_from_slice_clone_unchecked(self.as_slice()) };
        vec.lifecycle = self.lifecycle;
        vec
    }
}

impl<T: Hash, A: Allocator> Hash for ManagedVec<T, A> {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, U, A, B> PartialEq<ManagedVec<U, B>> for ManagedVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    #[inline]
    fn eq(&self, other: &ManagedVec<U, B>) -> bool {
        <[T] as PartialEq<[U]>>::eq(self, other)
    }
}

impl<T, U, A, const N: usize> PartialEq<[U; N]> for ManagedVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        <[T] as PartialEq<[U]>>::eq(self, other)
    }
}

impl<T, U, A, const N: usize> PartialEq<&[U; N]> for ManagedVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[U; N]) -> bool {
        <[T] as PartialEq<[U]>>::eq(self, *other)
    }
}

impl<T, U, A> PartialEq<[U]> for ManagedVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &[U]) -> bool {
        <[T] as PartialEq<[U]>>::eq(self, other)
    }
}

impl<T, U, A> PartialEq<&[U]> for ManagedVec<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        <[T] as PartialEq<[U]>>::eq(self, other)
    }
}

impl<T, U, A> PartialEq<ManagedVec<U, A>> for [T]
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &ManagedVec<U, A>) -> bool {
        <[T] as PartialEq<[U]>>::eq(self, other)
    }
}

impl<T, U, A, const N: usize> PartialEq<ManagedVec<U, A>> for [T; N]
where
    T: PartialEq<U>,
    A: Allocator,
{
    #[inline]
    fn eq(&self, other: &ManagedVec<U, A>) -> bool {
        <[T] as PartialEq<[U]>>::eq(self, other)
    }
}

impl<T: Eq, A: Allocator> Eq for ManagedVec<T, A> {}

impl<T, A: Allocator> Extend<T> for ManagedVec<T, A> {
    /// Appends every element of `iter`.
    ///
    /// An inactive vector is left untouched and the rejection is logged.
    ///
    /// # Panics
    /// Panics on allocation failure.
    #[track_caller]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if diagnose("extend", self.lifecycle.check()).is_err() {
            return;
        }

        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        infallible(self.generic_reserve_bulk(lower));

        for value in iter {
            infallible(self.generic_push_with(|| value));
        }
    }
}

impl<'t, T: Copy + 't, A: Allocator> Extend<&'t T> for ManagedVec<T, A> {
    #[track_caller]
    fn extend<I: IntoIterator<Item = &'t T>>(&mut self, iter: I) {
        <Self as Extend<T>>::extend(self, iter.into_iter().copied());
    }
}

#[cfg(feature = "alloc")]
impl<T> FromIterator<T> for ManagedVec<T> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, A: Allocator> IntoIterator for ManagedVec<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let this = ManuallyDrop::new(self);
        let len = this.len;

        // SAFETY: `this` is never used or dropped again, so `buf` has exactly one owner
        let buf = unsafe { ptr::read(&this.buf) };

        // SAFETY: the first `len` elements of `buf` are initialized
        unsafe { IntoIter::new(buf, len) }
    }
}

impl<'v, T, A: Allocator> IntoIterator for &'v ManagedVec<T, A> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'v, T, A: Allocator> IntoIterator for &'v mut ManagedVec<T, A> {
    type Item = &'v mut T;
    type IntoIter = slice::IterMut<'v, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
