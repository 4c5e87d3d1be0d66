use core::{
    alloc::Layout,
    marker::PhantomData,
    mem,
    ptr::NonNull,
};

use allocator_api2::alloc::Allocator;

use crate::{ErrorBehavior, SizedTypeProperties};

/// The smallest capacity an allocated buffer ever has, unless it was shrunk to fit.
pub(crate) const MIN_NON_ZERO_CAP: usize = 4;

/// Capacity after growing a full buffer by one element: `max(4, capacity * 2)`.
#[inline]
pub(crate) const fn grown_capacity(capacity: usize) -> Option<usize> {
    match capacity.checked_mul(2) {
        Some(doubled) if doubled < MIN_NON_ZERO_CAP => Some(MIN_NON_ZERO_CAP),
        Some(doubled) => Some(doubled),
        None => None,
    }
}

/// Capacity that fits `required` elements in a single reallocation.
///
/// An unallocated buffer jumps straight to `max(4, required)`,
/// an allocated one keeps doubling so later single-element growth stays amortized.
#[inline]
pub(crate) const fn bulk_capacity(capacity: usize, required: usize) -> Option<usize> {
    if capacity == 0 {
        return Some(reserve_capacity(required));
    }

    let mut new_capacity = capacity;

    while new_capacity < required {
        new_capacity = match new_capacity.checked_mul(2) {
            Some(doubled) => doubled,
            None => return None,
        };
    }

    Some(new_capacity)
}

/// Capacity for an explicit request of `requested` elements: `max(4, requested)`.
#[inline]
pub(crate) const fn reserve_capacity(requested: usize) -> usize {
    if requested < MIN_NON_ZERO_CAP {
        MIN_NON_ZERO_CAP
    } else {
        requested
    }
}

/// An owned allocation of `cap` slots of `T`, none of which are considered initialized.
///
/// `ptr` is dangling iff `cap == 0` or `T` is zero sized.
/// Zero sized types never reach the allocator, their capacity is pure bookkeeping.
pub(crate) struct RawBuf<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    allocator: A,
    marker: PhantomData<T>,
}

unsafe impl<T: Send, A: Allocator + Send> Send for RawBuf<T, A> {}
unsafe impl<T: Sync, A: Allocator + Sync> Sync for RawBuf<T, A> {}

impl<T, A: Allocator> RawBuf<T, A> {
    #[inline(always)]
    pub(crate) const fn new_in(allocator: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            allocator,
            marker: PhantomData,
        }
    }

    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline(always)]
    pub(crate) const fn ptr(&self) -> NonNull<T> {
        self.ptr
    }

    #[inline(always)]
    pub(crate) const fn allocator(&self) -> &A {
        &self.allocator
    }

    #[inline(always)]
    fn layout_for<E: ErrorBehavior>(capacity: usize) -> Result<Layout, E> {
        match Layout::array::<T>(capacity) {
            Ok(layout) => Ok(layout),
            Err(_) => Err(E::capacity_overflow()),
        }
    }

    #[inline(always)]
    fn current_layout(&self) -> Layout {
        // SAFETY: we already allocated that amount so this can't overflow
        unsafe { Layout::from_size_align_unchecked(self.cap * T::SIZE, mem::align_of::<T>()) }
    }

    /// Reallocates to exactly `new_cap` slots, moving the contents.
    ///
    /// On failure nothing changes, the old allocation stays valid.
    pub(crate) fn generic_grow_to<E: ErrorBehavior>(&mut self, new_cap: usize) -> Result<(), E> {
        debug_assert!(new_cap > self.cap);

        let new_layout = Self::layout_for::<E>(new_cap)?;

        if T::IS_ZST {
            self.cap = new_cap;
            return Ok(());
        }

        let result = if self.cap == 0 {
            self.allocator.allocate(new_layout)
        } else {
            // SAFETY: `ptr` is currently allocated by `allocator` with `current_layout`
            // and `new_layout` is bigger with the same alignment.
            unsafe { self.allocator.grow(self.ptr.cast(), self.current_layout(), new_layout) }
        };

        match result {
            Ok(ptr) => {
                self.ptr = ptr.cast();
                self.cap = new_cap;
                Ok(())
            }
            Err(_) => Err(E::allocation(new_layout)),
        }
    }

    /// Reallocates to exactly `new_cap` slots, which must be non-zero and below the current capacity.
    ///
    /// On failure nothing changes, the old allocation stays valid.
    pub(crate) fn generic_shrink_to<E: ErrorBehavior>(&mut self, new_cap: usize) -> Result<(), E> {
        debug_assert!(new_cap != 0 && new_cap < self.cap);

        let new_layout = Self::layout_for::<E>(new_cap)?;

        if T::IS_ZST {
            self.cap = new_cap;
            return Ok(());
        }

        // SAFETY: `ptr` is currently allocated by `allocator` with `current_layout`
        // and `new_layout` is smaller with the same alignment.
        let result = unsafe { self.allocator.shrink(self.ptr.cast(), self.current_layout(), new_layout) };

        match result {
            Ok(ptr) => {
                self.ptr = ptr.cast();
                self.cap = new_cap;
                Ok(())
            }
            Err(_) => Err(E::allocation(new_layout)),
        }
    }

    /// Returns the allocation to the allocator. Does not drop any elements.
    pub(crate) fn release(&mut self) {
        if self.cap != 0 && !T::IS_ZST {
            // SAFETY: `ptr` is currently allocated by `allocator` with `current_layout`.
            unsafe { self.allocator.deallocate(self.ptr.cast(), self.current_layout()) };
        }

        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T, A: Allocator> Drop for RawBuf<T, A> {
    #[inline]
    fn drop(&mut self) {
        self.release();
    }
}
