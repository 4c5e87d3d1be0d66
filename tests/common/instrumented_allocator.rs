use std::{
    alloc::Layout,
    cell::{Cell, Ref, RefCell},
    collections::HashMap,
    panic::{RefUnwindSafe, UnwindSafe},
    ptr::NonNull,
};

use allocator_api2::alloc::{AllocError, Allocator};

/// Tracks live allocations so tests can assert that nothing leaks.
#[derive(Default)]
pub(crate) struct InstrumentedAllocator<A: Allocator> {
    allocator: A,
    allocations: RefCell<HashMap<NonNull<u8>, Layout>>,
    reallocations: Cell<usize>,
}

impl<A: Allocator> UnwindSafe for InstrumentedAllocator<A> where A: UnwindSafe {}
impl<A: Allocator> RefUnwindSafe for InstrumentedAllocator<A> where A: RefUnwindSafe {}

impl<A: Allocator> InstrumentedAllocator<A> {
    pub(crate) fn new(allocator: A) -> Self {
        Self {
            allocator,
            allocations: Default::default(),
            reallocations: Cell::new(0),
        }
    }

    pub(crate) fn leaks(&self) -> Ref<'_, HashMap<NonNull<u8>, Layout>> {
        self.allocations.borrow()
    }

    /// Number of `grow` and `shrink` calls so far.
    pub(crate) fn reallocations(&self) -> usize {
        self.reallocations.get()
    }

    fn forget(&self, ptr: NonNull<u8>, layout: Layout) {
        let found = self.allocations.borrow_mut().remove(&ptr).expect("foreign ptr");
        assert_eq!(found, layout, "layout mismatch");
    }
}

impl<A: Allocator> Drop for InstrumentedAllocator<A> {
    fn drop(&mut self) {
        for (ptr, layout) in self.allocations.get_mut().drain() {
            unsafe { self.allocator.deallocate(ptr, layout) }
        }
    }
}

unsafe impl<A: Allocator> Allocator for InstrumentedAllocator<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let ptr = self.allocator.allocate(layout)?.cast();
        self.allocations.borrow_mut().insert(ptr, layout);
        // don't return a bigger slice than requested
        let slice = NonNull::slice_from_raw_parts(ptr, layout.size());
        Ok(slice)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.forget(ptr, layout);
        unsafe { self.allocator.deallocate(ptr, layout) };
    }

    unsafe fn grow(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let new_ptr = unsafe { self.allocator.grow(ptr, old_layout, new_layout)? }.cast();
        self.forget(ptr, old_layout);
        self.allocations.borrow_mut().insert(new_ptr, new_layout);
        self.reallocations.set(self.reallocations.get() + 1);
        Ok(NonNull::slice_from_raw_parts(new_ptr, new_layout.size()))
    }

    unsafe fn shrink(&self, ptr: NonNull<u8>, old_layout: Layout, new_layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
        let new_ptr = unsafe { self.allocator.shrink(ptr, old_layout, new_layout)? }.cast();
        self.forget(ptr, old_layout);
        self.allocations.borrow_mut().insert(new_ptr, new_layout);
        self.reallocations.set(self.reallocations.get() + 1);
        Ok(NonNull::slice_from_raw_parts(new_ptr, new_layout.size()))
    }
}
