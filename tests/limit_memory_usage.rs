#![cfg(feature = "alloc")]

use std::alloc::Layout;

use allocator_api2::alloc::Global;
use managed_vec::{Error, ManagedVec};

mod common;

use common::Limited;

#[test]
fn failed_growth_leaves_vector_untouched() {
    let allocator = Limited::new_in(64, Global);
    let mut vec = ManagedVec::<u64, _>::new_in(&allocator);

    for i in 0..8 {
        vec.push_back(i).unwrap();
    }

    assert_eq!(vec.capacity(), 8);
    assert_eq!(allocator.current(), 64);

    let before = vec.as_ptr();
    let layout = Layout::array::<u64>(16).unwrap();

    assert_eq!(vec.push_back(8), Err(Error::AllocationFailed { layout }));
    assert_eq!(vec.insert(0, 8), Err(Error::AllocationFailed { layout }));
    assert_eq!(vec.push_back_args([8, 9]), Err(Error::AllocationFailed { layout }));
    assert_eq!(vec.insert_args(4, [8]), Err(Error::AllocationFailed { layout }));

    assert_eq!(vec.len(), 8);
    assert_eq!(vec.capacity(), 8);
    assert_eq!(vec.as_ptr(), before);
    assert!(vec.iter().copied().eq(0..8));

    // still fully usable
    vec.truncate(4).unwrap();
    vec.shrink_to_fit().unwrap();
    assert_eq!(allocator.current(), 32);

    vec.push_back_bulk(&[4, 5, 6, 7]).unwrap();
    assert_eq!(vec.capacity(), 8);
    assert_eq!(allocator.current(), 64);
}

#[test]
fn failed_first_allocation() {
    let allocator = Limited::new_in(3, Global);
    let mut vec = ManagedVec::<u8, _>::new_in(&allocator);

    assert!(vec.push_back(1).unwrap_err().is_allocation());
    assert!(vec.as_ptr().is_null());
    assert_eq!(vec.capacity(), 0);

    // reservations round up to four elements
    assert!(ManagedVec::<u8, _>::try_with_capacity_in(3, &allocator).is_err());
    assert!(ManagedVec::<u8, _>::try_with_capacity_in(0, &allocator).is_ok());
}

#[test]
fn destroy_returns_memory() {
    let allocator = Limited::new_in(1024, Global);
    let mut vec = ManagedVec::<u32, _>::new_in(&allocator);
    vec.resize(100, 7).unwrap();
    assert_eq!(allocator.current(), 400);

    vec.destroy().unwrap();
    assert_eq!(allocator.current(), 0);

    vec.init().unwrap();
    vec.reserve(256).unwrap();
    assert_eq!(allocator.current(), 1024);
}
