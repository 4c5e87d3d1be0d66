use crate::{managed_vec, ManagedVec};

#[test]
fn zero_sized_elements() {
    let mut vec = ManagedVec::new();

    for _ in 0..5 {
        vec.push_back(()).unwrap();
    }

    assert_eq!(vec.len(), 5);
    assert_eq!(vec.capacity(), 8);
    assert_eq!(vec.byte_len(), 0);
    assert!(!vec.as_ptr().is_null());

    vec.insert_range(2, &[(), ()]).unwrap();
    assert_eq!(vec.len(), 7);

    assert_eq!(vec.pop_back(), Ok(()));
    vec.shrink_to_fit().unwrap();
    assert_eq!(vec.capacity(), 6);

    assert_eq!(vec.into_iter().count(), 6);
}

#[test]
fn zero_sized_find() {
    let vec = managed_vec![(); 3];
    assert_eq!(vec.find(&()), Some(0));
    assert_eq!(vec.find_custom(&(), |_, _| false), None);
}
