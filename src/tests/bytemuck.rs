use crate::{bytemuck::VecExt, managed_vec, Error, ManagedVec};

#[test]
fn as_bytes() {
    let mut vec = managed_vec![0x0102_0304u32, 0];
    assert_eq!(vec.as_bytes().len(), vec.byte_len());
    assert_eq!(&vec.as_bytes()[..4], &0x0102_0304u32.to_ne_bytes());

    vec.as_bytes_mut()[4..].copy_from_slice(&7u32.to_ne_bytes());
    assert_eq!(vec, [0x0102_0304, 7]);
}

#[test]
fn extend_zeroed() {
    let mut vec = managed_vec![1.5f32];
    vec.extend_zeroed(4).unwrap();
    assert_eq!(vec, [1.5, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(vec.capacity(), 8);

    vec.extend_zeroed(0).unwrap();
    assert_eq!(vec.len(), 5);
}

#[test]
fn resize_zeroed() {
    let mut vec = managed_vec![1u16, 2, 3];
    vec.resize_zeroed(6).unwrap();
    assert_eq!(vec, [1, 2, 3, 0, 0, 0]);
    assert_eq!(vec.capacity(), 6);

    vec.resize_zeroed(1).unwrap();
    assert_eq!(vec, [1]);
}

#[test]
fn inactive() {
    let mut vec = ManagedVec::<u8>::uninit();
    assert_eq!(vec.extend_zeroed(1), Err(Error::NotInitialized));
    assert_eq!(vec.resize_zeroed(1), Err(Error::NotInitialized));
    assert!(vec.as_bytes().is_empty());
}
