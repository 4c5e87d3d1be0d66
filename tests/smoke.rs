#![cfg(feature = "alloc")]

use std::fmt::Write;

use managed_vec::ManagedVec;

#[test]
fn print_elements() {
    let mut vec = ManagedVec::uninit();
    vec.init().unwrap();

    vec.push_back(5).unwrap();
    vec.push_back(12).unwrap();
    vec.push_back(13).unwrap();
    vec.push_back_args([14, 48, 50]).unwrap();

    let mut output = String::new();

    for item in vec.foreach() {
        write!(output, "{item}, ").unwrap();
    }

    assert_eq!(output, "5, 12, 13, 14, 48, 50, ");
    assert_eq!(vec.find(&48), Some(4));
    assert_eq!(vec.find(&7), None);

    vec.destroy().unwrap();
}
