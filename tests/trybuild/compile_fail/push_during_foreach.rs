use managed_vec::managed_vec;

fn main() {
    let mut vec = managed_vec![1, 2, 3];

    for item in vec.foreach() {
        vec.push_back(*item).unwrap();
    }
}
