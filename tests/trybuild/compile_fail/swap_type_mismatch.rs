use managed_vec::{managed_vec, vec::swap};

fn main() {
    let mut vertices = managed_vec![0.0f32, 1.0];
    let mut indices = managed_vec![0u32, 1];
    let _ = swap(&mut vertices, &mut indices);
}
