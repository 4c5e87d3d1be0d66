//! Zero-initialization and byte views for vectors of plain data, using [`bytemuck`](::bytemuck).
//!
//! ```
//! use managed_vec::{ managed_vec, bytemuck::VecExt };
//!
//! let mut indices = managed_vec![1u32, 2];
//! indices.extend_zeroed(2)?;
//! assert_eq!(indices, [1, 2, 0, 0]);
//! assert_eq!(indices.as_bytes().len(), indices.byte_len());
//! # Ok::<(), managed_vec::Error>(())
//! ```

mod vec_ext;

pub use vec_ext::VecExt;
