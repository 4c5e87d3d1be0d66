#[cfg(feature = "serde")]
mod serde;

#[cfg(feature = "bytemuck")]
pub mod bytemuck;
