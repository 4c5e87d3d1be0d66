#![allow(unused)]

mod capture_logger;
mod instrumented_allocator;
mod limited_allocator;

pub(crate) use capture_logger::{capture, Captured};
pub(crate) use instrumented_allocator::InstrumentedAllocator;
pub(crate) use limited_allocator::Limited;
