#![cfg(feature = "std")]

#[cfg(feature = "bytemuck")]
mod bytemuck;
mod zst;

extern crate std;

use std::{cell::Cell, rc::Rc};

/// Counts its own drops into a shared counter.
#[derive(Debug, Clone)]
struct DropCounter(Rc<Cell<usize>>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn drop_counter() -> (Rc<Cell<usize>>, DropCounter) {
    let drops = Rc::new(Cell::new(0));
    (drops.clone(), DropCounter(drops))
}
