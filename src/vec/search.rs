use core::slice;

use allocator_api2::alloc::Allocator;

use crate::diagnostic::diagnose;

use super::ManagedVec;

impl<T, A: Allocator> ManagedVec<T, A> {
    /// Returns the index of the first element equal to `value`.
    ///
    /// Returns `None` if there is no such element or the vector is not active.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let vec = managed_vec![5, 12, 13, 14, 48, 50];
    /// assert_eq!(vec.find(&48), Some(4));
    /// assert_eq!(vec.find(&7), None);
    /// ```
    #[must_use]
    #[track_caller]
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.position_where("find", value, |element, value| element == value)
    }

    /// Returns the index of the first element for which `eq(element, value)` holds.
    ///
    /// Returns `None` if there is no such element or the vector is not active.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let vec = managed_vec![1.0f32, 2.0, 3.0];
    /// let index = vec.find_custom(&2.05, |a, b| (a - b).abs() < 0.1);
    /// assert_eq!(index, Some(1));
    /// ```
    #[must_use]
    #[track_caller]
    pub fn find_custom<F>(&self, value: &T, eq: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> bool,
    {
        self.position_where("find_custom", value, eq)
    }

    #[track_caller]
    fn position_where<F>(&self, operation: &'static str, value: &T, mut eq: F) -> Option<usize>
    where
        F: FnMut(&T, &T) -> bool,
    {
        if diagnose(operation, self.lifecycle.check()).is_err() {
            return None;
        }

        position_unrolled(self.as_slice(), |element| eq(element, value))
    }

    /// Returns an iterator that allows modifying each element in place.
    ///
    /// The vector can't be resized while the iterator is alive.
    /// An inactive vector yields nothing and the rejection is logged.
    ///
    /// # Examples
    /// ```
    /// # use managed_vec::managed_vec;
    /// let mut vec = managed_vec![1, 2, 3];
    ///
    /// for element in vec.foreach() {
    ///     *element *= 10;
    /// }
    ///
    /// assert_eq!(vec, [10, 20, 30]);
    /// ```
    #[track_caller]
    pub fn foreach(&mut self) -> slice::IterMut<'_, T> {
        // An inactive vector is empty already, so the rejection only needs to be reported.
        let _ = diagnose("foreach", self.lifecycle.check());
        self.as_mut_slice().iter_mut()
    }
}

/// Linear scan that tests four elements per step.
#[inline]
fn position_unrolled<T>(slice: &[T], mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
    let mut chunks = slice.chunks_exact(4);
    let mut offset = 0;

    for chunk in &mut chunks {
        if predicate(&chunk[0]) {
            return Some(offset);
        }

        if predicate(&chunk[1]) {
            return Some(offset + 1);
        }

        if predicate(&chunk[2]) {
            return Some(offset + 2);
        }

        if predicate(&chunk[3]) {
            return Some(offset + 3);
        }

        offset += 4;
    }

    for (index, element) in chunks.remainder().iter().enumerate() {
        if predicate(element) {
            return Some(offset + index);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::position_unrolled;

    #[test]
    fn finds_first_match_in_every_lane() {
        let values: [u8; 11] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        for (index, value) in values.iter().enumerate() {
            assert_eq!(position_unrolled(&values, |v| v == value), Some(index));
        }

        assert_eq!(position_unrolled(&values, |v| *v == 11), None);
    }

    #[test]
    fn returns_first_of_duplicates() {
        let values = [3, 1, 3, 1, 3, 1, 1];
        assert_eq!(position_unrolled(&values, |v| *v == 1), Some(1));
        assert_eq!(position_unrolled(&[] as &[i32], |_| true), None);
    }
}
