use super::DynamicArray;
use crate::raw::FixedBuffer;

/// Running counters of the reallocations a [`DynamicArray`] has performed.
///
/// This is an extension and is not part of the standard `Vec` API. It exists so
/// the amortized cost of a sequence of operations can be measured by counting
/// rather than by timing.
///
/// # Examples
///
/// ```
/// use wabi_array::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// for i in 0..1000 {
///     array.append_back(i);
/// }
///
/// let stats = array.resize_stats();
/// assert!(stats.moved < 2 * array.size());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ResizeStats {
    /// Number of times the backing buffer was replaced.
    pub reallocations: usize,
    /// Total number of elements moved from an old buffer into a new one.
    pub moved: usize,
}

impl<T> DynamicArray<T> {
    /// Returns the number of slots in the current backing buffer.
    ///
    /// This is an extension and is not part of the standard `Vec` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::new();
    /// assert_eq!(array.capacity(), 1);
    ///
    /// array.append_back('a');
    /// assert_eq!(array.capacity(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the reallocation counters accumulated since construction.
    ///
    /// This is an extension and is not part of the standard `Vec` API.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn resize_stats(&self) -> ResizeStats {
        self.stats
    }

    /// Returns `true` if the size/capacity relationship is in its steady state:
    /// capacity 1 when empty, otherwise `size <= capacity < 3 * size`.
    pub(crate) fn space_bound_holds(&self) -> bool {
        let capacity = self.capacity();
        if self.size == 0 {
            capacity == 1
        } else {
            self.size <= capacity && capacity < self.size.saturating_mul(3)
        }
    }

    /// Restores the space bound after a change in size, reallocating only when needed.
    ///
    /// A full buffer doubles, an empty one collapses to a single slot, and a buffer
    /// more than three times larger than its contents halves. Shrinking at `3n`
    /// rather than `2n` keeps an array hovering around a power of two from
    /// reallocating on every append/remove pair.
    pub(super) fn maintain(&mut self) {
        let capacity = self.capacity();
        let size = self.size;

        if size == capacity {
            let doubled = capacity.checked_mul(2).expect("`DynamicArray::maintain()` - capacity overflow!");
            self.reallocate(doubled);
        } else if size == 0 {
            if capacity != 1 {
                self.reallocate(1);
            }
        } else if size.saturating_mul(3) < capacity {
            self.reallocate(capacity / 2);
        }

        debug_assert!(self.space_bound_holds(), "`DynamicArray::maintain()` - space bound violated!");
    }

    /// Moves the live elements into a freshly allocated buffer of `new_capacity` slots.
    fn reallocate(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity > 0);
        debug_assert!(new_capacity >= self.size);

        log::trace!(
            "reallocating dynamic array: capacity {} -> {} (size {})",
            self.capacity(),
            new_capacity,
            self.size
        );

        let mut storage = FixedBuffer::new(new_capacity);
        for index in 0..self.size {
            storage.set(index, self.storage.take(index));
        }
        self.storage = storage;

        self.stats.reallocations += 1;
        self.stats.moved += self.size;
    }
}
