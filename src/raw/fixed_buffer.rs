use alloc::boxed::Box;
use alloc::vec::Vec;

/// A fixed-length, bounds-checked run of slots.
///
/// The capacity is chosen at construction and never changes. Growing or
/// shrinking means allocating a new buffer and moving the elements over.
pub(crate) struct FixedBuffer<T> {
    slots: Box<[Option<T>]>,
}

impl<T> FixedBuffer<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "`FixedBuffer::new()` - `capacity` must be positive!");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots: slots.into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> &T {
        self.slots[index].as_ref().expect("`FixedBuffer::get()` - slot is vacant!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> &mut T {
        self.slots[index].as_mut().expect("`FixedBuffer::get_mut()` - slot is vacant!")
    }

    /// Stores `element` at `index`, returning whatever the slot held before.
    #[inline]
    pub(crate) fn set(&mut self, index: usize, element: T) -> Option<T> {
        self.slots[index].replace(element)
    }

    pub(crate) fn take(&mut self, index: usize) -> T {
        self.slots[index].take().expect("`FixedBuffer::take()` - slot is vacant!")
    }

    #[inline]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }

    /// Drops every occupied slot in `0..len`.
    pub(crate) fn vacate(&mut self, len: usize) {
        for slot in &mut self.slots[..len] {
            *slot = None;
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // The buffer is a single boxed slice; no separate length or capacity field.
    assert_eq_size!(FixedBuffer<u64>, Box<[Option<u64>]>);

    #[test]
    fn buffer_capacity() {
        let buffer: FixedBuffer<u32> = FixedBuffer::new(10);
        assert_eq!(buffer.capacity(), 10);
    }

    #[test]
    #[should_panic(expected = "`FixedBuffer::new()` - `capacity` must be positive!")]
    fn zero_capacity() {
        let _ = FixedBuffer::<u32>::new(0);
    }

    #[test]
    #[should_panic(expected = "`FixedBuffer::get()` - slot is vacant!")]
    fn get_vacant() {
        let buffer: FixedBuffer<u32> = FixedBuffer::new(4);
        let _ = buffer.get(2);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn set_out_of_bounds() {
        let mut buffer: FixedBuffer<u32> = FixedBuffer::new(4);
        buffer.set(4, 1);
    }

    #[test]
    fn vacate_drops_prefix() {
        let mut buffer = FixedBuffer::new(3);
        buffer.set(0, 'a');
        buffer.set(1, 'b');
        buffer.set(2, 'c');
        buffer.vacate(2);
        assert_eq!(buffer.set(0, 'x'), None);
        assert_eq!(buffer.set(1, 'y'), None);
        assert_eq!(*buffer.get(2), 'c');
    }

    proptest! {
        #[test]
        fn buffer_behaves_like_slice(capacity in 1usize..64, operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<Option<u32>> = alloc::vec![None; capacity];
            let mut buffer: FixedBuffer<u32> = FixedBuffer::new(capacity);

            for operation in operations {
                match operation {
                    Operation::Set(which, value) => {
                        let index = which % capacity;
                        prop_assert_eq!(buffer.set(index, value), model[index].replace(value));
                    }
                    Operation::GetMut(which, value) => {
                        let index = which % capacity;
                        if model[index].is_none() {
                            continue;
                        }

                        *buffer.get_mut(index) = value;
                        model[index] = Some(value);
                    }
                    Operation::Take(which) => {
                        let index = which % capacity;
                        if model[index].is_none() {
                            continue;
                        }

                        prop_assert_eq!(Some(buffer.take(index)), model[index].take());
                    }
                    Operation::Swap(a, b) => {
                        buffer.swap(a % capacity, b % capacity);
                        model.swap(a % capacity, b % capacity);
                    }
                }

                prop_assert_eq!(buffer.capacity(), capacity);

                for (index, value) in model.iter().enumerate() {
                    if let Some(value) = value {
                        prop_assert_eq!(buffer.get(index), value);
                    }
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Set(usize, u32),
        GetMut(usize, u32),
        Take(usize),
        Swap(usize, usize),
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Set(which, value)),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Take),
            5 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Operation::Swap(a, b)),
        ]
    }
}
