use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

use crate::error::{IndexError, UnderflowError};
use crate::raw::FixedBuffer;

mod capacity;

pub use capacity::ResizeStats;

/// A growable array built on a fixed-capacity backing buffer.
///
/// A `DynamicArray` owns exactly one backing buffer at a time. Whenever an
/// operation changes the number of elements, the array checks its capacity and,
/// if necessary, moves its contents into a new buffer:
///
/// - when the buffer becomes full, the capacity doubles;
/// - when the array becomes empty, the capacity collapses to 1;
/// - when fewer than a third of the slots are in use, the capacity halves.
///
/// Between operations the capacity is therefore exactly 1 for an empty array, and
/// otherwise at least the size and less than three times the size. A long run of
/// appends and removals costs amortized O(1) per operation, including runs that
/// oscillate around a power-of-two boundary.
///
/// # Examples
///
/// ```
/// use wabi_array::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.append_back(10);
/// array.append_back(20);
/// array.append_back(30);
///
/// assert_eq!(array.size(), 3);
/// assert_eq!(array.get(1), Ok(&20));
///
/// array.set(1, 25).unwrap();
/// assert_eq!(array.remove_back(), Ok(30));
/// assert_eq!(array.iter().copied().collect::<Vec<_>>(), [10, 25]);
///
/// array.clear();
/// assert!(array.is_empty());
/// assert_eq!(array.capacity(), 1);
/// ```
pub struct DynamicArray<T> {
    storage: FixedBuffer<T>,
    size: usize,
    stats: ResizeStats,
}

/// An iterator over the elements of a `DynamicArray`.
///
/// This `struct` is created by the [`iter`] method on [`DynamicArray`].
///
/// [`iter`]: DynamicArray::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    array: &'a DynamicArray<T>,
    front: usize,
    back: usize,
}

/// An owning iterator over the elements of a `DynamicArray`.
///
/// This `struct` is created by the [`into_iter`] method on [`DynamicArray`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<T> {
    storage: FixedBuffer<T>,
    front: usize,
    back: usize,
}

impl<T> DynamicArray<T> {
    /// Makes a new, empty `DynamicArray` with capacity 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::DynamicArray;
    ///
    /// let array: DynamicArray<i32> = DynamicArray::new();
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: FixedBuffer::new(1),
            size: 0,
            stats: ResizeStats::default(),
        }
    }

    /// Returns the number of elements in the array.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the array contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    fn check_index(&self, index: usize) -> Result<(), IndexError> {
        if index < self.size {
            Ok(())
        } else {
            Err(IndexError { index, size: self.size })
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `index >= self.size()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::{DynamicArray, IndexError};
    ///
    /// let array = DynamicArray::from(['a', 'b']);
    /// assert_eq!(array.get(0), Ok(&'a'));
    /// assert_eq!(array.get(2), Err(IndexError { index: 2, size: 2 }));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn get(&self, index: usize) -> Result<&T, IndexError> {
        self.check_index(index)?;
        Ok(self.storage.get(index))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `index >= self.size()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexError> {
        self.check_index(index)?;
        Ok(self.storage.get_mut(index))
    }

    /// Overwrites the element at `index`, returning the value it replaced.
    ///
    /// The capacity is never affected.
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `index >= self.size()`; `value` is dropped and
    /// the array is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([1, 2, 3]);
    /// assert_eq!(array.set(1, 20), Ok(2));
    /// assert_eq!(array[1], 20);
    /// assert!(array.set(3, 40).is_err());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    pub fn set(&mut self, index: usize, value: T) -> Result<T, IndexError> {
        let slot = self.get_mut(index)?;
        Ok(core::mem::replace(slot, value))
    }

    /// Returns the first element, or `None` if the array is empty.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Returns the last element, or `None` if the array is empty.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.get(self.size.checked_sub(1)?).ok()
    }

    /// Appends an element to the back of the array.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::new();
    /// array.append_back(1);
    /// array.append_back(2);
    /// assert_eq!(array.last(), Some(&2));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the doubled capacity would overflow `usize`.
    ///
    /// # Complexity
    ///
    /// Amortized O(1); O(n) when the buffer is reallocated.
    pub fn append_back(&mut self, value: T) {
        // Maintenance never leaves the buffer full, so slot `size` is free.
        debug_assert!(self.size < self.capacity());

        self.storage.set(self.size, value);
        self.size += 1;
        self.maintain();
    }

    /// Removes the last element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`UnderflowError`] if the array is empty, without changing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::{DynamicArray, UnderflowError};
    ///
    /// let mut array = DynamicArray::from([1]);
    /// assert_eq!(array.remove_back(), Ok(1));
    /// assert_eq!(array.remove_back(), Err(UnderflowError));
    /// ```
    ///
    /// # Complexity
    ///
    /// Amortized O(1); O(n) when the buffer is reallocated.
    pub fn remove_back(&mut self) -> Result<T, UnderflowError> {
        if self.is_empty() {
            return Err(UnderflowError);
        }

        self.size -= 1;
        let element = self.storage.take(self.size);
        self.maintain();
        Ok(element)
    }

    /// Inserts an element at `index`, shifting every element after it one place
    /// towards the back.
    ///
    /// This is an extension and is not part of the minimal array API; the
    /// capacity is maintained exactly as for [`append_back`](Self::append_back).
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `index > self.size()`; `value` is dropped and
    /// the array is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([1, 3]);
    /// array.insert(1, 2).unwrap();
    /// array.insert(3, 4).unwrap();
    /// assert_eq!(array, DynamicArray::from([1, 2, 3, 4]));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n - index) plus amortized reallocation.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), IndexError> {
        if index > self.size {
            return Err(IndexError { index, size: self.size });
        }
        debug_assert!(self.size < self.capacity());

        self.storage.set(self.size, value);
        for position in (index..self.size).rev() {
            self.storage.swap(position, position + 1);
        }
        self.size += 1;
        self.maintain();
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting every element after
    /// it one place towards the front.
    ///
    /// This is an extension and is not part of the minimal array API; the
    /// capacity is maintained exactly as for [`remove_back`](Self::remove_back).
    ///
    /// # Errors
    ///
    /// Returns an [`IndexError`] if `index >= self.size()`, without changing the array.
    ///
    /// # Complexity
    ///
    /// O(n - index) plus amortized reallocation.
    pub fn remove(&mut self, index: usize) -> Result<T, IndexError> {
        self.check_index(index)?;

        for position in index..self.size - 1 {
            self.storage.swap(position, position + 1);
        }
        self.size -= 1;
        let element = self.storage.take(self.size);
        self.maintain();
        Ok(element)
    }

    /// Removes every element, leaving the array with capacity exactly 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::DynamicArray;
    ///
    /// let mut array: DynamicArray<_> = (0..50).collect();
    /// array.clear();
    /// assert!(array.is_empty());
    /// assert_eq!(array.capacity(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        log::debug!("clearing dynamic array of size {}", self.size);

        self.storage.vacate(self.size);
        self.size = 0;
        self.maintain();

        debug_assert_eq!(self.capacity(), 1);
    }

    /// Gets an iterator over the elements of the array, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::DynamicArray;
    ///
    /// let array = DynamicArray::from([1, 2, 3]);
    /// let doubled: Vec<_> = array.iter().map(|x| x * 2).collect();
    /// assert_eq!(doubled, [2, 4, 6]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            array: self,
            front: 0,
            back: self.size,
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.size()`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append_back(value);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            storage: self.storage,
            front: 0,
            back: self.size,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let element = self.array.storage.get(self.front);
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.array.storage.get(self.back))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            array: self.array,
            front: self.front,
            back: self.back,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let element = self.storage.take(self.front);
        self.front += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.storage.take(self.back))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn boundary_growth() {
        let mut array = DynamicArray::new();
        assert_eq!((array.size(), array.capacity()), (0, 1));

        let mut grew_at = Vec::new();
        for call in 1..=7 {
            let before = array.capacity();
            array.append_back(call * 11);
            if array.capacity() != before {
                grew_at.push(call);
            }
        }

        assert_eq!(grew_at, [1, 2, 4]);
        assert_eq!((array.size(), array.capacity()), (7, 8));
    }

    #[test]
    fn shrink_to_one() {
        let mut array: DynamicArray<i32> = (0..100).collect();
        assert_eq!(array.capacity(), 128);

        for expected in (0..100).rev() {
            assert_eq!(array.remove_back(), Ok(expected));
            assert!(array.space_bound_holds());
        }

        assert_eq!((array.size(), array.capacity()), (0, 1));
    }

    #[test]
    fn clear_mid_sequence() {
        let mut array: DynamicArray<i32> = (0..50).collect();
        array.clear();
        assert_eq!((array.size(), array.capacity()), (0, 1));

        array.append_back(7);
        assert_eq!((array.size(), array.capacity()), (1, 2));
        assert_eq!(array.get(0), Ok(&7));
    }

    #[test]
    fn errors_leave_array_unchanged() {
        let mut array = DynamicArray::from([1, 2, 3]);
        let capacity = array.capacity();

        assert_eq!(array.get(3), Err(IndexError { index: 3, size: 3 }));
        assert_eq!(array.set(usize::MAX, 9), Err(IndexError { index: usize::MAX, size: 3 }));
        assert_eq!(array.insert(4, 9), Err(IndexError { index: 4, size: 3 }));
        assert_eq!(array.remove(3), Err(IndexError { index: 3, size: 3 }));

        assert_eq!(array, DynamicArray::from([1, 2, 3]));
        assert_eq!(array.capacity(), capacity);

        let mut empty: DynamicArray<i32> = DynamicArray::new();
        assert_eq!(empty.remove_back(), Err(UnderflowError));
        assert_eq!((empty.size(), empty.capacity()), (0, 1));
    }

    #[test]
    fn removed_and_cleared_elements_are_dropped() {
        let tracker = Rc::new(());
        let mut array: DynamicArray<Rc<()>> = (0..10).map(|_| Rc::clone(&tracker)).collect();
        assert_eq!(Rc::strong_count(&tracker), 11);

        drop(array.remove_back());
        assert_eq!(Rc::strong_count(&tracker), 10);

        array.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn into_iter_drops_remainder() {
        let tracker = Rc::new(());
        let array: DynamicArray<Rc<()>> = (0..5).map(|_| Rc::clone(&tracker)).collect();

        let mut iter = array.into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(iter.len(), 3);
        drop(iter);

        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn iter_is_double_ended() {
        let array: DynamicArray<i32> = (1..=5).collect();
        let mut iter = array.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.rev().copied().collect::<Vec<_>>(), [4, 3, 2]);
    }

    #[test]
    #[should_panic(expected = "index 2 is out of range for an array of size 2")]
    fn index_out_of_range_panics() {
        let array = DynamicArray::from([1, 2]);
        let _element = array[2];
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn array_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..512)) {
            let mut model: Vec<u32> = Vec::new();
            let mut array: DynamicArray<u32> = DynamicArray::new();

            for operation in operations {
                match operation {
                    Operation::AppendBack(value) => {
                        array.append_back(value);
                        model.push(value);
                    }
                    Operation::RemoveBack => {
                        prop_assert_eq!(array.remove_back().ok(), model.pop());
                    }
                    Operation::Get(which) => {
                        let index = which % (model.len() + 1);
                        prop_assert_eq!(array.get(index).ok(), model.get(index));
                    }
                    Operation::Set(which, value) => {
                        let index = which % (model.len() + 1);
                        let expected = model.get_mut(index).map(|slot| core::mem::replace(slot, value));
                        prop_assert_eq!(array.set(index, value).ok(), expected);
                    }
                    Operation::Insert(which, value) => {
                        let index = which % (model.len() + 1);
                        array.insert(index, value).unwrap();
                        model.insert(index, value);
                    }
                    Operation::Remove(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        prop_assert_eq!(array.remove(index), Ok(model.remove(index)));
                    }
                    Operation::Clear => {
                        array.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(array.size(), model.len());
                prop_assert_eq!(array.is_empty(), model.is_empty());
                prop_assert!(array.space_bound_holds(), "size {} capacity {}", array.size(), array.capacity());
                prop_assert!(array.iter().eq(model.iter()));
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        AppendBack(u32),
        RemoveBack,
        Get(usize),
        Set(usize, u32),
        Insert(usize, u32),
        Remove(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::AppendBack),
            15 => Just(Operation::RemoveBack),
            5 => any::<usize>().prop_map(Operation::Get),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Set(which, value)),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Insert(which, value)),
            5 => any::<usize>().prop_map(Operation::Remove),
            1 => Just(Operation::Clear),
        ]
    }
}
