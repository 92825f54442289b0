use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::dynamic_array::{self, DynamicArray};
use crate::error::KeyNotFound;

/// An ordered map stored as a sorted [`DynamicArray`] of key-value pairs.
///
/// Lookups are a binary search, O(log n). Insertions and removals shift the
/// entries after the affected position, O(n), but never reallocate more than the
/// array's amortized policy allows, so the storage stays within a constant factor
/// of the number of entries. [`clear`](ArrayMap::clear) returns the map to a
/// single-slot buffer.
///
/// Keys must implement [`Ord`]. It is a logic error for a key to be modified in
/// such a way that its ordering relative to any other key changes while it is in
/// the map.
///
/// # Examples
///
/// ```
/// use wabi_array::{ArrayMap, KeyNotFound};
///
/// let mut scores = ArrayMap::new();
/// scores.put("Carol", 92);
/// scores.put("Alice", 100);
/// scores.put("Bob", 0);
///
/// assert_eq!(scores.size(), 3);
/// assert_eq!(scores.get("Bob"), Ok(&0));
/// assert_eq!(scores.get("Dave"), Err(KeyNotFound));
///
/// // Entries come back in key order.
/// let names: Vec<_> = scores.keys().copied().collect();
/// assert_eq!(names, ["Alice", "Bob", "Carol"]);
///
/// assert_eq!(scores.erase("Alice"), Ok(100));
/// assert_eq!(scores.erase("Alice"), Err(KeyNotFound));
/// ```
pub struct ArrayMap<K, V> {
    entries: DynamicArray<(K, V)>,
}

/// An iterator over the entries of an `ArrayMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`ArrayMap`].
///
/// [`iter`]: ArrayMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: dynamic_array::Iter<'a, (K, V)>,
}

/// An iterator over the keys of an `ArrayMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`ArrayMap`].
///
/// [`keys`]: ArrayMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `ArrayMap`, in key order.
///
/// This `struct` is created by the [`values`] method on [`ArrayMap`].
///
/// [`values`]: ArrayMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K, V> ArrayMap<K, V> {
    /// Makes a new, empty `ArrayMap`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::ArrayMap;
    ///
    /// let mut map = ArrayMap::new();
    /// map.put(1, "a");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: DynamicArray::new(),
        }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn size(&self) -> usize {
        self.entries.size()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the capacity of the underlying array.
    ///
    /// This is an extension and is not part of the standard `BTreeMap` API.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Removes every entry, shrinking the underlying array back to a single slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::ArrayMap;
    ///
    /// let mut map: ArrayMap<_, _> = (0..10).map(|i| (i, i)).collect();
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 1);
    /// ```
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the entry with the smallest key, or `None` if the map is empty.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(key, value)| (key, value))
    }

    /// Returns the entry with the largest key, or `None` if the map is empty.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(key, value)| (key, value))
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::ArrayMap;
    ///
    /// let map = ArrayMap::from([(3, "c"), (1, "a"), (2, "b")]);
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(entries, [(&1, &"a"), (&2, &"b"), (&3, &"c")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K: Ord, V> ArrayMap<K, V> {
    /// Binary search for `key`: `Ok` with its position, or `Err` with the
    /// position it would be inserted at.
    fn search<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut low = 0;
        let mut high = self.entries.size();

        while low < high {
            let mid = low + (high - low) / 2;
            let probe: &Q = self.entries[mid].0.borrow();
            match probe.cmp(key) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
                Ordering::Equal => return Ok(mid),
            }
        }

        Err(low)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. Otherwise the
    /// value is updated and the old value is returned; the key is not updated.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::ArrayMap;
    ///
    /// let mut map = ArrayMap::new();
    /// assert_eq!(map.put(37, "a"), None);
    /// assert_eq!(map.put(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n) in the worst case, O(log n) when the key is already present.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Ok(index) => Some(core::mem::replace(&mut self.entries[index].1, value)),
            Err(index) => {
                self.entries
                    .insert(index, (key, value))
                    .expect("`ArrayMap::put()` - search returned an invalid position!");
                None
            }
        }
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the key is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get<Q>(&self, key: &Q) -> Result<&V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let index = self.search(key).map_err(|_| KeyNotFound)?;
        Ok(&self.entries[index].1)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the key is absent.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let index = self.search(key).map_err(|_| KeyNotFound)?;
        Ok(&mut self.entries[index].1)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_ok()
    }

    /// Removes a key from the map, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if the key is absent; the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use wabi_array::{ArrayMap, KeyNotFound};
    ///
    /// let mut map = ArrayMap::from([(1, "a")]);
    /// assert_eq!(map.erase(&1), Ok("a"));
    /// assert_eq!(map.erase(&1), Err(KeyNotFound));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn erase<Q>(&mut self, key: &Q) -> Result<V, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let index = self.search(key).map_err(|_| KeyNotFound)?;
        let (_, value) = self
            .entries
            .remove(index)
            .expect("`ArrayMap::erase()` - search returned an invalid position!");
        Ok(value)
    }
}

impl<K, V> Default for ArrayMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ArrayMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Clone, V: Clone> Clone for ArrayMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for ArrayMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for ArrayMap<K, V> {}

impl<K, Q, V> Index<&Q> for ArrayMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `ArrayMap`.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<K: Ord, V> Extend<(K, V)> for ArrayMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for ArrayMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for ArrayMap<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a, K, V> IntoIterator for &'a ArrayMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key, value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}
