use thiserror::Error;

/// The error returned when a positional index falls outside the valid range.
///
/// Carries the offending index together with the size of the array at the
/// time of the call. The array is left untouched.
///
/// # Examples
///
/// ```
/// use wabi_array::{DynamicArray, IndexError};
///
/// let array = DynamicArray::from([1, 2, 3]);
/// assert_eq!(array.get(3), Err(IndexError { index: 3, size: 3 }));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[error("index {index} is out of range for an array of size {size}")]
pub struct IndexError {
    /// The index that was requested.
    pub index: usize,
    /// The logical size of the array when the request was made.
    pub size: usize,
}

/// The error returned by [`remove_back`](crate::DynamicArray::remove_back) on an empty array.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[error("cannot remove from an empty array")]
pub struct UnderflowError;

/// The error returned when an [`ArrayMap`](crate::ArrayMap) lookup misses.
///
/// This is distinct from a key that is present with a default value.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[error("key not found")]
pub struct KeyNotFound;
