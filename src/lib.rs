//! An amortized dynamic array for Rust, and a small ordered map built on it.
//!
//! This crate provides [`DynamicArray`], a growable array that owns a single
//! fixed-capacity backing buffer and reallocates it with a doubling/halving policy,
//! and [`ArrayMap`], an ordered map stored as a sorted `DynamicArray` of entries.
//!
//! # Example
//!
//! ```
//! use wabi_array::{ArrayMap, DynamicArray};
//!
//! let mut array = DynamicArray::new();
//! for i in 0..7 {
//!     array.append_back(i);
//! }
//! assert_eq!(array.size(), 7);
//! assert_eq!(array.capacity(), 8);
//!
//! let mut map = ArrayMap::new();
//! map.put("b", 2);
//! map.put("a", 1);
//! assert_eq!(map.get("a"), Ok(&1));
//! assert_eq!(map.size(), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Bounded waste** - An empty array has capacity 1; otherwise `size <= capacity < 3 * size`
//! - **Amortized O(1)** - Appends and removals at the back, even when oscillating around a power of two
//! - **Explicit errors** - Out-of-range indices and removal from an empty array are [`Result`]s, not panics
//!
//! # Implementation
//!
//! The backing buffer never resizes itself. After every operation that changes the
//! number of elements, the array doubles a full buffer, collapses an empty one to a
//! single slot, or halves a buffer that is less than a third full, moving the
//! elements into a newly allocated buffer. Shrinking at one third rather than one
//! half leaves a gap between the grow and shrink thresholds, so alternating appends
//! and removals at a boundary do not reallocate every time.
//!
//! Reallocations are logged at `trace` level through the [`log`] facade.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod array_map;
pub mod dynamic_array;

pub use array_map::ArrayMap;
pub use dynamic_array::{DynamicArray, ResizeStats};
pub use error::{IndexError, KeyNotFound, UnderflowError};
