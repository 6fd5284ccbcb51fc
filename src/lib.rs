#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Table sizing knobs.
pub mod config;

/// Error types returned by fallible table operations.
pub mod error;

/// A HashMap that binds a [`KeyHasher`] to the linear-probing `HashTable`.
///
/// This module provides the `HashMap` controller: the hasher is supplied once
/// at creation and every insert, lookup and removal goes through it.
pub mod hash_map;

/// A hash set built on top of [`HashMap`].
///
/// This module provides a `HashSet` for deduplication use cases, with the
/// same no-overwrite insertion semantics as the map.
pub mod hash_set;

pub mod hash_table;

/// The caller-supplied hash and equality contract.
pub mod hasher;

mod probe;

pub use config::Config;
pub use error::ConsistencyError;
pub use error::InsertError;
pub use error::ResizeError;
pub use hash_map::HashMap;
pub use hash_map::Insertion;
pub use hash_set::HashSet;
pub use hash_table::HashTable;
pub use hasher::KeyHasher;
