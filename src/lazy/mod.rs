//! The lazy pipeline engine.
//!
//! This module provides the pull-based half of the library:
//!
//! - [`SequenceSource`]: normalizes a constructor argument (materialized
//!   entries or a zero-argument producer closure) into a single "produce a
//!   lazy sequence of key/value pairs" capability
//! - [`Enumerator`]: the combinator set layered on top of that capability,
//!   closed under composition
//!
//! Evaluation is pull-based and cooperative: nothing runs until a terminal
//! operation requests elements, and early termination is simply the
//! consumer not asking for more.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let first_even = Enumerator::from_values(1..=100)
//!     .select(|value, _| matches!(value.as_leaf(), Some(n) if n % 2 == 0))
//!     .first()
//!     .unwrap();
//!
//! // Only two upstream elements were ever pulled.
//! assert_eq!(first_even, Some(leaf(2)));
//! ```

mod aggregate;
mod enumerator;
mod source;

pub use enumerator::Enumerator;
pub use source::{SequenceSource, SourceEntries};

use crate::error::EnumerateError;
use crate::sequence::{Key, Value};

/// One element of a lazy sequence: a key/value pair.
pub type Entry<V> = (Key, Value<V>);

/// A fresh element stream, produced by one pull of a source or stage.
///
/// Errors travel in-band: a producer that turns out not to yield a sequence
/// surfaces as an `Err` item at the position where the failure was
/// detected, and combinators pass `Err` items through unchanged.
pub type EntryIter<V> = Box<dyn Iterator<Item = Result<Entry<V>, EnumerateError>>>;
