//! # lazyseq
//!
//! A lazy-evaluation sequence library for Rust: wrap any finite source of
//! key/value pairs behind a uniform abstraction and build multi-stage
//! transformation pipelines without materializing intermediate results.
//!
//! ## Overview
//!
//! The library is built from two component groups:
//!
//! - **Sequence data model**: [`Key`](sequence::Key), [`Value`](sequence::Value)
//!   and [`Sequence`](sequence::Sequence), an insertion-ordered keyed
//!   collection supporting both position keys and named keys uniformly.
//! - **Lazy pipeline engine**: [`SequenceSource`](lazy::SequenceSource)
//!   normalizes a source (materialized entries or a producer closure) into a
//!   pull-based element stream, and [`Enumerator`](lazy::Enumerator) layers
//!   combinators (`select`, `map`, `map_key`, `skip`, `take`, `unique`,
//!   `flatten`, `transpose`, ...) on top of it.
//!
//! Nothing is evaluated until a terminal operation (`to_array`, `first`,
//! `last`, `any`, `all`, `apply`, `group_by`, ...) pulls elements through
//! the chain, one at a time, front to back. A pipeline stage can be pulled
//! any number of times; every pull replays the full chain from the original
//! source.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize` implementations for the materialized types
//!
//! ## Example
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let evens = Enumerator::from_values(1..=10)
//!     .select(|value, _| matches!(value.as_leaf(), Some(n) if n % 2 == 0))
//!     .map(|value, _| value.map_leaf(|n| n * 10))
//!     .to_array()
//!     .unwrap();
//!
//! let expected = lazyseq::seq! {
//!     Key::index(1) => leaf(20),
//!     Key::index(3) => leaf(40),
//!     Key::index(5) => leaf(60),
//!     Key::index(7) => leaf(80),
//!     Key::index(9) => leaf(100),
//! };
//! assert_eq!(evens, expected);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lazyseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{EnumerateError, NotSequenceError};
    pub use crate::lazy::{Entry, EntryIter, Enumerator, SequenceSource};
    pub use crate::sequence::{Key, Sequence, Value, leaf};
}

pub mod error;
pub mod lazy;
pub mod sequence;

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn pipeline_smoke() {
        let total: i32 = Enumerator::from_values(1..=4)
            .to_array_values()
            .unwrap()
            .into_iter()
            .filter_map(Value::into_leaf)
            .sum();
        assert_eq!(total, 10);
    }
}
