//! The sequence data model.
//!
//! This module provides the materialized half of the library:
//!
//! - [`Key`]: position or label keys, supported uniformly
//! - [`Value`]: the element value sum type (leaf, nested sequence, nested
//!   lazy pipeline)
//! - [`Sequence`]: an insertion-ordered keyed map with array-like
//!   overwrite and append semantics
//! - [`seq!`](crate::seq): literal construction sugar
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let sequence = lazyseq::seq! {
//!     "a" => leaf(1),
//!     "b" => lazyseq::seq! { "c" => leaf(2), "d" => leaf(3) },
//! };
//!
//! assert_eq!(sequence.len(), 2);
//! assert!(sequence.get(&Key::name("b")).is_some_and(Value::is_sequence));
//! ```

mod key;
mod ordered;
mod value;

pub use key::Key;
pub use ordered::{Sequence, SequenceIntoIter, SequenceIter};
pub use value::{Value, leaf};

/// Builds a [`Sequence`] literal.
///
/// The map form takes `key => value` entries; keys accept anything
/// `Into<Key>` (including `Key` itself) and values accept anything
/// `Into<Value<_>>`: a [`leaf`], a nested `seq!`, or an
/// [`Enumerator`](crate::lazy::Enumerator). The list form takes bare
/// values and assigns sequential `Index` keys.
///
/// # Examples
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// let keyed = lazyseq::seq! { "a" => leaf(1), "b" => leaf(2) };
/// assert_eq!(keyed.get(&Key::name("b")), Some(&leaf(2)));
///
/// let dense = lazyseq::seq![leaf(10), leaf(20)];
/// assert_eq!(dense.get(&Key::index(1)), Some(&leaf(20)));
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::sequence::Sequence::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut sequence = $crate::sequence::Sequence::new();
        $(
            sequence.insert(
                $crate::sequence::Key::from($key),
                $crate::sequence::Value::from($value),
            );
        )+
        sequence
    }};
    ( $( $value:expr ),+ $(,)? ) => {{
        let mut sequence = $crate::sequence::Sequence::new();
        $(
            sequence.append($crate::sequence::Value::from($value));
        )+
        sequence
    }};
}
