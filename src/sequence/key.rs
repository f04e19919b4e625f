//! Sequence keys.
//!
//! A sequence key is either a non-negative position (array-like) or an
//! arbitrary distinct label (map-like). Both forms flow through the
//! pipeline uniformly; no combinator assumes position keys.

use std::fmt;

/// A key of a sequence element.
///
/// The two variants mirror the two sequence forms the library supports:
/// dense position-keyed data (`Index`) and labelled map-like data (`Name`).
/// Combinators treat both uniformly; only [`values`](crate::lazy::Enumerator::values)
/// and [`Sequence::append`](crate::sequence::Sequence::append) ever
/// manufacture `Index` keys.
///
/// # Examples
///
/// ```rust
/// use lazyseq::sequence::Key;
///
/// let position = Key::from(3);
/// let label = Key::from("total");
///
/// assert!(position.is_index());
/// assert_eq!(label.as_name(), Some("total"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A non-negative sequential position key.
    Index(usize),
    /// An arbitrary label key.
    Name(String),
}

impl Key {
    /// Creates a position key.
    #[inline]
    pub const fn index(position: usize) -> Self {
        Self::Index(position)
    }

    /// Creates a label key.
    #[inline]
    pub fn name(label: impl Into<String>) -> Self {
        Self::Name(label.into())
    }

    /// Returns whether this is a position key.
    #[inline]
    pub const fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// Returns whether this is a label key.
    #[inline]
    pub const fn is_name(&self) -> bool {
        matches!(self, Self::Name(_))
    }

    /// Returns the position if this is an `Index` key.
    #[inline]
    pub const fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(position) => Some(*position),
            Self::Name(_) => None,
        }
    }

    /// Returns the label if this is a `Name` key.
    #[inline]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(label) => Some(label.as_str()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(position) => write!(formatter, "{position}"),
            Self::Name(label) => write!(formatter, "{label}"),
        }
    }
}

impl From<usize> for Key {
    fn from(position: usize) -> Self {
        Self::Index(position)
    }
}

impl From<&str> for Key {
    fn from(label: &str) -> Self {
        Self::Name(label.to_string())
    }
}

impl From<String> for Key {
    fn from(label: String) -> Self {
        Self::Name(label)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Index(position) => serializer.serialize_u64(*position as u64),
            Self::Name(label) => serializer.serialize_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn key_from_usize_is_index() {
        let key = Key::from(7);
        assert!(key.is_index());
        assert_eq!(key.as_index(), Some(7));
        assert_eq!(key.as_name(), None);
    }

    #[rstest]
    fn key_from_str_is_name() {
        let key = Key::from("alpha");
        assert!(key.is_name());
        assert_eq!(key.as_name(), Some("alpha"));
        assert_eq!(key.as_index(), None);
    }

    #[rstest]
    #[case(Key::index(0), "0")]
    #[case(Key::index(42), "42")]
    #[case(Key::name("total"), "total")]
    fn key_display(#[case] key: Key, #[case] expected: &str) {
        assert_eq!(format!("{key}"), expected);
    }

    #[rstest]
    fn key_equality_distinguishes_variants() {
        assert_ne!(Key::index(0), Key::name("0"));
        assert_eq!(Key::name("a"), Key::from("a"));
        assert_eq!(Key::index(1), Key::from(1));
    }
}
