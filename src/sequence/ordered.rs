//! Insertion-ordered keyed sequences.
//!
//! [`Sequence`] is the materialized "keyed structure" of the library: an
//! ordered collection of key/value entries with map semantics. Insertion
//! order is observable and stable; overwriting an existing key keeps the
//! key's original position.
//!
//! # Time Complexity
//!
//! | Operation        | Cost           |
//! |------------------|----------------|
//! | `insert`         | O(1) amortized |
//! | `append`         | O(1) amortized |
//! | `get`            | O(1) expected  |
//! | `contains_key`   | O(1) expected  |
//! | `iter`           | O(1) + O(n)    |
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::sequence::{Key, Sequence};
//!
//! let mut sequence = Sequence::new();
//! sequence.insert(Key::name("a"), 1);
//! sequence.insert(Key::name("b"), 2);
//! sequence.insert(Key::name("a"), 3); // overwrites, keeps position
//!
//! let entries: Vec<_> = sequence.iter().collect();
//! assert_eq!(entries, vec![(&Key::name("a"), &3), (&Key::name("b"), &2)]);
//! ```

use std::collections::HashMap;
use std::fmt;

use super::key::Key;

/// An insertion-ordered map from [`Key`] to a payload `T`.
///
/// `Sequence` backs both the source side of a pipeline (the data handed to
/// [`Enumerator::from_sequence`](crate::lazy::Enumerator::from_sequence))
/// and the result side (what [`to_array`](crate::lazy::Enumerator::to_array)
/// and [`group_by`](crate::lazy::Enumerator::group_by) build).
///
/// Two rules give it its array-like feel:
///
/// - `insert` on an existing key replaces the payload but keeps the entry
///   at its original position (last write wins, first position wins).
/// - `append` assigns the next free `Index` key: one past the largest
///   position key ever inserted.
pub struct Sequence<T> {
    entries: Vec<(Key, T)>,
    index: HashMap<Key, usize>,
    next_index: usize,
}

impl<T> Sequence<T> {
    /// Creates an empty sequence.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next_index: 0,
        }
    }

    /// Creates an empty sequence with room for `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the sequence has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `value` under `key`.
    ///
    /// If the key is already present the payload is replaced in place (the
    /// entry keeps its original position) and the previous payload is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::sequence::{Key, Sequence};
    ///
    /// let mut sequence = Sequence::new();
    /// assert_eq!(sequence.insert(Key::name("a"), 1), None);
    /// assert_eq!(sequence.insert(Key::name("a"), 2), Some(1));
    /// assert_eq!(sequence.get(&Key::name("a")), Some(&2));
    /// ```
    pub fn insert(&mut self, key: Key, value: T) -> Option<T> {
        if let Key::Index(position) = &key {
            self.next_index = self.next_index.max(position + 1);
        }
        if let Some(position) = self.index.get(&key).copied() {
            let slot = &mut self.entries[position].1;
            Some(std::mem::replace(slot, value))
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
            None
        }
    }

    /// Appends `value` under the next free `Index` key.
    ///
    /// The key is one past the largest position key inserted so far, so a
    /// sequence built purely by `append` is keyed `0..n`.
    pub fn append(&mut self, value: T) {
        let key = Key::Index(self.next_index);
        self.insert(key, value);
    }

    /// Returns a reference to the payload stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&T> {
        self.index
            .get(key)
            .and_then(|position| self.entries.get(*position))
            .map(|(_, value)| value)
    }

    /// Returns a mutable reference to the payload stored under `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut T> {
        let position = self.index.get(key).copied()?;
        self.entries.get_mut(position).map(|(_, value)| value)
    }

    /// Returns the payload under `key`, inserting `default()` at the back
    /// first if the key is absent.
    pub fn get_or_insert_with(&mut self, key: Key, default: impl FnOnce() -> T) -> &mut T {
        let position = if let Some(present) = self.index.get(&key).copied() {
            present
        } else {
            let position = self.entries.len();
            if let Key::Index(used) = &key {
                self.next_index = self.next_index.max(used + 1);
            }
            self.index.insert(key.clone(), position);
            self.entries.push((key, default()));
            position
        };
        &mut self.entries[position].1
    }

    /// Returns whether `key` is present.
    #[inline]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the entry at `position` in insertion order.
    pub fn entry_at(&self, position: usize) -> Option<(&Key, &T)> {
        self.entries.get(position).map(|(key, value)| (key, value))
    }

    /// Returns the first entry in insertion order.
    #[inline]
    pub fn first(&self) -> Option<(&Key, &T)> {
        self.entry_at(0)
    }

    /// Returns the last entry in insertion order.
    pub fn last(&self) -> Option<(&Key, &T)> {
        self.entries.last().map(|(key, value)| (key, value))
    }

    /// Returns an iterator over entries in insertion order.
    pub fn iter(&self) -> SequenceIter<'_, T> {
        SequenceIter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over payloads in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
            next_index: self.next_index,
        }
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    /// Entry-order-sensitive equality: two sequences are equal when they
    /// hold the same entries in the same insertion order.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<T> Extend<(Key, T)> for Sequence<T> {
    fn extend<I: IntoIterator<Item = (Key, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T> FromIterator<(Key, T)> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = (Key, T)>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(iter);
        sequence
    }
}

/// Borrowed iterator over the entries of a [`Sequence`], in insertion order.
pub struct SequenceIter<'a, T> {
    inner: std::slice::Iter<'a, (Key, T)>,
}

impl<'a, T> Iterator for SequenceIter<'a, T> {
    type Item = (&'a Key, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for SequenceIter<'_, T> {}

/// Owning iterator over the entries of a [`Sequence`], in insertion order.
pub struct SequenceIntoIter<T> {
    inner: std::vec::IntoIter<(Key, T)>,
}

impl<T> Iterator for SequenceIntoIter<T> {
    type Item = (Key, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for SequenceIntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = (Key, T);
    type IntoIter = SequenceIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        SequenceIntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = (&'a Key, &'a T);
    type IntoIter = SequenceIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Sequence<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
