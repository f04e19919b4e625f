//! The sequence source adapter.
//!
//! [`SequenceSource`] is the closed sum type over the source shapes a
//! pipeline accepts: an owned, replayable sequence of entries, or a
//! zero-argument producer closure invoked once per pull. Classifying the
//! shapes at the type level removes the dynamic "is this iterable" probe of
//! a construction-time check entirely. The one check that must stay,
//! whether a producer actually returned a sequence, remains lazy and runs
//! at pull time, never at construction.

use std::fmt;
use std::iter;
use std::rc::Rc;

use super::{Entry, EntryIter};
use crate::error::NotSequenceError;
use crate::sequence::Value;

/// A normalized source of a lazy key/value sequence.
///
/// Both variants expose the same capability through [`pull`](Self::pull):
/// produce a fresh element stream. A source may be pulled any number of
/// times; the `Entries` variant replays its stored entries and the
/// `Producer` variant re-invokes its closure, so the closure must be
/// idempotent-safe.
///
/// # Examples
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// // Producer sources defer invocation (and validation) until pulled.
/// let source: SequenceSource<i32> =
///     SequenceSource::from_producer(|| Value::sequence(lazyseq::seq! { "a" => leaf(1) }));
///
/// let pulled: Vec<_> = source.pull().collect::<Result<_, _>>().unwrap();
/// assert_eq!(pulled, vec![(Key::name("a"), leaf(1))]);
/// ```
pub enum SequenceSource<V: 'static> {
    /// A directly iterable, materialized sequence of entries.
    Entries(Rc<Vec<Entry<V>>>),
    /// A zero-argument callable expected to return a sequence when invoked.
    Producer(Rc<dyn Fn() -> Value<V>>),
}

impl<V: 'static> SequenceSource<V> {
    /// Wraps materialized entries.
    pub fn from_entries(entries: Vec<Entry<V>>) -> Self {
        Self::Entries(Rc::new(entries))
    }

    /// Wraps a producer closure. The closure is not invoked here.
    pub fn from_producer(producer: impl Fn() -> Value<V> + 'static) -> Self {
        Self::Producer(Rc::new(producer))
    }
}

impl<V: Clone + 'static> SequenceSource<V> {
    /// Produces a fresh element stream.
    ///
    /// For `Entries` this replays the stored entries, cloning one element
    /// at a time. For `Producer` this invokes the closure and validates its
    /// return value: a [`Value::Sequence`] or [`Value::Pipeline`] is
    /// iterated, while a [`Value::Leaf`] yields a single
    /// [`NotSequence`](crate::error::EnumerateError::NotSequence) error
    /// item. That is the deferred producer-validity check.
    pub fn pull(&self) -> EntryIter<V> {
        match self {
            Self::Entries(entries) => Box::new(SourceEntries {
                entries: Rc::clone(entries),
                position: 0,
            }),
            Self::Producer(producer) => match producer() {
                Value::Pipeline(nested) => nested.each(),
                Value::Sequence(sequence) => Box::new(sequence.into_iter().map(Ok)),
                Value::Leaf(_) => Box::new(iter::once(Err(NotSequenceError {
                    operation: "each",
                    subject: "producer return value",
                }
                .into()))),
            },
        }
    }
}

impl<V: 'static> Clone for SequenceSource<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Entries(entries) => Self::Entries(Rc::clone(entries)),
            Self::Producer(producer) => Self::Producer(Rc::clone(producer)),
        }
    }
}

impl<V: fmt::Debug + 'static> fmt::Debug for SequenceSource<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entries(entries) => formatter.debug_tuple("Entries").field(entries).finish(),
            Self::Producer(_) => formatter.debug_tuple("Producer").field(&"<producer>").finish(),
        }
    }
}

/// Replay iterator over a materialized source, cloning entries on demand.
pub struct SourceEntries<V: 'static> {
    entries: Rc<Vec<Entry<V>>>,
    position: usize,
}

impl<V: Clone + 'static> Iterator for SourceEntries<V> {
    type Item = Result<Entry<V>, crate::error::EnumerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.position)?.clone();
        self.position += 1;
        Some(Ok(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.position;
        (remaining, Some(remaining))
    }
}
