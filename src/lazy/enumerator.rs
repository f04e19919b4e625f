//! The pipeline engine.
//!
//! [`Enumerator`] wraps one pull capability, "produce a fresh lazy stream
//! of key/value pairs", and closes the combinator set over it: every
//! combinator returns a new `Enumerator` whose pull lazily pulls from its
//! upstream stage and applies one transformation step.
//!
//! Two invariants shape everything here:
//!
//! - **Stages are immutable.** A combinator never mutates its receiver; it
//!   captures a cheap clone of it inside a new pull closure.
//! - **Pulls replay.** A stage carries no cross-pull memory. Every pull
//!   invocation builds a fresh iterator chain down to the original source,
//!   so two terminal calls on the same stage see identical data, and
//!   counters (`skip`, `take`) restart per pull.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::iter;
use std::rc::Rc;

use smallvec::{SmallVec, smallvec};
use static_assertions::{assert_impl_all, assert_not_impl_any};

use super::aggregate;
use super::source::SequenceSource;
use super::{Entry, EntryIter};
use crate::error::{EnumerateError, NotSequenceError};
use crate::sequence::{Key, Sequence, Value};

/// A lazy sequence pipeline stage.
///
/// An `Enumerator` is a handle to a pull closure; cloning it clones the
/// handle, not the data. Combinators (`select`, `map`, `take`, ...) wrap
/// the receiver in a new stage without evaluating anything; terminal
/// operations (`to_array`, `first`, `any`, ...) drive the pull and
/// materialize or reduce the result.
///
/// # Examples
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// let chain = Enumerator::from_values(1..=100)
///     .select(|value, _| matches!(value.as_leaf(), Some(n) if n % 3 == 0))
///     .take(2);
///
/// // Nothing has run yet; the terminal pull drives evaluation.
/// assert_eq!(
///     chain.to_array_values().unwrap(),
///     vec![leaf(3), leaf(6)],
/// );
///
/// // The same stage can be pulled again and replays from the source.
/// assert_eq!(chain.first().unwrap(), Some(leaf(3)));
/// ```
pub struct Enumerator<V: 'static> {
    pull: Rc<dyn Fn() -> EntryIter<V>>,
}

impl<V: Clone + 'static> Enumerator<V> {
    /// Creates an enumerator from a zero-argument producer closure.
    ///
    /// The closure is invoked once per pull (that is, once per terminal
    /// operation) and never at construction. Its return value must be a
    /// [`Value::Sequence`] or [`Value::Pipeline`]; returning a
    /// [`Value::Leaf`] surfaces a
    /// [`NotSequence`](crate::error::EnumerateError::NotSequence) error
    /// when the stage is pulled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let enumerator = Enumerator::new(|| {
    ///     Value::sequence(lazyseq::seq! { "a" => leaf(1), "b" => leaf(2) })
    /// });
    /// assert_eq!(enumerator.last().unwrap(), Some(leaf(2)));
    /// ```
    pub fn new(producer: impl Fn() -> Value<V> + 'static) -> Self {
        Self::from_source(SequenceSource::from_producer(producer))
    }

    /// Creates an enumerator over a materialized sequence.
    pub fn from_sequence(sequence: Sequence<Value<V>>) -> Self {
        Self::from_source(SequenceSource::from_entries(sequence.into_iter().collect()))
    }

    /// Creates an enumerator over raw entries, preserving duplicates.
    ///
    /// Unlike [`from_sequence`](Self::from_sequence), duplicate keys are
    /// kept and flow through the pipeline; only a keyed terminal such as
    /// [`to_array`](Self::to_array) collapses them.
    pub fn from_entries(entries: Vec<Entry<V>>) -> Self {
        Self::from_source(SequenceSource::from_entries(entries))
    }

    /// Creates an enumerator over leaf values under sequential `Index` keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let enumerator = Enumerator::from_values(vec!["a", "b"]);
    /// assert_eq!(
    ///     enumerator.to_array().unwrap(),
    ///     lazyseq::seq![leaf("a"), leaf("b")],
    /// );
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = V>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| (Key::Index(position), Value::Leaf(value)))
            .collect();
        Self::from_entries(entries)
    }

    /// Creates an enumerator over leaf values under explicit keys.
    pub fn from_pairs<K: Into<Key>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let entries = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Value::Leaf(value)))
            .collect();
        Self::from_entries(entries)
    }

    fn from_source(source: SequenceSource<V>) -> Self {
        Self::stage(move || source.pull())
    }

    fn stage(pull: impl Fn() -> EntryIter<V> + 'static) -> Self {
        Self {
            pull: Rc::new(pull),
        }
    }

    /// Pulls the stage, returning the raw lazy element stream.
    ///
    /// This is the escape hatch for external consumption: each call builds
    /// a fresh iterator that replays the whole upstream chain. To drain the
    /// stage for side effects instead, use [`apply`](Self::apply).
    pub fn each(&self) -> EntryIter<V> {
        (self.pull)()
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Returns a stage yielding only elements for which `predicate` is true.
    ///
    /// Keys and values pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let small = Enumerator::from_values(1..=100)
    ///     .select(|value, _| matches!(value.as_leaf(), Some(n) if *n <= 3))
    ///     .to_array_values()
    ///     .unwrap();
    /// assert_eq!(small, vec![leaf(1), leaf(2), leaf(3)]);
    /// ```
    pub fn select<P>(&self, predicate: P) -> Self
    where
        P: Fn(&Value<V>, &Key) -> bool + 'static,
    {
        let upstream = self.clone();
        let predicate = Rc::new(predicate);
        Self::stage(move || {
            let predicate = Rc::clone(&predicate);
            Box::new(upstream.each().filter(move |entry| match entry {
                Ok((key, value)) => predicate(value, key),
                Err(_) => true,
            }))
        })
    }

    /// Alias for [`select`](Self::select).
    pub fn find_all<P>(&self, predicate: P) -> Self
    where
        P: Fn(&Value<V>, &Key) -> bool + 'static,
    {
        self.select(predicate)
    }

    /// Returns a stage with each value replaced by `converter(value, &key)`.
    ///
    /// Keys pass through unchanged; the leaf type may change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let doubled = Enumerator::from_pairs([("a", 1), ("b", 2)])
    ///     .map(|value, _| value.map_leaf(|n| n * 2))
    ///     .to_array()
    ///     .unwrap();
    /// assert_eq!(doubled, lazyseq::seq! { "a" => leaf(2), "b" => leaf(4) });
    /// ```
    pub fn map<U, F>(&self, converter: F) -> Enumerator<U>
    where
        U: Clone + 'static,
        F: Fn(Value<V>, &Key) -> Value<U> + 'static,
    {
        let upstream = self.clone();
        let converter = Rc::new(converter);
        Enumerator::stage(move || {
            let converter = Rc::clone(&converter);
            Box::new(upstream.each().map(move |entry| {
                entry.map(|(key, value)| {
                    let converted = converter(value, &key);
                    (key, converted)
                })
            }))
        })
    }

    /// Returns a stage with each key replaced by `converter(key, &value)`.
    ///
    /// Values pass through unchanged. New keys are not deduplicated at this
    /// stage; a keyed terminal applies its usual last-write-wins rule.
    pub fn map_key<F>(&self, converter: F) -> Self
    where
        F: Fn(Key, &Value<V>) -> Key + 'static,
    {
        let upstream = self.clone();
        let converter = Rc::new(converter);
        Self::stage(move || {
            let converter = Rc::clone(&converter);
            Box::new(upstream.each().map(move |entry| {
                entry.map(|(key, value)| {
                    let key = converter(key, &value);
                    (key, value)
                })
            }))
        })
    }

    /// Returns a stage with each element replaced by the single key/value
    /// pair `converter(key, value)` returns.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let renamed = Enumerator::from_pairs([("a", 1)])
    ///     .map_key_value(|key, value| {
    ///         (Key::name(format!("{key}{key}")), value.map_leaf(|n| n * 2))
    ///     })
    ///     .to_array()
    ///     .unwrap();
    /// assert_eq!(renamed, lazyseq::seq! { "aa" => leaf(2) });
    /// ```
    pub fn map_key_value<U, F>(&self, converter: F) -> Enumerator<U>
    where
        U: Clone + 'static,
        F: Fn(Key, Value<V>) -> (Key, Value<U>) + 'static,
    {
        let upstream = self.clone();
        let converter = Rc::new(converter);
        Enumerator::stage(move || {
            let converter = Rc::clone(&converter);
            Box::new(
                upstream
                    .each()
                    .map(move |entry| entry.map(|(key, value)| converter(key, value))),
            )
        })
    }

    /// Returns a stage discarding the first `count` elements in pull order.
    ///
    /// `skip(0)` is a no-op. Keys are preserved. Errors are never skipped.
    /// The counter belongs to each individual pull: pulling the stage again
    /// skips from the start again.
    pub fn skip(&self, count: usize) -> Self {
        let upstream = self.clone();
        Self::stage(move || {
            let mut remaining = count;
            Box::new(upstream.each().filter(move |entry| {
                if entry.is_err() {
                    return true;
                }
                if remaining > 0 {
                    remaining -= 1;
                    false
                } else {
                    true
                }
            }))
        })
    }

    /// Alias for [`skip`](Self::skip).
    pub fn offset(&self, count: usize) -> Self {
        self.skip(count)
    }

    /// Returns a stage yielding at most the first `count` elements.
    ///
    /// Upstream is not pulled past the cut-off, which is what lets a
    /// terminal finish early on a long source. A shorter upstream yields
    /// everything it has, without error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let taken = Enumerator::from_values(1..=5).take(10);
    /// assert_eq!(taken.to_array_values().unwrap().len(), 5);
    /// ```
    pub fn take(&self, count: usize) -> Self {
        let upstream = self.clone();
        Self::stage(move || {
            let mut remaining = count;
            let mut entries = upstream.each();
            // The cut-off is checked before pulling, so upstream never sees
            // a request past the n-th element.
            Box::new(iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let entry = entries.next()?;
                if entry.is_ok() {
                    remaining -= 1;
                }
                Some(entry)
            }))
        })
    }

    /// Alias for [`take`](Self::take).
    pub fn limit(&self, count: usize) -> Self {
        self.take(count)
    }

    /// Returns a stage invoking `action(&value, &key)` on each element as
    /// it passes through.
    ///
    /// The action runs for every consumer that pulls the stage: pulling
    /// twice runs it twice per element.
    pub fn tap<F>(&self, action: F) -> Self
    where
        F: Fn(&Value<V>, &Key) + 'static,
    {
        let upstream = self.clone();
        let action = Rc::new(action);
        Self::stage(move || {
            let action = Rc::clone(&action);
            Box::new(upstream.each().inspect(move |entry| {
                if let Ok((key, value)) = entry {
                    action(value, key);
                }
            }))
        })
    }

    /// Returns a stage dropping elements whose value was already seen.
    ///
    /// The first occurrence wins and keeps its original key. Comparison is
    /// structural value equality; [`Pipeline`](Value::Pipeline) values have
    /// no structural identity and are therefore never deduplicated; use
    /// [`unique_by`](Self::unique_by) with an explicit discriminant for
    /// those.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let distinct = Enumerator::from_values(vec![1, 2, 2, 1, 3])
    ///     .unique()
    ///     .to_array()
    ///     .unwrap();
    /// let expected = lazyseq::seq! {
    ///     Key::index(0) => leaf(1),
    ///     Key::index(1) => leaf(2),
    ///     Key::index(4) => leaf(3),
    /// };
    /// assert_eq!(distinct, expected);
    /// ```
    pub fn unique(&self) -> Self
    where
        V: PartialEq,
    {
        let upstream = self.clone();
        Self::stage(move || {
            let mut seen: Vec<Value<V>> = Vec::new();
            Box::new(upstream.each().filter(move |entry| match entry {
                Ok((_, value)) => {
                    if seen.contains(value) {
                        false
                    } else {
                        seen.push(value.clone());
                        true
                    }
                }
                Err(_) => true,
            }))
        })
    }

    /// Returns a stage dropping elements whose discriminant was already
    /// seen, where the discriminant is `discriminant(&value)`.
    ///
    /// The first occurrence wins and keeps its original key.
    pub fn unique_by<D, F>(&self, discriminant: F) -> Self
    where
        D: Eq + Hash + 'static,
        F: Fn(&Value<V>) -> D + 'static,
    {
        let upstream = self.clone();
        let discriminant = Rc::new(discriminant);
        Self::stage(move || {
            let discriminant = Rc::clone(&discriminant);
            let mut seen = HashSet::new();
            Box::new(upstream.each().filter(move |entry| match entry {
                Ok((_, value)) => seen.insert(discriminant(value)),
                Err(_) => true,
            }))
        })
    }

    /// Returns a stage that drops the original keys and re-sequences the
    /// elements under `Index` keys `0..n`.
    pub fn values(&self) -> Self {
        let upstream = self.clone();
        Self::stage(move || {
            let mut next_index = 0usize;
            Box::new(upstream.each().map(move |entry| {
                entry.map(|(_, value)| {
                    let key = Key::Index(next_index);
                    next_index += 1;
                    (key, value)
                })
            }))
        })
    }

    /// Returns a stage that splices nested sequence values into the stream.
    ///
    /// For each element whose value is a nested sequence, raw or lazy,
    /// the nested elements are recursively flattened and re-emitted under
    /// their own inner keys, replacing the outer element. Scalar elements
    /// pass through unchanged. Sibling inner keys may collide with outer
    /// keys; a keyed terminal resolves that with its usual last-write-wins
    /// rule.
    ///
    /// The recursion happens per element at pull time; the stream stays
    /// lazy end-to-end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let nested = lazyseq::seq! {
    ///     "a" => leaf(1),
    ///     "b" => lazyseq::seq! { "c" => leaf(2), "d" => leaf(3) },
    /// };
    /// let flat = Enumerator::from_sequence(nested).flatten().to_array().unwrap();
    /// assert_eq!(flat, lazyseq::seq! { "a" => leaf(1), "c" => leaf(2), "d" => leaf(3) });
    /// ```
    pub fn flatten(&self) -> Self {
        let upstream = self.clone();
        Self::stage(move || {
            Box::new(FlattenEntries {
                stack: smallvec![upstream.each()],
            })
        })
    }

    /// Returns a stage emitting one element per column of the upstream rows.
    ///
    /// Each upstream value must itself be a sequence (a row); a scalar row
    /// is a [`NotSequence`](crate::error::EnumerateError::NotSequence)
    /// error. Output element *i* needs the *i*-th cell of every row, so the
    /// whole upstream is pulled when this stage is pulled: deferred until
    /// then, but eager at that point.
    ///
    /// Columns are keyed by the inner (cell) keys, emitted in the order
    /// each column key was first seen across rows; each column value is the
    /// `Index`-keyed sequence of that column's cells in row-encounter
    /// order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let rows = lazyseq::seq![
    ///     lazyseq::seq! { "a" => leaf(1), "b" => leaf(2) },
    ///     lazyseq::seq! { "b" => leaf(4), "a" => leaf(3) },
    /// ];
    /// let columns = Enumerator::from_sequence(rows).transpose().to_array().unwrap();
    /// let expected = lazyseq::seq! {
    ///     "a" => lazyseq::seq![leaf(1), leaf(3)],
    ///     "b" => lazyseq::seq![leaf(2), leaf(4)],
    /// };
    /// assert_eq!(columns, expected);
    /// ```
    pub fn transpose(&self) -> Self {
        let upstream = self.clone();
        Self::stage(move || transpose_pull(&upstream))
    }

    // =========================================================================
    // Terminal operations
    // =========================================================================

    /// Pulls at most one element and returns its value.
    ///
    /// Returns `Ok(None)` on an empty sequence; never panics.
    pub fn first(&self) -> Result<Option<Value<V>>, EnumerateError> {
        match self.each().next() {
            None => Ok(None),
            Some(entry) => entry.map(|(_, value)| Some(value)),
        }
    }

    /// Pulls the entire sequence and returns the most recent value.
    ///
    /// Returns `Ok(None)` on an empty sequence; never panics.
    pub fn last(&self) -> Result<Option<Value<V>>, EnumerateError> {
        let mut latest = None;
        for entry in self.each() {
            let (_, value) = entry?;
            latest = Some(value);
        }
        Ok(latest)
    }

    /// Returns whether `predicate` holds for any element.
    ///
    /// Short-circuits on the first match; an empty sequence is `false`.
    pub fn any<P>(&self, mut predicate: P) -> Result<bool, EnumerateError>
    where
        P: FnMut(&Value<V>, &Key) -> bool,
    {
        for entry in self.each() {
            let (key, value) = entry?;
            if predicate(&value, &key) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns whether `predicate` holds for every element.
    ///
    /// Short-circuits on the first failure; an empty sequence is `true`.
    pub fn all<P>(&self, mut predicate: P) -> Result<bool, EnumerateError>
    where
        P: FnMut(&Value<V>, &Key) -> bool,
    {
        for entry in self.each() {
            let (key, value) = entry?;
            if !predicate(&value, &key) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Pulls every element, invoking `action(&value, &key)` for its side
    /// effects.
    pub fn apply<F>(&self, mut action: F) -> Result<(), EnumerateError>
    where
        F: FnMut(&Value<V>, &Key),
    {
        for entry in self.each() {
            let (key, value) = entry?;
            action(&value, &key);
        }
        Ok(())
    }

    /// Pulls every element into a keyed [`Sequence`].
    ///
    /// Each element is inserted under its key with last-write-wins
    /// semantics (the overwritten key keeps its first position). A
    /// [`Pipeline`](Value::Pipeline) value is not stored as an opaque
    /// value: it is recursively expanded in place, splicing its own
    /// key/value pairs into the result being built, so keys arising from
    /// the expansion participate in the same overwrite rule. Raw
    /// [`Sequence`](Value::Sequence) values are stored as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let inner = Enumerator::from_pairs([("b", 2), ("c", 3)]);
    /// let outer = Enumerator::from_entries(vec![
    ///     (Key::name("a"), leaf(1)),
    ///     (Key::name("nested"), Value::pipeline(inner)),
    /// ]);
    /// assert_eq!(
    ///     outer.to_array().unwrap(),
    ///     lazyseq::seq! { "a" => leaf(1), "b" => leaf(2), "c" => leaf(3) },
    /// );
    /// ```
    pub fn to_array(&self) -> Result<Sequence<Value<V>>, EnumerateError> {
        aggregate::collect_array(self)
    }

    /// Pulls every element into a dense list of values, discarding keys.
    ///
    /// Applies the same recursive expansion rule as
    /// [`to_array`](Self::to_array); positions follow pull order, not the
    /// original keys.
    pub fn to_array_values(&self) -> Result<Vec<Value<V>>, EnumerateError> {
        aggregate::collect_values(self)
    }

    /// Pulls every element and buckets the values by
    /// `classifier(&value, &key)`.
    ///
    /// [`Pipeline`](Value::Pipeline) values are recursively expanded
    /// exactly as in [`to_array`](Self::to_array); each expanded element
    /// is classified individually under its own key rather than grouping
    /// the nested stage as one opaque value. Buckets appear in
    /// first-occurrence order of each distinct aggregate key; within a
    /// bucket, values keep pull order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// let parity = Enumerator::from_values(1..=4)
    ///     .group_by(|value, _| match value.as_leaf() {
    ///         Some(n) if n % 2 == 0 => Key::name("even"),
    ///         _ => Key::name("odd"),
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(parity.get(&Key::name("odd")), Some(&vec![leaf(1), leaf(3)]));
    /// assert_eq!(parity.get(&Key::name("even")), Some(&vec![leaf(2), leaf(4)]));
    /// ```
    pub fn group_by<F>(&self, classifier: F) -> Result<Sequence<Vec<Value<V>>>, EnumerateError>
    where
        F: FnMut(&Value<V>, &Key) -> Key,
    {
        aggregate::group_entries(self, classifier)
    }
}

impl<V: 'static> Clone for Enumerator<V> {
    /// Clones the stage handle; the underlying pull closure is shared.
    fn clone(&self) -> Self {
        Self {
            pull: Rc::clone(&self.pull),
        }
    }
}

impl<V: 'static> fmt::Debug for Enumerator<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Enumerator").field(&"<lazy>").finish()
    }
}

impl<V: Clone + 'static> From<Sequence<Value<V>>> for Enumerator<V> {
    fn from(sequence: Sequence<Value<V>>) -> Self {
        Self::from_sequence(sequence)
    }
}

impl<V: Clone + 'static> IntoIterator for &Enumerator<V> {
    type Item = Result<Entry<V>, EnumerateError>;
    type IntoIter = EntryIter<V>;

    /// Pulls the stage; equivalent to [`Enumerator::each`].
    fn into_iter(self) -> Self::IntoIter {
        self.each()
    }
}

// The pipeline is a single-threaded cooperative pull model by design.
assert_impl_all!(Enumerator<i32>: Clone);
assert_not_impl_any!(Enumerator<i32>: Send, Sync);

/// Depth-first splicing iterator behind [`Enumerator::flatten`].
///
/// The top of the stack is the stream currently being drained; entering a
/// nested value pushes its stream, exhausting one pops it.
struct FlattenEntries<V: 'static> {
    stack: SmallVec<[EntryIter<V>; 4]>,
}

impl<V: Clone + 'static> Iterator for FlattenEntries<V> {
    type Item = Result<Entry<V>, EnumerateError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.stack.last_mut()?;
            match current.next() {
                None => {
                    self.stack.pop();
                }
                Some(Err(error)) => return Some(Err(error)),
                Some(Ok((_, Value::Sequence(inner)))) => {
                    self.stack.push(Box::new(inner.into_iter().map(Ok)));
                }
                Some(Ok((_, Value::Pipeline(inner)))) => {
                    self.stack.push(inner.each());
                }
                Some(Ok(entry)) => return Some(Ok(entry)),
            }
        }
    }
}

/// Drains `upstream`, folds its rows into columns, and emits the columns.
fn transpose_pull<V: Clone + 'static>(upstream: &Enumerator<V>) -> EntryIter<V> {
    let mut columns: Sequence<Sequence<Value<V>>> = Sequence::new();
    for entry in upstream.each() {
        let (_, row) = match entry {
            Ok(entry) => entry,
            Err(error) => return Box::new(iter::once(Err(error))),
        };
        let cells: Vec<Entry<V>> = match row {
            Value::Sequence(cells) => cells.into_iter().collect(),
            Value::Pipeline(cells) => {
                let mut collected = Vec::new();
                for cell in cells.each() {
                    match cell {
                        Ok(cell) => collected.push(cell),
                        Err(error) => return Box::new(iter::once(Err(error))),
                    }
                }
                collected
            }
            Value::Leaf(_) => {
                return Box::new(iter::once(Err(NotSequenceError {
                    operation: "transpose",
                    subject: "row value",
                }
                .into())));
            }
        };
        for (column_key, cell) in cells {
            columns
                .get_or_insert_with(column_key, Sequence::new)
                .append(cell);
        }
    }
    Box::new(
        columns
            .into_iter()
            .map(|(key, column)| Ok((key, Value::Sequence(column)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::leaf;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn combinators_do_not_evaluate_until_pulled() {
        let touched = Rc::new(Cell::new(0));
        let probe = Rc::clone(&touched);
        let chain = Enumerator::from_values(1..=3).tap(move |_, _| probe.set(probe.get() + 1));

        assert_eq!(touched.get(), 0);
        chain.apply(|_, _| {}).unwrap();
        assert_eq!(touched.get(), 3);
    }

    #[rstest]
    fn stages_replay_from_the_source_on_every_pull() {
        let chain = Enumerator::from_values(1..=3).skip(1);
        assert_eq!(chain.to_array_values().unwrap(), vec![leaf(2), leaf(3)]);
        assert_eq!(chain.to_array_values().unwrap(), vec![leaf(2), leaf(3)]);
    }

    #[rstest]
    fn combinators_leave_the_receiver_usable() {
        let base = Enumerator::from_values(1..=4);
        let taken = base.take(1);
        let skipped = base.skip(3);

        assert_eq!(taken.to_array_values().unwrap(), vec![leaf(1)]);
        assert_eq!(skipped.to_array_values().unwrap(), vec![leaf(4)]);
        assert_eq!(base.to_array_values().unwrap().len(), 4);
    }
}
