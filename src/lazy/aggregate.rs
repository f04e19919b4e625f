//! Recursive terminal aggregation.
//!
//! The keyed terminals (`to_array`, `to_array_values`, `group_by`) share
//! one rule: an element whose value is a nested [`Value::Pipeline`] is not
//! stored opaquely. Its own elements are pulled and processed in place,
//! recursively, splicing into the result being built. The builder is
//! passed down the recursion by exclusive `&mut` borrow, scoped to the
//! single aggregation call; nothing is shared across calls.

use super::enumerator::Enumerator;
use super::EntryIter;
use crate::error::EnumerateError;
use crate::sequence::{Key, Sequence, Value};

/// Materializes `enumerator` into a keyed sequence (`to_array`).
pub(super) fn collect_array<V: Clone + 'static>(
    enumerator: &Enumerator<V>,
) -> Result<Sequence<Value<V>>, EnumerateError> {
    let mut result = Sequence::new();
    collect_array_into(enumerator.each(), &mut result)?;
    Ok(result)
}

fn collect_array_into<V: Clone + 'static>(
    entries: EntryIter<V>,
    result: &mut Sequence<Value<V>>,
) -> Result<(), EnumerateError> {
    for entry in entries {
        let (key, value) = entry?;
        match value {
            Value::Pipeline(nested) => collect_array_into(nested.each(), result)?,
            other => {
                result.insert(key, other);
            }
        }
    }
    Ok(())
}

/// Materializes `enumerator` into a dense value list (`to_array_values`).
pub(super) fn collect_values<V: Clone + 'static>(
    enumerator: &Enumerator<V>,
) -> Result<Vec<Value<V>>, EnumerateError> {
    let mut result = Vec::new();
    collect_values_into(enumerator.each(), &mut result)?;
    Ok(result)
}

fn collect_values_into<V: Clone + 'static>(
    entries: EntryIter<V>,
    result: &mut Vec<Value<V>>,
) -> Result<(), EnumerateError> {
    for entry in entries {
        let (_, value) = entry?;
        match value {
            Value::Pipeline(nested) => collect_values_into(nested.each(), result)?,
            other => result.push(other),
        }
    }
    Ok(())
}

/// Buckets the elements of `enumerator` by a computed key (`group_by`).
pub(super) fn group_entries<V, F>(
    enumerator: &Enumerator<V>,
    mut classifier: F,
) -> Result<Sequence<Vec<Value<V>>>, EnumerateError>
where
    V: Clone + 'static,
    F: FnMut(&Value<V>, &Key) -> Key,
{
    let mut result = Sequence::new();
    group_into(enumerator.each(), &mut classifier, &mut result)?;
    Ok(result)
}

fn group_into<V, F>(
    entries: EntryIter<V>,
    classifier: &mut F,
    result: &mut Sequence<Vec<Value<V>>>,
) -> Result<(), EnumerateError>
where
    V: Clone + 'static,
    F: FnMut(&Value<V>, &Key) -> Key,
{
    for entry in entries {
        let (key, value) = entry?;
        match value {
            // Expanded elements are classified under their own inner keys.
            Value::Pipeline(nested) => group_into(nested.each(), classifier, result)?,
            other => {
                let bucket = classifier(&other, &key);
                result.get_or_insert_with(bucket, Vec::new).push(other);
            }
        }
    }
    Ok(())
}
