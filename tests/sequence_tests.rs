//! Tests for the materialized sequence types and the seq! literal macro.

use lazyseq::prelude::*;
use lazyseq::seq;
use rstest::rstest;

// =============================================================================
// seq! literal forms
// =============================================================================

#[rstest]
fn seq_map_form_builds_keyed_entries() {
    let sequence = seq! { "a" => leaf(1), "b" => leaf(2) };

    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.get(&Key::name("a")), Some(&leaf(1)));
    assert_eq!(sequence.get(&Key::name("b")), Some(&leaf(2)));
}

#[rstest]
fn seq_list_form_assigns_sequential_index_keys() {
    let sequence = seq![leaf("x"), leaf("y"), leaf("z")];

    let keys: Vec<_> = sequence.keys().cloned().collect();
    assert_eq!(keys, vec![Key::index(0), Key::index(1), Key::index(2)]);
}

#[rstest]
fn seq_empty_form_builds_an_empty_sequence() {
    let sequence: Sequence<Value<i32>> = seq! {};
    assert!(sequence.is_empty());
}

#[rstest]
fn seq_nests_sequences_and_pipelines_as_values() {
    let sequence = seq! {
        "nested" => seq! { "inner" => leaf(1) },
        "lazy" => Enumerator::from_values(vec![2]),
    };

    assert!(sequence.get(&Key::name("nested")).is_some_and(Value::is_sequence));
    assert!(sequence.get(&Key::name("lazy")).is_some_and(Value::is_pipeline));
}

#[rstest]
fn seq_accepts_mixed_key_shapes() {
    let sequence = seq! {
        "name" => leaf(1),
        Key::index(7) => leaf(2),
        3usize => leaf(3),
    };

    let keys: Vec<_> = sequence.keys().cloned().collect();
    assert_eq!(keys, vec![Key::name("name"), Key::index(7), Key::index(3)]);
}

// =============================================================================
// Sequence semantics
// =============================================================================

#[rstest]
fn iteration_follows_insertion_order() {
    let sequence = seq! { "c" => leaf(3), "a" => leaf(1), "b" => leaf(2) };

    let keys: Vec<_> = sequence.iter().map(|(key, _)| key.clone()).collect();
    assert_eq!(keys, vec![Key::name("c"), Key::name("a"), Key::name("b")]);
}

#[rstest]
fn overwrite_keeps_position_and_replaces_payload() {
    let mut sequence = seq! { "a" => leaf(1), "b" => leaf(2) };
    let replaced = sequence.insert(Key::name("a"), leaf(9));

    assert_eq!(replaced, Some(leaf(1)));
    assert_eq!(sequence.first(), Some((&Key::name("a"), &leaf(9))));
    assert_eq!(sequence.len(), 2);
}

#[rstest]
fn append_after_explicit_index_continues_numbering() {
    let mut sequence = seq! { Key::index(4) => leaf("four") };
    sequence.append(leaf("five"));

    assert_eq!(sequence.get(&Key::index(5)), Some(&leaf("five")));
}

#[rstest]
fn entry_at_first_and_last_follow_insertion_order() {
    let sequence = seq! { "a" => leaf(1), "b" => leaf(2), "c" => leaf(3) };

    assert_eq!(sequence.entry_at(1), Some((&Key::name("b"), &leaf(2))));
    assert_eq!(sequence.first(), Some((&Key::name("a"), &leaf(1))));
    assert_eq!(sequence.last(), Some((&Key::name("c"), &leaf(3))));
    assert_eq!(sequence.entry_at(3), None);
}

#[rstest]
fn extend_applies_the_insert_rules() {
    let mut sequence = seq! { "a" => leaf(1) };
    sequence.extend(vec![
        (Key::name("b"), leaf(2)),
        (Key::name("a"), leaf(3)),
    ]);

    assert_eq!(sequence, seq! { "a" => leaf(3), "b" => leaf(2) });
}

#[rstest]
fn into_iterator_consumes_in_insertion_order() {
    let sequence = seq! { "a" => leaf(1), "b" => leaf(2) };
    let entries: Vec<_> = sequence.into_iter().collect();

    assert_eq!(
        entries,
        vec![(Key::name("a"), leaf(1)), (Key::name("b"), leaf(2))],
    );
}

#[rstest]
fn debug_renders_as_a_map() {
    let sequence = seq! { "a" => leaf(1) };
    let rendered = format!("{sequence:?}");

    assert!(rendered.contains("Name(\"a\")"));
    assert!(rendered.contains("Leaf(1)"));
}

#[rstest]
fn values_iterator_yields_payloads_in_order() {
    let sequence = seq! { "a" => leaf(1), "b" => leaf(2) };
    let payloads: Vec<_> = sequence.values().cloned().collect();

    assert_eq!(payloads, vec![leaf(1), leaf(2)]);
}
