//! Element values.
//!
//! [`Value`] is the sum type flowing through a pipeline: a scalar leaf, a
//! raw nested sequence, or a nested lazy pipeline. The third variant is the
//! recursive case the aggregation terminals detect and expand; modelling it
//! as an explicit variant lets them recurse by pattern matching instead of
//! by dynamic type inspection.

use std::fmt;

use super::ordered::Sequence;
use crate::lazy::Enumerator;

/// A single value of a pipeline element.
///
/// # Equality
///
/// `Leaf` and `Sequence` values compare structurally. A `Pipeline` value is
/// never equal to anything, including itself, because an unevaluated
/// pipeline has no structural identity. Consequently `Value` implements
/// [`PartialEq`] but not `Eq`.
///
/// # Examples
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// let scalar: Value<i32> = leaf(1);
/// assert_eq!(scalar.as_leaf(), Some(&1));
/// assert_eq!(scalar, leaf(1));
///
/// let lazy = Value::pipeline(Enumerator::from_values(1..=3));
/// assert_ne!(lazy.clone(), lazy);
/// ```
pub enum Value<V: 'static> {
    /// A scalar leaf value.
    Leaf(V),
    /// A raw nested materialized sequence.
    Sequence(Sequence<Value<V>>),
    /// A nested lazy pipeline.
    Pipeline(Enumerator<V>),
}

/// Wraps a scalar into a [`Value::Leaf`].
///
/// Free-function shorthand for sequence literals:
///
/// ```rust
/// use lazyseq::prelude::*;
///
/// let sequence = lazyseq::seq! { "a" => leaf(1), "b" => leaf(2) };
/// assert_eq!(sequence.get(&Key::name("a")), Some(&leaf(1)));
/// ```
#[inline]
pub const fn leaf<V: 'static>(value: V) -> Value<V> {
    Value::Leaf(value)
}

impl<V: 'static> Value<V> {
    /// Wraps a scalar into a `Leaf` value.
    #[inline]
    pub const fn leaf(value: V) -> Self {
        Self::Leaf(value)
    }

    /// Wraps a materialized sequence into a `Sequence` value.
    #[inline]
    pub const fn sequence(sequence: Sequence<Value<V>>) -> Self {
        Self::Sequence(sequence)
    }

    /// Wraps a lazy pipeline into a `Pipeline` value.
    #[inline]
    pub const fn pipeline(enumerator: Enumerator<V>) -> Self {
        Self::Pipeline(enumerator)
    }

    /// Returns whether this is a leaf value.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Returns whether this is a raw nested sequence.
    #[inline]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Returns whether this is a nested lazy pipeline.
    #[inline]
    pub const fn is_pipeline(&self) -> bool {
        matches!(self, Self::Pipeline(_))
    }

    /// Returns the scalar if this is a leaf.
    #[inline]
    pub const fn as_leaf(&self) -> Option<&V> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the nested sequence if this is a `Sequence` value.
    #[inline]
    pub const fn as_sequence(&self) -> Option<&Sequence<Value<V>>> {
        match self {
            Self::Sequence(sequence) => Some(sequence),
            _ => None,
        }
    }

    /// Returns the nested pipeline if this is a `Pipeline` value.
    #[inline]
    pub const fn as_pipeline(&self) -> Option<&Enumerator<V>> {
        match self {
            Self::Pipeline(enumerator) => Some(enumerator),
            _ => None,
        }
    }

    /// Consumes the value and returns the scalar if this is a leaf.
    #[inline]
    pub fn into_leaf(self) -> Option<V> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Applies `function` to a leaf payload, passing the other variants
    /// through untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// assert_eq!(leaf(21).map_leaf(|n| n * 2), leaf(42));
    /// ```
    pub fn map_leaf<F>(self, function: F) -> Self
    where
        F: FnOnce(V) -> V,
    {
        match self {
            Self::Leaf(value) => Self::Leaf(function(value)),
            other => other,
        }
    }
}

impl<V: Clone + 'static> Clone for Value<V> {
    fn clone(&self) -> Self {
        match self {
            Self::Leaf(value) => Self::Leaf(value.clone()),
            Self::Sequence(sequence) => Self::Sequence(sequence.clone()),
            Self::Pipeline(enumerator) => Self::Pipeline(enumerator.clone()),
        }
    }
}

impl<V: PartialEq + 'static> PartialEq for Value<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Leaf(left), Self::Leaf(right)) => left == right,
            (Self::Sequence(left), Self::Sequence(right)) => left == right,
            // Pipeline values have no structural identity.
            _ => false,
        }
    }
}

impl<V: PartialEq + 'static> PartialEq<V> for Value<V> {
    /// Compares a value directly against a leaf payload.
    ///
    /// ```rust
    /// use lazyseq::prelude::*;
    ///
    /// assert!(leaf(3) == 3);
    /// ```
    fn eq(&self, other: &V) -> bool {
        self.as_leaf() == Some(other)
    }
}

impl<V: fmt::Debug + 'static> fmt::Debug for Value<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(value) => formatter.debug_tuple("Leaf").field(value).finish(),
            Self::Sequence(sequence) => formatter.debug_tuple("Sequence").field(sequence).finish(),
            Self::Pipeline(_) => formatter.debug_tuple("Pipeline").field(&"<lazy>").finish(),
        }
    }
}

impl<V: 'static> From<Sequence<Value<V>>> for Value<V> {
    fn from(sequence: Sequence<Value<V>>) -> Self {
        Self::Sequence(sequence)
    }
}

impl<V: 'static> From<Enumerator<V>> for Value<V> {
    fn from(enumerator: Enumerator<V>) -> Self {
        Self::Pipeline(enumerator)
    }
}

#[cfg(feature = "serde")]
impl<V: serde::Serialize + 'static> serde::Serialize for Value<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error;

        match self {
            Self::Leaf(value) => value.serialize(serializer),
            Self::Sequence(sequence) => sequence.serialize(serializer),
            Self::Pipeline(_) => Err(S::Error::custom(
                "lazy pipeline values cannot be serialized; materialize with to_array first",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Key;
    use rstest::rstest;

    #[rstest]
    fn leaf_values_compare_structurally() {
        assert_eq!(leaf(1), leaf(1));
        assert_ne!(leaf(1), leaf(2));
    }

    #[rstest]
    fn sequence_values_compare_structurally() {
        let left: Value<i32> = crate::seq! { "a" => leaf(1) }.into();
        let right: Value<i32> = crate::seq! { "a" => leaf(1) }.into();
        assert_eq!(left, right);
    }

    #[rstest]
    fn pipeline_values_never_compare_equal() {
        let value = Value::pipeline(Enumerator::from_values(vec![1, 2]));
        assert_ne!(value.clone(), value);
    }

    #[rstest]
    fn variant_predicates() {
        let scalar: Value<i32> = leaf(1);
        let nested: Value<i32> = crate::seq! { Key::index(0) => leaf(1) }.into();
        let lazy = Value::pipeline(Enumerator::from_values(vec![1]));

        assert!(scalar.is_leaf() && !scalar.is_sequence() && !scalar.is_pipeline());
        assert!(nested.is_sequence());
        assert!(lazy.is_pipeline());
    }

    #[rstest]
    fn debug_hides_pipeline_contents() {
        let lazy = Value::pipeline(Enumerator::from_values(vec![1]));
        assert!(format!("{lazy:?}").contains("<lazy>"));
    }
}
