use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Type-safe identifier over the store's integer row ids. The phantom type
/// parameter `T` prevents mixing ids from different entity types (e.g.,
/// Contact ID vs Listing ID). Ids assigned by the store are always positive
/// and monotonic.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T> {
    pub value: i64,
    #[serde(skip)]
    _phantom: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Parse from a decimal string.
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self::new(s.trim().parse()?))
    }

    /// True for ids the store could actually have issued.
    pub fn is_valid(&self) -> bool {
        self.value > 0
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Foo;

    #[test]
    fn ids_with_same_value_are_equal() {
        assert_eq!(Id::<Foo>::new(7), Id::<Foo>::new(7));
        assert_ne!(Id::<Foo>::new(7), Id::<Foo>::new(8));
    }

    #[test]
    fn parse_roundtrips() {
        let id = Id::<Foo>::new(42);
        let parsed = Id::<Foo>::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn validity_requires_positive_value() {
        assert!(Id::<Foo>::new(1).is_valid());
        assert!(!Id::<Foo>::new(0).is_valid());
        assert!(!Id::<Foo>::new(-3).is_valid());
    }

    #[test]
    fn serde_roundtrip() {
        let id = Id::<Foo>::new(11);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "11");
        let deserialized: Id<Foo> = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
