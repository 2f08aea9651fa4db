use serde::{Deserialize, Serialize};

use super::ids::Id;

/// Display palette for tag chips. A tag's color is derived from its id, so
/// it is stable across sessions without storing anything.
const TAG_PALETTE: &[&str] = &[
    "#3498db", "#1abc9c", "#9b59b6", "#e67e22", "#e74c3c", "#2c3e50", "#16a085", "#8e44ad",
];

/// A multi-valued label attachable to contacts. Names are unique,
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Id<Tag>,
    pub name: String,
}

impl Tag {
    /// Deterministic background color for this tag.
    pub fn color_hint(&self) -> &'static str {
        TAG_PALETTE[(self.id.value.unsigned_abs() as usize) % TAG_PALETTE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hint_is_deterministic() {
        let tag = Tag {
            id: Id::new(5),
            name: "hot-lead".into(),
        };
        assert_eq!(tag.color_hint(), tag.color_hint());
    }

    #[test]
    fn color_hint_varies_with_id() {
        let a = Tag {
            id: Id::new(1),
            name: "a".into(),
        };
        let b = Tag {
            id: Id::new(2),
            name: "b".into(),
        };
        assert_ne!(a.color_hint(), b.color_hint());
    }
}
