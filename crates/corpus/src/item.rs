use serde::{Deserialize, Serialize};

/// A single searchable record: an opaque unique id plus a short human title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: u64,
    pub title: String,
}

impl TaskItem {
    #[must_use]
    pub const fn new(id: u64, title: String) -> Self {
        Self { id, title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_as_flat_object() {
        let item = TaskItem::new(2, "Organize desk".to_string());
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":2,"title":"Organize desk"}"#);

        let back: TaskItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
