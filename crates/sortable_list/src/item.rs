use std::collections::HashMap;

use gpui::SharedString;

/// A single item in a [`SortableListState`](crate::SortableListState).
#[derive(Clone, Debug)]
pub struct SortableItem<T> {
    pub id: SharedString,
    pub label: SharedString,
    pub data: T,
}

impl<T> SortableItem<T> {
    pub fn new(id: impl Into<SharedString>, label: impl Into<SharedString>, data: T) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data,
        }
    }
}

/// Rejected item sequence. Nothing is applied when setup fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("sortable item id `{id}` is used at both index {first} and index {second}")]
    DuplicateId {
        id: SharedString,
        first: usize,
        second: usize,
    },
}

/// Check that an item sequence can be set up: every id must be unique.
pub fn validate_items<T>(items: &[SortableItem<T>]) -> Result<(), ConfigurationError> {
    let mut seen: HashMap<&SharedString, usize> = HashMap::with_capacity(items.len());
    for (ix, item) in items.iter().enumerate() {
        if let Some(&first) = seen.get(&item.id) {
            return Err(ConfigurationError::DuplicateId {
                id: item.id.clone(),
                first,
                second: ix,
            });
        }
        seen.insert(&item.id, ix);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_ids_pass() {
        let items = vec![
            SortableItem::new("a", "A", ()),
            SortableItem::new("b", "B", ()),
        ];
        assert!(validate_items(&items).is_ok());
        assert!(validate_items::<()>(&[]).is_ok());
    }

    #[test]
    fn duplicate_id_is_reported_with_both_indices() {
        let items = vec![
            SortableItem::new("a", "A", 1),
            SortableItem::new("b", "B", 2),
            SortableItem::new("a", "A again", 3),
        ];
        let err = validate_items(&items).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::DuplicateId {
                id: "a".into(),
                first: 0,
                second: 2,
            }
        );
        assert!(err.to_string().contains("index 0 and index 2"));
    }
}
