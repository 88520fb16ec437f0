//! Ordered Collection
//!
//! An id-keyed sequence where position is meaningful and explicitly
//! mutable. Each scope (one task board, the list of lists, the timeline)
//! owns exactly one collection as its source of truth for order.

mod reorder;

pub use reorder::reorder;

use serde::Serialize;

use crate::domain::{DomainError, DomainResult, Entity};

/// A sequence of uniquely-identified entities with positional operations.
///
/// Backed by a plain `Vec`; these are UI-scale collections, so lookups are
/// linear scans rather than a side index. Serializable for snapshot
/// hand-off; rebuilt through `with_items` so the uniqueness invariant
/// always holds.
#[derive(Debug, Clone, Serialize)]
pub struct OrderedCollection<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> OrderedCollection<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a collection from an already-ordered batch, rejecting
    /// duplicate ids.
    pub fn with_items(items: Vec<T>) -> DomainResult<Self> {
        let mut collection = Self::new();
        for item in items {
            collection.insert(item)?;
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_by_id(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Position of an id, or `None` when absent.
    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Append an entity; fails when its id is already present.
    pub fn insert(&mut self, entity: T) -> DomainResult<()> {
        let index = self.items.len();
        self.insert_at(entity, index)
    }

    /// Insert at a position in `[0, len]`; fails on a duplicate id or an
    /// out-of-range index, leaving the collection untouched either way.
    pub fn insert_at(&mut self, entity: T, index: usize) -> DomainResult<()> {
        if self.index_of(entity.id()).is_some() {
            return Err(DomainError::DuplicateId(entity.id().to_string()));
        }
        if index > self.items.len() {
            return Err(DomainError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, entity);
        Ok(())
    }

    /// Remove by id. Absence is a no-op, not an error; returns whether a
    /// removal happened.
    pub fn remove_by_id(&mut self, id: &T::Id) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replace the entity with the same id in place; returns false when no
    /// entity with that id exists.
    pub fn replace(&mut self, entity: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Stable move of the element at `from` to position `to`.
    pub fn move_to(&mut self, from: usize, to: usize) -> DomainResult<()> {
        reorder(&mut self.items, from, to)
    }

    /// Ids in current order.
    pub fn ids(&self) -> Vec<T::Id> {
        self.items.iter().map(|item| item.id().clone()).collect()
    }

    /// Rearrange existing elements to match `order`.
    ///
    /// Listed ids come first in the given order; ids not listed keep their
    /// relative order at the tail; listed ids that are no longer present
    /// are skipped. Total by construction: this is the rollback path for
    /// a failed move and must not be able to fail.
    pub fn restore_order(&mut self, order: &[T::Id]) {
        let mut rest = std::mem::take(&mut self.items);
        let mut restored = Vec::with_capacity(rest.len());
        for id in order {
            if let Some(index) = rest.iter().position(|item| item.id() == id) {
                restored.push(rest.remove(index));
            }
        }
        restored.append(&mut rest);
        self.items = restored;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Owned copy of the current state, for rendering collaborators.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T: Entity> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LifeEntry;
    use chrono::Utc;

    fn entry(id: &str) -> LifeEntry {
        let now = Utc::now();
        LifeEntry {
            id: id.to_string(),
            content: format!("entry {}", id),
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }

    fn collection(ids: &[&str]) -> OrderedCollection<LifeEntry> {
        OrderedCollection::with_items(ids.iter().map(|id| entry(id)).collect()).unwrap()
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut c = collection(&["a", "b"]);
        let err = c.insert(entry("a")).unwrap_err();
        assert_eq!(err, DomainError::DuplicateId("a".to_string()));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_insert_at_bounds() {
        let mut c = collection(&["a", "b"]);
        c.insert_at(entry("c"), 1).unwrap();
        assert_eq!(c.ids(), vec!["a", "c", "b"]);
        assert!(c.insert_at(entry("d"), 5).is_err());
        // insert at len appends
        c.insert_at(entry("d"), 3).unwrap();
        assert_eq!(c.ids(), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut c = collection(&["a"]);
        assert!(!c.remove_by_id(&"ghost".to_string()));
        assert!(c.remove_by_id(&"a".to_string()));
        assert!(c.is_empty());
    }

    #[test]
    fn test_index_of() {
        let c = collection(&["a", "b", "c"]);
        assert_eq!(c.index_of(&"b".to_string()), Some(1));
        assert_eq!(c.index_of(&"ghost".to_string()), None);
    }

    #[test]
    fn test_move_to_delegates_to_reorder() {
        let mut c = collection(&["a", "b", "c", "d"]);
        c.move_to(0, 2).unwrap();
        assert_eq!(c.ids(), vec!["b", "c", "a", "d"]);
        assert!(c.move_to(0, 4).is_err());
        assert_eq!(c.ids(), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut c = collection(&["a", "b", "c"]);
        let mut updated = entry("b");
        updated.content = "rewritten".to_string();
        assert!(c.replace(updated));
        assert_eq!(c.index_of(&"b".to_string()), Some(1));
        assert_eq!(c.get(1).unwrap().content, "rewritten");
        assert!(!c.replace(entry("ghost")));
    }

    #[test]
    fn test_restore_order() {
        let mut c = collection(&["a", "b", "c", "d"]);
        c.restore_order(&[
            "c".to_string(),
            "a".to_string(),
            "ghost".to_string(),
        ]);
        // listed ids first, unlisted keep relative order at the tail
        assert_eq!(c.ids(), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_restore_order_round_trip() {
        let mut c = collection(&["a", "b", "c", "d"]);
        let before = c.ids();
        c.move_to(3, 0).unwrap();
        c.restore_order(&before);
        assert_eq!(c.ids(), before);
    }
}
