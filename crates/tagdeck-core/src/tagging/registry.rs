//! Ordered registry of tag names with derived usage counts.
//!
//! Counts are never edited directly. They are recomputed from an
//! [`AssociationStore`] by [`TagRegistry::recount`], which every mutating
//! operation that touches the store calls before returning.

use serde::Serialize;

use crate::error::{SessionError, SessionResult};

use super::store::AssociationStore;

/// A registered tag and the number of images it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    name: String,
    count: usize,
}

impl Tag {
    fn new(name: String) -> Self {
        Self { name, count: 0 }
    }

    /// The tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Images currently carrying this tag, as of the last recount.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Tags in insertion order. No two entries share a name.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag. The name is trimmed; empty or already-present names
    /// (exact, case-sensitive match) are ignored. Returns true if added.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            tracing::debug!("Ignoring tag add for {:?}", name);
            return false;
        }
        self.tags.push(Tag::new(name.to_string()));
        true
    }

    /// Remove a tag and strip it from every image in `store`.
    pub fn delete(&mut self, name: &str, store: &mut AssociationStore) -> SessionResult<()> {
        let idx = self
            .position(name)
            .ok_or_else(|| SessionError::tag_not_found(name))?;
        self.tags.remove(idx);
        store.remove_tag_everywhere(name);
        self.recount(store);
        Ok(())
    }

    /// Rename a tag in place, carrying its associations along.
    pub fn rename(
        &mut self,
        old: &str,
        new: &str,
        store: &mut AssociationStore,
    ) -> SessionResult<()> {
        let new = new.trim();
        if new.is_empty() {
            return Err(SessionError::Validation("tag name must not be empty".into()));
        }
        let idx = self
            .position(old)
            .ok_or_else(|| SessionError::tag_not_found(old))?;
        if new == old {
            return Ok(());
        }
        if self.contains(new) {
            return Err(SessionError::Conflict(new.to_string()));
        }

        self.tags[idx].name = new.to_string();
        store.rename_tag_everywhere(old, new);
        self.recount(store);
        Ok(())
    }

    /// Recompute every count against `store`.
    pub fn recount(&mut self, store: &AssociationStore) {
        for tag in &mut self.tags {
            tag.count = store.count_for(&tag.name);
        }
    }

    /// All tags in registry order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tag names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> TagRegistry {
        let mut registry = TagRegistry::new();
        for name in names {
            registry.add(name);
        }
        registry
    }

    fn assert_counts_match(registry: &TagRegistry, store: &AssociationStore) {
        for tag in registry.tags() {
            assert_eq!(tag.count(), store.count_for(tag.name()), "{}", tag.name());
        }
    }

    #[test]
    fn test_add_trims_and_rejects_duplicates() {
        let mut registry = TagRegistry::new();
        assert!(registry.add("  cat "));
        assert!(!registry.add("cat"));
        assert!(!registry.add("   "));
        assert!(registry.add("Cat"));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["cat", "Cat"]);
        assert_eq!(registry.get("cat").unwrap().count(), 0);
    }

    #[test]
    fn test_delete_missing_tag() {
        let mut registry = registry(&["cat"]);
        let mut store = AssociationStore::new();
        let err = registry.delete("dog", &mut store).unwrap_err();
        assert_eq!(err, SessionError::tag_not_found("dog"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_delete_cascades_to_store() {
        let mut registry = registry(&["cat", "dog"]);
        let mut store =
            AssociationStore::from_iter([("a.png", vec!["cat", "dog"]), ("b.png", vec!["cat"])]);
        registry.recount(&store);
        assert_eq!(registry.get("cat").unwrap().count(), 2);

        registry.delete("cat", &mut store).unwrap();

        assert!(!registry.contains("cat"));
        assert_eq!(store.count_for("cat"), 0);
        assert_eq!(store.len(), 2);
        assert_counts_match(&registry, &store);
    }

    #[test]
    fn test_readded_tag_starts_empty() {
        let mut registry = registry(&["cat"]);
        let mut store = AssociationStore::from_iter([("a.png", vec!["cat"])]);
        registry.recount(&store);

        registry.delete("cat", &mut store).unwrap();
        registry.add("cat");
        registry.recount(&store);

        assert_eq!(registry.get("cat").unwrap().count(), 0);
        assert!(!store.contains("a.png", "cat"));
    }

    #[test]
    fn test_rename_keeps_position_and_associations() {
        let mut registry = registry(&["cat", "dog", "bird"]);
        let mut store = AssociationStore::from_iter([("a.png", vec!["dog"])]);
        registry.recount(&store);

        registry.rename("dog", " puppy ", &mut store).unwrap();

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["cat", "puppy", "bird"]);
        assert!(store.contains("a.png", "puppy"));
        assert_eq!(registry.get("puppy").unwrap().count(), 1);
    }

    #[test]
    fn test_rename_conflict_and_validation() {
        let mut registry = registry(&["cat", "dog"]);
        let mut store = AssociationStore::new();

        assert_eq!(
            registry.rename("cat", "dog", &mut store).unwrap_err(),
            SessionError::Conflict("dog".into())
        );
        assert!(matches!(
            registry.rename("cat", "  ", &mut store).unwrap_err(),
            SessionError::Validation(_)
        ));
        assert!(matches!(
            registry.rename("fish", "eel", &mut store).unwrap_err(),
            SessionError::NotFound { .. }
        ));
        // Renaming to itself is a no-op
        registry.rename("cat", "cat", &mut store).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_counts_track_every_operation() {
        let mut registry = registry(&["a", "b", "c"]);
        let mut store = AssociationStore::new();
        let images = ["1.png", "2.png", "3.png", "4.png"];

        // Deterministic pseudo-random walk over toggles and deletes
        let mut state: u32 = 7;
        for step in 0..60 {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let image = images[(state >> 8) as usize % images.len()];
            let names: Vec<String> = registry.names().map(String::from).collect();
            if names.is_empty() {
                registry.add("a");
                continue;
            }
            let tag = &names[(state >> 16) as usize % names.len()];
            if step % 17 == 16 {
                registry.delete(tag, &mut store).unwrap();
            } else {
                store.toggle(image, tag);
                registry.recount(&store);
            }
            assert_counts_match(&registry, &store);
        }
    }
}
