//! Image to tag-set associations.
//!
//! The store maps an image identifier (its path as a string) to the set of tag
//! names applied to it. Both the image keys and each tag set keep insertion
//! order so exports are stable. An image missing from the store behaves exactly
//! like one mapped to the empty set.

use indexmap::{IndexMap, IndexSet};

/// Ordered set of tag names applied to one image.
pub type TagSet = IndexSet<String>;

/// Mapping from image identifier to its applied tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationStore {
    entries: IndexMap<String, TagSet>,
}

impl AssociationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags applied to `image`; empty if the image is unknown.
    pub fn get(&self, image: &str) -> TagSet {
        self.entries.get(image).cloned().unwrap_or_default()
    }

    /// Borrowing lookup. `None` means the image has never been recorded.
    pub fn tags_of(&self, image: &str) -> Option<&TagSet> {
        self.entries.get(image)
    }

    /// Whether `tag` is currently applied to `image`.
    pub fn contains(&self, image: &str, tag: &str) -> bool {
        self.entries
            .get(image)
            .is_some_and(|tags| tags.contains(tag))
    }

    /// Replace the full tag set of one image.
    ///
    /// The new set is taken as-is rather than diffed against the old one.
    pub fn set_all<I, S>(&mut self, image: &str, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: TagSet = tags.into_iter().map(Into::into).collect();
        tracing::debug!("Set {} tag(s) on {}", tags.len(), image);
        match self.entries.get_mut(image) {
            Some(existing) => *existing = tags,
            None => {
                self.entries.insert(image.to_string(), tags);
            }
        }
    }

    /// Flip a single association. Returns true if the tag is now applied.
    pub fn toggle(&mut self, image: &str, tag: &str) -> bool {
        let tags = self.entries.entry(image.to_string()).or_default();
        if tags.shift_remove(tag) {
            false
        } else {
            tags.insert(tag.to_string());
            true
        }
    }

    /// Discard `tag` from every image. Image keys are kept even when their
    /// set becomes empty. Returns the number of images that lost the tag.
    pub fn remove_tag_everywhere(&mut self, tag: &str) -> usize {
        let affected = self
            .entries
            .values_mut()
            .map(|tags| tags.shift_remove(tag))
            .filter(|removed| *removed)
            .count();
        tracing::debug!("Removed tag '{}' from {} image(s)", tag, affected);
        affected
    }

    /// Rename `old` to `new` inside every set, keeping each set's order.
    /// Returns the number of images that carried `old`.
    pub fn rename_tag_everywhere(&mut self, old: &str, new: &str) -> usize {
        let mut affected = 0;
        for tags in self.entries.values_mut() {
            if !tags.contains(old) {
                continue;
            }
            affected += 1;
            let renamed: TagSet = tags
                .drain(..)
                .map(|t| if t == old { new.to_string() } else { t })
                .collect();
            *tags = renamed;
        }
        affected
    }

    /// Number of images `tag` is applied to.
    pub fn count_for(&self, tag: &str) -> usize {
        self.entries
            .values()
            .filter(|tags| tags.contains(tag))
            .count()
    }

    /// Every distinct tag name in the store, in first-seen order.
    pub fn distinct_tags(&self) -> Vec<String> {
        let seen: IndexSet<&String> = self.entries.values().flatten().collect();
        seen.into_iter().cloned().collect()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagSet)> {
        self.entries.iter().map(|(image, tags)| (image.as_str(), tags))
    }

    /// Number of image keys (including images with empty sets).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store has no image keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for AssociationStore
where
    K: Into<String>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut store = Self::new();
        for (image, tags) in iter {
            let image: String = image.into();
            store.set_all(&image, tags);
        }
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AssociationStore {
        AssociationStore::from_iter([
            ("a.png", vec!["cat", "dog"]),
            ("b.png", vec!["dog"]),
            ("c.png", vec![]),
        ])
    }

    #[test]
    fn test_unknown_image_is_empty() {
        let store = AssociationStore::new();
        assert!(store.get("missing.png").is_empty());
        assert!(store.tags_of("missing.png").is_none());
        assert!(!store.contains("missing.png", "cat"));
    }

    #[test]
    fn test_set_all_replaces_instead_of_merging() {
        let mut store = sample();
        store.set_all("a.png", ["bird"]);

        let tags = store.get("a.png");
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("bird"));
        assert!(!tags.contains("cat"));
    }

    #[test]
    fn test_set_all_keeps_key_position() {
        let mut store = sample();
        store.set_all("a.png", Vec::<String>::new());
        let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_toggle() {
        let mut store = AssociationStore::new();
        assert!(store.toggle("a.png", "cat"));
        assert!(store.contains("a.png", "cat"));
        assert!(!store.toggle("a.png", "cat"));
        assert!(!store.contains("a.png", "cat"));
        // Key survives with an empty set
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_tag_everywhere_keeps_keys() {
        let mut store = sample();
        let affected = store.remove_tag_everywhere("dog");

        assert_eq!(affected, 2);
        assert_eq!(store.len(), 3);
        assert!(store.get("b.png").is_empty());
        assert_eq!(store.count_for("dog"), 0);
        assert_eq!(store.count_for("cat"), 1);
    }

    #[test]
    fn test_rename_tag_everywhere_preserves_order() {
        let mut store = sample();
        let affected = store.rename_tag_everywhere("cat", "kitten");

        assert_eq!(affected, 1);
        let tags: Vec<String> = store.get("a.png").into_iter().collect();
        assert_eq!(tags, vec!["kitten".to_string(), "dog".to_string()]);
    }

    #[test]
    fn test_distinct_tags_first_seen_order() {
        let store = AssociationStore::from_iter([
            ("a.png", vec!["dog"]),
            ("b.png", vec!["cat", "dog", "bird"]),
        ]);
        assert_eq!(store.distinct_tags(), vec!["dog", "cat", "bird"]);
    }

    #[test]
    fn test_equality_ignores_set_order() {
        let a = AssociationStore::from_iter([("a.png", vec!["cat", "dog"])]);
        let b = AssociationStore::from_iter([("a.png", vec!["dog", "cat"])]);
        assert_eq!(a, b);
    }
}
