//! Tagging session state.
//!
//! [`Session`] is the single owner of the tag registry, the association store,
//! the active image list and the cursor over it. Front ends hold one session
//! and route every operation through it; there is no global state.
//!
//! Every operation either completes or returns an error without changing
//! anything. Counts are recomputed before any mutating call returns.

pub mod cursor;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::codec::AssociationCodec;
use crate::discovery::image_id;
use crate::error::{CodecError, SessionError, SessionResult};
use crate::tagging::{AssociationStore, Tag, TagRegistry, TagSet};

pub use cursor::Cursor;

/// Registry, associations and navigation for one tagging run.
#[derive(Debug, Default)]
pub struct Session {
    registry: TagRegistry,
    store: AssociationStore,
    images: Vec<String>,
    cursor: Cursor,
    codec: AssociationCodec,
}

impl Session {
    /// Create an empty session using `codec` for import/export.
    pub fn new(codec: AssociationCodec) -> Self {
        Self {
            codec,
            ..Self::default()
        }
    }

    // ── Images and navigation ───────────────────────────────────────────────

    /// Replace the active image list and return to its first image.
    ///
    /// Associations of images that are no longer listed are kept.
    pub fn load_images(&mut self, images: &[PathBuf]) {
        self.images = images.iter().map(|p| image_id(p)).collect();
        self.cursor.reset(self.images.len());
        self.registry.recount(&self.store);
        tracing::info!("Loaded {} image(s)", self.images.len());
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Identifier of the image under the cursor.
    pub fn current_image(&self) -> Option<&str> {
        self.cursor.index().map(|i| self.images[i].as_str())
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn next(&mut self) -> Option<&str> {
        self.cursor.next();
        self.current_image()
    }

    pub fn previous(&mut self) -> Option<&str> {
        self.cursor.previous();
        self.current_image()
    }

    pub fn jump(&mut self, index: usize) -> SessionResult<&str> {
        self.cursor.jump(index)?;
        self.current_image()
            .ok_or_else(|| SessionError::image_not_found(format!("#{}", index + 1)))
    }

    /// "Image i of n", or `None` with no images loaded.
    pub fn position_label(&self) -> Option<String> {
        self.cursor
            .index()
            .map(|i| format!("Image {} of {}", i + 1, self.cursor.len()))
    }

    // ── Tags ────────────────────────────────────────────────────────────────

    /// Register a tag. Returns false if the trimmed name is empty or taken.
    ///
    /// Names containing the codec's tag delimiter are rejected, since they
    /// would split into several tags on re-import.
    pub fn add_tag(&mut self, name: &str) -> SessionResult<bool> {
        self.check_delimiter(name)?;
        let added = self.registry.add(name);
        if added {
            self.registry.recount(&self.store);
            tracing::debug!("Added tag '{}'", name.trim());
        }
        Ok(added)
    }

    /// Delete a tag and remove it from every image.
    pub fn delete_tag(&mut self, name: &str) -> SessionResult<()> {
        self.registry.delete(name, &mut self.store)?;
        tracing::debug!("Deleted tag '{}'", name);
        Ok(())
    }

    /// Rename a tag, keeping its associations.
    pub fn rename_tag(&mut self, old: &str, new: &str) -> SessionResult<()> {
        self.check_delimiter(new)?;
        self.registry.rename(old, new, &mut self.store)?;
        tracing::debug!("Renamed tag '{}' to '{}'", old, new.trim());
        Ok(())
    }

    fn check_delimiter(&self, name: &str) -> SessionResult<()> {
        let delimiter = self.codec.delimiter();
        if name.trim().contains(delimiter.as_char()) {
            tracing::warn!("Rejected tag {:?}: contains the {} delimiter", name, delimiter);
            return Err(SessionError::Validation(format!(
                "tag name must not contain the {delimiter} delimiter"
            )));
        }
        Ok(())
    }

    /// Registered tags with their counts, in registry order.
    pub fn tags(&self) -> &[Tag] {
        self.registry.tags()
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn store(&self) -> &AssociationStore {
        &self.store
    }

    // ── Associations for the current image ─────────────────────────────────

    /// Tags applied to the current image (empty without a current image).
    pub fn current_tags(&self) -> TagSet {
        self.current_image()
            .map(|image| self.store.get(image))
            .unwrap_or_default()
    }

    /// Flip one registered tag on the current image. Returns the new state.
    pub fn toggle_current(&mut self, tag: &str) -> SessionResult<bool> {
        if !self.registry.contains(tag) {
            return Err(SessionError::tag_not_found(tag));
        }
        let image = self.require_current()?;
        let applied = self.store.toggle(&image, tag);
        self.registry.recount(&self.store);
        Ok(applied)
    }

    /// Replace the current image's tags with `checked`.
    ///
    /// Every name must be registered; otherwise nothing changes.
    pub fn set_current_tags<I, S>(&mut self, checked: I) -> SessionResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let checked: Vec<String> = checked.into_iter().map(Into::into).collect();
        if let Some(unknown) = checked.iter().find(|t| !self.registry.contains(t)) {
            return Err(SessionError::tag_not_found(unknown.as_str()));
        }
        let image = self.require_current()?;
        self.store.set_all(&image, checked);
        self.registry.recount(&self.store);
        Ok(())
    }

    fn require_current(&self) -> SessionResult<String> {
        self.current_image()
            .map(String::from)
            .ok_or_else(|| SessionError::image_not_found("(no images loaded)"))
    }

    // ── Import / export ─────────────────────────────────────────────────────

    /// Replace all associations with the contents of an association file.
    ///
    /// The input is fully parsed before anything changes. Tag names not yet
    /// registered are appended to the registry in first-seen order.
    /// Returns the number of images read.
    pub fn import_associations<R: Read>(&mut self, reader: R) -> Result<usize, CodecError> {
        let store = self.codec.import(reader)?;
        Ok(self.replace_store(store))
    }

    pub fn import_from_path(&mut self, path: &Path) -> Result<usize, CodecError> {
        let store = self.codec.import_from_path(path)?;
        Ok(self.replace_store(store))
    }

    /// Write every stored association. Returns the number of rows.
    pub fn export_associations<W: Write>(&self, writer: W) -> Result<usize, CodecError> {
        self.codec.export(&self.store, writer)
    }

    pub fn export_to_path(&self, path: &Path) -> Result<usize, CodecError> {
        self.codec.export_to_path(&self.store, path)
    }

    fn replace_store(&mut self, store: AssociationStore) -> usize {
        let new_tags = store
            .distinct_tags()
            .into_iter()
            .filter(|tag| self.registry.add(tag))
            .count();
        self.store = store;
        self.registry.recount(&self.store);
        tracing::debug!("Registered {} tag(s) from import", new_tags);
        self.store.len()
    }
}
