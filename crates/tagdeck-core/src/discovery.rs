//! Image discovery for a chosen folder.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::DiscoveryConfig;

/// Lists the image files of a folder.
pub struct ImageDiscovery {
    config: DiscoveryConfig,
}

impl ImageDiscovery {
    /// Create a new discovery instance.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Discover all supported images in `folder`.
    ///
    /// Only the folder itself is listed unless `recursive` is set. Unreadable
    /// entries are skipped. Results are sorted by path for deterministic
    /// ordering.
    pub fn discover(&self, folder: &Path) -> Vec<PathBuf> {
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };

        let mut files: Vec<PathBuf> = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported(e.path()))
            .map(|e| e.into_path())
            .collect();

        files.sort();
        tracing::debug!("Found {} image(s) in {}", files.len(), folder.display());
        files
    }

    /// Check if a file name ends with a supported suffix.
    fn is_supported(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if self.config.case_sensitive {
            self.config
                .supported_suffixes
                .iter()
                .any(|suffix| name.ends_with(suffix.as_str()))
        } else {
            let name = name.to_lowercase();
            self.config
                .supported_suffixes
                .iter()
                .any(|suffix| name.ends_with(&suffix.to_lowercase()))
        }
    }
}

/// Render a path as the identifier used by the association store.
pub fn image_id(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
