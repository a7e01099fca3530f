//! Sub-configuration structs and their defaults.

use serde::{Deserialize, Serialize};

/// Image folder discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File name suffixes treated as images
    pub supported_suffixes: Vec<String>,

    /// Match suffixes case-sensitively (`a.PNG` is skipped when true)
    pub case_sensitive: bool,

    /// Descend into subfolders
    pub recursive: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            supported_suffixes: vec![".png".to_string(), ".jpg".to_string(), ".jpeg".to_string()],
            case_sensitive: true,
            recursive: false,
        }
    }
}

/// Separator placed between tag names inside the `Tags` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagDelimiter {
    /// Single space (`cat dog`)
    #[default]
    Space,
    /// Single comma (`cat,dog`), quoted by the CSV writer
    Comma,
}

impl TagDelimiter {
    pub fn as_char(self) -> char {
        match self {
            TagDelimiter::Space => ' ',
            TagDelimiter::Comma => ',',
        }
    }
}

impl std::fmt::Display for TagDelimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagDelimiter::Space => write!(f, "space"),
            TagDelimiter::Comma => write!(f, "comma"),
        }
    }
}

/// Association file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Delimiter used for both export and import
    pub delimiter: TagDelimiter,
}

/// One-hot encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Name of the multi-label column
    pub tags_column: String,

    /// Clamp per-row values to 0/1 instead of token counts
    pub binary: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            tags_column: "Tags".to_string(),
            binary: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: pretty, json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
