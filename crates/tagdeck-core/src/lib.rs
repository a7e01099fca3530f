//! tagdeck core - multi-label image tagging library.
//!
//! Tracks which tags apply to which images, keeps per-tag usage counts
//! consistent, persists associations as CSV, and one-hot encodes multi-label
//! datasets for training-set preparation.
//!
//! # Architecture
//!
//! ```text
//! folder → ImageDiscovery → Session { TagRegistry, AssociationStore, Cursor }
//!                                   ↕ AssociationCodec (Image Path,Tags CSV)
//!
//! dataset.csv → OneHotEncoder → encoded.csv      (independent of any session)
//! ```
//!
//! Everything is synchronous and single-threaded; each call runs to
//! completion before returning.
//!
//! # Usage
//!
//! ```rust,no_run
//! use tagdeck_core::{AssociationCodec, Config, ImageDiscovery, Session};
//!
//! fn main() -> tagdeck_core::Result<()> {
//!     let config = Config::load()?;
//!     let images = ImageDiscovery::new(config.discovery.clone())
//!         .discover(std::path::Path::new("./photos"));
//!
//!     let mut session = Session::new(AssociationCodec::from_config(&config.codec));
//!     session.load_images(&images);
//!     session.add_tag("cat")?;
//!     session.toggle_current("cat")?;
//!     session.export_to_path(std::path::Path::new("tags.csv"))?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod codec;
pub mod config;
pub mod discovery;
pub mod encode;
pub mod error;
pub mod output;
pub mod session;
pub mod tagging;

// Re-exports for convenient access
pub use codec::AssociationCodec;
pub use config::{Config, TagDelimiter};
pub use discovery::ImageDiscovery;
pub use encode::{Dataset, EncodeSummary, OneHotEncoder, ValueMode};
pub use error::{
    CodecError, ConfigError, EncodeError, Result, SessionError, SessionResult, TagdeckError,
};
pub use output::{OutputFormat, TagCount, TagReport};
pub use session::{Cursor, Session};
pub use tagging::{AssociationStore, Tag, TagRegistry, TagSet};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_tagging_to_encoding_flow() {
        // Exported associations feed straight into the encoder
        let mut session = Session::default();
        session.load_images(&[
            std::path::PathBuf::from("img1.png"),
            std::path::PathBuf::from("img2.png"),
        ]);
        session.add_tag("cat").unwrap();
        session.add_tag("dog").unwrap();
        session.set_current_tags(["cat", "dog"]).unwrap();
        session.next();
        session.set_current_tags(["dog"]).unwrap();

        let mut exported = Vec::new();
        session.export_associations(&mut exported).unwrap();

        let dataset = Dataset::read(exported.as_slice()).unwrap();
        let encoded = OneHotEncoder::default().encode(&dataset).unwrap();

        assert_eq!(encoded.headers(), &["Image Path", "cat", "dog"]);
        assert_eq!(encoded.get(0, "cat"), Some("1"));
        assert_eq!(encoded.get(1, "cat"), Some("0"));
        assert_eq!(encoded.get(1, "dog"), Some("1"));
    }
}
