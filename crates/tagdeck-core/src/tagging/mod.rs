//! Tag registry and image-tag associations.
//!
//! The registry owns the ordered list of tag names; the store owns which tags
//! apply to which image. Counts shown next to each tag are derived from the
//! store, never stored independently.

pub mod registry;
pub mod store;

pub use registry::{Tag, TagRegistry};
pub use store::{AssociationStore, TagSet};
