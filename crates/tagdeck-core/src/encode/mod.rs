//! One-hot encoding of multi-label CSV datasets.
//!
//! Operates on arbitrary external tables, independently of any tagging
//! session.

pub mod dataset;
pub mod onehot;

pub use dataset::Dataset;
pub use onehot::{EncodeSummary, OneHotEncoder, ValueMode};
