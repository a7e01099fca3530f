//! Command implementations.

pub mod config;
pub mod encode;
pub mod interactive;
pub mod stats;
pub mod tag;
