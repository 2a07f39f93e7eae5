//! Utility functions shared across the alsym crates.

pub mod path;

pub use path::sanitize_name;
