//! tfd-core: stable foundation for thermofade.
//!
//! Contains:
//! - ids (stable compact handles for registered devices)

pub mod ids;

// Re-exports: nice ergonomics for downstream crates
pub use ids::*;
