//! The static track catalog.
//!
//! Tracks are read once at startup, either from a TOML file named in the
//! settings or from the catalog built into the binary, and never change
//! afterwards.

mod load;
mod model;

pub use load::resolve_source;
pub use model::*;
