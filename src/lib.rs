//! Ferrobind - Declaration-tree transformation core
//!
//! This crate re-exports all layers of the ferrobind core for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: ferrobind_transform  — Rewrite engine, slot helpers, collector
//! Layer 1: ferrobind_model      — Declarations, schema, types, resolution
//! Layer 0: ferrobind_foundation — Core types (Diagnostic, DeclarationId, Error)
//! ```

pub use ferrobind_foundation as foundation;
pub use ferrobind_model as model;
pub use ferrobind_transform as transform;
