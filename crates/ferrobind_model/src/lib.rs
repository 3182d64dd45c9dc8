//! The ferrobind declaration data model.
//!
//! This crate provides:
//! - [`DeclKind`] / [`TypeKind`] - Closed kind hierarchies with parent chains
//! - [`schema`] - Per-kind slot tables consumed by the generic engine
//! - [`Declaration`] - Immutable, schema-shaped tree nodes
//! - [`TypeReference`] - Immutable type descriptors
//! - [`DeclarationReference`] - Lazily-resolving, cached cross-tree references
//! - [`Library`] / [`Context`] / [`Path`] - Root snapshots and traversal state
//!
//! All containers use persistent collections, so rebuilding a tree with a
//! handful of changed nodes shares everything else with the previous
//! snapshot. Reference equality (`Arc::ptr_eq`) of unchanged nodes is a
//! guaranteed, observable property that later passes depend on.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod declaration;
pub mod kind;
pub mod library;
pub mod reference;
pub mod schema;
pub mod type_reference;

pub use context::{Context, Path};
pub use declaration::{DeclSlot, Declaration, DeclarationBuilder, TypeSlot};
pub use kind::{DeclKind, TypeKind};
pub use library::Library;
pub use reference::{DeclarationReference, Resolved};
pub use schema::{SlotShape, SlotSpec, TypeSlotShape, TypeSlotSpec};
pub use type_reference::{FunctionPointerType, Primitive, TypeReference};
