//! The ferrobind transformation engine.
//!
//! This crate provides:
//! - [`Transformation`] - Per-kind handler trait with parent-kind fallback
//! - [`transform`] / [`transform_types`] - The rewrite drivers
//! - [`helpers`] - Slot helpers with change detection and overflow
//! - [`LazyDeclarationCollector`] - Reachability sweep for synthesized nodes
//! - [`common`] - Small reusable transformations
//!
//! A pass never mutates the tree: it maps a [`Library`] snapshot to a
//! new one, returning the input snapshot itself when nothing changed.
//!
//! [`Library`]: ferrobind_model::Library

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collect;
pub mod common;
pub mod engine;
pub mod helpers;
pub mod result;
pub mod transformation;

pub use collect::{collect, LazyDeclarationCollector};
pub use common::{AutoNameUnnamedParameters, SimpleTransformation};
pub use engine::{transform, transform_types, transform_with, TransformOptions};
pub use result::{TransformResult, TypeTransformResult};
pub use transformation::Transformation;
