//! Foundation types for the ferrobind transformation core.
//!
//! This crate provides:
//! - [`Diagnostic`] / [`Severity`] - Per-declaration diagnostic messages
//! - [`DeclarationId`] - Stable, process-unique declaration identifiers
//! - [`Metadata`] / [`Marker`] - Lightweight declaration markers
//! - [`TransformError`] - Fatal structural invariant violations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostic;
pub mod error;
pub mod id;
pub mod metadata;

pub use diagnostic::{Diagnostic, Severity};
pub use error::TransformError;
pub use id::DeclarationId;
pub use metadata::{Marker, Metadata};

/// Convenient result alias for operations that can hit a structural
/// invariant violation.
pub type Result<T> = std::result::Result<T, TransformError>;
