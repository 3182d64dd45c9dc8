//! Integration tests for Layer 0: Foundation
//!
//! Tests for diagnostics, declaration identifiers, metadata markers, and
//! the structural error type.

mod diagnostics;
mod errors;
mod ids;
mod metadata;
