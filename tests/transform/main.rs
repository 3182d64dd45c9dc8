//! Integration tests for Layer 2: Transformation engine
//!
//! Tests for the rewrite driver, structural sharing, overflow
//! redistribution, the type-reference pass, and the bundled common
//! transformations.

mod overflow;
mod passes;
mod types;
