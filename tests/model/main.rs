//! Integration tests for Layer 1: Model
//!
//! Tests for declaration nodes, the slot schema, type references,
//! libraries, and lazy reference resolution.

#![recursion_limit = "256"]

mod libraries;
