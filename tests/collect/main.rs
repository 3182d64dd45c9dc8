//! Integration tests for the lazy-declaration collector
//!
//! Tests for reachability marking, ancestor rescue, idempotence, and the
//! end-to-end synthesized-type scenario.
