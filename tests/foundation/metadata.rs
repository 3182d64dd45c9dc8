//! Tests for Marker and Metadata.

use ferrobind_foundation::{Marker, Metadata};

#[test]
fn empty_metadata_has_nothing() {
    let m = Metadata::new();
    assert!(m.is_empty());
    assert!(!m.has(Marker::LazilyGenerated));
    assert!(!m.has(Marker::HideFromOutput));
}

#[test]
fn with_is_persistent() {
    let empty = Metadata::new();
    let marked = empty.with(Marker::LazilyGenerated);
    assert!(empty.is_empty());
    assert!(marked.has(Marker::LazilyGenerated));
}

#[test]
fn insertion_order_does_not_affect_equality() {
    let a = Metadata::new()
        .with(Marker::LazilyGenerated)
        .with(Marker::HideFromOutput);
    let b = Metadata::new()
        .with(Marker::HideFromOutput)
        .with(Marker::LazilyGenerated);
    assert_eq!(a, b);
}

#[test]
fn duplicate_insertion_is_a_no_op() {
    let once = Metadata::new().with(Marker::HideFromOutput);
    let twice = once.with(Marker::HideFromOutput);
    assert_eq!(once, twice);
    assert_eq!(twice.iter().count(), 1);
}

#[test]
fn without_removes_only_the_named_marker() {
    let both = Metadata::new()
        .with(Marker::LazilyGenerated)
        .with(Marker::HideFromOutput);
    let one = both.without(Marker::LazilyGenerated);
    assert!(!one.has(Marker::LazilyGenerated));
    assert!(one.has(Marker::HideFromOutput));
}
