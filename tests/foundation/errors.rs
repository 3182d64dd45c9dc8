//! Tests for TransformError.

use ferrobind_foundation::{DeclarationId, TransformError};

#[test]
fn missing_catch_all_names_parent_slot_and_count() {
    let err = TransformError::MissingCatchAll {
        parent: "function `area`".to_string(),
        slot: "parameters",
        count: 3,
    };
    let msg = format!("{err}");
    assert!(msg.contains("function `area`"));
    assert!(msg.contains("parameters"));
    assert!(msg.contains('3'));
}

#[test]
fn empty_required_slot_names_the_slot() {
    let err = TransformError::EmptyRequiredSlot {
        parent: "record `Derived`".to_string(),
        slot: "non_virtual_base",
    };
    assert!(format!("{err}").contains("non_virtual_base"));
}

#[test]
fn fixed_arity_mismatch_reports_both_counts() {
    let err = TransformError::FixedArityMismatch {
        slot: "arguments",
        expected: 2,
        actual: 1,
    };
    let msg = format!("{err}");
    assert!(msg.contains('2'));
    assert!(msg.contains('1'));
}

#[test]
fn errors_implement_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(TransformError::Cancelled);
    assert_eq!(err.to_string(), "transformation cancelled");

    let err = TransformError::PreResolvedLibraryMismatch {
        declaration: DeclarationId::fresh(),
    };
    assert!(err.to_string().contains("pre-resolved"));
}
