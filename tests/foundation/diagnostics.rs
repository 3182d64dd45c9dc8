//! Tests for Diagnostic and Severity.

use ferrobind_foundation::{Diagnostic, Severity};

// =============================================================================
// Severity
// =============================================================================

#[test]
fn severities_order_by_seriousness() {
    let mut severities = vec![Severity::Error, Severity::Note, Severity::Warning];
    severities.sort();
    assert_eq!(
        severities,
        [Severity::Note, Severity::Warning, Severity::Error]
    );
}

#[test]
fn severity_display() {
    assert_eq!(format!("{}", Severity::Note), "note");
    assert_eq!(format!("{}", Severity::Warning), "warning");
    assert_eq!(format!("{}", Severity::Error), "error");
}

// =============================================================================
// Diagnostic
// =============================================================================

#[test]
fn constructors_set_the_severity() {
    assert_eq!(Diagnostic::note("m").severity, Severity::Note);
    assert_eq!(Diagnostic::warning("m").severity, Severity::Warning);
    assert_eq!(Diagnostic::error("m").severity, Severity::Error);
}

#[test]
fn only_error_level_counts_as_error() {
    assert!(Diagnostic::error("bad").is_error());
    assert!(!Diagnostic::warning("odd").is_error());
    assert!(!Diagnostic::note("fyi").is_error());
}

#[test]
fn diagnostics_are_value_equal() {
    assert_eq!(Diagnostic::warning("same"), Diagnostic::warning("same"));
    assert_ne!(Diagnostic::warning("same"), Diagnostic::error("same"));
    assert_ne!(Diagnostic::warning("a"), Diagnostic::warning("b"));
}

#[test]
fn display_includes_severity_and_message() {
    let d = Diagnostic::error("cannot translate bit-field");
    assert_eq!(format!("{d}"), "error: cannot translate bit-field");
}
