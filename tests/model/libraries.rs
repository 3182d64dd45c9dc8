//! Tests for Library snapshots and traversal.

use std::sync::Arc;

use ferrobind_foundation::Diagnostic;
use ferrobind_model::{Declaration, Library, Path, Primitive, TypeReference};

fn nested_library() -> Library {
    let record = Declaration::record("Outer")
        .member(Declaration::normal_field("a", Primitive::Int.into()))
        .member(
            Declaration::record("Inner")
                .member(Declaration::normal_field("b", Primitive::Int.into()))
                .build(),
        )
        .build();
    let function = Declaration::function("f", TypeReference::Void).build();
    Library::new([record, function])
}

#[test]
fn snapshot_identity_is_not_structural_equality() {
    let library = nested_library();
    let clone = library.clone();
    assert!(Library::same(&library, &clone));

    let rebuilt = library.with_declarations(library.declarations().clone());
    assert!(!Library::same(&library, &rebuilt));
}

#[test]
fn for_each_visits_parents_before_children() {
    let library = nested_library();
    let mut names = Vec::new();
    library.for_each(&mut |_, declaration| names.push(declaration.name().to_string()));
    assert_eq!(names, ["Outer", "a", "Inner", "b", "f"]);
}

#[test]
fn for_each_paths_track_ancestry() {
    let library = nested_library();
    let mut deepest: Option<Path> = None;
    library.for_each(&mut |path, declaration| {
        if declaration.name() == "b" {
            deepest = Some(path.clone());
        }
    });
    let path = deepest.unwrap();
    assert_eq!(path.len(), 2);
    assert_eq!(path.qualify("b"), "Outer::Inner::b");
}

#[test]
fn find_by_id_reaches_nested_declarations() {
    let inner_field = Declaration::normal_field("deep", Primitive::Int.into());
    let id = inner_field.id();
    let record = Declaration::record("Outer")
        .member(Declaration::record("Inner").member(inner_field).build())
        .build();
    let library = Library::new([record]);

    let resolved = library.find_by_id(id).unwrap();
    assert_eq!(resolved.declaration.name(), "deep");
    assert_eq!(resolved.path.len(), 2);
}

#[test]
fn has_errors_sees_nested_diagnostics() {
    let clean = nested_library();
    assert!(!clean.has_errors());

    let flagged = Declaration::record("Outer")
        .member(
            Declaration::normal_field("bad", Primitive::Int.into())
                .with_diagnostics([Diagnostic::error("untranslatable")]),
        )
        .build();
    let library = Library::new([flagged]);
    assert!(library.has_errors());
}

#[test]
fn path_contains_is_identity_based() {
    let record = Declaration::record("A").build();
    let lookalike = Declaration::record("A").build();
    let path = Path::root().push(Arc::clone(&record));
    assert!(path.contains(&record));
    assert!(!path.contains(&lookalike));
}
