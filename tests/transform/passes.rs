//! The bundled common transformations.

use std::sync::Arc;

use ferrobind_foundation::{Diagnostic, Marker};
use ferrobind_model::{Declaration, Library, Primitive, TypeReference};
use ferrobind_transform::{
    transform, AutoNameUnnamedParameters, SimpleTransformation, TransformResult,
};

#[test]
fn unnamed_parameters_are_numbered_by_position() {
    let function = Declaration::function("memcpy_like", TypeReference::Void)
        .parameter(Declaration::parameter(
            "",
            TypeReference::pointer_to(TypeReference::Void),
        ))
        .parameter(Declaration::parameter(
            "",
            TypeReference::pointer_to(TypeReference::Void),
        ))
        .parameter(Declaration::parameter("count", Primitive::UnsignedLong.into()))
        .build();
    let library = Library::new([function]);

    let result = transform(&mut AutoNameUnnamedParameters, &library).unwrap();
    let names: Vec<_> = result.declarations()[0]
        .parameters()
        .unwrap()
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(names, ["arg0", "arg1", "count"]);
}

#[test]
fn fully_named_functions_share_with_the_input() {
    let function = Declaration::function("f", TypeReference::Void)
        .parameter(Declaration::parameter("x", Primitive::Int.into()))
        .build();
    let library = Library::new([function]);
    let result = transform(&mut AutoNameUnnamedParameters, &library).unwrap();
    assert!(Library::same(&library, &result));
}

#[test]
fn closure_pass_can_mark_and_annotate() {
    let library = Library::new([
        Declaration::record("Detail").build(),
        Declaration::record("Public").build(),
    ]);

    let mut hide_detail = SimpleTransformation::new().on_declaration(|_cx, declaration| {
        if declaration.name() == "Detail" {
            declaration
                .with_marker(Marker::HideFromOutput)
                .with_diagnostics([Diagnostic::note("implementation detail")])
                .into()
        } else {
            declaration.into()
        }
    });

    let result = transform(&mut hide_detail, &library).unwrap();
    let detail = &result.declarations()[0];
    assert!(detail.metadata().has(Marker::HideFromOutput));
    assert_eq!(detail.diagnostics().len(), 1);
    // The untouched sibling is shared.
    assert!(Arc::ptr_eq(
        &result.declarations()[1],
        &library.declarations()[1]
    ));
}

#[test]
fn closure_pass_can_delete() {
    let library = Library::new([
        Declaration::record("Keep").build(),
        Declaration::record("Drop").build(),
    ]);

    let mut drop_pass = SimpleTransformation::new().on_declaration(|_cx, declaration| {
        if declaration.name() == "Drop" {
            TransformResult::Remove
        } else {
            declaration.into()
        }
    });

    let result = transform(&mut drop_pass, &library).unwrap();
    assert_eq!(result.declarations().len(), 1);
    assert_eq!(result.declarations()[0].name(), "Keep");
}
