//! Overflow redistribution into catch-all slots.

use std::sync::Arc;

use ferrobind_foundation::TransformError;
use ferrobind_model::{
    Context, DeclKind, DeclSlot, Declaration, DeclarationBuilder, Library, Primitive,
    TypeReference, TypeSlot,
};
use ferrobind_transform::helpers::SingleSlotHelper;
use ferrobind_transform::{transform, TransformResult, Transformation};

fn vtable_field() -> Arc<Declaration> {
    DeclarationBuilder::new(DeclKind::VTableField, "__vptr")
        .type_slot(
            "field_type",
            TypeSlot::Single(TypeReference::pointer_to(TypeReference::Void)),
        )
        .build()
}

/// Replaces the vtable-pointer field with two of them.
struct DuplicateVPtr;
impl Transformation for DuplicateVPtr {
    fn transform_vtable_field(
        &mut self,
        _context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        TransformResult::Many(vec![
            declaration.with_name("__vptr_primary"),
            declaration.with_name("__vptr_secondary"),
        ])
    }
}

#[test]
fn first_result_stays_second_overflows_to_the_catch_all() {
    let record = Declaration::record("Poly")
        .member(Declaration::normal_field("data", Primitive::Int.into()))
        .decl_slot("vtable_field", DeclSlot::Optional(Some(vtable_field())))
        .build();
    let library = Library::new([record]);

    let result = transform(&mut DuplicateVPtr, &library).unwrap();
    let record = &result.declarations()[0];

    // The slot keeps the first replacement.
    match record.decl_slot("vtable_field") {
        Some(DeclSlot::Optional(Some(kept))) => assert_eq!(kept.name(), "__vptr_primary"),
        other => panic!("unexpected slot value: {other:?}"),
    }
    // The second lands after the existing members.
    let members: Vec<_> = record
        .members()
        .unwrap()
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(members, ["data", "__vptr_secondary"]);
}

#[test]
fn the_single_slot_helper_reports_the_change() {
    let original = vtable_field();
    let mut helper = SingleSlotHelper::new(Some(&original), DeclKind::VTableField);
    helper.set(TransformResult::Many(vec![
        original.with_name("a"),
        original.with_name("b"),
    ]));
    assert!(helper.was_changed());
    let (value, overflow) = helper.into_parts();
    assert_eq!(value.unwrap().name(), "a");
    assert_eq!(overflow.len(), 1);
    assert_eq!(overflow[0].name(), "b");
}

#[test]
fn overflow_with_no_catch_all_aborts_instead_of_dropping() {
    // A vtable's entries cannot hold a record, and VTable has no
    // catch-all.
    let entry = DeclarationBuilder::new(DeclKind::VTableEntry, "dtor")
        .type_slot(
            "pointee_type",
            TypeSlot::Single(TypeReference::function_pointer(TypeReference::Void, [])),
        )
        .build();
    let vtable = DeclarationBuilder::new(DeclKind::VTable, "vtable")
        .decl_slot("entries", DeclSlot::List([entry].into_iter().collect()))
        .build();
    let record = Declaration::record("Poly")
        .decl_slot("vtable", DeclSlot::Optional(Some(vtable)))
        .build();
    let library = Library::new([record]);

    struct Corrupt;
    impl Transformation for Corrupt {
        fn transform_vtable_entry(
            &mut self,
            _context: &Context,
            _declaration: &Arc<Declaration>,
        ) -> TransformResult {
            Declaration::record("NotAnEntry").build().into()
        }
    }

    let error = transform(&mut Corrupt, &library).unwrap_err();
    match error {
        TransformError::MissingCatchAll {
            parent,
            slot,
            count,
        } => {
            assert!(parent.contains("vtable"));
            assert_eq!(slot, "entries");
            assert_eq!(count, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn deletion_of_an_optional_slot_is_not_overflow() {
    let record = Declaration::record("Poly")
        .decl_slot("vtable_field", DeclSlot::Optional(Some(vtable_field())))
        .build();
    let library = Library::new([record]);

    struct DropVPtr;
    impl Transformation for DropVPtr {
        fn transform_vtable_field(
            &mut self,
            _context: &Context,
            _declaration: &Arc<Declaration>,
        ) -> TransformResult {
            TransformResult::Remove
        }
    }

    let result = transform(&mut DropVPtr, &library).unwrap();
    let record = &result.declarations()[0];
    assert!(matches!(
        record.decl_slot("vtable_field"),
        Some(DeclSlot::Optional(None))
    ));
    assert!(record.members().unwrap().is_empty());
}

#[test]
fn splits_inside_the_catch_all_need_no_redistribution() {
    let record = Declaration::record("Mixed")
        .member(Declaration::normal_field("both", Primitive::Int.into()))
        .build();
    let library = Library::new([record]);

    struct SplitIntoFieldAndGetter;
    impl Transformation for SplitIntoFieldAndGetter {
        fn transform_normal_field(
            &mut self,
            _context: &Context,
            declaration: &Arc<Declaration>,
        ) -> TransformResult {
            TransformResult::Many(vec![
                Arc::clone(declaration),
                Declaration::function("get_both", Primitive::Int.into()).build(),
            ])
        }
    }

    let result = transform(&mut SplitIntoFieldAndGetter, &library).unwrap();
    let members = result.declarations()[0].members().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0].name(), "both");
    assert_eq!(members[1].name(), "get_both");
}
