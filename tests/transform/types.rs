//! The type-reference pass and fixed-arity enforcement.

use std::sync::Arc;

use ferrobind_foundation::{Diagnostic, Severity, TransformError};
use ferrobind_model::{
    Context, DeclKind, Declaration, DeclarationBuilder, Library, Primitive, TypeReference,
    TypeSlot,
};
use ferrobind_transform::helpers::TypeListHelper;
use ferrobind_transform::{
    transform, transform_types, TransformResult, Transformation, TypeTransformResult,
};

/// Rewrites `int` to `long` wherever it appears.
struct WidenInt;
impl Transformation for WidenInt {
    fn transform_primitive(
        &mut self,
        _context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        if *reference == TypeReference::Primitive(Primitive::Int) {
            TypeTransformResult::new(Primitive::Long.into())
        } else {
            reference.clone().into()
        }
    }
}

fn template_specialization(arguments: Vec<TypeReference>) -> Arc<Declaration> {
    DeclarationBuilder::new(DeclKind::TemplateSpecialization, "Pair")
        .type_slot("arguments", TypeSlot::List(arguments.into_iter().collect()))
        .build()
}

// =============================================================================
// Fixed-arity type lists
// =============================================================================

#[test]
fn replacing_each_element_one_for_one_succeeds() {
    let specialization =
        template_specialization(vec![Primitive::Int.into(), Primitive::Float.into()]);
    let library = Library::new([specialization]);

    let result = transform(&mut WidenInt, &library).unwrap();
    match result.declarations()[0].type_slot("arguments") {
        Some(TypeSlot::List(arguments)) => {
            assert_eq!(arguments.len(), 2);
            assert_eq!(arguments[0], TypeReference::Primitive(Primitive::Long));
            assert_eq!(arguments[1], TypeReference::Primitive(Primitive::Float));
        }
        other => panic!("unexpected slot value: {other:?}"),
    }
}

#[test]
fn shrinking_a_two_element_list_aborts() {
    let original: im::Vector<TypeReference> =
        [Primitive::Int.into(), Primitive::Float.into()].into_iter().collect();
    let mut helper = TypeListHelper::new(&original, "arguments");
    helper.add(TypeReference::from(Primitive::Int).into());
    match helper.finish() {
        Err(TransformError::FixedArityMismatch {
            slot,
            expected,
            actual,
        }) => {
            assert_eq!(slot, "arguments");
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        other => panic!("expected arity error, got {other:?}"),
    }
}

#[test]
fn growing_a_two_element_list_aborts() {
    let original: im::Vector<TypeReference> =
        [Primitive::Int.into(), Primitive::Float.into()].into_iter().collect();
    let mut helper = TypeListHelper::new(&original, "arguments");
    helper.add(TypeReference::from(Primitive::Int).into());
    helper.add(TypeReference::from(Primitive::Float).into());
    helper.add(TypeReference::Void.into());
    assert!(matches!(
        helper.finish(),
        Err(TransformError::FixedArityMismatch {
            expected: 2,
            actual: 3,
            ..
        })
    ));
}

#[test]
fn unchanged_fixed_lists_are_shared() {
    let specialization =
        template_specialization(vec![Primitive::Double.into(), Primitive::Float.into()]);
    let library = Library::new([specialization]);
    let result = transform(&mut WidenInt, &library).unwrap();
    assert!(Library::same(&library, &result));
}

// =============================================================================
// Composite rewriting
// =============================================================================

#[test]
fn nested_composites_are_rewritten_bottom_up() {
    let nested = TypeReference::pointer_to(TypeReference::reference_to(
        TypeReference::function_pointer(
            Primitive::Int.into(),
            [TypeReference::pointer_to(Primitive::Int.into())],
        ),
    ));
    let typedef = Declaration::typedef("deep", nested);
    let library = Library::new([typedef]);

    let result = transform(&mut WidenInt, &library).unwrap();
    let expected = TypeReference::pointer_to(TypeReference::reference_to(
        TypeReference::function_pointer(
            Primitive::Long.into(),
            [TypeReference::pointer_to(Primitive::Long.into())],
        ),
    ));
    match result.declarations()[0].type_slot("aliased_type") {
        Some(TypeSlot::Single(actual)) => assert_eq!(*actual, expected),
        other => panic!("unexpected slot value: {other:?}"),
    }
}

#[test]
fn outer_handlers_see_already_rewritten_inners() {
    struct Flatten;
    impl Transformation for Flatten {
        fn transform_primitive(
            &mut self,
            _context: &Context,
            reference: &TypeReference,
        ) -> TypeTransformResult {
            if *reference == TypeReference::Primitive(Primitive::Int) {
                TypeTransformResult::new(Primitive::Long.into())
            } else {
                reference.clone().into()
            }
        }

        fn transform_pointer(
            &mut self,
            _context: &Context,
            reference: &TypeReference,
        ) -> TypeTransformResult {
            // Fires after the pointee was transformed: a pointer to the
            // already-widened long collapses to the pointee.
            if let TypeReference::Pointer(inner) = reference {
                if **inner == TypeReference::Primitive(Primitive::Long) {
                    return TypeTransformResult::new((**inner).clone());
                }
            }
            reference.clone().into()
        }
    }

    let typedef = Declaration::typedef("p", TypeReference::pointer_to(Primitive::Int.into()));
    let library = Library::new([typedef]);
    let result = transform(&mut Flatten, &library).unwrap();
    match result.declarations()[0].type_slot("aliased_type") {
        Some(TypeSlot::Single(actual)) => {
            assert_eq!(*actual, TypeReference::Primitive(Primitive::Long));
        }
        other => panic!("unexpected slot value: {other:?}"),
    }
}

// =============================================================================
// Diagnostics and the standalone type pass
// =============================================================================

#[test]
fn type_diagnostics_attach_to_the_owning_declaration() {
    struct Complain;
    impl Transformation for Complain {
        fn transform_by_reference(
            &mut self,
            _context: &Context,
            reference: &TypeReference,
        ) -> TypeTransformResult {
            TypeTransformResult::new(reference.clone())
                .with_diagnostic(Diagnostic::warning("reference parameters decay to pointers"))
        }
    }

    let function = Declaration::function("f", TypeReference::Void)
        .parameter(Declaration::parameter(
            "x",
            TypeReference::reference_to(Primitive::Int.into()),
        ))
        .build();
    let library = Library::new([function]);

    let result = transform(&mut Complain, &library).unwrap();
    let parameter = &result.declarations()[0].parameters().unwrap()[0];
    assert_eq!(parameter.diagnostics().len(), 1);
    assert_eq!(parameter.diagnostics()[0].severity, Severity::Warning);
}

#[test]
fn transform_types_leaves_declarations_alone() {
    struct RenameEverything;
    impl Transformation for RenameEverything {
        fn transform_declaration(
            &mut self,
            _context: &Context,
            declaration: &Arc<Declaration>,
        ) -> TransformResult {
            declaration.with_name("should_not_happen").into()
        }

        fn transform_primitive(
            &mut self,
            _context: &Context,
            _reference: &TypeReference,
        ) -> TypeTransformResult {
            TypeTransformResult::new(Primitive::Bool.into())
        }
    }

    let typedef = Declaration::typedef("t", Primitive::Char.into());
    let library = Library::new([typedef]);
    let result = transform_types(&mut RenameEverything, &library).unwrap();

    let typedef = &result.declarations()[0];
    assert_eq!(typedef.name(), "t");
    assert!(matches!(
        typedef.type_slot("aliased_type"),
        Some(TypeSlot::Single(TypeReference::Primitive(Primitive::Bool)))
    ));
}
