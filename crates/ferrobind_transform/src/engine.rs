//! The generic rewrite driver.
//!
//! The engine walks a [`Library`] snapshot depth-first, dispatches each
//! node to the [`Transformation`] handler for its concrete kind, and
//! rebuilds the tree bottom-up through the slot helpers. Subtrees that
//! no handler touched are shared with the input snapshot; a pass that
//! changes nothing returns the input snapshot itself.
//!
//! Child slots are driven entirely by the schema tables in
//! [`ferrobind_model::schema`], so new kinds need schema entries and a
//! handler method, never engine changes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use ferrobind_foundation::{Diagnostic, Result, TransformError};
use ferrobind_model::{
    schema, Context, DeclKind, DeclSlot, Declaration, FunctionPointerType, Library, TypeKind,
    TypeReference, TypeSlot,
};

use crate::helpers::{ListSlotHelper, SingleSlotHelper, TypeListHelper};
use crate::result::{TransformResult, TypeTransformResult};
use crate::transformation::Transformation;

/// Options controlling a single engine run.
#[derive(Clone, Debug, Default)]
pub struct TransformOptions {
    /// Cooperative cancellation flag, checked between top-level
    /// declarations. When it reads true the run aborts with
    /// [`TransformError::Cancelled`] and the input library is unchanged.
    pub cancel: Option<Arc<AtomicBool>>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Full,
    TypesOnly,
}

/// Runs a transformation pass over the library.
///
/// # Errors
/// Propagates structural errors ([`TransformError::MissingCatchAll`],
/// [`TransformError::EmptyRequiredSlot`], ...) and any error from the
/// pass's pre/post hooks.
pub fn transform<T: Transformation + ?Sized>(
    transformation: &mut T,
    library: &Library,
) -> Result<Library> {
    run(transformation, library, &TransformOptions::default(), Mode::Full)
}

/// Runs a transformation pass with explicit options.
///
/// # Errors
/// As [`transform`], plus [`TransformError::Cancelled`] when the
/// options' cancel flag is raised.
pub fn transform_with<T: Transformation + ?Sized>(
    transformation: &mut T,
    library: &Library,
    options: &TransformOptions,
) -> Result<Library> {
    run(transformation, library, options, Mode::Full)
}

/// Runs only the type-reference handlers of a pass.
///
/// Declaration handlers are not dispatched; every node is kept and its
/// type-reference slots rewritten in place. Useful for passes that remap
/// types without restructuring the tree.
///
/// # Errors
/// As [`transform`].
pub fn transform_types<T: Transformation + ?Sized>(
    transformation: &mut T,
    library: &Library,
) -> Result<Library> {
    run(transformation, library, &TransformOptions::default(), Mode::TypesOnly)
}

fn check_cancelled(options: &TransformOptions) -> Result<()> {
    if options
        .cancel
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::Relaxed))
    {
        return Err(TransformError::Cancelled);
    }
    Ok(())
}

fn run<T: Transformation + ?Sized>(
    transformation: &mut T,
    library: &Library,
    options: &TransformOptions,
    mode: Mode,
) -> Result<Library> {
    let library = transformation.pre_transform(library)?;
    let cx = Context::new(library.clone());

    let mut helper = ListSlotHelper::new(library.declarations(), DeclKind::Declaration);
    for declaration in library.declarations() {
        check_cancelled(options)?;
        helper.add(transform_node(transformation, &cx, declaration, mode)?);
    }
    helper.finish();

    let transformed = if helper.was_changed() {
        library.with_declarations(helper.into_vector())
    } else {
        library
    };
    transformation.post_transform(&transformed)
}

/// Transforms one node: dispatch, then type slots and child slots of
/// every node the handler produced.
fn transform_node<T: Transformation + ?Sized>(
    transformation: &mut T,
    cx: &Context,
    declaration: &Arc<Declaration>,
    mode: Mode,
) -> Result<TransformResult> {
    let dispatched = match mode {
        Mode::Full => dispatch(transformation, cx, declaration),
        Mode::TypesOnly => declaration.into(),
    };

    match dispatched {
        TransformResult::Remove => Ok(TransformResult::Remove),
        TransformResult::One(node) => {
            Ok(finish_node(transformation, cx, node, mode)?.into())
        }
        TransformResult::Many(nodes) => {
            let mut finished = Vec::with_capacity(nodes.len());
            for node in nodes {
                finished.push(finish_node(transformation, cx, node, mode)?);
            }
            Ok(finished.into())
        }
    }
}

/// Rewrites the type slots and child slots of a node the handler kept
/// or produced.
fn finish_node<T: Transformation + ?Sized>(
    transformation: &mut T,
    cx: &Context,
    node: Arc<Declaration>,
    mode: Mode,
) -> Result<Arc<Declaration>> {
    let inner_cx = cx.push(Arc::clone(&node));
    let node = transform_type_slots(transformation, &inner_cx, &node)?;
    let inner_cx = cx.push(Arc::clone(&node));
    transform_children(transformation, &inner_cx, &node, mode)
}

fn dispatch<T: Transformation + ?Sized>(
    transformation: &mut T,
    cx: &Context,
    declaration: &Arc<Declaration>,
) -> TransformResult {
    match declaration.kind() {
        DeclKind::Declaration => transformation.transform_declaration(cx, declaration),
        DeclKind::Record => transformation.transform_record(cx, declaration),
        DeclKind::Function => transformation.transform_function(cx, declaration),
        DeclKind::Parameter => transformation.transform_parameter(cx, declaration),
        DeclKind::Enum => transformation.transform_enum(cx, declaration),
        DeclKind::EnumConstant => transformation.transform_enum_constant(cx, declaration),
        DeclKind::Typedef => transformation.transform_typedef(cx, declaration),
        DeclKind::StaticField => transformation.transform_static_field(cx, declaration),
        DeclKind::Field => transformation.transform_field(cx, declaration),
        DeclKind::NormalField => transformation.transform_normal_field(cx, declaration),
        DeclKind::BaseField => transformation.transform_base_field(cx, declaration),
        DeclKind::VTableField => transformation.transform_vtable_field(cx, declaration),
        DeclKind::VTable => transformation.transform_vtable(cx, declaration),
        DeclKind::VTableEntry => transformation.transform_vtable_entry(cx, declaration),
        DeclKind::TemplateSpecialization => {
            transformation.transform_template_specialization(cx, declaration)
        }
        DeclKind::UndefinedRecord => transformation.transform_undefined_record(cx, declaration),
        DeclKind::Unsupported => transformation.transform_unsupported(cx, declaration),
    }
}

/// Rewrites every type-reference slot of `node`, merging handler
/// diagnostics onto the node.
fn transform_type_slots<T: Transformation + ?Sized>(
    transformation: &mut T,
    cx: &Context,
    node: &Arc<Declaration>,
) -> Result<Arc<Declaration>> {
    let specs = schema::type_slots(node.kind());
    if specs.is_empty() {
        return Ok(Arc::clone(node));
    }

    let mut new_slots = node.type_slots().clone();
    let mut changed = false;
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for (index, spec) in specs.iter().enumerate() {
        match &node.type_slots()[index] {
            TypeSlot::Single(reference) => {
                let result = transform_type(transformation, cx, reference);
                diagnostics.extend(result.diagnostics.iter().cloned());
                if result.is_change(reference) {
                    new_slots.set(index, TypeSlot::Single(result.reference));
                    changed = true;
                }
            }
            TypeSlot::Optional(None) => {}
            TypeSlot::Optional(Some(reference)) => {
                let result = transform_type(transformation, cx, reference);
                diagnostics.extend(result.diagnostics.iter().cloned());
                if result.is_change(reference) {
                    new_slots.set(index, TypeSlot::Optional(Some(result.reference)));
                    changed = true;
                }
            }
            TypeSlot::List(references) => {
                let mut helper = TypeListHelper::new(references, spec.name);
                for reference in references {
                    helper.add(transform_type(transformation, cx, reference));
                }
                let outcome = helper.finish()?;
                diagnostics.extend(outcome.diagnostics);
                if outcome.changed {
                    new_slots.set(index, TypeSlot::List(outcome.references));
                    changed = true;
                }
            }
        }
    }

    let node = if changed {
        node.with_type_slots(new_slots)
    } else {
        Arc::clone(node)
    };
    Ok(node.with_diagnostics(diagnostics))
}

/// Transforms a type reference inside-out: composite inners first, then
/// the handler for the (possibly rebuilt) outer reference.
fn transform_type<T: Transformation + ?Sized>(
    transformation: &mut T,
    cx: &Context,
    reference: &TypeReference,
) -> TypeTransformResult {
    let mut inner_diagnostics: im::Vector<Diagnostic> = im::Vector::new();

    let rebuilt = match reference {
        TypeReference::Void | TypeReference::Primitive(_) | TypeReference::Declaration(_) => {
            reference.clone()
        }
        TypeReference::Pointer(inner) => {
            let result = transform_type(transformation, cx, inner);
            let changed = result.is_change(inner);
            inner_diagnostics.append(result.diagnostics);
            if changed {
                TypeReference::Pointer(Arc::new(result.reference))
            } else {
                reference.clone()
            }
        }
        TypeReference::ByReference(inner) => {
            let result = transform_type(transformation, cx, inner);
            let changed = result.is_change(inner);
            inner_diagnostics.append(result.diagnostics);
            if changed {
                TypeReference::ByReference(Arc::new(result.reference))
            } else {
                reference.clone()
            }
        }
        TypeReference::FunctionPointer(signature) => {
            let return_result = transform_type(transformation, cx, &signature.return_type);
            let mut changed = return_result.is_change(&signature.return_type);
            inner_diagnostics.append(return_result.diagnostics.clone());

            let mut parameters = signature.parameters.clone();
            for (i, parameter) in signature.parameters.iter().enumerate() {
                let result = transform_type(transformation, cx, parameter);
                inner_diagnostics.append(result.diagnostics.clone());
                if result.is_change(parameter) {
                    parameters.set(i, result.reference);
                    changed = true;
                }
            }

            if changed {
                TypeReference::FunctionPointer(Arc::new(FunctionPointerType {
                    return_type: return_result.reference,
                    parameters,
                }))
            } else {
                reference.clone()
            }
        }
    };

    let mut result = dispatch_type(transformation, cx, &rebuilt);
    if !inner_diagnostics.is_empty() {
        inner_diagnostics.append(result.diagnostics);
        result.diagnostics = inner_diagnostics;
    }
    result
}

fn dispatch_type<T: Transformation + ?Sized>(
    transformation: &mut T,
    cx: &Context,
    reference: &TypeReference,
) -> TypeTransformResult {
    match reference.kind() {
        TypeKind::Void => transformation.transform_void(cx, reference),
        TypeKind::Primitive => transformation.transform_primitive(cx, reference),
        TypeKind::Pointer => transformation.transform_pointer(cx, reference),
        TypeKind::ByReference => transformation.transform_by_reference(cx, reference),
        TypeKind::FunctionPointer => transformation.transform_function_pointer(cx, reference),
        TypeKind::Declaration => transformation.transform_declaration_reference(cx, reference),
        // The abstract root; never the kind of a concrete value.
        TypeKind::TypeReference => transformation.transform_type_reference(cx, reference),
    }
}

/// Rewrites every declaration slot of `node`, redistributing overflow
/// into the kind's catch-all slot.
fn transform_children<T: Transformation + ?Sized>(
    transformation: &mut T,
    cx: &Context,
    node: &Arc<Declaration>,
    mode: Mode,
) -> Result<Arc<Declaration>> {
    let specs = schema::decl_slots(node.kind());
    if specs.is_empty() {
        return Ok(Arc::clone(node));
    }

    let mut new_slots = node.decl_slots().clone();
    let mut changed = false;
    let mut overflow: Vec<Arc<Declaration>> = Vec::new();
    let mut overflow_slot: Option<&'static str> = None;

    for (index, spec) in specs.iter().enumerate() {
        match &node.decl_slots()[index] {
            DeclSlot::Single(child) => {
                let mut helper = SingleSlotHelper::new(Some(child), spec.element);
                helper.set(transform_node(transformation, cx, child, mode)?);
                if helper.was_changed() {
                    let (value, extra) = helper.into_parts();
                    let Some(value) = value else {
                        return Err(TransformError::EmptyRequiredSlot {
                            parent: node.to_string(),
                            slot: spec.name,
                        });
                    };
                    if !extra.is_empty() {
                        overflow_slot.get_or_insert(spec.name);
                        overflow.extend(extra);
                    }
                    new_slots.set(index, DeclSlot::Single(value));
                    changed = true;
                }
            }
            DeclSlot::Optional(child) => {
                let mut helper = SingleSlotHelper::new(child.as_ref(), spec.element);
                if let Some(child) = child {
                    helper.set(transform_node(transformation, cx, child, mode)?);
                }
                if helper.was_changed() {
                    let (value, extra) = helper.into_parts();
                    if !extra.is_empty() {
                        overflow_slot.get_or_insert(spec.name);
                        overflow.extend(extra);
                    }
                    new_slots.set(index, DeclSlot::Optional(value));
                    changed = true;
                }
            }
            DeclSlot::List(children) => {
                let mut helper = ListSlotHelper::new(children, spec.element);
                for child in children {
                    helper.add(transform_node(transformation, cx, child, mode)?);
                }
                helper.finish();
                let extra = helper.take_overflow();
                if !extra.is_empty() {
                    overflow_slot.get_or_insert(spec.name);
                    overflow.extend(extra);
                }
                if helper.was_changed() {
                    new_slots.set(index, DeclSlot::List(helper.into_vector()));
                    changed = true;
                }
            }
        }
    }

    if !overflow.is_empty() {
        let Some(catch_index) = schema::catch_all_index(node.kind()) else {
            return Err(TransformError::MissingCatchAll {
                parent: node.to_string(),
                slot: overflow_slot.unwrap_or("?"),
                count: overflow.len(),
            });
        };
        match new_slots.get(catch_index) {
            Some(DeclSlot::List(absorbed)) => {
                let mut absorbed = absorbed.clone();
                absorbed.extend(overflow);
                new_slots.set(catch_index, DeclSlot::List(absorbed));
                changed = true;
            }
            _ => {
                return Err(TransformError::MissingCatchAll {
                    parent: node.to_string(),
                    slot: overflow_slot.unwrap_or("?"),
                    count: overflow.len(),
                });
            }
        }
    }

    if changed {
        Ok(node.with_decl_slots(new_slots))
    } else {
        Ok(Arc::clone(node))
    }
}
