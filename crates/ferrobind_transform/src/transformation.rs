//! The per-kind handler trait.
//!
//! A transformation overrides the methods for the kinds it cares about.
//! Every default implementation delegates to the method for the kind's
//! parent, bottoming out at [`Transformation::transform_declaration`]
//! (declarations) and [`Transformation::transform_type_reference`]
//! (type references), whose defaults keep the input unchanged. The
//! engine dispatches on a node's concrete kind only, so exactly one
//! handler fires per node; chaining happens through these default
//! bodies.

#![allow(unused_variables)]

use std::sync::Arc;

use ferrobind_foundation::Result;
use ferrobind_model::{Context, Declaration, Library, TypeReference};

use crate::result::{TransformResult, TypeTransformResult};

/// A declaration-tree rewrite pass.
pub trait Transformation {
    /// Runs before traversal; may substitute the library the pass
    /// operates on. The collector uses this for its mark phase.
    ///
    /// # Errors
    /// A structural error here aborts the pass before traversal.
    fn pre_transform(&mut self, library: &Library) -> Result<Library> {
        Ok(library.clone())
    }

    /// Runs after traversal on the (possibly rebuilt) library.
    ///
    /// # Errors
    /// A structural error here aborts the pass.
    fn post_transform(&mut self, library: &Library) -> Result<Library> {
        Ok(library.clone())
    }

    /// Root declaration handler; the end of every fallback chain.
    fn transform_declaration(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        declaration.into()
    }

    /// Handles records.
    fn transform_record(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles functions.
    fn transform_function(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles function parameters.
    fn transform_parameter(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles enums.
    fn transform_enum(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles enum constants.
    fn transform_enum_constant(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles typedefs.
    fn transform_typedef(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles static fields and globals.
    fn transform_static_field(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles the field family; the fallback for the three concrete
    /// field kinds.
    fn transform_field(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles ordinary instance fields.
    fn transform_normal_field(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_field(context, declaration)
    }

    /// Handles non-virtual base fields.
    fn transform_base_field(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_field(context, declaration)
    }

    /// Handles vtable-pointer fields.
    fn transform_vtable_field(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_field(context, declaration)
    }

    /// Handles vtables.
    fn transform_vtable(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles vtable entries.
    fn transform_vtable_entry(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles template specializations.
    fn transform_template_specialization(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles undefined records.
    fn transform_undefined_record(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Handles declarations the front end could not translate.
    fn transform_unsupported(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        self.transform_declaration(context, declaration)
    }

    /// Root type-reference handler; the end of every type fallback
    /// chain.
    fn transform_type_reference(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        reference.clone().into()
    }

    /// Handles `void`.
    fn transform_void(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        self.transform_type_reference(context, reference)
    }

    /// Handles built-in arithmetic types.
    fn transform_primitive(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        self.transform_type_reference(context, reference)
    }

    /// Handles pointers. The inner reference has already been
    /// transformed when this fires.
    fn transform_pointer(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        self.transform_type_reference(context, reference)
    }

    /// Handles C++ references. The inner reference has already been
    /// transformed when this fires.
    fn transform_by_reference(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        self.transform_type_reference(context, reference)
    }

    /// Handles function pointers. The signature's nested references have
    /// already been transformed when this fires.
    fn transform_function_pointer(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        self.transform_type_reference(context, reference)
    }

    /// Handles declaration references.
    fn transform_declaration_reference(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        self.transform_type_reference(context, reference)
    }
}
