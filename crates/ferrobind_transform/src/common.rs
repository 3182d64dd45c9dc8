//! Small reusable transformations.

use std::sync::Arc;

use ferrobind_model::{Context, Declaration, Library, TypeReference};

use crate::result::{TransformResult, TypeTransformResult};
use crate::transformation::Transformation;

type DeclarationFn = Box<dyn FnMut(&Context, &Arc<Declaration>) -> TransformResult>;
type TypeReferenceFn = Box<dyn FnMut(&Context, &TypeReference) -> TypeTransformResult>;
type LibraryFn = Box<dyn FnMut(&Library) -> Library>;

/// Adapts closures into a [`Transformation`] for one-off passes.
///
/// Only the root handlers are exposed; a pass that needs per-kind
/// dispatch should implement the trait directly.
///
/// ```
/// use ferrobind_transform::{transform, SimpleTransformation};
/// # use ferrobind_model::{Declaration, Library};
/// let mut strip_underscores = SimpleTransformation::new().on_declaration(|_cx, decl| {
///     if decl.name().starts_with('_') {
///         decl.with_name(decl.name().trim_start_matches('_')).into()
///     } else {
///         decl.into()
///     }
/// });
/// let library = Library::new([Declaration::record("_Hidden").build()]);
/// let renamed = transform(&mut strip_underscores, &library).unwrap();
/// assert_eq!(renamed.declarations()[0].name(), "Hidden");
/// ```
#[derive(Default)]
pub struct SimpleTransformation {
    declaration: Option<DeclarationFn>,
    type_reference: Option<TypeReferenceFn>,
    pre: Option<LibraryFn>,
    post: Option<LibraryFn>,
}

impl SimpleTransformation {
    /// An empty adapter; without closures it is the identity pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declaration handler, fired for every node.
    #[must_use]
    pub fn on_declaration(
        mut self,
        f: impl FnMut(&Context, &Arc<Declaration>) -> TransformResult + 'static,
    ) -> Self {
        self.declaration = Some(Box::new(f));
        self
    }

    /// Sets the type-reference handler, fired for every reference.
    #[must_use]
    pub fn on_type_reference(
        mut self,
        f: impl FnMut(&Context, &TypeReference) -> TypeTransformResult + 'static,
    ) -> Self {
        self.type_reference = Some(Box::new(f));
        self
    }

    /// Sets the pre-traversal hook.
    #[must_use]
    pub fn on_pre_transform(mut self, f: impl FnMut(&Library) -> Library + 'static) -> Self {
        self.pre = Some(Box::new(f));
        self
    }

    /// Sets the post-traversal hook.
    #[must_use]
    pub fn on_post_transform(mut self, f: impl FnMut(&Library) -> Library + 'static) -> Self {
        self.post = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for SimpleTransformation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleTransformation")
            .field("declaration", &self.declaration.is_some())
            .field("type_reference", &self.type_reference.is_some())
            .finish_non_exhaustive()
    }
}

impl Transformation for SimpleTransformation {
    fn pre_transform(&mut self, library: &Library) -> ferrobind_foundation::Result<Library> {
        Ok(match &mut self.pre {
            Some(f) => f(library),
            None => library.clone(),
        })
    }

    fn post_transform(&mut self, library: &Library) -> ferrobind_foundation::Result<Library> {
        Ok(match &mut self.post {
            Some(f) => f(library),
            None => library.clone(),
        })
    }

    fn transform_declaration(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        match &mut self.declaration {
            Some(f) => f(context, declaration),
            None => declaration.into(),
        }
    }

    fn transform_type_reference(
        &mut self,
        context: &Context,
        reference: &TypeReference,
    ) -> TypeTransformResult {
        match &mut self.type_reference {
            Some(f) => f(context, reference),
            None => reference.clone().into(),
        }
    }
}

/// Names anonymous function parameters `arg0`, `arg1`, ... by position.
///
/// Binding targets generally require parameter names; C++ headers often
/// omit them.
#[derive(Debug, Default)]
pub struct AutoNameUnnamedParameters;

impl Transformation for AutoNameUnnamedParameters {
    fn transform_parameter(
        &mut self,
        context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        if !declaration.name().is_empty() {
            return declaration.into();
        }
        let index = context
            .path()
            .parent()
            .and_then(|parent| parent.parameters())
            .and_then(|parameters| {
                parameters
                    .iter()
                    .position(|parameter| Arc::ptr_eq(parameter, declaration))
            })
            .unwrap_or(0);
        declaration.with_name(format!("arg{index}")).into()
    }
}
