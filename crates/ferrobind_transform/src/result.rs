//! Handler result types.

use std::sync::Arc;

use ferrobind_foundation::Diagnostic;
use ferrobind_model::{Declaration, TypeReference};

/// What a declaration handler did with a node: deleted it, kept or
/// replaced it, or expanded it into several nodes.
#[derive(Clone, Debug)]
pub enum TransformResult {
    /// Delete the declaration.
    Remove,
    /// Keep or replace the declaration.
    One(Arc<Declaration>),
    /// Replace the declaration with several.
    Many(Vec<Arc<Declaration>>),
}

impl TransformResult {
    /// How many declarations this result carries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Remove => 0,
            Self::One(_) => 1,
            Self::Many(declarations) => declarations.len(),
        }
    }

    /// True for [`TransformResult::Remove`] and for an empty
    /// [`TransformResult::Many`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the carried declarations.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Declaration>> {
        let slice: &[Arc<Declaration>] = match self {
            Self::Remove => &[],
            Self::One(declaration) => std::slice::from_ref(declaration),
            Self::Many(declarations) => declarations,
        };
        slice.iter()
    }

    /// The single declaration, if this result carries exactly one.
    #[must_use]
    pub fn single(&self) -> Option<&Arc<Declaration>> {
        match self {
            Self::One(declaration) => Some(declaration),
            _ => None,
        }
    }
}

impl From<Arc<Declaration>> for TransformResult {
    fn from(declaration: Arc<Declaration>) -> Self {
        Self::One(declaration)
    }
}

impl From<&Arc<Declaration>> for TransformResult {
    fn from(declaration: &Arc<Declaration>) -> Self {
        Self::One(Arc::clone(declaration))
    }
}

impl From<Option<Arc<Declaration>>> for TransformResult {
    fn from(declaration: Option<Arc<Declaration>>) -> Self {
        declaration.map_or(Self::Remove, Self::One)
    }
}

impl From<Vec<Arc<Declaration>>> for TransformResult {
    fn from(mut declarations: Vec<Arc<Declaration>>) -> Self {
        match declarations.len() {
            0 => Self::Remove,
            1 => Self::One(declarations.remove(0)),
            _ => Self::Many(declarations),
        }
    }
}

/// What a type handler produced: exactly one replacement reference, plus
/// any diagnostics to merge into the declaration owning the reference.
///
/// Type handlers cannot delete or multiply a reference; type-reference
/// slots are frequently fixed-arity.
#[derive(Clone, Debug)]
pub struct TypeTransformResult {
    /// The replacement reference (possibly the input, unchanged).
    pub reference: TypeReference,
    /// Diagnostics produced while transforming the reference.
    pub diagnostics: im::Vector<Diagnostic>,
}

impl TypeTransformResult {
    /// A result that keeps or replaces the reference with no
    /// diagnostics.
    #[must_use]
    pub fn new(reference: TypeReference) -> Self {
        Self {
            reference,
            diagnostics: im::Vector::new(),
        }
    }

    /// Appends a diagnostic to this result.
    #[must_use]
    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push_back(diagnostic);
        self
    }

    /// True if the result's reference differs from `original` by value.
    #[must_use]
    pub fn is_change(&self, original: &TypeReference) -> bool {
        self.reference != *original
    }
}

impl From<TypeReference> for TypeTransformResult {
    fn from(reference: TypeReference) -> Self {
        Self::new(reference)
    }
}
