//! Slot helpers: lazy rebuild, change detection, and overflow.
//!
//! Each helper consumes handler results for one slot and answers two
//! questions at the end: did anything change, and which results did not
//! fit the slot. As long as every added result is the identical single
//! element already in place, no new collection is allocated — the
//! original persistent vector is returned untouched, which is what
//! upholds the engine's structural-sharing guarantee.

use std::sync::Arc;

use ferrobind_foundation::{Diagnostic, Result, TransformError};
use ferrobind_model::{DeclKind, Declaration, TypeReference};

use crate::result::{TransformResult, TypeTransformResult};

fn ptr_eq_opt(a: Option<&Arc<Declaration>>, b: Option<&Arc<Declaration>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

/// Helper for a `Single` or `OptionalSingle` declaration slot.
///
/// The first compatible-kind result becomes the slot's new value; every
/// other result accumulates as overflow for the parent's catch-all.
#[derive(Debug)]
pub struct SingleSlotHelper<'a> {
    original: Option<&'a Arc<Declaration>>,
    element: DeclKind,
    new_value: Option<Arc<Declaration>>,
    overflow: Vec<Arc<Declaration>>,
    is_set: bool,
}

impl<'a> SingleSlotHelper<'a> {
    /// Creates a helper over the slot's current value.
    #[must_use]
    pub fn new(original: Option<&'a Arc<Declaration>>, element: DeclKind) -> Self {
        Self {
            original,
            element,
            new_value: None,
            overflow: Vec::new(),
            is_set: false,
        }
    }

    /// Consumes the transformation result for the slot's child.
    ///
    /// # Panics
    /// Panics if called more than once; a single slot has one child.
    pub fn set(&mut self, result: TransformResult) {
        assert!(!self.is_set, "single slot value set more than once");
        self.is_set = true;
        for declaration in result.iter() {
            if self.new_value.is_none() && declaration.kind().is_a(self.element) {
                self.new_value = Some(Arc::clone(declaration));
            } else {
                self.overflow.push(Arc::clone(declaration));
            }
        }
    }

    /// True if the slot's value changed or any overflow was produced.
    #[must_use]
    pub fn was_changed(&self) -> bool {
        if !self.is_set {
            return false;
        }
        !self.overflow.is_empty() || !ptr_eq_opt(self.original, self.new_value.as_ref())
    }

    /// The slot's new value. `None` either means "unset" for a slot that
    /// was empty to begin with, or "deleted".
    #[must_use]
    pub fn value(&self) -> Option<&Arc<Declaration>> {
        if self.is_set {
            self.new_value.as_ref()
        } else {
            self.original
        }
    }

    /// Tears the helper down into the new value and the overflow.
    #[must_use]
    pub fn into_parts(self) -> (Option<Arc<Declaration>>, Vec<Arc<Declaration>>) {
        let value = if self.is_set {
            self.new_value
        } else {
            self.original.cloned()
        };
        (value, self.overflow)
    }
}

/// Helper for an `OrderedList` or `CatchAll` declaration slot.
///
/// Deletions drop the element, replacements substitute it, and splits
/// insert several elements in place, order preserved.
#[derive(Debug)]
pub struct ListSlotHelper<'a> {
    original: &'a im::Vector<Arc<Declaration>>,
    element: DeclKind,
    builder: Option<im::Vector<Arc<Declaration>>>,
    overflow: Vec<Arc<Declaration>>,
    // Length of the verified-unchanged prefix while no builder exists.
    matched: usize,
    finished: bool,
}

impl<'a> ListSlotHelper<'a> {
    /// Creates a helper over the slot's current elements.
    #[must_use]
    pub fn new(original: &'a im::Vector<Arc<Declaration>>, element: DeclKind) -> Self {
        Self {
            original,
            element,
            builder: None,
            overflow: Vec::new(),
            matched: 0,
            finished: false,
        }
    }

    /// True once the additions have diverged from the original
    /// collection. Truncation is only reflected after
    /// [`finish`](Self::finish).
    #[must_use]
    pub fn was_changed(&self) -> bool {
        self.builder.is_some()
    }

    fn apply(&mut self, declaration: &Arc<Declaration>) {
        if declaration.kind().is_a(self.element) {
            if let Some(builder) = &mut self.builder {
                builder.push_back(Arc::clone(declaration));
            }
        } else {
            self.overflow.push(Arc::clone(declaration));
        }
    }

    fn begin_rebuild(&mut self) {
        let prefix = self.original.clone().slice(..self.matched);
        // `slice` splits the shared vector; take the untouched prefix.
        self.builder = Some(prefix);
    }

    /// Appends the transformation result for the next element.
    ///
    /// # Panics
    /// Panics if the helper was already finished.
    pub fn add(&mut self, result: TransformResult) {
        assert!(!self.finished, "cannot add to a finished list slot");

        if self.builder.is_none() {
            // Identical single replacement of the element in place?
            if result.len() == 1 {
                if let (Some(new), Some(old)) = (result.single(), self.original.get(self.matched)) {
                    if Arc::ptr_eq(new, old) {
                        self.matched += 1;
                        return;
                    }
                }
            }
            self.begin_rebuild();
        }

        for declaration in result.iter() {
            self.apply(declaration);
        }
    }

    /// Marks the collection complete, detecting truncation.
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if self.builder.is_none() && self.matched < self.original.len() {
            self.begin_rebuild();
        }
    }

    /// Drains the accumulated overflow.
    pub fn take_overflow(&mut self) -> Vec<Arc<Declaration>> {
        std::mem::take(&mut self.overflow)
    }

    /// Finishes and returns the resulting collection — the original
    /// vector when nothing changed.
    #[must_use]
    pub fn into_vector(mut self) -> im::Vector<Arc<Declaration>> {
        self.finish();
        self.builder.unwrap_or_else(|| self.original.clone())
    }
}

/// The outcome of rebuilding a fixed-arity type-reference list.
#[derive(Debug)]
pub struct TypeListOutcome {
    /// The resulting references — the original vector when unchanged.
    pub references: im::Vector<TypeReference>,
    /// True if any element was replaced.
    pub changed: bool,
    /// Diagnostics accumulated from the added results.
    pub diagnostics: Vec<Diagnostic>,
}

/// Helper for a fixed-arity list of type references.
///
/// Every original element must be replaced by exactly one reference;
/// anything else is a structural invariant violation reported by
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct TypeListHelper<'a> {
    original: &'a im::Vector<TypeReference>,
    slot: &'static str,
    builder: Option<im::Vector<TypeReference>>,
    diagnostics: Vec<Diagnostic>,
    matched: usize,
    added: usize,
}

impl<'a> TypeListHelper<'a> {
    /// Creates a helper over the slot's current references.
    #[must_use]
    pub fn new(original: &'a im::Vector<TypeReference>, slot: &'static str) -> Self {
        Self {
            original,
            slot,
            builder: None,
            diagnostics: Vec::new(),
            matched: 0,
            added: 0,
        }
    }

    /// Appends the transformation result for the next element.
    pub fn add(&mut self, result: TypeTransformResult) {
        self.diagnostics.extend(result.diagnostics.iter().cloned());
        self.added += 1;

        if let Some(builder) = &mut self.builder {
            builder.push_back(result.reference);
            return;
        }

        if self
            .original
            .get(self.matched)
            .is_some_and(|old| *old == result.reference)
        {
            self.matched += 1;
            return;
        }

        let mut builder = self.original.clone().slice(..self.matched);
        builder.push_back(result.reference);
        self.builder = Some(builder);
    }

    /// Verifies arity and returns the outcome.
    ///
    /// # Errors
    /// [`TransformError::FixedArityMismatch`] when the number of added
    /// results differs from the original element count.
    pub fn finish(self) -> Result<TypeListOutcome> {
        if self.added != self.original.len() {
            return Err(TransformError::FixedArityMismatch {
                slot: self.slot,
                expected: self.original.len(),
                actual: self.added,
            });
        }
        let changed = self.builder.is_some();
        Ok(TypeListOutcome {
            references: self.builder.unwrap_or_else(|| self.original.clone()),
            changed,
            diagnostics: self.diagnostics,
        })
    }
}
