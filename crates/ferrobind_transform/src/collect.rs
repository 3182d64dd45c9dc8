//! Reachability-based collection of lazily generated declarations.
//!
//! A front end may synthesize declarations speculatively and mark them
//! [`Marker::LazilyGenerated`]. After the main passes have run, the
//! collector removes every such candidate that no surviving type
//! reference can reach, so speculative output never leaks into the
//! final library.
//!
//! [`Marker::LazilyGenerated`]: ferrobind_foundation::Marker::LazilyGenerated

use std::collections::HashSet;
use std::sync::Arc;

use ferrobind_foundation::{Result, TransformError};
use ferrobind_model::{Context, Declaration, Library};

use crate::engine::transform;
use crate::result::TransformResult;
use crate::transformation::Transformation;

/// Removes unreferenced lazily generated declarations from the library.
///
/// Equivalent to running [`LazyDeclarationCollector`] through
/// [`transform`]. Returns the input library value when nothing is
/// collected.
///
/// # Errors
/// Propagates resolution failures from the mark phase and engine errors
/// from the sweep.
pub fn collect(library: &Library) -> Result<Library> {
    transform(&mut LazyDeclarationCollector::new(), library)
}

/// Mark-and-sweep pass over lazily generated declarations.
///
/// The mark phase walks every type reference reachable from the
/// library, skipping the subtrees of candidates that are not (yet)
/// retained: a reference that only exists inside doomed output cannot
/// keep anything alive. Resolving a reference retains the target and
/// every lazily generated ancestor on its resolution path, since a kept
/// child needs its container to survive. Retaining a candidate exposes
/// the references inside its subtree, so the scan repeats until the
/// retained set stops growing. Mutually referencing candidates with no
/// outside reference never enter the set and are swept together.
///
/// The sweep is an ordinary engine pass removing every candidate that
/// was not retained. Identity is `Arc` pointer identity, which the
/// engine preserves for nodes a pass keeps.
#[derive(Debug, Default)]
pub struct LazyDeclarationCollector {
    retained: HashSet<usize>,
}

fn key(declaration: &Arc<Declaration>) -> usize {
    Arc::as_ptr(declaration) as usize
}

impl LazyDeclarationCollector {
    /// Creates a collector with an empty retained set; the set is
    /// computed in `pre_transform`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn mark(&mut self, library: &Library) -> Result<()> {
        loop {
            let before = self.retained.len();
            for declaration in library.declarations() {
                self.scan(library, declaration)?;
            }
            if self.retained.len() == before {
                return Ok(());
            }
        }
    }

    fn scan(&mut self, library: &Library, declaration: &Arc<Declaration>) -> Result<()> {
        if declaration.is_lazily_generated() && !self.retained.contains(&key(declaration)) {
            // References inside an unretained candidate cannot retain;
            // if the candidate is rescued later, the next fixed-point
            // round scans this subtree.
            return Ok(());
        }

        for reference in declaration.type_references() {
            let mut failure: Option<TransformError> = None;
            reference.for_each_declaration_reference(&mut |declaration_reference| {
                if failure.is_some() {
                    return;
                }
                match declaration_reference.resolve(library) {
                    Ok(Some(resolved)) => {
                        if resolved.declaration.is_lazily_generated() {
                            self.retained.insert(key(&resolved.declaration));
                        }
                        for ancestor in resolved.path.iter() {
                            if ancestor.is_lazily_generated() {
                                self.retained.insert(key(ancestor));
                            }
                        }
                    }
                    Ok(None) => {}
                    Err(error) => failure = Some(error),
                }
            });
            if let Some(error) = failure {
                return Err(error);
            }
        }

        for child in declaration.children() {
            self.scan(library, child)?;
        }
        Ok(())
    }
}

impl Transformation for LazyDeclarationCollector {
    fn pre_transform(&mut self, library: &Library) -> Result<Library> {
        self.retained.clear();
        self.mark(library)?;
        Ok(library.clone())
    }

    fn transform_declaration(
        &mut self,
        _context: &Context,
        declaration: &Arc<Declaration>,
    ) -> TransformResult {
        if declaration.is_lazily_generated() && !self.retained.contains(&key(declaration)) {
            TransformResult::Remove
        } else {
            declaration.into()
        }
    }
}
