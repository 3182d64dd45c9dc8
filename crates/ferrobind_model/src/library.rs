//! The root library snapshot.

use std::fmt;
use std::sync::Arc;

use ferrobind_foundation::{DeclarationId, Diagnostic};

use crate::context::Path;
use crate::declaration::Declaration;
use crate::reference::Resolved;

/// The root container: an ordered sequence of top-level declarations.
///
/// A `Library` is an immutable snapshot; every transformation pass
/// yields a new one sharing unchanged subtrees with its predecessor.
/// Cloning is O(1). Two libraries are "the same snapshot" only when
/// [`Library::same`] holds — structural equality is deliberately not
/// what resolution caches key on.
#[derive(Clone)]
pub struct Library {
    inner: Arc<LibraryInner>,
}

struct LibraryInner {
    declarations: im::Vector<Arc<Declaration>>,
}

impl Library {
    /// Creates a library from top-level declarations, in order.
    #[must_use]
    pub fn new(declarations: impl IntoIterator<Item = Arc<Declaration>>) -> Self {
        Self {
            inner: Arc::new(LibraryInner {
                declarations: declarations.into_iter().collect(),
            }),
        }
    }

    /// The top-level declarations.
    #[must_use]
    pub fn declarations(&self) -> &im::Vector<Arc<Declaration>> {
        &self.inner.declarations
    }

    /// Creates a new snapshot with different top-level declarations.
    #[must_use]
    pub fn with_declarations(&self, declarations: im::Vector<Arc<Declaration>>) -> Self {
        Self {
            inner: Arc::new(LibraryInner { declarations }),
        }
    }

    /// Snapshot identity: true only if both values are the same library
    /// object, not merely structurally equal ones.
    #[must_use]
    pub fn same(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Visits every declaration depth-first with its ancestor path.
    ///
    /// Children are visited after their parent, in slot order.
    pub fn for_each(&self, f: &mut impl FnMut(&Path, &Arc<Declaration>)) {
        let root = Path::root();
        for declaration in &self.inner.declarations {
            Self::for_each_in(&root, declaration, f);
        }
    }

    fn for_each_in(
        path: &Path,
        declaration: &Arc<Declaration>,
        f: &mut impl FnMut(&Path, &Arc<Declaration>),
    ) {
        f(path, declaration);
        let child_path = path.push(Arc::clone(declaration));
        for child in declaration.children() {
            Self::for_each_in(&child_path, child, f);
        }
    }

    /// Finds the declaration with the given stable id, anywhere in the
    /// tree, together with its ancestor path.
    #[must_use]
    pub fn find_by_id(&self, id: DeclarationId) -> Option<Resolved> {
        let root = Path::root();
        for declaration in &self.inner.declarations {
            if let Some(found) = Self::find_in(&root, declaration, id) {
                return Some(found);
            }
        }
        None
    }

    fn find_in(path: &Path, declaration: &Arc<Declaration>, id: DeclarationId) -> Option<Resolved> {
        if declaration.id() == id {
            return Some(Resolved {
                declaration: Arc::clone(declaration),
                path: path.clone(),
            });
        }
        let child_path = path.push(Arc::clone(declaration));
        for child in declaration.children() {
            if let Some(found) = Self::find_in(&child_path, child, id) {
                return Some(found);
            }
        }
        None
    }

    /// True if any declaration anywhere carries an error-level
    /// diagnostic. Used by callers for their final report.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        let mut found = false;
        self.for_each(&mut |_, declaration| {
            found = found || declaration.diagnostics().iter().any(Diagnostic::is_error);
        });
        found
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("declarations", &self.inner.declarations.len())
            .finish()
    }
}
