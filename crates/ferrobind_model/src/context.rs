//! Traversal state: ancestor paths and transformation contexts.

use std::fmt;
use std::sync::Arc;

use crate::declaration::Declaration;
use crate::library::Library;

/// An ordered chain of ancestor declarations, root first, excluding the
/// node it describes.
#[derive(Clone, Debug, Default)]
pub struct Path {
    ancestors: im::Vector<Arc<Declaration>>,
}

impl Path {
    /// The empty path of a top-level declaration.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a path extended with one more ancestor.
    #[must_use]
    pub fn push(&self, ancestor: Arc<Declaration>) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push_back(ancestor);
        Self { ancestors }
    }

    /// The immediate parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<Declaration>> {
        self.ancestors.last()
    }

    /// Returns the path of the immediate parent (one ancestor shorter).
    #[must_use]
    pub fn parent_path(&self) -> Option<Self> {
        if self.ancestors.is_empty() {
            return None;
        }
        let mut ancestors = self.ancestors.clone();
        ancestors.pop_back();
        Some(Self { ancestors })
    }

    /// True if `declaration` appears in the ancestor chain, by reference
    /// identity.
    #[must_use]
    pub fn contains(&self, declaration: &Arc<Declaration>) -> bool {
        self.ancestors.iter().any(|a| Arc::ptr_eq(a, declaration))
    }

    /// The number of ancestors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ancestors.len()
    }

    /// True for a top-level path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Iterates over the ancestors, root first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Declaration>> {
        self.ancestors.iter()
    }

    /// Builds the nested-name qualification for `name` under this path,
    /// skipping anonymous ancestors.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        let mut qualified = String::new();
        for ancestor in &self.ancestors {
            if ancestor.name().is_empty() {
                continue;
            }
            qualified.push_str(ancestor.name());
            qualified.push_str("::");
        }
        qualified.push_str(name);
        qualified
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualify(""))
    }
}

/// Per-node state handed to transformation handlers: the library being
/// transformed and the ancestor path of the current node.
#[derive(Clone, Debug)]
pub struct Context {
    library: Library,
    path: Path,
}

impl Context {
    /// A context at the library root.
    #[must_use]
    pub fn new(library: Library) -> Self {
        Self {
            library,
            path: Path::root(),
        }
    }

    /// A context at an arbitrary path.
    #[must_use]
    pub fn with_path(library: Library, path: Path) -> Self {
        Self { library, path }
    }

    /// The library snapshot this pass started from.
    #[must_use]
    pub const fn library(&self) -> &Library {
        &self.library
    }

    /// The current ancestor path.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a context one level deeper.
    #[must_use]
    pub fn push(&self, declaration: Arc<Declaration>) -> Self {
        Self {
            library: self.library.clone(),
            path: self.path.push(declaration),
        }
    }
}
