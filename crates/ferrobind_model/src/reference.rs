//! Lazily-resolving declaration references.
//!
//! A [`DeclarationReference`] is how a type reference points "across"
//! the tree at a declaration without holding the declaration itself.
//! The tree is rewritten repeatedly; the reference re-resolves against
//! whichever library snapshot is queried, memoizing the most recent
//! answer.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

use ferrobind_foundation::{DeclarationId, Result, TransformError};

use crate::context::Path;
use crate::declaration::Declaration;
use crate::library::Library;

/// The outcome of a successful resolution: the declaration plus its
/// ancestor path within the queried library.
#[derive(Clone, Debug)]
pub struct Resolved {
    /// The declaration the reference points at.
    pub declaration: Arc<Declaration>,
    /// Ancestors of the declaration, root first.
    pub path: Path,
}

/// Caller-supplied lookup strategy. Invoked lazily, possibly multiple
/// times with different libraries; returns `None` when resolution fails.
pub type LookupFn = dyn Fn(&Library) -> Option<Resolved> + Send + Sync;

#[derive(Clone)]
enum ResolveKey {
    /// Resolve by walking the library for the declaration with this id.
    ById(DeclarationId),
    /// Resolve by invoking the caller-supplied function.
    ByLookup(Arc<LookupFn>),
    /// Bound at construction to one specific snapshot; resolving against
    /// any other library is a misuse error.
    PreResolved {
        library: Library,
        resolution: Resolved,
    },
}

struct CacheEntry {
    library: Library,
    resolution: Option<Resolved>,
}

/// A reference that lazily resolves to a [`Declaration`].
///
/// Equality and hashing consider only the resolution key, never the
/// cache, so resolution history cannot affect deduplication or diffing
/// built on reference equality elsewhere in the pipeline.
#[derive(Clone)]
pub struct DeclarationReference {
    key: ResolveKey,
    // Single-slot memo of the last queried snapshot. Shared across
    // clones, like the rest of the reference's value.
    cache: Arc<Mutex<Option<CacheEntry>>>,
}

impl DeclarationReference {
    /// A reference resolved by stable id.
    #[must_use]
    pub fn by_id(id: DeclarationId) -> Self {
        Self {
            key: ResolveKey::ById(id),
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// A reference to an existing declaration, resolved by its id.
    #[must_use]
    pub fn to(declaration: &Arc<Declaration>) -> Self {
        Self::by_id(declaration.id())
    }

    /// A reference resolved by a caller-supplied lookup function.
    #[must_use]
    pub fn by_lookup(lookup: impl Fn(&Library) -> Option<Resolved> + Send + Sync + 'static) -> Self {
        Self {
            key: ResolveKey::ByLookup(Arc::new(lookup)),
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// A reference bound to one specific `(library, declaration, path)`
    /// triple.
    ///
    /// This exists so internal algorithms that already know the answer
    /// can reuse resolution-consuming code. It must never be attached to
    /// a persisted declaration: resolving it against any other library
    /// fails with [`TransformError::PreResolvedLibraryMismatch`].
    #[must_use]
    pub fn pre_resolved(library: Library, declaration: Arc<Declaration>, path: Path) -> Self {
        Self {
            key: ResolveKey::PreResolved {
                library,
                resolution: Resolved { declaration, path },
            },
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Resolves this reference against the given library snapshot.
    ///
    /// Returns `Ok(None)` when nothing matches — an expected, checked
    /// outcome (for example, the referenced declaration was removed from
    /// the library after the reference was created).
    ///
    /// # Errors
    /// Fails only for the pre-resolved misuse case.
    pub fn resolve(&self, library: &Library) -> Result<Option<Resolved>> {
        match &self.key {
            ResolveKey::PreResolved {
                library: bound,
                resolution,
            } => {
                if Library::same(bound, library) {
                    Ok(Some(resolution.clone()))
                } else {
                    Err(TransformError::PreResolvedLibraryMismatch {
                        declaration: resolution.declaration.id(),
                    })
                }
            }
            key => {
                let mut cache = self.cache.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
                if let Some(entry) = cache.as_ref() {
                    if Library::same(&entry.library, library) {
                        return Ok(entry.resolution.clone());
                    }
                }

                let resolution = match key {
                    ResolveKey::ById(id) => library.find_by_id(*id),
                    ResolveKey::ByLookup(lookup) => lookup(library),
                    ResolveKey::PreResolved { .. } => unreachable!(),
                };

                *cache = Some(CacheEntry {
                    library: library.clone(),
                    resolution: resolution.clone(),
                });
                Ok(resolution)
            }
        }
    }
}

impl PartialEq for DeclarationReference {
    fn eq(&self, other: &Self) -> bool {
        match (&self.key, &other.key) {
            (ResolveKey::ById(a), ResolveKey::ById(b)) => a == b,
            (ResolveKey::ByLookup(a), ResolveKey::ByLookup(b)) => Arc::ptr_eq(a, b),
            (
                ResolveKey::PreResolved { resolution: a, .. },
                ResolveKey::PreResolved { resolution: b, .. },
            ) => Arc::ptr_eq(&a.declaration, &b.declaration),
            _ => false,
        }
    }
}

impl Eq for DeclarationReference {}

impl Hash for DeclarationReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.key {
            ResolveKey::ById(id) => {
                0u8.hash(state);
                id.hash(state);
            }
            ResolveKey::ByLookup(lookup) => {
                1u8.hash(state);
                std::ptr::hash(Arc::as_ptr(lookup).cast::<()>(), state);
            }
            ResolveKey::PreResolved { resolution, .. } => {
                2u8.hash(state);
                std::ptr::hash(Arc::as_ptr(&resolution.declaration), state);
            }
        }
    }
}

impl fmt::Debug for DeclarationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            ResolveKey::ById(id) => write!(f, "DeclarationReference(by id {id})"),
            ResolveKey::ByLookup(_) => write!(f, "DeclarationReference(by lookup)"),
            ResolveKey::PreResolved { resolution, .. } => write!(
                f,
                "DeclarationReference(pre-resolved to `{}`)",
                resolution.declaration.name()
            ),
        }
    }
}

impl fmt::Display for DeclarationReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            ResolveKey::ById(id) => write!(f, "ref {id}"),
            ResolveKey::ByLookup(_) => write!(f, "ref (lookup)"),
            ResolveKey::PreResolved { resolution, .. } => {
                write!(f, "ref (pre-resolved `{}`)", resolution.declaration.name())
            }
        }
    }
}
