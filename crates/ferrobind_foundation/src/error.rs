//! Fatal transformation errors.
//!
//! These are structural invariant violations: they mean the transformer
//! or the schema is internally inconsistent, not that the input was
//! unusual. Ordinary semantic problems are reported as
//! [`Diagnostic`](crate::Diagnostic)s on the affected declaration and
//! never surface here.

use thiserror::Error;

use crate::id::DeclarationId;

/// A structural invariant violation that aborts the whole pass.
///
/// No partial library is returned when one of these occurs.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A transformation produced declarations that do not fit any slot
    /// on the parent node, and the parent's kind has no catch-all slot
    /// to absorb them.
    #[error("no catch-all slot on `{parent}` to absorb {count} overflow declaration(s) from slot `{slot}`")]
    MissingCatchAll {
        /// Name of the parent declaration whose slots overflowed.
        parent: String,
        /// The slot whose rewrite produced the overflow.
        slot: &'static str,
        /// How many declarations had nowhere to go.
        count: usize,
    },

    /// A required single-child slot ended up empty after transformation.
    #[error("required slot `{slot}` on `{parent}` is empty after transformation")]
    EmptyRequiredSlot {
        /// Name of the parent declaration.
        parent: String,
        /// The slot left without a value.
        slot: &'static str,
    },

    /// A fixed-arity type-reference list changed length.
    #[error("fixed-arity type list `{slot}` changed length: expected {expected}, got {actual}")]
    FixedArityMismatch {
        /// The slot whose arity changed.
        slot: &'static str,
        /// The required element count.
        expected: usize,
        /// The element count the transformation produced.
        actual: usize,
    },

    /// A pre-resolved declaration reference was queried against a
    /// library other than the one it was bound to.
    #[error("pre-resolved reference to {declaration} queried against a different library")]
    PreResolvedLibraryMismatch {
        /// Id of the declaration the reference was bound to.
        declaration: DeclarationId,
    },

    /// The pass was cancelled at a traversal checkpoint.
    #[error("transformation cancelled")]
    Cancelled,
}
