//! Marker metadata carried by declarations.
//!
//! Markers are small flags that downstream passes test for. The set is
//! closed; passes that need richer annotations attach diagnostics
//! instead.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A marker that can be attached to a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Marker {
    /// The declaration was synthesized on demand rather than translated
    /// directly from the input. Unreferenced lazily-generated
    /// declarations are removed by the collector.
    LazilyGenerated,
    /// The declaration should not appear in generated output surfaces
    /// such as code completion.
    HideFromOutput,
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LazilyGenerated => write!(f, "lazily-generated"),
            Self::HideFromOutput => write!(f, "hide-from-output"),
        }
    }
}

/// An immutable, order-insensitive set of markers.
///
/// Markers are stored sorted so that two metadata values built in
/// different orders compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metadata {
    markers: im::Vector<Marker>,
}

impl Metadata {
    /// Creates an empty metadata set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the given marker is present.
    #[must_use]
    pub fn has(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Returns a new metadata set with the marker added.
    #[must_use]
    pub fn with(&self, marker: Marker) -> Self {
        if self.has(marker) {
            return self.clone();
        }
        let mut markers = self.markers.clone();
        let at = markers.iter().take_while(|m| **m < marker).count();
        markers.insert(at, marker);
        Self { markers }
    }

    /// Returns a new metadata set with the marker removed.
    #[must_use]
    pub fn without(&self, marker: Marker) -> Self {
        Self {
            markers: self.markers.iter().filter(|m| **m != marker).copied().collect(),
        }
    }

    /// Returns true if no markers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Iterates over the markers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.markers.iter().copied()
    }
}
