//! Immutable declaration nodes.
//!
//! A [`Declaration`] is a schema-shaped node: its slot vectors run
//! parallel to the slot tables in [`schema`](crate::schema) for its
//! kind. Nodes are always handled as `Arc<Declaration>`; rebuilding
//! methods return a new node sharing everything that did not change.

use std::fmt;
use std::sync::Arc;

use ferrobind_foundation::{DeclarationId, Diagnostic, Marker, Metadata};

use crate::kind::DeclKind;
use crate::schema::{self, SlotShape, TypeSlotShape};
use crate::type_reference::TypeReference;

/// The value held by one declaration slot.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclSlot {
    /// Value for a [`SlotShape::Single`] slot.
    Single(Arc<Declaration>),
    /// Value for a [`SlotShape::OptionalSingle`] slot.
    Optional(Option<Arc<Declaration>>),
    /// Value for a [`SlotShape::OrderedList`] or [`SlotShape::CatchAll`]
    /// slot.
    List(im::Vector<Arc<Declaration>>),
}

impl DeclSlot {
    /// Iterates over the children held by this slot.
    pub fn children(&self) -> Box<dyn Iterator<Item = &Arc<Declaration>> + '_> {
        match self {
            Self::Single(child) => Box::new(std::iter::once(child)),
            Self::Optional(child) => Box::new(child.iter()),
            Self::List(children) => Box::new(children.iter()),
        }
    }

    fn matches_shape(&self, shape: SlotShape) -> bool {
        matches!(
            (self, shape),
            (Self::Single(_), SlotShape::Single)
                | (Self::Optional(_), SlotShape::OptionalSingle)
                | (
                    Self::List(_),
                    SlotShape::OrderedList | SlotShape::CatchAll
                )
        )
    }
}

/// The value held by one type-reference slot.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeSlot {
    /// Value for a [`TypeSlotShape::Single`] slot.
    Single(TypeReference),
    /// Value for a [`TypeSlotShape::OptionalSingle`] slot.
    Optional(Option<TypeReference>),
    /// Value for a [`TypeSlotShape::FixedList`] slot.
    List(im::Vector<TypeReference>),
}

impl TypeSlot {
    /// Iterates over the references held by this slot.
    pub fn references(&self) -> Box<dyn Iterator<Item = &TypeReference> + '_> {
        match self {
            Self::Single(reference) => Box::new(std::iter::once(reference)),
            Self::Optional(reference) => Box::new(reference.iter()),
            Self::List(references) => Box::new(references.iter()),
        }
    }

    fn matches_shape(&self, shape: TypeSlotShape) -> bool {
        matches!(
            (self, shape),
            (Self::Single(_), TypeSlotShape::Single)
                | (Self::Optional(_), TypeSlotShape::OptionalSingle)
                | (Self::List(_), TypeSlotShape::FixedList)
        )
    }
}

/// An immutable declaration node.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    kind: DeclKind,
    id: DeclarationId,
    name: String,
    diagnostics: im::Vector<Diagnostic>,
    metadata: Metadata,
    decl_slots: im::Vector<DeclSlot>,
    type_slots: im::Vector<TypeSlot>,
}

impl Declaration {
    /// The node's concrete kind.
    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        self.kind
    }

    /// The node's stable identifier, preserved across rewrites.
    #[must_use]
    pub const fn id(&self) -> DeclarationId {
        self.id
    }

    /// The node's name. May be empty for anonymous declarations.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Diagnostics attached to this node, in the order they were added.
    #[must_use]
    pub const fn diagnostics(&self) -> &im::Vector<Diagnostic> {
        &self.diagnostics
    }

    /// Marker metadata.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// True if this node was synthesized lazily and is eligible for
    /// collection when unreferenced.
    #[must_use]
    pub fn is_lazily_generated(&self) -> bool {
        self.metadata.has(Marker::LazilyGenerated)
    }

    /// The declaration slots, parallel to
    /// [`schema::decl_slots`](crate::schema::decl_slots) for this kind.
    #[must_use]
    pub const fn decl_slots(&self) -> &im::Vector<DeclSlot> {
        &self.decl_slots
    }

    /// The type-reference slots, parallel to
    /// [`schema::type_slots`](crate::schema::type_slots) for this kind.
    #[must_use]
    pub const fn type_slots(&self) -> &im::Vector<TypeSlot> {
        &self.type_slots
    }

    /// The named declaration slot, if this kind has it.
    #[must_use]
    pub fn decl_slot(&self, name: &str) -> Option<&DeclSlot> {
        let index = schema::decl_slot_index(self.kind, name)?;
        self.decl_slots.get(index)
    }

    /// The named type-reference slot, if this kind has it.
    #[must_use]
    pub fn type_slot(&self, name: &str) -> Option<&TypeSlot> {
        let index = schema::type_slot_index(self.kind, name)?;
        self.type_slots.get(index)
    }

    /// All direct children, in slot order.
    pub fn children(&self) -> impl Iterator<Item = &Arc<Declaration>> {
        self.decl_slots.iter().flat_map(DeclSlot::children)
    }

    /// All direct type references, in slot order.
    pub fn type_references(&self) -> impl Iterator<Item = &TypeReference> {
        self.type_slots.iter().flat_map(TypeSlot::references)
    }

    /// A record's member list (its catch-all slot).
    #[must_use]
    pub fn members(&self) -> Option<&im::Vector<Arc<Declaration>>> {
        match self.decl_slot("members") {
            Some(DeclSlot::List(members)) => Some(members),
            _ => None,
        }
    }

    /// A function's parameter list.
    #[must_use]
    pub fn parameters(&self) -> Option<&im::Vector<Arc<Declaration>>> {
        match self.decl_slot("parameters") {
            Some(DeclSlot::List(parameters)) => Some(parameters),
            _ => None,
        }
    }

    /// A function's return type.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeReference> {
        match self.type_slot("return_type") {
            Some(TypeSlot::Single(reference)) => Some(reference),
            _ => None,
        }
    }

    /// Returns a copy of this node with a different name.
    #[must_use]
    pub fn with_name(self: &Arc<Self>, name: impl Into<String>) -> Arc<Self> {
        let mut node = (**self).clone();
        node.name = name.into();
        Arc::new(node)
    }

    /// Returns a copy of this node with the diagnostics appended.
    ///
    /// Returns the original node when `extra` is empty.
    #[must_use]
    pub fn with_diagnostics(
        self: &Arc<Self>,
        extra: impl IntoIterator<Item = Diagnostic>,
    ) -> Arc<Self> {
        let mut extra = extra.into_iter().peekable();
        if extra.peek().is_none() {
            return Arc::clone(self);
        }
        let mut node = (**self).clone();
        node.diagnostics.extend(extra);
        Arc::new(node)
    }

    /// Returns a copy of this node with different metadata.
    #[must_use]
    pub fn with_metadata(self: &Arc<Self>, metadata: Metadata) -> Arc<Self> {
        let mut node = (**self).clone();
        node.metadata = metadata;
        Arc::new(node)
    }

    /// Returns a copy of this node with the marker added.
    #[must_use]
    pub fn with_marker(self: &Arc<Self>, marker: Marker) -> Arc<Self> {
        self.with_metadata(self.metadata.with(marker))
    }

    /// Returns a copy of this node with replaced declaration slots.
    ///
    /// The new vector must keep the shape of every slot; the engine
    /// relies on this when rebuilding nodes from slot helpers.
    #[must_use]
    pub fn with_decl_slots(self: &Arc<Self>, decl_slots: im::Vector<DeclSlot>) -> Arc<Self> {
        debug_assert_eq!(decl_slots.len(), schema::decl_slots(self.kind).len());
        let mut node = (**self).clone();
        node.decl_slots = decl_slots;
        Arc::new(node)
    }

    /// Returns a copy of this node with replaced type-reference slots.
    #[must_use]
    pub fn with_type_slots(self: &Arc<Self>, type_slots: im::Vector<TypeSlot>) -> Arc<Self> {
        debug_assert_eq!(type_slots.len(), schema::type_slots(self.kind).len());
        let mut node = (**self).clone();
        node.type_slots = type_slots;
        Arc::new(node)
    }

    /// Starts building a record.
    #[must_use]
    pub fn record(name: impl Into<String>) -> DeclarationBuilder {
        DeclarationBuilder::new(DeclKind::Record, name)
    }

    /// Starts building a function with the given return type.
    #[must_use]
    pub fn function(name: impl Into<String>, return_type: TypeReference) -> DeclarationBuilder {
        DeclarationBuilder::new(DeclKind::Function, name)
            .type_slot("return_type", TypeSlot::Single(return_type))
    }

    /// Builds a parameter with the given type.
    #[must_use]
    pub fn parameter(name: impl Into<String>, param_type: TypeReference) -> Arc<Self> {
        DeclarationBuilder::new(DeclKind::Parameter, name)
            .type_slot("param_type", TypeSlot::Single(param_type))
            .build()
    }

    /// Builds a typedef aliasing the given type.
    #[must_use]
    pub fn typedef(name: impl Into<String>, aliased_type: TypeReference) -> Arc<Self> {
        DeclarationBuilder::new(DeclKind::Typedef, name)
            .type_slot("aliased_type", TypeSlot::Single(aliased_type))
            .build()
    }

    /// Builds an ordinary instance field with the given type.
    #[must_use]
    pub fn normal_field(name: impl Into<String>, field_type: TypeReference) -> Arc<Self> {
        DeclarationBuilder::new(DeclKind::NormalField, name)
            .type_slot("field_type", TypeSlot::Single(field_type))
            .build()
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind.name(), self.name)
    }
}

/// Validating builder for [`Declaration`] nodes.
///
/// Slots start at their schema defaults: optional slots empty, lists
/// empty, single type slots `void`. Slot setters panic on schema
/// violations, since those are programming errors in the front end or a
/// pass, never a property of the input.
#[derive(Debug)]
pub struct DeclarationBuilder {
    kind: DeclKind,
    id: DeclarationId,
    name: String,
    diagnostics: im::Vector<Diagnostic>,
    metadata: Metadata,
    decl_slots: Vec<DeclSlot>,
    type_slots: Vec<TypeSlot>,
}

impl DeclarationBuilder {
    /// Starts a builder for the given kind and name.
    #[must_use]
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        let decl_slots = schema::decl_slots(kind)
            .iter()
            .map(|spec| match spec.shape {
                // No kind currently declares a required single child, so
                // an empty optional stand-in is never observable here.
                SlotShape::Single | SlotShape::OptionalSingle => DeclSlot::Optional(None),
                SlotShape::OrderedList | SlotShape::CatchAll => DeclSlot::List(im::Vector::new()),
            })
            .collect();
        let type_slots = schema::type_slots(kind)
            .iter()
            .map(|spec| match spec.shape {
                TypeSlotShape::Single => TypeSlot::Single(TypeReference::Void),
                TypeSlotShape::OptionalSingle => TypeSlot::Optional(None),
                TypeSlotShape::FixedList => TypeSlot::List(im::Vector::new()),
            })
            .collect();
        Self {
            kind,
            id: DeclarationId::fresh(),
            name: name.into(),
            diagnostics: im::Vector::new(),
            metadata: Metadata::new(),
            decl_slots,
            type_slots,
        }
    }

    /// Reuses the identity of an existing declaration.
    ///
    /// A pass that rebuilds a node from scratch should carry the old id
    /// over so declaration references keep resolving to the rewrite.
    #[must_use]
    pub fn id(mut self, id: DeclarationId) -> Self {
        self.id = id;
        self
    }

    /// Attaches a diagnostic.
    #[must_use]
    pub fn diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostics.push_back(diagnostic);
        self
    }

    /// Replaces the metadata set.
    #[must_use]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Adds a marker to the metadata set.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.metadata = self.metadata.with(marker);
        self
    }

    /// Sets a declaration slot by name.
    ///
    /// # Panics
    /// Panics if the kind has no such slot, the value's shape does not
    /// match the schema, or an element violates the slot's kind
    /// constraint.
    #[must_use]
    pub fn decl_slot(mut self, name: &str, value: DeclSlot) -> Self {
        let Some(index) = schema::decl_slot_index(self.kind, name) else {
            panic!("{:?} has no declaration slot `{name}`", self.kind);
        };
        let spec = schema::decl_slots(self.kind)[index];
        assert!(
            value.matches_shape(spec.shape),
            "slot `{name}` on {:?} expects shape {:?}",
            self.kind,
            spec.shape,
        );
        for child in value.children() {
            assert!(
                child.kind().is_a(spec.element),
                "slot `{name}` on {:?} cannot hold a {:?}",
                self.kind,
                child.kind(),
            );
        }
        self.decl_slots[index] = value;
        self
    }

    /// Sets a type-reference slot by name.
    ///
    /// # Panics
    /// Panics if the kind has no such slot or the value's shape does not
    /// match the schema.
    #[must_use]
    pub fn type_slot(mut self, name: &str, value: TypeSlot) -> Self {
        let Some(index) = schema::type_slot_index(self.kind, name) else {
            panic!("{:?} has no type slot `{name}`", self.kind);
        };
        let spec = schema::type_slots(self.kind)[index];
        assert!(
            value.matches_shape(spec.shape),
            "type slot `{name}` on {:?} expects shape {:?}",
            self.kind,
            spec.shape,
        );
        self.type_slots[index] = value;
        self
    }

    /// Appends a child to a list-shaped declaration slot.
    ///
    /// # Panics
    /// Panics on the same schema violations as
    /// [`decl_slot`](Self::decl_slot), or if the slot is not a list.
    #[must_use]
    pub fn child(mut self, slot_name: &str, child: Arc<Declaration>) -> Self {
        let Some(index) = schema::decl_slot_index(self.kind, slot_name) else {
            panic!("{:?} has no declaration slot `{slot_name}`", self.kind);
        };
        let spec = schema::decl_slots(self.kind)[index];
        assert!(
            child.kind().is_a(spec.element),
            "slot `{slot_name}` on {:?} cannot hold a {:?}",
            self.kind,
            child.kind(),
        );
        match &mut self.decl_slots[index] {
            DeclSlot::List(children) => children.push_back(child),
            _ => panic!("slot `{slot_name}` on {:?} is not a list", self.kind),
        }
        self
    }

    /// Appends a record member.
    #[must_use]
    pub fn member(self, child: Arc<Declaration>) -> Self {
        self.child("members", child)
    }

    /// Appends a function parameter.
    #[must_use]
    pub fn parameter(self, child: Arc<Declaration>) -> Self {
        self.child("parameters", child)
    }

    /// Finishes the node.
    #[must_use]
    pub fn build(self) -> Arc<Declaration> {
        Arc::new(Declaration {
            kind: self.kind,
            id: self.id,
            name: self.name,
            diagnostics: self.diagnostics,
            metadata: self.metadata,
            decl_slots: self.decl_slots.into_iter().collect(),
            type_slots: self.type_slots.into_iter().collect(),
        })
    }
}
