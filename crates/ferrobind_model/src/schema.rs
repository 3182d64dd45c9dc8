//! Per-kind slot schema.
//!
//! The schema is plain data: for each declaration kind, the ordered list
//! of its declaration slots and type-reference slots. The generic
//! transformation engine consumes these tables instead of carrying
//! hand-written per-kind child-rewriting logic.

use crate::kind::DeclKind;

/// The shape of a declaration slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotShape {
    /// Exactly one child, required.
    Single,
    /// Zero or one child.
    OptionalSingle,
    /// Zero or more children, order-significant.
    OrderedList,
    /// An ordered list that additionally absorbs overflow from sibling
    /// slots during transformation. At most one per kind.
    CatchAll,
}

/// The shape of a type-reference slot.
///
/// Lists of type references are always fixed-arity: a transformation may
/// replace elements but never change the count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeSlotShape {
    /// Exactly one reference.
    Single,
    /// Zero or one reference.
    OptionalSingle,
    /// A fixed-length list of references.
    FixedList,
}

/// Schema entry for one declaration slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotSpec {
    /// The slot's name, unique within its kind.
    pub name: &'static str,
    /// The slot's shape.
    pub shape: SlotShape,
    /// The kind constraint on elements; children must satisfy
    /// [`DeclKind::is_a`] against it.
    pub element: DeclKind,
}

/// Schema entry for one type-reference slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeSlotSpec {
    /// The slot's name, unique within its kind.
    pub name: &'static str,
    /// The slot's shape.
    pub shape: TypeSlotShape,
}

const fn slot(name: &'static str, shape: SlotShape, element: DeclKind) -> SlotSpec {
    SlotSpec {
        name,
        shape,
        element,
    }
}

const fn type_slot(name: &'static str, shape: TypeSlotShape) -> TypeSlotSpec {
    TypeSlotSpec { name, shape }
}

/// The ordered declaration slots of the given kind.
#[must_use]
pub const fn decl_slots(kind: DeclKind) -> &'static [SlotSpec] {
    match kind {
        DeclKind::Record => const {
            &[
                slot("members", SlotShape::CatchAll, DeclKind::Declaration),
                slot(
                    "non_virtual_base",
                    SlotShape::OptionalSingle,
                    DeclKind::BaseField,
                ),
                slot(
                    "vtable_field",
                    SlotShape::OptionalSingle,
                    DeclKind::VTableField,
                ),
                slot("vtable", SlotShape::OptionalSingle, DeclKind::VTable),
            ]
        },
        DeclKind::Function => const { &[slot("parameters", SlotShape::OrderedList, DeclKind::Parameter)] },
        DeclKind::Enum => const { &[slot("values", SlotShape::OrderedList, DeclKind::EnumConstant)] },
        DeclKind::VTable => const { &[slot("entries", SlotShape::OrderedList, DeclKind::VTableEntry)] },
        _ => &[],
    }
}

/// The ordered type-reference slots of the given kind.
#[must_use]
pub const fn type_slots(kind: DeclKind) -> &'static [TypeSlotSpec] {
    match kind {
        DeclKind::Function => const { &[type_slot("return_type", TypeSlotShape::Single)] },
        DeclKind::Parameter => const { &[type_slot("param_type", TypeSlotShape::Single)] },
        DeclKind::Enum => const { &[type_slot("underlying_type", TypeSlotShape::Single)] },
        DeclKind::Typedef => const { &[type_slot("aliased_type", TypeSlotShape::Single)] },
        DeclKind::StaticField | DeclKind::NormalField | DeclKind::BaseField => {
            const { &[type_slot("field_type", TypeSlotShape::Single)] }
        }
        DeclKind::VTableField => const { &[type_slot("field_type", TypeSlotShape::Single)] },
        DeclKind::VTableEntry => const { &[type_slot("pointee_type", TypeSlotShape::Single)] },
        DeclKind::TemplateSpecialization => const { &[type_slot("arguments", TypeSlotShape::FixedList)] },
        _ => &[],
    }
}

/// Index of the kind's catch-all slot, if it has one.
#[must_use]
pub fn catch_all_index(kind: DeclKind) -> Option<usize> {
    decl_slots(kind)
        .iter()
        .position(|s| s.shape == SlotShape::CatchAll)
}

/// Index of the named declaration slot on the given kind.
#[must_use]
pub fn decl_slot_index(kind: DeclKind, name: &str) -> Option<usize> {
    decl_slots(kind).iter().position(|s| s.name == name)
}

/// Index of the named type-reference slot on the given kind.
#[must_use]
pub fn type_slot_index(kind: DeclKind, name: &str) -> Option<usize> {
    type_slots(kind).iter().position(|s| s.name == name)
}
