//! Closed kind hierarchies for declarations and type references.
//!
//! Every kind has exactly one parent kind, up to a root kind. Handler
//! dispatch in the transformation engine walks this chain: a handler
//! registered for `Field` fires for `NormalField` unless a more specific
//! handler exists.

/// The kind of a declaration node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeclKind {
    /// The root kind; every other kind descends from it.
    Declaration,
    /// A record type (struct/class/union).
    Record,
    /// A free or member function.
    Function,
    /// A function parameter.
    Parameter,
    /// An enumeration.
    Enum,
    /// A single enumerator within an enum.
    EnumConstant,
    /// A type alias.
    Typedef,
    /// A static data member or global variable.
    StaticField,
    /// Grouping kind for the field family; not usually instantiated
    /// directly.
    Field,
    /// An ordinary instance field.
    NormalField,
    /// A field holding a non-virtual base.
    BaseField,
    /// The hidden field holding a record's vtable pointer.
    VTableField,
    /// A record's virtual method table.
    VTable,
    /// One entry in a vtable.
    VTableEntry,
    /// An instantiated template specialization.
    TemplateSpecialization,
    /// A record that was referenced but never defined.
    UndefinedRecord,
    /// A declaration the front end could not translate.
    Unsupported,
}

impl DeclKind {
    /// The immediate parent kind, or `None` for the root.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Declaration => None,
            Self::NormalField | Self::BaseField | Self::VTableField => Some(Self::Field),
            _ => Some(Self::Declaration),
        }
    }

    /// Returns true if `self` is `other` or descends from it.
    #[must_use]
    pub fn is_a(self, other: Self) -> bool {
        let mut kind = Some(self);
        while let Some(k) = kind {
            if k == other {
                return true;
            }
            kind = k.parent();
        }
        false
    }

    /// A human-readable name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Declaration => "declaration",
            Self::Record => "record",
            Self::Function => "function",
            Self::Parameter => "parameter",
            Self::Enum => "enum",
            Self::EnumConstant => "enum constant",
            Self::Typedef => "typedef",
            Self::StaticField => "static field",
            Self::Field => "field",
            Self::NormalField => "field (normal)",
            Self::BaseField => "field (base)",
            Self::VTableField => "field (vtable pointer)",
            Self::VTable => "vtable",
            Self::VTableEntry => "vtable entry",
            Self::TemplateSpecialization => "template specialization",
            Self::UndefinedRecord => "undefined record",
            Self::Unsupported => "unsupported declaration",
        }
    }

    /// Every declaration kind, for schema-wide validation and tests.
    pub const ALL: &'static [Self] = &[
        Self::Declaration,
        Self::Record,
        Self::Function,
        Self::Parameter,
        Self::Enum,
        Self::EnumConstant,
        Self::Typedef,
        Self::StaticField,
        Self::Field,
        Self::NormalField,
        Self::BaseField,
        Self::VTableField,
        Self::VTable,
        Self::VTableEntry,
        Self::TemplateSpecialization,
        Self::UndefinedRecord,
        Self::Unsupported,
    ];
}

/// The kind of a type reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// The root kind.
    TypeReference,
    /// The `void` type.
    Void,
    /// A built-in arithmetic type.
    Primitive,
    /// Pointer to another type.
    Pointer,
    /// C++ lvalue reference to another type.
    ByReference,
    /// Pointer to a function signature.
    FunctionPointer,
    /// Reference that lazily resolves to a declaration.
    Declaration,
}

impl TypeKind {
    /// The immediate parent kind, or `None` for the root.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::TypeReference => None,
            _ => Some(Self::TypeReference),
        }
    }

    /// Returns true if `self` is `other` or descends from it.
    #[must_use]
    pub fn is_a(self, other: Self) -> bool {
        let mut kind = Some(self);
        while let Some(k) = kind {
            if k == other {
                return true;
            }
            kind = k.parent();
        }
        false
    }
}
