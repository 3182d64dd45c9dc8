//! Immutable type descriptors.

use std::fmt;
use std::sync::Arc;

use crate::kind::TypeKind;
use crate::reference::DeclarationReference;

/// A built-in arithmetic type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Primitive {
    Bool,
    Char,
    SignedChar,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
}

impl Primitive {
    /// The C++ spelling of this primitive.
    #[must_use]
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::SignedChar => "signed char",
            Self::UnsignedChar => "unsigned char",
            Self::Short => "short",
            Self::UnsignedShort => "unsigned short",
            Self::Int => "int",
            Self::UnsignedInt => "unsigned int",
            Self::Long => "long",
            Self::UnsignedLong => "unsigned long",
            Self::LongLong => "long long",
            Self::UnsignedLongLong => "unsigned long long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

/// The signature behind a function-pointer type.
///
/// The parameter list is fixed-arity: transformations may replace
/// parameter types but never add or drop entries, because the list must
/// stay in step with the underlying signature.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionPointerType {
    /// The return type.
    pub return_type: TypeReference,
    /// The ordered parameter types.
    pub parameters: im::Vector<TypeReference>,
}

/// An immutable value describing a type.
///
/// Composite variants share their inner references via `Arc`, so cloning
/// a type reference never copies a subgraph.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeReference {
    /// The `void` type.
    Void,
    /// A built-in arithmetic type.
    Primitive(Primitive),
    /// Pointer to the inner type.
    Pointer(Arc<TypeReference>),
    /// C++ lvalue reference to the inner type.
    ByReference(Arc<TypeReference>),
    /// Pointer to a function signature.
    FunctionPointer(Arc<FunctionPointerType>),
    /// A reference that lazily resolves to a declaration.
    Declaration(DeclarationReference),
}

impl TypeReference {
    /// The concrete kind of this reference.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Void => TypeKind::Void,
            Self::Primitive(_) => TypeKind::Primitive,
            Self::Pointer(_) => TypeKind::Pointer,
            Self::ByReference(_) => TypeKind::ByReference,
            Self::FunctionPointer(_) => TypeKind::FunctionPointer,
            Self::Declaration(_) => TypeKind::Declaration,
        }
    }

    /// Builds a pointer to `inner`.
    #[must_use]
    pub fn pointer_to(inner: TypeReference) -> Self {
        Self::Pointer(Arc::new(inner))
    }

    /// Builds a C++ reference to `inner`.
    #[must_use]
    pub fn reference_to(inner: TypeReference) -> Self {
        Self::ByReference(Arc::new(inner))
    }

    /// Builds a function pointer with the given signature.
    #[must_use]
    pub fn function_pointer(
        return_type: TypeReference,
        parameters: impl IntoIterator<Item = TypeReference>,
    ) -> Self {
        Self::FunctionPointer(Arc::new(FunctionPointerType {
            return_type,
            parameters: parameters.into_iter().collect(),
        }))
    }

    /// Returns the declaration reference if this is a declaration type.
    #[must_use]
    pub const fn as_declaration(&self) -> Option<&DeclarationReference> {
        match self {
            Self::Declaration(reference) => Some(reference),
            _ => None,
        }
    }

    /// Calls `f` for every [`DeclarationReference`] reachable from this
    /// reference, including through composite variants.
    pub fn for_each_declaration_reference(&self, f: &mut impl FnMut(&DeclarationReference)) {
        match self {
            Self::Void | Self::Primitive(_) => {}
            Self::Pointer(inner) | Self::ByReference(inner) => {
                inner.for_each_declaration_reference(f);
            }
            Self::FunctionPointer(signature) => {
                signature.return_type.for_each_declaration_reference(f);
                for parameter in &signature.parameters {
                    parameter.for_each_declaration_reference(f);
                }
            }
            Self::Declaration(reference) => f(reference),
        }
    }
}

impl From<Primitive> for TypeReference {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<DeclarationReference> for TypeReference {
    fn from(reference: DeclarationReference) -> Self {
        Self::Declaration(reference)
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => write!(f, "void"),
            Self::Primitive(primitive) => write!(f, "{}", primitive.spelling()),
            Self::Pointer(inner) => write!(f, "{inner}*"),
            Self::ByReference(inner) => write!(f, "{inner}&"),
            Self::FunctionPointer(signature) => {
                write!(f, "{} (*)(", signature.return_type)?;
                for (i, parameter) in signature.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ")")
            }
            Self::Declaration(reference) => write!(f, "{reference}"),
        }
    }
}
