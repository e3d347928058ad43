//! Type representation for the callable solver.
//!
//! `Type` is a closed enum with one case per kind of type the solver has to
//! reason about. Callable types (closures, lambdas, methods) carry their full
//! signature in [`CallableType`]; every other variant is small and cheap to
//! clone.
//!
//! Nominal object types (classes, traits) are opaque here: the solver only
//! models their name and type arguments, which is all the callable rules need.

use crate::callable::CallableType;
use bitflags::bitflags;

// =============================================================================
// Type
// =============================================================================

/// A statically checked type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Type {
    /// Compatible with anything, in both directions.
    #[default]
    Dynamic,
    /// The bottom type: compatible with anything as a source.
    Never,
    /// A nominal type such as `Int` or `Array!(T)`.
    Object(ObjectType),
    /// A value that may be nil.
    Optional(Box<Type>),
    /// A reference to a generic type parameter, resolved through a
    /// [`TypeParameterTable`](crate::TypeParameterTable).
    TypeParameter(TypeParamRef),
    /// A closure, lambda, or method.
    Callable(Box<CallableType>),
    /// Placeholder on an unannotated closure parameter or return type,
    /// waiting for local inference.
    Unresolved(Constraint),
}

/// A nominal type with its (possibly empty) list of type arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectType {
    pub name: String,
    pub arguments: Vec<Type>,
}

/// A reference to a type parameter by name.
///
/// `optional` records whether the reference was written as `?T`. When the
/// parameter is bound to a non-optional instance, resolution wraps it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamRef {
    pub name: String,
    pub optional: bool,
}

/// An unresolved constraint.
///
/// An unbounded constraint accepts any inferred type. A bounded one only
/// accepts types compatible with `bound` (for example a parameter that is
/// known to be passed to something expecting a `String`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constraint {
    pub bound: Option<Box<Type>>,
}

impl Type {
    pub fn object(name: impl Into<String>) -> Type {
        Type::Object(ObjectType {
            name: name.into(),
            arguments: Vec::new(),
        })
    }

    /// A generic nominal type: `Type::generic("Array", vec![Type::param("T")])`
    /// is `Array!(T)`.
    pub fn generic(name: impl Into<String>, arguments: Vec<Type>) -> Type {
        Type::Object(ObjectType {
            name: name.into(),
            arguments,
        })
    }

    pub fn optional(inner: Type) -> Type {
        Type::Optional(Box::new(inner))
    }

    pub fn param(name: impl Into<String>) -> Type {
        Type::TypeParameter(TypeParamRef {
            name: name.into(),
            optional: false,
        })
    }

    /// A `?T` reference to type parameter `T`.
    pub fn optional_param(name: impl Into<String>) -> Type {
        Type::TypeParameter(TypeParamRef {
            name: name.into(),
            optional: true,
        })
    }

    pub fn callable(callable: CallableType) -> Type {
        Type::Callable(Box::new(callable))
    }

    pub fn unresolved() -> Type {
        Type::Unresolved(Constraint::default())
    }

    /// An unresolved constraint that only accepts types compatible with `bound`.
    pub fn bounded(bound: Type) -> Type {
        Type::Unresolved(Constraint {
            bound: Some(Box::new(bound)),
        })
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Type::Dynamic)
    }

    #[inline]
    pub fn is_never(&self) -> bool {
        matches!(self, Type::Never)
    }

    #[inline]
    pub fn is_type_parameter(&self) -> bool {
        matches!(self, Type::TypeParameter(_))
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        matches!(self, Type::Optional(_))
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        matches!(self, Type::Callable(_))
    }

    #[inline]
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Type::Unresolved(_))
    }

    pub fn as_callable(&self) -> Option<&CallableType> {
        match self {
            Type::Callable(callable) => Some(&**callable),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParamRef> {
        match self {
            Type::TypeParameter(reference) => Some(reference),
            _ => None,
        }
    }

    /// Whether any unresolved constraint occurs in this type, including inside
    /// nested callables and type arguments.
    pub fn contains_unresolved(&self) -> bool {
        match self {
            Type::Unresolved(_) => true,
            Type::Optional(inner) => inner.contains_unresolved(),
            Type::Object(object) => object.arguments.iter().any(Type::contains_unresolved),
            Type::Callable(callable) => callable.contains_unresolved(),
            Type::Dynamic | Type::Never | Type::TypeParameter(_) => false,
        }
    }

    /// Whether `self` may be used where `expected` is required.
    ///
    /// Callable pairs are delegated to the structural rules in
    /// [`CompatChecker`](crate::CompatChecker), using the default policy.
    pub fn compatible_with(&self, expected: &Type) -> bool {
        crate::CompatChecker::new().type_compatible(self, expected)
    }
}

// =============================================================================
// Callable kinds and flags
// =============================================================================

/// What sort of callable a [`CallableType`] describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallableKind {
    /// A closure literal; may capture its environment.
    Closure,
    /// A lambda; never captures.
    Lambda,
    /// A method defined on a type; the first parameter is the receiver.
    Method,
}

impl CallableKind {
    /// Kind rule of block compatibility.
    ///
    /// A closure is compatible with a closure or a lambda. Lambdas and methods
    /// are only compatible with their own kind, so `Lambda ~ Closure` is false.
    pub fn compatible_with(self, other: CallableKind) -> bool {
        match (self, other) {
            (CallableKind::Closure, CallableKind::Closure | CallableKind::Lambda) => true,
            (CallableKind::Lambda, CallableKind::Lambda) => true,
            (CallableKind::Method, CallableKind::Method) => true,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CallableKind::Closure => "closure",
            CallableKind::Lambda => "lambda",
            CallableKind::Method => "method",
        }
    }
}

bitflags! {
    /// Boolean state of a [`CallableType`].
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CallableFlags: u8 {
        /// The last parameter absorbs any extra call arguments.
        const REST_PARAMETER = 1 << 0;
        /// Local inference completed for this closure.
        const INFERRED = 1 << 1;
        /// The closure captures variables from its environment.
        const CAPTURES = 1 << 2;
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
