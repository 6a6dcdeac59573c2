//! The closed set of type names the writer knows how to emit.

use crate::{names::ClassName, type_ref::TypeRef};

/// A reference to a type in emitted source.
///
/// The set is closed: the writer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// A primitive such as `int` or `void`.
    Primitive(Primitive),
    /// A declared class.
    Class(ClassName),
    /// A class applied to type arguments, e.g. `List<String>`.
    Parameterized(ParameterizedTypeName),
    /// An array of a component type.
    Array(ArrayTypeName),
    /// A type variable such as `T`.
    Variable(TypeVariableName),
    /// A wildcard such as `? extends Number`.
    Wildcard(WildcardTypeName),
}

/// Java primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl Primitive {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Char => "char",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

/// A raw class applied to type arguments.
///
/// Inner classes of generic classes keep their parameterized outer type in
/// `enclosing`, e.g. `Outer<String>.Inner<Integer>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterizedTypeName {
    pub enclosing: Option<Box<ParameterizedTypeName>>,
    pub raw: ClassName,
    pub arguments: Vec<TypeRef>,
}

impl ParameterizedTypeName {
    pub fn new(raw: ClassName, arguments: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            enclosing: None,
            raw,
            arguments: arguments.into_iter().collect(),
        }
    }

    /// A class nested in this parameterized type, with its own arguments.
    pub fn nested_class(
        &self,
        simple_name: &str,
        arguments: impl IntoIterator<Item = TypeRef>,
    ) -> Self {
        Self {
            enclosing: Some(Box::new(self.clone())),
            raw: self.raw.nested_class(simple_name),
            arguments: arguments.into_iter().collect(),
        }
    }
}

/// An array type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayTypeName {
    pub component: Box<TypeRef>,
}

impl ArrayTypeName {
    pub fn of(component: impl Into<TypeRef>) -> Self {
        Self {
            component: Box::new(component.into()),
        }
    }
}

/// A named type variable with ordered bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeVariableName {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeVariableName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bounded(name: impl Into<String>, bounds: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            name: name.into(),
            bounds: bounds.into_iter().collect(),
        }
    }
}

/// A wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardTypeName {
    /// `?`
    Empty,
    /// `? super B`
    Lower(Vec<TypeRef>),
    /// `? extends B`
    Upper(Vec<TypeRef>),
}

impl From<Primitive> for TypeName {
    fn from(primitive: Primitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl From<ClassName> for TypeName {
    fn from(class: ClassName) -> Self {
        Self::Class(class)
    }
}

impl From<ParameterizedTypeName> for TypeName {
    fn from(parameterized: ParameterizedTypeName) -> Self {
        Self::Parameterized(parameterized)
    }
}

impl From<ArrayTypeName> for TypeName {
    fn from(array: ArrayTypeName) -> Self {
        Self::Array(array)
    }
}

impl From<TypeVariableName> for TypeName {
    fn from(variable: TypeVariableName) -> Self {
        Self::Variable(variable)
    }
}

impl From<WildcardTypeName> for TypeName {
    fn from(wildcard: WildcardTypeName) -> Self {
        Self::Wildcard(wildcard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let string = ClassName::new("java.lang", "String");
        let a = ParameterizedTypeName::new(
            ClassName::new("java.util", "List"),
            [TypeRef::of(string.clone())],
        );
        let b = ParameterizedTypeName::new(
            ClassName::new("java.util", "List"),
            [TypeRef::of(string)],
        );
        assert_eq!(TypeName::from(a), TypeName::from(b));
    }

    #[test]
    fn test_nested_parameterized() {
        let outer = ParameterizedTypeName::new(
            ClassName::new("com.example", "Outer"),
            [TypeRef::of(TypeVariableName::new("T"))],
        );
        let inner = outer.nested_class("Inner", []);
        assert_eq!(inner.raw.canonical_name(), "com.example.Outer.Inner");
        assert_eq!(inner.enclosing.as_deref(), Some(&outer));
    }
}
