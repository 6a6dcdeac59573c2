//! Class, interface, enum and annotation type declarations.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use super::{FunctionSpec, Modifier, PropertySpec};
use crate::{
    annotation::AnnotationRef, code::CodeValue, type_ref::TypeRef, types::TypeVariableName,
};

/// The kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl TypeKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::Annotation => "@interface",
        }
    }
}

/// A declarative specification for a type and its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub kind: TypeKind,
    pub name: String,
    pub doc: Option<CodeValue>,
    pub annotations: Vec<AnnotationRef>,
    pub modifiers: BTreeSet<Modifier>,
    pub type_variables: Vec<TypeVariableName>,
    pub superclass: Option<TypeRef>,
    pub superinterfaces: Vec<TypeRef>,
    /// Enum constants with optional constructor arguments.
    pub enum_constants: IndexMap<String, Option<CodeValue>>,
    pub properties: Vec<PropertySpec>,
    pub functions: Vec<FunctionSpec>,
    pub types: Vec<TypeSpec>,
}

impl TypeSpec {
    fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            doc: None,
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            superclass: None,
            superinterfaces: Vec::new(),
            enum_constants: IndexMap::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            types: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Enum, name)
    }

    pub fn annotation_type(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Annotation, name)
    }

    pub fn doc(mut self, doc: CodeValue) -> Self {
        self.doc = Some(doc);
        self
    }

    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers.extend(modifiers);
        self
    }

    pub fn type_variable(mut self, variable: TypeVariableName) -> Self {
        self.type_variables.push(variable);
        self
    }

    pub fn superclass(mut self, superclass: impl Into<TypeRef>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn superinterface(mut self, interface: impl Into<TypeRef>) -> Self {
        self.superinterfaces.push(interface.into());
        self
    }

    pub fn enum_constant(mut self, name: impl Into<String>) -> Self {
        self.enum_constants.insert(name.into(), None);
        self
    }

    /// An enum constant passing `arguments` to the enum constructor.
    pub fn enum_constant_with(mut self, name: impl Into<String>, arguments: CodeValue) -> Self {
        self.enum_constants.insert(name.into(), Some(arguments));
        self
    }

    pub fn property(mut self, property: PropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    pub fn function(mut self, function: FunctionSpec) -> Self {
        self.functions.push(function);
        self
    }

    pub fn nested(mut self, spec: TypeSpec) -> Self {
        self.types.push(spec);
        self
    }

    /// Simple names of the types declared directly inside this one.
    pub fn nested_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|spec| spec.name.as_str())
    }

    pub fn is_interface_like(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_names_in_order() {
        let outer = TypeSpec::class("Outer")
            .nested(TypeSpec::class("A"))
            .nested(TypeSpec::interface("B"));
        assert_eq!(outer.nested_names().collect::<Vec<_>>(), ["A", "B"]);
    }

    #[test]
    fn test_enum_constants_keep_order() {
        let spec = TypeSpec::enumeration("Color")
            .enum_constant("RED")
            .enum_constant_with("GREEN", CodeValue::text("2"))
            .enum_constant("BLUE");
        let names: Vec<_> = spec.enum_constants.keys().map(String::as_str).collect();
        assert_eq!(names, ["RED", "GREEN", "BLUE"]);
        assert!(spec.enum_constants["GREEN"].is_some());
    }
}
