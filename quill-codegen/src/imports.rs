//! Import collection: one read-only pass over a file's spec tree.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use quill_core::{
    AnnotationRef, ClassName, CodeValue, FileMember, FileSpec, FunctionSpec, Literal, MemberName,
    MemberValue, PackageName, ParameterSpec, Part, PropertySpec, TypeName, TypeRef, TypeSpec,
    TypeVariableName, WildcardTypeName,
};

/// A name that can be brought into scope by an import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Importable {
    Class(ClassName),
    Member(MemberName),
}

impl Importable {
    pub fn simple_name(&self) -> &str {
        match self {
            Self::Class(class) => class.simple_name(),
            Self::Member(member) => member.simple_name(),
        }
    }

    pub fn package_name(&self) -> &PackageName {
        match self {
            Self::Class(class) => class.package_name(),
            Self::Member(member) => member.package_name(),
        }
    }

    pub fn canonical_name(&self) -> String {
        match self {
            Self::Class(class) => class.canonical_name(),
            Self::Member(member) => member.canonical_name(),
        }
    }
}

/// Simple name to the one qualified name it stands for in a file.
///
/// Maintains insertion order, which is the order names were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    entries: IndexMap<String, Importable>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, simple_name: &str) -> Option<&Importable> {
        self.entries.get(simple_name)
    }

    /// Whether `class` itself is what its simple name refers to.
    pub fn contains_class(&self, class: &ClassName) -> bool {
        matches!(self.get(class.simple_name()), Some(Importable::Class(imported)) if imported == class)
    }

    pub fn contains_member(&self, member: &MemberName) -> bool {
        matches!(self.get(member.simple_name()), Some(Importable::Member(imported)) if imported == member)
    }

    /// Whether `simple_name` is taken by something other than `candidate`.
    pub fn is_taken_by_other(&self, simple_name: &str, candidate: &Importable) -> bool {
        self.get(simple_name).is_some_and(|imported| imported != candidate)
    }

    /// Register `importable` unless its simple name is already taken.
    ///
    /// Returns whether the entry was added.
    pub fn insert(&mut self, importable: Importable) -> bool {
        let simple_name = importable.simple_name().to_string();
        if self.entries.contains_key(&simple_name) {
            return false;
        }
        self.entries.insert(simple_name, importable);
        true
    }

    /// Iterate over all entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Importable)> {
        self.entries.iter().map(|(name, importable)| (name.as_str(), importable))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walks a spec tree and records which names may be written unqualified.
///
/// The first name registered for a simple name wins; later names sharing
/// that simple name stay unregistered and are written fully qualified.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
///
/// use quill_codegen::ImportCollector;
/// use quill_core::{ClassName, PackageName, TypeName};
///
/// let package = PackageName::of("com.example");
/// let always_qualify = BTreeSet::new();
/// let mut imports = ImportCollector::new(&package, &always_qualify);
/// imports.visit_type_name(&TypeName::from(ClassName::new("java.util", "List")));
/// imports.visit_type_name(&TypeName::from(ClassName::new("java.awt", "List")));
/// let table = imports.finish();
///
/// assert!(table.contains_class(&ClassName::new("java.util", "List")));
/// assert!(!table.contains_class(&ClassName::new("java.awt", "List")));
/// ```
#[derive(Debug)]
pub struct ImportCollector<'a> {
    package: &'a PackageName,
    always_qualify: &'a BTreeSet<String>,
    reserved: BTreeSet<String>,
    table: ImportTable,
}

impl<'a> ImportCollector<'a> {
    pub fn new(package: &'a PackageName, always_qualify: &'a BTreeSet<String>) -> Self {
        Self {
            package,
            always_qualify,
            reserved: BTreeSet::new(),
            table: ImportTable::new(),
        }
    }

    /// Collect the imports of a whole file.
    ///
    /// Names of the file's own top-level types are reserved so no import
    /// can clash with a declaration.
    pub fn collect_file(mut self, file: &FileSpec) -> ImportTable {
        self.reserved
            .extend(file.types().map(|spec| spec.name.clone()));
        if let Some(comment) = &file.comment {
            self.visit_code(comment);
        }
        for member in &file.members {
            match member {
                FileMember::Type(spec) => self.visit_type_spec(spec),
                FileMember::Function(spec) => self.visit_function(spec),
                FileMember::Property(spec) => self.visit_property(spec),
            }
        }
        tracing::debug!(
            package = %self.package,
            imports = self.table.len(),
            "collected imports"
        );
        self.finish()
    }

    pub fn finish(self) -> ImportTable {
        self.table
    }

    pub fn visit_type_spec(&mut self, spec: &TypeSpec) {
        if let Some(doc) = &spec.doc {
            self.visit_code(doc);
        }
        self.visit_annotations(&spec.annotations);
        self.visit_type_variables(&spec.type_variables);
        if let Some(superclass) = &spec.superclass {
            self.visit_type_ref(superclass);
        }
        for interface in &spec.superinterfaces {
            self.visit_type_ref(interface);
        }
        for arguments in spec.enum_constants.values().flatten() {
            self.visit_code(arguments);
        }
        for property in &spec.properties {
            self.visit_property(property);
        }
        for function in &spec.functions {
            self.visit_function(function);
        }
        for nested in &spec.types {
            self.visit_type_spec(nested);
        }
    }

    pub fn visit_function(&mut self, spec: &FunctionSpec) {
        if let Some(doc) = &spec.doc {
            self.visit_code(doc);
        }
        self.visit_annotations(&spec.annotations);
        self.visit_type_variables(&spec.type_variables);
        if let Some(return_type) = &spec.return_type {
            self.visit_type_ref(return_type);
        }
        for parameter in &spec.parameters {
            self.visit_parameter(parameter);
        }
        for exception in &spec.exceptions {
            self.visit_annotations(exception.annotations());
            self.visit_class(&exception.type_name);
        }
        if let Some(default_value) = &spec.default_value {
            self.visit_code(default_value);
        }
        if let Some(body) = &spec.body {
            self.visit_code(body);
        }
    }

    pub fn visit_property(&mut self, spec: &PropertySpec) {
        if let Some(doc) = &spec.doc {
            self.visit_code(doc);
        }
        self.visit_annotations(&spec.annotations);
        self.visit_type_ref(&spec.ty);
        if let Some(initializer) = &spec.initializer {
            self.visit_code(initializer);
        }
    }

    pub fn visit_parameter(&mut self, spec: &ParameterSpec) {
        self.visit_annotations(&spec.annotations);
        self.visit_type_ref(&spec.ty);
    }

    pub fn visit_annotation(&mut self, annotation: &AnnotationRef) {
        self.visit_class(annotation.type_name());
        for value in annotation.members().values() {
            match value {
                MemberValue::Single(code) => self.visit_code(code),
                MemberValue::Multiple(codes) => codes.iter().for_each(|code| self.visit_code(code)),
            }
        }
    }

    pub fn visit_code(&mut self, code: &CodeValue) {
        for part in code.parts() {
            match part {
                Part::Type(type_name) => self.visit_type_name(type_name),
                Part::TypeRef(type_ref) => self.visit_type_ref(type_ref),
                Part::Member(member) => self.visit_member(member),
                Part::Code(nested) => self.visit_code(nested),
                Part::Literal(literal) => self.visit_literal(literal),
                Part::Text(_)
                | Part::Skip
                | Part::Name(_)
                | Part::String(_)
                | Part::Indent(_)
                | Part::Unindent(_)
                | Part::StatementBegin
                | Part::StatementEnd
                | Part::WrappingSpace
                | Part::ZeroWidthSpace => {}
            }
        }
    }

    pub fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        self.visit_annotations(type_ref.annotations());
        self.visit_type_name(&type_ref.type_name);
    }

    pub fn visit_type_name(&mut self, type_name: &TypeName) {
        match type_name {
            TypeName::Primitive(_) => {}
            TypeName::Class(class) => self.visit_class(class),
            TypeName::Parameterized(parameterized) => {
                self.visit_class(&parameterized.raw);
                for argument in &parameterized.arguments {
                    self.visit_type_ref(argument);
                }
            }
            TypeName::Array(array) => self.visit_type_ref(&array.component),
            TypeName::Variable(variable) => {
                for bound in &variable.bounds {
                    self.visit_type_ref(bound);
                }
            }
            TypeName::Wildcard(WildcardTypeName::Empty) => {}
            TypeName::Wildcard(WildcardTypeName::Lower(bounds))
            | TypeName::Wildcard(WildcardTypeName::Upper(bounds)) => {
                for bound in bounds {
                    self.visit_type_ref(bound);
                }
            }
        }
    }

    pub fn visit_member(&mut self, member: &MemberName) {
        match member.enclosing_class_name() {
            Some(class) => self.visit_class(class),
            None => self.register(Importable::Member(member.clone())),
        }
    }

    pub fn visit_class(&mut self, class: &ClassName) {
        self.register(Importable::Class(class.clone()));
    }

    fn visit_literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Text(_) => {}
            Literal::Annotation(annotation) => self.visit_annotation(annotation),
            Literal::Type(spec) => self.visit_type_spec(spec),
            Literal::Function(spec) => self.visit_function(spec),
            Literal::Property(spec) => self.visit_property(spec),
            Literal::Parameter(spec) => self.visit_parameter(spec),
        }
    }

    fn visit_annotations(&mut self, annotations: &[AnnotationRef]) {
        for annotation in annotations {
            self.visit_annotation(annotation);
        }
    }

    fn visit_type_variables(&mut self, variables: &[TypeVariableName]) {
        for variable in variables {
            for bound in &variable.bounds {
                self.visit_type_ref(bound);
            }
        }
    }

    fn register(&mut self, importable: Importable) {
        let package = importable.package_name();
        if package.is_empty() || package == self.package {
            return;
        }
        let simple_name = importable.simple_name();
        if self.always_qualify.contains(simple_name) || self.reserved.contains(simple_name) {
            return;
        }
        let canonical = importable.canonical_name();
        if self.table.insert(importable) {
            tracing::trace!(%canonical, "registered import");
        } else {
            tracing::trace!(%canonical, "simple name taken, will qualify");
        }
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{Arg, ParameterizedTypeName};

    use super::*;

    fn collect(package: &str, visit: impl FnOnce(&mut ImportCollector<'_>)) -> ImportTable {
        let package = PackageName::of(package);
        let always_qualify = BTreeSet::from(["Override".to_string()]);
        let mut collector = ImportCollector::new(&package, &always_qualify);
        visit(&mut collector);
        collector.finish()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let first = ClassName::new("com.a", "Node");
        let second = ClassName::new("com.b", "Node");
        let table = collect("app", |c| {
            c.visit_class(&first);
            c.visit_class(&second);
            c.visit_class(&first);
        });
        assert_eq!(table.len(), 1);
        assert!(table.contains_class(&first));
        assert!(!table.contains_class(&second));
    }

    #[test]
    fn test_skips_empty_same_package_and_always_qualify() {
        let table = collect("app", |c| {
            c.visit_class(&ClassName::new("", "Bare"));
            c.visit_class(&ClassName::new("app", "Local"));
            c.visit_class(&ClassName::new("java.lang", "Override"));
        });
        assert!(table.is_empty());
    }

    #[test]
    fn test_visits_nested_type_positions() {
        let list = ClassName::new("java.util", "List");
        let number = ClassName::new("java.lang", "Number");
        let ty = TypeName::from(ParameterizedTypeName::new(
            list.clone(),
            [TypeRef::of(WildcardTypeName::Upper(vec![TypeRef::of(
                number.clone(),
            )]))],
        ));
        let table = collect("app", |c| c.visit_type_name(&ty));
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["List", "Number"]);
    }

    #[test]
    fn test_visits_code_literals_and_members() {
        let inject = AnnotationRef::new(ClassName::new("javax.inject", "Inject"));
        let code = CodeValue::of(
            "%L %M(%M)",
            [
                Arg::from(Literal::from(inject)),
                Arg::from(ClassName::new("java.util", "Collections").member("emptyList")),
                Arg::from(MemberName::new("kotlin.collections", "listOf")),
            ],
        )
        .unwrap();
        let table = collect("app", |c| c.visit_code(&code));
        assert!(table.contains_class(&ClassName::new("javax.inject", "Inject")));
        assert!(table.contains_class(&ClassName::new("java.util", "Collections")));
        assert!(table.contains_member(&MemberName::new("kotlin.collections", "listOf")));
    }

    #[test]
    fn test_file_reserves_declared_type_names() {
        let file = FileSpec::for_type(
            "app",
            TypeSpec::class("Node").property(PropertySpec::new(
                "other",
                ClassName::new("com.other", "Node"),
            )),
        );
        let package = PackageName::of("app");
        let always_qualify = BTreeSet::new();
        let table = ImportCollector::new(&package, &always_qualify).collect_file(&file);
        assert!(table.is_empty());
    }
}
