//! Declaration emission in Java syntax.

use std::{collections::BTreeSet, fmt};

use quill_core::{
    AnnotationRef, ClassName, CodeValue, FileMember, FileSpec, FunctionSpec, Modifier,
    ParameterSpec, PropertySpec, TypeKind, TypeName, TypeSpec, TypeVariableName,
};

use super::{CodeWriter, TypeScope};
use crate::{
    error::{Error, Result},
    imports::Importable,
};

impl<W: fmt::Write> CodeWriter<'_, W> {
    /// Emit a complete file: comment, package, imports and declarations.
    pub fn emit_file(&mut self, file: &FileSpec) -> Result<()> {
        self.check_declarations()?;
        if let Some(comment) = &file.comment {
            self.comment = true;
            let emitted = self.emit_code(comment).and_then(|()| self.ensure_newline());
            self.comment = false;
            emitted?;
            self.emit("\n")?;
        }

        if !file.package.is_empty() {
            let statement = self.strategy.package_statement(&file.package);
            self.emit(&statement)?;
            self.emit("\n\n")?;
        }
        self.push_package(file.package.clone())?;

        let imports = self.import_lines();
        for line in &imports {
            self.emit(line)?;
            self.emit("\n")?;
        }
        if !imports.is_empty() {
            self.emit("\n")?;
        }

        for (index, member) in file.members.iter().enumerate() {
            if index > 0 {
                self.emit("\n")?;
            }
            match member {
                FileMember::Type(spec) => self.emit_type_spec(spec, &BTreeSet::new())?,
                FileMember::Function(spec) => self.emit_function(spec, &BTreeSet::new())?,
                FileMember::Property(spec) => self.emit_property(spec, &BTreeSet::new())?,
            }
        }
        self.pop_package();
        Ok(())
    }

    /// Sorted import lines: regular imports first, then static ones.
    fn import_lines(&self) -> Vec<String> {
        let mut regular: Vec<String> = self
            .imports
            .iter()
            .filter(|(_, importable)| !self.is_implicit(importable))
            .map(|(_, importable)| importable.canonical_name())
            .collect();
        regular.sort();

        regular
            .iter()
            .map(|name| self.strategy.import_statement(name, false))
            .chain(
                self.static_imports
                    .iter()
                    .map(|name| self.strategy.import_statement(name, true)),
            )
            .collect()
    }

    fn is_implicit(&self, importable: &Importable) -> bool {
        let package = importable.package_name();
        match importable {
            Importable::Class(class) if class.enclosing_class_name().is_none() => {
                self.strategy.omits_implicit_packages() && self.strategy.is_implicit_package(package)
            }
            _ => false,
        }
    }

    pub fn emit_type_spec(&mut self, spec: &TypeSpec, implicit: &BTreeSet<Modifier>) -> Result<()> {
        self.check_declarations()?;
        self.check_identifier(&spec.name, "type")?;
        let class = match self.type_scopes.last() {
            Some(scope) => scope.class.nested_class(spec.name.as_str()),
            None => ClassName::new(self.current_package().clone(), spec.name.as_str()),
        };
        tracing::trace!(class = %class, "emitting type");

        self.emit_doc(spec.doc.as_ref())?;
        self.emit_annotation_lines(&spec.annotations)?;
        self.emit_modifiers(&spec.modifiers, implicit)?;
        self.emit(spec.kind.keyword())?;
        self.emit(" ")?;
        self.emit(&spec.name)?;

        self.type_variables.push(variable_names(&spec.type_variables));
        self.type_scopes.push(TypeScope {
            class,
            nested: spec.nested_names().map(str::to_string).collect(),
        });
        let emitted = self.emit_type_body(spec);
        self.type_scopes.pop();
        self.type_variables.pop();
        emitted?;

        self.emit("}\n")
    }

    fn emit_type_body(&mut self, spec: &TypeSpec) -> Result<()> {
        self.emit_type_variables(&spec.type_variables)?;

        let (extends, implements): (Vec<_>, Vec<_>) = match spec.kind {
            TypeKind::Class => (spec.superclass.iter().collect(), spec.superinterfaces.iter().collect()),
            TypeKind::Interface => (spec.superinterfaces.iter().collect(), Vec::new()),
            TypeKind::Enum => (Vec::new(), spec.superinterfaces.iter().collect()),
            TypeKind::Annotation => (Vec::new(), Vec::new()),
        };
        for (keyword, types) in [(" extends", extends), (" implements", implements)] {
            for (index, ty) in types.into_iter().enumerate() {
                self.emit(if index == 0 { keyword } else { "," })?;
                self.wrapping_space()?;
                self.emit_type_ref(ty)?;
            }
        }
        self.emit(" {\n")?;
        self.indent(1);

        let interface_like = spec.is_interface_like();
        let field_modifiers = implicit_modifiers(interface_like, &[Modifier::Public, Modifier::Static, Modifier::Final]);
        let function_modifiers = implicit_modifiers(interface_like, &[Modifier::Public, Modifier::Abstract]);
        let type_modifiers = implicit_modifiers(interface_like, &[Modifier::Public, Modifier::Static]);

        let mut first = true;
        let constants = spec.enum_constants.len();
        for (index, (name, arguments)) in spec.enum_constants.iter().enumerate() {
            self.check_identifier(name, "enum constant")?;
            self.emit(name)?;
            if let Some(arguments) = arguments {
                self.emit("(")?;
                self.emit_code(arguments)?;
                self.emit(")")?;
            }
            if index + 1 < constants {
                self.emit(",\n")?;
            } else if spec.properties.is_empty() && spec.functions.is_empty() && spec.types.is_empty() {
                self.emit("\n")?;
            } else {
                self.emit(";\n")?;
            }
            first = false;
        }

        for property in &spec.properties {
            if !first {
                self.emit("\n")?;
            }
            self.emit_property(property, &field_modifiers)?;
            first = false;
        }
        for function in &spec.functions {
            if !first {
                self.emit("\n")?;
            }
            self.emit_function(function, &function_modifiers)?;
            first = false;
        }
        for nested in &spec.types {
            if !first {
                self.emit("\n")?;
            }
            self.emit_type_spec(nested, &type_modifiers)?;
            first = false;
        }

        self.unindent(1)
    }

    pub fn emit_function(&mut self, spec: &FunctionSpec, implicit: &BTreeSet<Modifier>) -> Result<()> {
        self.check_declarations()?;
        self.emit_doc(spec.doc.as_ref())?;
        self.emit_annotation_lines(&spec.annotations)?;
        self.emit_modifiers(&spec.modifiers, implicit)?;

        self.type_variables.push(variable_names(&spec.type_variables));
        let emitted = self.emit_function_signature(spec).and_then(|()| self.emit_function_body(spec));
        self.type_variables.pop();
        emitted
    }

    fn emit_function_signature(&mut self, spec: &FunctionSpec) -> Result<()> {
        if !spec.type_variables.is_empty() {
            self.emit_type_variables(&spec.type_variables)?;
            self.emit(" ")?;
        }

        if spec.is_constructor() {
            let name = match self.type_scopes.last() {
                Some(scope) => scope.class.simple_name().to_string(),
                None => return Err(Error::ConstructorOutsideType),
            };
            self.emit(&name)?;
        } else {
            self.check_identifier(&spec.name, "function")?;
            match &spec.return_type {
                Some(return_type) => self.emit_type_ref(return_type)?,
                None => self.emit("void")?,
            }
            self.emit(" ")?;
            self.emit(&spec.name)?;
        }

        self.emit("(")?;
        let last = spec.parameters.len().saturating_sub(1);
        for (index, parameter) in spec.parameters.iter().enumerate() {
            if index > 0 {
                self.emit(",")?;
                self.wrapping_space()?;
            }
            self.emit_parameter(parameter, spec.varargs && index == last)?;
        }
        self.emit(")")?;

        if let Some(default_value) = &spec.default_value {
            self.emit(" default ")?;
            self.emit_code(default_value)?;
        }

        for (index, exception) in spec.exceptions.iter().enumerate() {
            self.emit(if index == 0 { " throws" } else { "," })?;
            self.wrapping_space()?;
            let exception = exception.clone().erase();
            self.emit_type_ref(&exception)?;
        }
        Ok(())
    }

    fn emit_function_body(&mut self, spec: &FunctionSpec) -> Result<()> {
        let Some(body) = &spec.body else {
            return self.emit(";\n");
        };
        self.emit(" {\n")?;
        self.indent(1);
        self.emit_code(body)?;
        self.ensure_newline()?;
        self.unindent(1)?;
        self.emit("}\n")
    }

    /// A field declaration. The initializer may hold statements of its own,
    /// so the terminator is written directly instead of through a statement.
    pub fn emit_property(&mut self, spec: &PropertySpec, implicit: &BTreeSet<Modifier>) -> Result<()> {
        self.check_declarations()?;
        self.check_identifier(&spec.name, "property")?;
        self.emit_doc(spec.doc.as_ref())?;
        self.emit_annotation_lines(&spec.annotations)?;
        self.emit_modifiers(&spec.modifiers, implicit)?;
        self.emit_type_ref(&spec.ty)?;
        self.emit(" ")?;
        self.emit(&spec.name)?;
        if let Some(initializer) = &spec.initializer {
            self.emit(" =")?;
            self.wrapping_space()?;
            self.emit_code(initializer)?;
        }
        if let Some(terminator) = self.strategy.statement_terminator() {
            self.emit(terminator.encode_utf8(&mut [0; 4]))?;
        }
        self.emit("\n")
    }

    pub fn emit_parameter(&mut self, spec: &ParameterSpec, varargs: bool) -> Result<()> {
        self.check_identifier(&spec.name, "parameter")?;
        for annotation in &spec.annotations {
            self.emit_annotation(annotation)?;
            self.emit(" ")?;
        }
        self.emit_modifiers(&spec.modifiers, &BTreeSet::new())?;
        if varargs {
            match &spec.ty.type_name {
                TypeName::Array(array) => self.emit_type_ref(&array.component)?,
                _ => self.emit_type_ref(&spec.ty)?,
            }
            self.emit("...")?;
        } else {
            self.emit_type_ref(&spec.ty)?;
        }
        self.emit(" ")?;
        self.emit(&spec.name)
    }

    /// `/** ... */` with every line prefixed.
    fn emit_doc(&mut self, doc: Option<&CodeValue>) -> Result<()> {
        let Some(doc) = doc.filter(|doc| !doc.is_empty()) else {
            return Ok(());
        };
        self.emit("/**\n")?;
        self.doc = true;
        let emitted = self.emit_code(doc).and_then(|()| self.ensure_newline());
        self.doc = false;
        emitted?;
        self.emit(" */\n")
    }

    fn emit_annotation_lines(&mut self, annotations: &[AnnotationRef]) -> Result<()> {
        for annotation in annotations {
            self.emit_annotation(annotation)?;
            self.emit("\n")?;
        }
        Ok(())
    }

    fn emit_modifiers(&mut self, modifiers: &BTreeSet<Modifier>, implicit: &BTreeSet<Modifier>) -> Result<()> {
        for modifier in modifiers.difference(implicit) {
            self.emit(modifier.keyword())?;
            self.emit(" ")?;
        }
        Ok(())
    }

    /// `<T, U extends A & B>`; nothing when `variables` is empty.
    fn emit_type_variables(&mut self, variables: &[TypeVariableName]) -> Result<()> {
        if variables.is_empty() {
            return Ok(());
        }
        self.emit("<")?;
        for (index, variable) in variables.iter().enumerate() {
            if index > 0 {
                self.emit(", ")?;
            }
            self.check_identifier(&variable.name, "type variable")?;
            self.emit(&variable.name)?;
            if !variable.bounds.is_empty() {
                self.emit(" extends ")?;
                self.emit_bounds(&variable.bounds)?;
            }
        }
        self.emit(">")
    }

    fn check_declarations(&self) -> Result<()> {
        if self.strategy.writes_java_declarations() {
            Ok(())
        } else {
            Err(Error::UnsupportedDeclarations {
                language: self.strategy.language(),
            })
        }
    }

    fn check_identifier(&self, name: &str, context: &'static str) -> Result<()> {
        if self.strategy.is_identifier(name) {
            Ok(())
        } else {
            Err(Error::InvalidIdentifier {
                name: name.to_string(),
                context,
            })
        }
    }
}

fn variable_names(variables: &[TypeVariableName]) -> Vec<String> {
    variables.iter().map(|variable| variable.name.clone()).collect()
}

fn implicit_modifiers(interface_like: bool, modifiers: &[Modifier]) -> BTreeSet<Modifier> {
    if interface_like {
        modifiers.iter().copied().collect()
    } else {
        BTreeSet::new()
    }
}
