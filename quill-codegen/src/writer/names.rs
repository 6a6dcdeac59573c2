//! Qualification of class and member names, and type rendering.

use std::{collections::BTreeSet, fmt};

use quill_core::{ClassName, MemberName, ParameterizedTypeName, TypeName, TypeRef, WildcardTypeName};

use super::CodeWriter;
use crate::{
    error::{Error, Result},
    imports::Importable,
};

impl<W: fmt::Write> CodeWriter<'_, W> {
    /// The shortest name under which `class` is visible at this point.
    pub fn lookup_class(&self, class: &ClassName) -> Result<String> {
        let package = class.package_name();
        let shadowed = self.is_shadowed(class.top_level_class_name());
        let mut omit_package = !shadowed && package == self.current_package();
        if !shadowed
            && self.strategy.omits_implicit_packages()
            && self.strategy.is_implicit_package(package)
        {
            omit_package = true;
        }

        let mut visited = BTreeSet::new();
        let mut chain = Vec::new();
        let mut current = class;
        loop {
            if !visited.insert(current.canonical_name()) {
                return Err(Error::EnclosingCycle {
                    name: class.canonical_name(),
                });
            }
            chain.push(current.simple_name());
            if self.resolves_in_scope(current) {
                omit_package = true;
                break;
            }
            if !self.collides(current) && self.imports.contains_class(current) {
                omit_package = true;
                break;
            }
            match current.enclosing_class_name() {
                Some(enclosing) => current = enclosing,
                None => break,
            }
        }

        let mut name = String::new();
        if !omit_package && !package.is_empty() {
            name.push_str(&package.to_string());
            name.push('.');
        }
        chain.reverse();
        name.push_str(&chain.join("."));
        Ok(name)
    }

    /// A member reference, bare when statically imported.
    pub fn lookup_member(&self, member: &MemberName) -> Result<String> {
        if self.is_statically_imported(member) {
            tracing::trace!(member = %member.canonical_name(), "static import elided owner");
            return Ok(member.simple_name().to_string());
        }
        match member.enclosing_class_name() {
            Some(owner) => Ok(format!("{}.{}", self.lookup_class(owner)?, member.simple_name())),
            None => {
                let package = member.package_name();
                if package.is_empty()
                    || package == self.current_package()
                    || self.imports.contains_member(member)
                {
                    Ok(member.simple_name().to_string())
                } else {
                    Ok(member.canonical_name())
                }
            }
        }
    }

    /// Whether `member` matches a static import exactly, by `Owner.*`, or by
    /// `package.*` for top-level members.
    pub(super) fn is_statically_imported(&self, member: &MemberName) -> bool {
        if self.static_imports.contains(&member.canonical_name()) {
            return true;
        }
        let wildcard = match member.enclosing_class_name() {
            Some(owner) => format!("{}.*", owner.canonical_name()),
            None if member.package_name().is_empty() => return false,
            None => format!("{}.*", member.package_name()),
        };
        self.static_imports.contains(&wildcard)
    }

    pub fn emit_type_ref(&mut self, type_ref: &TypeRef) -> Result<()> {
        for annotation in type_ref.annotations() {
            self.emit_annotation(annotation)?;
            self.emit(" ")?;
        }
        self.emit_type(&type_ref.type_name)?;
        if type_ref.is_nullable() {
            if let Some(suffix) = self.strategy.nullable_suffix() {
                self.emit(suffix)?;
            }
        }
        Ok(())
    }

    pub fn emit_type(&mut self, type_name: &TypeName) -> Result<()> {
        match type_name {
            TypeName::Primitive(primitive) => self.emit(primitive.keyword()),
            TypeName::Class(class) => {
                let name = self.lookup_class(class)?;
                self.emit(&name)
            }
            TypeName::Parameterized(parameterized) => self.emit_parameterized(parameterized),
            TypeName::Array(array) => {
                self.emit_type_ref(&array.component)?;
                self.emit("[]")
            }
            TypeName::Variable(variable) => self.emit(&variable.name),
            TypeName::Wildcard(wildcard) => match wildcard {
                WildcardTypeName::Empty => self.emit("?"),
                WildcardTypeName::Upper(bounds) => {
                    self.emit("? extends ")?;
                    self.emit_bounds(bounds)
                }
                WildcardTypeName::Lower(bounds) => {
                    self.emit("? super ")?;
                    self.emit_bounds(bounds)
                }
            },
        }
    }

    fn emit_parameterized(&mut self, parameterized: &ParameterizedTypeName) -> Result<()> {
        match &parameterized.enclosing {
            Some(enclosing) => {
                self.emit_parameterized(enclosing)?;
                self.emit(".")?;
                self.emit(parameterized.raw.simple_name())?;
            }
            None => {
                let name = self.lookup_class(&parameterized.raw)?;
                self.emit(&name)?;
            }
        }
        if parameterized.arguments.is_empty() {
            return Ok(());
        }
        self.emit("<")?;
        for (index, argument) in parameterized.arguments.iter().enumerate() {
            if index > 0 {
                self.emit(", ")?;
            }
            self.emit_type_ref(argument)?;
        }
        self.emit(">")
    }

    /// Bounds joined with ` & `.
    pub(super) fn emit_bounds(&mut self, bounds: &[TypeRef]) -> Result<()> {
        for (index, bound) in bounds.iter().enumerate() {
            if index > 0 {
                self.emit(" & ")?;
            }
            self.emit_type_ref(bound)?;
        }
        Ok(())
    }

    /// Whether a top-level name may not rely on same-package or implicit
    /// visibility because something else answers to its simple name.
    fn is_shadowed(&self, top_level: &ClassName) -> bool {
        let simple_name = top_level.simple_name();
        self.always_qualify.contains(simple_name)
            || self
                .imports
                .is_taken_by_other(simple_name, &Importable::Class(top_level.clone()))
            || (self.collides(top_level) && !self.resolves_in_scope(top_level))
    }

    /// Whether a type variable or a type in scope shares the simple name of
    /// `class` without being `class`.
    fn collides(&self, class: &ClassName) -> bool {
        let simple_name = class.simple_name();
        if self.is_type_variable(simple_name) {
            return true;
        }
        self.type_scopes.iter().any(|scope| {
            (scope.class.simple_name() == simple_name && scope.class != *class)
                || scope
                    .nested
                    .iter()
                    .any(|nested| nested == simple_name && scope.class.nested_class(nested.as_str()) != *class)
        })
    }

    /// Whether the innermost declaration named like `class` is `class`.
    fn resolves_in_scope(&self, class: &ClassName) -> bool {
        let simple_name = class.simple_name();
        if self.is_type_variable(simple_name) {
            return false;
        }
        for scope in self.type_scopes.iter().rev() {
            if scope.nested.iter().any(|nested| nested == simple_name) {
                return scope.class.nested_class(simple_name) == *class;
            }
            if scope.class.simple_name() == simple_name {
                return scope.class == *class;
            }
        }
        false
    }

    fn is_type_variable(&self, name: &str) -> bool {
        self.type_variables
            .iter()
            .any(|scope| scope.iter().any(|variable| variable == name))
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{
        AnnotationRef, ArrayTypeName, PackageName, Primitive, TypeVariableName,
    };

    use super::*;
    use crate::{
        FormatOptions, JavaStrategy, KotlinStrategy, imports::ImportTable, writer::TypeScope,
    };

    fn render(
        package: &str,
        imports: ImportTable,
        emit: impl FnOnce(&mut CodeWriter<'_, String>) -> Result<()>,
    ) -> String {
        let strategy = JavaStrategy::default();
        let options = FormatOptions::unbounded();
        let mut writer = CodeWriter::new(String::new(), &strategy, &options).with_imports(imports);
        writer.push_package(PackageName::of(package)).unwrap();
        emit(&mut writer).unwrap();
        writer.close().unwrap()
    }

    fn class(package: &str, name: &str) -> ClassName {
        ClassName::new(package, name)
    }

    fn table(classes: &[ClassName]) -> ImportTable {
        let mut table = ImportTable::new();
        for class in classes {
            table.insert(Importable::Class(class.clone()));
        }
        table
    }

    #[test]
    fn test_same_package_is_unqualified() {
        let out = render("com.example", ImportTable::new(), |w| {
            w.emit_type(&class("com.example", "Foo").into())?;
            w.emit(" ")?;
            w.emit_type(&class("com.other", "Foo").into())
        });
        assert_eq!(out, "Foo com.other.Foo");
    }

    #[test]
    fn test_imported_class_is_unqualified() {
        let list = class("java.util", "List");
        let out = render("com.example", table(&[list.clone()]), |w| {
            w.emit_type(&list.into())?;
            w.emit(" ")?;
            w.emit_type(&class("java.awt", "List").into())
        });
        assert_eq!(out, "List java.awt.List");
    }

    #[test]
    fn test_nested_class_through_imported_enclosing() {
        let map = class("java.util", "Map");
        let entry = map.nested_class("Entry");
        let out = render("com.example", table(&[map]), |w| w.emit_type(&entry.into()));
        assert_eq!(out, "Map.Entry");
    }

    #[test]
    fn test_java_lang_omitted_unless_shadowed() {
        let string = class("java.lang", "String");
        let out = render("com.example", ImportTable::new(), |w| {
            w.emit_type(&string.clone().into())
        });
        assert_eq!(out, "String");

        let shadow = table(&[class("com.example.text", "String")]);
        let out = render("com.example", shadow, |w| w.emit_type(&string.into()));
        assert_eq!(out, "java.lang.String");
    }

    #[test]
    fn test_qualify_java_lang() {
        let strategy = JavaStrategy::qualify_java_lang();
        let options = FormatOptions::unbounded();
        let mut writer = CodeWriter::new(String::new(), &strategy, &options);
        writer
            .emit_type(&class("java.lang", "Object").into())
            .unwrap();
        assert_eq!(writer.close().unwrap(), "java.lang.Object");
    }

    #[test]
    fn test_kotlin_default_imports() {
        let strategy = KotlinStrategy;
        let options = FormatOptions::unbounded();
        let mut writer = CodeWriter::new(String::new(), &strategy, &options);
        let list = TypeRef::of(class("kotlin.collections", "List")).nullable();
        writer.emit_type_ref(&list).unwrap();
        assert_eq!(writer.close().unwrap(), "List?");
    }

    #[test]
    fn test_type_variable_collision_forces_qualification() {
        let t = class("com.lib", "T");
        let out = render("com.example", table(&[t.clone()]), |w| {
            w.type_variables.push(vec!["T".to_string()]);
            w.emit_type(&t.into())
        });
        assert_eq!(out, "com.lib.T");
    }

    #[test]
    fn test_nested_type_in_scope() {
        let outer = class("com.example", "Outer");
        let inner = outer.nested_class("Inner");
        let foreign = class("com.lib", "Inner");
        let out = render("com.example", table(&[foreign.clone()]), |w| {
            w.type_scopes.push(TypeScope {
                class: outer,
                nested: vec!["Inner".to_string()],
            });
            w.emit_type(&inner.into())?;
            w.emit(" ")?;
            w.emit_type(&foreign.into())
        });
        assert_eq!(out, "Inner com.lib.Inner");
    }

    #[test]
    fn test_parameterized_list_of_string() {
        let list = ParameterizedTypeName::new(
            class("java.util", "List"),
            [TypeRef::of(class("java.lang", "String"))],
        );
        let out = render("", ImportTable::new(), |w| w.emit_type(&list.into()));
        assert_eq!(out, "java.util.List<String>");
    }

    #[test]
    fn test_wildcards_arrays_and_variables() {
        let number = TypeRef::of(class("java.lang", "Number"));
        let out = render("com.example", ImportTable::new(), |w| {
            w.emit_type(&WildcardTypeName::Upper(vec![number.clone()]).into())?;
            w.emit(" ")?;
            w.emit_type(&WildcardTypeName::Lower(vec![number.clone()]).into())?;
            w.emit(" ")?;
            w.emit_type(&WildcardTypeName::Empty.into())?;
            w.emit(" ")?;
            w.emit_type(&ArrayTypeName::of(Primitive::Int).into())?;
            w.emit(" ")?;
            w.emit_type(&TypeVariableName::new("E").into())
        });
        assert_eq!(out, "? extends Number ? super Number ? int[] E");
    }

    #[test]
    fn test_annotated_type_ref() {
        let nonnull = AnnotationRef::new(class("javax.annotation", "Nonnull"));
        let ty = TypeRef::of(class("com.example", "Foo")).annotated(nonnull);
        let out = render("com.example", ImportTable::new(), |w| w.emit_type_ref(&ty));
        assert_eq!(out, "@javax.annotation.Nonnull Foo");
    }

    #[test]
    fn test_member_lookup() {
        let max = class("java.lang", "Math").member("max");
        let out = render("com.example", ImportTable::new(), |w| {
            let name = w.lookup_member(&max)?;
            w.emit(&name)
        });
        assert_eq!(out, "Math.max");

        let strategy = JavaStrategy::default();
        let options = FormatOptions::unbounded().static_import("java.lang.Math.*");
        let writer = CodeWriter::new(String::new(), &strategy, &options);
        assert_eq!(writer.lookup_member(&max).unwrap(), "max");
    }

    #[test]
    fn test_top_level_member_through_package_wildcard() {
        let list_of = MemberName::new("kotlin.collections", "listOf");
        let strategy = KotlinStrategy;
        let options = FormatOptions::unbounded().static_import("kotlin.collections.*");
        let writer = CodeWriter::new(String::new(), &strategy, &options);
        assert_eq!(writer.lookup_member(&list_of).unwrap(), "listOf");

        let options = FormatOptions::unbounded().static_import("kotlin.*");
        let writer = CodeWriter::new(String::new(), &strategy, &options);
        assert_eq!(
            writer.lookup_member(&list_of).unwrap(),
            "kotlin.collections.listOf"
        );
    }
}
