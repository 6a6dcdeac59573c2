use super::{FunctionSpec, PropertySpec, TypeSpec};
use crate::{code::CodeValue, names::PackageName};

/// A top-level declaration of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileMember {
    Type(TypeSpec),
    Function(FunctionSpec),
    Property(PropertySpec),
}

/// A complete source file: package, leading comment and declarations.
///
/// Static imports declared here are merged with those from the formatting
/// options at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub package: PackageName,
    pub name: String,
    pub comment: Option<CodeValue>,
    pub members: Vec<FileMember>,
    pub static_imports: Vec<String>,
}

impl FileSpec {
    /// A file named after `spec`, containing it.
    pub fn for_type(package: impl Into<PackageName>, spec: TypeSpec) -> Self {
        Self {
            package: package.into(),
            name: spec.name.clone(),
            comment: None,
            members: vec![FileMember::Type(spec)],
            static_imports: Vec::new(),
        }
    }

    pub fn new(package: impl Into<PackageName>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            comment: None,
            members: Vec::new(),
            static_imports: Vec::new(),
        }
    }

    pub fn comment(mut self, comment: CodeValue) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn add_type(mut self, spec: TypeSpec) -> Self {
        self.members.push(FileMember::Type(spec));
        self
    }

    pub fn add_function(mut self, spec: FunctionSpec) -> Self {
        self.members.push(FileMember::Function(spec));
        self
    }

    pub fn add_property(mut self, spec: PropertySpec) -> Self {
        self.members.push(FileMember::Property(spec));
        self
    }

    /// Register `Type.member` or `Type.*` as a static import.
    pub fn add_static_import(mut self, import: impl Into<String>) -> Self {
        self.static_imports.push(import.into());
        self
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeSpec> {
        self.members.iter().filter_map(|member| match member {
            FileMember::Type(spec) => Some(spec),
            _ => None,
        })
    }
}
