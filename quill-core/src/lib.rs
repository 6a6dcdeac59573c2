//! Immutable model for Quill source emission.
//!
//! This crate holds the values the emission core walks:
//!
//! - [`names`] - [`PackageName`], [`ClassName`], [`MemberName`]
//! - [`types`] - the closed [`TypeName`] set
//! - [`type_ref`] - [`TypeRef`] and its typed status bag
//! - [`annotation`] - [`AnnotationRef`] usages
//! - [`code`] - [`CodeValue`] templates
//! - [`spec`] - declarative file, type, function and property specs
//!
//! Everything here is built once and never mutated afterwards.

pub mod annotation;
pub mod code;
mod error;
pub mod names;
pub mod spec;
pub mod type_ref;
pub mod types;

pub use annotation::{AnnotationBuilder, AnnotationRef, MemberValue};
pub use code::{Arg, CodeBuilder, CodeValue, Literal, Part};
pub use error::CodeError;
pub use names::{ClassName, MemberName, PackageName};
pub use spec::{
    FileMember, FileSpec, FunctionSpec, Modifier, ParameterSpec, PropertySpec, TypeKind, TypeSpec,
};
pub use type_ref::{ANNOTATIONS, NULLABLE, Status, StatusKey, TypeRef, TypeRefBuilder};
pub use types::{
    ArrayTypeName, ParameterizedTypeName, Primitive, TypeName, TypeVariableName, WildcardTypeName,
};
