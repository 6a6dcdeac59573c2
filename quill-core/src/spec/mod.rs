//! Declarative specifications of the declarations in a source file.
//!
//! Specs are plain values assembled with consuming setters, the last call
//! for a field winning and collection adders appending in call order.

mod file;
mod function;
mod modifier;
mod parameter;
mod property;
mod type_spec;

pub use file::{FileMember, FileSpec};
pub use function::FunctionSpec;
pub use modifier::Modifier;
pub use parameter::ParameterSpec;
pub use property::PropertySpec;
pub use type_spec::{TypeKind, TypeSpec};
