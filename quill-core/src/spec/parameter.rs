use std::collections::BTreeSet;

use super::Modifier;
use crate::{annotation::AnnotationRef, type_ref::TypeRef};

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: TypeRef,
    pub annotations: Vec<AnnotationRef>,
    pub modifiers: BTreeSet<Modifier>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
        }
    }

    pub fn annotation(mut self, annotation: AnnotationRef) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.insert(modifier);
        self
    }
}
