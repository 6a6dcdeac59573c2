use std::collections::BTreeSet;

use super::Modifier;
use crate::{annotation::AnnotationRef, code::CodeValue, type_ref::TypeRef};

/// A field declaration with an optional initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: String,
    pub ty: TypeRef,
    pub doc: Option<CodeValue>,
    pub annotations: Vec<AnnotationRef>,
    pub modifiers: BTreeSet<Modifier>,
    pub initializer: Option<CodeValue>,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            initializer: None,
        }
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

    pub fn initializer(mut self, initializer: CodeValue) -> Self {
        self.initializer = Some(initializer);
        self
    }
}
