//! Annotation usages.

use indexmap::{IndexMap, map::Entry};

use crate::{code::CodeValue, names::ClassName};

/// The value of one annotation member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValue {
    Single(CodeValue),
    Multiple(Vec<CodeValue>),
}

impl MemberValue {
    pub fn values(&self) -> &[CodeValue] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }
}

/// An annotation type plus its member values in declaration order.
///
/// ```
/// use quill_core::{AnnotationRef, ClassName, CodeValue, MemberValue};
///
/// let anno = AnnotationRef::builder(ClassName::new("com.example", "Anno"))
///     .add_member("value", CodeValue::text("1"))
///     .add_member("value", CodeValue::text("2"))
///     .build();
/// assert!(matches!(anno.members()["value"], MemberValue::Multiple(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRef {
    type_name: ClassName,
    members: IndexMap<String, MemberValue>,
}

impl AnnotationRef {
    /// An annotation without members.
    pub fn new(type_name: ClassName) -> Self {
        Self {
            type_name,
            members: IndexMap::new(),
        }
    }

    pub fn builder(type_name: ClassName) -> AnnotationBuilder {
        AnnotationBuilder {
            annotation: Self::new(type_name),
        }
    }

    pub fn type_name(&self) -> &ClassName {
        &self.type_name
    }

    pub fn members(&self) -> &IndexMap<String, MemberValue> {
        &self.members
    }
}

#[derive(Debug, Clone)]
pub struct AnnotationBuilder {
    annotation: AnnotationRef,
}

impl AnnotationBuilder {
    /// Add a value; a second value for the same member turns it into an array.
    pub fn add_member(mut self, name: impl Into<String>, value: CodeValue) -> Self {
        match self.annotation.members.entry(name.into()) {
            Entry::Vacant(entry) => {
                entry.insert(MemberValue::Single(value));
            }
            Entry::Occupied(mut entry) => {
                let current = entry.get_mut();
                *current = match std::mem::replace(current, MemberValue::Multiple(Vec::new())) {
                    MemberValue::Single(first) => MemberValue::Multiple(vec![first, value]),
                    MemberValue::Multiple(mut values) => {
                        values.push(value);
                        MemberValue::Multiple(values)
                    }
                };
            }
        }
        self
    }

    /// Replace a member with an explicit array, even of one element.
    pub fn set_array(mut self, name: impl Into<String>, values: Vec<CodeValue>) -> Self {
        self.annotation
            .members
            .insert(name.into(), MemberValue::Multiple(values));
        self
    }

    pub fn build(self) -> AnnotationRef {
        self.annotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anno() -> ClassName {
        ClassName::new("com.example", "Anno")
    }

    #[test]
    fn test_repeated_member_upgrades_in_order() {
        let annotation = AnnotationRef::builder(anno())
            .add_member("value", CodeValue::text("v1"))
            .add_member("other", CodeValue::text("x"))
            .add_member("value", CodeValue::text("v2"))
            .add_member("value", CodeValue::text("v3"))
            .build();

        let keys: Vec<_> = annotation.members().keys().map(String::as_str).collect();
        assert_eq!(keys, ["value", "other"]);
        assert_eq!(
            annotation.members()["value"],
            MemberValue::Multiple(vec![
                CodeValue::text("v1"),
                CodeValue::text("v2"),
                CodeValue::text("v3"),
            ])
        );
        assert_eq!(
            annotation.members()["other"],
            MemberValue::Single(CodeValue::text("x"))
        );
    }

    #[test]
    fn test_set_array_keeps_single_element_array() {
        let annotation = AnnotationRef::builder(anno())
            .set_array("value", vec![CodeValue::text("only")])
            .build();
        assert_eq!(annotation.members()["value"].values().len(), 1);
        assert!(matches!(
            annotation.members()["value"],
            MemberValue::Multiple(_)
        ));
    }
}
