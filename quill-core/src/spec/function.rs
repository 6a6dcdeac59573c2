//! Function, method and constructor declarations.

use std::collections::BTreeSet;

use super::{Modifier, ParameterSpec};
use crate::{
    annotation::AnnotationRef,
    code::{Arg, CodeBuilder, CodeValue},
    error::CodeError,
    names::ClassName,
    type_ref::TypeRef,
    types::TypeVariableName,
};

const CONSTRUCTOR: &str = "<init>";

/// A declarative specification for a function, method or constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Function name; constructors use an internal marker name.
    pub name: String,
    pub doc: Option<CodeValue>,
    pub annotations: Vec<AnnotationRef>,
    pub modifiers: BTreeSet<Modifier>,
    pub type_variables: Vec<TypeVariableName>,
    /// Return type (`None` for constructors and `void`).
    pub return_type: Option<TypeRef>,
    pub parameters: Vec<ParameterSpec>,
    /// Whether the last parameter is variadic.
    pub varargs: bool,
    pub exceptions: Vec<TypeRef<ClassName>>,
    /// Body statements; `None` declares the function without a body.
    pub body: Option<CodeValue>,
    /// Default value of an annotation type element.
    pub default_value: Option<CodeValue>,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            annotations: Vec::new(),
            modifiers: BTreeSet::new(),
            type_variables: Vec::new(),
            return_type: None,
            parameters: Vec::new(),
            varargs: false,
            exceptions: Vec::new(),
            body: None,
            default_value: None,
        }
    }

    pub fn constructor() -> Self {
        Self::new(CONSTRUCTOR)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
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

    pub fn returns(mut self, ty: impl Into<TypeRef>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn param(mut self, param: ParameterSpec) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = ParameterSpec>) -> Self {
        self.parameters.extend(params);
        self
    }

    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn throws(mut self, exception: impl Into<TypeRef<ClassName>>) -> Self {
        self.exceptions.push(exception.into());
        self
    }

    /// Append code to the body, creating it when absent.
    pub fn code(mut self, code: CodeValue) -> Self {
        let mut parts = self.body.take().map(CodeValue::into_parts).unwrap_or_default();
        parts.extend(code.into_parts());
        self.body = Some(CodeValue::from_parts(parts));
        self
    }

    /// Append one statement to the body.
    pub fn statement(
        self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self, CodeError> {
        let statement = CodeBuilder::default().add_statement(template, args)?.build();
        Ok(self.code(statement))
    }

    /// Give the function an empty body.
    pub fn empty_body(mut self) -> Self {
        self.body.get_or_insert_with(CodeValue::default);
        self
    }

    pub fn default_value(mut self, value: CodeValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{code::Part, types::Primitive};

    #[test]
    fn test_constructor_marker() {
        assert!(FunctionSpec::constructor().is_constructor());
        assert!(!FunctionSpec::new("run").is_constructor());
    }

    #[test]
    fn test_statements_append_in_order() {
        let function = FunctionSpec::new("run")
            .returns(Primitive::Int)
            .statement("int x = %L", [Arg::literal(1)])
            .unwrap()
            .statement("return x", [])
            .unwrap();
        let body = function.body.expect("body");
        assert_eq!(body.parts().first(), Some(&Part::StatementBegin));
        assert_eq!(body.parts()[1], Part::Text("int x = ".into()));
        assert_eq!(body.parts().last(), Some(&Part::StatementEnd));
        assert_eq!(body.parts().len(), 7);
    }

    #[test]
    fn test_last_return_type_wins() {
        let function = FunctionSpec::new("f")
            .returns(Primitive::Int)
            .returns(Primitive::Long);
        assert_eq!(function.return_type, Some(TypeRef::of(Primitive::Long)));
    }
}
