//! Code templates: ordered parts of literal text and emission directives.
//!
//! A [`CodeValue`] is built once and then walked by the writer; it is never
//! re-parsed. The [`CodeBuilder`] parses `%`-templates into parts:
//!
//! | Placeholder | Part |
//! |-------------|------|
//! | `%L` | literal value, nested code or type |
//! | `%N` | name |
//! | `%S` | string literal (`null` when absent) |
//! | `%T` | type |
//! | `%M` | member |
//! | `%>` / `%<` | indent / unindent one level |
//! | `%[` / `%]` | statement begin / end |
//! | `%W` / `%Z` | wrapping space / zero-width space |
//! | `%%` | a literal `%` |

use std::fmt;

use crate::{
    annotation::AnnotationRef,
    error::CodeError,
    names::{ClassName, MemberName},
    spec::{FunctionSpec, ParameterSpec, PropertySpec, TypeSpec},
    type_ref::TypeRef,
    types::TypeName,
};

/// One element of a [`CodeValue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Plain text, emitted as-is (newlines included).
    Text(String),
    /// Emits nothing.
    Skip,
    Literal(Literal),
    Name(String),
    Member(MemberName),
    String(Option<String>),
    Type(TypeName),
    TypeRef(TypeRef),
    Indent(usize),
    Unindent(usize),
    StatementBegin,
    StatementEnd,
    WrappingSpace,
    ZeroWidthSpace,
    Code(CodeValue),
}

/// A value substituted for `%L`.
///
/// Spec objects are rendered as declarations and take part in import
/// collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Text(String),
    Annotation(Box<AnnotationRef>),
    Type(Box<TypeSpec>),
    Function(Box<FunctionSpec>),
    Property(Box<PropertySpec>),
    Parameter(Box<ParameterSpec>),
}

impl Literal {
    pub fn text(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<AnnotationRef> for Literal {
    fn from(annotation: AnnotationRef) -> Self {
        Self::Annotation(Box::new(annotation))
    }
}

impl From<TypeSpec> for Literal {
    fn from(spec: TypeSpec) -> Self {
        Self::Type(Box::new(spec))
    }
}

impl From<FunctionSpec> for Literal {
    fn from(spec: FunctionSpec) -> Self {
        Self::Function(Box::new(spec))
    }
}

impl From<PropertySpec> for Literal {
    fn from(spec: PropertySpec) -> Self {
        Self::Property(Box::new(spec))
    }
}

impl From<ParameterSpec> for Literal {
    fn from(spec: ParameterSpec) -> Self {
        Self::Parameter(Box::new(spec))
    }
}

/// An argument consumed by one template placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Literal(Literal),
    Name(String),
    Member(MemberName),
    String(Option<String>),
    Type(TypeRef),
    Code(CodeValue),
}

impl Arg {
    pub fn literal(value: impl fmt::Display) -> Self {
        Self::Literal(Literal::text(value))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String(Some(value.into()))
    }

    pub fn null_string() -> Self {
        Self::String(None)
    }

    pub fn ty(type_ref: impl Into<TypeRef>) -> Self {
        Self::Type(type_ref.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Name(_) => "name",
            Self::Member(_) => "member",
            Self::String(_) => "string",
            Self::Type(_) => "type",
            Self::Code(_) => "code",
        }
    }
}

impl From<ClassName> for Arg {
    fn from(class: ClassName) -> Self {
        Self::Type(class.into())
    }
}

impl From<TypeName> for Arg {
    fn from(type_name: TypeName) -> Self {
        Self::Type(type_name.into())
    }
}

impl From<TypeRef> for Arg {
    fn from(type_ref: TypeRef) -> Self {
        Self::Type(type_ref)
    }
}

impl From<MemberName> for Arg {
    fn from(member: MemberName) -> Self {
        Self::Member(member)
    }
}

impl From<CodeValue> for Arg {
    fn from(code: CodeValue) -> Self {
        Self::Code(code)
    }
}

impl From<Literal> for Arg {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

/// An immutable, ordered sequence of [`Part`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeValue {
    parts: Vec<Part>,
}

impl CodeValue {
    pub fn builder() -> CodeBuilder {
        CodeBuilder::default()
    }

    /// Parse a single template.
    ///
    /// ```
    /// use quill_core::{Arg, ClassName, CodeValue, Part};
    ///
    /// let list = ClassName::new("java.util", "Collections");
    /// let code = CodeValue::of("%T.emptyList()", [Arg::from(list)]).unwrap();
    /// assert_eq!(code.parts().len(), 2);
    /// assert_eq!(code.parts()[1], Part::Text(".emptyList()".into()));
    /// ```
    pub fn of(template: &str, args: impl IntoIterator<Item = Arg>) -> Result<Self, CodeError> {
        Ok(Self::builder().add(template, args)?.build())
    }

    /// Plain text with no directives.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(text.into())],
        }
    }

    pub fn from_parts(parts: impl IntoIterator<Item = Part>) -> Self {
        parts
            .into_iter()
            .fold(CodeBuilder::default(), CodeBuilder::part)
            .build()
    }

    /// Concatenate `values` with `separator` text between them.
    pub fn join(values: impl IntoIterator<Item = CodeValue>, separator: &str) -> Self {
        let mut builder = CodeBuilder::default();
        for (index, value) in values.into_iter().enumerate() {
            if index > 0 {
                builder = builder.text(separator);
            }
            builder = builder.code(value);
        }
        builder.build()
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Builder for [`CodeValue`]. Adjacent text is merged into one part.
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    parts: Vec<Part>,
}

impl CodeBuilder {
    /// Append the parts of a `%`-template.
    pub fn add(
        mut self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self, CodeError> {
        let mut args = args.into_iter().enumerate();
        let mut chars = template.chars();
        let mut text = String::new();

        while let Some(c) = chars.next() {
            if c != '%' {
                text.push(c);
                continue;
            }
            let Some(placeholder) = chars.next() else {
                return Err(CodeError::DanglingPercent {
                    template: template.to_string(),
                });
            };
            if placeholder == '%' {
                text.push('%');
                continue;
            }
            if !text.is_empty() {
                self = self.text(std::mem::take(&mut text));
            }
            let part = match placeholder {
                '>' => Part::Indent(1),
                '<' => Part::Unindent(1),
                '[' => Part::StatementBegin,
                ']' => Part::StatementEnd,
                'W' => Part::WrappingSpace,
                'Z' => Part::ZeroWidthSpace,
                'L' | 'N' | 'S' | 'T' | 'M' => {
                    let (index, arg) = args.next().ok_or_else(|| CodeError::MissingArgument {
                        placeholder,
                        template: template.to_string(),
                    })?;
                    argument_part(placeholder, index, arg)?
                }
                other => {
                    return Err(CodeError::UnknownPlaceholder {
                        placeholder: other,
                        template: template.to_string(),
                    });
                }
            };
            self = self.part(part);
        }
        if !text.is_empty() {
            self = self.text(text);
        }

        let unused = args.count();
        if unused > 0 {
            return Err(CodeError::UnusedArguments {
                count: unused,
                template: template.to_string(),
            });
        }
        Ok(self)
    }

    /// A complete statement: the writer appends the terminator and newline.
    pub fn add_statement(
        self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self, CodeError> {
        Ok(self
            .part(Part::StatementBegin)
            .add(template, args)?
            .part(Part::StatementEnd))
    }

    /// `template {` followed by an indented block.
    pub fn begin_control_flow(
        self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self, CodeError> {
        Ok(self.add(template, args)?.text(" {\n").part(Part::Indent(1)))
    }

    /// `} template {` between two blocks, e.g. `} else {`.
    pub fn next_control_flow(
        self,
        template: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<Self, CodeError> {
        Ok(self
            .part(Part::Unindent(1))
            .text("} ")
            .add(template, args)?
            .text(" {\n")
            .part(Part::Indent(1)))
    }

    /// Close the innermost block.
    pub fn end_control_flow(self) -> Self {
        self.part(Part::Unindent(1)).text("}\n")
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.part(Part::Text(text.into()))
    }

    pub fn code(self, code: CodeValue) -> Self {
        self.part(Part::Code(code))
    }

    pub fn indent(self) -> Self {
        self.part(Part::Indent(1))
    }

    pub fn unindent(self) -> Self {
        self.part(Part::Unindent(1))
    }

    pub fn part(mut self, part: Part) -> Self {
        match (self.parts.last_mut(), part) {
            (_, Part::Text(text)) if text.is_empty() => {}
            (Some(Part::Text(previous)), Part::Text(text)) => previous.push_str(&text),
            (_, part) => self.parts.push(part),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn build(self) -> CodeValue {
        CodeValue { parts: self.parts }
    }
}

fn argument_part(placeholder: char, index: usize, arg: Arg) -> Result<Part, CodeError> {
    let part = match (placeholder, arg) {
        ('L', Arg::Literal(literal)) => Part::Literal(literal),
        ('L', Arg::Code(code)) => Part::Code(code),
        ('L', Arg::Type(type_ref)) | ('T', Arg::Type(type_ref)) => type_part(type_ref),
        ('L', Arg::Name(name)) | ('N', Arg::Name(name)) => Part::Name(name),
        ('L', Arg::Member(member)) | ('M', Arg::Member(member)) => Part::Member(member),
        ('N', Arg::Literal(Literal::Text(name))) => Part::Name(name),
        ('S', Arg::String(value)) => Part::String(value),
        ('S', Arg::Literal(Literal::Text(value))) => Part::String(Some(value)),
        (placeholder, arg) => {
            return Err(CodeError::ArgumentMismatch {
                placeholder,
                index,
                found: arg.kind(),
            });
        }
    };
    Ok(part)
}

fn type_part(type_ref: TypeRef) -> Part {
    if type_ref.status.is_empty() {
        Part::Type(type_ref.type_name)
    } else {
        Part::TypeRef(type_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parts() {
        let code = CodeValue::of(
            "%T x = %S;%W%N%%",
            [
                Arg::from(ClassName::new("java.lang", "String")),
                Arg::string("hi"),
                Arg::name("y"),
            ],
        )
        .unwrap();
        assert_eq!(
            code.parts(),
            &[
                Part::Type(ClassName::new("java.lang", "String").into()),
                Part::Text(" x = ".into()),
                Part::String(Some("hi".into())),
                Part::Text(";".into()),
                Part::WrappingSpace,
                Part::Name("y".into()),
                Part::Text("%".into()),
            ]
        );
    }

    #[test]
    fn test_decorated_type_keeps_status() {
        let nullable = TypeRef::of(ClassName::new("java.lang", "String")).nullable();
        let code = CodeValue::of("%T", [Arg::from(nullable.clone())]).unwrap();
        assert_eq!(code.parts(), &[Part::TypeRef(nullable)]);
    }

    #[test]
    fn test_statement_wraps_parts() {
        let code = CodeValue::builder()
            .add_statement("return %L", [Arg::literal(1)])
            .unwrap()
            .build();
        assert_eq!(code.parts().first(), Some(&Part::StatementBegin));
        assert_eq!(code.parts().last(), Some(&Part::StatementEnd));
    }

    #[test]
    fn test_control_flow() {
        let code = CodeValue::builder()
            .begin_control_flow("if (ready)", [])
            .unwrap()
            .text("go();\n")
            .next_control_flow("else", [])
            .unwrap()
            .text("stop();\n")
            .end_control_flow()
            .build();
        assert_eq!(
            code.parts(),
            &[
                Part::Text("if (ready) {\n".into()),
                Part::Indent(1),
                Part::Text("go();\n".into()),
                Part::Unindent(1),
                Part::Text("} else {\n".into()),
                Part::Indent(1),
                Part::Text("stop();\n".into()),
                Part::Unindent(1),
                Part::Text("}\n".into()),
            ]
        );
    }

    #[test]
    fn test_missing_argument() {
        let err = CodeValue::of("%T %T", [Arg::from(ClassName::new("a", "B"))]).unwrap_err();
        assert!(matches!(err, CodeError::MissingArgument { placeholder: 'T', .. }));
    }

    #[test]
    fn test_unused_arguments() {
        let err = CodeValue::of("none", [Arg::literal(1)]).unwrap_err();
        assert!(matches!(err, CodeError::UnusedArguments { count: 1, .. }));
    }

    #[test]
    fn test_argument_mismatch() {
        let err = CodeValue::of("%T", [Arg::string("x")]).unwrap_err();
        assert!(matches!(
            err,
            CodeError::ArgumentMismatch {
                placeholder: 'T',
                index: 0,
                found: "string"
            }
        ));
    }

    #[test]
    fn test_unknown_and_dangling_placeholders() {
        assert!(matches!(
            CodeValue::of("%Q", []),
            Err(CodeError::UnknownPlaceholder { placeholder: 'Q', .. })
        ));
        assert!(matches!(
            CodeValue::of("50%", []),
            Err(CodeError::DanglingPercent { .. })
        ));
    }

    #[test]
    fn test_join() {
        let joined = CodeValue::join([CodeValue::text("a"), CodeValue::text("b")], ", ");
        assert_eq!(
            joined.parts(),
            &[
                Part::Code(CodeValue::text("a")),
                Part::Text(", ".into()),
                Part::Code(CodeValue::text("b")),
            ]
        );
    }
}
