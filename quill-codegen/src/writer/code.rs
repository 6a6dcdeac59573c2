//! Emission of code values and annotations.

use std::fmt;

use quill_core::{AnnotationRef, CodeValue, Literal, MemberValue, Part, TypeName, TypeRef};

use super::CodeWriter;
use crate::error::{Error, Result};

impl<W: fmt::Write> CodeWriter<'_, W> {
    /// Emit every part of `code` in order.
    pub fn emit_code(&mut self, code: &CodeValue) -> Result<()> {
        let parts = code.parts();
        for (index, part) in parts.iter().enumerate() {
            match part {
                Part::Text(text) => self.emit_text(text)?,
                Part::Type(type_name) => {
                    let type_ref = TypeRef::new(type_name.clone());
                    self.emit_type_part(&type_ref, parts.get(index + 1))?;
                }
                Part::TypeRef(type_ref) => self.emit_type_part(type_ref, parts.get(index + 1))?,
                part => {
                    self.flush_deferred()?;
                    self.emit_part(part)?;
                }
            }
        }
        self.flush_deferred()
    }

    fn emit_part(&mut self, part: &Part) -> Result<()> {
        match part {
            Part::Text(text) => self.emit(text),
            Part::Skip => Ok(()),
            Part::Literal(literal) => self.emit_literal(literal),
            Part::Name(name) => self.emit(name),
            Part::Member(member) => {
                let name = self.lookup_member(member)?;
                self.emit(&name)
            }
            Part::String(value) => {
                let literal = match value {
                    Some(value) => self.strategy.string_literal(value),
                    None => "null".to_string(),
                };
                self.emit(&literal)
            }
            Part::Type(type_name) => self.emit_type(type_name),
            Part::TypeRef(type_ref) => self.emit_type_ref(type_ref),
            Part::Indent(levels) => {
                self.indent(*levels);
                Ok(())
            }
            Part::Unindent(levels) => self.unindent(*levels),
            Part::StatementBegin => self.begin_statement(),
            Part::StatementEnd => self.end_statement(),
            Part::WrappingSpace => self.wrapping_space(),
            Part::ZeroWidthSpace => self.zero_width_space(),
            Part::Code(code) => self.emit_code(code),
        }
    }

    fn emit_literal(&mut self, literal: &Literal) -> Result<()> {
        match literal {
            Literal::Text(text) => self.emit(text),
            Literal::Annotation(annotation) => self.emit_annotation(annotation),
            Literal::Type(spec) => self.emit_type_spec(spec, &Default::default()),
            Literal::Function(spec) => self.emit_function(spec, &Default::default()),
            Literal::Property(spec) => self.emit_property(spec, &Default::default()),
            Literal::Parameter(spec) => self.emit_parameter(spec, false),
        }
    }

    /// A class followed by `.member` text is held back so a static import
    /// can drop it.
    fn emit_type_part(&mut self, type_ref: &TypeRef, next: Option<&Part>) -> Result<()> {
        self.flush_deferred()?;
        let member_follows = matches!(next, Some(Part::Text(text)) if text.starts_with('.'));
        if member_follows
            && matches!(type_ref.type_name, TypeName::Class(_))
            && type_ref.annotations().is_empty()
        {
            return self.defer_type(type_ref.clone());
        }
        self.emit_type_ref(type_ref)
    }

    fn defer_type(&mut self, type_ref: TypeRef) -> Result<()> {
        if let Some(pending) = &self.deferred {
            return Err(Error::DeferredTypePending {
                pending: describe(pending),
                next: describe(&type_ref),
            });
        }
        self.deferred = Some(type_ref);
        Ok(())
    }

    fn flush_deferred(&mut self) -> Result<()> {
        match self.deferred.take() {
            Some(type_ref) => self.emit_type_ref(&type_ref),
            None => Ok(()),
        }
    }

    fn emit_text(&mut self, text: &str) -> Result<()> {
        let Some(deferred) = self.deferred.take() else {
            return self.emit(text);
        };
        if let TypeName::Class(class) = &deferred.type_name {
            if let Some(rest) = text.strip_prefix('.') {
                let length = self.identifier_prefix_len(rest);
                if length > 0 {
                    let member = class.member(&rest[..length]);
                    if self.is_statically_imported(&member) {
                        tracing::trace!(member = %member.canonical_name(), "static import elided owner");
                        return self.emit(rest);
                    }
                }
            }
        }
        self.emit_type_ref(&deferred)?;
        self.emit(text)
    }

    /// Byte length of the longest identifier at the start of `text`.
    fn identifier_prefix_len(&self, text: &str) -> usize {
        let mut length = 0;
        for (index, c) in text.char_indices() {
            let valid = if index == 0 {
                self.strategy.is_identifier_start(c)
            } else {
                self.strategy.is_identifier_part(c)
            };
            if !valid {
                break;
            }
            length = index + c.len_utf8();
        }
        length
    }

    /// `@Type`, `@Type(value)` or `@Type(a = x, b = y)`.
    pub fn emit_annotation(&mut self, annotation: &AnnotationRef) -> Result<()> {
        let name = self.lookup_class(annotation.type_name())?;
        self.emit("@")?;
        self.emit(&name)?;

        let members = annotation.members();
        if members.is_empty() {
            return Ok(());
        }
        self.emit("(")?;
        let only_value = members.len() == 1 && members.contains_key("value");
        for (index, (name, value)) in members.iter().enumerate() {
            if index > 0 {
                self.emit(", ")?;
            }
            if !only_value {
                self.emit(name)?;
                self.emit(" = ")?;
            }
            self.emit_member_value(value)?;
        }
        self.emit(")")
    }

    fn emit_member_value(&mut self, value: &MemberValue) -> Result<()> {
        match value {
            MemberValue::Single(code) => self.emit_code(code),
            MemberValue::Multiple(values) => {
                let (open, close) = self.strategy.annotation_array();
                self.emit(open)?;
                for (index, code) in values.iter().enumerate() {
                    if index > 0 {
                        self.emit(", ")?;
                    }
                    self.emit_code(code)?;
                }
                self.emit(close)
            }
        }
    }
}

fn describe(type_ref: &TypeRef) -> String {
    match &type_ref.type_name {
        TypeName::Class(class) => class.canonical_name(),
        other => format!("{other:?}"),
    }
}
