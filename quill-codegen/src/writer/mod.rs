//! The code writer: per-emission state over a [`LineWrapper`].
//!
//! A [`CodeWriter`] is created for exactly one emission. It owns the indent
//! level, the open-statement state, the package and type scopes and the
//! import table, and it is consumed by [`CodeWriter::close`].

mod code;
mod declarations;
mod names;

use std::{collections::BTreeSet, fmt};

use quill_core::{ClassName, PackageName, TypeRef};

use crate::{
    config::FormatOptions,
    error::{Error, Result},
    imports::ImportTable,
    language::Strategy,
    line_wrapper::LineWrapper,
};

/// Extra indent levels given to continuation lines of a statement.
const CONTINUATION_INDENT: usize = 2;

/// A type whose body is being emitted.
#[derive(Debug, Clone)]
struct TypeScope {
    class: ClassName,
    nested: Vec<String>,
}

/// Writes names, types, annotations and code through a [`LineWrapper`].
///
/// # Example
///
/// ```
/// use quill_codegen::{CodeWriter, FormatOptions, JavaStrategy};
/// use quill_core::{Arg, ClassName, CodeValue};
///
/// let strategy = JavaStrategy::default();
/// let options = FormatOptions::unbounded();
/// let code = CodeValue::builder()
///     .add_statement("%T list = new %T<>()", [
///         Arg::from(ClassName::new("java.util", "List")),
///         Arg::from(ClassName::new("java.util", "ArrayList")),
///     ])
///     .unwrap()
///     .build();
///
/// let mut writer = CodeWriter::new(String::new(), &strategy, &options);
/// writer.emit_code(&code).unwrap();
/// assert_eq!(
///     writer.close().unwrap(),
///     "java.util.List list = new java.util.ArrayList<>();\n"
/// );
/// ```
pub struct CodeWriter<'a, W: fmt::Write> {
    out: LineWrapper<W>,
    strategy: &'a dyn Strategy,
    indent_unit: String,
    indent_level: usize,
    /// `None` outside a statement, otherwise the current line within it.
    statement_line: Option<usize>,
    /// Last non-blank character written while a statement is open.
    last_char: Option<char>,
    trailing_newline: bool,
    doc: bool,
    comment: bool,
    package: Option<PackageName>,
    type_scopes: Vec<TypeScope>,
    type_variables: Vec<Vec<String>>,
    imports: ImportTable,
    static_imports: BTreeSet<String>,
    always_qualify: BTreeSet<String>,
    deferred: Option<TypeRef>,
}

impl<'a, W: fmt::Write> CodeWriter<'a, W> {
    pub fn new(out: W, strategy: &'a dyn Strategy, options: &FormatOptions) -> Self {
        let indent_unit = options.indent.unit();
        Self {
            out: LineWrapper::new(out, &indent_unit, strategy.newline(), options.column_limit),
            strategy,
            indent_unit,
            indent_level: 0,
            statement_line: None,
            last_char: None,
            trailing_newline: true,
            doc: false,
            comment: false,
            package: None,
            type_scopes: Vec::new(),
            type_variables: Vec::new(),
            imports: ImportTable::new(),
            static_imports: options.static_imports.clone(),
            always_qualify: options.always_qualify.clone(),
            deferred: None,
        }
    }

    /// Use `imports` to decide which names are written unqualified.
    pub fn with_imports(mut self, imports: ImportTable) -> Self {
        self.imports = imports;
        self
    }

    /// Add static imports on top of those from the options.
    pub fn with_static_imports(mut self, imports: impl IntoIterator<Item = String>) -> Self {
        self.static_imports.extend(imports);
        self
    }

    /// Enter the package of the file being written.
    pub fn push_package(&mut self, package: PackageName) -> Result<()> {
        if let Some(current) = &self.package {
            return Err(Error::PackageAlreadySet {
                current: current.to_string(),
                attempted: package.to_string(),
            });
        }
        self.package = Some(package);
        Ok(())
    }

    pub fn pop_package(&mut self) -> Option<PackageName> {
        self.package.take()
    }

    fn current_package(&self) -> &PackageName {
        self.package.as_ref().unwrap_or(&PackageName::EMPTY)
    }

    pub fn indent(&mut self, levels: usize) {
        self.indent_level += levels;
    }

    pub fn unindent(&mut self, levels: usize) -> Result<()> {
        if levels > self.indent_level {
            return Err(Error::Unindent {
                level: self.indent_level,
                by: levels,
            });
        }
        self.indent_level -= levels;
        Ok(())
    }

    /// Open a statement; continuation lines get extra indentation.
    pub fn begin_statement(&mut self) -> Result<()> {
        if self.statement_line.is_some() {
            return Err(Error::StatementAlreadyOpen);
        }
        self.statement_line = Some(0);
        self.last_char = None;
        Ok(())
    }

    /// Close the open statement, adding the terminator when missing.
    pub fn end_statement(&mut self) -> Result<()> {
        let Some(lines) = self.statement_line else {
            return Err(Error::StatementNotOpen);
        };
        if lines > 0 {
            self.unindent(CONTINUATION_INDENT)?;
        }
        self.statement_line = None;
        let last_char = self.last_char.take();
        if let Some(terminator) = self.strategy.statement_terminator() {
            if last_char != Some(terminator) {
                self.emit(terminator.encode_utf8(&mut [0; 4]))?;
            }
        }
        self.emit("\n")
    }

    /// Emit raw text, indenting each new line.
    pub fn emit(&mut self, text: &str) -> Result<()> {
        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                if (self.doc || self.comment) && self.trailing_newline {
                    self.emit_indentation()?;
                    self.out.append(if self.doc { " *" } else { "//" })?;
                }
                self.out.append("\n")?;
                self.trailing_newline = true;
                if let Some(line_number) = self.statement_line {
                    if line_number == 0 {
                        self.indent(CONTINUATION_INDENT);
                    }
                    self.statement_line = Some(line_number + 1);
                }
            }

            if line.is_empty() {
                continue;
            }
            if self.trailing_newline {
                self.emit_indentation()?;
                if self.doc {
                    self.out.append(" * ")?;
                } else if self.comment {
                    self.out.append("// ")?;
                }
            }
            self.out.append(line)?;
            self.trailing_newline = false;
            if self.statement_line.is_some() {
                if let Some(c) = line.trim_end().chars().last() {
                    self.last_char = Some(c);
                }
            }
        }
        Ok(())
    }

    /// Emit a newline unless the output already ends with one.
    pub fn ensure_newline(&mut self) -> Result<()> {
        if self.trailing_newline {
            Ok(())
        } else {
            self.emit("\n")
        }
    }

    pub fn wrapping_space(&mut self) -> Result<()> {
        self.out
            .wrapping_space(self.indent_level + CONTINUATION_INDENT)?;
        Ok(())
    }

    pub fn zero_width_space(&mut self) -> Result<()> {
        self.out
            .zero_width_space(self.indent_level + CONTINUATION_INDENT)?;
        Ok(())
    }

    /// Finish the emission and hand back the sink.
    pub fn close(self) -> Result<W> {
        Ok(self.out.close()?)
    }

    fn emit_indentation(&mut self) -> Result<()> {
        for _ in 0..self.indent_level {
            self.out.append(&self.indent_unit)?;
        }
        Ok(())
    }
}
