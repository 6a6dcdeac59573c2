use miette::Diagnostic;
use thiserror::Error;

/// Result type for emission.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal emission errors.
///
/// Every variant except [`Error::Write`] and [`Error::Config`] reports a
/// malformed spec tree or template; emission stops at the point of
/// violation and text already written to the sink stays there.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cannot unindent by {by} from indent level {level}")]
    #[diagnostic(
        code(quill::unindent),
        help("every unindent must be preceded by a matching indent")
    )]
    Unindent { level: usize, by: usize },

    #[error("statement begun while another statement is still open")]
    #[diagnostic(code(quill::nested_statement), help("statement markers cannot nest"))]
    StatementAlreadyOpen,

    #[error("statement end without a matching statement begin")]
    #[diagnostic(code(quill::unopened_statement))]
    StatementNotOpen,

    #[error("type `{pending}` is still deferred while deferring `{next}`")]
    #[diagnostic(code(quill::deferred_type))]
    DeferredTypePending { pending: String, next: String },

    #[error("package `{current}` is already active, cannot enter `{attempted}`")]
    #[diagnostic(code(quill::package_pushed_twice))]
    PackageAlreadySet { current: String, attempted: String },

    #[error("enclosing class chain of `{name}` visits a class twice")]
    #[diagnostic(code(quill::enclosing_cycle))]
    EnclosingCycle { name: String },

    #[error("`{name}` is not a valid {context} name")]
    #[diagnostic(code(quill::invalid_identifier))]
    InvalidIdentifier { name: String, context: &'static str },

    #[error("constructor declared outside of a type")]
    #[diagnostic(
        code(quill::orphan_constructor),
        help("add constructors to a TypeSpec, not to the file")
    )]
    ConstructorOutsideType,

    #[error("declarations cannot be written for {language}")]
    #[diagnostic(
        code(quill::unsupported_declarations),
        help("render declarations with a Java strategy; code fragments work for any strategy")
    )]
    UnsupportedDeclarations { language: &'static str },

    #[error("failed to write emitted text")]
    #[diagnostic(code(quill::write))]
    Write(#[from] std::fmt::Error),

    #[error("failed to parse format configuration")]
    #[diagnostic(code(quill::config))]
    Config(#[from] toml::de::Error),
}
