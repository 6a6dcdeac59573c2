use thiserror::Error;

/// Errors raised while building a [`CodeValue`](crate::CodeValue) from a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeError {
    #[error("unknown placeholder '%{placeholder}' in \"{template}\"")]
    UnknownPlaceholder { placeholder: char, template: String },

    #[error("template \"{template}\" ends with a lone '%'")]
    DanglingPercent { template: String },

    #[error("placeholder '%{placeholder}' has no argument in \"{template}\"")]
    MissingArgument { placeholder: char, template: String },

    #[error("{count} unused argument(s) for \"{template}\"")]
    UnusedArguments { count: usize, template: String },

    #[error("argument {index} is a {found}, which '%{placeholder}' does not accept")]
    ArgumentMismatch {
        placeholder: char,
        index: usize,
        found: &'static str,
    },
}
