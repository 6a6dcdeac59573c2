use quill_core::PackageName;

use super::{Strategy, quote};

const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

const DEFAULT_IMPORTS: &[&str] = &[
    "kotlin",
    "kotlin.annotation",
    "kotlin.collections",
    "kotlin.comparisons",
    "kotlin.io",
    "kotlin.ranges",
    "kotlin.sequences",
    "kotlin.text",
    "kotlin.jvm",
    "java.lang",
];

/// Kotlin source policy for code fragments: unterminated statements,
/// nullable `?` suffixes and the Kotlin default imports.
///
/// Declarations are written in Java syntax only, so rendering a whole file
/// with this strategy fails with [`Error::UnsupportedDeclarations`].
///
/// [`Error::UnsupportedDeclarations`]: crate::Error::UnsupportedDeclarations
#[derive(Debug, Clone, Default)]
pub struct KotlinStrategy;

impl Strategy for KotlinStrategy {
    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn is_identifier_start(&self, c: char) -> bool {
        c.is_alphabetic() || c == '_'
    }

    fn is_keyword(&self, name: &str) -> bool {
        KEYWORDS.contains(&name)
    }

    fn omits_implicit_packages(&self) -> bool {
        true
    }

    fn is_implicit_package(&self, package: &PackageName) -> bool {
        let dotted = package.to_string();
        DEFAULT_IMPORTS.contains(&dotted.as_str())
    }

    fn statement_terminator(&self) -> Option<char> {
        None
    }

    fn writes_java_declarations(&self) -> bool {
        false
    }

    fn nullable_suffix(&self) -> Option<&'static str> {
        Some("?")
    }

    fn annotation_array(&self) -> (&'static str, &'static str) {
        ("[", "]")
    }

    fn package_statement(&self, package: &PackageName) -> String {
        format!("package {package}")
    }

    fn import_statement(&self, qualified_name: &str, _is_static: bool) -> String {
        format!("import {qualified_name}")
    }

    fn string_literal(&self, value: &str) -> String {
        quote(value, &['$'])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_imports() {
        let kotlin = KotlinStrategy;
        assert!(kotlin.is_implicit_package(&PackageName::of("kotlin.collections")));
        assert!(!kotlin.is_implicit_package(&PackageName::of("kotlinx.coroutines")));
    }

    #[test]
    fn test_no_terminator_and_dollar_escape() {
        let kotlin = KotlinStrategy;
        assert_eq!(kotlin.statement_terminator(), None);
        assert_eq!(kotlin.string_literal("$name"), r#""\$name""#);
        assert_eq!(kotlin.import_statement("a.B", true), "import a.B");
    }
}
