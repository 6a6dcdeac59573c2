//! Target-language policy.
//!
//! A [`Strategy`] answers the questions the writer cannot decide on its own:
//! what an identifier looks like, which packages never need an import, how
//! statements end and how import lines are spelled.

mod java;
mod kotlin;

pub use java::JavaStrategy;
pub use kotlin::KotlinStrategy;
use quill_core::PackageName;

/// Pluggable, source-language-specific emission policy.
pub trait Strategy {
    /// Language identifier (e.g., "java", "kotlin").
    fn language(&self) -> &'static str;

    /// File extension for emitted files (e.g., "java", "kt").
    fn file_extension(&self) -> &'static str;

    fn is_identifier_start(&self, c: char) -> bool {
        c.is_alphabetic() || c == '_' || c == '$'
    }

    fn is_identifier_part(&self, c: char) -> bool {
        self.is_identifier_start(c) || c.is_numeric()
    }

    fn is_keyword(&self, name: &str) -> bool;

    /// Whether `name` may be used as a declared name.
    fn is_identifier(&self, name: &str) -> bool {
        let mut chars = name.chars();
        chars.next().is_some_and(|c| self.is_identifier_start(c))
            && chars.all(|c| self.is_identifier_part(c))
            && !self.is_keyword(name)
    }

    /// Whether types in implicitly imported packages are written unqualified.
    fn omits_implicit_packages(&self) -> bool;

    /// Packages whose types are visible without an import.
    fn is_implicit_package(&self, package: &PackageName) -> bool;

    /// Line separator written to the sink.
    fn newline(&self) -> &str {
        "\n"
    }

    /// Character guaranteed at the end of every statement, if any.
    fn statement_terminator(&self) -> Option<char>;

    /// Suffix marking a nullable type use, if the language has one.
    fn nullable_suffix(&self) -> Option<&'static str> {
        None
    }

    /// Whether type, function and field declarations can be written. They
    /// always use Java syntax.
    fn writes_java_declarations(&self) -> bool {
        true
    }

    /// Opening and closing delimiters of an annotation array value.
    fn annotation_array(&self) -> (&'static str, &'static str);

    fn package_statement(&self, package: &PackageName) -> String;

    fn import_statement(&self, qualified_name: &str, is_static: bool) -> String;

    /// Quote and escape a string literal.
    fn string_literal(&self, value: &str) -> String {
        quote(value, &[])
    }
}

/// Double-quote `value`, escaping control characters and `extra`.
pub(crate) fn quote(value: &str, extra: &[char]) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            '\u{8}' => quoted.push_str("\\b"),
            '\u{c}' => quoted.push_str("\\f"),
            c if extra.contains(&c) => {
                quoted.push('\\');
                quoted.push(c);
            }
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b\\c\n", &[]), r#""a\"b\\c\n""#);
        assert_eq!(quote("\u{1}", &[]), r#""\u0001""#);
        assert_eq!(quote("$x", &['$']), r#""\$x""#);
    }

    #[test]
    fn test_identifier_rules() {
        let java = JavaStrategy::default();
        assert!(java.is_identifier("fooBar1"));
        assert!(java.is_identifier("_x"));
        assert!(!java.is_identifier("1x"));
        assert!(!java.is_identifier("class"));
        assert!(!java.is_identifier(""));
        assert!(!java.is_identifier("a-b"));
    }
}
