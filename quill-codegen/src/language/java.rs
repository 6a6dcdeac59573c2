use quill_core::PackageName;

use super::Strategy;

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while", "true", "false", "null",
];

/// Java source policy: `;`-terminated statements and an implicit `java.lang`.
#[derive(Debug, Clone)]
pub struct JavaStrategy {
    skip_java_lang: bool,
}

impl JavaStrategy {
    /// Write `java.lang` types fully qualified.
    pub fn qualify_java_lang() -> Self {
        Self {
            skip_java_lang: false,
        }
    }
}

impl Default for JavaStrategy {
    fn default() -> Self {
        Self {
            skip_java_lang: true,
        }
    }
}

impl Strategy for JavaStrategy {
    fn language(&self) -> &'static str {
        "java"
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn is_keyword(&self, name: &str) -> bool {
        KEYWORDS.contains(&name)
    }

    fn omits_implicit_packages(&self) -> bool {
        self.skip_java_lang
    }

    fn is_implicit_package(&self, package: &PackageName) -> bool {
        package.segments() == ["java", "lang"]
    }

    fn statement_terminator(&self) -> Option<char> {
        Some(';')
    }

    fn annotation_array(&self) -> (&'static str, &'static str) {
        ("{", "}")
    }

    fn package_statement(&self, package: &PackageName) -> String {
        format!("package {package};")
    }

    fn import_statement(&self, qualified_name: &str, is_static: bool) -> String {
        if is_static {
            format!("import static {qualified_name};")
        } else {
            format!("import {qualified_name};")
        }
    }
}
