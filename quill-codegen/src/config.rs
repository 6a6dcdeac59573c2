//! Formatting configuration.

use std::{collections::BTreeSet, path::Path};

use eyre::{Result as EyreResult, WrapErr};
use serde::Deserialize;

use crate::error::Result;

/// Indentation style for emitted code.
///
/// In TOML: `indent = "tab"` or `indent = { spaces = 4 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indent {
    /// Spaces with the specified width.
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation, the usual generated-Java style.
    pub const JAVA: Self = Self::Spaces(2);

    /// 4-space indentation (Kotlin style guide).
    pub const KOTLIN: Self = Self::Spaces(4);

    /// The text of one indent level.
    pub fn unit(&self) -> String {
        match self {
            Self::Spaces(width) => " ".repeat(usize::from(*width)),
            Self::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVA
    }
}

/// Settings for one emission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    pub indent: Indent,
    /// Soft breaks wrap once a line would exceed this many columns.
    pub column_limit: usize,
    /// Static imports as `pkg.Type.member` or `pkg.Type.*`.
    pub static_imports: BTreeSet<String>,
    /// Simple names that are never imported.
    pub always_qualify: BTreeSet<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            column_limit: 100,
            static_imports: BTreeSet::new(),
            always_qualify: BTreeSet::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    format: FormatOptions,
}

impl FormatOptions {
    /// Options that never wrap, for rendering code fragments to strings.
    pub fn unbounded() -> Self {
        Self {
            column_limit: usize::MAX,
            ..Self::default()
        }
    }

    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    pub fn column_limit(mut self, column_limit: usize) -> Self {
        self.column_limit = column_limit;
        self
    }

    pub fn static_import(mut self, import: impl Into<String>) -> Self {
        self.static_imports.insert(import.into());
        self
    }

    pub fn always_qualify(mut self, simple_name: impl Into<String>) -> Self {
        self.always_qualify.insert(simple_name.into());
        self
    }

    /// Parse the `[format]` table of a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.format)
    }

    /// Load options from a TOML file.
    pub fn from_path(path: &Path) -> EyreResult<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
            .wrap_err_with(|| format!("invalid format configuration in {}", path.display()))
    }
}
