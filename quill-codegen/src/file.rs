//! Whole-file emission: import collection followed by one writer pass.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use eyre::WrapErr;
use quill_core::{CodeValue, FileSpec};

use crate::{
    config::FormatOptions, error::Result, imports::ImportCollector, language::Strategy,
    writer::CodeWriter,
};

/// Write `file` to `out` and hand the sink back.
pub fn write_to<W: fmt::Write>(
    file: &FileSpec,
    out: W,
    strategy: &dyn Strategy,
    options: &FormatOptions,
) -> Result<W> {
    let imports = ImportCollector::new(&file.package, &options.always_qualify).collect_file(file);
    tracing::debug!(
        package = %file.package,
        file = %file.name,
        language = strategy.language(),
        types = file.types().count(),
        "emitting file"
    );

    let mut writer = CodeWriter::new(out, strategy, options)
        .with_imports(imports)
        .with_static_imports(file.static_imports.iter().cloned());
    writer.emit_file(file)?;
    writer.close()
}

/// Render `file` to a string.
///
/// ```
/// use quill_codegen::{FormatOptions, JavaStrategy, render};
/// use quill_core::{FileSpec, Modifier, TypeSpec};
///
/// let file = FileSpec::for_type(
///     "com.example",
///     TypeSpec::class("Empty").modifier(Modifier::Public),
/// );
/// let source = render(&file, &JavaStrategy::default(), &FormatOptions::default()).unwrap();
/// assert_eq!(source, "package com.example;\n\npublic class Empty {\n}\n");
/// ```
pub fn render(file: &FileSpec, strategy: &dyn Strategy, options: &FormatOptions) -> Result<String> {
    write_to(file, String::new(), strategy, options)
}

/// Render a code fragment on its own, without imports or wrapping.
pub fn render_code(code: &CodeValue, strategy: &dyn Strategy) -> Result<String> {
    let options = FormatOptions::unbounded();
    let mut writer = CodeWriter::new(String::new(), strategy, &options);
    writer.emit_code(code)?;
    writer.close()
}

/// Path of `file` below `dir`: one directory per package segment.
pub fn file_path(file: &FileSpec, dir: &Path, strategy: &dyn Strategy) -> PathBuf {
    let mut path = dir.to_path_buf();
    path.extend(file.package.segments());
    path.push(format!("{}.{}", file.name, strategy.file_extension()));
    path
}

/// Render `file` into the package directory tree under `dir`.
///
/// Returns the path of the written file.
pub fn write_to_dir(
    file: &FileSpec,
    dir: &Path,
    strategy: &dyn Strategy,
    options: &FormatOptions,
) -> eyre::Result<PathBuf> {
    let content = render(file, strategy, options)
        .wrap_err_with(|| format!("failed to render {}", file.name))?;
    let path = file_path(file, dir, strategy);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, content).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use quill_core::{Arg, ClassName};

    use super::*;
    use crate::{JavaStrategy, KotlinStrategy};

    #[test]
    fn test_file_path_mirrors_package() {
        let file = FileSpec::new("com.example.model", "User");
        let path = file_path(&file, Path::new("out"), &JavaStrategy::default());
        assert_eq!(path, Path::new("out/com/example/model/User.java"));

        let root = FileSpec::new("", "Main");
        assert_eq!(
            file_path(&root, Path::new("out"), &KotlinStrategy),
            Path::new("out/Main.kt")
        );
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileSpec::for_type("com.example", quill_core::TypeSpec::class("Empty"));
        let path = write_to_dir(&file, dir.path(), &JavaStrategy::default(), &FormatOptions::default())
            .unwrap();
        assert_eq!(path, dir.path().join("com/example/Empty.java"));
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "package com.example;\n\nclass Empty {\n}\n");
    }

    #[test]
    fn test_write_to_dir_rejects_kotlin_declarations() {
        let dir = tempfile::tempdir().unwrap();
        let file = FileSpec::for_type("com.example", quill_core::TypeSpec::class("User"));
        let err = write_to_dir(&file, dir.path(), &KotlinStrategy, &FormatOptions::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "failed to render User");
        assert!(!dir.path().join("com/example/User.kt").exists());
    }

    #[test]
    fn test_render_code_never_wraps() {
        let args = (0..40).map(Arg::literal);
        let template = vec!["%L"; 40].join(",%W");
        let code = CodeValue::of(&template, args).unwrap();
        let out = render_code(&code, &JavaStrategy::default()).unwrap();
        assert!(!out.contains('\n'));
        assert!(out.starts_with("0, 1, 2"));
    }

    #[test]
    fn test_render_code_qualifies_everything_outside_java_lang() {
        let code = CodeValue::of(
            "%T<%T> names",
            [
                Arg::from(ClassName::new("java.util", "List")),
                Arg::from(ClassName::new("java.lang", "String")),
            ],
        )
        .unwrap();
        assert_eq!(
            render_code(&code, &JavaStrategy::default()).unwrap(),
            "java.util.List<String> names"
        );
    }
}
