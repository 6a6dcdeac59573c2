//! Source emission for Quill.
//!
//! This crate turns the spec tree of [`quill_core`] into formatted Java
//! source text. Code fragments can also be written with Kotlin conventions.
//!
//! # Module Organization
//!
//! - [`imports`] - Import collection over a file's spec tree
//! - [`line_wrapper`] - Column-aware sink resolving soft breaks
//! - [`writer`] - The code writer: qualification, statements, declarations
//! - [`language`] - Target-language strategies
//! - [`config`] - Formatting options loaded from TOML
//!
//! Most callers only need [`render`] or [`write_to_dir`].

pub mod config;
mod error;
mod file;
pub mod imports;
pub mod language;
pub mod line_wrapper;
pub mod writer;

pub use config::{FormatOptions, Indent};
pub use error::{Error, Result};
pub use file::{file_path, render, render_code, write_to, write_to_dir};
pub use imports::{ImportCollector, ImportTable, Importable};
pub use language::{JavaStrategy, KotlinStrategy, Strategy};
pub use line_wrapper::LineWrapper;
pub use writer::CodeWriter;
