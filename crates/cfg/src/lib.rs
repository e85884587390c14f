#![doc = include_str!("../README.md")]

pub mod diag;
pub mod document;
pub mod encode;
pub mod error;
mod parse;
pub mod scalar;

pub use crate::diag::{MemorySink, MessageSink, NullSink, StderrSink};
pub use crate::document::{Document, Section};
pub use crate::error::{Error, Result};
pub use crate::scalar::{FromScalar, Vec2, Vec3, Vec4};

use std::fs;
use std::path::{Path, PathBuf};

/// A parsed configuration document plus everything needed to load and query
/// it: the include base directory and the diagnostic sink.
///
/// Loading is additive; several files (and their includes) can be parsed into
/// the same `Config`. Queries never mutate the document, so a `Config` can be
/// shared read-only across threads once mutation stops.
pub struct Config {
    doc: Document,
    sink: Box<dyn MessageSink>,
    base_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// A `Config` whose diagnostics go to standard error.
    pub fn new() -> Self {
        Self::with_sink(Box::new(StderrSink))
    }

    pub fn with_sink(sink: Box<dyn MessageSink>) -> Self {
        Self {
            doc: Document::new(),
            sink,
            base_dir: PathBuf::from("."),
        }
    }

    /// Directory `#include` arguments are resolved against. Defaults to the
    /// current directory.
    pub fn set_base_dir(&mut self, dir: impl Into<PathBuf>) {
        self.base_dir = dir.into();
    }

    /// Parses `path` into this document. Failing to open the top-level file
    /// is the one I/O error reported to the caller; include files that cannot
    /// be opened mid-parse go to the sink and are skipped.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let text = fs::read_to_string(path)?;
        self.load_str(&text);
        Ok(())
    }

    /// Parses an in-memory document. Structural and semantic problems go to
    /// the sink; the parse itself always completes.
    pub fn load_str(&mut self, input: &str) {
        parse::parse_str(&mut self.doc, self.sink.as_ref(), &self.base_dir, input);
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.doc.has_section(section)
    }

    pub fn has_key(&self, section: &str, key: &str) -> bool {
        self.section_or_diagnose(section)
            .is_some_and(|s| s.has_key(key))
    }

    pub fn has_attribute(&self, section: &str, attribute: &str) -> bool {
        self.section_or_diagnose(section)
            .is_some_and(|s| s.attributes().iter().any(|a| a == attribute))
    }

    pub fn has_inheritances(&self, section: &str) -> bool {
        self.section_or_diagnose(section)
            .is_some_and(|s| !s.inheritances().is_empty())
    }

    pub fn is_inherited_from(&self, section: &str, base: &str) -> bool {
        self.section_or_diagnose(section)
            .is_some_and(|s| s.inheritances().iter().any(|b| b == base))
    }

    pub fn attributes(&self, section: &str) -> &[String] {
        self.section_or_diagnose(section)
            .map_or(&[], Section::attributes)
    }

    pub fn inheritances(&self, section: &str) -> &[String] {
        self.section_or_diagnose(section)
            .map_or(&[], Section::inheritances)
    }

    /// Resolves `key` in `section`, falling back to the section's bases in
    /// declared order. Fallback is one level deep: a base's own inheritances
    /// are not consulted.
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        let Some(sec) = self.section_or_diagnose(section) else {
            return default.to_string();
        };
        if let Some(v) = sec.value(key) {
            return v.to_string();
        }
        for base in sec.inheritances() {
            if let Some(v) = self.doc.section(base).and_then(|b| b.value(key)) {
                return v.to_string();
            }
        }
        default.to_string()
    }

    /// Typed scalar lookup. An empty or absent value yields `default`;
    /// malformed text is a hard conversion error.
    pub fn get<T: FromScalar>(&self, section: &str, key: &str, default: T) -> Result<T> {
        let raw = self.get_string(section, key, "");
        if raw.is_empty() {
            return Ok(default);
        }
        T::from_scalar(&raw)
    }

    /// Splits the raw value on `,` (no trimming) and converts each element.
    /// An empty or absent value yields an empty vector.
    pub fn get_array<T: FromScalar>(&self, section: &str, key: &str) -> Result<Vec<T>> {
        let raw = self.get_string(section, key, "");
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        raw.split(',').map(T::from_scalar).collect()
    }

    /// First two elements of `get_array`; `default` (plus a diagnostic) when
    /// the array is shorter.
    pub fn get_vec2<T: FromScalar>(
        &self,
        section: &str,
        key: &str,
        default: Vec2<T>,
    ) -> Result<Vec2<T>> {
        let mut it = self.get_array::<T>(section, key)?.into_iter();
        match (it.next(), it.next()) {
            (Some(x), Some(y)) => Ok(Vec2 { x, y }),
            _ => {
                self.diagnose_arity(section, key, 2);
                Ok(default)
            }
        }
    }

    pub fn get_vec3<T: FromScalar>(
        &self,
        section: &str,
        key: &str,
        default: Vec3<T>,
    ) -> Result<Vec3<T>> {
        let mut it = self.get_array::<T>(section, key)?.into_iter();
        match (it.next(), it.next(), it.next()) {
            (Some(x), Some(y), Some(z)) => Ok(Vec3 { x, y, z }),
            _ => {
                self.diagnose_arity(section, key, 3);
                Ok(default)
            }
        }
    }

    pub fn get_vec4<T: FromScalar>(
        &self,
        section: &str,
        key: &str,
        default: Vec4<T>,
    ) -> Result<Vec4<T>> {
        let mut it = self.get_array::<T>(section, key)?.into_iter();
        match (it.next(), it.next(), it.next(), it.next()) {
            (Some(x), Some(y), Some(z), Some(w)) => Ok(Vec4 { x, y, z, w }),
            _ => {
                self.diagnose_arity(section, key, 4);
                Ok(default)
            }
        }
    }

    /// Creates `section` if needed and overwrites `key` unconditionally.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.doc.create_section(section);
        if let Some(sec) = self.doc.section_mut(section) {
            sec.set_value(key, value);
        }
    }

    /// Serializes the document back to the textual format.
    pub fn to_text(&self) -> String {
        encode::write_document(&self.doc)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_text())?;
        Ok(())
    }

    fn section_or_diagnose(&self, section: &str) -> Option<&Section> {
        let found = self.doc.section(section);
        if found.is_none() {
            self.sink.message(&format!("section '{section}' not found"));
        }
        found
    }

    fn diagnose_arity(&self, section: &str, key: &str, wanted: usize) {
        self.sink.message(&format!(
            "value '{key}' in section '{section}' has fewer than {wanted} elements"
        ));
    }
}
