//! Pure storage for parsed documents.
//!
//! No cross-reference validation happens here; the parser decides at flush
//! time what gets stored. Sections and keys keep declaration order, which
//! also keeps save output stable.

/// One `[name]` block: inheritance list, attribute flags, key/value pairs.
///
/// Inheritance order is significant: it is the priority order for inherited
/// value lookup, highest priority first. Values are raw text; arrays are
/// stored as a single `,`-joined string and split at query time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    inheritances: Vec<String>,
    attributes: Vec<String>,
    values: Vec<(String, String)>,
}

impl Section {
    pub fn inheritances(&self) -> &[String] {
        &self.inheritances
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.values.iter().any(|(k, _)| k == key)
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn add_inheritance(&mut self, base: &str) {
        self.inheritances.push(base.to_string());
    }

    pub(crate) fn add_attribute(&mut self, attribute: &str) {
        self.attributes.push(attribute.to_string());
    }

    /// Registers `key` without touching an existing entry. `false` signals a
    /// duplicate; the first value wins.
    pub(crate) fn insert_value(&mut self, key: &str, value: &str) -> bool {
        if self.has_key(key) {
            return false;
        }
        self.values.push((key.to_string(), value.to_string()));
        true
    }

    /// Overwrites `key` unconditionally, creating it if needed.
    pub(crate) fn set_value(&mut self, key: &str, value: &str) {
        match self.values.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.values.push((key.to_string(), value.to_string())),
        }
    }
}

/// The full parse result: sections by name, names unique, declaration order
/// preserved. Recursive includes feed the same `Document` as the including
/// file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: Vec<(String, Section)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Creates an empty section. `false` signals that `name` already exists;
    /// the existing section is left untouched.
    pub(crate) fn create_section(&mut self, name: &str) -> bool {
        if self.has_section(name) {
            return false;
        }
        self.sections.push((name.to_string(), Section::default()));
        true
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }
}
