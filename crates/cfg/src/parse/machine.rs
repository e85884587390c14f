//! The character-driven state machine that turns input text into `Document`
//! mutations.
//!
//! The machine consumes exactly one character at a time, left to right, with
//! a single character of lookahead (the escape flag inside strings). All
//! token accumulation lives in external buffers; the states themselves carry
//! no data. Problems are reported through the message sink and recovered at
//! the next newline, so a malformed line never aborts a parse.

use std::path::Path;

use crate::diag::MessageSink;
use crate::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    NewLine,
    Section,
    Inheritance,
    Attribute,
    Key,
    Value,
    ValueArray,
    StringValue,
    Comment,
    MultilineComment,
    Preprocessor,
    Include,
    Error,
}

/// Token accumulators, one per production.
#[derive(Default)]
struct Buffers {
    section: String,
    inheritance: String,
    attribute: String,
    key: String,
    value: String,
    directive: String,
    include: String,
}

impl Buffers {
    fn clear(&mut self) {
        self.section.clear();
        self.inheritance.clear();
        self.attribute.clear();
        self.key.clear();
        self.value.clear();
        self.directive.clear();
        self.include.clear();
    }
}

pub(crate) struct Machine<'a> {
    doc: &'a mut Document,
    sink: &'a dyn MessageSink,
    base_dir: &'a Path,
    state: State,
    /// State a block comment interrupted; restored on the closing `|`.
    resume: State,
    buf: Buffers,
    /// Name of the section currently receiving productions. `None` while the
    /// context is inert: after a duplicate header, or before any header.
    section: Option<String>,
    /// Whether the key registered at `=` may be committed at the newline.
    key_accepted: bool,
    /// Spaces are skipped while set. Set at each newline and after `]`,
    /// cleared by `[` so a section name cannot contain whitespace.
    ignore_spaces: bool,
    /// A backslash was seen inside a string; the next character is an escape.
    escape: bool,
    line: usize,
    column: usize,
}

impl<'a> Machine<'a> {
    pub(crate) fn new(doc: &'a mut Document, sink: &'a dyn MessageSink, base_dir: &'a Path) -> Self {
        Self {
            doc,
            sink,
            base_dir,
            state: State::NewLine,
            resume: State::NewLine,
            buf: Buffers::default(),
            section: None,
            key_accepted: false,
            ignore_spaces: true,
            escape: false,
            line: 1,
            column: 0,
        }
    }

    pub(crate) fn run(&mut self, input: &str) {
        for c in input.chars() {
            self.feed(c);
        }
        self.finish();
    }

    fn feed(&mut self, c: char) {
        if c == '\n' {
            self.newline();
            return;
        }
        if c == '\r' {
            return;
        }
        self.column += 1;
        if self.state == State::StringValue && self.escape {
            self.escaped(c);
            return;
        }
        match c {
            ';' => self.semicolon(),
            '|' => self.pipe(),
            ' ' | '\t' => self.whitespace(c),
            '\\' => self.backslash(),
            '"' => self.quote(),
            '#' => self.hash(),
            '<' => self.angle_open(c),
            '>' => self.angle_close(c),
            '[' => self.bracket_open(),
            ']' => self.bracket_close(),
            ',' => self.comma(),
            ':' => self.colon(),
            '=' => self.equals(),
            other => self.accumulate(other),
        }
    }

    /// End of input behaves like a final newline so the last token flushes.
    fn finish(&mut self) {
        match self.state {
            State::StringValue => {
                self.diagnose("unterminated string at end of input");
                self.state = State::Value;
            }
            State::MultilineComment => self.state = self.resume,
            _ => {}
        }
        self.flush_line();
        self.state = State::NewLine;
    }

    fn newline(&mut self) {
        match self.state {
            // A string legally spans physical lines.
            State::StringValue => self.buf.value.push('\n'),
            State::MultilineComment => {}
            _ => {
                self.flush_line();
                self.state = State::NewLine;
            }
        }
        self.line += 1;
        self.column = 0;
        self.ignore_spaces = true;
    }

    /// Flushes whatever token the current state has pending. Shared by the
    /// newline handler, line comments, and end of input.
    fn flush_line(&mut self) {
        match self.state {
            State::Inheritance => self.flush_inheritance(),
            State::Attribute => self.flush_attribute(),
            State::Value | State::ValueArray => self.commit_value(),
            State::Section => {
                if !self.buf.section.is_empty() {
                    self.diagnose("section header is missing ']'");
                    self.buf.section.clear();
                }
            }
            State::Key => {
                if !self.buf.key.is_empty() {
                    self.diagnose(&format!("key '{}' has no value", self.buf.key));
                    self.buf.key.clear();
                }
            }
            State::Preprocessor | State::Include => {
                self.buf.directive.clear();
                self.buf.include.clear();
            }
            State::NewLine
            | State::Comment
            | State::Error
            | State::StringValue
            | State::MultilineComment => {}
        }
    }

    fn escaped(&mut self, c: char) {
        self.escape = false;
        match c {
            '\\' => self.buf.value.push('\\'),
            'n' => self.buf.value.push('\n'),
            '"' => self.buf.value.push('"'),
            '\'' => self.buf.value.push('\''),
            other => {
                self.diagnose(&format!("unknown escape sequence '\\{other}'"));
                self.buf.value.push(other);
            }
        }
    }

    fn semicolon(&mut self) {
        match self.state {
            State::StringValue => self.buf.value.push(';'),
            State::Comment | State::MultilineComment | State::Error => {}
            _ => {
                // A trailing comment must not discard the line's pending token.
                self.flush_line();
                self.state = State::Comment;
            }
        }
    }

    fn pipe(&mut self) {
        match self.state {
            State::StringValue => self.buf.value.push('|'),
            State::MultilineComment => self.state = self.resume,
            State::Comment => {}
            _ => {
                self.resume = self.state;
                self.state = State::MultilineComment;
            }
        }
    }

    fn whitespace(&mut self, c: char) {
        match self.state {
            State::StringValue => self.buf.value.push(c),
            State::Comment | State::MultilineComment | State::Error => {}
            State::Preprocessor => {
                if self.buf.directive == "include" {
                    self.state = State::Include;
                } else {
                    // Unrecognized directives are dropped without a diagnostic.
                    self.buf.directive.clear();
                }
            }
            _ => {
                if !self.ignore_spaces {
                    self.error("whitespace is not allowed inside a section name");
                }
            }
        }
    }

    fn backslash(&mut self) {
        match self.state {
            State::StringValue => self.escape = true,
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("escape sequences are only valid inside strings"),
        }
    }

    fn quote(&mut self) {
        match self.state {
            State::Value => self.state = State::StringValue,
            State::StringValue => self.state = State::Value,
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("string values must follow 'key ='"),
        }
    }

    fn hash(&mut self) {
        match self.state {
            State::NewLine => self.state = State::Preprocessor,
            State::StringValue => self.buf.value.push('#'),
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("preprocessor directives must start a line"),
        }
    }

    fn angle_open(&mut self, c: char) {
        match self.state {
            State::Include => {}
            _ => self.accumulate(c),
        }
    }

    fn angle_close(&mut self, c: char) {
        match self.state {
            State::Include => {
                self.include_file();
                self.buf.include.clear();
            }
            _ => self.accumulate(c),
        }
    }

    fn bracket_open(&mut self) {
        match self.state {
            State::NewLine => {
                self.state = State::Section;
                self.ignore_spaces = false;
            }
            State::StringValue => self.buf.value.push('['),
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("section headers must start a line"),
        }
    }

    fn bracket_close(&mut self) {
        match self.state {
            State::Section => {
                self.open_section();
                self.ignore_spaces = true;
            }
            State::StringValue => self.buf.value.push(']'),
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("unexpected ']'"),
        }
    }

    fn comma(&mut self) {
        match self.state {
            State::StringValue | State::ValueArray => self.buf.value.push(','),
            State::Value => {
                self.state = State::ValueArray;
                self.buf.value.push(',');
            }
            State::Inheritance => self.flush_inheritance(),
            State::Attribute => self.flush_attribute(),
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("',' is only valid inside a value or a list"),
        }
    }

    fn colon(&mut self) {
        match self.state {
            State::Section => {
                // An unclosed header name, if any, dies here.
                self.buf.section.clear();
                self.state = State::Inheritance;
            }
            State::StringValue => self.buf.value.push(':'),
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("':' is only valid after a section header"),
        }
    }

    fn equals(&mut self) {
        match self.state {
            State::Section => {
                self.buf.section.clear();
                self.state = State::Attribute;
            }
            State::Inheritance => {
                self.flush_inheritance();
                self.state = State::Attribute;
            }
            State::Key => {
                self.register_key();
                self.state = State::Value;
            }
            State::StringValue => self.buf.value.push('='),
            State::Comment | State::MultilineComment | State::Error => {}
            _ => self.error("misplaced '='"),
        }
    }

    fn accumulate(&mut self, c: char) {
        match self.state {
            State::Comment | State::MultilineComment | State::Error => {}
            State::StringValue => self.buf.value.push(c),
            State::NewLine => {
                self.state = State::Key;
                self.buf.key.push(c);
            }
            State::Section => self.buf.section.push(c),
            State::Inheritance => self.buf.inheritance.push(c),
            State::Attribute => self.buf.attribute.push(c),
            State::Key => self.buf.key.push(c),
            State::Value | State::ValueArray => self.buf.value.push(c),
            State::Preprocessor => self.buf.directive.push(c),
            State::Include => self.buf.include.push(c),
        }
    }

    fn open_section(&mut self) {
        let name = std::mem::take(&mut self.buf.section);
        if self.doc.create_section(&name) {
            self.section = Some(name);
        } else {
            // First definition wins; the body of this header is parsed but
            // attached to nothing.
            self.diagnose(&format!("section '{name}' already exists"));
            self.section = None;
        }
    }

    fn flush_inheritance(&mut self) {
        let base = std::mem::take(&mut self.buf.inheritance);
        if base.is_empty() {
            return;
        }
        let Some(name) = self.section.as_deref() else {
            return;
        };
        // Resolved against already-declared sections only; forward references
        // are dropped here.
        if !self.doc.has_section(&base) {
            self.diagnose(&format!(
                "section '{base}' does not exist and cannot be inherited from"
            ));
            return;
        }
        if let Some(sec) = self.doc.section_mut(name) {
            sec.add_inheritance(&base);
        }
    }

    fn flush_attribute(&mut self) {
        let attribute = std::mem::take(&mut self.buf.attribute);
        if attribute.is_empty() {
            return;
        }
        let Some(name) = self.section.as_deref() else {
            return;
        };
        if let Some(sec) = self.doc.section_mut(name) {
            sec.add_attribute(&attribute);
        }
    }

    fn register_key(&mut self) {
        self.key_accepted = false;
        let Some(name) = self.section.as_deref() else {
            return;
        };
        let duplicate = match self.doc.section_mut(name) {
            Some(sec) => !sec.insert_value(&self.buf.key, ""),
            None => return,
        };
        if duplicate {
            self.diagnose(&format!(
                "key '{}' already exists in section '{}'",
                self.buf.key, name
            ));
        } else {
            self.key_accepted = true;
        }
    }

    fn commit_value(&mut self) {
        if self.key_accepted {
            if let Some(name) = self.section.as_deref() {
                if let Some(sec) = self.doc.section_mut(name) {
                    sec.set_value(&self.buf.key, &self.buf.value);
                }
            }
        }
        self.buf.key.clear();
        self.buf.value.clear();
        self.key_accepted = false;
    }

    fn include_file(&mut self) {
        let path = self.base_dir.join(&self.buf.include);
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                // The nested parse shares the document; this machine's state,
                // buffers, and counters are untouched.
                let mut nested = Machine::new(self.doc, self.sink, self.base_dir);
                nested.run(&text);
            }
            Err(e) => self.diagnose(&format!(
                "cannot open include file '{}': {e}",
                path.display()
            )),
        }
    }

    fn diagnose(&self, message: &str) {
        self.sink.message(&format!(
            "line {}, char {}: {message}",
            self.line, self.column
        ));
    }

    /// Local diagnostic plus recovery: the line is dropped and the next
    /// newline returns the machine to `NewLine`.
    fn error(&mut self, message: &str) {
        self.diagnose(message);
        self.buf.clear();
        self.key_accepted = false;
        self.state = State::Error;
    }
}
