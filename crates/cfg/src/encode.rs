//! Writes a `Document` back to the textual format.
//!
//! Output is normalized: one blank-line separated block per section,
//! `[name] : base0, base1 = attr0, attr1` headers, `key = value` lines.
//! Comments and original formatting are not preserved. Values containing
//! characters the parser treats structurally outside strings are emitted as
//! quoted strings, so reparsing the output reproduces the same document.

use crate::document::Document;

pub fn write_document(doc: &Document) -> String {
    let mut out = String::new();
    for (i, (name, section)) in doc.sections().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push('[');
        out.push_str(name);
        out.push(']');
        if !section.inheritances().is_empty() {
            out.push_str(" : ");
            push_list(&mut out, section.inheritances());
        }
        if !section.attributes().is_empty() {
            out.push_str(" = ");
            push_list(&mut out, section.attributes());
        }
        out.push('\n');
        for (key, value) in section.values() {
            out.push_str(key);
            out.push_str(" = ");
            if needs_quotes(value) {
                escape_and_quote_into(&mut out, value);
            } else {
                out.push_str(value);
            }
            out.push('\n');
        }
    }
    out
}

fn push_list(out: &mut String, items: &[String]) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(item);
    }
}

/// True when `value` would not survive a reparse unquoted.
fn needs_quotes(value: &str) -> bool {
    value.chars().any(|c| {
        matches!(
            c,
            ' ' | '\t' | '\n' | '"' | '\\' | ';' | '|' | ':' | '=' | '#' | '[' | ']'
        )
    })
}

fn escape_and_quote_into(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
}
