mod common;

use common::{has_message, parse};

#[test]
fn quoted_value_keeps_commas_and_comment_markers() {
    let (config, sink) = parse("[s]\nv = \"a,b ; c\"\n");
    assert_eq!(config.get_string("s", "v", ""), "a,b ; c");
    assert!(sink.is_empty());
}

#[test]
fn quoted_value_with_embedded_comma_is_a_single_scalar() {
    let (config, _) = parse("[s]\nv = \"one, not two\"\n");
    // The comma survives into the raw value; it does not make this an array
    // of length two at parse time.
    assert_eq!(config.get_string("s", "v", ""), "one, not two");
}

#[test]
fn string_spans_physical_lines() {
    let (config, sink) = parse("[s]\nv = \"first\nsecond\"\n");
    assert_eq!(config.get_string("s", "v", ""), "first\nsecond");
    assert!(sink.is_empty());
}

#[test]
fn escape_sequences() {
    let (config, sink) = parse("[s]\nv = \"a\\\"b\\\\c\\nd\\'e\"\n");
    assert_eq!(config.get_string("s", "v", ""), "a\"b\\c\nd'e");
    assert!(sink.is_empty());
}

#[test]
fn unknown_escape_keeps_the_character() {
    let (config, sink) = parse("[s]\nv = \"a\\zb\"\n");
    assert_eq!(config.get_string("s", "v", ""), "azb");
    assert!(has_message(&sink, "unknown escape sequence '\\z'"));
}

#[test]
fn structural_characters_are_literal_inside_strings() {
    let (config, sink) = parse("[s]\nv = \";|:=#[],\"\n");
    assert_eq!(config.get_string("s", "v", ""), ";|:=#[],");
    assert!(sink.is_empty());
}

#[test]
fn unterminated_string_is_diagnosed_and_closed() {
    let (config, sink) = parse("[s]\nv = \"abc");
    assert_eq!(config.get_string("s", "v", ""), "abc");
    assert!(has_message(&sink, "unterminated string at end of input"));
}

#[test]
fn quote_outside_a_value_is_an_error() {
    let (config, sink) = parse("[s]\nk\"ey = 1\n");
    assert!(!config.has_key("s", "key"));
    assert!(has_message(&sink, "string values must follow 'key ='"));
}

#[test]
fn spaces_inside_strings_are_literal() {
    let (config, _) = parse("[s]\nv = \"  padded  \"\n");
    assert_eq!(config.get_string("s", "v", ""), "  padded  ");
}
