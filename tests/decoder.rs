#[path = "common/mod.rs"]
mod common;

use cardbook::{decode_bytes, decode_cards, parse_content_line, unescape, unfold, DecodeErrorKind};
use common::*;

/// Two blocks in one document decode to two cards; BEGIN/END/VERSION handling is
/// case-insensitive and blank lines between blocks are ignored.
#[test]
fn splits_document_into_cards() {
    let doc = format!("{}\r\n\r\n{}", card(&["FN:One"]), "begin:vcard\nfn:Two\nend:vcard\n");
    let cards = decode_cards(&doc).unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].first("FN").unwrap().text(), "One");
    assert_eq!(cards[1].first("fn").unwrap().text(), "Two");
}

#[test]
fn empty_document_has_no_cards() {
    assert!(decode_cards("").unwrap().is_empty());
    assert!(decode_cards("\r\n\r\n").unwrap().is_empty());
}

#[test]
fn leading_bom_is_ignored() {
    let doc = format!("\u{feff}{}", card(&["FN:Bom"]));
    assert_eq!(decode_cards(&doc).unwrap().len(), 1);
}

/// CRLF or LF followed by one space/tab continues the previous line; only the
/// first whitespace character is removed.
#[test]
fn unfolds_continuation_lines() {
    assert_eq!(unfold("NOTE:hello\r\n  world\r\nFN:x"), "NOTE:hello world\nFN:x");
    assert_eq!(unfold("NOTE:a\n\tb"), "NOTE:ab");

    let cards = decode_cards(&card(&["NOTE:This is a long", "  note"])).unwrap();
    assert_eq!(cards[0].first("NOTE").unwrap().text(), "This is a long note");
}

#[test]
fn parses_group_parameters_and_value() {
    let p = parse_content_line(r#"item1.email;type="work,pref";X-Label=a:me@x.example"#, 7).unwrap();
    assert_eq!(p.group.as_deref(), Some("item1"));
    assert_eq!(p.name, "EMAIL");
    assert_eq!(p.value, "me@x.example");
    assert_eq!(p.params.len(), 2);
    assert_eq!(p.params[0].name, "TYPE");
    // A quoted list is the same list as an unquoted one.
    assert_eq!(p.params[0].values, vec!["work", "pref"]);
    assert_eq!(p.param_values("x-label").collect::<Vec<_>>(), vec!["a"]);
}

/// A colon inside a quoted parameter value is not the value separator.
#[test]
fn quoted_colon_stays_in_parameter() {
    let p = parse_content_line(r#"X-SOCIAL;URI="https://example.com":handle"#, 1).unwrap();
    assert_eq!(p.param_values("URI").next(), Some("https://example.com"));
    assert_eq!(p.value, "handle");
}

#[test]
fn bare_parameters_have_no_values() {
    let p = parse_content_line("TEL;CELL;voice:123", 1).unwrap();
    assert_eq!(p.params.len(), 2);
    assert_eq!(p.params[0].name, "CELL");
    assert!(p.params[0].values.is_empty());
    assert_eq!(p.params[1].name, "VOICE");
}

#[test]
fn text_escapes_are_resolved() {
    assert_eq!(unescape(r"a\, b\nc\;d\\e\Nf"), "a, b\nc;d\\e\nf");
    // Unknown escapes pass through.
    assert_eq!(unescape(r"x\qy"), r"x\qy");
}

/// Structured values split on unescaped `;` only; each component is then unescaped.
#[test]
fn structured_components_respect_escapes() {
    let p = parse_content_line(r"N:Doe\;Smith;John;;;", 1).unwrap();
    assert_eq!(p.components(), vec!["Doe;Smith", "John", "", "", ""]);
}

#[test]
fn line_without_separator_is_an_error() {
    let err = decode_cards("BEGIN:VCARD\nFN John\nEND:VCARD\n").unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingSeparator);
    assert_eq!(err.line, 2);
}

/// Vendor extensions with unusual names are kept on the card and do not cost the
/// file its contacts; a line with no name at all is skipped.
#[test]
fn unusual_property_names_do_not_fail_the_card() {
    let doc = card(&["FN:Jane Roe", "X-EVOLUTION_FILE_AS:Roe, Jane", ":orphan value", "EMAIL:jane@example.com"]);
    let cards = decode_cards(&doc).unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].first("X-EVOLUTION_FILE_AS").unwrap().text(), "Roe, Jane");
    assert_eq!(cards[0].first("EMAIL").unwrap().text(), "jane@example.com");
    assert_eq!(cards[0].properties.len(), 4); // VERSION, FN, X-EVOLUTION_FILE_AS, EMAIL

    let err = parse_content_line(";TYPE=x:value", 4).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::InvalidPropertyName);
    assert_eq!(err.line, 4);
}

/// Reported line numbers refer to the file as written, not to the unfolded text.
#[test]
fn error_lines_count_physical_lines() {
    let doc = "BEGIN:VCARD\r\nNOTE:folded\r\n  across\r\n  three lines\r\nFN Missing colon\r\nEND:VCARD\r\n";
    let err = decode_cards(doc).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::MissingSeparator);
    assert_eq!(err.line, 5);
}

#[test]
fn structural_errors_are_reported_with_line_numbers() {
    let outside = decode_cards("FN:Loose\n").unwrap_err();
    assert_eq!(outside.kind, DecodeErrorKind::PropertyOutsideCard);
    assert_eq!(outside.line, 1);

    let nested = decode_cards("BEGIN:VCARD\nFN:A\nBEGIN:VCARD\n").unwrap_err();
    assert_eq!(nested.kind, DecodeErrorKind::NestedBegin);
    assert_eq!(nested.line, 3);

    let stray_end = decode_cards("END:VCARD\n").unwrap_err();
    assert_eq!(stray_end.kind, DecodeErrorKind::UnexpectedEnd);

    let open = decode_cards("BEGIN:VCARD\nFN:A\n").unwrap_err();
    assert_eq!(open.kind, DecodeErrorKind::UnterminatedCard);
}

#[test]
fn non_utf8_bytes_are_rejected() {
    let err = decode_bytes(&[b'B', 0xff, 0xfe, b'\n']).unwrap_err();
    assert_eq!(err.kind, DecodeErrorKind::NotUtf8);
    assert!(err.to_string().contains("UTF-8"));
}
