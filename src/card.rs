//! vCard decoding: line unfolding, card block splitting and content-line parsing.
//!
//! Only the syntax needed to pull out individual properties is handled here. Values are
//! kept raw (still escaped) on the `Property`; callers choose between `text()` for plain
//! values and `components()` for structured ones (N, ADR).

use crate::error::{DecodeError, DecodeErrorKind};

/// A property parameter. Bare legacy flags (`TEL;CELL:`) have no values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    pub name: String, // uppercase
    pub values: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub group: Option<String>,
    pub name: String, // uppercase
    pub params: Vec<Parameter>,
    pub value: String, // raw, still escaped
}

impl Property {
    /// Value with text escapes resolved.
    pub fn text(&self) -> String {
        unescape(&self.value)
    }

    /// Structured value split on unescaped `;`, each component unescaped.
    pub fn components(&self) -> Vec<String> {
        split_components(&self.value).iter().map(|c| unescape(c)).collect()
    }

    /// All values of every parameter called `name`, in encounter order.
    pub fn param_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |p| p.name.eq_ignore_ascii_case(name))
            .flat_map(|p| p.values.iter().map(String::as_str))
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// One BEGIN:VCARD .. END:VCARD block (BEGIN/END themselves are not stored).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Card {
    pub properties: Vec<Property>,
}

impl Card {
    /// First occurrence of a property.
    pub fn first(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Every occurrence of a property, in file order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> + 'a {
        self.properties.iter().filter(move |p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Decode raw file bytes. Non-UTF-8 input is rejected rather than guessed at.
pub fn decode_bytes(bytes: &[u8]) -> Result<Vec<Card>, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|_| DecodeError::new(1, DecodeErrorKind::NotUtf8))?;
    decode_cards(text)
}

/// Split a document into cards. An empty document yields an empty vector.
///
/// Lines whose property name is empty are skipped; any other name is accepted and
/// left for the extractor to ignore.
pub fn decode_cards(input: &str) -> Result<Vec<Card>, DecodeError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut cards = Vec::new();
    let mut current: Option<Card> = None;

    for (line_num, line) in logical_lines(input) {
        if line.trim().is_empty() {
            continue;
        }

        let prop = match parse_content_line(&line, line_num) {
            Ok(prop) => prop,
            Err(e) if e.kind == DecodeErrorKind::InvalidPropertyName => continue,
            Err(e) => return Err(e),
        };
        let is_vcard_marker = prop.value.trim().eq_ignore_ascii_case("VCARD");

        match (prop.name.as_str(), current.as_mut()) {
            ("BEGIN", None) if is_vcard_marker => current = Some(Card::default()),
            ("BEGIN", Some(_)) if is_vcard_marker => {
                return Err(DecodeError::new(line_num, DecodeErrorKind::NestedBegin));
            }
            ("END", Some(_)) if is_vcard_marker => {
                if let Some(card) = current.take() {
                    cards.push(card);
                }
            }
            ("END", None) if is_vcard_marker => {
                return Err(DecodeError::new(line_num, DecodeErrorKind::UnexpectedEnd));
            }
            (_, Some(card)) => card.properties.push(prop),
            (_, None) => {
                return Err(DecodeError::new(line_num, DecodeErrorKind::PropertyOutsideCard));
            }
        }
    }

    if current.is_some() {
        let last_line = input.split('\n').count();
        return Err(DecodeError::new(last_line, DecodeErrorKind::UnterminatedCard));
    }
    Ok(cards)
}

/// Unfolded lines, each paired with the 1-based physical line it starts on.
///
/// A physical line starting with one space or tab continues the previous one; that
/// first whitespace character is dropped. Line breaks are LF or CRLF.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();
    for (idx, raw) in input.split('\n').enumerate() {
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        if let (Some(rest), Some((_, prev))) = (raw.strip_prefix(|c: char| c == ' ' || c == '\t'), lines.last_mut()) {
            prev.push_str(rest);
            continue;
        }
        lines.push((idx + 1, raw.to_string()));
    }
    lines
}

/// Remove line folding: a CRLF or bare LF followed by one space or tab is a continuation.
pub fn unfold(input: &str) -> String {
    logical_lines(input).into_iter().map(|(_, line)| line).collect::<Vec<_>>().join("\n")
}

/// Parse `[group.]NAME[;param]*:value`.
pub fn parse_content_line(line: &str, line_num: usize) -> Result<Property, DecodeError> {
    let colon = find_value_separator(line)
        .ok_or_else(|| DecodeError::new(line_num, DecodeErrorKind::MissingSeparator))?;
    let (head, value) = (&line[..colon], &line[colon + 1..]);

    let (name_part, params_part) = match find_unquoted(head, ';') {
        Some(i) => (&head[..i], Some(&head[i + 1..])),
        None => (head, None),
    };

    let (group, name) = match name_part.rsplit_once('.') {
        Some((g, n)) if !g.is_empty() => (Some(g.to_string()), n),
        _ => (None, name_part),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(DecodeError::new(line_num, DecodeErrorKind::InvalidPropertyName));
    }

    let params = params_part.map(parse_parameters).unwrap_or_default();

    Ok(Property {
        group,
        name: name.to_ascii_uppercase(),
        params,
        value: value.to_string(),
    })
}

/// First `:` that is not inside a quoted parameter value.
fn find_value_separator(line: &str) -> Option<usize> {
    find_unquoted(line, ':')
}

fn find_unquoted(s: &str, needle: char) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c == needle && !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_unquoted(s: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = s;
    while let Some(i) = find_unquoted(rest, sep) {
        out.push(&rest[..i]);
        rest = &rest[i + sep.len_utf8()..];
    }
    out.push(rest);
    out
}

fn parse_parameters(s: &str) -> Vec<Parameter> {
    split_unquoted(s, ';')
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .map(|p| match p.split_once('=') {
            Some((name, values)) => Parameter {
                name: name.trim().to_ascii_uppercase(),
                // `TYPE="voice,home"` is the same list as `TYPE=voice,home`.
                values: split_unquoted(values, ',')
                    .into_iter()
                    .flat_map(|v| v.trim().trim_matches('"').split(','))
                    .map(|v| v.trim().to_string())
                    .collect(),
            },
            None => Parameter { name: p.trim().to_ascii_uppercase(), values: Vec::new() },
        })
        .collect()
}

/// Split a structured value on `;` that is not preceded by a backslash escape.
/// Components keep their escapes; see `unescape`.
fn split_components(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            ';' => {
                parts.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

/// Resolve `\\`, `\n`, `\N`, `\,` and `\;`. Unknown escapes are left as written.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(e @ ('\\' | ',' | ';')) => out.push(e),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
