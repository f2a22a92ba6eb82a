//! Parser for the inline markup subset: `<b>`, `<br/>`, and entities.

use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};

/// A parsed piece of paragraph content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text in one face. Ordinary whitespace is normalized to a plain space;
    /// `&nbsp;` survives as U+00A0.
    Text { text: String, bold: bool },
    /// Forced line break.
    Break,
}

/// Parse `markup` into tokens. `bold` sets the base face; `<b>` nests on top
/// of it. Unknown tags are dropped. Named entities resolve against the HTML5
/// table; an `&` that does not start a known entity is kept as text, and so
/// is a `<` that does not open a tag.
pub fn parse(markup: &str, bold: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut rest = markup;

    while let Some((start, end)) = find_tag(rest) {
        push_text(&mut tokens, &unescape(&rest[..start]), bold || depth > 0);
        apply_tag(&rest[start + 1..end], &mut depth, &mut tokens);
        rest = &rest[end + 1..];
    }
    push_text(&mut tokens, &unescape(rest), bold || depth > 0);
    tokens
}

/// Byte offsets of the first `<` and its closing `>` that look like a tag:
/// an optional `/` then a letter, with no other `<` in between.
fn find_tag(text: &str) -> Option<(usize, usize)> {
    text.match_indices('<').find_map(|(start, _)| {
        let body = &text[start + 1..];
        let name = body.strip_prefix('/').unwrap_or(body);
        if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        let end = body.find(['<', '>'])?;
        body[end..]
            .starts_with('>')
            .then_some((start, start + 1 + end))
    })
}

fn apply_tag(tag: &str, depth: &mut usize, tokens: &mut Vec<Token>) {
    let name = tag
        .trim_end_matches('/')
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match name.as_str() {
        "b" | "strong" => *depth += 1,
        "/b" | "/strong" => *depth = depth.saturating_sub(1),
        "br" => tokens.push(Token::Break),
        _ => {}
    }
}

fn unescape(text: &str) -> Cow<'_, str> {
    match unescape_with(text, resolve_html5_entity) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Owned(unescape_lenient(text)),
    }
}

/// Entity by entity decoding for text where a stray `&` makes the strict
/// pass fail.
fn unescape_lenient(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[..=end];
            unescape_with(entity, resolve_html5_entity)
                .ok()
                .map(|decoded| (entity.len(), decoded))
        });
        match decoded {
            Some((len, decoded)) => {
                out.push_str(&decoded);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn push_text(tokens: &mut Vec<Token>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    let normalized = text
        .chars()
        .map(|c| if c.is_whitespace() && c != '\u{a0}' { ' ' } else { c });
    if let Some(Token::Text { text, bold: current }) = tokens.last_mut()
        && *current == bold
    {
        text.extend(normalized);
        return;
    }
    tokens.push(Token::Text {
        text: normalized.collect(),
        bold,
    });
}
