//! Greedy line breaking of parsed markup.
//!
//! Lines break only at plain spaces; a non-breaking space is part of its
//! word. A word wider than the available width is placed alone on its line.

use crate::fonts::{FontFamily, StandardFont};
use crate::markup::Token;

/// Slack allowed when comparing measured widths.
const WIDTH_EPSILON: f32 = 0.01;

/// A run of text in one face.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub font: StandardFont,
}

/// One broken line with its measured width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
    pub width: f32,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    fn push(&mut self, text: &str, font: StandardFont, size: f32) {
        self.width += font.text_width(text, size);
        match self.spans.last_mut() {
            Some(span) if span.font == font => span.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                font,
            }),
        }
    }
}

enum Piece {
    Word(Vec<(String, StandardFont)>),
    Space(StandardFont),
    Break,
}

fn pieces(tokens: &[Token], family: FontFamily) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for token in tokens {
        let (text, bold) = match token {
            Token::Break => {
                pieces.push(Piece::Break);
                continue;
            }
            Token::Text { text, bold } => (text, *bold),
        };
        let font = family.face(bold);
        for ch in text.chars() {
            if ch == ' ' {
                if !matches!(pieces.last(), Some(Piece::Space(_))) {
                    pieces.push(Piece::Space(font));
                }
                continue;
            }
            match pieces.last_mut() {
                Some(Piece::Word(segments)) => match segments.last_mut() {
                    Some((segment, segment_font)) if *segment_font == font => segment.push(ch),
                    _ => segments.push((ch.to_string(), font)),
                },
                _ => pieces.push(Piece::Word(vec![(ch.to_string(), font)])),
            }
        }
    }
    pieces
}

/// Break `tokens` into lines no wider than `max_width` where possible.
///
/// Each `<br/>` ends the current line, so consecutive breaks leave an empty
/// line. Runs of spaces collapse to one and spaces at line starts are dropped.
pub fn break_lines(tokens: &[Token], family: FontFamily, size: f32, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    let mut pending_space: Option<StandardFont> = None;

    for piece in pieces(tokens, family) {
        match piece {
            Piece::Break => {
                lines.push(std::mem::take(&mut line));
                pending_space = None;
            }
            Piece::Space(font) => {
                if !line.is_empty() {
                    pending_space = Some(font);
                }
            }
            Piece::Word(segments) => {
                let word_width: f32 = segments
                    .iter()
                    .map(|(text, font)| font.text_width(text, size))
                    .sum();
                if let Some(font) = pending_space.take() {
                    let gap = font.text_width(" ", size);
                    if line.width + gap + word_width <= max_width + WIDTH_EPSILON {
                        line.push(" ", font, size);
                    } else {
                        lines.push(std::mem::take(&mut line));
                    }
                }
                for (text, font) in &segments {
                    line.push(text, *font, size);
                }
            }
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
