//! Inline rich-text markup shared by the formatter and the renderer.
//!
//! The subset is deliberately small: `<b>`/`</b>`, `<br/>`, and character
//! entities. Anything taken from event data goes through [`escape`] before
//! it is embedded.

use std::borrow::Cow;
use std::fmt;

use quick_xml::escape::partial_escape;
use serde::{Deserialize, Serialize};

/// Non-breaking space entity.
pub const NBSP: &str = "&nbsp;";

/// Line break tag.
pub const BR: &str = "<br/>";

/// A string of inline markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Markup(String);

impl Markup {
    /// Wrap an already marked-up string without escaping it.
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Build markup from plain text, escaping reserved characters.
    pub fn text(text: &str) -> Self {
        Self(escape(text).into_owned())
    }

    /// Plain text rendered bold.
    pub fn bold(text: &str) -> Self {
        Self(format!("<b>{}</b>", escape(text)))
    }

    pub fn push_raw(&mut self, markup: &str) {
        self.0.push_str(markup);
    }

    pub fn push_text(&mut self, text: &str) {
        self.0.push_str(&escape(text));
    }

    pub fn push_break(&mut self) {
        self.0.push_str(BR);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Escape `&`, `<` and `>` so plain text survives markup parsing. Quotes
/// are left alone since markup never carries attribute values.
pub fn escape(text: &str) -> Cow<'_, str> {
    partial_escape(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(escape("Fish & Chips <2>"), "Fish &amp; Chips &lt;2&gt;");
    }

    #[test]
    fn builder_methods_compose() {
        let mut markup = Markup::bold("A&B");
        markup.push_break();
        markup.push_text("x < y");
        assert_eq!(markup.as_str(), "<b>A&amp;B</b><br/>x &lt; y");
    }
}
