use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Horizontal placement of a text label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Parse the `text-anchor` keywords; anything else means `Start`.
    pub fn parse(s: &str) -> Self {
        match s {
            "middle" => TextAnchor::Middle,
            "end" => TextAnchor::End,
            _ => TextAnchor::Start,
        }
    }

    /// Columns to shift left so that text of `width` sits on the anchor.
    pub fn offset(self, width: usize) -> usize {
        match self {
            TextAnchor::Start => 0,
            TextAnchor::Middle => width / 2,
            TextAnchor::End => width,
        }
    }
}

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}
