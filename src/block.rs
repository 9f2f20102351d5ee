/// Inline text spans with formatting.
///
/// Spans never nest: each carries the raw text of one run of inline content.
/// Only `Link` and `Image` carry a target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl Span {
    /// Plain text is the only kind that further splitting passes look into.
    pub fn is_plain(&self) -> bool {
        matches!(self, Span::Text(_))
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Span::Link { url, .. } | Span::Image { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Block-level kinds recognised in Markdown source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}
