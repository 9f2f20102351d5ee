use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::block::Span;
use crate::error::{Error, Result};

static IMAGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid image pattern"));

// The regex crate has no lookbehind, so a match preceded by `!` is filtered
// out by `link_matches` instead.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("valid link pattern"));

/// Tokenize a run of inline Markdown into spans.
///
/// Passes run in a fixed order: bold (`**`), italic (`_`), code (`` ` ``),
/// images, then links. Empty plain spans left behind by the passes are dropped.
pub fn tokenize_inline(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::Text(text.to_string())];
    let spans = split_delimited(spans, "**", Span::Bold)?;
    let spans = split_delimited(spans, "_", Span::Italic)?;
    let spans = split_delimited(spans, "`", Span::Code)?;
    let spans = split_images(spans);
    let spans = split_links(spans);

    Ok(spans
        .into_iter()
        .filter(|span| !matches!(span, Span::Text(t) if t.is_empty()))
        .collect())
}

/// Partition every plain span on `delimiter`.
///
/// Fields alternate plain / `wrap`, starting and ending with plain, so an
/// even number of fields means a delimiter was left unmatched. Other span
/// kinds pass through untouched.
pub fn split_delimited(
    spans: Vec<Span>,
    delimiter: &str,
    wrap: fn(String) -> Span,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Text(text) = span else {
            out.push(span);
            continue;
        };

        let fields: Vec<&str> = text.split(delimiter).collect();
        if fields.len() % 2 == 0 {
            return Err(Error::UnmatchedDelimiter {
                delimiter: delimiter.to_string(),
            });
        }

        for (i, field) in fields.into_iter().enumerate() {
            let field = field.to_string();
            out.push(if i % 2 == 0 {
                Span::Text(field)
            } else {
                wrap(field)
            });
        }
    }

    Ok(out)
}

/// All `![alt](url)` occurrences, as `(alt, url)` pairs.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    IMAGE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}

/// All `[text](url)` occurrences that are not part of an image.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    link_matches(text)
        .filter_map(|caps| Some((caps.get(1)?.as_str(), caps.get(2)?.as_str())))
        .collect()
}

fn link_matches(text: &str) -> impl Iterator<Item = regex::Captures<'_>> {
    LINK_PATTERN.captures_iter(text).filter(move |caps| {
        caps.get(0)
            .is_some_and(|m| !text[..m.start()].ends_with('!'))
    })
}

fn first_image(text: &str) -> Option<(Range<usize>, Span)> {
    let caps = IMAGE_PATTERN.captures(text)?;
    Some((
        caps.get(0)?.range(),
        Span::Image {
            alt: caps.get(1)?.as_str().to_string(),
            url: caps.get(2)?.as_str().to_string(),
        },
    ))
}

fn first_link(text: &str) -> Option<(Range<usize>, Span)> {
    let caps = link_matches(text).next()?;
    Some((
        caps.get(0)?.range(),
        Span::Link {
            text: caps.get(1)?.as_str().to_string(),
            url: caps.get(2)?.as_str().to_string(),
        },
    ))
}

/// Pull every image out of plain spans, left to right.
pub fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, first_image)
}

/// Pull every link out of plain spans, left to right.
pub fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, first_link)
}

// Cuts each plain span at its first match into prefix / match / remainder
// and keeps going on the remainder. An empty remainder is dropped.
fn split_matches(
    spans: Vec<Span>,
    find_first: fn(&str) -> Option<(Range<usize>, Span)>,
) -> Vec<Span> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Text(mut rest) = span else {
            out.push(span);
            continue;
        };

        let mut matched = false;
        while let Some((range, found)) = find_first(&rest) {
            out.push(Span::Text(rest[..range.start].to_string()));
            out.push(found);
            rest = rest[range.end..].to_string();
            matched = true;
        }
        if !matched || !rest.is_empty() {
            out.push(Span::Text(rest));
        }
    }

    out
}
