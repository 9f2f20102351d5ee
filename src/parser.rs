use std::sync::LazyLock;

use regex::Regex;

use crate::block::BlockKind;
use crate::error::{Error, Result};
use crate::html::span_to_node;
use crate::inline::tokenize_inline;
use crate::node::Node;

static HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6} ").expect("valid heading pattern"));

const FENCE: &str = "```";

/// Split a document into blocks on blank lines.
///
/// Each block is trimmed; empty pieces are dropped.
pub fn blockify(markdown: &str) -> Vec<&str> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block. The first matching rule wins and anything that fails
/// every structural check is a paragraph.
pub fn classify(block: &str) -> BlockKind {
    if HEADING_PATTERN.is_match(block) {
        return BlockKind::Heading;
    }
    if block.starts_with(FENCE) && block.ends_with(FENCE) {
        return BlockKind::Code;
    }

    let mut quote = true;
    let mut unordered = true;
    let mut ordered = true;
    let mut lines = 0;

    for (i, line) in block.lines().enumerate() {
        quote &= line.starts_with('>');
        unordered &= line.starts_with("- ");
        ordered &= strip_ordered_marker(line, i + 1).is_some();
        if !(quote || unordered || ordered) {
            return BlockKind::Paragraph;
        }
        lines += 1;
    }

    if lines == 0 {
        BlockKind::Paragraph
    } else if quote {
        BlockKind::Quote
    } else if unordered {
        BlockKind::UnorderedList
    } else {
        BlockKind::OrderedList
    }
}

/// Blocks of a document paired with their kinds, in source order.
pub fn parse_blocks(markdown: &str) -> Vec<(BlockKind, &str)> {
    blockify(markdown)
        .into_iter()
        .map(|block| (classify(block), block))
        .collect()
}

/// Build the document tree: a `div` whose children are the blocks.
pub fn build_document(markdown: &str) -> Result<Node> {
    let blocks = parse_blocks(markdown);
    if blocks.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let children = blocks
        .into_iter()
        .map(|(kind, block)| block_to_node(kind, block))
        .collect::<Result<Vec<_>>>()?;

    Node::container("div", children)
}

/// The text of the first `# ` heading line, trimmed.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(Error::MissingTitle)
}

fn block_to_node(kind: BlockKind, block: &str) -> Result<Node> {
    match kind {
        BlockKind::Heading => {
            let level = block.chars().take_while(|&c| c == '#').count();
            let text = &block[level + 1..];
            Node::container(format!("h{level}"), inline_children(text)?)
        }
        BlockKind::Code => {
            // Fences that share backticks ("```", "````") leave an empty body.
            let code = block
                .get(FENCE.len()..block.len().saturating_sub(FENCE.len()))
                .unwrap_or("")
                .trim_start();
            Node::container("pre", vec![Node::leaf("code", code)])
        }
        BlockKind::Quote => {
            let text = block
                .lines()
                .map(|line| {
                    line.strip_prefix("> ")
                        .or_else(|| line.strip_prefix('>'))
                        .unwrap_or(line)
                })
                .collect::<Vec<_>>()
                .join("\n");
            Node::container("blockquote", inline_children(&text)?)
        }
        BlockKind::UnorderedList => {
            let items = block
                .lines()
                .map(|line| list_item(line.strip_prefix("- ").unwrap_or(line)))
                .collect::<Result<Vec<_>>>()?;
            Node::container("ul", items)
        }
        BlockKind::OrderedList => {
            let items = block
                .lines()
                .enumerate()
                .map(|(i, line)| list_item(strip_ordered_marker(line, i + 1).unwrap_or(line)))
                .collect::<Result<Vec<_>>>()?;
            Node::container("ol", items)
        }
        BlockKind::Paragraph => {
            let text = block.lines().collect::<Vec<_>>().join(" ");
            Node::container("p", inline_children(&text)?)
        }
    }
}

fn list_item(text: &str) -> Result<Node> {
    Node::container("li", inline_children(text)?)
}

// Text that tokenizes to nothing still needs one child to keep its
// container renderable.
fn inline_children(text: &str) -> Result<Vec<Node>> {
    let children: Vec<Node> = tokenize_inline(text)?
        .into_iter()
        .map(span_to_node)
        .collect();
    if children.is_empty() {
        return Ok(vec![Node::text("")]);
    }
    Ok(children)
}

/// Strip an `{n}. ` marker when `line` carries exactly that index.
fn strip_ordered_marker(line: &str, n: usize) -> Option<&str> {
    line.strip_prefix(n.to_string().as_str())?
        .strip_prefix(". ")
}
