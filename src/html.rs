use crate::block::Span;
use crate::error::{Error, Result};
use crate::node::{Attributes, Node};

/// Render a node and its descendants to HTML.
///
/// Attribute values are written as-is, without escaping.
pub fn render(node: &Node) -> Result<String> {
    let mut out = String::new();
    render_into(node, &mut out)?;
    Ok(out)
}

fn render_into(node: &Node, out: &mut String) -> Result<()> {
    match node {
        Node::Leaf {
            tag: None, value, ..
        } => {
            out.push_str(value);
        }
        Node::Leaf {
            tag: Some(tag),
            value,
            attributes,
        } => {
            if tag.is_empty() {
                return Err(Error::MalformedNode {
                    reason: "leaf has an empty tag",
                });
            }
            open_tag(tag, attributes, out);
            out.push_str(value);
            close_tag(tag, out);
        }
        Node::Container {
            tag,
            children,
            attributes,
        } => {
            if tag.is_empty() {
                return Err(Error::MalformedNode {
                    reason: "container has no tag",
                });
            }
            if children.is_empty() {
                return Err(Error::MalformedNode {
                    reason: "container has no children",
                });
            }
            open_tag(tag, attributes, out);
            for child in children {
                render_into(child, out)?;
            }
            close_tag(tag, out);
        }
    }
    Ok(())
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes.iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Convert an inline span into its HTML leaf.
pub fn span_to_node(span: Span) -> Node {
    match span {
        Span::Text(text) => Node::text(text),
        Span::Bold(text) => Node::leaf("b", text),
        Span::Italic(text) => Node::leaf("i", text),
        Span::Code(text) => Node::leaf("code", text),
        Span::Link { text, url } => Node::leaf("a", text).with_attribute("href", url),
        Span::Image { alt, url } => Node::leaf("img", "")
            .with_attribute("src", url)
            .with_attribute("alt", alt),
    }
}
