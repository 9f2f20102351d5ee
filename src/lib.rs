mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod parser;
pub mod site;

pub use block::{BlockKind, Span};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use html::{render, span_to_node};
pub use inline::{
    extract_images, extract_links, split_delimited, split_images, split_links, tokenize_inline,
};
pub use node::{Attributes, Node};
pub use parser::{blockify, build_document, classify, extract_title, parse_blocks};

/// Convert a Markdown document into an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    render(&build_document(markdown)?)
}
