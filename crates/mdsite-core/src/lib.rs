//! mdsite-core - Markdown to HTML compilation
//!
//! This crate turns a document written in a small, fixed markdown dialect into
//! an HTML tree and renders it. It performs no I/O; the `mdsite` binary reads
//! files, fills a page template and writes the result.
//!
//! # Architecture
//!
//! ```text
//! Markdown ──segment──▶ blocks ──classify──▶ typed blocks ──block_to_node──▶ HtmlNode ──render──▶ HTML
//!                                                               │
//!                                                          parse_inline
//! ```
//!
//! Inline emphasis does not nest, and the dialect deliberately departs from
//! CommonMark: blocks are separated by blank lines only, and each block has
//! exactly one type.
//!
//! # Example
//!
//! ```rust
//! use mdsite_core::compile;
//!
//! let html = compile("# Title\n\nSome **bold** text.")
//!     .and_then(|root| root.render())
//!     .unwrap();
//! assert_eq!(html, "<div><h1>Title</h1><p>Some <b>bold</b> text.</p></div>");
//! ```

mod ast;
mod block;
mod compile;
mod inline;
mod page;

pub use ast::{attributes_string, Attributes, HtmlNode};
pub use block::{classify, segment, BlockType};
pub use compile::{block_to_node, compile, extract_title};
pub use inline::{
    extract_images, extract_links, parse_inline, split_delimiter, split_images, split_links,
    SpanKind, TextSpan,
};
pub use page::{render_page, CONTENT_PLACEHOLDER, TITLE_PLACEHOLDER};

/// Error type for mdsite operations
#[derive(Debug, thiserror::Error)]
pub enum MdsiteError {
    #[error("unbalanced \"{delimiter}\": {context}")]
    UnbalancedDelimiter { delimiter: String, context: String },

    #[error("inline parser was handed an empty span")]
    EmptyText,

    #[error("parent node has no tag")]
    MissingTag,

    #[error("text node has no value")]
    EmptyValue,

    #[error("no level-1 heading found")]
    TitleNotFound,

    #[error("template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),
}

pub type Result<T> = std::result::Result<T, MdsiteError>;

/// Compile and render a markdown document in one step
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    compile(markdown)?.render()
}
