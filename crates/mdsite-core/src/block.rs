//! Block segmentation and classification

use once_cell::sync::Lazy;
use regex::Regex;

/// The kind of a markdown block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A#{1,6} \w").expect("valid regex for headings"));

// Fences may not contain backticks of their own.
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A```[^`]*```\z").expect("valid regex for code fences"));

/// Split a document into trimmed, non-empty blocks on blank-line boundaries
pub fn segment(document: &str) -> Vec<&str> {
    document
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Classify a block. The first matching rule wins, paragraphs are the fallback.
pub fn classify(block: &str) -> BlockType {
    if HEADING_RE.is_match(block) {
        BlockType::Heading
    } else if CODE_RE.is_match(block) {
        BlockType::Code
    } else if all_lines(block, |line| line.starts_with('>')) {
        BlockType::Quote
    } else if all_lines(block, |line| line.starts_with("- ")) {
        BlockType::UnorderedList
    } else if is_ordered_list(block) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}

fn all_lines(block: &str, predicate: impl Fn(&str) -> bool) -> bool {
    block.split('\n').all(predicate)
}

/// Line `i` must start with `"{i}. "`, counting from one without gaps
fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}. ", i + 1)))
}
