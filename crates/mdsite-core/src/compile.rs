//! Compile markdown blocks into the HTML tree

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::HtmlNode;
use crate::block::{classify, segment, BlockType};
use crate::inline::parse_inline;
use crate::{MdsiteError, Result};

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A# \w").expect("valid regex for document titles"));

/// Compile a whole markdown document into a `div` rooted tree
pub fn compile(markdown: &str) -> Result<HtmlNode> {
    let children = segment(markdown)
        .into_iter()
        .map(|block| block_to_node(block, classify(block)))
        .collect::<Result<Vec<_>>>()?;

    Ok(HtmlNode::parent("div", children))
}

/// Extract the text of the first level-1 heading line
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find(|line| TITLE_RE.is_match(line))
        .map(|line| line[1..].trim().to_string())
        .ok_or(MdsiteError::TitleNotFound)
}

/// Convert a single block into a node.
///
/// `block_type` must be what [`classify`] returns for `block`; a mismatched
/// pair (say a paragraph compiled as a heading) yields a meaningless tree.
pub fn block_to_node(block: &str, block_type: BlockType) -> Result<HtmlNode> {
    debug_assert_eq!(classify(block), block_type, "block type does not match block");
    match block_type {
        BlockType::Paragraph => Ok(HtmlNode::parent("p", inline_children(block)?)),
        BlockType::Heading => heading_node(block),
        BlockType::Code => Ok(code_node(block)),
        BlockType::Quote => quote_node(block),
        BlockType::UnorderedList => list_node("ul", block, |line| {
            line.strip_prefix("- ").unwrap_or(line).trim_end()
        }),
        BlockType::OrderedList => list_node("ol", block, |line| {
            line.split_once(' ').map_or("", |(_, rest)| rest)
        }),
    }
}

/// Parse inline markup into rendering leaves; empty text has no children
fn inline_children(text: &str) -> Result<Vec<HtmlNode>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    Ok(parse_inline(text)?.into_iter().map(HtmlNode::from).collect())
}

fn heading_node(block: &str) -> Result<HtmlNode> {
    let block = block.trim_start();
    let level = block.chars().take_while(|&c| c == '#').count();
    let rest = &block[level..];
    let content = rest.strip_prefix(' ').unwrap_or(rest).trim();

    Ok(HtmlNode::parent(
        &format!("h{level}"),
        inline_children(content)?,
    ))
}

fn code_node(block: &str) -> HtmlNode {
    let code = block.strip_prefix("```").unwrap_or(block);
    let code = code.strip_suffix("```").unwrap_or(code);

    HtmlNode::parent("pre", vec![HtmlNode::leaf("code", code.trim_start())])
}

fn quote_node(block: &str) -> Result<HtmlNode> {
    let text = block
        .split('\n')
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(HtmlNode::parent("blockquote", inline_children(&text)?))
}

fn list_node(tag: &str, block: &str, item_text: impl Fn(&str) -> &str) -> Result<HtmlNode> {
    let items = block
        .split('\n')
        .map(|line| inline_children(item_text(line)).map(|children| HtmlNode::parent("li", children)))
        .collect::<Result<Vec<_>>>()?;

    Ok(HtmlNode::parent(tag, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn to_html(markdown: &str) -> String {
        compile(markdown).unwrap().render().unwrap()
    }

    #[test]
    fn test_paragraphs() {
        let md = "
This is **bolded** paragraph
text in a p
tag here

This is another paragraph with _italic_ text and `code` here

";
        assert_eq!(
            to_html(md),
            "<div><p>This is <b>bolded</b> paragraph\ntext in a p\ntag here</p><p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
        );
    }

    #[test]
    fn test_code_block() {
        let md = "
```
This is text that _should_ remain
the **same** even with inline stuff
```
";
        assert_eq!(
            to_html(md),
            "<div><pre><code>This is text that _should_ remain\nthe **same** even with inline stuff\n</code></pre></div>"
        );
    }

    #[test]
    fn test_single_line_code_block() {
        assert_eq!(to_html("``` Hello ```"), "<div><pre><code>Hello </code></pre></div>");
    }

    #[test]
    fn test_quote_block() {
        let md = "> This is block quoted\n> **text**\n";
        assert_eq!(
            to_html(md),
            "<div><blockquote>This is block quoted\n<b>text</b></blockquote></div>"
        );
    }

    #[test]
    fn test_quote_strips_one_space() {
        assert_eq!(
            to_html(">tight\n>  indented"),
            "<div><blockquote>tight\n indented</blockquote></div>"
        );
    }

    #[rstest]
    #[case("# H1", "<div><h1>H1</h1></div>")]
    #[case("## H2", "<div><h2>H2</h2></div>")]
    #[case("### H3", "<div><h3>H3</h3></div>")]
    #[case("#### H4", "<div><h4>H4</h4></div>")]
    #[case("##### H5", "<div><h5>H5</h5></div>")]
    #[case("###### H6", "<div><h6>H6</h6></div>")]
    #[case("## A `code` title  ", "<div><h2>A <code>code</code> title</h2></div>")]
    fn test_headings(#[case] md: &str, #[case] expected: &str) {
        assert_eq!(to_html(md), expected);
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            to_html("- One\n- **Two**  \n- Three"),
            "<div><ul><li>One</li><li><b>Two</b></li><li>Three</li></ul></div>"
        );
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(
            to_html("1. One\n2. Two\n3. [Three](/three)"),
            "<div><ol><li>One</li><li>Two</li><li><a href=\"/three\">Three</a></li></ol></div>"
        );
    }

    #[test]
    fn test_empty_list_item() {
        assert_eq!(
            to_html("- a\n- \n- b"),
            "<div><ul><li>a</li><li></li><li>b</li></ul></div>"
        );
    }

    #[test]
    fn test_image_paragraph() {
        assert_eq!(
            to_html("![logo](/img/logo.png)"),
            "<div><p><img src=\"/img/logo.png\" alt=\"logo\"></p></div>"
        );
    }

    #[test]
    fn test_unbalanced_fails_whole_document() {
        let err = compile("# Fine\n\nnot _fine").unwrap_err();
        assert!(matches!(
            err,
            MdsiteError::UnbalancedDelimiter { ref delimiter, .. } if delimiter == "_"
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "block type does not match block")]
    fn test_mismatched_block_type() {
        let _ = block_to_node("just a paragraph", BlockType::Heading);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_html(""), "<div></div>");
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Hello").unwrap(), "Hello");
        assert_eq!(extract_title("intro\n\n#  \n# Hi there  \n").unwrap(), "Hi there");
        assert_eq!(extract_title("# Hi\n\n# Bye").unwrap(), "Hi");
    }

    #[test]
    fn test_extract_title_missing() {
        for md in ["", "## Only h2", "#NoSpace", "text # not at start"] {
            assert!(matches!(extract_title(md), Err(MdsiteError::TitleNotFound)));
        }
    }
}
