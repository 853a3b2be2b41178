//! Inline span parsing
//!
//! Raw text is turned into a flat sequence of [`TextSpan`]s by a fixed
//! pipeline of passes. Every pass consumes the previous pass's output and
//! only ever splits `Plain` spans, so emphasis never nests.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::HtmlNode;
use crate::{MdsiteError, Result};

/// The markup kind carried by a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A fragment of inline text with a single markup kind.
///
/// `url` is only set for links and images.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub text: String,
    pub kind: SpanKind,
    pub url: Option<String>,
}

impl TextSpan {
    /// Create a span of the given kind without a url
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        Self {
            text: text.into(),
            kind,
            url: None,
        }
    }

    /// Create an unmarked text span
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanKind::Plain)
    }

    /// Create a link span pointing at `url`
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: SpanKind::Link,
            url: Some(url.into()),
        }
    }

    /// Create an image span with alt text and source url
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: alt.into(),
            kind: SpanKind::Image,
            url: Some(url.into()),
        }
    }

    /// Check if this span carries no markup
    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

impl From<TextSpan> for HtmlNode {
    fn from(span: TextSpan) -> Self {
        let url = span.url.unwrap_or_default();
        match span.kind {
            SpanKind::Plain => HtmlNode::text(span.text),
            SpanKind::Bold => HtmlNode::leaf("b", span.text),
            SpanKind::Italic => HtmlNode::leaf("i", span.text),
            SpanKind::Code => HtmlNode::leaf("code", span.text),
            SpanKind::Link => HtmlNode::leaf_with_attrs("a", span.text, vec![("href", url.as_str())]),
            SpanKind::Image => HtmlNode::leaf_with_attrs(
                "img",
                "",
                vec![("src", url.as_str()), ("alt", span.text.as_str())],
            ),
        }
    }
}

/// Delimiter passes, applied in this order
const DELIMITERS: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\[\]\n]*?)\]\(([^()\n]*?)\)").expect("valid regex for inline images")
});

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\]\n]*?)\]\(([^()\n]*?)\)").expect("valid regex for inline links")
});

/// Parse inline markup into an ordered sequence of spans.
///
/// Fails with [`MdsiteError::UnbalancedDelimiter`] when a delimiter has no
/// closing partner, and with [`MdsiteError::EmptyText`] for empty input.
pub fn parse_inline(text: &str) -> Result<Vec<TextSpan>> {
    let spans = DELIMITERS
        .iter()
        .try_fold(vec![TextSpan::plain(text)], |spans, &(delimiter, kind)| {
            split_delimiter(spans, delimiter, kind)
        })?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}

/// Split every plain span on a paired delimiter
pub fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }
        if span.text.is_empty() {
            return Err(MdsiteError::EmptyText);
        }

        let mut rest = span.text.as_str();
        while let Some((before, after)) = rest.split_once(delimiter) {
            if !before.is_empty() {
                out.push(TextSpan::plain(before));
            }
            let Some((inner, tail)) = after.split_once(delimiter) else {
                return Err(MdsiteError::UnbalancedDelimiter {
                    delimiter: delimiter.to_string(),
                    context: span.text.clone(),
                });
            };
            out.push(TextSpan::new(inner, kind));
            rest = tail;
        }
        if !rest.is_empty() {
            out.push(TextSpan::plain(rest));
        }
    }

    Ok(out)
}

/// Extract `![alt](url)` images from plain spans
pub fn split_images(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, &IMAGE_RE, SpanKind::Image, false)
}

/// Extract `[text](url)` links from plain spans, skipping any preceded by `!`
pub fn split_links(spans: Vec<TextSpan>) -> Vec<TextSpan> {
    split_matches(spans, &LINK_RE, SpanKind::Link, true)
}

/// List every `(alt, url)` image reference in a piece of text
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    extract_targets(text, &IMAGE_RE, false)
}

/// List every `(text, url)` link reference in a piece of text
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    extract_targets(text, &LINK_RE, true)
}

fn split_matches(
    spans: Vec<TextSpan>,
    pattern: &Regex,
    kind: SpanKind,
    reject_after_bang: bool,
) -> Vec<TextSpan> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let text = span.text.as_str();
        let mut consumed = 0;
        for (start, end, label, url) in find_targets(text, pattern, reject_after_bang) {
            if start > consumed {
                out.push(TextSpan::plain(&text[consumed..start]));
            }
            out.push(TextSpan {
                text: label.to_string(),
                kind,
                url: Some(url.to_string()),
            });
            consumed = end;
        }
        if consumed < text.len() {
            out.push(TextSpan::plain(&text[consumed..]));
        }
    }

    out
}

fn extract_targets(text: &str, pattern: &Regex, reject_after_bang: bool) -> Vec<(String, String)> {
    find_targets(text, pattern, reject_after_bang)
        .into_iter()
        .map(|(_, _, label, url)| (label.to_string(), url.to_string()))
        .collect()
}

/// Left-to-right, non-overlapping matches as `(start, end, label, url)`.
///
/// With `reject_after_bang`, a match directly preceded by `!` is skipped and
/// scanning resumes one byte after its opening bracket.
fn find_targets<'t>(
    text: &'t str,
    pattern: &Regex,
    reject_after_bang: bool,
) -> Vec<(usize, usize, &'t str, &'t str)> {
    let mut found = Vec::new();
    let mut search = 0;

    while let Some(caps) = pattern.captures_at(text, search) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            break;
        };
        if reject_after_bang && text[..whole.start()].ends_with('!') {
            search = whole.start() + 1;
            continue;
        }
        found.push((whole.start(), whole.end(), label.as_str(), url.as_str()));
        search = whole.end();
    }

    found
}
