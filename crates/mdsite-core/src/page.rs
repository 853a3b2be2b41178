//! Page templating

use crate::compile::{compile, extract_title};
use crate::{MdsiteError, Result};

/// Replaced with the document title
pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";

/// Replaced with the rendered document body
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Render a markdown document into a full HTML page.
///
/// Every occurrence of both placeholders in `template` is substituted.
pub fn render_page(markdown: &str, template: &str) -> Result<String> {
    for placeholder in [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER] {
        if !template.contains(placeholder) {
            return Err(MdsiteError::MissingPlaceholder(placeholder));
        }
    }

    let title = extract_title(markdown)?;
    let content = compile(markdown)?.render()?;

    Ok(template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content))
}
