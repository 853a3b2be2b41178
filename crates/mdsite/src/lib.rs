//! # mdsite
//!
//! Build a static HTML site from a tree of Markdown files.
//!
//! The output directory is rebuilt from scratch on every run: the static
//! directory is copied into it, then every `.md` file under the content
//! directory is compiled with [`mdsite_core`], placed into the page template
//! and written as `.html` at the same relative path.

pub mod site;

pub use site::{copy_tree, generate_page, generate_pages};
