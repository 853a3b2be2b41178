//! File system glue: static file copying and page generation.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, info};

use mdsite_core::render_page;

/// Replace `dst` with a recursive copy of `src`.
///
/// An existing `dst` must be a directory and is deleted first.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if dst.exists() {
        if !dst.is_dir() {
            bail!("destination is not a directory: {}", dst.display());
        }
        info!("Deleting {}", dst.display());
        fs::remove_dir_all(dst).with_context(|| format!("failed to delete {}", dst.display()))?;
    }

    if !src.exists() {
        bail!("source does not exist: {}", src.display());
    }
    if !src.is_dir() {
        bail!("source is not a directory: {}", src.display());
    }

    info!("Copying {} -> {}", src.display(), dst.display());
    copy_dir(src, dst)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).with_context(|| format!("failed to create {}", dst.display()))?;

    for entry in fs::read_dir(src).with_context(|| format!("failed to read {}", src.display()))? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            debug!("Copying {}", from.display());
            fs::copy(&from, &to)
                .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
        }
    }

    Ok(())
}

/// Render one markdown file into an HTML page at `dest`
pub fn generate_page(from: &Path, template_path: &Path, dest: &Path) -> Result<()> {
    let template = read(template_path)?;
    write_page(from, &template, dest)
}

/// Render every `.md` file under `content_dir` into `dest_dir`, keeping the
/// relative layout. Returns the number of pages written.
pub fn generate_pages(content_dir: &Path, template_path: &Path, dest_dir: &Path) -> Result<usize> {
    let template = read(template_path)?;
    generate_dir(content_dir, &template, dest_dir)
}

fn generate_dir(dir: &Path, template: &str, dest_dir: &Path) -> Result<usize> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut pages = 0;
    for entry in entries {
        let path = entry.path();
        let target = dest_dir.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            pages += generate_dir(&path, template, &target)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            write_page(&path, template, &target.with_extension("html"))?;
            pages += 1;
        }
    }

    Ok(pages)
}

fn write_page(from: &Path, template: &str, dest: &Path) -> Result<()> {
    info!("Generating page {} -> {}", from.display(), dest.display());

    let markdown = read(from)?;
    let html = render_page(&markdown, template)
        .with_context(|| format!("failed to render {}", from.display()))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(dest, html).with_context(|| format!("failed to write {}", dest.display()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
