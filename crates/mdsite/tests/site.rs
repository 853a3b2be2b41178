use std::fs;
use std::path::Path;

use mdsite::{copy_tree, generate_page, generate_pages};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const TEMPLATE: &str = "<title>{{ Title }}</title><main>{{ Content }}</main>";

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn copy_tree_replaces_destination() {
    let root = tempdir().unwrap();
    let src = root.path().join("static");
    let dst = root.path().join("public");

    write(&src.join("index.css"), "body {}");
    write(&src.join("images/tolkien.png"), "png");
    write(&dst.join("stale.html"), "old");

    copy_tree(&src, &dst).unwrap();

    assert_eq!(fs::read_to_string(dst.join("index.css")).unwrap(), "body {}");
    assert_eq!(fs::read_to_string(dst.join("images/tolkien.png")).unwrap(), "png");
    assert!(!dst.join("stale.html").exists());
}

#[test]
fn copy_tree_rejects_missing_source() {
    let root = tempdir().unwrap();
    let err = copy_tree(&root.path().join("nope"), &root.path().join("public")).unwrap_err();
    assert!(err.to_string().contains("source does not exist"));
}

#[test]
fn copy_tree_rejects_file_destination() {
    let root = tempdir().unwrap();
    let src = root.path().join("static");
    let dst = root.path().join("public");
    fs::create_dir_all(&src).unwrap();
    write(&dst, "a file");

    let err = copy_tree(&src, &dst).unwrap_err();
    assert!(err.to_string().contains("destination is not a directory"));
}

#[test]
fn generate_single_page() {
    let root = tempdir().unwrap();
    let from = root.path().join("index.md");
    let template = root.path().join("template.html");
    let dest = root.path().join("out/index.html");
    write(&from, "# Hello\n\nWorld");
    write(&template, TEMPLATE);

    generate_page(&from, &template, &dest).unwrap();

    assert_eq!(
        fs::read_to_string(dest).unwrap(),
        "<title>Hello</title><main><div><h1>Hello</h1><p>World</p></div></main>"
    );
}

#[test]
fn generate_pages_mirrors_content_tree() {
    let root = tempdir().unwrap();
    let content = root.path().join("content");
    let template = root.path().join("template.html");
    let public = root.path().join("public");
    write(&content.join("index.md"), "# Home");
    write(&content.join("blog/tom/index.md"), "# Tom\n\n- a\n- b");
    write(&content.join("blog/notes.txt"), "ignored");
    write(&template, TEMPLATE);

    let pages = generate_pages(&content, &template, &public).unwrap();

    assert_eq!(pages, 2);
    assert_eq!(
        fs::read_to_string(public.join("index.html")).unwrap(),
        "<title>Home</title><main><div><h1>Home</h1></div></main>"
    );
    assert_eq!(
        fs::read_to_string(public.join("blog/tom/index.html")).unwrap(),
        "<title>Tom</title><main><div><h1>Tom</h1><ul><li>a</li><li>b</li></ul></div></main>"
    );
    assert!(!public.join("blog/notes.txt").exists());
}

#[test]
fn generate_pages_reports_failing_file() {
    let root = tempdir().unwrap();
    let content = root.path().join("content");
    let template = root.path().join("template.html");
    write(&content.join("broken.md"), "# Broken\n\nnot _closed");
    write(&template, TEMPLATE);

    let err = generate_pages(&content, &template, &root.path().join("public")).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("broken.md"), "{message}");
    assert!(message.contains("unbalanced \"_\""), "{message}");
}
