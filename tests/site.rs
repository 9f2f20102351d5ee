use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use mdsite::Config;
use mdsite::site::{self, Reporter, SiteError};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const TEMPLATE: &str = "<html><head><title>{{ Title }}</title></head><body>{{ Content }}</body></html>";

#[derive(Default)]
struct Recorder {
    copied: RefCell<Vec<PathBuf>>,
    generated: RefCell<Vec<PathBuf>>,
}

impl Reporter for Recorder {
    fn copied(&self, _from: &Path, to: &Path) {
        self.copied.borrow_mut().push(to.to_path_buf());
    }

    fn generated(&self, _from: &Path, to: &Path) {
        self.generated.borrow_mut().push(to.to_path_buf());
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn site_fixture(root: &Path) -> Config {
    write(&root.join("static/index.css"), "body {}");
    write(&root.join("static/images/logo.png"), "png");
    write(&root.join("content/index.md"), "# Home\n\nWelcome to **the** site");
    write(
        &root.join("content/blog/post.md"),
        "# Post\n\n- one\n- two\n\n[home](/)",
    );
    write(&root.join("content/notes.txt"), "not markdown");
    write(&root.join("template.html"), TEMPLATE);

    Config {
        content_dir: root.join("content"),
        static_dir: root.join("static"),
        output_dir: root.join("docs"),
        template: root.join("template.html"),
        basepath: "/".to_string(),
    }
}

#[test]
fn builds_whole_site() {
    let dir = TempDir::new().unwrap();
    let config = site_fixture(dir.path());
    write(&config.output_dir.join("stale.html"), "old");

    let recorder = Recorder::default();
    let pages = site::build_site(&config, &recorder).unwrap();
    assert_eq!(pages, 2);

    let out = &config.output_dir;
    assert!(!out.join("stale.html").exists());
    assert_eq!(fs::read_to_string(out.join("index.css")).unwrap(), "body {}");
    assert_eq!(
        fs::read_to_string(out.join("images/logo.png")).unwrap(),
        "png"
    );
    assert!(!out.join("notes.html").exists());

    assert_eq!(
        fs::read_to_string(out.join("index.html")).unwrap(),
        "<html><head><title>Home</title></head><body><div><h1>Home</h1><p>Welcome to <b>the</b> site</p></div></body></html>"
    );
    assert_eq!(
        fs::read_to_string(out.join("blog/post.html")).unwrap(),
        "<html><head><title>Post</title></head><body><div><h1>Post</h1><ul><li>one</li><li>two</li></ul><p><a href=\"/\">home</a></p></div></body></html>"
    );

    assert_eq!(recorder.copied.borrow().len(), 2);
    assert_eq!(
        *recorder.generated.borrow(),
        vec![out.join("blog/post.html"), out.join("index.html")]
    );
}

#[test]
fn basepath_rewrites_links() {
    let dir = TempDir::new().unwrap();
    let mut config = site_fixture(dir.path());
    config.basepath = "/repo/".to_string();

    site::build_site(&config, &Recorder::default()).unwrap();

    let post = fs::read_to_string(config.output_dir.join("blog/post.html")).unwrap();
    assert!(post.contains("<a href=\"/repo/\">home</a>"));
}

#[test]
fn conversion_failure_names_the_file() {
    let dir = TempDir::new().unwrap();
    let config = site_fixture(dir.path());
    write(&config.content_dir.join("broken.md"), "# Broken\n\nan _unclosed span");

    let err = site::build_site(&config, &Recorder::default()).unwrap_err();
    match &err {
        SiteError::Convert { path, source } => {
            assert!(path.ends_with("broken.md"));
            assert_eq!(
                *source,
                mdsite::Error::UnmatchedDelimiter {
                    delimiter: "_".into()
                }
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!config.output_dir.join("broken.html").exists());
}

#[test]
fn missing_title_aborts() {
    let dir = TempDir::new().unwrap();
    let config = site_fixture(dir.path());
    write(&config.content_dir.join("a.md"), "no heading here");

    let err = site::build_site(&config, &Recorder::default()).unwrap_err();
    assert!(matches!(
        err,
        SiteError::Convert {
            source: mdsite::Error::MissingTitle,
            ..
        }
    ));
}

#[test]
fn missing_static_dir_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = site::copy_static(
        &dir.path().join("nope"),
        &dir.path().join("out"),
        &Recorder::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SiteError::MissingSource(_)));
}

#[test]
fn refuses_to_copy_onto_itself() {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("static");
    write(&assets.join("a.css"), "a");

    let err = site::copy_static(&assets, &assets, &Recorder::default()).unwrap_err();
    assert!(matches!(err, SiteError::Overlap { .. }));
    assert!(assets.join("a.css").exists());
}

#[test]
fn refuses_output_dir_containing_content() {
    let dir = TempDir::new().unwrap();
    let mut config = site_fixture(dir.path());
    let site_dir = dir.path().join("site");
    write(&site_dir.join("content/index.md"), "# Home\n\nKeep me");
    config.output_dir = site_dir.clone();
    config.content_dir = site_dir.join("content");

    let err = site::build_site(&config, &Recorder::default()).unwrap_err();
    assert!(matches!(err, SiteError::Overlap { .. }));
    assert_eq!(
        fs::read_to_string(site_dir.join("content/index.md")).unwrap(),
        "# Home\n\nKeep me"
    );
}

#[test]
fn refuses_output_dir_containing_template() {
    let dir = TempDir::new().unwrap();
    let mut config = site_fixture(dir.path());
    let site_dir = dir.path().join("site");
    write(&site_dir.join("template.html"), TEMPLATE);
    config.output_dir = site_dir.clone();
    config.template = site_dir.join("template.html");

    let err = site::build_site(&config, &Recorder::default()).unwrap_err();
    assert!(matches!(err, SiteError::Overlap { .. }));
    assert!(site_dir.join("template.html").exists());
}

#[test]
fn refuses_destination_inside_source() {
    let dir = TempDir::new().unwrap();
    let assets = dir.path().join("static");
    write(&assets.join("a.css"), "a");

    let err = site::copy_static(&assets, &assets.join("out"), &Recorder::default()).unwrap_err();
    assert!(matches!(err, SiteError::Overlap { .. }));
    assert!(assets.join("a.css").exists());
}

#[test]
fn refuses_source_inside_destination() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("docs");
    let assets = out.join("static");
    write(&assets.join("a.css"), "a");

    let err = site::copy_static(&assets, &out, &Recorder::default()).unwrap_err();
    assert!(matches!(err, SiteError::Overlap { .. }));
    assert!(assets.join("a.css").exists());
}
