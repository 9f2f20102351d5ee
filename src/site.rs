use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::config::Config;
use crate::error::Error as ConvertError;
use crate::{build_document, extract_title, render};

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("source directory does not exist or is not a directory: {0}")]
    MissingSource(PathBuf),

    #[error("source and destination directories overlap: {src} -> {dst}")]
    Overlap { src: PathBuf, dst: PathBuf },

    #[error("failed to convert {path}: {source}")]
    Convert {
        path: PathBuf,
        source: ConvertError,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Receives progress events from a site build.
pub trait Reporter {
    fn cleaned(&self, _dir: &Path) {}
    fn copied(&self, _from: &Path, _to: &Path) {}
    fn generated(&self, _from: &Path, _to: &Path) {}
}

/// Forwards progress to the `log` facade.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn cleaned(&self, dir: &Path) {
        log::info!("Cleaned destination: {}", dir.display());
    }

    fn copied(&self, from: &Path, to: &Path) {
        log::info!("Copied: {} -> {}", from.display(), to.display());
    }

    fn generated(&self, from: &Path, to: &Path) {
        log::info!("Generated: {} -> {}", from.display(), to.display());
    }
}

/// Replace the contents of `dst` with a recursive copy of `src`.
pub fn copy_static(src: &Path, dst: &Path, reporter: &dyn Reporter) -> Result<(), SiteError> {
    if !src.is_dir() {
        return Err(SiteError::MissingSource(src.to_path_buf()));
    }
    fs::create_dir_all(dst).map_err(io_error(dst))?;

    let src_real = src.canonicalize().map_err(io_error(src))?;
    let dst_real = dst.canonicalize().map_err(io_error(dst))?;
    if dst_real.starts_with(&src_real) || src_real.starts_with(&dst_real) {
        return Err(SiteError::Overlap {
            src: src_real,
            dst: dst_real,
        });
    }

    clear_dir(dst)?;
    reporter.cleaned(dst);
    copy_tree(src, dst, reporter)
}

fn clear_dir(dir: &Path) -> Result<(), SiteError> {
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_dir() {
            fs::remove_dir_all(&path).map_err(io_error(&path))?;
        } else {
            fs::remove_file(&path).map_err(io_error(&path))?;
        }
    }
    Ok(())
}

fn copy_tree(src: &Path, dst: &Path, reporter: &dyn Reporter) -> Result<(), SiteError> {
    for entry in fs::read_dir(src).map_err(io_error(src))? {
        let path = entry.map_err(io_error(src))?.path();
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = dst.join(name);

        if path.is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
            copy_tree(&path, &target, reporter)?;
        } else {
            fs::copy(&path, &target).map_err(io_error(&target))?;
            reporter.copied(&path, &target);
        }
    }
    Ok(())
}

/// Convert one Markdown document into a full page using `template`.
pub fn generate_page(
    markdown: &str,
    template: &str,
    basepath: &str,
) -> Result<String, ConvertError> {
    let content = render(&build_document(markdown)?)?;
    let title = extract_title(markdown)?;

    let page = template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content);

    Ok(page
        .replace("href=\"/", &format!("href=\"{basepath}"))
        .replace("src=\"/", &format!("src=\"{basepath}")))
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory layout under `dest_dir` with `.html` extensions.
///
/// Stops at the first failure; the failing page is not written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    basepath: &str,
    reporter: &dyn Reporter,
) -> Result<usize, SiteError> {
    let template = fs::read_to_string(template_path).map_err(io_error(template_path))?;

    let mut sources = Vec::new();
    scan_markdown_files(content_dir, &mut sources)?;
    sources.sort();

    for source in &sources {
        let relative = source.strip_prefix(content_dir).unwrap_or(source);
        let target = dest_dir.join(relative).with_extension("html");

        let markdown = fs::read_to_string(source).map_err(io_error(source))?;
        let page = generate_page(&markdown, &template, basepath).map_err(|e| {
            SiteError::Convert {
                path: source.clone(),
                source: e,
            }
        })?;

        write_atomic(&target, &page)?;
        reporter.generated(source, &target);
    }

    Ok(sources.len())
}

// Stage the page next to its target and rename it into place, so a failed
// write never leaves a truncated page behind.
fn write_atomic(target: &Path, contents: &str) -> Result<(), SiteError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_error(dir))?;

    let mut staged = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    staged
        .write_all(contents.as_bytes())
        .map_err(io_error(target))?;
    staged.persist(target).map_err(|e| SiteError::Io {
        path: target.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

fn scan_markdown_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    for entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = entry.map_err(io_error(dir))?.path();
        if path.is_dir() {
            scan_markdown_files(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    Ok(())
}

// Cleaning the output directory must never reach the sources it is built from.
fn check_inputs_outside_output(config: &Config) -> Result<(), SiteError> {
    let Ok(output) = config.output_dir.canonicalize() else {
        // Nothing to clean yet.
        return Ok(());
    };

    for input in [&config.content_dir, &config.template] {
        let input = input.canonicalize().map_err(io_error(input))?;
        if input.starts_with(&output) {
            return Err(SiteError::Overlap {
                src: input,
                dst: output,
            });
        }
    }
    Ok(())
}

/// Copy static assets, then generate every page. Returns the page count.
///
/// Refuses to start when the content directory or template lives inside the
/// output directory.
pub fn build_site(config: &Config, reporter: &dyn Reporter) -> Result<usize, SiteError> {
    check_inputs_outside_output(config)?;
    copy_static(&config.static_dir, &config.output_dir, reporter)?;
    generate_pages_recursive(
        &config.content_dir,
        &config.template,
        &config.output_dir,
        &config.basepath,
        reporter,
    )
}
