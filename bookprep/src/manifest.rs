//! Manifest generation from extracted chapter files.

use crate::config::ManifestConfig;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// A chapter file loaded from disk.
#[derive(Debug, Clone)]
struct ChapterFile {
    file: String,
    prefix: String,
    title: String,
    content: String,
}

impl ChapterFile {
    /// Split a `{prefix}_{STEM}.ext` filename into prefix and a readable title.
    fn from_file(file: String, content: String) -> Self {
        let stem = Path::new(&file)
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_string();

        let (prefix, title) = match stem.split_once('_') {
            Some((prefix, rest)) => (prefix.to_string(), rest.replace('_', " ")),
            None => (String::new(), stem.replace('_', " ")),
        };

        Self {
            file,
            prefix,
            title,
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChapterEntry<'a> {
    file: &'a str,
    prefix: &'a str,
    title: &'a str,
    chars: usize,
    words: usize,
}

#[derive(Debug, Serialize)]
struct ChapterManifest<'a> {
    generated_at: DateTime<Utc>,
    chapters: Vec<ChapterEntry<'a>>,
}

/// Occurrence summary for one tracked term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermEntry {
    pub term: String,
    pub count: usize,
    /// First chapter the term appears in, e.g. "Chapter 03"
    pub source: Option<String>,
}

/// Files written by a manifest run.
#[derive(Debug)]
pub struct ManifestSummary {
    pub chapters: usize,
    pub files: Vec<PathBuf>,
}

/// Build `chapters.json`, `names.json` and `places.json` in `output_dir`.
///
/// Returns `None` when `chapters_dir` holds no chapter files.
pub fn generate_manifests(
    chapters_dir: &Path,
    output_dir: &Path,
    config: &ManifestConfig,
    extension: &str,
) -> Result<Option<ManifestSummary>> {
    let chapters = load_chapters(chapters_dir, extension)?;
    if chapters.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let manifest = ChapterManifest {
        generated_at: Utc::now(),
        chapters: chapters
            .iter()
            .map(|c| ChapterEntry {
                file: &c.file,
                prefix: &c.prefix,
                title: &c.title,
                chars: c.content.chars().count(),
                words: c.content.split_whitespace().count(),
            })
            .collect(),
    };

    let chapters_path = output_dir.join("chapters.json");
    write_json(&chapters_path, &manifest)?;

    let names_path = output_dir.join("names.json");
    let names = count_terms(&config.names, &chapters)?;
    write_json(&names_path, &serde_json::json!({ "names": names }))?;

    let places_path = output_dir.join("places.json");
    let places = count_terms(&config.places, &chapters)?;
    write_json(&places_path, &serde_json::json!({ "places": places }))?;

    Ok(Some(ManifestSummary {
        chapters: chapters.len(),
        files: vec![chapters_path, names_path, places_path],
    }))
}

/// Read `*.{extension}` files in `dir` (non-recursive), sorted by filename.
fn load_chapters(dir: &Path, extension: &str) -> Result<Vec<ChapterFile>> {
    let extension = extension.trim_start_matches('.');
    let mut paths = Vec::new();

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(OsStr::to_str)
            .map(|ext| ext.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if path.is_file() && matches_ext {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file = path
                .file_name()
                .and_then(OsStr::to_str)
                .unwrap_or_default()
                .to_string();
            Ok(ChapterFile::from_file(file, content))
        })
        .collect()
}

/// Count case-insensitive whole-word occurrences of each term.
fn count_terms(terms: &[String], chapters: &[ChapterFile]) -> Result<Vec<TermEntry>> {
    let mut entries = Vec::with_capacity(terms.len());

    for term in terms {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }

        let pattern = RegexBuilder::new(&term_pattern(term))
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid term: {}", term))?;

        let mut count = 0;
        let mut source = None;
        for chapter in chapters {
            let found = pattern.find_iter(&chapter.content).count();
            if found > 0 && source.is_none() {
                source = Some(format!("Chapter {}", chapter.prefix));
            }
            count += found;
        }

        log::debug!("Term \"{}\": {} occurrence(s)", term, count);
        entries.push(TermEntry {
            term: term.to_string(),
            count,
            source,
        });
    }

    Ok(entries)
}

/// Whole-word pattern for `term`.
///
/// A `\b` guard only goes on an edge where the term has a word character;
/// `\b` next to `.` or `)` would require a word character beyond it.
fn term_pattern(term: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let start = if term.starts_with(is_word) { r"\b" } else { "" };
    let end = if term.ends_with(is_word) { r"\b" } else { "" };
    format!("{}{}{}", start, regex::escape(term), end)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Generated manifest: {}", path.display());
    Ok(())
}
