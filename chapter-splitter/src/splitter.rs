//! Catalog-driven section splitting.
//!
//! A title only counts as a section boundary when it is the entire content of
//! a line (surrounding spaces and tabs allowed). A title mentioned inside prose
//! never matches.

use crate::catalog::{TitleCatalog, normalize_title};
use crate::config::SplitterConfig;
use crate::error::{Result, SplitError};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Runs of one or more blank (whitespace-only) lines.
static BLANK_LINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[^\S\n]*\n)+").expect("blank line pattern should compile"));

/// One extracted `(title, body)` unit of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Title as written in the document (not the catalog's casing)
    pub title: String,
    /// Trimmed body with blank-line runs collapsed
    pub body: String,
    /// Position among all title matches, counted before filtering
    pub order_index: usize,
}

/// Why a matched section was not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Boilerplate,
    EmptyBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedSection {
    pub title: String,
    pub order_index: usize,
    pub reason: DropReason,
}

/// Result of one split pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Surviving sections in document order
    pub sections: Vec<Section>,
    /// Sections discarded as boilerplate or empty
    pub dropped: Vec<DroppedSection>,
    /// Total title matches, including dropped ones
    pub match_count: usize,
    /// Text before the first match (never a section)
    pub preamble: String,
    title_count: usize,
    input_len: usize,
}

impl SplitReport {
    /// Fail with `NoMatchesFound` when no title matched at all.
    ///
    /// Zero matches is not an error for `split` itself; callers that want to
    /// report it use this.
    pub fn ensure_matched(&self) -> Result<()> {
        if self.match_count == 0 {
            return Err(SplitError::NoMatchesFound {
                titles: self.title_count,
                input_len: self.input_len,
            });
        }
        Ok(())
    }
}

/// Compiled splitter for one catalog and boilerplate set.
#[derive(Debug, Clone)]
pub struct Splitter {
    pattern: Regex,
    boilerplate: HashSet<String>,
    title_count: usize,
}

impl Splitter {
    /// Compile a splitter.
    ///
    /// Only catalog titles are boundaries. A boilerplate entry drops a matched
    /// section whose title equals it; a line that is only boilerplate inside a
    /// chapter stays part of that chapter's body.
    pub fn new<S: AsRef<str>>(catalog: &TitleCatalog, boilerplate: &[S]) -> Result<Self> {
        let alternatives: Vec<String> = catalog.iter().map(regex::escape).collect();
        let boilerplate: HashSet<String> = boilerplate
            .iter()
            .map(|entry| normalize_title(entry.as_ref()))
            .filter(|entry| !entry.is_empty())
            .collect();

        let pattern = format!(r"(?m)^[^\S\n]*({})[^\S\n]*$", alternatives.join("|"));
        let pattern = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            pattern,
            boilerplate,
            title_count: catalog.len(),
        })
    }

    /// Compile a splitter from the `[splitter]` configuration.
    pub fn from_config(config: &SplitterConfig) -> Result<Self> {
        let catalog = config.catalog()?;
        Self::new(&catalog, &config.boilerplate)
    }

    /// Split `raw_text` into sections.
    pub fn split(&self, raw_text: &str) -> Result<SplitReport> {
        if raw_text.trim().is_empty() {
            return Err(SplitError::EmptyInput);
        }

        let matches: Vec<regex::Captures<'_>> = self.pattern.captures_iter(raw_text).collect();

        let preamble = match matches.first() {
            Some(first) => &raw_text[..first.get(0).map_or(0, |m| m.start())],
            None => raw_text,
        };

        let mut sections = Vec::new();
        let mut dropped = Vec::new();

        for (order_index, caps) in matches.iter().enumerate() {
            let (Some(whole), Some(title)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let body_end = matches
                .get(order_index + 1)
                .and_then(|next| next.get(0))
                .map_or(raw_text.len(), |m| m.start());

            let title = title.as_str().trim().to_string();
            let body = clean_body(&raw_text[whole.end()..body_end]);

            let reason = if self.boilerplate.contains(&normalize_title(&title)) {
                Some(DropReason::Boilerplate)
            } else if body.is_empty() {
                Some(DropReason::EmptyBody)
            } else {
                None
            };

            match reason {
                Some(reason) => {
                    log::debug!("Dropping \"{}\" (#{}): {:?}", title, order_index, reason);
                    dropped.push(DroppedSection {
                        title,
                        order_index,
                        reason,
                    });
                }
                None => {
                    log::debug!(
                        "Section \"{}\" (#{}): {} chars",
                        title,
                        order_index,
                        body.len()
                    );
                    sections.push(Section {
                        title,
                        body,
                        order_index,
                    });
                }
            }
        }

        Ok(SplitReport {
            sections,
            dropped,
            match_count: matches.len(),
            preamble: preamble.to_string(),
            title_count: self.title_count,
            input_len: raw_text.len(),
        })
    }
}

/// Split `raw_text` on the given titles with no boilerplate set.
pub fn split<S: AsRef<str>>(raw_text: &str, titles: &[S]) -> Result<Vec<Section>> {
    if raw_text.trim().is_empty() {
        return Err(SplitError::EmptyInput);
    }
    let catalog = TitleCatalog::new(titles)?;
    let no_boilerplate: [&str; 0] = [];
    let report = Splitter::new(&catalog, &no_boilerplate)?.split(raw_text)?;
    Ok(report.sections)
}

/// Trim a section body and collapse blank-line runs to a single blank line.
fn clean_body(text: &str) -> String {
    BLANK_LINE_RUN
        .replace_all(text.trim(), "\n\n")
        .trim()
        .to_string()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const TITLES: &[&str] = &["Prologue", "The Beginning", "Epilogue"];

    fn line() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Prologue".to_string()),
            Just("  THE BEGINNING  ".to_string()),
            Just("Epilogue".to_string()),
            Just(String::new()),
            "[a-z ,.]{1,30}",
        ]
    }

    fn document() -> impl Strategy<Value = String> {
        prop::collection::vec(line(), 0..40)
            .prop_map(|lines| format!("Preamble\n{}", lines.join("\n")))
    }

    proptest! {
        #[test]
        fn split_is_idempotent(text in document()) {
            let first = split(&text, TITLES).unwrap();
            let second = split(&text, TITLES).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn order_index_strictly_increases(text in document()) {
            let sections = split(&text, TITLES).unwrap();
            for pair in sections.windows(2) {
                prop_assert!(pair[0].order_index < pair[1].order_index);
            }
        }

        #[test]
        fn titles_inside_prose_never_match(
            lines in prop::collection::vec(("[a-z]{1,8}", 0..3usize, "[a-z]{1,8}"), 1..20)
        ) {
            let text = lines
                .iter()
                .map(|(before, i, after)| format!("{} {} {}", before, TITLES[*i], after))
                .collect::<Vec<_>>()
                .join("\n");
            let catalog = TitleCatalog::new(TITLES).unwrap();
            let no_boilerplate: [&str; 0] = [];
            let report = Splitter::new(&catalog, &no_boilerplate).unwrap().split(&text).unwrap();
            prop_assert_eq!(report.match_count, 0);
        }
    }
}
