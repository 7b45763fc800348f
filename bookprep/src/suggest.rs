//! Best-effort title suggestions for building a catalog.
//!
//! Lists short, title-cased or all-caps lines from extracted text. The output
//! is meant for a human to review; it never feeds the splitter directly.

use chapter_splitter::{TitleCatalog, normalize_title};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

/// 6 to 50 word characters or spaces.
static TITLE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w ]{6,50}$").expect("title shape pattern should compile"));

/// Words that may stay lowercase inside a title.
const CONNECTORS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "in", "of", "on", "or", "the", "to", "with",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub title: String,
    /// Already present in the configured catalog
    pub known: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// Candidate titles, sorted and de-duplicated
    pub candidates: Vec<Suggestion>,
    /// Catalog titles that never appear as a line of their own
    pub missing: Vec<String>,
}

/// Scan `text` for title-like lines.
pub fn suggest_titles(text: &str, catalog: Option<&TitleCatalog>) -> Suggestions {
    let titles: BTreeSet<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| looks_like_title(line))
        .collect();

    let candidates = titles
        .into_iter()
        .map(|title| Suggestion {
            title: title.to_string(),
            known: catalog.is_some_and(|c| c.contains(title)),
        })
        .collect();

    let missing = match catalog {
        Some(catalog) => {
            let lines: HashSet<String> = text.lines().map(normalize_title).collect();
            catalog
                .iter()
                .filter(|title| !lines.contains(&normalize_title(title)))
                .map(str::to_string)
                .collect()
        }
        None => Vec::new(),
    };

    Suggestions {
        candidates,
        missing,
    }
}

/// Heuristic: short line, no punctuation, not a page number, and either
/// all caps or title case.
fn looks_like_title(line: &str) -> bool {
    if !TITLE_SHAPE.is_match(line) {
        return false;
    }
    if line.chars().all(|c| c.is_ascii_digit() || c == ' ') {
        return false;
    }
    is_all_caps(line) || is_title_case(line)
}

fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn is_title_case(line: &str) -> bool {
    let mut words = line.split_whitespace();

    let starts_upper = |word: &str| {
        word.chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit())
    };

    match words.next() {
        Some(first) if starts_upper(first) => {}
        _ => return false,
    }

    words.all(|word| starts_upper(word) || CONNECTORS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
                         VITALY
            Copyright (c) 2023 All rights reserved.

                       Once Upon a Time
It was a cold morning in the city, and nobody expected snow.
                 12
                     My First Misadventure
the quick brown fox
   ABOUT THE AUTHOR
";

    #[test]
    fn test_detects_title_lines() {
        let suggestions = suggest_titles(SAMPLE, None);
        let titles: Vec<&str> = suggestions
            .candidates
            .iter()
            .map(|s| s.title.as_str())
            .collect();

        assert_eq!(
            titles,
            vec!["ABOUT THE AUTHOR", "My First Misadventure", "Once Upon a Time", "VITALY"]
        );
        assert!(suggestions.missing.is_empty());
    }

    #[test]
    fn test_flags_known_and_missing_titles() {
        let catalog = TitleCatalog::new(["Once Upon a Time", "Epilogue"]).unwrap();
        let suggestions = suggest_titles(SAMPLE, Some(&catalog));

        let once = suggestions
            .candidates
            .iter()
            .find(|s| s.title == "Once Upon a Time")
            .unwrap();
        assert!(once.known);

        let vitaly = suggestions
            .candidates
            .iter()
            .find(|s| s.title == "VITALY")
            .unwrap();
        assert!(!vitaly.known);

        assert_eq!(suggestions.missing, vec!["Epilogue".to_string()]);
    }

    #[test]
    fn test_looks_like_title() {
        assert!(looks_like_title("The Power of Words"));
        assert!(looks_like_title("CHRISTMAS TRADITIONS"));
        assert!(looks_like_title("Chapter 12"));
        assert!(!looks_like_title("Girls"));
        assert!(!looks_like_title("123456"));
        assert!(!looks_like_title("the power of words"));
        assert!(!looks_like_title("Bra Dag, Sweden!"));
        assert!(!looks_like_title(
            "This Line Is Far Too Long To Be Any Kind Of Reasonable Chapter Title"
        ));
    }
}
