//! Title catalog: the ordered set of headings the splitter treats as section boundaries.

use crate::error::{Result, SplitError};
use std::collections::HashSet;

/// Normalize a title for identity comparison (trimmed, lowercased).
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Ordered list of known section titles, unique after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCatalog {
    titles: Vec<String>,
}

impl TitleCatalog {
    /// Build a catalog, rejecting empty lists and duplicate titles.
    ///
    /// Entries are trimmed; blank entries are ignored.
    pub fn new<I, S>(titles: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for title in titles {
            let title = title.as_ref().trim();
            if title.is_empty() {
                continue;
            }
            if !seen.insert(normalize_title(title)) {
                return Err(SplitError::DuplicateTitle {
                    title: title.to_string(),
                });
            }
            entries.push(title.to_string());
        }

        if entries.is_empty() {
            return Err(SplitError::NoTitlesConfigured);
        }

        Ok(Self { titles: entries })
    }

    /// Number of titles in the catalog.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Iterate titles in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }

    /// Whether `title` is in the catalog (trimmed, case-insensitive).
    pub fn contains(&self, title: &str) -> bool {
        let needle = normalize_title(title);
        self.titles.iter().any(|t| normalize_title(t) == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  PROLOGUE \t"), "prologue");
        assert_eq!(normalize_title("The Beginning"), "the beginning");
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = TitleCatalog::new(["Prologue", "The Beginning", "Epilogue"]).unwrap();
        let titles: Vec<&str> = catalog.iter().collect();
        assert_eq!(titles, vec!["Prologue", "The Beginning", "Epilogue"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = TitleCatalog::new(["Prologue", " PROLOGUE "]);
        match result {
            Err(SplitError::DuplicateTitle { title }) => assert_eq!(title, "PROLOGUE"),
            other => panic!("expected DuplicateTitle, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_rejects_empty() {
        let empty: Vec<String> = Vec::new();
        assert!(matches!(
            TitleCatalog::new(empty),
            Err(SplitError::NoTitlesConfigured)
        ));
        assert!(matches!(
            TitleCatalog::new(["", "   "]),
            Err(SplitError::NoTitlesConfigured)
        ));
    }

    #[test]
    fn test_catalog_contains_is_case_insensitive() {
        let catalog = TitleCatalog::new(["About the Author"]).unwrap();
        assert!(catalog.contains("ABOUT THE AUTHOR"));
        assert!(catalog.contains("  about the author"));
        assert!(!catalog.contains("About"));
    }
}
