//! Output filenames for extracted sections.

use crate::splitter::Section;
use std::collections::HashSet;
use std::fmt;

/// Stem used when a title has no alphanumeric characters at all.
const FALLBACK_STEM: &str = "SECTION";

/// Normalize a title into a filename stem.
///
/// Drops everything except alphanumerics, underscores and whitespace, joins
/// words with underscores and uppercases the result.
pub fn normalize_stem(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_uppercase()
}

/// A derived `{prefix}_{STEM}.{ext}` filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputName {
    pub prefix: String,
    pub stem: String,
    pub extension: String,
}

impl OutputName {
    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}.{}", self.prefix, self.stem, self.extension)
    }
}

/// Classification rules for sort prefixes.
#[derive(Debug, Clone)]
pub struct NamingRules {
    front_matter: HashSet<String>,
    back_matter: HashSet<String>,
    front_prefix: String,
    back_prefix: String,
    extension: String,
}

impl NamingRules {
    pub fn new<S: AsRef<str>>(
        front_matter: &[S],
        back_matter: &[S],
        front_prefix: &str,
        back_prefix: &str,
        extension: &str,
    ) -> Self {
        let stems = |titles: &[S]| -> HashSet<String> {
            titles
                .iter()
                .map(|t| normalize_stem(t.as_ref()))
                .filter(|s| !s.is_empty())
                .collect()
        };

        Self {
            front_matter: stems(front_matter),
            back_matter: stems(back_matter),
            front_prefix: front_prefix.to_string(),
            back_prefix: back_prefix.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Derive the output name for a section.
    ///
    /// Front- and back-matter get their fixed prefixes; everything else is
    /// numbered by its position among all title matches (before boilerplate
    /// and empty sections were dropped), so the prefix reflects document order.
    pub fn output_name(&self, section: &Section) -> OutputName {
        let mut stem = normalize_stem(&section.title);
        if stem.is_empty() {
            stem = FALLBACK_STEM.to_string();
        }

        let prefix = if self.front_matter.contains(&stem) {
            self.front_prefix.clone()
        } else if self.back_matter.contains(&stem) {
            self.back_prefix.clone()
        } else {
            format!("{:02}", section.order_index)
        };

        OutputName {
            prefix,
            stem,
            extension: self.extension.clone(),
        }
    }
}

/// A section paired with the filename it will be written under.
#[derive(Debug, Clone)]
pub struct PlannedOutput<'a> {
    pub section: &'a Section,
    pub name: OutputName,
}

impl PlannedOutput<'_> {
    pub fn file_name(&self) -> String {
        self.name.file_name()
    }
}

/// Name every section, suffixing `_2`, `_3`, ... when a filename repeats.
pub fn plan_outputs<'a>(sections: &'a [Section], rules: &NamingRules) -> Vec<PlannedOutput<'a>> {
    let mut used = HashSet::new();
    let mut planned = Vec::with_capacity(sections.len());

    for section in sections {
        let base = rules.output_name(section);
        let mut name = base.clone();

        for n in 2u32.. {
            if used.insert(name.file_name()) {
                break;
            }
            name.stem = format!("{}_{}", base.stem, n);
        }

        if name != base {
            log::warn!(
                "Filename {} already used; writing \"{}\" as {}",
                base,
                section.title,
                name
            );
        }

        planned.push(PlannedOutput { section, name });
    }

    planned
}
