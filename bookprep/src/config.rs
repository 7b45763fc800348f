//! bookprep configuration management.

use anyhow::{Context, Result};
use chapter_splitter::SplitterConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Expected project folders: (relative path, description, list sample files).
const DEFAULT_FOLDERS: &[(&str, &str, bool)] = &[
    ("source", "Original book files", false),
    ("assets/images/author_photo", "Author photo", false),
    ("assets/images/book_cover", "Book cover", false),
    ("assets/images/similar_books", "3 similar book covers", false),
    ("assets/audio/pronunciation", "Pronunciation audio files", false),
    ("assets/audio/voice_samples", "Voice actor samples", false),
    ("assets/audio/pronunciation_samples/names", "Name pronunciation samples", false),
    ("assets/audio/pronunciation_samples/places", "Place pronunciation samples", false),
    ("assets/audio/pronunciation_samples/units", "Unit conversion samples", false),
    ("assets/audio/pronunciation_samples/currency", "Currency conversion samples", false),
    ("assets/audio/pronunciation_samples/abbreviations", "Abbreviation samples", false),
    ("assets/audio/pronunciation_samples/cultural_terms", "Cultural term samples", false),
    ("chapters/raw", "Extracted chapters", true),
    ("chapters/processed", "Processed chapters", false),
    ("chapters/approved", "Final approved chapters", true),
    ("chapters/quality_check", "QC reports", false),
    ("chapters/backups/raw", "Raw backups", false),
    ("chapters/backups/processed", "Processed backups", false),
    ("chapters/backups/approved", "Approved backups", false),
    ("manifests", "All manifest files", true),
    ("logs/processing", "Processing logs", false),
    ("logs/quality_checks", "Quality check logs", false),
    ("logs/backups", "Backup logs", false),
    ("production/credits", "Opening/closing credits", false),
    ("production/notes", "Production notes", false),
    ("production/pronunciation", "Pronunciation guides", false),
    ("production/narration_ready", "Narration-ready chapters", true),
    ("guides/pronunciation", "Pronunciation guides for AI", false),
    ("guides/conversion", "Conversion guides for AI", false),
    ("guides/cultural", "Cultural guides for AI", false),
    ("reference/acx_compliance", "ACX compliance docs", false),
    ("reference/cultural_analysis", "Cultural analysis", false),
    ("reference/similar_books", "Similar books research", false),
    ("output", "Generated HTML files", true),
    ("voice_samples", "Voice actor samples", false),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookprepConfig {
    /// Title catalog and output naming
    #[serde(default)]
    pub splitter: SplitterConfig,

    /// Terms tracked in the names/places manifests
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Folders shown by `bookprep report`
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Character and people names
    #[serde(default)]
    pub names: Vec<String>,

    /// Place names
    #[serde(default)]
    pub places: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_folders")]
    pub folders: Vec<FolderSpec>,
}

/// One expected folder in the project layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderSpec {
    /// Path relative to the project root, `/`-separated
    pub path: String,

    #[serde(default)]
    pub description: String,

    /// List sample filenames under this folder
    #[serde(default)]
    pub sample: bool,
}

impl FolderSpec {
    pub fn new(path: &str, description: &str, sample: bool) -> Self {
        Self {
            path: path.to_string(),
            description: description.to_string(),
            sample,
        }
    }
}

fn default_folders() -> Vec<FolderSpec> {
    DEFAULT_FOLDERS
        .iter()
        .map(|(path, description, sample)| FolderSpec::new(path, description, *sample))
        .collect()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            folders: default_folders(),
        }
    }
}

impl BookprepConfig {
    /// Get the default config file path: <config dir>/cli-programs/bookprep.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cli-programs")
            .join("bookprep.toml")
    }

    /// Load config from `path`, or from the default location.
    ///
    /// A missing default file yields the default config; an explicitly given
    /// path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::config_path();
                if !default_path.exists() {
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}
