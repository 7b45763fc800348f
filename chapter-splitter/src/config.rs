//! Splitter configuration: title catalog, boilerplate and filename classification sets.

use crate::catalog::TitleCatalog;
use crate::error::Result;
use crate::naming::NamingRules;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_FRONT_PREFIX: &str = "00";
const DEFAULT_BACK_PREFIX: &str = "99";
const DEFAULT_EXTENSION: &str = "txt";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Known section titles in manuscript order
    #[serde(default)]
    pub titles: Vec<String>,

    /// Headings whose sections are discarded (contents pages, rights notices)
    #[serde(default = "default_boilerplate")]
    pub boilerplate: Vec<String>,

    /// Titles that sort before numbered chapters
    #[serde(default = "default_front_matter")]
    pub front_matter: Vec<String>,

    /// Titles that sort after numbered chapters
    #[serde(default = "default_back_matter")]
    pub back_matter: Vec<String>,

    #[serde(default = "default_front_prefix")]
    pub front_prefix: String,

    #[serde(default = "default_back_prefix")]
    pub back_prefix: String,

    /// Output file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_boilerplate() -> Vec<String> {
    vec!["CONTENTS".to_string(), "ALL RIGHTS ARE RESERVED".to_string()]
}

fn default_front_matter() -> Vec<String> {
    vec![
        "PROLOGUE".to_string(),
        "DEDICATION".to_string(),
        "COPYRIGHT".to_string(),
    ]
}

fn default_back_matter() -> Vec<String> {
    vec!["EPILOGUE".to_string(), "ABOUT THE AUTHOR".to_string()]
}

fn default_front_prefix() -> String {
    DEFAULT_FRONT_PREFIX.to_string()
}

fn default_back_prefix() -> String {
    DEFAULT_BACK_PREFIX.to_string()
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            titles: Vec::new(),
            boilerplate: default_boilerplate(),
            front_matter: default_front_matter(),
            back_matter: default_back_matter(),
            front_prefix: default_front_prefix(),
            back_prefix: default_back_prefix(),
            extension: default_extension(),
        }
    }
}

impl SplitterConfig {
    /// Load a standalone splitter config (a TOML file holding the fields above).
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SplitterConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Build the title catalog from `titles`.
    pub fn catalog(&self) -> Result<TitleCatalog> {
        TitleCatalog::new(&self.titles)
    }

    /// Filename classification rules derived from this config.
    pub fn naming_rules(&self) -> NamingRules {
        NamingRules::new(
            &self.front_matter,
            &self.back_matter,
            &self.front_prefix,
            &self.back_prefix,
            &self.extension,
        )
    }
}
