use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Input text is empty; nothing to split")]
    EmptyInput,

    #[error("No titles configured. Add a `titles` list to the [splitter] config section.")]
    NoTitlesConfigured,

    #[error("Duplicate catalog title: \"{title}\" (titles are compared trimmed and case-insensitively)")]
    DuplicateTitle { title: String },

    #[error("None of the {titles} catalog titles were found in {input_len} bytes of text")]
    NoMatchesFound { titles: usize, input_len: usize },

    #[error("Failed to build title pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to write section \"{title}\": {source}")]
    Persistence {
        title: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SplitError>;
