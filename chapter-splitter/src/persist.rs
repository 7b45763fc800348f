//! Writing planned sections to disk.

use crate::error::{Result, SplitError};
use crate::naming::PlannedOutput;
use std::fs;
use std::path::{Path, PathBuf};

/// A section file that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub title: String,
    pub chars: usize,
}

/// Write each planned section body to `dir`, creating it if needed.
///
/// Stops at the first failed write and reports the section's title.
pub fn write_sections(dir: &Path, planned: &[PlannedOutput<'_>]) -> Result<Vec<WrittenFile>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(planned.len());
    for output in planned {
        let path = dir.join(output.file_name());
        let body = &output.section.body;

        fs::write(&path, body).map_err(|source| SplitError::Persistence {
            title: output.section.title.clone(),
            source,
        })?;

        let chars = body.chars().count();
        log::info!("Saved: {} ({} chars)", output.file_name(), chars);

        written.push(WrittenFile {
            path,
            title: output.section.title.clone(),
            chars,
        });
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{NamingRules, plan_outputs};
    use crate::splitter::Section;

    fn sections() -> Vec<Section> {
        vec![
            Section {
                title: "PROLOGUE".to_string(),
                body: "Hello world.".to_string(),
                order_index: 0,
            },
            Section {
                title: "The Beginning".to_string(),
                body: "Caf\u{e9} at dawn.".to_string(),
                order_index: 2,
            },
        ]
    }

    fn rules() -> NamingRules {
        NamingRules::new(&["Prologue"], &["Epilogue"], "00", "99", "txt")
    }

    #[test]
    fn test_write_sections_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("extracted_chapters");
        let sections = sections();
        let planned = plan_outputs(&sections, &rules());

        let written = write_sections(&out, &planned).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(out.join("00_PROLOGUE.txt")).unwrap(),
            "Hello world."
        );
        assert_eq!(
            fs::read_to_string(out.join("02_THE_BEGINNING.txt")).unwrap(),
            "Caf\u{e9} at dawn."
        );
        assert_eq!(written[1].chars, 13);
        assert_eq!(written[1].title, "The Beginning");
    }

    #[test]
    fn test_write_failure_names_the_section() {
        let dir = tempfile::tempdir().unwrap();
        let sections = sections();
        let planned = plan_outputs(&sections, &rules());

        // A directory in the way of the first file makes the write fail.
        fs::create_dir_all(dir.path().join("00_PROLOGUE.txt")).unwrap();

        match write_sections(dir.path(), &planned) {
            Err(SplitError::Persistence { title, .. }) => assert_eq!(title, "PROLOGUE"),
            other => panic!("expected Persistence error, got {:?}", other),
        }
    }
}
