//! Project layout report: expected folders with file counts, sizes and samples.

use crate::config::FolderSpec;
use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Files shown at each end of a long listing.
const SAMPLE_EDGE: usize = 5;

/// Total size in bytes of all files below `path`; unreadable entries are skipped.
pub fn directory_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|metadata| metadata.len())
        .sum()
}

/// Format a byte count as a human-readable size.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

/// Sorted names of the regular files directly inside `dir`.
fn list_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files
}

/// Lines listing a folder's files, eliding the middle of long listings.
fn sample_lines(files: &[String], indent: &str) -> Vec<String> {
    let line = |name: &str| format!("│   {}├── {}", indent, name);

    if files.len() <= SAMPLE_EDGE * 2 {
        return files.iter().map(|f| line(f)).collect();
    }

    let hidden = files.len() - SAMPLE_EDGE * 2;
    let mut lines: Vec<String> = files[..SAMPLE_EDGE].iter().map(|f| line(f)).collect();
    lines.push(line(&format!("... ({} more files)", hidden)));
    lines.extend(files[files.len() - SAMPLE_EDGE..].iter().map(|f| line(f)));
    lines
}

/// Render the layout report for `root`.
pub fn render_report(root: &Path, folders: &[FolderSpec], html: bool) -> Result<String> {
    if !root.is_dir() {
        anyhow::bail!("Project directory not found: {}", root.display());
    }

    let mut lines = vec![format!("{}/", root.display())];
    let mut present = 0;

    for folder in folders {
        let parts: Vec<&str> = folder.path.split('/').filter(|p| !p.is_empty()).collect();
        let Some(name) = parts.last() else {
            log::warn!("Skipping report folder with empty path");
            continue;
        };
        let depth = parts.len();
        let prefix = format!("{}├── ", "│   ".repeat(depth - 1));
        let full_path = parts.iter().fold(root.to_path_buf(), |p, part| p.join(part));

        let files = if full_path.is_dir() {
            present += 1;
            Some(list_files(&full_path))
        } else {
            None
        };

        let info = match &files {
            None => "(not created)".to_string(),
            Some(files) if files.is_empty() => "(empty)".to_string(),
            Some(files) => format!(
                "({} files, {})",
                files.len(),
                format_size(directory_size(&full_path))
            ),
        };

        lines.push(format!(
            "{}{:<30} # {} {}",
            prefix,
            format!("{}/", name),
            folder.description,
            info
        ));

        if let Some(files) = files.filter(|f| folder.sample && !f.is_empty()) {
            lines.extend(sample_lines(&files, &" ".repeat(depth * 4)));
        }
    }

    lines.push(String::new());
    lines.push(format!("Total Size: {}", format_size(directory_size(root))));
    lines.push(format!("Folders present: {}/{}", present, folders.len()));

    if html {
        let mut wrapped = vec![
            "<div class='folder-structure'>".to_string(),
            "<pre class='structure-tree'>".to_string(),
        ];
        wrapped.extend(lines.iter().map(|l| escape_html(l)));
        wrapped.push("</pre>".to_string());
        wrapped.push("</div>".to_string());
        lines = wrapped;
    }

    Ok(lines.join("\n"))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
