//! bookprep - Prepare a manuscript for audiobook production

mod config;
mod extract;
mod manifest;
mod report;
mod suggest;

use anyhow::{Context, Result};
use chapter_splitter::{
    DropReason, SplitError, Splitter, SplitterConfig, plan_outputs, write_sections,
};
use clap::{Parser, Subcommand};
use config::BookprepConfig;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bookprep")]
#[command(about = "Split manuscripts into chapters, build manifests and report project layout", long_about = None)]
#[command(version)]
struct Args {
    /// Config file (default: <config dir>/cli-programs/bookprep.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a manuscript (PDF or text) into one file per chapter
    Split {
        /// Manuscript file; PDFs are converted with pdftotext
        input: PathBuf,

        /// Directory for extracted chapter files
        #[arg(short, long, default_value = "extracted_chapters")]
        output: PathBuf,

        /// Standalone splitter config (titles, boilerplate, ...) overriding [splitter]
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Also save the extracted raw text here
        #[arg(long)]
        save_raw: Option<PathBuf>,

        /// Show what would be written without writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// List title-like lines to help build a catalog (best-effort, review by hand)
    Suggest {
        /// Manuscript file; PDFs are converted with pdftotext
        input: PathBuf,

        /// Standalone splitter config to compare suggestions against
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Generate chapter, names and places manifests from extracted chapters
    Manifest {
        /// Directory of extracted chapter files
        chapters_dir: PathBuf,

        /// Directory for manifest JSON files
        #[arg(short, long, default_value = "manifests")]
        output: PathBuf,
    },
    /// Show the project folder layout with sizes and sample files
    Report {
        /// Project root directory
        root: PathBuf,

        /// Wrap the report in HTML <pre> markup
        #[arg(long)]
        html: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match &args.command {
        Commands::Config { action } => handle_config_command(action, args.config.as_deref()),
        Commands::Split {
            input,
            output,
            catalog,
            save_raw,
            dry_run,
        } => {
            let splitter_config =
                resolve_splitter_config(args.config.as_deref(), catalog.as_deref())?;
            handle_split(input, output, &splitter_config, save_raw.as_deref(), *dry_run)
        }
        Commands::Suggest { input, catalog } => {
            let splitter_config =
                resolve_splitter_config(args.config.as_deref(), catalog.as_deref())?;
            handle_suggest(input, &splitter_config)
        }
        Commands::Manifest {
            chapters_dir,
            output,
        } => {
            let config = BookprepConfig::load(args.config.as_deref())?;
            handle_manifest(chapters_dir, output, &config)
        }
        Commands::Report { root, html } => {
            let config = BookprepConfig::load(args.config.as_deref())?;
            let report = report::render_report(root, &config.report.folders, *html)?;
            println!("{}", report);
            Ok(())
        }
    }
}

/// Log to stderr; `--debug` lowers the default level, `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Use a standalone catalog file when given, otherwise the [splitter] section.
///
/// The config file is only read when no catalog is given.
fn resolve_splitter_config(
    config_path: Option<&Path>,
    catalog: Option<&Path>,
) -> Result<SplitterConfig> {
    match catalog {
        Some(path) => SplitterConfig::load_from(path)
            .with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Ok(BookprepConfig::load(config_path)?.splitter),
    }
}

fn handle_split(
    input: &Path,
    output: &Path,
    splitter_config: &SplitterConfig,
    save_raw: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let splitter = Splitter::from_config(splitter_config).map_err(|e| match e {
        SplitError::NoTitlesConfigured => anyhow::anyhow!(
            "{}\nUse --catalog <file> or run 'bookprep config init' and edit the titles list.",
            e
        ),
        other => anyhow::Error::new(other).context("Failed to build splitter"),
    })?;

    let raw_text = extract::load_text(input)?;

    if let Some(raw_path) = save_raw {
        std::fs::write(raw_path, &raw_text)
            .with_context(|| format!("Failed to write {}", raw_path.display()))?;
        log::info!("Raw text saved to {}", raw_path.display());
    }

    let report = splitter.split(&raw_text)?;

    if let Err(e) = report.ensure_matched() {
        log::warn!("{}", e);
        println!("No sections were extracted. Check the input text and title catalog.");
        return Ok(());
    }

    for dropped in &report.dropped {
        let reason = match dropped.reason {
            DropReason::Boilerplate => "boilerplate",
            DropReason::EmptyBody => "empty body",
        };
        log::debug!("Skipped \"{}\" ({})", dropped.title, reason);
    }

    log::info!(
        "Matched {} title(s): {} section(s) kept, {} dropped",
        report.match_count,
        report.sections.len(),
        report.dropped.len()
    );

    let planned = plan_outputs(&report.sections, &splitter_config.naming_rules());

    if dry_run {
        for output in &planned {
            println!(
                "{} ({} chars) <- \"{}\"",
                output.file_name(),
                output.section.body.chars().count(),
                output.section.title
            );
        }
        return Ok(());
    }

    let written = write_sections(output, &planned)?;
    println!(
        "Saved {} section(s) to {}",
        written.len(),
        output.display()
    );

    Ok(())
}

fn handle_suggest(input: &Path, splitter_config: &SplitterConfig) -> Result<()> {
    let raw_text = extract::load_text(input)?;

    let catalog = if splitter_config.titles.is_empty() {
        None
    } else {
        Some(splitter_config.catalog()?)
    };

    let suggestions = suggest::suggest_titles(&raw_text, catalog.as_ref());

    println!("--- Potential Chapter Titles ---");
    for candidate in &suggestions.candidates {
        if catalog.is_some() {
            let marker = if candidate.known { "catalog" } else { "new" };
            println!("{:<50} [{}]", candidate.title, marker);
        } else {
            println!("{}", candidate.title);
        }
    }

    if !suggestions.missing.is_empty() {
        println!();
        println!("--- Catalog Titles Not Found On Their Own Line ---");
        for title in &suggestions.missing {
            println!("{}", title);
        }
    }

    Ok(())
}

fn handle_manifest(chapters_dir: &Path, output: &Path, config: &BookprepConfig) -> Result<()> {
    match manifest::generate_manifests(
        chapters_dir,
        output,
        &config.manifest,
        &config.splitter.extension,
    )? {
        Some(summary) => {
            println!(
                "Generated {} manifest(s) from {} chapter(s) in {}",
                summary.files.len(),
                summary.chapters,
                output.display()
            );
        }
        None => {
            println!("No chapters found to generate manifests from.");
        }
    }
    Ok(())
}

fn handle_config_command(action: &ConfigAction, path: Option<&Path>) -> Result<()> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(BookprepConfig::config_path);

    match action {
        ConfigAction::Show => {
            let config = BookprepConfig::load(path)?;
            println!("Configuration file: {}", config_path.display());
            println!();
            println!(
                "{}",
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?
            );
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                anyhow::bail!(
                    "{} already exists. Use --force to overwrite.",
                    config_path.display()
                );
            }
            BookprepConfig::default().save_to(&config_path)?;
            println!("Default configuration written to {}", config_path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter_config() -> SplitterConfig {
        SplitterConfig {
            titles: vec![
                "Prologue".to_string(),
                "The Beginning".to_string(),
                "Epilogue".to_string(),
            ],
            ..SplitterConfig::default()
        }
    }

    #[test]
    fn test_handle_split_writes_sections() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("manuscript.txt");
        std::fs::write(
            &input,
            "VITALY\nCONTENTS\nPrologue\nThe Beginning\nEpilogue\n\nPROLOGUE\nHello world.\n\n\n\nAgain.\n   The Beginning\nIt began.\nEPILOGUE\nThe end.\n",
        )
        .unwrap();
        let output = dir.path().join("chapters");
        let raw = dir.path().join("raw_pdf_text.txt");

        handle_split(&input, &output, &splitter_config(), Some(&raw), false).unwrap();

        let mut files: Vec<String> = std::fs::read_dir(&output)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        assert_eq!(
            files,
            vec!["00_PROLOGUE.txt", "04_THE_BEGINNING.txt", "99_EPILOGUE.txt"]
        );
        assert_eq!(
            std::fs::read_to_string(output.join("00_PROLOGUE.txt")).unwrap(),
            "Hello world.\n\nAgain."
        );
        assert!(raw.exists());
    }

    #[test]
    fn test_catalog_overrides_unreadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("bookprep.toml");
        std::fs::write(&broken, "[splitter\ntitles = ").unwrap();
        let catalog = dir.path().join("catalog.toml");
        std::fs::write(&catalog, "titles = [\"Prologue\"]\n").unwrap();

        let config = resolve_splitter_config(Some(&broken), Some(&catalog)).unwrap();
        assert_eq!(config.titles, vec!["Prologue".to_string()]);

        assert!(resolve_splitter_config(Some(&broken), None).is_err());
    }

    #[test]
    fn test_handle_split_dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("manuscript.txt");
        std::fs::write(&input, "Prologue\nHello.\n").unwrap();
        let output = dir.path().join("chapters");

        handle_split(&input, &output, &splitter_config(), None, true).unwrap();
        assert!(!output.exists());
    }

    #[test]
    fn test_handle_split_without_matches_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("manuscript.txt");
        std::fs::write(&input, "Just some prose.\n").unwrap();
        let output = dir.path().join("chapters");

        handle_split(&input, &output, &splitter_config(), None, false).unwrap();
        assert!(!output.exists());
    }

    #[test]
    fn test_handle_split_requires_titles() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("manuscript.txt");
        std::fs::write(&input, "Prologue\nHello.\n").unwrap();

        let err = handle_split(
            &input,
            &dir.path().join("chapters"),
            &SplitterConfig::default(),
            None,
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("No titles configured"));
    }

    #[test]
    fn test_handle_split_empty_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("manuscript.txt");
        std::fs::write(&input, "").unwrap();

        let result = handle_split(
            &input,
            &dir.path().join("chapters"),
            &splitter_config(),
            None,
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "bookprep",
            "split",
            "book.pdf",
            "-o",
            "out",
            "--dry-run",
            "--debug",
        ])
        .unwrap();
        assert!(args.debug);
        match args.command {
            Commands::Split {
                input,
                output,
                dry_run,
                ..
            } => {
                assert_eq!(input, PathBuf::from("book.pdf"));
                assert_eq!(output, PathBuf::from("out"));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
