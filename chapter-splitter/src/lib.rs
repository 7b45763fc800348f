//! Catalog-driven chapter splitting for extracted manuscript text.
//!
//! Given the plain text of a manuscript and an ordered list of known section
//! titles, the splitter finds every title that stands alone on a line and
//! cuts the text into `(title, body)` sections:
//! - text before the first title is discarded
//! - boilerplate headings (contents pages, rights notices) are dropped
//! - sections with empty bodies are dropped
//!
//! Surviving sections get a sort-prefixed filename and can be written to disk
//! with [`write_sections`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod naming;
pub mod persist;
pub mod splitter;

pub use catalog::{TitleCatalog, normalize_title};
pub use config::SplitterConfig;
pub use error::{Result, SplitError};
pub use naming::{NamingRules, OutputName, PlannedOutput, plan_outputs};
pub use persist::{WrittenFile, write_sections};
pub use splitter::{DropReason, DroppedSection, Section, SplitReport, Splitter, split};
