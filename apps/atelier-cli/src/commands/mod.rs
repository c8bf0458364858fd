//! # Commands
//!
//! One module per subcommand.
//!
//! ```text
//! commands/
//! ├── mod.rs          ◄─── Report type shared by all commands
//! ├── statements.rs   ◄─── Statements and quotes: PDF, zip, print
//! ├── spreadsheet.rs  ◄─── Work-status .xlsx
//! ├── capture.rs      ◄─── Work-status PNG snapshot
//! ├── partners.rs     ◄─── Partner registry list/import
//! └── company.rs      ◄─── Company profile show/import
//! ```
//!
//! Every command takes the [`AppContext`](crate::context::AppContext) and
//! its parsed arguments and returns a [`Report`]; printing is left to
//! `main`.

pub mod capture;
pub mod company;
pub mod partners;
pub mod spreadsheet;
pub mod statements;

use serde::Serialize;

use atelier_export::SavedFile;

/// What a command did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// One-line summary.
    pub message: String,

    /// Files written, as paths where known.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,

    /// Detail lines (listings, profiles).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<String>,
}

impl Report {
    pub fn new(message: impl Into<String>) -> Self {
        Report {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, file: &SavedFile) -> Self {
        self.files.push(display_file(file));
        self
    }

    pub fn with_files<'a>(mut self, files: impl IntoIterator<Item = &'a SavedFile>) -> Self {
        self.files.extend(files.into_iter().map(display_file));
        self
    }

    pub fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }
}

fn display_file(file: &SavedFile) -> String {
    match &file.path {
        Some(path) => path.display().to_string(),
        None => file.file_name.clone(),
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.message)?;
        for file in &self.files {
            writeln!(f, "  {file}")?;
        }
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
