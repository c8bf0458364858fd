//! # Application Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file: `--config PATH`, else `atelier.toml` in the platform
//!    config directory
//! 3. Environment variables (`ATELIER_*`)
//!
//! ## Example `atelier.toml`
//! ```toml
//! [storage]
//! db_path = "/srv/atelier/atelier.db"
//!
//! [export]
//! output_dir = "exports"
//! statement_label = "거래명세서"
//! batch_label = "거래명세서_일괄"
//!
//! [fonts]
//! regular = "/usr/share/fonts/noto/NotoSansKR-Regular.ttf"
//! bold = "/usr/share/fonts/noto/NotoSansKR-Bold.ttf"
//!
//! [print]
//! settle_ms = 800
//! print_command = "lp {file}"
//!
//! [status_labels]
//! shipped = "출고완료"
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use atelier_core::{DocumentKind, StatusLabels};
use atelier_export::{ExportLabels, FontConfig, SettleStrategy};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "atelier.toml";

/// Database file name inside the platform data directory.
pub const DB_FILE_NAME: &str = "atelier.db";

/// Settle delay before printing when nothing is configured.
pub const DEFAULT_SETTLE_MS: u64 = 800;

/// Platform directories (`com.atelier.backoffice`).
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "atelier", "backoffice")
}

// =============================================================================
// Sections
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub fonts: FontsConfig,
    pub print: PrintConfig,
    pub status_labels: StatusLabels,
}

/// `[storage]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite file. Default: platform data directory / `atelier.db`
    pub db_path: Option<PathBuf>,
}

/// `[export]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory every exported file is written to.
    pub output_dir: PathBuf,

    pub statement_label: String,

    /// Zip label for statement batches.
    pub batch_label: String,

    pub quote_label: String,

    pub quote_batch_label: String,

    /// Directory relative seal image paths resolve against.
    pub asset_dir: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let labels = ExportLabels::default();
        ExportConfig {
            output_dir: PathBuf::from("."),
            statement_label: labels.statement,
            batch_label: labels.statement_batch,
            quote_label: labels.quote,
            quote_batch_label: labels.quote_batch,
            asset_dir: None,
        }
    }
}

/// `[fonts]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
}

/// `[print]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// Fixed delay between opening and printing.
    pub settle_ms: u64,

    /// Wait for the viewer to report loaded instead of a fixed delay.
    pub wait_for_load: bool,

    /// Viewer command; `{file}` is replaced by the spooled PDF path.
    pub viewer_command: Option<String>,

    /// Print command; `{file}` is replaced by the spooled PDF path.
    pub print_command: Option<String>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        PrintConfig {
            settle_ms: DEFAULT_SETTLE_MS,
            wait_for_load: false,
            viewer_command: None,
            print_command: None,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Loads defaults, then the config file, then the process environment.
    ///
    /// An explicit `path` must exist; the platform default may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => AppConfig::from_file(path)?,
            None => match project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME)) {
                Some(default_path) if default_path.is_file() => AppConfig::from_file(&default_path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    AppConfig::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses one TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = AppConfig::from_toml(&text).map_err(|e| match e {
            ConfigError::Parse { reason, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })?;

        info!(path = %path.display(), "Configuration file loaded");
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            reason: e.to_string(),
        })
    }

    /// Applies `ATELIER_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `ATELIER_DB_PATH`: SQLite file
    /// - `ATELIER_OUTPUT_DIR`: export directory
    /// - `ATELIER_FONT_REGULAR` / `ATELIER_FONT_BOLD`: TTF files
    /// - `ATELIER_PRINT_SETTLE_MS`: print settle delay in milliseconds
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("ATELIER_DB_PATH") {
            self.storage.db_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("ATELIER_OUTPUT_DIR") {
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(path) = lookup("ATELIER_FONT_REGULAR") {
            self.fonts.regular = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("ATELIER_FONT_BOLD") {
            self.fonts.bold = Some(PathBuf::from(path));
        }

        if let Some(ms) = lookup("ATELIER_PRINT_SETTLE_MS") {
            self.print.settle_ms = ms
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ATELIER_PRINT_SETTLE_MS".to_string()))?;
        }

        Ok(())
    }

    /// Rejects empty labels and an empty output directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let labels = [
            ("export.statement_label", &self.export.statement_label),
            ("export.batch_label", &self.export.batch_label),
            ("export.quote_label", &self.export.quote_label),
            ("export.quote_batch_label", &self.export.quote_batch_label),
            ("status_labels.waiting", &self.status_labels.waiting),
            ("status_labels.in_progress", &self.status_labels.in_progress),
            ("status_labels.post_processing", &self.status_labels.post_processing),
            ("status_labels.shipped", &self.status_labels.shipped),
        ];
        for (key, value) in labels {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingRequired(key.to_string()));
            }
        }

        if self.export.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("export.output_dir".to_string()));
        }

        Ok(())
    }

    // =========================================================================
    // Derived Settings
    // =========================================================================

    /// Configured database path, else the platform data directory.
    pub fn db_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()
            .ok_or_else(|| ConfigError::MissingRequired("storage.db_path".to_string()))?;
        Ok(dirs.data_dir().join(DB_FILE_NAME))
    }

    pub fn export_labels(&self) -> ExportLabels {
        ExportLabels {
            statement: self.export.statement_label.clone(),
            statement_batch: self.export.batch_label.clone(),
            quote: self.export.quote_label.clone(),
            quote_batch: self.export.quote_batch_label.clone(),
        }
    }

    /// Label for one document of `kind`.
    pub fn label_for(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Statement => &self.export.statement_label,
            DocumentKind::Quote => &self.export.quote_label,
        }
    }

    pub fn font_config(&self) -> FontConfig {
        FontConfig {
            regular: self.fonts.regular.clone(),
            bold: self.fonts.bold.clone(),
        }
    }

    pub fn settle_strategy(&self) -> SettleStrategy {
        if self.print.wait_for_load {
            SettleStrategy::OnLoad
        } else {
            SettleStrategy::FixedDelay(Duration::from_millis(self.print.settle_ms))
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.export.statement_label, "거래명세서");
        assert_eq!(config.export.batch_label, "거래명세서_일괄");
        assert_eq!(config.export.quote_label, "견적서");
        assert_eq!(
            config.settle_strategy(),
            SettleStrategy::FixedDelay(Duration::from_millis(800))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [export]
            output_dir = "out"
            statement_label = "명세서"

            [print]
            wait_for_load = true

            [status_labels]
            shipped = "출고완료"
            "#,
        )
        .unwrap();

        assert_eq!(config.export.output_dir, PathBuf::from("out"));
        assert_eq!(config.export.statement_label, "명세서");
        assert_eq!(config.export.quote_label, "견적서");
        assert_eq!(config.status_labels.shipped, "출고완료");
        assert_eq!(config.status_labels.waiting, "대기중");
        assert_eq!(config.settle_strategy(), SettleStrategy::OnLoad);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = AppConfig::from_toml("[export]\noutput_dir = \"out\"\n").unwrap();
        config
            .apply_env(env(&[
                ("ATELIER_OUTPUT_DIR", "/tmp/exports"),
                ("ATELIER_DB_PATH", "/tmp/a.db"),
                ("ATELIER_PRINT_SETTLE_MS", "1500"),
            ]))
            .unwrap();

        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/a.db"));
        assert_eq!(config.print.settle_ms, 1500);
    }

    #[test]
    fn test_bad_settle_env() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(env(&[("ATELIER_PRINT_SETTLE_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_validate_rejects_empty_label() {
        let mut config = AppConfig::default();
        config.export.quote_label = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingRequired(key)) if key == "export.quote_label"
        ));

        let mut config = AppConfig::default();
        config.export.output_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[fonts]\nregular = \"/fonts/kr.ttf\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.font_config().regular, Some(PathBuf::from("/fonts/kr.ttf")));

        let missing = AppConfig::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[print]\nsettle_ms = \"fast\"\n").unwrap();

        match AppConfig::from_file(&path) {
            Err(ConfigError::Parse { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
