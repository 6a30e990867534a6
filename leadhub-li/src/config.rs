//! Importer configuration
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (handled by the CLI layer)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! This module covers tiers 3 and 4; the binary applies tiers 1 and 2 on
//! top of the loaded config.

use leadhub_common::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file consulted when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "leadhub.toml";

/// Rows per chunk when neither CLI, environment, nor file says otherwise
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Markers driving counselor-context discovery during import setup
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssignmentRules {
    /// Users whose name contains this token (or whose role is admin) are
    /// manager candidates; the first match becomes the batch actor
    pub manager_marker: String,
    /// The first user whose name contains this token becomes the fallback
    /// counselor for unmatched hints
    pub default_counselor_marker: String,
}

impl Default for AssignmentRules {
    fn default() -> Self {
        Self {
            manager_marker: "manager".to_string(),
            default_counselor_marker: "likitha".to_string(),
        }
    }
}

/// Resolved importer configuration
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Rows per processing chunk
    pub chunk_size: usize,
    /// SQLite database path
    pub database: PathBuf,
    /// Directory receiving the report artifacts
    pub report_dir: PathBuf,
    pub assignment: AssignmentRules,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            database: PathBuf::from("leadhub.db"),
            report_dir: PathBuf::from("."),
            assignment: AssignmentRules::default(),
        }
    }
}

/// Partial shape of the TOML file; absent keys keep their defaults
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    chunk_size: Option<usize>,
    database: Option<PathBuf>,
    report_dir: Option<PathBuf>,
    assignment: Option<AssignmentRules>,
}

impl ImporterConfig {
    /// Load configuration from a TOML file over compiled defaults.
    ///
    /// An explicit `path` must exist and parse. With no path, the default
    /// config file is used when present, otherwise defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let contents = match path {
            Some(explicit) => std::fs::read_to_string(explicit).map_err(|e| {
                Error::Config(format!("Cannot read {}: {}", explicit.display(), e))
            })?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                std::fs::read_to_string(fallback)?
            }
        };

        let file: ConfigFile = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?;

        let defaults = Self::default();
        Ok(Self {
            chunk_size: file.chunk_size.unwrap_or(defaults.chunk_size),
            database: file.database.unwrap_or(defaults.database),
            report_dir: file.report_dir.unwrap_or(defaults.report_dir),
            assignment: file.assignment.unwrap_or(defaults.assignment),
        })
    }
}
