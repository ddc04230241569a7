//! Runtime configuration from environment variables.
//!
//! `main` loads an optional `.env` file first, so every setting can live
//! there as well.

use std::path::PathBuf;

const MODEL_PATH_ENV: &str = "CARDIOCHECK_MODEL_PATH";
const LOG_MODE_ENV: &str = "CARDIOCHECK_LOG_MODE";
const LOG_FILE_ENV: &str = "CARDIOCHECK_LOG_FILE";
const REQUIRE_MANIFEST_ENV: &str = "CARDIOCHECK_REQUIRE_MANIFEST";

/// Where formatted logs go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Model file, or directory containing `model.json`
    pub model_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Refuse to load a model without a matching `manifest.json`
    pub require_manifest: bool,
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            model_path: lookup(MODEL_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("models")),
            log_mode: lookup(LOG_MODE_ENV)
                .map(|v| LogMode::parse(&v))
                .unwrap_or(LogMode::Auto),
            log_file: lookup(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("cardiocheck.log")),
            require_manifest: lookup(REQUIRE_MANIFEST_ENV)
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
        }
    }
}
