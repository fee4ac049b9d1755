//! Configuration management for PartMaster.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::Res;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Loads environment variables from `partmaster/.env` in the data directory.
///
/// A missing file is fine, everything can come from the real environment.
/// Variables already set are not overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/partmaster/.env`
/// - macOS: `~/Library/Application Support/partmaster/.env`
/// - Windows: `%LOCALAPPDATA%/partmaster/.env`
///
/// # Errors
///
/// Fails if the data directory cannot be created or the `.env` file exists
/// but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let mut path = data_dir();
    async_fs::create_dir_all(&path).await?;

    path.push(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)?;
    Ok(())
}

/// Root directory for everything the application stores.
///
/// `PARTMASTER_DATA_DIR` wins, otherwise `<data_local_dir>/partmaster`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = env::var("PARTMASTER_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("partmaster");
    path
}

/// Returns the API key for the generative service.
///
/// Only the `search` command needs it, so a missing key is reported to the
/// caller instead of panicking at start-up.
pub fn gemini_api_key() -> Result<String, String> {
    match env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err("GEMINI_API_KEY must be set".to_string()),
    }
}

/// Base URL of the generative service, e.g. `https://generativelanguage.googleapis.com/v1beta`.
pub fn gemini_api_url() -> String {
    env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string())
}

pub fn gemini_model() -> String {
    env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string())
}
