//! Tipcast configuration.
//!
//! Everything the controller needs is carried in one explicit struct —
//! no ambient environment reads past startup. The transport credential and
//! recipient list come from the environment (they are secrets / per-deploy
//! data and are never persisted); file paths come from the CLI.

use std::path::PathBuf;

use crate::error::{Result, TipcastError};

/// How per-recipient delivery progress is represented at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingMode {
    /// Persist the raw recipient identifiers still owed delivery.
    Raw,
    /// Persist SHA-256 digests of delivered recipients, so the state file
    /// never stores raw identifiers.
    Hashed,
}

/// Root configuration, assembled once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,
    /// Recipient chat ids, in configured order.
    pub recipients: Vec<String>,
    /// Path to the tip catalog JSON file.
    pub catalog_path: PathBuf,
    /// Path to the dispatch state JSON file.
    pub state_path: PathBuf,
    /// Active recipient tracking variant.
    pub tracking: TrackingMode,
}

impl Config {
    /// Build a config from the environment plus explicit paths.
    ///
    /// Reads `TELEGRAM_TOKEN` and `TELEGRAM_CHAT_ID` (comma-separated chat
    /// ids; entries are trimmed and empties dropped). Missing or
    /// empty-after-trim values are fatal.
    pub fn from_env(
        catalog_path: PathBuf,
        state_path: PathBuf,
        tracking: TrackingMode,
    ) -> Result<Self> {
        let bot_token = std::env::var("TELEGRAM_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                TipcastError::Config("TELEGRAM_TOKEN environment variable not set".into())
            })?;

        let raw_ids = std::env::var("TELEGRAM_CHAT_ID").map_err(|_| {
            TipcastError::Config("TELEGRAM_CHAT_ID environment variable not set".into())
        })?;
        let recipients = parse_recipients(&raw_ids);
        if recipients.is_empty() {
            return Err(TipcastError::Config(
                "TELEGRAM_CHAT_ID contains no valid chat ids (expected: ID1,ID2)".into(),
            ));
        }

        Ok(Self {
            bot_token,
            recipients,
            catalog_path,
            state_path,
            tracking,
        })
    }
}

/// Split a comma-separated recipient list, trimming entries and dropping
/// empties and duplicates (first occurrence wins). "123, 456" → ["123", "456"].
pub fn parse_recipients(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}
