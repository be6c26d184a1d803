//! Data model — the tip catalog record and the daily dispatch state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One publishable tip from the catalog.
///
/// Created externally; the only mutation this system ever performs is
/// flipping `is_published` to true when a day's dispatch fully completes.
/// Unknown fields ride along in `extra` so a load→save cycle preserves
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    /// Stable unique identifier.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Shell command the tip demonstrates.
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Monotonic: false→true only, set exactly once on full-day completion.
    #[serde(default)]
    pub is_published: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Per-recipient delivery progress, in one of the two persisted shapes.
///
/// Externally tagged and flattened into [`DispatchState`], so the state
/// file carries either `"pending": [...]` (raw ids still owed) or
/// `"completed": [...]` (digests of confirmed deliveries).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Tracking {
    /// Variant (a): raw recipient identifiers not yet confirmed delivered.
    Pending(Vec<String>),
    /// Variant (b): SHA-256 hex digests of recipients confirmed delivered.
    Completed(BTreeSet<String>),
}

/// The single persisted record tracking today's selected tip and delivery
/// progress. Exactly one live instance at a time; superseded (not deleted)
/// when a new day begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchState {
    /// UTC calendar day key, `%Y-%m-%d`.
    pub date: String,
    /// The tip selected for this day. References an existing,
    /// not-yet-published catalog entry at selection time.
    pub target_tip_id: String,
    #[serde(flatten)]
    pub tracking: Tracking,
    /// True once every configured recipient has a confirmed delivery.
    pub is_completed: bool,
}

impl DispatchState {
    /// Fresh state for `date`: `tip` owed to every recipient, none confirmed.
    pub fn new_for_day(date: &str, tip_id: &str, recipients: &[String], hashed: bool) -> Self {
        let tracking = if hashed {
            Tracking::Completed(BTreeSet::new())
        } else {
            Tracking::Pending(recipients.to_vec())
        };
        Self {
            date: date.to_string(),
            target_tip_id: tip_id.to_string(),
            tracking,
            is_completed: false,
        }
    }
}
