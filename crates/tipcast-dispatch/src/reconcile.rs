//! Day-boundary reconciliation.
//!
//! A persisted state dated today is resumed in place. Anything else —
//! absent, malformed (already mapped to `None` by the store), or dated a
//! different day — triggers a fresh selection for today. The reset is
//! unconditional: an unfinished prior day is superseded, and its leftover
//! pending recipients are abandoned rather than carried forward. That is
//! documented product behavior; the discard is logged at warn so it stays
//! visible to operators.

use rand::Rng;
use tipcast_core::config::TrackingMode;
use tipcast_core::types::{DispatchState, Tip, Tracking};

use crate::select::select_unpublished;

/// Outcome of reconciling the persisted state against today.
#[derive(Debug)]
pub enum Reconciled {
    /// Persisted state is for today; continue where the last run stopped.
    Resume(DispatchState),
    /// A new day: freshly selected tip, every recipient owed.
    Fresh(DispatchState),
    /// No unpublished tips remain. The run ends successfully and nothing
    /// is written.
    Drained,
}

/// Reconcile `prior` state against `today`.
pub fn reconcile<R: Rng + ?Sized>(
    prior: Option<DispatchState>,
    today: &str,
    catalog: &[Tip],
    recipients: &[String],
    mode: TrackingMode,
    rng: &mut R,
) -> Reconciled {
    if let Some(state) = prior {
        if state.date == today {
            return Reconciled::Resume(state);
        }
        if !state.is_completed {
            let owed = match &state.tracking {
                Tracking::Pending(pending) => pending.len(),
                Tracking::Completed(done) => recipients.len().saturating_sub(done.len()),
            };
            if owed > 0 {
                tracing::warn!(
                    "⚠️ Superseding unfinished day {} (tip {}): {owed} recipient(s) never reached",
                    state.date,
                    state.target_tip_id
                );
            }
        }
    }

    match select_unpublished(catalog, rng) {
        Some(tip) => {
            tracing::info!("🎯 Selected tip '{}' ({}) for {today}", tip.title, tip.id);
            Reconciled::Fresh(DispatchState::new_for_day(
                today,
                &tip.id,
                recipients,
                mode == TrackingMode::Hashed,
            ))
        }
        None => Reconciled::Drained,
    }
}
