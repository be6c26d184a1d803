//! The run controller — one invocation of the dispatch state machine.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tipcast_core::clock::{Clock, UtcClock};
use tipcast_core::config::Config;
use tipcast_core::error::{Result, TipcastError};
use tipcast_core::transport::Transport;

use crate::deliver::deliver;
use crate::format::format_tip;
use crate::reconcile::{Reconciled, reconcile};
use crate::store::{CatalogStore, StateStore};

/// How a run ended. Every variant is a successful exit; fatal conditions
/// surface as errors instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No unpublished tips remain; nothing was selected or written.
    Drained,
    /// Today's dispatch had already fully completed before this run.
    AlreadyComplete,
    /// Every configured recipient was reached; the tip is now published.
    Completed,
    /// Some recipients are still owed; a later run will make progress.
    Partial { failed: usize },
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Drained => write!(f, "drained (no unpublished tips left)"),
            Self::AlreadyComplete => write!(f, "already complete for today"),
            Self::Completed => write!(f, "completed (all recipients reached)"),
            Self::Partial { failed } => {
                write!(f, "partial ({failed} recipient(s) still owed)")
            }
        }
    }
}

/// Orchestrates one invocation: load stores, reconcile the day, deliver,
/// persist. Stateless between runs apart from what it writes to disk.
pub struct Controller {
    config: Config,
    transport: Box<dyn Transport>,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl Controller {
    /// Production wiring: system clock, entropy-seeded RNG.
    pub fn new(config: Config, transport: Box<dyn Transport>) -> Self {
        Self::with_parts(
            config,
            transport,
            Box::new(UtcClock),
            StdRng::from_entropy(),
        )
    }

    /// Fully injected wiring, used by tests to pin the day and selection.
    pub fn with_parts(
        config: Config,
        transport: Box<dyn Transport>,
        clock: Box<dyn Clock>,
        rng: StdRng,
    ) -> Self {
        Self {
            config,
            transport,
            clock,
            rng,
        }
    }

    /// Run the state machine once.
    pub async fn run(&mut self) -> Result<RunOutcome> {
        let catalog_store = CatalogStore::new(&self.config.catalog_path);
        let state_store = StateStore::new(&self.config.state_path);

        let mut catalog = catalog_store.load()?;
        let prior = state_store.load();
        let today = self.clock.today();

        let mut state = match reconcile(
            prior,
            &today,
            &catalog,
            &self.config.recipients,
            self.config.tracking,
            &mut self.rng,
        ) {
            Reconciled::Drained => {
                tracing::info!("ℹ️ No unpublished tips remain; nothing to do");
                return Ok(RunOutcome::Drained);
            }
            Reconciled::Resume(state) if state.is_completed => {
                tracing::info!("✅ {today} already fully dispatched (tip {})", state.target_tip_id);
                return Ok(RunOutcome::AlreadyComplete);
            }
            Reconciled::Resume(state) => {
                tracing::info!("▶️ Resuming {today} (tip {})", state.target_tip_id);
                state
            }
            Reconciled::Fresh(state) => state,
        };

        let tip = catalog
            .iter()
            .find(|t| t.id == state.target_tip_id)
            .ok_or_else(|| {
                TipcastError::Store(format!(
                    "Dispatch state references unknown tip {}",
                    state.target_tip_id
                ))
            })?;
        let message = format_tip(tip);

        let report = deliver(
            &mut state,
            &self.config.recipients,
            &message,
            self.transport.as_ref(),
        )
        .await;
        tracing::info!(
            "📬 Delivery via {}: {} attempted, {} delivered, {} failed",
            self.transport.name(),
            report.attempted,
            report.delivered,
            report.failed.len()
        );

        state_store.save(&state)?;

        if state.is_completed {
            // Terminal action for the day: the tip never comes up again.
            if let Some(tip) = catalog.iter_mut().find(|t| t.id == state.target_tip_id) {
                tip.is_published = true;
            }
            catalog_store.save(&catalog)?;
            tracing::info!("🎉 Tip {} published; day {today} complete", state.target_tip_id);
            Ok(RunOutcome::Completed)
        } else {
            Ok(RunOutcome::Partial {
                failed: report.failed.len(),
            })
        }
    }
}
