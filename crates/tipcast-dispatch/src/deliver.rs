//! Per-recipient delivery loop.
//!
//! One send attempt per still-owed recipient per run. A failed send —
//! whether the transport reported non-success or faulted outright — leaves
//! the recipient owed and never aborts the rest of the loop. Tracking is
//! only mutated after a confirmed success, so a crash mid-loop can at
//! worst lose a confirmation (re-sent next run), never invent one.

use tipcast_core::transport::Transport;
use tipcast_core::types::{DispatchState, Tracking};

use crate::digest::recipient_digest;

/// What one run's delivery loop actually did.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Recipients a send was attempted for this run.
    pub attempted: usize,
    /// Confirmed deliveries this run.
    pub delivered: usize,
    /// Recipients still owed after this run.
    pub failed: Vec<String>,
}

/// Attempt delivery to every recipient still owed, updating `state`
/// in place. Marks `is_completed` when nobody is owed any more.
pub async fn deliver(
    state: &mut DispatchState,
    recipients: &[String],
    message: &str,
    transport: &dyn Transport,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();
    if state.is_completed {
        return report;
    }

    let owed: Vec<String> = match &state.tracking {
        Tracking::Pending(pending) => pending.clone(),
        Tracking::Completed(done) => recipients
            .iter()
            .filter(|r| !done.contains(&recipient_digest(r)))
            .cloned()
            .collect(),
    };

    for recipient in &owed {
        report.attempted += 1;
        let delivered = match transport.send(recipient, message).await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::warn!("Transport fault for {recipient}: {e}");
                false
            }
        };

        if delivered {
            match &mut state.tracking {
                Tracking::Pending(pending) => pending.retain(|r| r != recipient),
                Tracking::Completed(done) => {
                    done.insert(recipient_digest(recipient));
                }
            }
            report.delivered += 1;
        } else {
            report.failed.push(recipient.clone());
        }
    }

    let all_done = match &state.tracking {
        Tracking::Pending(pending) => pending.is_empty(),
        Tracking::Completed(done) => recipients
            .iter()
            .all(|r| done.contains(&recipient_digest(r))),
    };
    if all_done {
        state.is_completed = true;
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use tipcast_core::error::{Result, TipcastError};

    /// Transport that fails for a scripted set of recipients and records
    /// every call.
    struct ScriptedTransport {
        fail: HashSet<String>,
        fault: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        fn new() -> Self {
            Self {
                fail: HashSet::new(),
                fault: HashSet::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn send(&self, recipient: &str, _message: &str) -> Result<bool> {
            self.calls.lock().unwrap().push(recipient.to_string());
            if self.fault.contains(recipient) {
                return Err(TipcastError::Transport("boom".into()));
            }
            Ok(!self.fail.contains(recipient))
        }
    }

    fn recipients() -> Vec<String> {
        vec!["11".to_string(), "22".to_string(), "33".to_string()]
    }

    #[tokio::test]
    async fn full_delivery_completes_the_day() {
        let transport = ScriptedTransport::new();
        let mut state = DispatchState::new_for_day("2026-08-31", "tip-a", &recipients(), false);

        let report = deliver(&mut state, &recipients(), "msg", &transport).await;
        assert_eq!(report.attempted, 3);
        assert_eq!(report.delivered, 3);
        assert!(report.failed.is_empty());
        assert!(state.is_completed);
        assert_eq!(state.tracking, Tracking::Pending(vec![]));
    }

    #[tokio::test]
    async fn one_failure_keeps_day_open_and_loop_running() {
        let mut transport = ScriptedTransport::new();
        transport.fail.insert("22".to_string());
        let mut state = DispatchState::new_for_day("2026-08-31", "tip-a", &recipients(), false);

        let report = deliver(&mut state, &recipients(), "msg", &transport).await;
        // the failure did not stop delivery to 33
        assert_eq!(transport.calls(), vec!["11", "22", "33"]);
        assert_eq!(report.failed, vec!["22"]);
        assert!(!state.is_completed);
        assert_eq!(state.tracking, Tracking::Pending(vec!["22".to_string()]));
    }

    #[tokio::test]
    async fn transport_fault_counts_as_failure_not_abort() {
        let mut transport = ScriptedTransport::new();
        transport.fault.insert("11".to_string());
        let mut state = DispatchState::new_for_day("2026-08-31", "tip-a", &recipients(), false);

        let report = deliver(&mut state, &recipients(), "msg", &transport).await;
        assert_eq!(report.attempted, 3);
        assert_eq!(report.failed, vec!["11"]);
        assert_eq!(state.tracking, Tracking::Pending(vec!["11".to_string()]));
    }

    #[tokio::test]
    async fn second_run_only_retries_the_owed_recipient() {
        let mut transport = ScriptedTransport::new();
        transport.fail.insert("22".to_string());
        let mut state = DispatchState::new_for_day("2026-08-31", "tip-a", &recipients(), false);
        deliver(&mut state, &recipients(), "msg", &transport).await;

        let transport = ScriptedTransport::new();
        let report = deliver(&mut state, &recipients(), "msg", &transport).await;
        assert_eq!(transport.calls(), vec!["22"]);
        assert_eq!(report.delivered, 1);
        assert!(state.is_completed);
    }

    #[tokio::test]
    async fn completed_state_is_a_no_op() {
        let transport = ScriptedTransport::new();
        let mut state = DispatchState::new_for_day("2026-08-31", "tip-a", &recipients(), false);
        state.tracking = Tracking::Pending(vec![]);
        state.is_completed = true;

        let report = deliver(&mut state, &recipients(), "msg", &transport).await;
        assert_eq!(report.attempted, 0);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn hashed_variant_tracks_digests_not_raw_ids() {
        let mut transport = ScriptedTransport::new();
        transport.fail.insert("22".to_string());
        let mut state = DispatchState::new_for_day("2026-08-31", "tip-a", &recipients(), true);

        deliver(&mut state, &recipients(), "msg", &transport).await;
        let Tracking::Completed(done) = &state.tracking else {
            panic!("expected hashed tracking");
        };
        assert_eq!(done.len(), 2);
        assert!(done.contains(&recipient_digest("11")));
        assert!(!done.contains(&recipient_digest("22")));
        assert!(done.iter().all(|d| d.len() == 64));
        assert!(!state.is_completed);

        // second run: only 22 is owed, then the day completes
        let transport = ScriptedTransport::new();
        deliver(&mut state, &recipients(), "msg", &transport).await;
        assert_eq!(transport.calls(), vec!["22"]);
        assert!(state.is_completed);
    }
}
