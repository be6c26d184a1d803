//! # Tipcast Dispatch
//!
//! The daily dispatch state machine. Each invocation is a short-lived
//! process that remembers nothing but what it persisted, so the whole
//! design is: load both stores, reconcile the day boundary, deliver to
//! whoever is still owed, write back.
//!
//! ```text
//! run()
//!   ├── CatalogStore.load()          (fatal if missing/corrupt)
//!   ├── StateStore.load()            (tolerant: malformed → no state)
//!   ├── reconcile(day boundary)
//!   │     ├── same day   → resume in place
//!   │     ├── new day    → pick a random unpublished tip, reset state
//!   │     └── drained    → exit 0, touch nothing
//!   ├── already complete → exit 0, no sends
//!   ├── deliver()        → one send attempt per owed recipient
//!   ├── StateStore.save()
//!   └── fully delivered  → flip is_published, CatalogStore.save()
//! ```

pub mod controller;
pub mod deliver;
pub mod digest;
pub mod format;
pub mod reconcile;
pub mod select;
pub mod store;

pub use controller::{Controller, RunOutcome};
pub use deliver::{DeliveryReport, deliver};
pub use digest::recipient_digest;
pub use format::format_tip;
pub use reconcile::{Reconciled, reconcile};
pub use select::select_unpublished;
pub use store::{CatalogStore, StateStore};
