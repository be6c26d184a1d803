//! # Tipcast Core
//! Shared foundation: error taxonomy, configuration, data model, and the
//! seams (clock, transport) the dispatch controller is built against.

pub mod clock;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

pub use clock::{Clock, UtcClock};
pub use config::{Config, TrackingMode};
pub use error::{Result, TipcastError};
pub use transport::Transport;
pub use types::{DispatchState, Tip, Tracking};
