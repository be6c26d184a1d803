//! The outbound send capability consumed by the dispatcher.

use async_trait::async_trait;

use crate::error::Result;

/// A channel that can deliver one formatted message to one recipient.
///
/// `send` returns `Ok(true)` on confirmed delivery and `Ok(false)` when the
/// channel gave up after its own retries. An `Err` is a transport fault;
/// the dispatcher treats it the same as `Ok(false)` for that recipient and
/// keeps going.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Channel name, for logs.
    fn name(&self) -> &str;

    /// Deliver `message` to `recipient`. Must not hang: each attempt is
    /// bounded by a timeout and the number of attempts is fixed.
    async fn send(&self, recipient: &str, message: &str) -> Result<bool>;
}
