//! Injectable day supplier. The controller keys everything off a UTC
//! calendar day string, so tests pin the day instead of the wall clock.

/// Supplies the current UTC calendar day.
pub trait Clock: Send + Sync {
    /// Today's UTC date as a `%Y-%m-%d` key.
    fn today(&self) -> String;
}

/// System clock — the real thing.
#[derive(Debug, Default, Clone)]
pub struct UtcClock;

impl Clock for UtcClock {
    fn today(&self) -> String {
        chrono::Utc::now().format("%Y-%m-%d").to_string()
    }
}
