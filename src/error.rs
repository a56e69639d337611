use thiserror::Error;

/// Terminal failures of a countdown session.
///
/// The `Display` text is what the user sees. Diagnostic detail is logged at
/// the point of failure and never carried here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    #[error("Failed to fetch time data. Please restart to try again.")]
    TimeFetch,
    #[error("Failed to fetch prayer times. Please restart to try again.")]
    PrayerFetch,
}
