use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Envelope of the prayer-times service's `timingsByCity` response
#[derive(Debug, Deserialize)]
pub struct TimingsResponse {
    pub data: TimingsData,
}

#[derive(Debug, Deserialize)]
pub struct TimingsData {
    pub timings: Timings,
}

/// Only Maghrib is kept; the other timings are dropped on decode.
#[derive(Debug, Deserialize, Clone)]
pub struct Timings {
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
}

/// Today's Maghrib for the session's location
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PrayerSchedule {
    /// As received, shown verbatim on screen
    pub maghrib: String,
    #[serde(skip)]
    pub maghrib_time: NaiveTime,
}

impl PrayerSchedule {
    pub fn from_maghrib(raw: &str) -> Result<Self> {
        Ok(Self {
            maghrib: raw.to_string(),
            maghrib_time: parse_prayer_time(raw)?,
        })
    }
}

/// Parse an "HH:MM" prayer time. A trailing zone suffix such as
/// "18:12 (+04)" is ignored.
pub fn parse_prayer_time(raw: &str) -> Result<NaiveTime> {
    let token = raw
        .split_whitespace()
        .next()
        .context("Prayer time is empty")?;
    NaiveTime::parse_from_str(token, "%H:%M")
        .with_context(|| format!("Invalid prayer time '{}', expected HH:MM", raw))
}
