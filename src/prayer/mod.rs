pub mod client;
pub mod models;

use crate::error::FetchError;
use crate::location::models::LocationTime;
use client::PrayerClient;
use models::PrayerSchedule;

/// Look up today's Maghrib for the resolved location.
///
/// Returns `Ok(None)` without issuing a request when the city or country is
/// blank. Every failure mode collapses into [`FetchError::PrayerFetch`].
pub async fn resolve_prayer_schedule(
    client: &PrayerClient,
    location: &LocationTime,
    method: u8,
) -> Result<Option<PrayerSchedule>, FetchError> {
    if !location.has_place() {
        log::warn!(
            "city or country is empty, skipping prayer time lookup; the display will stay loading"
        );
        return Ok(None);
    }

    let timings = match client
        .fetch_timings(&location.city, &location.country, method)
        .await
    {
        Ok(timings) => timings,
        Err(e) => {
            log::error!("prayer times request failed: {:#}", e);
            return Err(FetchError::PrayerFetch);
        }
    };

    match PrayerSchedule::from_maghrib(&timings.maghrib) {
        Ok(schedule) => {
            log::debug!(
                "Maghrib in {}, {} is at {}",
                location.city,
                location.country,
                schedule.maghrib
            );
            Ok(Some(schedule))
        }
        Err(e) => {
            log::error!("prayer times response unusable: {:#}", e);
            Err(FetchError::PrayerFetch)
        }
    }
}
