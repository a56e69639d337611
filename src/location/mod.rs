pub mod client;
pub mod models;

use crate::config::LocationConfig;
use crate::error::FetchError;
use client::TimeClient;
use models::LocationTime;

/// Fetch the time descriptor and pin it to the configured city and country.
///
/// Every failure mode collapses into [`FetchError::TimeFetch`]; the cause is
/// logged here and dropped.
pub async fn resolve_location(
    client: &TimeClient,
    location: &LocationConfig,
) -> Result<LocationTime, FetchError> {
    match client.fetch_current().await {
        Ok(response) => {
            log::debug!(
                "time service reported timezone {} at {}",
                response.timezone,
                response.datetime
            );
            Ok(LocationTime::from_response(response, location))
        }
        Err(e) => {
            log::error!("time service request failed: {:#}", e);
            Err(FetchError::TimeFetch)
        }
    }
}
