use crate::config::LocationConfig;
use serde::{Deserialize, Serialize};

/// Response body of the time service's `/api/ip` endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct TimeApiResponse {
    pub datetime: String,
    pub timezone: String,
    pub utc_offset: Option<String>,
    pub abbreviation: Option<String>,
}

/// Where and when the viewer is, as far as the session knows.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationTime {
    pub datetime: String,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    pub city: String,
    pub country: String,
}

impl LocationTime {
    pub fn from_response(response: TimeApiResponse, location: &LocationConfig) -> Self {
        Self {
            datetime: response.datetime,
            timezone: response.timezone,
            utc_offset: response.utc_offset,
            abbreviation: response.abbreviation,
            city: location.city.clone(),
            country: location.country.clone(),
        }
    }

    pub fn has_place(&self) -> bool {
        !self.city.trim().is_empty() && !self.country.trim().is_empty()
    }
}
