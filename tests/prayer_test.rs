use chrono::NaiveTime;
use iftar_countdown::error::FetchError;
use iftar_countdown::location::models::LocationTime;
use iftar_countdown::prayer::client::PrayerClient;
use iftar_countdown::prayer::resolve_prayer_schedule;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(uri: &str) -> PrayerClient {
    PrayerClient::new(Duration::from_secs(5))
        .unwrap()
        .with_base_url(uri)
}

fn location(city: &str, country: &str) -> LocationTime {
    LocationTime {
        datetime: "2026-03-01T10:00:00+04:00".to_string(),
        timezone: "Asia/Dubai".to_string(),
        utc_offset: None,
        abbreviation: None,
        city: city.to_string(),
        country: country.to_string(),
    }
}

fn timings_body(maghrib: &str) -> serde_json::Value {
    serde_json::json!({
        "code": 200,
        "status": "OK",
        "data": {
            "timings": {
                "Fajr": "05:12",
                "Sunrise": "06:29",
                "Dhuhr": "12:24",
                "Asr": "15:47",
                "Maghrib": maghrib,
                "Isha": "19:37"
            }
        }
    })
}

#[tokio::test]
async fn test_fetch_timings_sends_city_country_and_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity"))
        .and(query_param("city", "Dubai"))
        .and(query_param("country", "United Arab Emirates"))
        .and(query_param("method", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timings_body("18:19")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let timings = client(&mock_server.uri())
        .fetch_timings("Dubai", "United Arab Emirates", 2)
        .await
        .unwrap();

    assert_eq!(timings.maghrib, "18:19");
}

#[tokio::test]
async fn test_resolve_extracts_maghrib() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity"))
        .and(query_param("method", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timings_body("18:30")))
        .mount(&mock_server)
        .await;

    let schedule = resolve_prayer_schedule(
        &client(&mock_server.uri()),
        &location("Mecca", "Saudi Arabia"),
        4,
    )
    .await
    .unwrap()
    .expect("schedule should be resolved");

    assert_eq!(schedule.maghrib, "18:30");
    assert_eq!(
        schedule.maghrib_time,
        NaiveTime::from_hms_opt(18, 30, 0).unwrap()
    );
}

#[tokio::test]
async fn test_resolve_skips_request_without_place() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timings_body("18:30")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server.uri());

    let skipped = resolve_prayer_schedule(&client, &location("", "Egypt"), 2)
        .await
        .unwrap();
    assert!(skipped.is_none());

    let skipped = resolve_prayer_schedule(&client, &location("Cairo", ""), 2)
        .await
        .unwrap();
    assert!(skipped.is_none());
}

#[tokio::test]
async fn test_resolve_server_error_is_prayer_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = resolve_prayer_schedule(
        &client(&mock_server.uri()),
        &location("Dubai", "United Arab Emirates"),
        2,
    )
    .await;

    assert_eq!(result.unwrap_err(), FetchError::PrayerFetch);
}

#[tokio::test]
async fn test_resolve_missing_maghrib_is_prayer_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "code": 400,
            "status": "BAD_REQUEST",
            "data": "Unable to locate city and country."
        })))
        .mount(&mock_server)
        .await;

    let result = resolve_prayer_schedule(
        &client(&mock_server.uri()),
        &location("Atlantis", "Nowhere"),
        2,
    )
    .await;

    assert_eq!(result.unwrap_err(), FetchError::PrayerFetch);
}

#[tokio::test]
async fn test_resolve_unparseable_time_is_prayer_fetch_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/timingsByCity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(timings_body("after sunset")))
        .mount(&mock_server)
        .await;

    let result = resolve_prayer_schedule(
        &client(&mock_server.uri()),
        &location("Dubai", "United Arab Emirates"),
        2,
    )
    .await;

    assert_eq!(result.unwrap_err(), FetchError::PrayerFetch);
}
