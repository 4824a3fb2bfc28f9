use chrono::{DateTime, Duration, Utc};
use corpsync::model::{
    api::{ApiError, ApiResult},
    credential::{Credential, CredentialKind},
    record::{IndustryJob, IssuedFor, MarketOrder},
};

use crate::constant::{TEST_CHARACTER_ID, TEST_STATION_ID};

fn test_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-09-25T06:25:58Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Create a mock sell order placed by the test character.
///
/// # Arguments
/// - `order_id` - API order ID
///
/// # Returns
/// - `MarketOrder` - An order not yet tagged for any scope
pub fn mock_market_order(order_id: i64) -> MarketOrder {
    MarketOrder {
        order_id,
        owner_id: TEST_CHARACTER_ID,
        type_id: 34,
        location_id: TEST_STATION_ID,
        price: 5.25,
        volume_entered: 10000,
        volume_remaining: 7500,
        is_buy_order: false,
        issued: test_timestamp(),
        issued_for: IssuedFor::Character,
    }
}

/// Create `count` mock orders with consecutive IDs starting at `first_id`.
pub fn mock_market_orders(first_id: i64, count: usize) -> Vec<MarketOrder> {
    (0..count as i64)
        .map(|i| mock_market_order(first_id + i))
        .collect()
}

/// Create a mock manufacturing job installed by the test character.
///
/// # Arguments
/// - `job_id` - API job ID
///
/// # Returns
/// - `IndustryJob` - A job not yet tagged for any scope
pub fn mock_industry_job(job_id: i64) -> IndustryJob {
    IndustryJob {
        job_id,
        installer_id: TEST_CHARACTER_ID,
        activity_id: 1,
        blueprint_type_id: 1178,
        facility_id: TEST_STATION_ID,
        runs: 10,
        start_date: test_timestamp(),
        end_date: test_timestamp() + Duration::days(1),
        issued_for: IssuedFor::Character,
    }
}

/// Create `count` mock jobs with consecutive IDs starting at `first_id`.
pub fn mock_industry_jobs(first_id: i64, count: usize) -> Vec<IndustryJob> {
    (0..count as i64)
        .map(|i| mock_industry_job(first_id + i))
        .collect()
}

/// Create a key of `kind` belonging to the test character.
pub fn mock_credential(id: i64, kind: CredentialKind) -> Credential {
    Credential::new(id, kind, vec![TEST_CHARACTER_ID])
}

/// Create an API error result carrying `code`.
pub fn api_error<T>(code: i32) -> ApiResult<T> {
    ApiResult::failure(ApiError::Api {
        code,
        message: "Mock API error".to_string(),
    })
}

/// Create the JSON payload an orders endpoint answers with.
pub fn mock_market_orders_payload(first_id: i64, count: usize) -> serde_json::Value {
    serde_json::to_value(mock_market_orders(first_id, count)).unwrap()
}

/// Create the JSON payload a jobs endpoint answers with.
pub fn mock_industry_jobs_payload(first_id: i64, count: usize) -> serde_json::Value {
    serde_json::to_value(mock_industry_jobs(first_id, count)).unwrap()
}
