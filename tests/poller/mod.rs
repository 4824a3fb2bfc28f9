//! Tests for the Poller.
//!
//! A `MockTransport` answers every endpoint so a full pass runs through the monitors'
//! completion callbacks. These tests verify:
//! - Only registered, enabled, due monitors are polled
//! - Transport and decoding failures reach the callbacks as error results
//! - Dropped characters are pruned from the watch list
//! - Start and stop are idempotent

use std::sync::Arc;

use corpsync::{
    model::{api::ApiError, credential::CredentialKind, endpoint::Endpoint},
    monitor::Monitor,
    poller::{Poller, PollerConfig},
};
use corpsync_test_utils::prelude::*;

mod lifecycle;

/// Transport answering all four endpoints with records.
fn full_transport() -> Arc<MockTransport> {
    Arc::new(
        MockTransport::new()
            .with_response(
                Endpoint::CharacterMarketOrders,
                factory::mock_market_orders_payload(1, 2),
            )
            .with_response(
                Endpoint::CorporationMarketOrders,
                factory::mock_market_orders_payload(100, 3),
            )
            .with_response(
                Endpoint::CharacterIndustryJobs,
                factory::mock_industry_jobs_payload(1, 1),
            )
            .with_response(
                Endpoint::CorporationIndustryJobs,
                factory::mock_industry_jobs_payload(100, 2),
            ),
    )
}
