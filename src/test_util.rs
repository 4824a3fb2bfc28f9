//! Fixtures shared by the unit tests.

use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};

use crate::{
    config::SyncConfig,
    model::{
        api::ApiError,
        credential::{Credential, CredentialKind},
        record::{IndustryJob, IssuedFor, MarketOrder},
    },
    notification::NotificationSink,
    notifier::CredentialChangeNotifier,
    subject::{Character, SyncContext},
};

pub(crate) const CHARACTER_ID: i64 = 2114794365;
pub(crate) const OTHER_CHARACTER_ID: i64 = 2117053828;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Notified {
    CharacterOrders(ApiError),
    CharacterJobs(ApiError),
    CorporationOrders(ApiError),
    CorporationJobs(ApiError),
    Invalidated,
}

/// Notification sink remembering every call.
#[derive(Default)]
pub(crate) struct RecordingSink {
    notified: Mutex<Vec<Notified>>,
}

impl RecordingSink {
    pub(crate) fn notified(&self) -> Vec<Notified> {
        self.notified.lock().unwrap().clone()
    }

    fn push(&self, notified: Notified) {
        self.notified.lock().unwrap().push(notified);
    }
}

impl NotificationSink for RecordingSink {
    fn notify_character_market_orders_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CharacterOrders(error.clone()));
    }

    fn notify_character_industry_jobs_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CharacterJobs(error.clone()));
    }

    fn notify_corporation_market_orders_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CorporationOrders(error.clone()));
    }

    fn notify_corporation_industry_jobs_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CorporationJobs(error.clone()));
    }

    fn invalidate_api_error(&self, _: &Character) {
        self.push(Notified::Invalidated);
    }
}

pub(crate) struct Fixture {
    pub(crate) character: Arc<Character>,
    pub(crate) notifier: CredentialChangeNotifier,
    pub(crate) sink: Arc<RecordingSink>,
}

/// Character holding keys of the given kinds, numbered from 1.
pub(crate) fn character_with(kinds: &[CredentialKind]) -> Fixture {
    character_with_config(kinds, SyncConfig::default())
}

pub(crate) fn character_with_config(kinds: &[CredentialKind], config: SyncConfig) -> Fixture {
    let notifier = CredentialChangeNotifier::new();
    let sink = Arc::new(RecordingSink::default());
    let context = SyncContext::new(notifier.clone(), sink.clone(), config);

    let credentials = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| credential(i as i64 + 1, *kind))
        .collect();
    let character = Character::new(CHARACTER_ID, "Hyperion Dawn", credentials, &context);

    Fixture {
        character,
        notifier,
        sink,
    }
}

pub(crate) fn credential(id: i64, kind: CredentialKind) -> Credential {
    Credential::new(id, kind, vec![CHARACTER_ID])
}

pub(crate) fn market_order(order_id: i64) -> MarketOrder {
    MarketOrder {
        order_id,
        owner_id: CHARACTER_ID,
        type_id: 34,
        location_id: 60003760,
        price: 5.25,
        volume_entered: 1000,
        volume_remaining: 750,
        is_buy_order: false,
        issued: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        issued_for: IssuedFor::Character,
    }
}

pub(crate) fn industry_job(job_id: i64) -> IndustryJob {
    IndustryJob {
        job_id,
        installer_id: CHARACTER_ID,
        activity_id: 1,
        blueprint_type_id: 1178,
        facility_id: 60003760,
        runs: 10,
        start_date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 1, 16, 12, 0, 0).unwrap(),
        issued_for: IssuedFor::Character,
    }
}
