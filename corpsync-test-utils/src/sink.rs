use std::sync::Mutex;

use corpsync::{model::api::ApiError, notification::NotificationSink, subject::Character};

/// A notification received by a [`RecordingNotificationSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum Notified {
    CharacterMarketOrders(ApiError),
    CharacterIndustryJobs(ApiError),
    CorporationMarketOrders(ApiError),
    CorporationIndustryJobs(ApiError),
    Invalidated,
}

/// Notification sink remembering every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotificationSink {
    notified: Mutex<Vec<Notified>>,
}

impl RecordingNotificationSink {
    pub fn notified(&self) -> Vec<Notified> {
        self.notified.lock().unwrap().clone()
    }

    fn push(&self, notified: Notified) {
        self.notified.lock().unwrap().push(notified);
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn notify_character_market_orders_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CharacterMarketOrders(error.clone()));
    }

    fn notify_character_industry_jobs_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CharacterIndustryJobs(error.clone()));
    }

    fn notify_corporation_market_orders_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CorporationMarketOrders(error.clone()));
    }

    fn notify_corporation_industry_jobs_error(&self, _: &Character, error: &ApiError) {
        self.push(Notified::CorporationIndustryJobs(error.clone()));
    }

    fn invalidate_api_error(&self, _: &Character) {
        self.push(Notified::Invalidated);
    }
}
