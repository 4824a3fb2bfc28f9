//! User-facing error notifications.

use crate::{model::api::ApiError, subject::Character};

/// Sink receiving API error notifications raised while synchronizing a character.
///
/// At most one error notification is active per character at a time; the character decides
/// when to raise one (see [`Character::should_notify_error`]) and when to invalidate it.
pub trait NotificationSink: Send + Sync {
    fn notify_character_market_orders_error(&self, character: &Character, error: &ApiError);

    fn notify_character_industry_jobs_error(&self, character: &Character, error: &ApiError);

    fn notify_corporation_market_orders_error(&self, character: &Character, error: &ApiError);

    fn notify_corporation_industry_jobs_error(&self, character: &Character, error: &ApiError);

    /// Clears the character's active error notification.
    fn invalidate_api_error(&self, character: &Character);
}

/// Notification sink that reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn notify_character_market_orders_error(&self, character: &Character, error: &ApiError) {
        tracing::warn!(
            character_id = character.character_id(),
            "Failed to query market orders for {}: {}",
            character.name(),
            error
        );
    }

    fn notify_character_industry_jobs_error(&self, character: &Character, error: &ApiError) {
        tracing::warn!(
            character_id = character.character_id(),
            "Failed to query industry jobs for {}: {}",
            character.name(),
            error
        );
    }

    fn notify_corporation_market_orders_error(&self, character: &Character, error: &ApiError) {
        tracing::warn!(
            character_id = character.character_id(),
            "Failed to query corporation market orders for {}: {}",
            character.name(),
            error
        );
    }

    fn notify_corporation_industry_jobs_error(&self, character: &Character, error: &ApiError) {
        tracing::warn!(
            character_id = character.character_id(),
            "Failed to query corporation industry jobs for {}: {}",
            character.name(),
            error
        );
    }

    fn invalidate_api_error(&self, character: &Character) {
        tracing::info!(
            character_id = character.character_id(),
            "API errors for {} resolved",
            character.name()
        );
    }
}
