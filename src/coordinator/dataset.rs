use serde::de::DeserializeOwned;

use crate::{
    coordinator::DataSetSync,
    model::{
        api::{ApiError, ApiResult},
        endpoint::{Endpoint, Scope},
        record::{IndustryJob, IssuedFor, MarketOrder, SyncRecord},
    },
    subject::Character,
};

/// A data set polled from both scopes and merged into one view.
///
/// Parameterizes the shared completion sequence so the character and corporation
/// coordinators cannot drift apart.
pub trait DataSet: Send + Sync + 'static {
    type Record: SyncRecord + DeserializeOwned;

    /// Human readable name used in log messages.
    const NAME: &'static str;

    fn endpoint(scope: Scope) -> Endpoint;

    /// Completion flags of this data set on `character`.
    fn sync(character: &Character) -> &DataSetSync;

    fn merge(
        character: &Character,
        result: &ApiResult<Vec<Self::Record>>,
        peer_added: bool,
        issued_for: IssuedFor,
    ) -> bool;

    fn import(character: &Character);

    fn notify_error(character: &Character, scope: Scope, error: &ApiError);
}

/// Market orders data set.
pub struct MarketOrders;

impl DataSet for MarketOrders {
    type Record = MarketOrder;

    const NAME: &'static str = "market orders";

    fn endpoint(scope: Scope) -> Endpoint {
        match scope {
            Scope::Character => Endpoint::CharacterMarketOrders,
            Scope::Corporation => Endpoint::CorporationMarketOrders,
        }
    }

    fn sync(character: &Character) -> &DataSetSync {
        character.orders_sync()
    }

    fn merge(
        character: &Character,
        result: &ApiResult<Vec<MarketOrder>>,
        peer_added: bool,
        issued_for: IssuedFor,
    ) -> bool {
        character.merge_orders(result, peer_added, issued_for)
    }

    fn import(character: &Character) {
        character.import_orders();
    }

    fn notify_error(character: &Character, scope: Scope, error: &ApiError) {
        let sink = character.notifications();
        match scope {
            Scope::Character => sink.notify_character_market_orders_error(character, error),
            Scope::Corporation => sink.notify_corporation_market_orders_error(character, error),
        }
    }
}

/// Industry jobs data set.
pub struct IndustryJobs;

impl DataSet for IndustryJobs {
    type Record = IndustryJob;

    const NAME: &'static str = "industry jobs";

    fn endpoint(scope: Scope) -> Endpoint {
        match scope {
            Scope::Character => Endpoint::CharacterIndustryJobs,
            Scope::Corporation => Endpoint::CorporationIndustryJobs,
        }
    }

    fn sync(character: &Character) -> &DataSetSync {
        character.jobs_sync()
    }

    fn merge(
        character: &Character,
        result: &ApiResult<Vec<IndustryJob>>,
        peer_added: bool,
        issued_for: IssuedFor,
    ) -> bool {
        character.merge_jobs(result, peer_added, issued_for)
    }

    fn import(character: &Character) {
        character.import_jobs();
    }

    fn notify_error(character: &Character, scope: Scope, error: &ApiError) {
        let sink = character.notifications();
        match scope {
            Scope::Character => sink.notify_character_industry_jobs_error(character, error),
            Scope::Corporation => sink.notify_corporation_industry_jobs_error(character, error),
        }
    }
}
