//! Synchronization of the character and corporation scopes.
//!
//! Both coordinators own one [`QueryMonitor`] per data set and route completions through
//! [`complete_data_set`], the single sequence shared by both scopes:
//!
//! 1. mark the scope updated,
//! 2. notify the error if the character's policy says so,
//! 3. merge the records into the pending set,
//! 4. consider the other scope updated if its monitor is absent or disabled,
//! 5. import once both scopes are updated.

mod character;
mod corporation;
mod dataset;
mod sync;

#[cfg(test)]
mod tests;

pub use character::CharacterDataQuerying;
pub use corporation::CorporationDataQuerying;
pub use dataset::{DataSet, IndustryJobs, MarketOrders};
pub use sync::{Completion, DataSetSync, ScopeFlags, SyncFlags};

pub(crate) use sync::ScopeSyncView;

use std::sync::{Arc, Weak};

use crate::{
    model::{
        api::ApiResult,
        endpoint::Scope,
        record::{IndustryJob, MarketOrder},
    },
    monitor::{Monitor, QueryMonitor},
    subject::Character,
};

/// Runs one completion of `scope` for data set `D` on `character`.
pub fn complete_data_set<D: DataSet>(
    character: &Character,
    scope: Scope,
    result: &ApiResult<Vec<D::Record>>,
) -> Completion {
    let endpoint = D::endpoint(scope);

    if character.should_notify_error(result, endpoint) {
        if let Some(error) = result.error() {
            D::notify_error(character, scope, error);
        }
    }

    let peer_endpoint = D::endpoint(scope.peer());
    let completion = D::sync(character).complete(
        scope,
        |peer_added| D::merge(character, result, peer_added, scope.into()),
        || !character.monitors().is_enabled(peer_endpoint),
        || D::import(character),
    );

    match completion {
        Completion::Deferred => tracing::debug!(
            character_id = character.character_id(),
            "{} {} updated, waiting on {} scope before import",
            scope,
            D::NAME,
            scope.peer()
        ),
        Completion::Imported => tracing::debug!(
            character_id = character.character_id(),
            "{} {} updated, imported {}",
            scope,
            D::NAME,
            D::NAME
        ),
    }

    completion
}

/// The two monitors a coordinator owns for its scope.
pub(crate) struct ScopeMonitors {
    market_orders: Arc<QueryMonitor<Vec<MarketOrder>>>,
    industry_jobs: Arc<QueryMonitor<Vec<IndustryJob>>>,
    group: Vec<Arc<dyn Monitor>>,
}

impl ScopeMonitors {
    /// Creates the monitors of `scope` with their completion handlers bound to `character`.
    pub(crate) fn new(scope: Scope, character: &Weak<Character>) -> Self {
        let market_orders = bind_monitor::<MarketOrders>(scope, character);
        let industry_jobs = bind_monitor::<IndustryJobs>(scope, character);
        let group: Vec<Arc<dyn Monitor>> = vec![market_orders.clone(), industry_jobs.clone()];

        Self {
            market_orders,
            industry_jobs,
            group,
        }
    }

    pub(crate) fn market_orders(&self) -> &Arc<QueryMonitor<Vec<MarketOrder>>> {
        &self.market_orders
    }

    pub(crate) fn industry_jobs(&self) -> &Arc<QueryMonitor<Vec<IndustryJob>>> {
        &self.industry_jobs
    }

    pub(crate) fn group(&self) -> &[Arc<dyn Monitor>] {
        &self.group
    }
}

/// Creates the monitor of `scope` for data set `D`.
///
/// The handler holds a weak reference: a completion arriving after the character was
/// dropped is ignored.
fn bind_monitor<D: DataSet>(
    scope: Scope,
    character: &Weak<Character>,
) -> Arc<QueryMonitor<Vec<D::Record>>> {
    let monitor = Arc::new(QueryMonitor::new(D::endpoint(scope)));
    let character = character.clone();

    monitor.on_completion(move |result: &ApiResult<Vec<D::Record>>| {
        match character.upgrade() {
            Some(character) => {
                complete_data_set::<D>(&character, scope, result);
            }
            None => tracing::debug!(
                "Ignoring {} {} completion for a dropped character",
                scope,
                D::NAME
            ),
        }
    });

    monitor
}
