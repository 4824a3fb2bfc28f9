//! The character being synchronized.
//!
//! A [`Character`] owns its monitor registry, both scope coordinators, the completion
//! flags of both data sets, and the merged market orders and industry jobs. It is always
//! handled through an `Arc`; the coordinators and their monitor callbacks only hold weak
//! references back to it.

mod store;

#[cfg(test)]
mod tests;

use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};

use crate::{
    config::SyncConfig,
    coordinator::{CharacterDataQuerying, CorporationDataQuerying, DataSetSync},
    model::{
        api::{ApiError, ApiResult},
        credential::{Credential, CredentialKind},
        endpoint::Endpoint,
        record::{IndustryJob, IssuedFor, MarketOrder},
    },
    monitor::MonitorRegistry,
    notification::{NotificationSink, TracingNotificationSink},
    notifier::{CredentialChangeNotifier, CredentialListener},
};

use self::store::RecordStore;

/// Collaborators shared by every character of a process.
#[derive(Clone)]
pub struct SyncContext {
    pub notifier: CredentialChangeNotifier,
    pub notifications: Arc<dyn NotificationSink>,
    pub config: SyncConfig,
}

impl SyncContext {
    pub fn new(
        notifier: CredentialChangeNotifier,
        notifications: Arc<dyn NotificationSink>,
        config: SyncConfig,
    ) -> Self {
        Self {
            notifier,
            notifications,
            config,
        }
    }
}

impl Default for SyncContext {
    fn default() -> Self {
        Self::new(
            CredentialChangeNotifier::new(),
            Arc::new(TracingNotificationSink),
            SyncConfig::default(),
        )
    }
}

/// An EVE Online character whose character and corporation data is synchronized.
pub struct Character {
    character_id: i64,
    name: String,
    config: SyncConfig,
    notifications: Arc<dyn NotificationSink>,
    credentials: RwLock<Vec<Credential>>,
    monitors: MonitorRegistry,
    character_querying: CharacterDataQuerying,
    corporation_querying: Arc<CorporationDataQuerying>,
    orders_sync: Arc<DataSetSync>,
    jobs_sync: Arc<DataSetSync>,
    market_orders: RecordStore<MarketOrder>,
    industry_jobs: RecordStore<IndustryJob>,
    /// Endpoint whose error is currently notified, at most one per character
    error_notified: Mutex<Option<Endpoint>>,
}

impl Character {
    /// Creates a character with both coordinators and their monitors registered.
    ///
    /// The corporation monitors are removed again right away unless one of `credentials`
    /// grants corporation access.
    ///
    /// The corporation coordinator subscribes to `context.notifier` for as long as the
    /// character lives.
    pub fn new(
        character_id: i64,
        name: impl Into<String>,
        credentials: Vec<Credential>,
        context: &SyncContext,
    ) -> Arc<Self> {
        let orders_sync = Arc::new(DataSetSync::new());
        let jobs_sync = Arc::new(DataSetSync::new());

        let character = Arc::new_cyclic(|weak: &Weak<Character>| {
            let monitors = MonitorRegistry::new();
            let character_querying = CharacterDataQuerying::new(
                weak,
                &monitors,
                Arc::clone(&orders_sync),
                Arc::clone(&jobs_sync),
            );
            let corporation_querying = Arc::new(CorporationDataQuerying::new(
                weak,
                &monitors,
                Arc::clone(&orders_sync),
                Arc::clone(&jobs_sync),
            ));

            Character {
                character_id,
                name: name.into(),
                config: context.config.clone(),
                notifications: Arc::clone(&context.notifications),
                credentials: RwLock::new(credentials),
                monitors,
                character_querying,
                corporation_querying,
                orders_sync,
                jobs_sync,
                market_orders: RecordStore::new(),
                industry_jobs: RecordStore::new(),
                error_notified: Mutex::new(None),
            }
        });

        let listener: Weak<dyn CredentialListener> =
            Arc::downgrade(&character.corporation_querying) as Weak<dyn CredentialListener>;
        character
            .corporation_querying
            .attach(context.notifier.subscribe(listener));
        character.corporation_querying.drop_unusable_monitors(&character);

        tracing::debug!(
            character_id,
            "Created {} with {} monitor(s)",
            character.name,
            character.monitors.len()
        );

        character
    }

    pub fn character_id(&self) -> i64 {
        self.character_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn monitors(&self) -> &MonitorRegistry {
        &self.monitors
    }

    pub fn character_querying(&self) -> &CharacterDataQuerying {
        &self.character_querying
    }

    pub fn corporation_querying(&self) -> &CorporationDataQuerying {
        &self.corporation_querying
    }

    pub fn notifications(&self) -> &dyn NotificationSink {
        self.notifications.as_ref()
    }

    pub(crate) fn orders_sync(&self) -> &DataSetSync {
        &self.orders_sync
    }

    pub(crate) fn jobs_sync(&self) -> &DataSetSync {
        &self.jobs_sync
    }

    // Credentials

    /// Snapshot of the character's API keys.
    pub fn credentials(&self) -> Vec<Credential> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether any of the character's keys grants corporation access.
    pub fn has_corporation_access(&self) -> bool {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|c| c.kind.grants_corporation_access())
    }

    /// Adds a key, replacing any key with the same ID.
    ///
    /// Only mutates the set; the caller publishes the change on the notifier.
    pub fn add_credential(&self, credential: Credential) {
        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        credentials.retain(|c| c.id != credential.id);
        credentials.push(credential);
    }

    /// Removes a key, returning it if it was held.
    pub fn remove_credential(&self, credential_id: i64) -> Option<Credential> {
        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let index = credentials.iter().position(|c| c.id == credential_id)?;

        Some(credentials.remove(index))
    }

    /// Changes the kind of a held key, returning its previous kind.
    pub fn set_credential_kind(
        &self,
        credential_id: i64,
        kind: CredentialKind,
    ) -> Option<CredentialKind> {
        let mut credentials = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let credential = credentials.iter_mut().find(|c| c.id == credential_id)?;

        Some(std::mem::replace(&mut credential.kind, kind))
    }

    // Error notification

    /// Decides whether an error result of `endpoint` should be notified.
    ///
    /// Only one endpoint's error is notified at a time. Errors reporting the game database
    /// as unavailable and errors whose API code is configured as suppressed are never
    /// notified. A successful result on the endpoint currently notified invalidates the
    /// notification.
    pub fn should_notify_error<T>(&self, result: &ApiResult<T>, endpoint: Endpoint) -> bool {
        let mut notified = self
            .error_notified
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match result.error() {
            Some(ApiError::DatabaseUnavailable) => false,
            Some(error) if error.code().is_some_and(|code| self.config.is_suppressed(code)) => {
                false
            }
            Some(_) => {
                if notified.is_some() {
                    return false;
                }

                *notified = Some(endpoint);
                true
            }
            None => {
                if *notified == Some(endpoint) {
                    *notified = None;
                    drop(notified);
                    self.notifications.invalidate_api_error(self);
                }
                false
            }
        }
    }

    /// Endpoint whose error is currently notified.
    pub fn notified_error_endpoint(&self) -> Option<Endpoint> {
        *self
            .error_notified
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // Market orders

    /// Merges the orders of `result` into the pending orders, tagged with `issued_for`.
    ///
    /// # Returns
    /// Whether any order was added.
    pub fn merge_orders(
        &self,
        result: &ApiResult<Vec<MarketOrder>>,
        peer_added: bool,
        issued_for: IssuedFor,
    ) -> bool {
        self.market_orders.merge(result, peer_added, issued_for)
    }

    /// Imports the pending orders of both scopes as the character's market orders.
    pub fn import_orders(&self) {
        let count = self.market_orders.import();
        tracing::debug!(
            character_id = self.character_id,
            "Imported {} market order(s) for {}",
            count,
            self.name
        );
    }

    /// Imported market orders.
    pub fn market_orders(&self) -> Vec<MarketOrder> {
        self.market_orders.records()
    }

    /// Orders merged but not imported yet.
    pub fn pending_orders(&self) -> usize {
        self.market_orders.pending_len()
    }

    pub fn orders_import_count(&self) -> u64 {
        self.market_orders.import_count()
    }

    // Industry jobs

    /// Merges the jobs of `result` into the pending jobs, tagged with `issued_for`.
    ///
    /// # Returns
    /// Whether any job was added.
    pub fn merge_jobs(
        &self,
        result: &ApiResult<Vec<IndustryJob>>,
        peer_added: bool,
        issued_for: IssuedFor,
    ) -> bool {
        self.industry_jobs.merge(result, peer_added, issued_for)
    }

    /// Imports the pending jobs of both scopes as the character's industry jobs.
    pub fn import_jobs(&self) {
        let count = self.industry_jobs.import();
        tracing::debug!(
            character_id = self.character_id,
            "Imported {} industry job(s) for {}",
            count,
            self.name
        );
    }

    /// Imported industry jobs.
    pub fn industry_jobs(&self) -> Vec<IndustryJob> {
        self.industry_jobs.records()
    }

    /// Jobs merged but not imported yet.
    pub fn pending_jobs(&self) -> usize {
        self.industry_jobs.pending_len()
    }

    pub fn jobs_import_count(&self) -> u64 {
        self.industry_jobs.import_count()
    }
}
