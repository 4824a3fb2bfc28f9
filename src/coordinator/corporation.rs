use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::{
    coordinator::{DataSetSync, ScopeMonitors, ScopeSyncView},
    model::{
        credential::CredentialChange,
        endpoint::Scope,
        record::{IndustryJob, MarketOrder},
    },
    monitor::{Monitor, MonitorRegistry, QueryMonitor},
    notifier::{CredentialListener, CredentialSubscription},
    subject::Character,
};

/// Corporation scope coordinator.
///
/// Owns the corporation market orders and industry jobs monitors and keeps their registry
/// membership in line with the character's API keys: both monitors are registered while
/// the character holds a corporation key and removed once only character or account keys
/// remain.
pub struct CorporationDataQuerying {
    character: Weak<Character>,
    monitors: ScopeMonitors,
    flags: ScopeSyncView,
    /// Serializes membership changes
    membership: Mutex<()>,
    subscription: Mutex<Option<CredentialSubscription>>,
}

impl CorporationDataQuerying {
    pub(crate) fn new(
        character: &Weak<Character>,
        registry: &MonitorRegistry,
        orders: Arc<DataSetSync>,
        jobs: Arc<DataSetSync>,
    ) -> Self {
        let monitors = ScopeMonitors::new(Scope::Corporation, character);
        registry.add_all_absent(monitors.group());

        Self {
            character: character.clone(),
            monitors,
            flags: ScopeSyncView::new(Scope::Corporation, orders, jobs),
            membership: Mutex::new(()),
            subscription: Mutex::new(None),
        }
    }

    /// Keeps the credential change subscription alive for as long as the coordinator.
    pub(crate) fn attach(&self, subscription: CredentialSubscription) {
        *self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(subscription);
    }

    /// Detaches from the credential change notifier.
    ///
    /// Happens automatically when the character is dropped.
    pub fn detach(&self) {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn market_orders_monitor(&self) -> &Arc<QueryMonitor<Vec<MarketOrder>>> {
        self.monitors.market_orders()
    }

    pub fn industry_jobs_monitor(&self) -> &Arc<QueryMonitor<Vec<IndustryJob>>> {
        self.monitors.industry_jobs()
    }

    /// Both corporation monitors, for bulk registry operations.
    pub fn monitors(&self) -> &[Arc<dyn Monitor>] {
        self.monitors.group()
    }

    /// Whether any corporation monitor is registered with `registry`.
    ///
    /// Membership changes move both monitors together, so one registered monitor means the
    /// group is registered.
    pub fn is_registered(&self, registry: &MonitorRegistry) -> bool {
        registry.contains_any(self.monitors.group())
    }

    /// The corporation market orders poll completed in the current epoch.
    pub fn orders_updated(&self) -> bool {
        self.flags.orders().updated
    }

    /// The corporation market orders completion merged at least one order.
    pub fn orders_added(&self) -> bool {
        self.flags.orders().added
    }

    /// The corporation industry jobs poll completed in the current epoch.
    pub fn jobs_updated(&self) -> bool {
        self.flags.jobs().updated
    }

    /// The corporation industry jobs completion merged at least one job.
    pub fn jobs_added(&self) -> bool {
        self.flags.jobs().added
    }

    /// Removes the corporation monitors registered at creation when none of the
    /// character's initial keys grants corporation access.
    pub(crate) fn drop_unusable_monitors(&self, character: &Character) {
        let _guard = self
            .membership
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if character.has_corporation_access() {
            return;
        }

        let removed = character
            .monitors()
            .remove_all_present(self.monitors.group());
        tracing::debug!(
            character_id = character.character_id(),
            "{} holds no corporation key, removed {} corporation monitor(s)",
            character.name(),
            removed
        );
    }

    /// Adds or removes the corporation monitors after a change to one of the character's
    /// keys.
    ///
    /// Whether the change concerns this character is decided by the changed key's own
    /// `character_ids` (see [`Credential::belongs_to`]), not by the keys the character
    /// holds, so a removed key is still recognized. The resulting membership is then
    /// decided by the keys the character still holds.
    ///
    /// The monitors are removed when the change may have revoked corporation access and no
    /// remaining key grants it, and re-added when a corporation key appeared while they
    /// were not registered. Both branches are no-ops when membership already matches.
    ///
    /// [`Credential::belongs_to`]: crate::model::credential::Credential::belongs_to
    fn update_membership(&self, character: &Character, change: &CredentialChange) {
        let _guard = self
            .membership
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let registry = character.monitors();
        let registered = self.is_registered(registry);

        if change.may_revoke_corporation_access()
            && !character.has_corporation_access()
            && registered
        {
            let removed = registry.remove_all_present(self.monitors.group());
            tracing::debug!(
                character_id = character.character_id(),
                "{} no longer has corporation access, removed {} corporation monitor(s)",
                character.name(),
                removed
            );
            return;
        }

        if !change.may_grant_corporation_access() || registered {
            return;
        }

        let added = registry.add_all_absent(self.monitors.group());
        tracing::debug!(
            character_id = character.character_id(),
            "{} gained corporation access, added {} corporation monitor(s)",
            character.name(),
            added
        );
    }
}

impl CredentialListener for CorporationDataQuerying {
    fn on_credential_changed(&self, change: &CredentialChange) {
        let Some(character) = self.character.upgrade() else {
            return;
        };

        if !change.credential.belongs_to(character.character_id()) {
            return;
        }

        self.update_membership(&character, change);
    }
}
