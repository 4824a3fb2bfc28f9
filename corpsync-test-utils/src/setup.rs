use std::sync::Arc;

use corpsync::{
    model::credential::{Credential, CredentialChange, CredentialKind},
    monitor::Monitor,
    notifier::CredentialChangeNotifier,
    subject::{Character, SyncContext},
};

use crate::{error::TestError, sink::RecordingNotificationSink};

/// A synchronized character and the collaborators it was created with.
pub struct TestSetup {
    pub character: Arc<Character>,
    pub notifier: CredentialChangeNotifier,
    pub sink: Arc<RecordingNotificationSink>,
    pub context: SyncContext,
}

impl TestSetup {
    /// Adds a key to the character and publishes the change.
    pub fn add_credential(&self, credential: Credential) {
        self.character.add_credential(credential.clone());
        self.notifier.notify(&CredentialChange::added(credential));
    }

    /// Removes a key from the character and publishes the change.
    pub fn remove_credential(&self, credential_id: i64) -> Result<Credential, TestError> {
        let credential = self
            .character
            .remove_credential(credential_id)
            .ok_or_else(|| TestError::Setup(format!("Key {} is not held", credential_id)))?;
        self.notifier
            .notify(&CredentialChange::removed(credential.clone()));

        Ok(credential)
    }

    /// Changes the kind of a held key and publishes the change.
    pub fn retype_credential(
        &self,
        credential_id: i64,
        kind: CredentialKind,
    ) -> Result<(), TestError> {
        let previous = self
            .character
            .set_credential_kind(credential_id, kind)
            .ok_or_else(|| TestError::Setup(format!("Key {} is not held", credential_id)))?;
        let credential = self
            .character
            .credentials()
            .into_iter()
            .find(|c| c.id == credential_id)
            .ok_or_else(|| TestError::Setup(format!("Key {} is not held", credential_id)))?;
        self.notifier
            .notify(&CredentialChange::retyped(credential, previous));

        Ok(())
    }

    /// Whether both corporation monitors are in the character's registry.
    pub fn corporation_monitors_registered(&self) -> bool {
        let registry = self.character.monitors();
        self.character
            .corporation_querying()
            .monitors()
            .iter()
            .all(|monitor| registry.contains(monitor.id()))
    }

    /// Enables or disables both character monitors.
    pub fn set_character_monitors_enabled(&self, enabled: bool) {
        let querying = self.character.character_querying();
        querying.market_orders_monitor().set_enabled(enabled);
        querying.industry_jobs_monitor().set_enabled(enabled);
    }
}
