
use std::sync::{Arc, Mutex};

use super::*;
use crate::model::credential::{Credential, CredentialKind};

#[derive(Default)]
struct RecordingListener {
    received: Mutex<Vec<CredentialChange>>,
}

impl RecordingListener {
    fn received(&self) -> Vec<CredentialChange> {
        self.received.lock().unwrap().clone()
    }
}

impl CredentialListener for RecordingListener {
    fn on_credential_changed(&self, change: &CredentialChange) {
        self.received.lock().unwrap().push(change.clone());
    }
}

fn corporation_key_added() -> CredentialChange {
    CredentialChange::added(Credential::new(
        1,
        CredentialKind::Corporation,
        vec![2114794365],
    ))
}
