use std::sync::Arc;

use corpsync::{
    config::SyncConfig,
    model::credential::{Credential, CredentialKind},
    notifier::CredentialChangeNotifier,
    subject::{Character, SyncContext},
};

use crate::{
    constant::{TEST_CHARACTER_ID, TEST_CHARACTER_NAME},
    error::TestError,
    fixtures::factory,
    setup::TestSetup,
    sink::RecordingNotificationSink,
};

/// Builder for a [`TestSetup`].
///
/// Keys added with [`with_credential`](Self::with_credential) are numbered from 1 in the
/// order they are added.
///
/// # Example
/// ```ignore
/// let test = TestBuilder::new()
///     .with_credential(CredentialKind::Corporation)
///     .build()?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    character_id: Option<i64>,
    credentials: Vec<Credential>,
    config: SyncConfig,
    notifier: Option<CredentialChangeNotifier>,
    character_monitors_disabled: bool,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_character_id(mut self, character_id: i64) -> Self {
        self.character_id = Some(character_id);
        self
    }

    /// Adds a key of `kind` belonging to the test character.
    pub fn with_credential(mut self, kind: CredentialKind) -> Self {
        let id = self.credentials.len() as i64 + 1;
        self.credentials.push(factory::mock_credential(id, kind));
        self
    }

    pub fn with_config(mut self, config: SyncConfig) -> Self {
        self.config = config;
        self
    }

    /// Shares `notifier` instead of creating one, for setups with several characters.
    pub fn with_notifier(mut self, notifier: CredentialChangeNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Disables both character monitors once the character is created.
    pub fn with_character_monitors_disabled(mut self) -> Self {
        self.character_monitors_disabled = true;
        self
    }

    pub fn build(self) -> Result<TestSetup, TestError> {
        let character_id = self.character_id.unwrap_or(TEST_CHARACTER_ID);
        if self.credentials.iter().any(|c| !c.belongs_to(character_id)) {
            return Err(TestError::Setup(format!(
                "Keys were created for character {} but character {} was requested",
                TEST_CHARACTER_ID, character_id
            )));
        }

        let notifier = self.notifier.unwrap_or_default();
        let sink = Arc::new(RecordingNotificationSink::default());
        let context = SyncContext::new(notifier.clone(), sink.clone(), self.config);
        let character = Character::new(
            character_id,
            TEST_CHARACTER_NAME,
            self.credentials,
            &context,
        );

        let setup = TestSetup {
            character,
            notifier,
            sink,
            context,
        };
        if self.character_monitors_disabled {
            setup.set_character_monitors_enabled(false);
        }

        Ok(setup)
    }
}
