//! Tests for the corporation monitors' reaction to API key changes.
//!
//! Changes are applied to the character and published on the shared notifier the way
//! the key registry does. These tests verify:
//! - Losing the last corporation key removes both corporation monitors
//! - Gaining a corporation key adds them back
//! - Repeated or foreign changes leave the registry untouched
//! - Completions arriving after removal or after the character is gone are tolerated

use std::sync::Arc;

use corpsync::{
    model::{
        api::ApiResult,
        credential::{Credential, CredentialChange, CredentialKind},
    },
    monitor::Monitor,
    notifier::CredentialChangeNotifier,
};
use corpsync_test_utils::prelude::*;

mod credential_changes;
