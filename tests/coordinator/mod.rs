//! Tests for the completion handling of both scope coordinators.
//!
//! Results are delivered through the monitors' `complete` so the registered completion
//! callbacks run exactly as they do when polled. These tests verify:
//! - Import fires once per data set, from whichever scope completes second
//! - An absent or disabled character monitor counts as already updated
//! - Error results complete their scope and are notified per the notification policy
//! - Records reported by both scopes are presented once

use corpsync::{
    model::{
        api::{ApiError, ApiResult},
        credential::CredentialKind,
        record::IssuedFor,
    },
    monitor::Monitor,
};
use corpsync_test_utils::prelude::*;

mod import;
