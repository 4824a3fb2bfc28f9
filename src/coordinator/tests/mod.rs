
use std::cell::Cell;

use super::*;
use crate::{
    model::{
        api::ApiError,
        credential::{CredentialChange, CredentialKind},
    },
    test_util::*,
};
