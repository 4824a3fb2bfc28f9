//! API keys held by a character.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Access level granted by an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialKind {
    /// Grants access to a single character's data.
    Character,
    /// Grants access to every character of an account.
    Account,
    /// Grants access to the data of a character's corporation.
    Corporation,
}

impl CredentialKind {
    /// Whether a key of this kind can query corporation endpoints.
    pub fn grants_corporation_access(self) -> bool {
        matches!(self, CredentialKind::Corporation)
    }
}

/// An API key and the characters it grants access to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// API key ID.
    pub id: i64,
    pub kind: CredentialKind,
    /// IDs of the characters this key can query.
    pub character_ids: Vec<i64>,
}

impl Credential {
    pub fn new(id: i64, kind: CredentialKind, character_ids: Vec<i64>) -> Self {
        Self {
            id,
            kind,
            character_ids,
        }
    }

    /// Whether this key belongs to the given character.
    pub fn belongs_to(&self, character_id: i64) -> bool {
        self.character_ids.contains(&character_id)
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} key {}", self.kind, self.id)
    }
}

/// What happened to a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    /// The key's access level changed; `previous` is the kind it had before.
    Retyped { previous: CredentialKind },
}

/// Event published by the [`CredentialChangeNotifier`](crate::notifier::CredentialChangeNotifier)
/// whenever an API key is added, removed, or retyped.
///
/// `credential` carries the key as it is after the change (or as it was before a removal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialChange {
    pub credential: Credential,
    pub change: ChangeKind,
}

impl CredentialChange {
    pub fn added(credential: Credential) -> Self {
        Self {
            credential,
            change: ChangeKind::Added,
        }
    }

    pub fn removed(credential: Credential) -> Self {
        Self {
            credential,
            change: ChangeKind::Removed,
        }
    }

    pub fn retyped(credential: Credential, previous: CredentialKind) -> Self {
        Self {
            credential,
            change: ChangeKind::Retyped { previous },
        }
    }

    /// Whether the change may have taken corporation access away.
    ///
    /// True when the key now has a non-corporation kind or no longer exists.
    pub fn may_revoke_corporation_access(&self) -> bool {
        matches!(self.change, ChangeKind::Removed)
            || !self.credential.kind.grants_corporation_access()
    }

    /// Whether the change may have granted corporation access.
    pub fn may_grant_corporation_access(&self) -> bool {
        !matches!(self.change, ChangeKind::Removed)
            && self.credential.kind.grants_corporation_access()
    }
}
