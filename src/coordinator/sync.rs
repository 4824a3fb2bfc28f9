//! Completion tracking shared by both scopes of one data set.

use std::sync::{Arc, Mutex, PoisonError};

use crate::model::endpoint::Scope;

/// Flags of one scope within the current epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeFlags {
    /// The scope's poll completed (successfully or not), or the scope can never report.
    pub updated: bool,
    /// The scope's last completion merged at least one record into the pending set.
    pub added: bool,
}

/// Snapshot of a [`DataSetSync`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncFlags {
    pub character: ScopeFlags,
    pub corporation: ScopeFlags,
    /// Number of epochs started so far.
    pub epoch: u64,
    /// The current epoch already imported; the next completion starts a new epoch.
    pub imported: bool,
}

impl SyncFlags {
    pub fn scope(&self, scope: Scope) -> ScopeFlags {
        match scope {
            Scope::Character => self.character,
            Scope::Corporation => self.corporation,
        }
    }

    fn scope_mut(&mut self, scope: Scope) -> &mut ScopeFlags {
        match scope {
            Scope::Character => &mut self.character,
            Scope::Corporation => &mut self.corporation,
        }
    }
}

/// What a completion decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The other scope has not reported yet; it will import when it does.
    Deferred,
    /// Both scopes reported and the import ran.
    Imported,
}

/// Completion flags of both scopes for one data set (market orders or industry jobs).
///
/// Every completion of either scope runs [`DataSetSync::complete`], which performs the
/// whole flag update, merge, peer check, and import under one lock. Whichever scope
/// completes second imports, and an epoch imports at most once.
#[derive(Debug, Default)]
pub struct DataSetSync {
    state: Mutex<SyncFlags>,
}

impl DataSetSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completion of `scope` and imports if the other scope is ready.
    ///
    /// # Arguments
    /// - `scope` - Scope whose poll completed
    /// - `merge` - Merges the result into the pending set; receives the other scope's
    ///   `added` flag and returns whether any record was added
    /// - `peer_unavailable` - Whether the other scope can never report (monitor absent or
    ///   disabled); if so it is considered updated
    /// - `import` - Imports the pending set
    pub fn complete<M, P, I>(
        &self,
        scope: Scope,
        merge: M,
        peer_unavailable: P,
        import: I,
    ) -> Completion
    where
        M: FnOnce(bool) -> bool,
        P: FnOnce() -> bool,
        I: FnOnce(),
    {
        let mut flags = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if flags.imported || flags.epoch == 0 {
            *flags = SyncFlags {
                epoch: flags.epoch + 1,
                ..SyncFlags::default()
            };
        }

        flags.scope_mut(scope).updated = true;

        let peer = scope.peer();
        let peer_added = flags.scope(peer).added;
        flags.scope_mut(scope).added = merge(peer_added);

        if peer_unavailable() {
            flags.scope_mut(peer).updated = true;
        }

        if !flags.scope(peer).updated {
            return Completion::Deferred;
        }

        import();
        flags.imported = true;

        Completion::Imported
    }

    /// Current flags.
    pub fn flags(&self) -> SyncFlags {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One scope's view of the market orders and industry jobs flags.
#[derive(Debug, Clone)]
pub(crate) struct ScopeSyncView {
    scope: Scope,
    orders: Arc<DataSetSync>,
    jobs: Arc<DataSetSync>,
}

impl ScopeSyncView {
    pub(crate) fn new(scope: Scope, orders: Arc<DataSetSync>, jobs: Arc<DataSetSync>) -> Self {
        Self {
            scope,
            orders,
            jobs,
        }
    }

    pub(crate) fn orders(&self) -> ScopeFlags {
        self.orders.flags().scope(self.scope)
    }

    pub(crate) fn jobs(&self) -> ScopeFlags {
        self.jobs.flags().scope(self.scope)
    }
}
