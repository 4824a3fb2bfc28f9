use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    model::endpoint::Endpoint,
    monitor::{Monitor, MonitorId},
};

/// Ordered set of the monitors polled for one character.
///
/// Membership is keyed by [`MonitorId`]; adding a monitor twice or removing an absent one
/// is a no-op. Bulk operations take a single write lock so a group of monitors is always
/// observed either fully registered or fully absent.
#[derive(Default)]
pub struct MonitorRegistry {
    monitors: RwLock<Vec<Arc<dyn Monitor>>>,
}

impl MonitorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a monitor.
    ///
    /// # Returns
    /// - `true` - Monitor added
    /// - `false` - Monitor was already registered
    pub fn add(&self, monitor: Arc<dyn Monitor>) -> bool {
        let mut monitors = self.write();

        if monitors.iter().any(|m| m.id() == monitor.id()) {
            return false;
        }

        monitors.push(monitor);
        true
    }

    /// Removes a monitor.
    ///
    /// # Returns
    /// - `true` - Monitor removed
    /// - `false` - Monitor was not registered
    pub fn remove(&self, id: MonitorId) -> bool {
        let mut monitors = self.write();
        let before = monitors.len();
        monitors.retain(|m| m.id() != id);

        monitors.len() != before
    }

    pub fn contains(&self, id: MonitorId) -> bool {
        self.read().iter().any(|m| m.id() == id)
    }

    /// First registered monitor bound to `endpoint`.
    pub fn get(&self, endpoint: Endpoint) -> Option<Arc<dyn Monitor>> {
        self.read()
            .iter()
            .find(|m| m.endpoint() == endpoint)
            .cloned()
    }

    /// Whether a monitor for `endpoint` is registered and enabled.
    pub fn is_enabled(&self, endpoint: Endpoint) -> bool {
        self.get(endpoint).is_some_and(|m| m.is_enabled())
    }

    /// Registers every monitor of `group` that is not registered yet.
    ///
    /// # Returns
    /// Number of monitors added.
    pub fn add_all_absent(&self, group: &[Arc<dyn Monitor>]) -> usize {
        let mut monitors = self.write();
        let mut added = 0;

        for monitor in group {
            if !monitors.iter().any(|m| m.id() == monitor.id()) {
                monitors.push(Arc::clone(monitor));
                added += 1;
            }
        }

        added
    }

    /// Removes every monitor of `group` that is registered.
    ///
    /// # Returns
    /// Number of monitors removed.
    pub fn remove_all_present(&self, group: &[Arc<dyn Monitor>]) -> usize {
        let mut monitors = self.write();
        let before = monitors.len();
        monitors.retain(|m| !group.iter().any(|g| g.id() == m.id()));

        before - monitors.len()
    }

    /// Whether any monitor of `group` is registered.
    pub fn contains_any(&self, group: &[Arc<dyn Monitor>]) -> bool {
        let monitors = self.read();
        group
            .iter()
            .any(|g| monitors.iter().any(|m| m.id() == g.id()))
    }

    /// Snapshot of the registered monitors in registration order.
    pub fn monitors(&self) -> Vec<Arc<dyn Monitor>> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Arc<dyn Monitor>>> {
        self.monitors.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Arc<dyn Monitor>>> {
        self.monitors.write().unwrap_or_else(PoisonError::into_inner)
    }
}
