use std::sync::{Arc, Weak};

use crate::{
    coordinator::{DataSetSync, ScopeMonitors, ScopeSyncView},
    model::{
        endpoint::Scope,
        record::{IndustryJob, MarketOrder},
    },
    monitor::{MonitorRegistry, QueryMonitor},
    subject::Character,
};

/// Character scope coordinator.
///
/// Owns the character market orders and industry jobs monitors. They are registered when
/// the character is created and stay registered; whether the character's keys allow these
/// queries is the transport's concern.
pub struct CharacterDataQuerying {
    monitors: ScopeMonitors,
    flags: ScopeSyncView,
}

impl CharacterDataQuerying {
    pub(crate) fn new(
        character: &Weak<Character>,
        registry: &MonitorRegistry,
        orders: Arc<DataSetSync>,
        jobs: Arc<DataSetSync>,
    ) -> Self {
        let monitors = ScopeMonitors::new(Scope::Character, character);
        registry.add_all_absent(monitors.group());

        Self {
            monitors,
            flags: ScopeSyncView::new(Scope::Character, orders, jobs),
        }
    }

    pub fn market_orders_monitor(&self) -> &Arc<QueryMonitor<Vec<MarketOrder>>> {
        self.monitors.market_orders()
    }

    pub fn industry_jobs_monitor(&self) -> &Arc<QueryMonitor<Vec<IndustryJob>>> {
        self.monitors.industry_jobs()
    }

    pub fn orders_updated(&self) -> bool {
        self.flags.orders().updated
    }

    pub fn orders_added(&self) -> bool {
        self.flags.orders().added
    }

    pub fn jobs_updated(&self) -> bool {
        self.flags.jobs().updated
    }

    pub fn jobs_added(&self) -> bool {
        self.flags.jobs().added
    }
}
