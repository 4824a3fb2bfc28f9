//! Records returned by the market orders and industry jobs endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::endpoint::Scope;

/// Which scope a merged record was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IssuedFor {
    #[default]
    Character,
    Corporation,
}

impl From<Scope> for IssuedFor {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Character => IssuedFor::Character,
            Scope::Corporation => IssuedFor::Corporation,
        }
    }
}

/// A record that can be merged from either scope and de-duplicated on import.
pub trait SyncRecord: Clone + Send + Sync + 'static {
    /// API identifier of the record, shared by both scopes.
    fn record_id(&self) -> i64;

    fn issued_for(&self) -> IssuedFor;

    fn set_issued_for(&mut self, issued_for: IssuedFor);
}

/// A market order as returned by the market orders endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOrder {
    pub order_id: i64,
    /// Character who placed the order.
    pub owner_id: i64,
    pub type_id: i64,
    pub location_id: i64,
    pub price: f64,
    pub volume_entered: i64,
    pub volume_remaining: i64,
    pub is_buy_order: bool,
    pub issued: DateTime<Utc>,
    /// Not part of the payload, set when the order is merged.
    #[serde(default)]
    pub issued_for: IssuedFor,
}

impl SyncRecord for MarketOrder {
    fn record_id(&self) -> i64 {
        self.order_id
    }

    fn issued_for(&self) -> IssuedFor {
        self.issued_for
    }

    fn set_issued_for(&mut self, issued_for: IssuedFor) {
        self.issued_for = issued_for;
    }
}

/// An industry job as returned by the industry jobs endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryJob {
    pub job_id: i64,
    /// Character who installed the job.
    pub installer_id: i64,
    pub activity_id: i32,
    pub blueprint_type_id: i64,
    pub facility_id: i64,
    pub runs: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Not part of the payload, set when the job is merged.
    #[serde(default)]
    pub issued_for: IssuedFor,
}

impl SyncRecord for IndustryJob {
    fn record_id(&self) -> i64 {
        self.job_id
    }

    fn issued_for(&self) -> IssuedFor {
        self.issued_for
    }

    fn set_issued_for(&mut self, issued_for: IssuedFor) {
        self.issued_for = issued_for;
    }
}
