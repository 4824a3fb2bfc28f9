//! API endpoints polled on behalf of a character.

use std::fmt;

use chrono::Duration;

use crate::config::endpoint::{industry_jobs, market_orders};

/// The scope an endpoint is queried for.
///
/// Character endpoints return data issued by the character itself, corporation endpoints
/// return data issued by the character's corporation and require a corporation API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Character,
    Corporation,
}

impl Scope {
    /// The other scope of the same data set.
    pub fn peer(self) -> Self {
        match self {
            Scope::Character => Scope::Corporation,
            Scope::Corporation => Scope::Character,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Character => write!(f, "character"),
            Scope::Corporation => write!(f, "corporation"),
        }
    }
}

/// An API endpoint a [`QueryMonitor`](crate::monitor::QueryMonitor) is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CharacterMarketOrders,
    CharacterIndustryJobs,
    CorporationMarketOrders,
    CorporationIndustryJobs,
}

impl Endpoint {
    /// Scope of the data returned by this endpoint.
    pub fn scope(self) -> Scope {
        match self {
            Endpoint::CharacterMarketOrders | Endpoint::CharacterIndustryJobs => Scope::Character,
            Endpoint::CorporationMarketOrders | Endpoint::CorporationIndustryJobs => {
                Scope::Corporation
            }
        }
    }

    /// API method name of the endpoint.
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::CharacterMarketOrders => "MarketOrders",
            Endpoint::CharacterIndustryJobs => "IndustryJobs",
            Endpoint::CorporationMarketOrders => "CorporationMarketOrders",
            Endpoint::CorporationIndustryJobs => "CorporationIndustryJobs",
        }
    }

    /// How long the API caches a response of this endpoint, used to schedule the next poll.
    pub fn cache_duration(self) -> Duration {
        match self {
            Endpoint::CharacterMarketOrders | Endpoint::CorporationMarketOrders => {
                market_orders::CACHE_DURATION
            }
            Endpoint::CharacterIndustryJobs | Endpoint::CorporationIndustryJobs => {
                industry_jobs::CACHE_DURATION
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
