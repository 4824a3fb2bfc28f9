use chrono::Duration;

pub mod market_orders {
    use super::*;

    /// Market orders are cached by the API for 1 hour
    pub const CACHE_DURATION: Duration = Duration::hours(1);
}

pub mod industry_jobs {
    use super::*;

    /// Industry jobs are cached by the API for 15 minutes
    pub const CACHE_DURATION: Duration = Duration::minutes(15);
}
