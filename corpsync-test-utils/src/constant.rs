//! Identifiers shared by the tests.
//!
//! These values mirror real EVE Online ID ranges but do not refer to live characters.

/// Character synchronized by default in tests.
pub const TEST_CHARACTER_ID: i64 = 2114794365;

/// Name of the default test character.
pub static TEST_CHARACTER_NAME: &str = "Hyperion Dawn";

/// A character that owns none of the test character's keys.
pub const OTHER_CHARACTER_ID: i64 = 2117053828;

/// Station used as location for mock orders and jobs (Jita IV - Moon 4).
pub const TEST_STATION_ID: i64 = 60003760;
