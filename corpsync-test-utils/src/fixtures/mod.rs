//! Test fixture modules for records, keys, and API results.

pub mod factory;
