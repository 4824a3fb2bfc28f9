//! Domain types shared by the monitors, coordinators, and characters.

pub mod api;
pub mod credential;
pub mod endpoint;
pub mod record;
