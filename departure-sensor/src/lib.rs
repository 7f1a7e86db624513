//! National Rail departure sensor.
//!
//! Polls the Darwin Live Departure Boards API for one station and
//! destination and reports the next departure time, with the calling
//! points, operator messages and later services as attributes.

pub mod config;
pub mod darwin;
pub mod domain;
pub mod sensor;
pub mod stations;
