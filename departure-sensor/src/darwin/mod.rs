//! Darwin LDB (Live Departure Boards) client.
//!
//! This module provides an HTTP client for the National Rail Darwin API,
//! which provides real-time train departure information, and the
//! [`RailDataClient`] seam the departure sensor polls through.
//!
//! Key characteristics of Darwin:
//! - Times are in "HH:MM" format (UK local time)
//! - The estimated departure field carries status text ("On time", "Delayed")
//! - `GetDepBoardWithDetails` returns calling points inline, and a
//!   `filterCrs` narrows the board to services calling at a destination

mod client;
mod error;
mod feed;
mod mock;
mod types;

pub use client::{DarwinClient, DarwinConfig, DepartureQuery};
pub use error::{DarwinError, ErrorKind};
pub use feed::{DarwinFeed, FetchOutcome, RailDataClient};
pub use mock::{MockDarwinClient, MockFeed};
pub use types::{CallingPoint, CallingPointGroup, DepartureBoard, NrccMessage, ServiceRecord};
