//! Station code → name lookup.
//!
//! Sensors consult the lookup read-only to name their destination. The
//! table is either the builtin list of major stations or the full
//! National Rail knowledgebase feed, cached on disk.

mod builtin;
mod cache;
mod client;
mod error;
mod lookup;

pub use cache::StationCache;
pub use client::StationClient;
pub use error::StationError;
pub use lookup::StationLookup;
