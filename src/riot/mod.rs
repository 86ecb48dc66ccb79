//! Typed client for the Riot REST API.
//!
//! Account lookups go to the continental routing cluster, summoner and
//! league lookups to the platform shard; [`Region::route`] resolves both.

mod client;
mod endpoints;
mod pool;
mod rate_limit;
mod region;
mod traits;
mod types;

pub use client::{ApiBase, RiotClient};
pub use pool::HttpPool;
pub use rate_limit::{DualWindowLimiter, RetryPolicy};
pub use region::{Region, RegionRoute};
pub use traits::RiotApi;
pub use types::*;
