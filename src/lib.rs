//! Rank tracking core for League of Legends players linked to Discord users.
//!
//! [`riot::RiotClient`] talks to the Riot API with region aware routing,
//! [`ranking`] orders tiers, and [`ProfileSynchronizer`] ties the lookups to
//! a [`db::ProfileStore`] so each sync lands as one committed update.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod ranking;
pub mod riot;
pub mod sync;

pub use error::AppError;
pub use sync::ProfileSynchronizer;
