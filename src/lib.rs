//! Star Wars Unlimited card database: fetch cards from the public API into
//! JSON/CSV files, query them in memory, and rank Twin Suns leader pairs.

pub mod analysis;
pub mod analysis_controller;
pub mod api;
pub mod card;
pub mod config;
pub mod database_controller;
pub mod discovery;
pub mod error;
pub mod fetcher;
pub mod query;
pub mod query_controller;
pub mod sets;
pub mod stats;
pub mod storage;

pub use card::Card;
pub use config::Settings;
pub use error::{Result, SwuError};
