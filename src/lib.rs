/// Cardsmith - card generation service for word-guessing party games.
///
/// Core library providing the generation/filtering/deduplication
/// pipeline, SQLite persistence, and the HTTP surface.

pub mod config;
pub mod core;
pub mod database;
pub mod server;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
