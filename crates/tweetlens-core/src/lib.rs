#![deny(clippy::all)]

mod aggregator;
mod filter;
mod loader;
pub mod model;

pub use aggregator::*;
pub use filter::*;
pub use loader::*;
pub use model::{PatternsSummary, TweetRecord, EMOTIONS, MONTHS, WEEKDAYS};

pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
