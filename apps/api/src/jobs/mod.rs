pub mod aggregator;
pub mod market;
pub mod normalize;
pub mod providers;
pub mod titles;

pub use aggregator::JobAggregator;
pub use market::{market_overview, MarketOverview};
