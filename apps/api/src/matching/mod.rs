pub mod advisor;
pub mod fallback;
pub mod handlers;
pub mod prompts;
pub mod ranker;

pub use ranker::{GeminiRanker, MatchRanker, RankingService};
