//! MCDA command handlers.
//!
//! Handlers validate caller input once at the boundary, run the pure
//! domain analyses, and return serializable reports.

mod analysis_request;
mod fuzzy_rank;
mod inputs;
mod rank_alternatives;
mod simulate_rankings;

pub use analysis_request::{AnalysisDispatcher, AnalysisReport, AnalysisRequest};
pub use fuzzy_rank::{FuzzyRankCommand, FuzzyRankHandler, FuzzyTopsisReport};
pub use rank_alternatives::{
    RankAlternativesCommand, RankAlternativesHandler, RankedAlternative, TopsisReport,
};
pub use simulate_rankings::{MonteCarloReport, SimulateRankingsCommand, SimulateRankingsHandler};
