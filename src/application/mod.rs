//! Application layer - Commands and Handlers.
//!
//! This layer validates caller requests and orchestrates the pure domain
//! analyses into serializable reports.

pub mod handlers;

pub use handlers::mcda::{
    AnalysisDispatcher, AnalysisReport, AnalysisRequest, FuzzyRankCommand, FuzzyRankHandler,
    FuzzyTopsisReport, MonteCarloReport, RankAlternativesCommand, RankAlternativesHandler,
    RankedAlternative, SimulateRankingsCommand, SimulateRankingsHandler, TopsisReport,
};
