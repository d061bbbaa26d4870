//! AnalysisRequest dispatch - One entry point for every analysis variant.

use serde::{Deserialize, Serialize};

use super::{
    FuzzyRankCommand, FuzzyRankHandler, FuzzyTopsisReport, MonteCarloReport,
    RankAlternativesCommand, RankAlternativesHandler, SimulateRankingsCommand,
    SimulateRankingsHandler, TopsisReport,
};
use crate::config::AnalysisConfig;
use crate::domain::foundation::DomainError;
use crate::domain::mcda::CancellationToken;

/// A request for any analysis variant, tagged by `"analysis"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum AnalysisRequest {
    Topsis(RankAlternativesCommand),
    MonteCarlo(SimulateRankingsCommand),
    FuzzyTopsis(FuzzyRankCommand),
}

/// The report matching an `AnalysisRequest` variant.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "analysis", rename_all = "snake_case")]
pub enum AnalysisReport {
    Topsis(TopsisReport),
    MonteCarlo(MonteCarloReport),
    FuzzyTopsis(FuzzyTopsisReport),
}

/// Routes requests to the matching handler.
#[derive(Debug, Clone)]
pub struct AnalysisDispatcher {
    rank: RankAlternativesHandler,
    simulate: SimulateRankingsHandler,
    fuzzy: FuzzyRankHandler,
}

impl AnalysisDispatcher {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            rank: RankAlternativesHandler::new(config.clone()),
            simulate: SimulateRankingsHandler::new(config),
            fuzzy: FuzzyRankHandler::new(),
        }
    }

    /// Runs the request. Only Monte Carlo observes `cancel`.
    pub async fn dispatch(
        &self,
        request: AnalysisRequest,
        cancel: CancellationToken,
    ) -> Result<AnalysisReport, DomainError> {
        match request {
            AnalysisRequest::Topsis(cmd) => self.rank.handle(cmd).map(AnalysisReport::Topsis),
            AnalysisRequest::MonteCarlo(cmd) => self
                .simulate
                .handle_blocking(cmd, cancel)
                .await
                .map(AnalysisReport::MonteCarlo),
            AnalysisRequest::FuzzyTopsis(cmd) => {
                self.fuzzy.handle(cmd).map(AnalysisReport::FuzzyTopsis)
            }
        }
    }
}
