//! Correlation clique risk engine.
//!
//! A correlation matrix over N assets is thresholded into an undirected graph.
//! A large clique means many assets move together (systemic risk); a large
//! independent set means many assets are mutually uncorrelated
//! (diversification). The matrix is always an explicit input; `generator`
//! builds seeded synthetic matrices for simulation.

pub mod clique;
pub mod generator;
pub mod graph;
pub mod matrix;

use std::fmt;

use serde::Serialize;

pub use graph::AdjacencyGraph;
pub use matrix::CorrelationMatrix;

pub const DEFAULT_ASSETS: usize = 10;
pub const DEFAULT_THRESHOLD: f64 = 0.7;
pub const DEFAULT_TARGET_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskParams {
    pub threshold: f64,
    pub target_clique_size: usize,
    pub target_independent_size: usize,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            target_clique_size: DEFAULT_TARGET_SIZE,
            target_independent_size: DEFAULT_TARGET_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskSignal {
    HighSystemicRisk,
    DiversificationOpportunity,
    Neutral,
}

impl RiskSignal {
    pub fn label(&self) -> &'static str {
        match self {
            RiskSignal::HighSystemicRisk => "High Systemic Risk (risk-off)",
            RiskSignal::DiversificationOpportunity => {
                "Arbitrage/Diversification Opportunity (risk-on)"
            }
            RiskSignal::Neutral => "Neutral",
        }
    }

    /// Clique target wins over the independent-set target.
    pub fn classify(clique_size: usize, independent_size: usize, params: &RiskParams) -> Self {
        if clique_size >= params.target_clique_size {
            RiskSignal::HighSystemicRisk
        } else if independent_size >= params.target_independent_size {
            RiskSignal::DiversificationOpportunity
        } else {
            RiskSignal::Neutral
        }
    }
}

impl fmt::Display for RiskSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub signal: RiskSignal,
    pub max_clique: Vec<usize>,
    pub max_independent_set: Vec<usize>,
    pub matrix: CorrelationMatrix,
}

impl RiskAssessment {
    pub fn max_clique_size(&self) -> usize {
        self.max_clique.len()
    }

    pub fn max_independent_size(&self) -> usize {
        self.max_independent_set.len()
    }
}

pub fn analyze_correlation_risk(matrix: CorrelationMatrix, params: &RiskParams) -> RiskAssessment {
    let graph = AdjacencyGraph::from_matrix(&matrix, params.threshold);
    let max_clique = clique::maximum_clique(&graph);
    let max_independent_set = clique::maximum_independent_set(&graph);
    let signal = RiskSignal::classify(max_clique.len(), max_independent_set.len(), params);

    tracing::debug!(
        assets = matrix.size(),
        edges = graph.edge_count(),
        threshold = params.threshold,
        clique = max_clique.len(),
        independent = max_independent_set.len(),
        signal = %signal,
        "correlation risk analysed"
    );

    RiskAssessment {
        signal,
        max_clique,
        max_independent_set,
        matrix,
    }
}
