use serde::Serialize;

use crate::error::DetectorError;
use crate::random::RandomSource;
use crate::scorer::{self, AnalysisResult};
use crate::stats::TextStatistics;

/// Where a delivered result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Heuristic,
    Simulated,
}

impl Provenance {
    /// Notice shown next to the result.
    pub fn notice(self) -> &'static str {
        match self {
            Provenance::Heuristic => "Analysis completed!",
            Provenance::Simulated => "Using simulated results due to analysis error",
        }
    }
}

/// A delivered analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub provenance: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<TextStatistics>,
}

impl Analysis {
    pub fn is_simulated(&self) -> bool {
        self.provenance == Provenance::Simulated
    }
}

/// Something that turns text into scores.
pub trait Detector {
    fn name(&self) -> &str;

    fn detect(
        &self,
        text: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<Analysis, DetectorError>;
}

/// Surface-statistics detector. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDetector;

impl Detector for HeuristicDetector {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn detect(
        &self,
        text: &str,
        rng: &mut dyn RandomSource,
    ) -> Result<Analysis, DetectorError> {
        let (result, statistics) = scorer::score_with_statistics(text, rng);
        Ok(Analysis {
            result,
            provenance: Provenance::Heuristic,
            statistics: Some(statistics),
        })
    }
}

/// Run `detector`, substituting a simulated result if it fails.
pub fn detect_or_simulate(
    detector: &dyn Detector,
    text: &str,
    rng: &mut dyn RandomSource,
) -> Analysis {
    match detector.detect(text, rng) {
        Ok(analysis) => analysis,
        Err(err) => {
            tracing::warn!(
                detector = detector.name(),
                error = %err,
                "falling back to simulated scores"
            );
            Analysis {
                result: scorer::fallback(rng),
                provenance: Provenance::Simulated,
                statistics: None,
            }
        }
    }
}
