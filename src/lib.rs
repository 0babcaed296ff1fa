//! Heuristic plagiarism and AI-generation scoring.
//!
//! Scores come from surface statistics (word and sentence counts,
//! vocabulary diversity) blended with a random sample. They are not a real
//! detection method. [`Session`] adds the request gate: empty input is
//! rejected, and accepted requests are spaced by a cooldown.

pub mod clock;
pub mod config;
pub mod detector;
pub mod error;
pub mod random;
pub mod rate_limit;
pub mod scorer;
pub mod session;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use detector::{Analysis, Detector, HeuristicDetector, Provenance};
pub use error::{AnalysisError, ConfigError, DetectorError};
pub use random::{RandomSource, ScriptedRandom, ThreadRandom};
pub use rate_limit::{RateLimited, RateLimiter};
pub use scorer::AnalysisResult;
pub use session::{Phase, Session, SessionBuilder};
pub use stats::TextStatistics;

/// Validate and score `text` once, without a cooldown.
pub fn analyze(text: &str) -> error::Result<Analysis> {
    analyze_with(text, &mut ThreadRandom::from_entropy())
}

/// Like [`analyze`], drawing the random blend from `rng`.
pub fn analyze_with(text: &str, rng: &mut dyn RandomSource) -> error::Result<Analysis> {
    session::validate(text)?;
    Ok(detector::detect_or_simulate(&HeuristicDetector, text, rng))
}
