//! Per-request state machine.
//!
//! A submission walks `Idle -> Validating -> RateLimitCheck -> Scoring ->
//! Displaying` and lands back on `Idle` when [`Session::submit`] returns.
//! Validation and rate-limit rejections leave the limiter untouched.

use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::detector::{self, Analysis, Detector, HeuristicDetector};
use crate::error::{AnalysisError, Result};
use crate::random::{RandomSource, ThreadRandom};
use crate::rate_limit::RateLimiter;
use crate::stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    RateLimitCheck,
    Scoring,
    Displaying,
}

pub struct Session<C: Clock = SystemClock> {
    limiter: RateLimiter,
    detector: Box<dyn Detector>,
    rng: Box<dyn RandomSource>,
    clock: C,
    phase: Phase,
}

impl Session<SystemClock> {
    pub fn new() -> Self {
        SessionBuilder::new().build()
    }

    pub fn from_config(config: &Config) -> Self {
        SessionBuilder::new()
            .cooldown(config.cooldown())
            .random(ThreadRandom::from_seed_option(config.seed))
            .build()
    }
}

impl Default for Session<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Session<C> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    /// Run one request through validation, the cooldown gate and scoring.
    pub fn submit(&mut self, text: &str) -> Result<Analysis> {
        let outcome = self.run(text);
        self.enter(Phase::Idle);
        outcome
    }

    fn enter(&mut self, phase: Phase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
    }

    fn run(&mut self, text: &str) -> Result<Analysis> {
        self.enter(Phase::Validating);
        validate(text)?;

        self.enter(Phase::RateLimitCheck);
        if let Err(limited) = self.limiter.try_acquire(self.clock.now()) {
            tracing::warn!(
                remaining_seconds = limited.remaining_seconds,
                "request rejected by cooldown"
            );
            return Err(limited.into());
        }

        self.enter(Phase::Scoring);
        let analysis =
            detector::detect_or_simulate(self.detector.as_ref(), text, self.rng.as_mut());

        self.enter(Phase::Displaying);
        tracing::info!(
            detector = self.detector.name(),
            plagiarism = analysis.result.plagiarism_score,
            ai_probability = analysis.result.ai_probability,
            simulated = analysis.is_simulated(),
            "analysis delivered"
        );
        Ok(analysis)
    }
}

pub(crate) fn validate(text: &str) -> Result<()> {
    if stats::is_blank(text) {
        tracing::debug!("rejected empty input");
        return Err(AnalysisError::EmptyInput);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct SessionBuilder<C: Clock = SystemClock> {
    cooldown: Duration,
    detector: Box<dyn Detector>,
    rng: Box<dyn RandomSource>,
    clock: C,
}

impl SessionBuilder<SystemClock> {
    pub fn new() -> Self {
        Self {
            cooldown: crate::rate_limit::DEFAULT_COOLDOWN,
            detector: Box::new(HeuristicDetector),
            rng: Box::new(ThreadRandom::from_entropy()),
            clock: SystemClock,
        }
    }
}

impl Default for SessionBuilder<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SessionBuilder<C> {
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn detector(mut self, detector: impl Detector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn clock<D: Clock>(self, clock: D) -> SessionBuilder<D> {
        SessionBuilder {
            cooldown: self.cooldown,
            detector: self.detector,
            rng: self.rng,
            clock,
        }
    }

    pub fn build(self) -> Session<C> {
        Session {
            limiter: RateLimiter::with_cooldown(self.cooldown),
            detector: self.detector,
            rng: self.rng,
            clock: self.clock,
            phase: Phase::Idle,
        }
    }
}
