//! Humanized delay sampling
//!
//! Delays are drawn from clamped normal distributions rather than uniform
//! ones; uniform inter-action timing is a known bot-detection signal.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use std::time::Duration;

use crate::config::DelayProfile;
use crate::{Error, Result};

/// A validated delay window over `[min, max]` seconds
///
/// Construction rejects `min >= max`, so sampling itself cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct DelayWindow {
    min: f64,
    max: f64,
    dist: Normal<f64>,
}

impl DelayWindow {
    /// Create a window, validating `0 < min < max`
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 {
            return Err(Error::configuration(format!(
                "delay bounds must be positive, got {}..{}",
                min, max
            )));
        }
        if min >= max {
            return Err(Error::configuration(format!(
                "delay min must be below max, got {}..{}",
                min, max
            )));
        }

        let mean = (min + max) / 2.0;
        // sigma = range/6: ~99.7% of unclamped draws already land in the window
        let std_dev = (max - min) / 6.0;
        let dist = Normal::new(mean, std_dev)
            .map_err(|e| Error::configuration(format!("invalid delay distribution: {}", e)))?;

        Ok(Self { min, max, dist })
    }

    /// Lower bound in seconds
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound in seconds
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Draw one delay, clamped to the window bounds
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let secs = self.dist.sample(rng).clamp(self.min, self.max);
        Duration::from_secs_f64(secs)
    }
}

/// The named delay windows of a validated [`DelayProfile`]
#[derive(Debug, Clone)]
pub struct TimingModel {
    base: DelayWindow,
    think: DelayWindow,
    reaction: DelayWindow,
}

impl TimingModel {
    /// Build the three windows, failing fast on any bad range
    pub fn from_profile(profile: &DelayProfile) -> Result<Self> {
        Ok(Self {
            base: DelayWindow::new(profile.min_delay, profile.max_delay)?,
            think: DelayWindow::new(profile.think_time_min, profile.think_time_max)?,
            reaction: DelayWindow::new(profile.reaction_time_min, profile.reaction_time_max)?,
        })
    }

    /// Base inter-action delay
    pub fn base_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        self.base.sample(rng)
    }

    /// Cognitive pause before a decision
    pub fn think_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        self.think.sample(rng)
    }

    /// Perception-to-action latency before a motion
    pub fn reaction_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        self.reaction.sample(rng)
    }
}
