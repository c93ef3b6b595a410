//! Configuration management for Humactor
//!
//! Immutable behavior profiles, injected at engine construction. There is no
//! ambient/global configuration: hot-reload means building a new engine.

use crate::{Error, Result};
use serde::Deserialize;
use std::env;

/// Delay profile for humanized timing
///
/// All durations are in seconds. Every (min, max) pair must satisfy
/// `0 < min < max`; violations are rejected before any action runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DelayProfile {
    /// Minimum base (inter-key) delay
    pub min_delay: f64,

    /// Maximum base (inter-key) delay
    pub max_delay: f64,

    /// Minimum cognitive pause before decisions
    pub think_time_min: f64,

    /// Maximum cognitive pause before decisions
    pub think_time_max: f64,

    /// Minimum perception-to-action latency
    pub reaction_time_min: f64,

    /// Maximum perception-to-action latency
    pub reaction_time_max: f64,
}

impl Default for DelayProfile {
    fn default() -> Self {
        Self {
            min_delay: 0.1,
            max_delay: 0.5,
            think_time_min: 0.2,
            think_time_max: 1.0,
            reaction_time_min: 0.1,
            reaction_time_max: 0.3,
        }
    }
}

impl DelayProfile {
    /// Validate all delay windows
    pub fn validate(&self) -> Result<()> {
        check_window("delay", self.min_delay, self.max_delay)?;
        check_window("think_time", self.think_time_min, self.think_time_max)?;
        check_window("reaction_time", self.reaction_time_min, self.reaction_time_max)?;
        Ok(())
    }
}

/// Motion profile governing pointer path shape and traversal time
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotionProfile {
    /// Minimum total traversal time in seconds
    pub speed_min: f64,

    /// Maximum total traversal time in seconds
    pub speed_max: f64,

    /// Curvature factor in [0, 1], 0 is straight, 1 is maximal bend
    pub curve_factor: f64,

    /// Hand-tremor jitter factor in [0, 1]
    pub jitter_factor: f64,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            speed_min: 0.3,
            speed_max: 0.8,
            curve_factor: 0.3,
            jitter_factor: 0.05,
        }
    }
}

impl MotionProfile {
    /// Validate speed window and unit-interval factors
    pub fn validate(&self) -> Result<()> {
        check_window("speed", self.speed_min, self.speed_max)?;
        check_factor("curve_factor", self.curve_factor)?;
        check_factor("jitter_factor", self.jitter_factor)?;
        Ok(())
    }

    /// Jitter amplitude in whole pixels per axis
    pub fn jitter_amplitude(&self) -> i32 {
        (self.jitter_factor * 10.0) as i32
    }
}

/// Window geometry of the driven display, supplied by the caller
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ScreenGeometry {
    /// Screen width in pixels
    pub width: i32,

    /// Screen height in pixels
    pub height: i32,
}

impl Default for ScreenGeometry {
    fn default() -> Self {
        Self {
            width: 1366,
            height: 768,
        }
    }
}

impl ScreenGeometry {
    /// Validate screen dimensions
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::configuration(format!(
                "screen dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Complete behavior-engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Humanized delay windows
    pub delays: DelayProfile,

    /// Pointer motion profile
    pub motion: MotionProfile,

    /// Driven screen geometry
    pub screen: ScreenGeometry,
}

impl BehaviorConfig {
    /// Validate every profile, failing fast on the first bad range
    pub fn validate(&self) -> Result<()> {
        self.delays.validate()?;
        self.motion.validate()?;
        self.screen.validate()?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = BehaviorConfig::default();

        if let Ok(min_delay) = env::var("HUMACTOR_MIN_DELAY") {
            config.delays.min_delay = min_delay
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_MIN_DELAY"))?;
        }

        if let Ok(max_delay) = env::var("HUMACTOR_MAX_DELAY") {
            config.delays.max_delay = max_delay
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_MAX_DELAY"))?;
        }

        if let Ok(speed_min) = env::var("HUMACTOR_SPEED_MIN") {
            config.motion.speed_min = speed_min
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_SPEED_MIN"))?;
        }

        if let Ok(speed_max) = env::var("HUMACTOR_SPEED_MAX") {
            config.motion.speed_max = speed_max
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_SPEED_MAX"))?;
        }

        if let Ok(curve_factor) = env::var("HUMACTOR_CURVE_FACTOR") {
            config.motion.curve_factor = curve_factor
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_CURVE_FACTOR"))?;
        }

        if let Ok(jitter_factor) = env::var("HUMACTOR_JITTER_FACTOR") {
            config.motion.jitter_factor = jitter_factor
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_JITTER_FACTOR"))?;
        }

        if let Ok(width) = env::var("HUMACTOR_SCREEN_WIDTH") {
            config.screen.width = width
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_SCREEN_WIDTH"))?;
        }

        if let Ok(height) = env::var("HUMACTOR_SCREEN_HEIGHT") {
            config.screen.height = height
                .parse()
                .map_err(|_| Error::configuration("Invalid HUMACTOR_SCREEN_HEIGHT"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: BehaviorConfig = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }
}

fn check_window(name: &str, min: f64, max: f64) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min <= 0.0 {
        return Err(Error::configuration(format!(
            "{} bounds must be positive, got {}..{}",
            name, min, max
        )));
    }
    if min >= max {
        return Err(Error::configuration(format!(
            "{} min must be below max, got {}..{}",
            name, min, max
        )));
    }
    Ok(())
}

fn check_factor(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::configuration(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(())
}
