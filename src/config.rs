//! Configuration loading for ChakraTrack.
//!
//! TOML file with per-section defaults; every field falls back to the
//! reference rotating-point scenario when absent.

use crate::error::{Error, Result};
use crate::session::TrackingSessionConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration structure.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct TrackerConfig {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Filter noise and prior settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Process noise variance per step (default: 1e-5)
    pub process_noise_var: f32,
    /// Measurement noise variance (default: 1e-1)
    pub measurement_noise_var: f32,
    /// Prior mean angle in radians (default: 0.0)
    pub prior_angle: f32,
    /// Prior mean angular velocity in radians per cycle (default: 0.0)
    pub prior_velocity: f32,
    /// Scale of the identity prior covariance (default: 1.0)
    pub prior_cov_scale: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            process_noise_var: 1e-5,
            measurement_noise_var: 1e-1,
            prior_angle: 0.0,
            prior_velocity: 0.0,
            prior_cov_scale: 1.0,
        }
    }
}

/// Ground-truth scenario settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Initial true angle in radians (default: 0.0)
    pub initial_angle: f32,
    /// Initial true angular velocity in radians per cycle (default: 2π/6)
    pub initial_velocity: f32,
    /// Noise seed; 0 draws from entropy (default: 0)
    pub seed: u64,
    /// Stop automatically after this many cycles; 0 runs until stopped
    pub max_cycles: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            initial_angle: 0.0,
            initial_velocity: 2.0 * std::f32::consts::PI / 6.0,
            seed: 0,
            max_cycles: 0,
        }
    }
}

/// Canvas and pacing settings.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Side length of the square canvas in pixels (default: 800)
    pub image_size: f32,
    /// Cycle period in milliseconds (default: 1000)
    pub cycle_period_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            image_size: 800.0,
            cycle_period_ms: 1000,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file: {}", e)))?;
        let config: TrackerConfig = basic_toml::from_str(&content)?;
        Ok(config)
    }

    /// Flatten into the session configuration.
    pub fn session_config(&self) -> TrackingSessionConfig {
        TrackingSessionConfig {
            process_noise_var: self.filter.process_noise_var,
            measurement_noise_var: self.filter.measurement_noise_var,
            initial_angle: self.scenario.initial_angle,
            initial_velocity: self.scenario.initial_velocity,
            prior_mean: (self.filter.prior_angle, self.filter.prior_velocity),
            prior_cov_scale: self.filter.prior_cov_scale,
            seed: self.scenario.seed,
            image_size: self.display.image_size,
            cycle_period: Duration::from_millis(self.display.cycle_period_ms),
            max_cycles: if self.scenario.max_cycles == 0 {
                None
            } else {
                Some(self.scenario.max_cycles)
            },
        }
    }
}
