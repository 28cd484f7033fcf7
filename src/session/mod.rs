//! Tracking session orchestration.
//!
//! Drives one tracking run: the simulator advances the hidden truth, the
//! estimator runs its predict/correct cycle against the noisy angle
//! measurements, and the three estimated points plus the truth are emitted
//! to the renderer each cycle.
//!
//! # State Machine
//!
//! ```text
//! ┌─────────┐  reset input   ┌──────────────┐
//! │ Running │ ─────────────▶ │ ResetPending │
//! │         │ ◀───────────── │              │
//! └────┬────┘  reinitialized └──────────────┘
//!      │ stop input
//!      ▼
//! ┌─────────┐
//! │ Stopped │  (terminal)
//! └─────────┘
//! ```
//!
//! Any other input is a no-op that stays in `Running`. Filter errors abort
//! the run, wrapped with the failing cycle number.

use crate::core::math::circle_point;
use crate::core::matrix::Matrix;
use crate::core::types::{Point2D, TrackedFrame};
use crate::error::Result;
use crate::filter::{KalmanEstimator, LinearGaussianModel};
use crate::io::{InputEvent, InputSource, Renderer};
use crate::metrics::{MetricsSummary, TrackingMetrics};
use crate::sim::ProcessSimulator;
use std::f32::consts::PI;
use std::time::Duration;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Normal cycling.
    #[default]
    Running,
    /// Reset requested; components are being reinitialized.
    ResetPending,
    /// Terminal: the session has ended.
    Stopped,
}

/// Configuration for a tracking session.
///
/// Defaults reproduce the reference rotating-point scenario.
#[derive(Debug, Clone)]
pub struct TrackingSessionConfig {
    /// Process noise variance per state component.
    /// Default: 1e-5
    pub process_noise_var: f32,
    /// Measurement noise variance.
    /// Default: 1e-1
    pub measurement_noise_var: f32,
    /// Initial true angle (radians).
    /// Default: 0.0
    pub initial_angle: f32,
    /// Initial true angular velocity (radians per cycle).
    /// Default: 2π/6
    pub initial_velocity: f32,
    /// Prior mean for the estimator: (angle, angular velocity).
    /// Default: (0.0, 0.0)
    pub prior_mean: (f32, f32),
    /// Scale of the identity prior covariance.
    /// Default: 1.0
    pub prior_cov_scale: f32,
    /// Noise seed; 0 draws from entropy.
    pub seed: u64,
    /// Side length of the square canvas the points are projected onto.
    /// Default: 800.0 (circle radius is a third of this)
    pub image_size: f32,
    /// Cycle period; also the input polling timeout.
    /// Default: 1 s
    pub cycle_period: Duration,
    /// Stop automatically after this many cycles in the current run.
    /// Default: None (run until stop input)
    pub max_cycles: Option<u64>,
}

impl Default for TrackingSessionConfig {
    fn default() -> Self {
        Self {
            process_noise_var: 1e-5,
            measurement_noise_var: 1e-1,
            initial_angle: 0.0,
            initial_velocity: 2.0 * PI / 6.0,
            prior_mean: (0.0, 0.0),
            prior_cov_scale: 1.0,
            seed: 0,
            image_size: 800.0,
            cycle_period: Duration::from_secs(1),
            max_cycles: None,
        }
    }
}

impl TrackingSessionConfig {
    /// Circle center (canvas midpoint).
    fn center(&self) -> Point2D {
        Point2D::new(self.image_size * 0.5, self.image_size * 0.5)
    }

    /// Circle radius (a third of the canvas).
    fn radius(&self) -> f32 {
        self.image_size / 3.0
    }
}

/// One tracking run: model, estimator, simulator and metrics, driven by
/// the `Running`/`ResetPending`/`Stopped` state machine.
pub struct TrackingSession {
    config: TrackingSessionConfig,
    estimator: KalmanEstimator,
    simulator: ProcessSimulator,
    metrics: TrackingMetrics,
    state: SessionState,
    cycle: u64,
}

impl TrackingSession {
    /// Build a session from configuration.
    ///
    /// Constructs the model, seeds the simulator's ground truth and
    /// initializes the estimator with the configured prior.
    pub fn new(config: TrackingSessionConfig) -> Result<Self> {
        let (estimator, simulator) = Self::build_components(&config)?;
        Ok(Self {
            config,
            estimator,
            simulator,
            metrics: TrackingMetrics::new(),
            state: SessionState::Running,
            cycle: 0,
        })
    }

    fn build_components(
        config: &TrackingSessionConfig,
    ) -> Result<(KalmanEstimator, ProcessSimulator)> {
        let model = LinearGaussianModel::constant_velocity(
            config.process_noise_var,
            config.measurement_noise_var,
        )?;

        let mut estimator = KalmanEstimator::new(model.clone());
        estimator.initialize(
            vec![config.prior_mean.0, config.prior_mean.1],
            Matrix::scaled_identity(2, config.prior_cov_scale),
        )?;

        let simulator = ProcessSimulator::new(
            model,
            vec![config.initial_angle, config.initial_velocity],
            config.seed,
        )?;

        Ok((estimator, simulator))
    }

    /// Restart the run: fresh model, simulator and estimator from the same
    /// configuration. Only state resets; the configuration never changes.
    fn reinitialize(&mut self) -> Result<()> {
        let (estimator, simulator) = Self::build_components(&self.config)?;
        self.estimator = estimator;
        self.simulator = simulator;
        self.metrics.clear();
        self.cycle = 0;
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Cycle number of the current run.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Accuracy metrics accumulated over the current run.
    pub fn metrics(&self) -> MetricsSummary {
        self.metrics.summary()
    }

    /// Execute one tracking cycle and return the frame for rendering.
    ///
    /// Order per cycle: predict, advance the truth and derive a measurement
    /// from it, correct. All four emitted points refer to the advanced
    /// truth, so their on-screen distances reflect estimation error.
    /// Filter errors are wrapped with the failing cycle number.
    pub fn step(&mut self) -> Result<TrackedFrame> {
        let center = self.config.center();
        let radius = self.config.radius();

        let predicted = self
            .estimator
            .predict()
            .map_err(|e| e.at_cycle(self.cycle))?;

        self.simulator.advance();
        let measurement = self.simulator.measure();

        let corrected = self
            .estimator
            .correct(&measurement)
            .map_err(|e| e.at_cycle(self.cycle))?;

        let truth = self.simulator.truth()[0];
        self.metrics
            .record(truth, measurement[0], predicted[0], corrected[0]);

        let frame = TrackedFrame {
            cycle: self.cycle,
            truth: circle_point(center, radius, truth),
            measured: circle_point(center, radius, measurement[0]),
            predicted: circle_point(center, radius, predicted[0]),
            corrected: circle_point(center, radius, corrected[0]),
        };
        self.cycle += 1;
        Ok(frame)
    }

    /// Drive the session until a stop input, the cycle limit, or an error.
    ///
    /// Each cycle emits one frame to the renderer, then polls the input
    /// source for at most one cycle period. Returns the final metrics of
    /// the last run.
    pub fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        input: &mut dyn InputSource,
    ) -> Result<MetricsSummary> {
        while self.state == SessionState::Running {
            if let Some(limit) = self.config.max_cycles {
                if self.cycle >= limit {
                    log::info!("cycle limit {} reached, stopping", limit);
                    self.state = SessionState::Stopped;
                    break;
                }
            }

            let frame = self.step()?;
            renderer.render(&frame);

            match input.poll(self.config.cycle_period) {
                InputEvent::Stop => {
                    log::info!("stop requested at cycle {}", self.cycle);
                    self.state = SessionState::Stopped;
                }
                InputEvent::Reset => {
                    log::info!("reset requested at cycle {}", self.cycle);
                    self.state = SessionState::ResetPending;
                    self.reinitialize()?;
                    self.state = SessionState::Running;
                }
                InputEvent::None => {}
            }
        }

        let summary = self.metrics.summary();
        log::info!(
            "run ended after {} cycles: rmse measured={:.4} predicted={:.4} corrected={:.4}",
            summary.cycles,
            summary.rmse_measured,
            summary.rmse_predicted,
            summary.rmse_corrected,
        );
        Ok(summary)
    }
}
