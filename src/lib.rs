//! ChakraTrack - Kalman tracking of a point rotating on a circle.
//!
//! Recovers the full hidden state (angle, angular velocity) of a point
//! moving at roughly constant angular velocity, observed only through a
//! noisy angle measurement, using a recursive linear Kalman estimator.
//!
//! # Architecture
//!
//! The crate is organized into 5 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   session/                          │  ← Orchestration
//! │        (state machine, cycle loop, metrics)         │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     io/                             │  ← Boundaries
//! │          (renderer + input source traits)           │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │              filter/          sim/                  │  ← Algorithms
//! │       (model, estimator)  (noise, truth)            │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │              (matrix, math, types)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Rendering, windowing and key handling live behind the [`io::Renderer`]
//! and [`io::InputSource`] traits; the core never touches them directly.
//!
//! # Example
//!
//! ```
//! use chakra_track::io::{InputEvent, NullRenderer, ScriptedInput};
//! use chakra_track::session::{TrackingSession, TrackingSessionConfig};
//! use std::time::Duration;
//!
//! let config = TrackingSessionConfig {
//!     seed: 42,
//!     max_cycles: Some(200),
//!     cycle_period: Duration::ZERO,
//!     ..Default::default()
//! };
//! let mut session = TrackingSession::new(config).unwrap();
//! let summary = session
//!     .run(&mut NullRenderer, &mut ScriptedInput::default())
//!     .unwrap();
//! assert!(summary.rmse_corrected < summary.rmse_measured);
//! ```

// Layer 1: Core foundation (no internal deps)
pub mod core;

// Layer 2: Algorithms (depend on core)
pub mod filter;
pub mod sim;

// Layer 3: Boundaries and metrics
pub mod io;
pub mod metrics;

// Layer 4: Orchestration
pub mod session;

// Layer 5: Configuration and errors
pub mod config;
pub mod error;

// Convenience re-exports (flat namespace for common use)
pub use crate::core::matrix::Matrix;
pub use crate::core::types::{Point2D, PointRole, TrackedFrame};
pub use config::TrackerConfig;
pub use error::{Error, Result};
pub use filter::{KalmanEstimator, LinearGaussianModel};
pub use metrics::{MetricsSummary, TrackingMetrics};
pub use session::{SessionState, TrackingSession, TrackingSessionConfig};
pub use sim::{NoiseGenerator, ProcessSimulator};
