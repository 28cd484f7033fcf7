//! Tracking accuracy metrics.
//!
//! Accumulates per-channel angular errors against ground truth over a run.
//! If the filter works correctly the expected ordering is
//! RMSE(corrected) ≤ RMSE(predicted) ≤ RMSE(measured).

use crate::core::math::angle_diff;

/// Running RMS angular error for the three tracked channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackingMetrics {
    count: usize,
    sum_sq_measured: f64,
    sum_sq_predicted: f64,
    sum_sq_corrected: f64,
}

/// Snapshot of accumulated metrics at the end of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSummary {
    /// Number of cycles accumulated
    pub cycles: usize,
    /// RMS angular error of the raw measurement (radians)
    pub rmse_measured: f32,
    /// RMS angular error of the a-priori estimate (radians)
    pub rmse_predicted: f32,
    /// RMS angular error of the a-posteriori estimate (radians)
    pub rmse_corrected: f32,
}

impl TrackingMetrics {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all accumulated data.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Record one cycle's angles, all in radians.
    ///
    /// Errors are taken as shortest angular differences against the truth,
    /// so accumulated wrap-around does not inflate them.
    pub fn record(&mut self, truth: f32, measured: f32, predicted: f32, corrected: f32) {
        self.count += 1;
        self.sum_sq_measured += (angle_diff(truth, measured) as f64).powi(2);
        self.sum_sq_predicted += (angle_diff(truth, predicted) as f64).powi(2);
        self.sum_sq_corrected += (angle_diff(truth, corrected) as f64).powi(2);
    }

    /// Number of recorded cycles.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Summarize the run so far.
    pub fn summary(&self) -> MetricsSummary {
        let rmse = |sum_sq: f64| {
            if self.count == 0 {
                0.0
            } else {
                (sum_sq / self.count as f64).sqrt() as f32
            }
        };
        MetricsSummary {
            cycles: self.count,
            rmse_measured: rmse(self.sum_sq_measured),
            rmse_predicted: rmse(self.sum_sq_predicted),
            rmse_corrected: rmse(self.sum_sq_corrected),
        }
    }
}
