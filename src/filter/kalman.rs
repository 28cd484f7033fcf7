//! Recursive linear state estimator (Kalman filter).
//!
//! Maintains a state estimate and its covariance, refined each cycle by a
//! predict/correct pair:
//!
//! 1. **Predict**: propagate the estimate through the process model,
//!    growing uncertainty by the process noise.
//! 2. **Correct**: fuse a new measurement, weighting the innovation by the
//!    Kalman gain computed from the relative uncertainties.
//!
//! The estimator is dimension-generic (n state components, m measurement
//! components); the rotating-point demo runs it with n=2, m=1.

use crate::core::matrix::Matrix;
use crate::error::{Error, Result};
use crate::filter::model::LinearGaussianModel;

/// State estimate with its covariance.
#[derive(Debug, Clone)]
struct Estimate {
    mean: Vec<f32>,
    covariance: Matrix,
}

/// Linear Kalman estimator over a [`LinearGaussianModel`].
///
/// Must be initialized with a prior before the first `predict`/`correct`;
/// re-initializing resets the estimate for a new run. Calling `predict`
/// repeatedly without an intervening `correct` is legal and coasts the
/// prior through missing measurements.
#[derive(Debug, Clone)]
pub struct KalmanEstimator {
    model: LinearGaussianModel,
    estimate: Option<Estimate>,
}

impl KalmanEstimator {
    /// Create an estimator for the given model. No prior is set yet.
    pub fn new(model: LinearGaussianModel) -> Self {
        Self {
            model,
            estimate: None,
        }
    }

    /// Set (or reset) the prior mean and covariance.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the prior shapes disagree
    /// with the model's state dimension.
    pub fn initialize(&mut self, prior_mean: Vec<f32>, prior_covariance: Matrix) -> Result<()> {
        let n = self.model.state_dim();
        if prior_mean.len() != n {
            return Err(Error::DimensionMismatch {
                context: "prior_mean",
                expected: format!("{}", n),
                actual: format!("{}", prior_mean.len()),
            });
        }
        if prior_covariance.rows() != n || prior_covariance.cols() != n {
            return Err(Error::DimensionMismatch {
                context: "prior_covariance",
                expected: format!("{}x{}", n, n),
                actual: prior_covariance.shape(),
            });
        }
        self.estimate = Some(Estimate {
            mean: prior_mean,
            covariance: prior_covariance,
        });
        Ok(())
    }

    /// Whether the estimator has been initialized.
    pub fn is_initialized(&self) -> bool {
        self.estimate.is_some()
    }

    /// Prediction step: advance the estimate one step through the dynamics.
    ///
    /// ```text
    /// x ← F·x
    /// P ← F·P·Fᵀ + Q
    /// ```
    ///
    /// Returns the a-priori state estimate. Fails with
    /// [`Error::NotInitialized`] before [`initialize`](Self::initialize).
    pub fn predict(&mut self) -> Result<Vec<f32>> {
        let est = self.estimate.as_mut().ok_or(Error::NotInitialized)?;
        let f = self.model.transition();

        est.mean = f.mul_vec(&est.mean);
        est.covariance = f
            .mul(&est.covariance)
            .mul(&f.transpose())
            .add(self.model.process_noise_cov());

        Ok(est.mean.clone())
    }

    /// Correction step: fuse a measurement into the estimate.
    ///
    /// ```text
    /// y = z − H·x            (innovation)
    /// S = H·P·Hᵀ + R         (innovation covariance)
    /// K = P·Hᵀ·S⁻¹           (Kalman gain)
    /// x ← x + K·y
    /// P ← (I − K·H)·P
    /// ```
    ///
    /// Returns the a-posteriori state estimate. Fails with
    /// [`Error::NotInitialized`] before initialization,
    /// [`Error::DimensionMismatch`] if the measurement length disagrees
    /// with the model, and [`Error::SingularInnovationCovariance`] if S is
    /// not invertible, which indicates a degenerate noise configuration
    /// the caller should treat as a defect, not retry.
    pub fn correct(&mut self, measurement: &[f32]) -> Result<Vec<f32>> {
        let m = self.model.measurement_dim();
        if measurement.len() != m {
            return Err(Error::DimensionMismatch {
                context: "measurement",
                expected: format!("{}", m),
                actual: format!("{}", measurement.len()),
            });
        }
        let est = self.estimate.as_mut().ok_or(Error::NotInitialized)?;
        let h = self.model.measurement_map();
        let ht = h.transpose();

        // Innovation y = z - H·x
        let expected = h.mul_vec(&est.mean);
        let innovation: Vec<f32> = measurement
            .iter()
            .zip(expected.iter())
            .map(|(z, e)| z - e)
            .collect();

        // S = H·P·Hᵀ + R
        let s = h
            .mul(&est.covariance)
            .mul(&ht)
            .add(self.model.measurement_noise_cov());
        let s_inv = s
            .inverse()
            .ok_or(Error::SingularInnovationCovariance)?;

        // K = P·Hᵀ·S⁻¹
        let gain = est.covariance.mul(&ht).mul(&s_inv);

        // x ← x + K·y
        let shift = gain.mul_vec(&innovation);
        for (x, dx) in est.mean.iter_mut().zip(shift.iter()) {
            *x += dx;
        }

        // P ← (I − K·H)·P
        let n = self.model.state_dim();
        let i_minus_kh = Matrix::identity(n).sub(&gain.mul(h));
        est.covariance = i_minus_kh.mul(&est.covariance);

        Ok(est.mean.clone())
    }

    /// Current state estimate, if initialized.
    pub fn state(&self) -> Option<&[f32]> {
        self.estimate.as_ref().map(|e| e.mean.as_slice())
    }

    /// Current estimate covariance, if initialized.
    pub fn covariance(&self) -> Option<&Matrix> {
        self.estimate.as_ref().map(|e| &e.covariance)
    }

    /// The model this estimator runs on.
    pub fn model(&self) -> &LinearGaussianModel {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_estimator() -> KalmanEstimator {
        let model = LinearGaussianModel::constant_velocity(1e-5, 1e-1).unwrap();
        let mut est = KalmanEstimator::new(model);
        est.initialize(vec![0.0, 0.5], Matrix::identity(2)).unwrap();
        est
    }

    #[test]
    fn test_predict_before_initialize_fails() {
        let model = LinearGaussianModel::constant_velocity(1e-5, 1e-1).unwrap();
        let mut est = KalmanEstimator::new(model);
        assert!(matches!(est.predict(), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_correct_before_initialize_fails() {
        let model = LinearGaussianModel::constant_velocity(1e-5, 1e-1).unwrap();
        let mut est = KalmanEstimator::new(model);
        assert!(matches!(est.correct(&[0.0]), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_predict_applies_transition() {
        let mut est = reference_estimator();
        let state = est.predict().unwrap();
        // angle += velocity, velocity constant
        assert_relative_eq!(state[0], 0.5);
        assert_relative_eq!(state[1], 0.5);
    }

    #[test]
    fn test_predict_grows_covariance_trace() {
        let mut est = reference_estimator();
        let mut prev = est.covariance().unwrap().trace();
        for _ in 0..10 {
            est.predict().unwrap();
            let trace = est.covariance().unwrap().trace();
            assert!(
                trace >= prev,
                "trace decreased under prediction: {} -> {}",
                prev,
                trace
            );
            prev = trace;
        }
    }

    #[test]
    fn test_correct_shrinks_covariance_trace() {
        let mut est = reference_estimator();
        est.predict().unwrap();
        let before = est.covariance().unwrap().trace();
        est.correct(&[0.4]).unwrap();
        let after = est.covariance().unwrap().trace();
        assert!(
            after <= before,
            "trace grew under correction: {} -> {}",
            before,
            after
        );
    }

    #[test]
    fn test_correct_moves_toward_measurement() {
        let mut est = reference_estimator();
        est.predict().unwrap();
        let prior_angle = est.state().unwrap()[0];
        let z = prior_angle + 1.0;
        let state = est.correct(&[z]).unwrap();
        assert!(state[0] > prior_angle, "correction ignored the innovation");
        assert!(state[0] < z, "correction overshot the measurement");
    }

    #[test]
    fn test_repeated_predict_coasts() {
        let mut est = reference_estimator();
        est.predict().unwrap();
        est.predict().unwrap();
        let state = est.predict().unwrap();
        assert_relative_eq!(state[0], 1.5);
        assert_relative_eq!(state[1], 0.5);
    }

    #[test]
    fn test_singular_innovation_covariance() {
        // Zero measurement noise with zero prior uncertainty in the
        // observed subspace makes S = 0.
        let model = LinearGaussianModel::new(
            Matrix::identity(2),
            Matrix::zeros(2, 2),
            Matrix::from_rows(1, 2, vec![1.0, 0.0]).unwrap(),
            Matrix::zeros(1, 1),
        )
        .unwrap();
        let mut est = KalmanEstimator::new(model);
        est.initialize(vec![0.0, 0.0], Matrix::zeros(2, 2)).unwrap();
        est.predict().unwrap();
        assert!(matches!(
            est.correct(&[0.1]),
            Err(Error::SingularInnovationCovariance)
        ));
    }

    #[test]
    fn test_measurement_length_validated() {
        let mut est = reference_estimator();
        est.predict().unwrap();
        assert!(matches!(
            est.correct(&[0.0, 1.0]),
            Err(Error::DimensionMismatch { context: "measurement", .. })
        ));
    }

    #[test]
    fn test_reinitialize_resets_estimate() {
        let mut est = reference_estimator();
        est.predict().unwrap();
        est.correct(&[0.7]).unwrap();
        est.initialize(vec![0.0, 0.5], Matrix::identity(2)).unwrap();
        assert_relative_eq!(est.state().unwrap()[0], 0.0);
        assert_relative_eq!(est.covariance().unwrap().trace(), 2.0);
    }

    #[test]
    fn test_covariance_stays_symmetric() {
        let mut est = reference_estimator();
        for i in 0..50 {
            est.predict().unwrap();
            est.correct(&[i as f32 * 0.5]).unwrap();
        }
        let p = est.covariance().unwrap();
        let asym = (p.get(0, 1) - p.get(1, 0)).abs();
        assert!(asym < 1e-4, "covariance drifted asymmetric: {}", asym);
    }
}
