//! Linear-Gaussian process and measurement model.
//!
//! Holds the fixed matrices describing the system dynamics and the
//! measurement projection, plus the noise covariances. Immutable for the
//! lifetime of a run; a reset constructs a fresh instance with the same
//! matrices. Only the state resets, never the model.

use crate::core::matrix::Matrix;
use crate::error::{Error, Result};

/// Fixed matrices of a linear dynamical system with Gaussian noise.
///
/// State dimension `n` and measurement dimension `m` are implied by the
/// matrix shapes and validated once at construction:
///
/// - `transition`: n×n, maps state at step k to step k+1 absent noise
/// - `process_noise_cov`: n×n PSD, additive process noise per step
/// - `measurement_map`: m×n, projects state to expected measurement
/// - `measurement_noise_cov`: m×m PSD, additive measurement noise
#[derive(Debug, Clone)]
pub struct LinearGaussianModel {
    transition: Matrix,
    process_noise_cov: Matrix,
    measurement_map: Matrix,
    measurement_noise_cov: Matrix,
}

impl LinearGaussianModel {
    /// Build a model from explicit matrices, validating shape consistency.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the transition matrix is
    /// not square, any other shape disagrees with the implied `n`/`m`, or a
    /// noise covariance carries a negative diagonal entry.
    pub fn new(
        transition: Matrix,
        process_noise_cov: Matrix,
        measurement_map: Matrix,
        measurement_noise_cov: Matrix,
    ) -> Result<Self> {
        if transition.rows() != transition.cols() {
            return Err(Error::DimensionMismatch {
                context: "transition",
                expected: "square".to_string(),
                actual: transition.shape(),
            });
        }
        let n = transition.rows();
        let m = measurement_map.rows();

        if process_noise_cov.rows() != n || process_noise_cov.cols() != n {
            return Err(Error::DimensionMismatch {
                context: "process_noise_cov",
                expected: format!("{}x{}", n, n),
                actual: process_noise_cov.shape(),
            });
        }
        if measurement_map.cols() != n || m == 0 {
            return Err(Error::DimensionMismatch {
                context: "measurement_map",
                expected: format!("Mx{} with M >= 1", n),
                actual: measurement_map.shape(),
            });
        }
        if measurement_noise_cov.rows() != m || measurement_noise_cov.cols() != m {
            return Err(Error::DimensionMismatch {
                context: "measurement_noise_cov",
                expected: format!("{}x{}", m, m),
                actual: measurement_noise_cov.shape(),
            });
        }

        // Negative variance is a configuration error, caught here rather
        // than at sampling time.
        for (name, cov) in [
            ("process_noise_cov", &process_noise_cov),
            ("measurement_noise_cov", &measurement_noise_cov),
        ] {
            if cov.diag().iter().any(|&v| v < 0.0) {
                return Err(Error::DimensionMismatch {
                    context: name,
                    expected: "non-negative diagonal".to_string(),
                    actual: format!("{:?}", cov.diag()),
                });
            }
        }

        Ok(Self {
            transition,
            process_noise_cov,
            measurement_map,
            measurement_noise_cov,
        })
    }

    /// Reference constant-velocity model for the rotating-point scenario.
    ///
    /// State is (angle, angular velocity) with transition
    /// `[[1, 1], [0, 1]]` (angle += velocity, velocity constant), and only
    /// the angle is observed (`H = [1, 0]`). Noise covariances are
    /// `variance * I` on their respective dimensions.
    pub fn constant_velocity(process_noise_var: f32, measurement_noise_var: f32) -> Result<Self> {
        let transition =
            Matrix::from_rows(2, 2, vec![1.0, 1.0, 0.0, 1.0]).expect("static shape");
        let measurement_map = Matrix::from_rows(1, 2, vec![1.0, 0.0]).expect("static shape");
        Self::new(
            transition,
            Matrix::scaled_identity(2, process_noise_var),
            measurement_map,
            Matrix::scaled_identity(1, measurement_noise_var),
        )
    }

    /// State dimension n.
    #[inline]
    pub fn state_dim(&self) -> usize {
        self.transition.rows()
    }

    /// Measurement dimension m.
    #[inline]
    pub fn measurement_dim(&self) -> usize {
        self.measurement_map.rows()
    }

    /// State transition matrix F (n×n).
    #[inline]
    pub fn transition(&self) -> &Matrix {
        &self.transition
    }

    /// Process noise covariance Q (n×n).
    #[inline]
    pub fn process_noise_cov(&self) -> &Matrix {
        &self.process_noise_cov
    }

    /// Measurement projection H (m×n).
    #[inline]
    pub fn measurement_map(&self) -> &Matrix {
        &self.measurement_map
    }

    /// Measurement noise covariance R (m×m).
    #[inline]
    pub fn measurement_noise_cov(&self) -> &Matrix {
        &self.measurement_noise_cov
    }
}
