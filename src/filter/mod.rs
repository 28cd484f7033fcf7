//! Linear state estimation: the model description and the Kalman estimator.

pub mod kalman;
pub mod model;

pub use kalman::KalmanEstimator;
pub use model::LinearGaussianModel;
