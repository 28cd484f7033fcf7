//! Synthetic process simulation: seedable noise and ground-truth dynamics.

pub mod noise;
pub mod process;

pub use noise::NoiseGenerator;
pub use process::ProcessSimulator;
