//! Core foundation: matrix arithmetic, angular math, shared types.

pub mod math;
pub mod matrix;
pub mod types;
