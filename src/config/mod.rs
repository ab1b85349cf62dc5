//! Run-level configuration.

pub mod options;
pub use options::{OptionsError, RunOptions, DEFAULT_RUN_TOL, MIN_TOL};
