//! Backend test support utilities
//!
//! This crate provides helpers shared by the portal backend's integration
//! tests: unified logging initialization, problem-details assertions and
//! unique test data generators.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
