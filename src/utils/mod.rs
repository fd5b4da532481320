//! Utility functions and helpers.
//!
//! Currently this holds logging setup shared by the binary and embedders.

pub mod logging;
