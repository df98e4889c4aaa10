//! Glossa CLI library
//!
//! Command implementations, input resolution, output formatting and
//! progress reporting for the `glossa` binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
