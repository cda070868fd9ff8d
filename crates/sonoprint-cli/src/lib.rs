//! Sonoprint CLI library.
//!
//! Command implementations and shared input loading for the `sonoprint`
//! binary.

pub mod commands;
pub mod input;
pub mod logging;
