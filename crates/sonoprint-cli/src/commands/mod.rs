//! Command implementations for the Sonoprint CLI.

pub mod aggregate;
pub mod animate;
pub mod inspect;
pub mod render;
