//! Background recommendation sweeps.
//!
//! The binary either runs a single sweep (for an external scheduler) or
//! loops on a fixed interval until shut down.

pub mod config;
pub mod shutdown;
pub mod sweep;
