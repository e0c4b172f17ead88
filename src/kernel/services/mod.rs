//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the crate (kernel-facing).
//! - `adapters`: IO/runtime specific implementations.

pub mod adapters;
pub mod ports;
