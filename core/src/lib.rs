//! Scanning and monitoring services: the probe dispatcher, the OS
//! neighbor-table seam, sweep orchestration, and the single-target presence
//! monitor.
//!
//! The pieces talk to each other through the [`probe::Prober`] and
//! [`neighbors::NeighborTable`] traits, so everything above the OS boundary
//! can be driven with mock collaborators in tests.

pub mod monitor;
pub mod neighbors;
pub mod probe;
pub mod scan;
