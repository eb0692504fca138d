//! 3D lattice geometry and energetic disorder for Excimer simulations.
//!
//! This crate owns everything spatial: the [`Lattice`] grid with per-axis
//! [`Boundary`] behavior, site occupancy, coordinate/index mapping,
//! minimum-image distance math, and the [`DisorderModel`] density-of-states
//! generators that assign per-site energies before a run starts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod dos;
pub mod error;
pub mod lattice;

pub use boundary::Boundary;
pub use dos::DisorderModel;
pub use error::LatticeError;
pub use lattice::{Lattice, LatticeParams};
