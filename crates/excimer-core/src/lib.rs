//! Core types for the Excimer kinetic Monte Carlo engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by the lattice and engine crates:
//! lattice coordinates, strongly-typed identifiers, and the physical
//! constants used by the rate equations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod coords;
pub mod id;

pub use constants::{BOLTZMANN_EV_PER_K, CUTOFF_TOLERANCE_NM};
pub use coords::Coords;
pub use id::{InstanceId, ParticleTag};
