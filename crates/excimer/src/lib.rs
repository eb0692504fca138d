//! Excimer: lattice kinetic Monte Carlo simulation of exciton diffusion.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Excimer sub-crates. For most users, adding `excimer` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use excimer::prelude::*;
//!
//! // A 10 nm periodic cube with 1 nm sites, run until five excitons
//! // have recombined.
//! let config = SimConfig {
//!     lattice: LatticeParams {
//!         length: 10,
//!         width: 10,
//!         height: 10,
//!         unit_size: 1.0,
//!         boundaries: [Boundary::Periodic; 3],
//!     },
//!     generation_rate: 1e26,
//!     lifetime: 1e-9,
//!     hop_prefactor: 1e10,
//!     hop_cutoff: 2.0,
//!     recalc_cutoff: 4.0,
//!     target_recombinations: 5,
//!     seed: 7,
//!     ..SimConfig::default()
//! };
//! let mut sim = Simulation::new(config, InstanceId(0)).unwrap();
//! let summary = sim.run().unwrap();
//! assert_eq!(summary.particles_recombined, 5);
//! assert!(summary.mean_diffusion_length().is_some());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `excimer-core` | Coordinates, ids, physical constants |
//! | [`lattice`] | `excimer-lattice` | The site lattice, boundaries, disorder models |
//! | [`engine`] | `excimer-engine` | Events, scheduling, and the simulation driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinates, ids, and physical constants (`excimer-core`).
pub use excimer_core as types;

/// The site lattice, boundary behavior, and energetic disorder models
/// (`excimer-lattice`).
///
/// Provides [`lattice::Lattice`], built from [`lattice::LatticeParams`],
/// and the [`lattice::DisorderModel`] density-of-states generators.
pub use excimer_lattice as lattice;

/// Events, rate calculation, scheduling, and the simulation driver
/// (`excimer-engine`).
///
/// [`engine::Simulation`] is the main entry point; independent seeded
/// instances reduce through [`engine::RunSummary::merge`].
pub use excimer_engine as engine;

/// Common imports for typical Excimer usage.
///
/// ```rust
/// use excimer::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use excimer_core::{Coords, InstanceId, ParticleTag};

    // Lattice construction
    pub use excimer_lattice::{Boundary, DisorderModel, Lattice, LatticeError, LatticeParams};

    // Engine
    pub use excimer_engine::{
        BufferSink, ConfigError, DiagnosticSink, RunSummary, SimConfig, SimState, Simulation,
        StepError,
    };
}
