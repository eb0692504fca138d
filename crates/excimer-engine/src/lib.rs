//! The Excimer kinetic Monte Carlo engine.
//!
//! Implements First-Reaction-Method KMC for exciton creation, hopping,
//! and recombination on a 3D lattice: each live particle holds exactly
//! one scheduled event at all times, the global minimum execution time
//! wins each step, and only particles near the touched sites are
//! recalculated afterwards.
//!
//! The entry point is [`Simulation`], constructed from a validated
//! [`SimConfig`]. One instance is strictly sequential; batches are run
//! as independent instances with distinct [`InstanceId`]s and their
//! [`RunSummary`] values merged afterwards.
//!
//! [`InstanceId`]: excimer_core::InstanceId

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod calculator;
pub mod config;
pub mod diag;
pub mod event;
pub mod particle;
pub mod recalc;
pub mod schedule;
pub mod sim;
pub mod summary;

pub use calculator::{compute_next_event, enumerate_hops, HopCandidate, RateParams};
pub use config::{ConfigError, SimConfig};
pub use diag::{BufferSink, DiagnosticSink};
pub use event::{EventKind, ScheduledEvent};
pub use particle::{Particle, ParticleRegistry};
pub use recalc::{affected_particles, RecalcPolicy};
pub use schedule::{EventChoice, EventSchedule};
pub use sim::{SimState, Simulation, StepError};
pub use summary::RunSummary;
