//! Event variants and waiting-time sampling.

use excimer_core::Coords;
use rand::Rng;

/// The closed set of things that can happen in the simulation.
///
/// Dispatch is always an exhaustive `match`; each variant carries only
/// the data its execution needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    /// A new particle appears at a random unoccupied site.
    Creation,
    /// A particle moves to `destination`.
    Hop {
        /// Where the particle lands (already boundary-resolved).
        destination: Coords,
        /// The raw lattice displacement `(di, dj, dk)` that produced the
        /// destination. Kept so periodic crossings accumulate exactly in
        /// the particle's net-displacement record instead of being
        /// reconstructed ambiguously from wrapped coordinates.
        displacement: [i32; 3],
    },
    /// A particle is removed and its net displacement recorded.
    Recombination,
}

/// An event with its rate constant and sampled absolute execution time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledEvent {
    /// What will happen.
    pub kind: EventKind,
    /// First-order rate constant (1/s) the time was drawn from.
    pub rate_constant: f64,
    /// Absolute simulation time (s) at which the event fires.
    pub execution_time: f64,
}

impl ScheduledEvent {
    /// Build an event by drawing an exponential waiting time for `rate`
    /// starting from the current `clock`.
    ///
    /// Draws use the live clock at (re)calculation time; the exponential
    /// distribution is memoryless, so resampling on recalculation does
    /// not bias the dynamics.
    pub fn sample<R: Rng>(kind: EventKind, rate: f64, clock: f64, rng: &mut R) -> Self {
        debug_assert!(rate > 0.0, "rate constant must be positive, got {rate}");
        let u: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
        Self {
            kind,
            rate_constant: rate,
            execution_time: clock + (-u.ln()) / rate,
        }
    }
}
