//! Per-particle rate and event calculation.
//!
//! For a particle at a given site this module enumerates every hop
//! destination within the cutoff, computes Forster-type transfer rates,
//! samples a waiting time for each candidate plus one recombination
//! candidate, and keeps the earliest (First Reaction Method).

use crate::event::{EventKind, ScheduledEvent};
use crate::particle::Particle;
use excimer_core::{Coords, BOLTZMANN_EV_PER_K};
use excimer_lattice::Lattice;
use rand::Rng;

/// Rate-law parameters shared by every event calculation in one
/// simulation instance.
///
/// Owned by the engine and passed explicitly, so multiple instances can
/// run concurrently without shared statics.
#[derive(Clone, Debug)]
pub struct RateParams {
    /// Temperature (K) entering the Boltzmann factor for uphill hops.
    pub temperature: f64,
    /// Attempt-to-hop frequency prefactor (1/s).
    pub hop_prefactor: f64,
    /// Maximum real hop distance (nm).
    pub hop_cutoff: f64,
    /// Tolerance (nm) applied at the cutoff boundary.
    pub cutoff_tolerance: f64,
    /// Cube half-width in lattice units: `ceil(hop_cutoff / unit_size)`.
    pub hop_range: i32,
}

impl RateParams {
    /// Forster resonant energy transfer rate for a hop of `distance` nm
    /// with site-energy difference `e_delta` eV.
    ///
    /// Uphill hops (`e_delta > 0`) are Boltzmann-suppressed; downhill and
    /// isoenergetic hops keep the bare distance-law rate. The asymmetry is
    /// deliberate: this rate law is not detailed balance.
    pub fn forster_rate(&self, distance: f64, e_delta: f64) -> f64 {
        let mut rate = self.hop_prefactor * (1.0 / distance).powi(6);
        if e_delta > 0.0 {
            rate *= (-e_delta / (BOLTZMANN_EV_PER_K * self.temperature)).exp();
        }
        rate
    }
}

/// One valid hop destination with its precomputed rate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HopCandidate {
    /// Boundary-resolved destination site.
    pub destination: Coords,
    /// Raw lattice displacement `(di, dj, dk)` of the move.
    pub displacement: [i32; 3],
    /// Real move distance in nm.
    pub distance_nm: f64,
    /// Forster hop rate constant (1/s).
    pub rate_constant: f64,
}

/// Enumerate every valid hop candidate from `origin`.
///
/// Scans the cube of integer offsets with half-width
/// [`RateParams::hop_range`], excluding the zero offset, in ascending
/// `i -> j -> k` order (the order is part of the determinism contract:
/// it fixes how many RNG draws [`compute_next_event`] consumes and in
/// what sequence). An offset survives when the move is valid (site
/// exists and is unoccupied) and its real distance is within
/// `hop_cutoff + tolerance`.
pub fn enumerate_hops(lattice: &Lattice, params: &RateParams, origin: Coords) -> Vec<HopCandidate> {
    let range = params.hop_range;
    let mut candidates = Vec::new();
    let origin_energy = lattice.energy(origin);
    for i in -range..=range {
        for j in -range..=range {
            for k in -range..=range {
                if i == 0 && j == 0 && k == 0 {
                    continue;
                }
                if !lattice.is_move_valid(origin, i, j, k) {
                    continue;
                }
                let distance =
                    lattice.unit_size() * f64::from(i * i + j * j + k * k).sqrt();
                if distance - params.cutoff_tolerance > params.hop_cutoff {
                    continue;
                }
                // is_move_valid already confirmed the destination exists.
                let destination = lattice
                    .destination(origin, i, j, k)
                    .expect("validated move has a destination");
                let e_delta = lattice.energy(destination) - origin_energy;
                candidates.push(HopCandidate {
                    destination,
                    displacement: [i, j, k],
                    distance_nm: distance,
                    rate_constant: params.forster_rate(distance, e_delta),
                });
            }
        }
    }
    candidates
}

/// Compute the winning next event for one particle.
///
/// Samples an independent waiting time for every hop candidate and for
/// the particle's recombination, all measured from the live `clock`,
/// and returns the earliest. Losing candidates are discarded; they are
/// resampled fresh at the next recalculation, which the memoryless
/// exponential makes statistically exact.
pub fn compute_next_event<R: Rng>(
    lattice: &Lattice,
    params: &RateParams,
    particle: &Particle,
    clock: f64,
    rng: &mut R,
) -> ScheduledEvent {
    let mut winner: Option<ScheduledEvent> = None;
    for candidate in enumerate_hops(lattice, params, particle.coords) {
        let event = ScheduledEvent::sample(
            EventKind::Hop {
                destination: candidate.destination,
                displacement: candidate.displacement,
            },
            candidate.rate_constant,
            clock,
            rng,
        );
        if winner
            .as_ref()
            .is_none_or(|best| event.execution_time < best.execution_time)
        {
            winner = Some(event);
        }
    }
    let recombination = ScheduledEvent::sample(
        EventKind::Recombination,
        particle.recombination_rate,
        clock,
        rng,
    );
    match winner {
        Some(best) if best.execution_time < recombination.execution_time => best,
        _ => recombination,
    }
}
