//! Live particle records and the registry that owns them.

use excimer_core::{Coords, ParticleTag};
use indexmap::IndexMap;

/// A live exciton.
///
/// Created only by Creation execution, destroyed only by Recombination
/// execution, and owned exclusively by the [`ParticleRegistry`].
#[derive(Clone, Debug)]
pub struct Particle {
    /// Unique, monotonically increasing tag.
    pub tag: ParticleTag,
    /// Simulation time (s) at which the particle was created.
    pub creation_time: f64,
    /// Site the particle was created on.
    pub creation_coords: Coords,
    /// Site the particle currently occupies.
    pub coords: Coords,
    /// Fixed recombination rate constant (1/s), set at creation.
    pub recombination_rate: f64,
    /// Cumulative lattice-unit displacement since creation, including
    /// every periodic boundary crossing.
    displacement: [i64; 3],
}

impl Particle {
    /// Apply an executed hop: update the current site and accumulate the
    /// raw displacement.
    pub fn record_hop(&mut self, displacement: [i32; 3], destination: Coords) {
        self.coords = destination;
        for (total, step) in self.displacement.iter_mut().zip(displacement) {
            *total += i64::from(step);
        }
    }

    /// Net displacement since creation in lattice units.
    pub fn displacement(&self) -> [i64; 3] {
        self.displacement
    }

    /// Net displacement distance since creation, in nm.
    pub fn displacement_nm(&self, unit_size: f64) -> f64 {
        let [dx, dy, dz] = self.displacement.map(|d| d as f64);
        unit_size * (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Owner of all live particles, keyed by tag.
///
/// Insertion-ordered so that iteration, and therefore the order in
/// which the recalculation engine consumes RNG draws, is deterministic
/// for a given event history. Removal preserves the order of the
/// survivors.
#[derive(Clone, Debug, Default)]
pub struct ParticleRegistry {
    particles: IndexMap<ParticleTag, Particle>,
    next_tag: u64,
}

impl ParticleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a particle at `coords` and return its freshly allocated tag.
    pub fn insert(
        &mut self,
        creation_time: f64,
        coords: Coords,
        recombination_rate: f64,
    ) -> ParticleTag {
        self.next_tag += 1;
        let tag = ParticleTag(self.next_tag);
        self.particles.insert(
            tag,
            Particle {
                tag,
                creation_time,
                creation_coords: coords,
                coords,
                recombination_rate,
                displacement: [0; 3],
            },
        );
        tag
    }

    /// Look up a live particle.
    pub fn get(&self, tag: ParticleTag) -> Option<&Particle> {
        self.particles.get(&tag)
    }

    /// Look up a live particle mutably.
    pub fn get_mut(&mut self, tag: ParticleTag) -> Option<&mut Particle> {
        self.particles.get_mut(&tag)
    }

    /// Remove a particle, returning its final record.
    ///
    /// Uses a shifting removal so the iteration order of the remaining
    /// particles is unchanged.
    pub fn remove(&mut self, tag: ParticleTag) -> Option<Particle> {
        self.particles.shift_remove(&tag)
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are live.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Iterate over live particles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    /// Tags of all live particles in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = ParticleTag> + '_ {
        self.particles.keys().copied()
    }
}
