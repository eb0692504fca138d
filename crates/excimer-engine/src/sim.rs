//! The simulation driver: state machine, event dispatch, and the run loop.

use std::error::Error;
use std::fmt;
use std::fmt::Write as _;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use excimer_core::{Coords, InstanceId, ParticleTag};
use excimer_lattice::Lattice;

use crate::calculator::{compute_next_event, RateParams};
use crate::config::{ConfigError, SimConfig};
use crate::diag::DiagnosticSink;
use crate::event::{EventKind, ScheduledEvent};
use crate::particle::ParticleRegistry;
use crate::recalc::{affected_particles, RecalcPolicy};
use crate::schedule::{EventChoice, EventSchedule};
use crate::summary::RunSummary;

/// Interval (events) between full consistency scans in debug builds.
const INVARIANT_SCAN_INTERVAL: u64 = 4096;

/// Lifecycle of a simulation instance.
///
/// Construction performs the Uninitialized -> Ready transition (lattice
/// built, energies assigned, initial creation event sampled), so a
/// `Simulation` value is never observable before Ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimState {
    /// Constructed and validated; no event executed yet.
    Ready,
    /// At least one event executed; termination not yet reached.
    Running,
    /// The target recombination count has been reached.
    Finished,
}

/// Errors from executing a simulation step.
///
/// Both variants stop the run; the driver still exposes the counters and
/// statistics gathered so far (via [`Simulation::summary`]) for
/// postmortem analysis.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A creation event fired with every lattice site occupied.
    LatticeFull,
    /// A hop's destination became occupied between calculation and
    /// execution. Not retried: local repair cannot restore full
    /// consistency without a broader recalculation pass.
    StaleHop {
        /// The particle whose hop went stale.
        tag: ParticleTag,
        /// The now-occupied destination.
        destination: Coords,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LatticeFull => write!(f, "no unoccupied site available for creation"),
            Self::StaleHop { tag, destination } => write!(
                f,
                "hop of exciton {tag} is stale: destination {destination} is occupied"
            ),
        }
    }
}

impl Error for StepError {}

/// One kinetic Monte Carlo simulation instance.
///
/// Strictly sequential: each step's candidate computation depends on the
/// fully mutated post-step state. All rate parameters and scratch state
/// live on the instance, so independent instances (distinct
/// [`InstanceId`]s) can run concurrently with no shared mutable state.
pub struct Simulation {
    config: SimConfig,
    instance: InstanceId,
    lattice: Lattice,
    registry: ParticleRegistry,
    schedule: EventSchedule,
    rate_params: RateParams,
    recalc: RecalcPolicy,
    rng: ChaCha8Rng,
    clock: f64,
    state: SimState,
    /// Per-instance creation rate (1/s), derived from the volumetric
    /// generation rate and the lattice volume.
    generation_rate: f64,
    events_executed: u64,
    created: u64,
    recombined: u64,
    displacements: Vec<f64>,
    sink: Option<Box<dyn DiagnosticSink>>,
}

impl Simulation {
    /// Build a Ready instance from a validated configuration.
    ///
    /// Validates the config, builds the lattice, assigns site energies
    /// from the instance RNG stream (`seed ^ instance_id`), and samples
    /// the initial creation event.
    pub fn new(config: SimConfig, instance: InstanceId) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut lattice = Lattice::new(config.lattice.clone())?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed ^ instance.0);
        let energies = config.disorder.assign(lattice.site_count(), &mut rng);
        lattice.set_energies(energies)?;

        // Volumetric rate (cm^-3 s^-1) times the simulated volume; the
        // unit size is in nm, hence the 1e-7 nm -> cm conversion.
        let site_volume_cm3 = (1e-7 * lattice.unit_size()).powi(3);
        let generation_rate = config.generation_rate * lattice.site_count() as f64 * site_volume_cm3;

        let rate_params = RateParams {
            temperature: config.temperature,
            hop_prefactor: config.hop_prefactor,
            hop_cutoff: config.hop_cutoff,
            cutoff_tolerance: config.cutoff_tolerance,
            hop_range: (config.hop_cutoff / lattice.unit_size()).ceil() as i32,
        };
        let recalc = RecalcPolicy {
            selective: config.selective_recalc,
            cutoff: config.recalc_cutoff,
        };
        let creation = ScheduledEvent::sample(EventKind::Creation, generation_rate, 0.0, &mut rng);
        Ok(Self {
            config,
            instance,
            lattice,
            registry: ParticleRegistry::new(),
            schedule: EventSchedule::new(creation),
            rate_params,
            recalc,
            rng,
            clock: 0.0,
            state: SimState::Ready,
            generation_rate,
            events_executed: 0,
            created: 0,
            recombined: 0,
            displacements: Vec::new(),
            sink: None,
        })
    }

    /// Attach a diagnostic sink receiving per-event narration.
    ///
    /// Sinks observe only; attaching one never changes the outcome.
    pub fn set_sink(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.sink = Some(sink);
    }

    /// Execute the globally earliest scheduled event.
    ///
    /// Advances the clock to the event's execution time, dispatches on
    /// its kind, recalculates affected particles, and checks the
    /// termination condition. Returns `Ok(false)` once the instance is
    /// finished (including on the finishing call itself).
    ///
    /// # Errors
    ///
    /// [`StepError::LatticeFull`] and [`StepError::StaleHop`] stop the
    /// run; gathered statistics remain readable.
    pub fn execute_next_event(&mut self) -> Result<bool, StepError> {
        if self.state == SimState::Finished {
            return Ok(false);
        }
        self.state = SimState::Running;
        let (choice, time) = self.schedule.next();
        debug_assert!(
            time >= self.clock,
            "clock must be non-decreasing: {} -> {time}",
            self.clock
        );
        self.clock = time;
        match choice {
            EventChoice::Creation => self.execute_creation()?,
            EventChoice::Particle(tag) => {
                let event = *self
                    .schedule
                    .get(tag)
                    .expect("chosen particle has a scheduled event");
                match event.kind {
                    EventKind::Creation => {
                        unreachable!("creation is scheduled in its own slot")
                    }
                    EventKind::Hop {
                        destination,
                        displacement,
                    } => self.execute_hop(tag, destination, displacement)?,
                    EventKind::Recombination => self.execute_recombination(tag),
                }
            }
        }
        self.events_executed += 1;
        if cfg!(debug_assertions) && self.events_executed % INVARIANT_SCAN_INTERVAL == 0 {
            self.assert_invariants();
        }
        if self.recombined >= self.config.target_recombinations {
            self.state = SimState::Finished;
            return Ok(false);
        }
        Ok(true)
    }

    /// Run until finished and return the final statistics.
    ///
    /// On a step error the loop stops and the error is returned; partial
    /// statistics stay available through [`summary`](Self::summary).
    pub fn run(&mut self) -> Result<RunSummary, StepError> {
        while self.execute_next_event()? {}
        Ok(self.summary())
    }

    fn execute_creation(&mut self) -> Result<(), StepError> {
        let coords = self
            .lattice
            .random_unoccupied(&mut self.rng)
            .map_err(|_| StepError::LatticeFull)?;
        let tag = self
            .registry
            .insert(self.clock, coords, 1.0 / self.config.lifetime);
        self.lattice.set_occupied(coords);
        self.created += 1;
        self.narrate(|| format!("exciton {tag} created at {coords}"));
        // Includes the new particle itself (distance zero), which gives
        // it its first scheduled event.
        self.recalculate_around(coords, coords);
        let creation = ScheduledEvent::sample(
            EventKind::Creation,
            self.generation_rate,
            self.clock,
            &mut self.rng,
        );
        self.schedule.set_creation(creation);
        Ok(())
    }

    fn execute_hop(
        &mut self,
        tag: ParticleTag,
        destination: Coords,
        displacement: [i32; 3],
    ) -> Result<(), StepError> {
        // Under selective recalculation a mis-sized radius can leave
        // this event pointing at a site that filled in the meantime.
        // Fail without mutating.
        if self.lattice.is_occupied(destination) {
            return Err(StepError::StaleHop { tag, destination });
        }
        let particle = self.registry.get_mut(tag).expect("hopping particle is live");
        let origin = particle.coords;
        particle.record_hop(displacement, destination);
        self.lattice.clear_occupied(origin);
        self.lattice.set_occupied(destination);
        self.narrate(|| format!("exciton {tag} hopped from {origin} to {destination}"));
        self.recalculate_around(origin, destination);
        Ok(())
    }

    fn execute_recombination(&mut self, tag: ParticleTag) {
        let particle = self
            .registry
            .remove(tag)
            .expect("recombining particle is live");
        self.schedule
            .remove(tag)
            .expect("recombining particle has a scheduled event");
        let site = particle.coords;
        self.lattice.clear_occupied(site);
        if self.config.record_displacements {
            self.displacements
                .push(particle.displacement_nm(self.lattice.unit_size()));
        }
        self.recombined += 1;
        self.narrate(|| format!("exciton {tag} recombined at {site}"));
        self.recalculate_around(site, site);
    }

    /// Recompute the scheduled event of every particle near the touched
    /// sites (or of every particle, in full-recalculation mode).
    fn recalculate_around(&mut self, site_a: Coords, site_b: Coords) {
        let affected =
            affected_particles(&self.registry, &self.lattice, &self.recalc, site_a, site_b);
        for tag in affected {
            let particle = self.registry.get(tag).expect("affected particle is live");
            let event = compute_next_event(
                &self.lattice,
                &self.rate_params,
                particle,
                self.clock,
                &mut self.rng,
            );
            self.schedule.schedule(tag, event);
        }
    }

    fn narrate(&mut self, message: impl FnOnce() -> String) {
        if let Some(sink) = self.sink.as_mut() {
            sink.record(&message());
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SimState {
        self.state
    }

    /// Current simulation clock, in seconds.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Events executed so far.
    pub fn events_executed(&self) -> u64 {
        self.events_executed
    }

    /// Particles created so far.
    pub fn particles_created(&self) -> u64 {
        self.created
    }

    /// Particles recombined so far.
    pub fn particles_recombined(&self) -> u64 {
        self.recombined
    }

    /// Number of currently live particles.
    pub fn live_particle_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of currently scheduled events, counting the creation slot.
    /// Always `live_particle_count() + 1`.
    pub fn scheduled_event_count(&self) -> usize {
        self.schedule.len()
    }

    /// The lattice, for read-only inspection.
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Displacement samples (nm) recorded so far.
    pub fn diffusion_data(&self) -> &[f64] {
        &self.displacements
    }

    /// Snapshot of the statistics gathered so far.
    ///
    /// Valid at any completed-event boundary, including after a step
    /// error stopped the run.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            events_executed: self.events_executed,
            simulated_time: self.clock,
            particles_created: self.created,
            particles_recombined: self.recombined,
            displacements_nm: self.displacements.clone(),
        }
    }

    /// Human-readable status snapshot, one line per fact, prefixed with
    /// the instance id.
    pub fn status_report(&self) -> String {
        let id = self.instance;
        let mut out = String::new();
        let _ = writeln!(out, "{id}: time = {:.6e} s", self.clock);
        let _ = writeln!(
            out,
            "{id}: {} excitons created, {} events executed",
            self.created, self.events_executed
        );
        let _ = writeln!(out, "{id}: {} excitons in the lattice", self.registry.len());
        for particle in self.registry.iter() {
            let _ = writeln!(out, "{id}: exciton {} is at {}", particle.tag, particle.coords);
        }
        out
    }

    /// Full consistency scan.
    ///
    /// Asserts the one-event-per-particle pairing and that the set of
    /// occupied sites is exactly the set of live particle positions (so
    /// no two particles share a site). Violations are programming
    /// errors and panic.
    pub fn assert_invariants(&self) {
        self.schedule.assert_paired(&self.registry);
        let occupied = (0..self.lattice.site_count())
            .filter(|&i| self.lattice.is_occupied(self.lattice.site_coords(i)))
            .count();
        assert_eq!(
            occupied,
            self.registry.len(),
            "occupied-site count must equal live-particle count"
        );
        assert_eq!(occupied, self.lattice.occupancy_count());
        for particle in self.registry.iter() {
            assert!(
                self.lattice.is_occupied(particle.coords),
                "particle {} site {} not marked occupied",
                particle.tag,
                particle.coords
            );
        }
    }
}
