//! Run statistics and cross-instance reduction.

/// Statistics produced by a simulation run (complete or aborted).
///
/// Summaries from independent seeded instances combine with
/// [`merge`](RunSummary::merge); the batch itself is launched outside
/// the engine, but the reduction lives here so every consumer computes
/// diffusion lengths the same way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Total events executed.
    pub events_executed: u64,
    /// Final simulation clock value, in seconds.
    pub simulated_time: f64,
    /// Particles created over the run.
    pub particles_created: u64,
    /// Particles that recombined over the run.
    pub particles_recombined: u64,
    /// Net displacement distance (nm) of each recombined particle, in
    /// recombination order. Empty when displacement recording is off.
    pub displacements_nm: Vec<f64>,
}

impl RunSummary {
    /// Mean diffusion length (nm), or `None` with no recorded samples.
    pub fn mean_diffusion_length(&self) -> Option<f64> {
        if self.displacements_nm.is_empty() {
            return None;
        }
        Some(self.displacements_nm.iter().sum::<f64>() / self.displacements_nm.len() as f64)
    }

    /// Sample standard deviation (nm) of the diffusion length, or `None`
    /// with fewer than two samples.
    pub fn stdev_diffusion_length(&self) -> Option<f64> {
        let n = self.displacements_nm.len();
        if n < 2 {
            return None;
        }
        let mean = self.mean_diffusion_length()?;
        let ss: f64 = self
            .displacements_nm
            .iter()
            .map(|d| (d - mean) * (d - mean))
            .sum();
        Some((ss / (n - 1) as f64).sqrt())
    }

    /// Fold another instance's summary into this one.
    ///
    /// Counters add; the simulated time keeps the maximum (instances run
    /// independent clocks); displacement samples concatenate.
    pub fn merge(&mut self, other: RunSummary) {
        self.events_executed += other.events_executed;
        self.simulated_time = self.simulated_time.max(other.simulated_time);
        self.particles_created += other.particles_created;
        self.particles_recombined += other.particles_recombined;
        self.displacements_nm.extend(other.displacements_nm);
    }
}
