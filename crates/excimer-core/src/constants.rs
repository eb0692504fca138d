//! Physical constants and numeric tolerances.

/// Boltzmann constant in eV/K.
///
/// Site energies are expressed in eV, so the Boltzmann factor in the
/// hop rate equation is `exp(-dE / (BOLTZMANN_EV_PER_K * T))`.
pub const BOLTZMANN_EV_PER_K: f64 = 8.617_330_3e-5;

/// Default tolerance (nm) applied at the hop cutoff boundary.
///
/// Offsets whose real distance lands exactly on the cutoff radius can
/// round to either side of it; a candidate is kept when
/// `distance - tolerance <= cutoff`. Overridable per run via
/// `SimConfig::cutoff_tolerance` in `excimer-engine`.
pub const CUTOFF_TOLERANCE_NM: f64 = 1e-4;
