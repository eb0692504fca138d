//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the builder-input for constructing a [`Simulation`].
//! [`validate()`](SimConfig::validate) checks every parameter invariant
//! before any simulated time elapses; invalid combinations fail fast and
//! are never auto-corrected.
//!
//! [`Simulation`]: crate::sim::Simulation

use std::error::Error;
use std::fmt;

use excimer_core::CUTOFF_TOLERANCE_NM;
use excimer_lattice::{Boundary, DisorderModel, LatticeError, LatticeParams};

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Lattice construction parameters are invalid.
    Lattice(LatticeError),
    /// Temperature is not a positive, finite number of kelvin.
    InvalidTemperature {
        /// The offending value.
        value: f64,
    },
    /// Generation rate is not positive and finite.
    InvalidGenerationRate {
        /// The offending value.
        value: f64,
    },
    /// Particle lifetime is not positive and finite.
    InvalidLifetime {
        /// The offending value.
        value: f64,
    },
    /// Hop prefactor is not positive and finite.
    InvalidHopPrefactor {
        /// The offending value.
        value: f64,
    },
    /// Hop cutoff radius is not positive and finite.
    InvalidHopCutoff {
        /// The offending value.
        value: f64,
    },
    /// Recalculation cutoff is below the hop cutoff, which would let
    /// events go stale outside the recalculated neighborhood.
    RecalcCutoffTooSmall {
        /// The configured recalculation cutoff (nm).
        recalc_cutoff: f64,
        /// The configured hop cutoff (nm).
        hop_cutoff: f64,
    },
    /// The disorder model's shape parameter is invalid.
    InvalidDisorder {
        /// Description of the failure.
        reason: String,
    },
    /// The target recombination count is zero.
    ZeroTargetCount,
    /// The cutoff tolerance is negative or non-finite.
    InvalidTolerance {
        /// The offending value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice(e) => write!(f, "lattice: {e}"),
            Self::InvalidTemperature { value } => {
                write!(f, "temperature must be finite and positive, got {value}")
            }
            Self::InvalidGenerationRate { value } => {
                write!(f, "generation rate must be finite and positive, got {value}")
            }
            Self::InvalidLifetime { value } => {
                write!(f, "lifetime must be finite and positive, got {value}")
            }
            Self::InvalidHopPrefactor { value } => {
                write!(f, "hop prefactor must be finite and positive, got {value}")
            }
            Self::InvalidHopCutoff { value } => {
                write!(f, "hop cutoff must be finite and positive, got {value}")
            }
            Self::RecalcCutoffTooSmall {
                recalc_cutoff,
                hop_cutoff,
            } => write!(
                f,
                "recalculation cutoff ({recalc_cutoff} nm) must not be less than the hop cutoff ({hop_cutoff} nm)"
            ),
            Self::InvalidDisorder { reason } => write!(f, "invalid disorder model: {reason}"),
            Self::ZeroTargetCount => {
                write!(f, "target recombination count must be at least 1")
            }
            Self::InvalidTolerance { value } => {
                write!(f, "cutoff tolerance must be finite and non-negative, got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for ConfigError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

/// Complete configuration for one simulation instance.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Lattice dimensions, unit size, and per-axis boundaries.
    pub lattice: LatticeParams,
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Volumetric particle generation rate (cm^-3 s^-1).
    pub generation_rate: f64,
    /// Mean particle lifetime (s); the recombination rate is its inverse.
    pub lifetime: f64,
    /// Attempt-to-hop frequency prefactor (1/s).
    pub hop_prefactor: f64,
    /// Maximum real hop distance (nm).
    pub hop_cutoff: f64,
    /// Recalculation neighborhood radius (nm); must be >= `hop_cutoff`.
    pub recalc_cutoff: f64,
    /// Energetic disorder model for site energies.
    pub disorder: DisorderModel,
    /// Run until this many particles have recombined.
    pub target_recombinations: u64,
    /// Recalculate only particles near touched sites (true) or every
    /// live particle (false, the correctness-reference path).
    pub selective_recalc: bool,
    /// Record each recombined particle's net displacement for the
    /// diffusion-length statistics.
    pub record_displacements: bool,
    /// Tolerance (nm) at the hop cutoff boundary.
    pub cutoff_tolerance: f64,
    /// Base RNG seed; combined with the instance id per instance.
    pub seed: u64,
}

impl Default for SimConfig {
    /// A small, physically sensible baseline: 50 nm periodic cube with
    /// 1 nm sites, room temperature, nanosecond lifetime.
    fn default() -> Self {
        Self {
            lattice: LatticeParams {
                length: 50,
                width: 50,
                height: 50,
                unit_size: 1.0,
                boundaries: [Boundary::Periodic; 3],
            },
            temperature: 300.0,
            generation_rate: 1e22,
            lifetime: 1e-9,
            hop_prefactor: 1e12,
            hop_cutoff: 3.0,
            recalc_cutoff: 5.0,
            disorder: DisorderModel::None,
            target_recombinations: 1000,
            selective_recalc: true,
            record_displacements: true,
            cutoff_tolerance: CUTOFF_TOLERANCE_NM,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Validate every parameter invariant.
    ///
    /// Run before any simulated time elapses; the first violated
    /// invariant is reported and nothing is auto-corrected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.lattice;
        if p.length == 0 || p.width == 0 || p.height == 0 {
            return Err(LatticeError::InvalidDimensions {
                dims: (p.length, p.width, p.height),
            }
            .into());
        }
        if !p.unit_size.is_finite() || p.unit_size <= 0.0 {
            return Err(LatticeError::InvalidUnitSize {
                value: p.unit_size,
            }
            .into());
        }
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(ConfigError::InvalidTemperature {
                value: self.temperature,
            });
        }
        if !self.generation_rate.is_finite() || self.generation_rate <= 0.0 {
            return Err(ConfigError::InvalidGenerationRate {
                value: self.generation_rate,
            });
        }
        if !self.lifetime.is_finite() || self.lifetime <= 0.0 {
            return Err(ConfigError::InvalidLifetime {
                value: self.lifetime,
            });
        }
        if !self.hop_prefactor.is_finite() || self.hop_prefactor <= 0.0 {
            return Err(ConfigError::InvalidHopPrefactor {
                value: self.hop_prefactor,
            });
        }
        if !self.hop_cutoff.is_finite() || self.hop_cutoff <= 0.0 {
            return Err(ConfigError::InvalidHopCutoff {
                value: self.hop_cutoff,
            });
        }
        if !self.recalc_cutoff.is_finite() || self.recalc_cutoff < self.hop_cutoff {
            return Err(ConfigError::RecalcCutoffTooSmall {
                recalc_cutoff: self.recalc_cutoff,
                hop_cutoff: self.hop_cutoff,
            });
        }
        self.disorder
            .validate()
            .map_err(|reason| ConfigError::InvalidDisorder { reason })?;
        if self.target_recombinations == 0 {
            return Err(ConfigError::ZeroTargetCount);
        }
        if !self.cutoff_tolerance.is_finite() || self.cutoff_tolerance < 0.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.cutoff_tolerance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_dimension_fails() {
        let mut cfg = SimConfig::default();
        cfg.lattice.height = 0;
        match cfg.validate() {
            Err(ConfigError::Lattice(LatticeError::InvalidDimensions { .. })) => {}
            other => panic!("expected Lattice(InvalidDimensions), got {other:?}"),
        }
    }

    #[test]
    fn validate_negative_temperature_fails() {
        let cfg = SimConfig {
            temperature: -10.0,
            ..SimConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidTemperature { value }) => assert_eq!(value, -10.0),
            other => panic!("expected InvalidTemperature, got {other:?}"),
        }
    }

    #[test]
    fn validate_nan_lifetime_fails() {
        let cfg = SimConfig {
            lifetime: f64::NAN,
            ..SimConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidLifetime { .. }) => {}
            other => panic!("expected InvalidLifetime, got {other:?}"),
        }
    }

    #[test]
    fn validate_recalc_below_hop_cutoff_fails_deterministically() {
        let cfg = SimConfig {
            hop_cutoff: 3.0,
            recalc_cutoff: 2.0,
            ..SimConfig::default()
        };
        for _ in 0..3 {
            match cfg.validate() {
                Err(ConfigError::RecalcCutoffTooSmall {
                    recalc_cutoff,
                    hop_cutoff,
                }) => {
                    assert_eq!(recalc_cutoff, 2.0);
                    assert_eq!(hop_cutoff, 3.0);
                }
                other => panic!("expected RecalcCutoffTooSmall, got {other:?}"),
            }
        }
    }

    #[test]
    fn validate_equal_cutoffs_is_allowed() {
        let cfg = SimConfig {
            hop_cutoff: 3.0,
            recalc_cutoff: 3.0,
            ..SimConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_bad_disorder_shape_fails() {
        let cfg = SimConfig {
            disorder: DisorderModel::Gaussian { stdev: -0.05 },
            ..SimConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidDisorder { reason }) => {
                assert!(reason.contains("stdev"));
            }
            other => panic!("expected InvalidDisorder, got {other:?}"),
        }
    }

    #[test]
    fn validate_zero_target_fails() {
        let cfg = SimConfig {
            target_recombinations: 0,
            ..SimConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::ZeroTargetCount) => {}
            other => panic!("expected ZeroTargetCount, got {other:?}"),
        }
    }

    #[test]
    fn validate_negative_tolerance_fails() {
        let cfg = SimConfig {
            cutoff_tolerance: -1e-4,
            ..SimConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidTolerance { .. }) => {}
            other => panic!("expected InvalidTolerance, got {other:?}"),
        }
    }

    #[test]
    fn config_error_display_names_the_cutoffs() {
        let err = ConfigError::RecalcCutoffTooSmall {
            recalc_cutoff: 2.0,
            hop_cutoff: 3.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 nm"));
        assert!(msg.contains("3 nm"));
    }
}
