//! Density-of-states generators for site energetic disorder.

use rand::Rng;

/// The energetic disorder model applied to site energies before a run.
///
/// Exactly one model is in effect per simulation; the enum makes the
/// "two models enabled at once" misconfiguration unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisorderModel {
    /// No disorder: every site energy is zero.
    None,
    /// Uncorrelated Gaussian density of states, mean 0.
    Gaussian {
        /// Standard deviation of the site energies, in eV.
        stdev: f64,
    },
    /// One-sided exponential (Urbach) tail; energies are all <= 0.
    Exponential {
        /// Urbach energy setting the tail shape, in eV.
        urbach: f64,
    },
}

impl DisorderModel {
    /// Check the model's shape parameter.
    ///
    /// # Errors
    ///
    /// Returns a description when the parameter is negative or non-finite.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            DisorderModel::None => Ok(()),
            DisorderModel::Gaussian { stdev } => {
                if !stdev.is_finite() || stdev < 0.0 {
                    Err(format!(
                        "Gaussian stdev must be finite and non-negative, got {stdev}"
                    ))
                } else {
                    Ok(())
                }
            }
            DisorderModel::Exponential { urbach } => {
                if !urbach.is_finite() || urbach < 0.0 {
                    Err(format!(
                        "Urbach energy must be finite and non-negative, got {urbach}"
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Generate one energy value (eV) per site from the caller's RNG stream.
    pub fn assign<R: Rng>(&self, site_count: usize, rng: &mut R) -> Vec<f64> {
        match *self {
            DisorderModel::None => vec![0.0; site_count],
            DisorderModel::Gaussian { stdev } => {
                (0..site_count).map(|_| stdev * box_muller(rng)).collect()
            }
            DisorderModel::Exponential { urbach } => (0..site_count)
                .map(|_| {
                    let u: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
                    urbach * u.ln()
                })
                .collect(),
        }
    }
}

/// Standard normal sample via the Box-Muller transform.
/// Avoids the `rand_distr` dependency.
fn box_muller<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn none_model_is_all_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let energies = DisorderModel::None.assign(100, &mut rng);
        assert!(energies.iter().all(|&e| e == 0.0));
    }

    #[test]
    fn same_seed_same_energies() {
        let model = DisorderModel::Gaussian { stdev: 0.05 };
        let a = model.assign(500, &mut ChaCha8Rng::seed_from_u64(9));
        let b = model.assign(500, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn gaussian_moments_are_plausible() {
        let stdev = 0.1;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let energies = DisorderModel::Gaussian { stdev }.assign(20_000, &mut rng);
        let n = energies.len() as f64;
        let mean = energies.iter().sum::<f64>() / n;
        let var = energies.iter().map(|e| (e - mean) * (e - mean)).sum::<f64>() / n;
        assert!(mean.abs() < 0.005, "mean {mean} too far from 0");
        assert!(
            (var.sqrt() - stdev).abs() < 0.005,
            "stdev {} too far from {stdev}",
            var.sqrt()
        );
    }

    #[test]
    fn exponential_tail_is_one_sided() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let energies = DisorderModel::Exponential { urbach: 0.03 }.assign(5_000, &mut rng);
        assert!(energies.iter().all(|&e| e <= 0.0));
        let mean = energies.iter().sum::<f64>() / energies.len() as f64;
        assert!((mean + 0.03).abs() < 0.003, "tail mean {mean} off -urbach");
    }

    #[test]
    fn validate_rejects_negative_shape() {
        assert!(DisorderModel::Gaussian { stdev: -0.1 }.validate().is_err());
        assert!(DisorderModel::Exponential { urbach: f64::NAN }
            .validate()
            .is_err());
        assert!(DisorderModel::None.validate().is_ok());
    }
}
