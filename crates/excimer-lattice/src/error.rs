//! Error types for lattice construction and site queries.

use std::fmt;

/// Errors arising from lattice construction or site allocation.
#[derive(Clone, Debug, PartialEq)]
pub enum LatticeError {
    /// No unoccupied site is available for a requested allocation.
    Full,
    /// A lattice dimension is zero.
    InvalidDimensions {
        /// The configured `(length, width, height)`.
        dims: (u32, u32, u32),
    },
    /// The unit size is not a finite positive number of nm.
    InvalidUnitSize {
        /// The offending value.
        value: f64,
    },
    /// A site-energy vector does not match the site count.
    EnergyLengthMismatch {
        /// Number of sites in the lattice.
        expected: usize,
        /// Length of the supplied energy vector.
        got: usize,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "no unoccupied site available"),
            Self::InvalidDimensions { dims } => {
                write!(
                    f,
                    "lattice dimensions must all be positive, got {}x{}x{}",
                    dims.0, dims.1, dims.2
                )
            }
            Self::InvalidUnitSize { value } => {
                write!(f, "unit size must be finite and positive, got {value}")
            }
            Self::EnergyLengthMismatch { expected, got } => {
                write!(f, "expected {expected} site energies, got {got}")
            }
        }
    }
}

impl std::error::Error for LatticeError {}
