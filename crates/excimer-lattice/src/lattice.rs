//! The 3D site lattice: occupancy, energies, and move geometry.

use crate::boundary::Boundary;
use crate::error::LatticeError;
use excimer_core::Coords;
use rand::Rng;

/// Attempts at uniform rejection sampling before falling back to a full
/// free-site enumeration in [`Lattice::random_unoccupied`].
const MAX_REJECTION_TRIES: u32 = 10;

/// Structural parameters for building a [`Lattice`].
#[derive(Clone, Debug)]
pub struct LatticeParams {
    /// Extent along x, in lattice units.
    pub length: u32,
    /// Extent along y, in lattice units.
    pub width: u32,
    /// Extent along z, in lattice units.
    pub height: u32,
    /// Physical size of one lattice unit, in nm.
    pub unit_size: f64,
    /// Boundary behavior per axis, in `[x, y, z]` order.
    pub boundaries: [Boundary; 3],
}

/// A fixed 3D grid of sites with per-axis boundary behavior.
///
/// The lattice exclusively owns site state: a boolean occupancy flag and
/// a site energy (eV) per site. At most one particle maps to any site at
/// a time; the occupancy transitions are asserted so a double-occupy or
/// double-vacate is caught as a programming error rather than silently
/// corrupting the count.
#[derive(Clone, Debug)]
pub struct Lattice {
    params: LatticeParams,
    occupied: Vec<bool>,
    energies: Vec<f64>,
    n_occupied: usize,
}

impl Lattice {
    /// Build an empty lattice (all sites unoccupied, all energies zero).
    pub fn new(params: LatticeParams) -> Result<Self, LatticeError> {
        if params.length == 0 || params.width == 0 || params.height == 0 {
            return Err(LatticeError::InvalidDimensions {
                dims: (params.length, params.width, params.height),
            });
        }
        if !params.unit_size.is_finite() || params.unit_size <= 0.0 {
            return Err(LatticeError::InvalidUnitSize {
                value: params.unit_size,
            });
        }
        let n = (params.length as usize) * (params.width as usize) * (params.height as usize);
        Ok(Self {
            params,
            occupied: vec![false; n],
            energies: vec![0.0; n],
            n_occupied: 0,
        })
    }

    /// Total number of sites.
    pub fn site_count(&self) -> usize {
        self.occupied.len()
    }

    /// Number of currently occupied sites.
    pub fn occupancy_count(&self) -> usize {
        self.n_occupied
    }

    /// Physical size of one lattice unit, in nm.
    pub fn unit_size(&self) -> f64 {
        self.params.unit_size
    }

    /// Lattice extents `(length, width, height)`.
    pub fn dimensions(&self) -> (u32, u32, u32) {
        (self.params.length, self.params.width, self.params.height)
    }

    /// Boundary behavior per axis, in `[x, y, z]` order.
    pub fn boundaries(&self) -> [Boundary; 3] {
        self.params.boundaries
    }

    /// Whether `coords` lies inside the box on every axis.
    pub fn contains(&self, coords: Coords) -> bool {
        (0..self.params.length as i32).contains(&coords.x)
            && (0..self.params.width as i32).contains(&coords.y)
            && (0..self.params.height as i32).contains(&coords.z)
    }

    /// Map in-range coordinates to their linear site index.
    ///
    /// Row-major over `(x, y, z)`: inverse of [`site_coords`](Self::site_coords).
    pub fn site_index(&self, coords: Coords) -> usize {
        debug_assert!(self.contains(coords), "coords {coords} out of range");
        let w = self.params.width as usize;
        let h = self.params.height as usize;
        (coords.x as usize) * w * h + (coords.y as usize) * h + coords.z as usize
    }

    /// Map a linear site index back to coordinates.
    pub fn site_coords(&self, index: usize) -> Coords {
        debug_assert!(index < self.site_count(), "site index {index} out of range");
        let w = self.params.width as usize;
        let h = self.params.height as usize;
        Coords::new(
            (index / (w * h)) as i32,
            ((index / h) % w) as i32,
            (index % h) as i32,
        )
    }

    /// Whether the site at `coords` is occupied.
    pub fn is_occupied(&self, coords: Coords) -> bool {
        self.occupied[self.site_index(coords)]
    }

    /// Mark the site at `coords` occupied.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the site is already occupied; that
    /// would break the one-particle-per-site invariant.
    pub fn set_occupied(&mut self, coords: Coords) {
        let idx = self.site_index(coords);
        debug_assert!(!self.occupied[idx], "site {coords} already occupied");
        self.occupied[idx] = true;
        self.n_occupied += 1;
    }

    /// Mark the site at `coords` unoccupied.
    pub fn clear_occupied(&mut self, coords: Coords) {
        let idx = self.site_index(coords);
        debug_assert!(self.occupied[idx], "site {coords} not occupied");
        self.occupied[idx] = false;
        self.n_occupied -= 1;
    }

    /// Energy (eV) of the site at `coords`.
    pub fn energy(&self, coords: Coords) -> f64 {
        self.energies[self.site_index(coords)]
    }

    /// Install the per-site energy array produced by a disorder model.
    pub fn set_energies(&mut self, energies: Vec<f64>) -> Result<(), LatticeError> {
        if energies.len() != self.site_count() {
            return Err(LatticeError::EnergyLengthMismatch {
                expected: self.site_count(),
                got: energies.len(),
            });
        }
        self.energies = energies;
        Ok(())
    }

    /// Destination of a move from `origin` by `(di, dj, dk)` lattice units.
    ///
    /// Wraps on periodic axes; returns `None` when a hard axis would be
    /// left. Occupancy is not consulted here; see
    /// [`is_move_valid`](Self::is_move_valid).
    pub fn destination(&self, origin: Coords, di: i32, dj: i32, dk: i32) -> Option<Coords> {
        let [bx, by, bz] = self.params.boundaries;
        let x = bx.resolve(origin.x + di, self.params.length as i32)?;
        let y = by.resolve(origin.y + dj, self.params.width as i32)?;
        let z = bz.resolve(origin.z + dk, self.params.height as i32)?;
        Some(Coords::new(x, y, z))
    }

    /// Whether a move from `origin` by `(di, dj, dk)` lands on an existing,
    /// unoccupied site.
    pub fn is_move_valid(&self, origin: Coords, di: i32, dj: i32, dk: i32) -> bool {
        match self.destination(origin, di, dj, dk) {
            Some(dest) => !self.is_occupied(dest),
            None => false,
        }
    }

    /// Shortest physical distance (nm) between two sites, taking the
    /// minimum image on periodic axes.
    pub fn real_distance(&self, a: Coords, b: Coords) -> f64 {
        let [bx, by, bz] = self.params.boundaries;
        let dx = bx.axis_distance(a.x, b.x, self.params.length as i32) as f64;
        let dy = by.axis_distance(a.y, b.y, self.params.width as i32) as f64;
        let dz = bz.axis_distance(a.z, b.z, self.params.height as i32) as f64;
        self.params.unit_size * (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Draw a uniformly random site coordinate.
    pub fn random_coords<R: Rng>(&self, rng: &mut R) -> Coords {
        Coords::new(
            rng.random_range(0..self.params.length as i32),
            rng.random_range(0..self.params.width as i32),
            rng.random_range(0..self.params.height as i32),
        )
    }

    /// Draw a uniformly random unoccupied site.
    ///
    /// While the lattice is under half full, rejection sampling finds a
    /// free site in expected O(1); after [`MAX_REJECTION_TRIES`] misses
    /// (or at high occupancy) the free sites are enumerated and sampled
    /// directly, which guarantees success whenever any free site exists.
    ///
    /// # Errors
    ///
    /// [`LatticeError::Full`] when every site is occupied.
    pub fn random_unoccupied<R: Rng>(&self, rng: &mut R) -> Result<Coords, LatticeError> {
        if self.n_occupied * 2 < self.site_count() {
            for _ in 0..MAX_REJECTION_TRIES {
                let coords = self.random_coords(rng);
                if !self.is_occupied(coords) {
                    return Ok(coords);
                }
            }
        }
        let free: Vec<usize> = (0..self.site_count())
            .filter(|&i| !self.occupied[i])
            .collect();
        if free.is_empty() {
            return Err(LatticeError::Full);
        }
        Ok(self.site_coords(free[rng.random_range(0..free.len())]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn periodic_params(l: u32, w: u32, h: u32) -> LatticeParams {
        LatticeParams {
            length: l,
            width: w,
            height: h,
            unit_size: 1.0,
            boundaries: [Boundary::Periodic; 3],
        }
    }

    fn hard_params(l: u32, w: u32, h: u32) -> LatticeParams {
        LatticeParams {
            length: l,
            width: w,
            height: h,
            unit_size: 1.0,
            boundaries: [Boundary::Hard; 3],
        }
    }

    #[test]
    fn new_rejects_zero_dimension() {
        match Lattice::new(periodic_params(0, 4, 4)) {
            Err(LatticeError::InvalidDimensions { dims }) => assert_eq!(dims, (0, 4, 4)),
            other => panic!("expected InvalidDimensions, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_bad_unit_size() {
        let mut params = periodic_params(4, 4, 4);
        params.unit_size = 0.0;
        assert!(matches!(
            Lattice::new(params),
            Err(LatticeError::InvalidUnitSize { .. })
        ));
    }

    #[test]
    fn index_coords_bijection() {
        let lat = Lattice::new(periodic_params(4, 5, 6)).unwrap();
        for i in 0..lat.site_count() {
            let c = lat.site_coords(i);
            assert!(lat.contains(c));
            assert_eq!(lat.site_index(c), i);
        }
    }

    #[test]
    fn full_axis_wraparound_returns_origin() {
        let lat = Lattice::new(periodic_params(7, 7, 7)).unwrap();
        let origin = Coords::new(3, 4, 5);
        assert_eq!(lat.destination(origin, 7, 0, 0), Some(origin));
        assert_eq!(lat.destination(origin, 0, -7, 0), Some(origin));
        assert_eq!(lat.destination(origin, 7, 7, -7), Some(origin));
    }

    #[test]
    fn hard_boundary_rejects_exit() {
        let lat = Lattice::new(hard_params(10, 10, 10)).unwrap();
        assert_eq!(lat.destination(Coords::new(9, 5, 5), 1, 0, 0), None);
        assert_eq!(lat.destination(Coords::new(0, 5, 5), -1, 0, 0), None);
        assert_eq!(
            lat.destination(Coords::new(9, 5, 5), -1, 0, 0),
            Some(Coords::new(8, 5, 5))
        );
    }

    #[test]
    fn move_validity_tracks_occupancy() {
        let mut lat = Lattice::new(hard_params(5, 5, 5)).unwrap();
        let origin = Coords::new(2, 2, 2);
        assert!(lat.is_move_valid(origin, 1, 0, 0));
        lat.set_occupied(Coords::new(3, 2, 2));
        assert!(!lat.is_move_valid(origin, 1, 0, 0));
        lat.clear_occupied(Coords::new(3, 2, 2));
        assert!(lat.is_move_valid(origin, 1, 0, 0));
    }

    #[test]
    fn real_distance_uses_minimum_image() {
        let lat = Lattice::new(periodic_params(10, 10, 10)).unwrap();
        let d = lat.real_distance(Coords::new(0, 0, 0), Coords::new(9, 0, 0));
        assert!((d - 1.0).abs() < 1e-12);

        let hard = Lattice::new(hard_params(10, 10, 10)).unwrap();
        let d = hard.real_distance(Coords::new(0, 0, 0), Coords::new(9, 0, 0));
        assert!((d - 9.0).abs() < 1e-12);
    }

    #[test]
    fn real_distance_scales_with_unit_size() {
        let mut params = hard_params(10, 10, 10);
        params.unit_size = 2.5;
        let lat = Lattice::new(params).unwrap();
        let d = lat.real_distance(Coords::new(0, 0, 0), Coords::new(3, 4, 0));
        assert!((d - 12.5).abs() < 1e-12);
    }

    #[test]
    fn random_unoccupied_avoids_occupied_sites() {
        let mut lat = Lattice::new(periodic_params(2, 2, 2)).unwrap();
        let free = Coords::new(1, 1, 1);
        for i in 0..lat.site_count() {
            let c = lat.site_coords(i);
            if c != free {
                lat.set_occupied(c);
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(lat.random_unoccupied(&mut rng).unwrap(), free);
        }
    }

    #[test]
    fn random_unoccupied_on_full_lattice_errors() {
        let mut lat = Lattice::new(periodic_params(2, 2, 2)).unwrap();
        for i in 0..lat.site_count() {
            lat.set_occupied(lat.site_coords(i));
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(lat.random_unoccupied(&mut rng), Err(LatticeError::Full));
    }

    #[test]
    fn set_energies_rejects_length_mismatch() {
        let mut lat = Lattice::new(periodic_params(2, 2, 2)).unwrap();
        match lat.set_energies(vec![0.0; 3]) {
            Err(LatticeError::EnergyLengthMismatch { expected, got }) => {
                assert_eq!(expected, 8);
                assert_eq!(got, 3);
            }
            other => panic!("expected EnergyLengthMismatch, got {other:?}"),
        }
    }
}
