//! Per-axis boundary behavior.

/// How one lattice axis handles displacements past its edge.
///
/// Each of the three axes carries its own `Boundary`, so a film can be
/// periodic in-plane while hard-walled through its thickness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Out-of-range positions wrap to the opposite side (torus axis).
    Periodic,
    /// Out-of-range positions do not exist; moves past the edge are invalid.
    Hard,
}

impl Boundary {
    /// Resolve a raw axis value against this boundary.
    ///
    /// Returns the in-range position, or `None` when a hard axis would
    /// be left. The double modulo handles negative values.
    pub(crate) fn resolve(self, val: i32, len: i32) -> Option<i32> {
        if (0..len).contains(&val) {
            return Some(val);
        }
        match self {
            Boundary::Periodic => Some(((val % len) + len) % len),
            Boundary::Hard => None,
        }
    }

    /// Shortest separation between two in-range positions along this axis.
    pub(crate) fn axis_distance(self, a: i32, b: i32, len: i32) -> i32 {
        let diff = (a - b).abs();
        match self {
            Boundary::Periodic => diff.min(len - diff),
            Boundary::Hard => diff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_wraps_both_directions() {
        assert_eq!(Boundary::Periodic.resolve(-1, 10), Some(9));
        assert_eq!(Boundary::Periodic.resolve(10, 10), Some(0));
        assert_eq!(Boundary::Periodic.resolve(-13, 10), Some(7));
        assert_eq!(Boundary::Periodic.resolve(23, 10), Some(3));
    }

    #[test]
    fn hard_rejects_out_of_range() {
        assert_eq!(Boundary::Hard.resolve(-1, 10), None);
        assert_eq!(Boundary::Hard.resolve(10, 10), None);
        assert_eq!(Boundary::Hard.resolve(5, 10), Some(5));
    }

    #[test]
    fn periodic_axis_distance_takes_short_way_around() {
        assert_eq!(Boundary::Periodic.axis_distance(0, 9, 10), 1);
        assert_eq!(Boundary::Periodic.axis_distance(2, 7, 10), 5);
        assert_eq!(Boundary::Hard.axis_distance(0, 9, 10), 9);
    }
}
