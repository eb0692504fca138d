//! Integer site coordinates.

use std::fmt;

/// A site position on the 3D lattice.
///
/// Coordinates are plain lattice-unit integers; conversion to physical
/// distances (nm) is owned by the lattice, which knows the unit size.
/// A `Coords` value is only meaningful relative to the lattice that
/// produced it; the engine never constructs coordinates outside
/// `[0, dim)` on any axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coords {
    /// Position along the x axis (length).
    pub x: i32,
    /// Position along the y axis (width).
    pub y: i32,
    /// Position along the z axis (height).
    pub z: i32,
}

impl Coords {
    /// Create a coordinate triple.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The coordinate values as an array, in `[x, y, z]` axis order.
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for Coords {
    fn from(v: [i32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.x, self.y, self.z)
    }
}
