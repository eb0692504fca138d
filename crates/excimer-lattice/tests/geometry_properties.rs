//! Property tests for lattice geometry: index mapping, destination
//! wrapping, and distance symmetry.

use excimer_core::Coords;
use excimer_lattice::{Boundary, Lattice, LatticeParams};
use proptest::prelude::*;

fn boundary() -> impl Strategy<Value = Boundary> {
    prop_oneof![Just(Boundary::Periodic), Just(Boundary::Hard)]
}

fn params() -> impl Strategy<Value = LatticeParams> {
    (
        1u32..=12,
        1u32..=12,
        1u32..=12,
        0.5f64..4.0,
        [boundary(), boundary(), boundary()],
    )
        .prop_map(|(length, width, height, unit_size, boundaries)| LatticeParams {
            length,
            width,
            height,
            unit_size,
            boundaries,
        })
}

proptest! {
    #[test]
    fn site_index_round_trips(params in params(), index_seed in any::<usize>()) {
        let lat = Lattice::new(params).unwrap();
        let index = index_seed % lat.site_count();
        let coords = lat.site_coords(index);
        prop_assert!(lat.contains(coords));
        prop_assert_eq!(lat.site_index(coords), index);
    }

    #[test]
    fn full_axis_displacement_wraps_to_origin(
        (l, w, h) in (1u32..=10, 1u32..=10, 1u32..=10),
        (fx, fy, fz) in (-3i32..=3, -3i32..=3, -3i32..=3),
        coord_seed in any::<usize>(),
    ) {
        let lat = Lattice::new(LatticeParams {
            length: l,
            width: w,
            height: h,
            unit_size: 1.0,
            boundaries: [Boundary::Periodic; 3],
        })
        .unwrap();
        let origin = lat.site_coords(coord_seed % lat.site_count());
        let dest = lat.destination(origin, fx * l as i32, fy * w as i32, fz * h as i32);
        prop_assert_eq!(dest, Some(origin));
    }

    #[test]
    fn destination_stays_in_box(
        params in params(),
        coord_seed in any::<usize>(),
        (di, dj, dk) in (-15i32..=15, -15i32..=15, -15i32..=15),
    ) {
        let lat = Lattice::new(params).unwrap();
        let origin = lat.site_coords(coord_seed % lat.site_count());
        if let Some(dest) = lat.destination(origin, di, dj, dk) {
            prop_assert!(lat.contains(dest));
        }
    }

    #[test]
    fn real_distance_is_symmetric(
        params in params(),
        seed_a in any::<usize>(),
        seed_b in any::<usize>(),
    ) {
        let lat = Lattice::new(params).unwrap();
        let a = lat.site_coords(seed_a % lat.site_count());
        let b = lat.site_coords(seed_b % lat.site_count());
        prop_assert_eq!(lat.real_distance(a, b), lat.real_distance(b, a));
        prop_assert_eq!(lat.real_distance(a, a), 0.0);
        prop_assert!(lat.real_distance(a, b) >= 0.0);
    }
}

#[test]
fn coords_display_round_trip_with_site_index() {
    let lat = Lattice::new(LatticeParams {
        length: 3,
        width: 4,
        height: 5,
        unit_size: 1.0,
        boundaries: [Boundary::Hard; 3],
    })
    .unwrap();
    assert_eq!(lat.site_index(Coords::new(0, 0, 0)), 0);
    assert_eq!(lat.site_index(Coords::new(2, 3, 4)), lat.site_count() - 1);
}
