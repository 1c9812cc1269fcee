//! Integration test: layout, alignment and ownership properties of
//! `FieldGrid` across sizes and precisions.

use proptest::prelude::*;
use rkfield::prelude::*;
use rkfield::types::ALIGN_BYTES;
use rkfield_test_utils::{scatter_status, seeded_grid};

fn assert_layout<R: Real>(grid: &FieldGrid<R>) {
    let padded = grid.padded_size();
    assert!(padded >= grid.active_size());
    assert_eq!(padded % R::LANES, 0);
    assert!(padded - grid.active_size() < R::LANES);

    if grid.is_empty() && padded == 0 {
        for kind in FieldKind::ALL {
            assert!(grid.field_ptr(kind).is_null());
        }
        return;
    }
    let base = grid.field_ptr(FieldKind::Potential) as usize;
    for kind in FieldKind::ALL {
        let addr = grid.field_ptr(kind) as usize;
        assert_eq!(addr % ALIGN_BYTES, 0, "{kind} misaligned");
        assert_eq!(
            addr - base,
            kind.index() * padded * std::mem::size_of::<R>(),
            "{kind} not contiguous"
        );
    }
}

// ── Construction ─────────────────────────────────────────────────────

#[test]
fn defaults_cover_padding() {
    let grid = FieldGrid::<f64>::new(3, 3);
    assert_eq!(grid.padded_size(), 16);
    assert!(grid.mass().iter().all(|&m| m == 1.0));
    assert!(grid.friction().iter().all(|&f| f == 0.1));
    for kind in [FieldKind::Potential, FieldKind::Vx, FieldKind::Vy, FieldKind::Pressure] {
        assert!(grid.field(kind).iter().all(|&v| v == 0.0), "{kind}");
    }
    assert_eq!(grid.status().count_ones(), 0);
}

#[test]
fn f32_grids_pad_to_sixteen() {
    let grid = FieldGrid::<f32>::new(5, 5);
    assert_eq!(grid.padded_size(), 32);
    assert_layout(&grid);
}

#[test]
fn empty_grid_has_no_storage() {
    let grid = FieldGrid::<f64>::new(0, 0);
    assert_eq!(grid.memory_bytes(), 0);
    assert_layout(&grid);
    assert_eq!(grid, FieldGrid::default());
}

#[test]
fn overflowing_dimensions_are_rejected() {
    let err = FieldGrid::<f64>::try_new(usize::MAX, 3).unwrap_err();
    assert!(matches!(err, GridError::DimensionOverflow { .. }));
}

// ── Ownership ────────────────────────────────────────────────────────

#[test]
fn clone_is_deep_and_aligned() {
    let mut original = seeded_grid(13, 7, 11);
    scatter_status(&mut original, 0.3, 11);
    let copy = original.clone();

    assert_eq!(copy, original);
    assert_layout(&copy);
    for kind in FieldKind::ALL {
        assert_ne!(copy.field_ptr(kind), original.field_ptr(kind));
    }

    original.fill(FieldKind::Pressure, -1.0);
    original.set_state(0, !copy.get_state(0));
    assert_ne!(copy.field(FieldKind::Pressure), original.field(FieldKind::Pressure));
    assert_ne!(copy.get_state(0), original.get_state(0));
}

#[test]
fn clone_from_across_shapes() {
    let source = seeded_grid(9, 4, 2);
    let mut target = FieldGrid::<f64>::new(2, 2);
    target.clone_from(&source);
    assert_eq!(target, source);
    assert_layout(&target);

    let mut same = FieldGrid::<f64>::new(9, 4);
    let ptr = same.field_ptr(FieldKind::Mass);
    same.clone_from(&source);
    assert_eq!(same, source);
    assert_eq!(same.field_ptr(FieldKind::Mass), ptr);
}

#[test]
fn move_keeps_buffer_and_take_empties_source() {
    let mut grid = seeded_grid(6, 6, 5);
    let ptr = grid.field_ptr(FieldKind::Vx);
    let snapshot = grid.clone();

    let moved = grid.take();
    assert_eq!(moved.field_ptr(FieldKind::Vx), ptr);
    assert_eq!(moved, snapshot);

    assert!(grid.is_empty());
    assert_eq!((grid.width(), grid.height()), (0, 0));
    assert!(grid.field_ptr(FieldKind::Vx).is_null());

    // The emptied grid is still usable.
    grid = moved;
    assert_eq!(grid.active_size(), 36);
}

// ── Cell access ──────────────────────────────────────────────────────

#[test]
fn row_major_cell_access() {
    let mut grid = FieldGrid::<f64>::new(4, 3);
    grid.set(FieldKind::Vy, 3, 2, 7.5).unwrap();
    assert_eq!(grid.index(3, 2), Some(11));
    assert_eq!(grid.vy()[11], 7.5);
    assert_eq!(grid.get(FieldKind::Vy, 3, 2), Some(7.5));
    assert_eq!(grid.get(FieldKind::Vy, 4, 0), None);
    assert!(grid.set(FieldKind::Vy, 0, 3, 1.0).is_err());
}

#[test]
fn status_bits_are_bounds_checked() {
    let mut grid = FieldGrid::<f64>::new(3, 3);
    grid.set_state(8, true);
    assert!(grid.get_state(8));
    // Index 9 lies in the padding of the fields and inside the status
    // word, but outside the active cells.
    assert!(matches!(
        grid.try_get_state(9),
        Err(StatusError::OutOfRange { index: 9, len: 9 })
    ));
    assert!(grid.try_set_state(100, true).is_err());
}

// ── Property tests ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_shape_is_aligned_f64(width in 0usize..48, height in 0usize..48) {
        let grid = FieldGrid::<f64>::new(width, height);
        assert_layout(&grid);
        assert_layout(&grid.clone());
    }

    #[test]
    fn every_shape_is_aligned_f32(width in 0usize..48, height in 0usize..48) {
        let grid = FieldGrid::<f32>::new(width, height);
        assert_layout(&grid);
        assert_layout(&grid.clone());
    }

    #[test]
    fn writes_stay_in_their_field(
        width in 1usize..20,
        height in 1usize..20,
        field in 0usize..FIELD_COUNT,
        value in -1e6f64..1e6,
    ) {
        let kind = FieldKind::from_index(field).unwrap();
        let mut grid = FieldGrid::<f64>::new(width, height);
        let reference = grid.clone();
        let (x, y) = (width - 1, height - 1);
        grid.set(kind, x, y, value).unwrap();
        for other in FieldKind::ALL {
            if other != kind {
                prop_assert_eq!(grid.field(other), reference.field(other));
            }
        }
        prop_assert_eq!(grid.get(kind, x, y), Some(value));
    }
}
