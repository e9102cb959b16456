use rand::{SeedableRng, rngs::StdRng};
use tableau_ngin::{
    config::FieldConfig,
    data_structures::field::{self, GridCell, MaterialClass},
};

use crate::common::test_utils::assert_close;

mod common;

fn uniform_field(grid_size: i32) -> FieldConfig {
    FieldConfig {
        grid_size,
        skip_probability: 0.0,
        accent_probability: 0.0,
        ..Default::default()
    }
}

#[test]
fn should_be_empty_for_non_positive_grid_sizes() {
    let mut rng = StdRng::seed_from_u64(1);
    for grid_size in [0, -1, -20] {
        let config = FieldConfig {
            grid_size,
            ..Default::default()
        };
        assert!(field::generate(&config, &mut rng).is_empty());
        assert_eq!(field::cells(grid_size).count(), 0);
    }
}

#[test]
fn should_draw_phase_and_speed_within_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let objects = field::generate(&FieldConfig::default(), &mut rng);
    assert!(!objects.is_empty());
    for object in &objects {
        assert!((0.0..100.0).contains(&object.phase_offset()));
        assert!((0.001..0.003).contains(&object.speed()));
    }
}

#[test]
fn should_follow_checkerboard_without_accents() {
    let mut rng = StdRng::seed_from_u64(3);
    let objects = field::generate(&uniform_field(6), &mut rng);
    assert_eq!(objects.len(), 12 * 12);
    for object in &objects {
        let cell = object.cell();
        let expected = if (cell.x.abs() + cell.z.abs()) % 2 == 0 {
            MaterialClass::Primary
        } else {
            MaterialClass::Secondary
        };
        assert_eq!(object.material(), expected, "cell {:?}", cell);
    }
}

#[test]
fn should_lay_out_the_smallest_grid() {
    let mut rng = StdRng::seed_from_u64(9);
    let objects = field::generate(&uniform_field(1), &mut rng);

    let cells: Vec<GridCell> = objects.iter().map(|object| object.cell()).collect();
    assert_eq!(
        cells,
        vec![
            GridCell::new(-1, -1),
            GridCell::new(-1, 0),
            GridCell::new(0, -1),
            GridCell::new(0, 0),
        ]
    );
    let materials: Vec<MaterialClass> = objects.iter().map(|object| object.material()).collect();
    assert_eq!(
        materials,
        vec![
            MaterialClass::Primary,
            MaterialClass::Secondary,
            MaterialClass::Secondary,
            MaterialClass::Primary,
        ]
    );

    let first = objects[0].base_position();
    assert_close(first.x, -4.0);
    assert_close(first.y, (-1.0f32).sin() * 2.0);
    assert_close(first.z, -54.0);
    let last = objects[3].base_position();
    assert_close(last.x, 0.0);
    assert_close(last.y, 0.0);
    assert_close(last.z, -50.0);
}

#[test]
fn should_reproduce_a_field_from_the_same_seed() {
    let config = FieldConfig::default();
    let a = field::generate(&config, &mut StdRng::seed_from_u64(11));
    let b = field::generate(&config, &mut StdRng::seed_from_u64(11));
    let c = field::generate(&config, &mut StdRng::seed_from_u64(12));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn should_honour_extreme_probabilities() {
    let mut rng = StdRng::seed_from_u64(5);
    let everything_skipped = FieldConfig {
        grid_size: 4,
        skip_probability: 1.0,
        ..Default::default()
    };
    assert!(field::generate(&everything_skipped, &mut rng).is_empty());

    let all_accents = FieldConfig {
        grid_size: 4,
        skip_probability: 0.0,
        accent_probability: 1.0,
        ..Default::default()
    };
    let objects = field::generate(&all_accents, &mut rng);
    assert_eq!(objects.len(), 64);
    assert!(objects.iter().all(|o| o.material() == MaterialClass::Accent));
}

#[test]
fn should_skip_roughly_the_configured_share() {
    let mut rng = StdRng::seed_from_u64(2024);
    let objects = field::generate(&FieldConfig::default(), &mut rng);
    // 1600 cells, 30% skipped on average
    assert!(objects.len() > 1000 && objects.len() < 1240, "{}", objects.len());
}

#[test]
fn should_tolerate_empty_parameter_ranges() {
    let config = FieldConfig {
        grid_size: 2,
        skip_probability: 0.0,
        phase_range: [5.0, 5.0],
        speed_range: [0.003, 0.001],
        ..Default::default()
    };
    let objects = field::generate(&config, &mut StdRng::seed_from_u64(8));
    assert_eq!(objects.len(), 16);
    for object in &objects {
        assert_eq!(object.phase_offset(), 5.0);
        assert_eq!(object.speed(), 0.003);
    }
}

#[test]
fn should_count_cells_without_overflowing() {
    assert_eq!(field::cell_count(-3), 0);
    assert_eq!(field::cell_count(1), 4);
    assert_eq!(field::cell_count(20), 1600);
    assert_eq!(field::cell_count(40_000), 6_400_000_000);
    assert_eq!(field::cell_count(i32::MAX), 4_294_967_294u64.pow(2));
}
