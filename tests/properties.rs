use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use cellgrid::camera::Camera;
use cellgrid::cell::BaseCell;
use cellgrid::cell::Cell;
use cellgrid::cell::ExampleCell;
use cellgrid::grid::Grid;
use cellgrid::neighborhood::Region;
use cellgrid::point::Point;

fn example_grid(width: usize, height: usize) -> Grid<ExampleCell> {
    Grid::new(width, height, 15).unwrap()
}

proptest! {
    #[test]
    fn fresh_cells_start_at_zero(width in 2usize..24, height in 2usize..24) {
        let grid = example_grid(width, height);

        prop_assert!(grid.cells().iter().all(|c| c.state() == 0));
        prop_assert_eq!(grid.cells().len(), width * height);
    }

    #[test]
    fn randomized_states_stay_in_range(width in 2usize..24, height in 2usize..24, seed: u64) {
        let mut grid = example_grid(width, height);
        grid.randomize(&mut StdRng::seed_from_u64(seed));

        prop_assert!(grid.cells().iter().all(|c| c.state() < c.states_count()));
    }

    #[test]
    fn all_zero_is_a_fixed_point(width in 2usize..24, height in 2usize..24, steps in 1usize..5) {
        let mut grid: Grid<BaseCell> = Grid::new(width, height, 15).unwrap();

        for _ in 0..steps {
            grid.update();
        }

        prop_assert!(grid.cells().iter().all(|c| c.state() == 0));
    }

    #[test]
    fn neighbor_counts_by_region(width in 3usize..24, height in 3usize..24) {
        let grid = example_grid(width, height);

        for y in 0..height {
            for x in 0..width {
                let on_x_edge = x == 0 || x == width - 1;
                let on_y_edge = y == 0 || y == height - 1;

                let expected = match (on_x_edge, on_y_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };

                let neighbors = grid.neighbor_coords(x, y);
                prop_assert_eq!(neighbors.len(), expected, "({}, {})", x, y);
                prop_assert!(neighbors.iter().all(|&(nx, ny)| nx < width && ny < height));
                prop_assert!(!neighbors.contains(&(x, y)));
            }
        }
    }

    #[test]
    fn every_cell_has_a_region(width in 2usize..24, height in 2usize..24) {
        for y in 0..height {
            for x in 0..width {
                prop_assert!(Region::classify(x, y, width, height).is_some());
            }
        }
    }

    #[test]
    fn eight_cycles_return_to_start(state in 0u32..8) {
        let mut cell = ExampleCell::new(state);

        for _ in 0..8 {
            cell.cycle_state();
        }

        prop_assert_eq!(cell.state(), state);
    }

    #[test]
    fn single_state_cells_never_cycle(state in 0u32..1000) {
        let mut cell = BaseCell::new(state);
        cell.cycle_state();

        prop_assert_eq!(cell.state(), state);
    }

    #[test]
    fn zoom_stays_clamped(steps in prop::collection::vec(any::<bool>(), 0..64)) {
        let mut cam = Camera::new();
        let mut tenths: i32 = 10;

        for zoom_in in steps {
            if zoom_in {
                cam.zoom_in();
                tenths = (tenths + 1).min(20);
            } else {
                cam.zoom_out();
                tenths = (tenths - 1).max(5);
            }

            prop_assert!((Camera::MIN_SCALE..=Camera::MAX_SCALE).contains(&cam.scale()));
            prop_assert_eq!(cam.scale(), tenths as f64 / 10.0);
        }
    }

    #[test]
    fn board_coords_at_identity_are_floored(x in 0u32..2000, y in 0u32..2000, cell_size in 1u32..40) {
        let grid: Grid<BaseCell> = Grid::new(4, 4, cell_size).unwrap();

        let coords = grid.board_coords(Point::new(x as f64, y as f64), &Camera::new());

        prop_assert_eq!(coords, Ok(((x / cell_size) as i64, (y / cell_size) as i64)));
    }

    #[test]
    fn reset_then_update_matches_fresh_grid(
        width in 2usize..16,
        height in 2usize..16,
        first in any::<u64>(),
        second in any::<u64>(),
        warmup in 0usize..4,
    ) {
        let mut reused = example_grid(width, height);
        reused.randomize(&mut StdRng::seed_from_u64(first));
        for _ in 0..warmup {
            reused.update();
        }

        reused.reset_grid();
        reused.randomize(&mut StdRng::seed_from_u64(second));
        reused.update();

        let mut fresh = example_grid(width, height);
        fresh.randomize(&mut StdRng::seed_from_u64(second));
        fresh.update();

        prop_assert_eq!(reused.to_string(), fresh.to_string());
        prop_assert_eq!(reused.generation(), 1);
    }
}

#[test]
fn zoom_limits() {
    let mut cam = Camera::new();

    for _ in 0..20 {
        cam.zoom_in();
    }
    assert_eq!(cam.scale(), 2.0);

    for _ in 0..20 {
        cam.zoom_out();
    }
    assert_eq!(cam.scale(), 0.5);
}

#[test]
fn board_coords_need_identity_camera() {
    let grid: Grid<BaseCell> = Grid::new(50, 50, 15).unwrap();
    let mut cam = Camera::new();

    assert_eq!(grid.board_coords(Point::new(22.0, 22.0), &cam), Ok((1, 1)));

    cam.zoom_out();
    assert!(grid.board_coords(Point::new(22.0, 22.0), &cam).is_err());
}
