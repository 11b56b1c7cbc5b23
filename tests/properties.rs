use proptest::prelude::*;

use parlife::B3S23;
use parlife::Grid;
use parlife::SimulationConfig;
use parlife::simulate;

fn grid() -> impl Strategy<Value = Grid> {
    (0u32..=4)
        .prop_map(|k| 1usize << k)
        .prop_flat_map(|n| {
            prop::collection::vec(any::<bool>(), n * n).prop_map(move |cells| (n, cells))
        })
        .prop_map(|(n, cells)| Grid::from_cells(n, cells).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn parallel_matches_sequential(grid in grid(), workers in 1usize..=8, generations in 0u64..=4) {
        let expected = (0..generations).fold(grid.clone(), |g, _| g.next_generation(&B3S23));

        let config = SimulationConfig { generations, workers, rules: B3S23 };
        let outcome = simulate(&grid, &config).unwrap();

        let n = grid.side() as u64;
        prop_assert_eq!(outcome.leaf_tasks, generations * n * n);
        prop_assert_eq!(outcome.grid, expected);
    }

    #[test]
    fn pool_size_is_invisible(grid in grid(), a in 1usize..=6, b in 1usize..=6) {
        let run = |workers| {
            let config = SimulationConfig { generations: 3, workers, rules: B3S23 };
            simulate(&grid, &config).unwrap()
        };

        let (left, right) = (run(a), run(b));

        prop_assert_eq!(left.tasks_processed, right.tasks_processed);
        prop_assert_eq!(left.grid, right.grid);
    }
}
