#![no_main]

use libfuzzer_sys::fuzz_target;

use astar_pathfinding::AStar;
use astar_pathfinding::problems::grid::Cell;
use astar_pathfinding::problems::grid::Grid2D;
use astar_pathfinding::problems::grid::GridCell;
use astar_pathfinding::problems::grid::GridHeuristic;

const WIDTH: usize = 16;

// The first 4 bytes pick the start and goal, every other bit is a cell.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 + WIDTH / 8 {
        return;
    }
    let (ends, cells) = data.split_at(4);
    let map: Vec<Vec<Cell>> = cells
        .chunks_exact(WIDTH / 8)
        .map(|row| {
            (0..WIDTH)
                .map(|x| match (row[x / 8] >> (x % 8)) & 1 {
                    0 => Cell::Empty,
                    _ => Cell::Wall,
                })
                .collect()
        })
        .collect();
    let height = map.len() as u32;
    let start = GridCell::new(ends[0] as u32 % WIDTH as u32, ends[1] as u32 % height);
    let goal = GridCell::new(ends[2] as u32 % WIDTH as u32, ends[3] as u32 % height);

    let grid = Grid2D::new_from_map(map);
    if !grid.is_free(&start) || !grid.is_free(&goal) {
        return;
    }

    let mut informed = AStar::new(grid.clone().with_heuristic(GridHeuristic::Diagonal));
    let mut blind = AStar::new(grid.with_heuristic(GridHeuristic::Zero));

    let informed_path = informed.shortest_reversed_path(&start, &goal);
    let blind_path = blind.shortest_reversed_path(&start, &goal);
    assert_eq!(
        informed_path.as_ref().map(|p| p.cost()),
        blind_path.as_ref().map(|p| p.cost())
    );

    if let Some(path) = informed_path {
        assert_eq!(path.target(), &goal);
        assert_eq!(path.start(), &start);
        // Searching again reuses the cache and must not change the answer.
        let again = informed.shortest_reversed_path(&start, &goal);
        assert_eq!(again.map(|p| p.cost()), Some(path.cost()));
    }
});
