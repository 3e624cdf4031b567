use std::path::PathBuf;

use anstream::println;
use clap::Parser;
use clap::ValueEnum;
use hrsw::Stopwatch;
use human_duration::human_duration;
use indoc::indoc;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use rustc_hash::FxHashSet;
use thiserror::Error;

use astar_pathfinding::AStar;
use astar_pathfinding::problems::grid::Cell;
use astar_pathfinding::problems::grid::Connectivity;
use astar_pathfinding::problems::grid::Grid2D;
use astar_pathfinding::problems::grid::GridCell;
use astar_pathfinding::problems::grid::GridCoord;
use astar_pathfinding::problems::grid::GridCost;
use astar_pathfinding::problems::grid::GridHeuristic;
use astar_pathfinding::problems::grid::GridProblem;
use astar_pathfinding::problems::grid::GridProblemParseError;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const BUILT_IN_MAZE: &str = indoc! {"
    ###########
    #S  #     #
    # # # ### #
    # #   #   #
    # ##### # #
    #       #G#
    ###########
"};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum HeuristicArg {
    Zero,
    Manhattan,
    Diagonal,
}

impl From<HeuristicArg> for GridHeuristic {
    fn from(h: HeuristicArg) -> Self {
        match h {
            HeuristicArg::Zero => GridHeuristic::Zero,
            HeuristicArg::Manhattan => GridHeuristic::Manhattan,
            HeuristicArg::Diagonal => GridHeuristic::Diagonal,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ConnectivityArg {
    Four,
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(c: ConnectivityArg) -> Self {
        match c {
            ConnectivityArg::Four => Connectivity::Four,
            ConnectivityArg::Eight => Connectivity::Eight,
        }
    }
}

/// Solves mazes with A*
#[derive(Parser, Debug)]
#[clap(long_version = astar_pathfinding::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze files. '#' are walls, ' ' or '.' free cells, 'S' the start and 'G'
    /// the goal. Solves a built-in maze if none is given.
    #[arg()]
    pub problems: Vec<PathBuf>,

    #[arg(long, value_enum, env = "MAZE_HEURISTIC", default_value_t = HeuristicArg::Diagonal)]
    pub heuristic: HeuristicArg,
    #[arg(long, value_enum, env = "MAZE_CONNECTIVITY", default_value_t = ConnectivityArg::Eight)]
    pub connectivity: ConnectivityArg,

    /// Random start/goal pairs to also solve on every maze.
    #[arg(long, default_value_t = 0u64)]
    pub random: u64,
    #[arg(long, default_value_t = 0u64)]
    pub seed: u64,

    /// Prints memory stats after every search.
    #[arg(long)]
    pub stats: bool,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
pub enum MazeError {
    #[error(transparent)]
    Parse(#[from] GridProblemParseError),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

fn render(grid: &Grid2D, start: GridCell, goal: GridCell, path: &FxHashSet<GridCell>) -> String {
    let (max_x, max_y) = grid.dimensions();
    let mut s = String::with_capacity((max_x + 1) * max_y);
    for y in 0..max_y {
        for x in 0..max_x {
            let here = GridCell::new(x as GridCoord, y as GridCoord);
            let glyph = if here == start {
                "S".green().bold().to_string()
            } else if here == goal {
                "G".red().bold().to_string()
            } else if path.contains(&here) {
                "•".yellow().to_string()
            } else if grid.at(&here) == Some(Cell::Wall) {
                "█".dimmed().to_string()
            } else {
                " ".to_string()
            };
            s.push_str(&glyph);
        }
        s.push('\n');
    }
    s
}

fn solve(
    search: &mut AStar<Grid2D, GridCell, GridCost>,
    start: GridCell,
    goal: GridCell,
    print_stats: bool,
) -> Result<(), MazeError> {
    let mut stopwatch = Stopwatch::new_started();
    let path = search.shortest_reversed_path(&start, &goal);
    stopwatch.stop();

    let on_path: FxHashSet<GridCell> = path
        .as_ref()
        .map(|p| p.nodes().iter().copied().collect())
        .unwrap_or_default();
    println!("{}", render(search.graph(), start, goal, &on_path));

    match &path {
        Some(path) => println!(
            "{} {} -> {}: {} steps, cost {}",
            "Path".green(),
            start,
            goal,
            path.steps(),
            path.cost().bold()
        ),
        None => println!("{} {} -> {}", "No path".red(), start, goal),
    }
    println!(
        "{} ({})",
        search.stats(),
        human_duration(&stopwatch.elapsed())
    );
    if print_stats {
        search.print_memory_stats()?;
    }

    Ok(())
}

fn main() -> Result<(), MazeError> {
    let args = Args::parse();
    args.color.write_global();

    let mut problems = vec![];
    if args.problems.is_empty() {
        problems.push(("built-in".to_string(), GridProblem::try_from(BUILT_IN_MAZE)?));
    }
    for p in &args.problems {
        problems.push((p.display().to_string(), GridProblem::try_from(p.as_path())?));
    }

    for (name, problem) in problems {
        let (start, goal) = (problem.start(), problem.goal());
        let grid = problem
            .into_grid()
            .with_heuristic(args.heuristic.into())
            .with_connectivity(args.connectivity.into());
        println!("{} {} {:?}", "**".blue(), name.bold(), grid);

        let mut search = AStar::new(grid);
        solve(&mut search, start, goal, args.stats)?;

        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        for instance in 0..args.random {
            let grid = search.graph();
            match (grid.random_free_cell(&mut rng), grid.random_free_cell(&mut rng)) {
                (Some(start), Some(goal)) => {
                    println!("{} {name} random instance {instance}", "***".blue());
                    solve(&mut search, start, goal, args.stats)?;
                }
                _ => {
                    log::warn!("No free cells in {name} for random instance {instance}");
                    break;
                }
            }
        }
    }

    Ok(())
}
