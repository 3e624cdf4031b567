use derive_more::Display;
use smallvec::SmallVec;
use thiserror::Error;

use crate::graph::IntrinsicIdentity;
use crate::graph::PathNodeGraph;

const MAX_ELEMENTS_DISPLAYED: usize = 80;
const RANDOM_CELL_MAX_TRIES: usize = 10_000;

pub type GridCoord = u32;
pub type GridCost = u32;

pub const ORTHOGONAL_COST: GridCost = 100u32;
pub const DIAGONAL_COST: GridCost = 141u32; // 1.414213562373095

// Offsets applied with wrapping arithmetic.
const PREV: GridCoord = GridCoord::MAX;
const SAME: GridCoord = 0;
const NEXT: GridCoord = 1;

#[rustfmt::skip]
const ORTHOGONAL_MOVES: [(GridCoord, GridCoord); 4] = [
                  (SAME, PREV),
    (PREV, SAME),               (NEXT, SAME),
                  (SAME, NEXT),
];
#[rustfmt::skip]
const ALL_MOVES: [(GridCoord, GridCoord); 8] = [
    (PREV, PREV), (SAME, PREV), (NEXT, PREV),
    (PREV, SAME),               (NEXT, SAME),
    (PREV, NEXT), (SAME, NEXT), (NEXT, NEXT),
];

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("({x},{y})")]
pub struct GridCell {
    pub x: GridCoord,
    pub y: GridCoord,
}

impl GridCell {
    pub fn new(x: GridCoord, y: GridCoord) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    fn deltas(&self, other: &GridCell) -> (GridCoord, GridCoord) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Cell {
    #[display("░")]
    Empty,
    #[display("█")]
    Wall,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
}

impl std::convert::TryFrom<char> for Cell {
    type Error = CellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' | '░' => Ok(Cell::Empty),
            '#' | '█' => Ok(Cell::Wall),
            ch => Err(CellParseError::InvalidCharacter(ch)),
        }
    }
}

/// Which moves are allowed.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
pub enum Connectivity {
    /// Up, down, left and right.
    #[display("4-connected")]
    Four,
    /// Also diagonals, which may cut corners.
    #[default]
    #[display("8-connected")]
    Eight,
}

/// The estimate of the distance to the goal.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq)]
pub enum GridHeuristic {
    /// No estimate, the search behaves as Dijkstra's.
    Zero,
    /// The distance of following straight lines.
    ///
    /// Overestimates on 8-connected grids.
    Manhattan,
    /// The distance of maximising useful diagonals.
    #[default]
    Diagonal,
}

/// A 2D maze where every free cell is a node.
#[derive(Clone)]
pub struct Grid2D {
    map: Vec<Vec<Cell>>,
    connectivity: Connectivity,
    heuristic: GridHeuristic,
}

impl Grid2D {
    pub fn new_from_map(map: Vec<Vec<Cell>>) -> Self {
        Self {
            map,
            connectivity: Connectivity::default(),
            heuristic: GridHeuristic::default(),
        }
    }
    pub fn new_empty_with_dimensions(x: usize, y: usize) -> Self {
        Self::new_from_map(vec![vec![Cell::Empty; x]; y])
    }

    /// A maze where every cell is a wall with the given probability.
    pub fn random<R: rand::Rng>(r: &mut R, x: usize, y: usize, wall_probability: f64) -> Self {
        let map = (0..y)
            .map(|_| {
                (0..x)
                    .map(|_| {
                        if r.random_bool(wall_probability) {
                            Cell::Wall
                        } else {
                            Cell::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Self::new_from_map(map)
    }

    #[must_use]
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: GridHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }
    pub fn heuristic(&self) -> GridHeuristic {
        self.heuristic
    }

    pub fn dimensions(&self) -> (usize, usize) {
        if self.map.is_empty() {
            return (0, 0);
        }
        (self.map[0].len(), self.map.len())
    }

    pub fn at(&self, cell: &GridCell) -> Option<Cell> {
        self.map
            .get(cell.y as usize)
            .and_then(|row| row.get(cell.x as usize))
            .copied()
    }

    pub fn is_free(&self, cell: &GridCell) -> bool {
        self.at(cell) == Some(Cell::Empty)
    }

    pub fn random_free_cell<R: rand::Rng>(&self, r: &mut R) -> Option<GridCell> {
        let (max_x, max_y) = self.dimensions();
        if max_x == 0 || max_y == 0 {
            return None;
        }

        for _tries in 0..RANDOM_CELL_MAX_TRIES {
            let cell = GridCell::new(
                r.random_range(0..max_x) as GridCoord,
                r.random_range(0..max_y) as GridCoord,
            );
            if self.is_free(&cell) {
                return Some(cell);
            }
        }

        None
    }

    /// A problem on this maze with random start and goal.
    pub fn random_problem<R: rand::Rng>(&self, r: &mut R) -> Option<GridProblem> {
        let start = self.random_free_cell(r)?;
        let goal = self.random_free_cell(r)?;
        Some(GridProblem {
            grid: self.clone(),
            start,
            goal,
        })
    }
}

impl PathNodeGraph<GridCell, GridCost> for Grid2D {
    type Identity = IntrinsicIdentity;

    #[inline(always)]
    fn heuristic_cost(&self, node: &GridCell, target: &GridCell) -> GridCost {
        let (delta_x, delta_y) = node.deltas(target);
        match self.heuristic {
            GridHeuristic::Zero => 0,
            // Saturates on distances beyond what a path cost can hold.
            GridHeuristic::Manhattan => delta_x
                .saturating_add(delta_y)
                .saturating_mul(ORTHOGONAL_COST),
            GridHeuristic::Diagonal => {
                let (delta_min, delta_max) = if delta_x < delta_y {
                    (delta_x, delta_y)
                } else {
                    (delta_y, delta_x)
                };
                let diagonal_cost = delta_min.saturating_mul(DIAGONAL_COST);
                let orthogonal_cost = (delta_max - delta_min).saturating_mul(ORTHOGONAL_COST);
                orthogonal_cost.saturating_add(diagonal_cost)
            }
        }
    }

    #[inline(always)]
    fn edge_cost(&self, node: &GridCell, neighbour: &GridCell) -> GridCost {
        match node.deltas(neighbour) {
            (0, 0) => 0,
            (0, 1) | (1, 0) => ORTHOGONAL_COST,
            (1, 1) if self.connectivity == Connectivity::Eight => DIAGONAL_COST,
            _ => GridCost::MAX,
        }
    }

    /// Gets the free cells around a given one.
    fn neighbours(&self, node: &GridCell) -> impl IntoIterator<Item = GridCell> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("StateExpansion");

        let mut v = SmallVec::<[GridCell; 8]>::new();
        let (max_x, max_y) = self.dimensions();

        let moves: &[(GridCoord, GridCoord)] = match self.connectivity {
            Connectivity::Four => &ORTHOGONAL_MOVES,
            Connectivity::Eight => &ALL_MOVES,
        };

        for (dx, dy) in moves {
            let new_x = node.x.wrapping_add(*dx);
            let new_y = node.y.wrapping_add(*dy);
            if (new_x as usize) < max_x && (new_y as usize) < max_y {
                let cell = GridCell::new(new_x, new_y);
                if self.is_free(&cell) {
                    v.push(cell);
                }
            }
        }
        v
    }
}

impl std::fmt::Display for Grid2D {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.dimensions();
        writeln!(f, "Grid2D({}x{}):", d.0, d.1)?;
        for line in self.map.iter().take(MAX_ELEMENTS_DISPLAYED) {
            for cell in line.iter().take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Grid2D {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Grid2D{:?}[{}, {}]",
            self.dimensions(),
            self.connectivity,
            self.heuristic
        )
    }
}

/// A maze with a start and a goal.
#[derive(Clone, Debug)]
pub struct GridProblem {
    grid: Grid2D,
    start: GridCell,
    goal: GridCell,
}

impl GridProblem {
    pub fn new(grid: Grid2D, start: GridCell, goal: GridCell) -> Self {
        Self { grid, start, goal }
    }

    pub fn grid(&self) -> &Grid2D {
        &self.grid
    }
    pub fn into_grid(self) -> Grid2D {
        self.grid
    }
    pub fn start(&self) -> GridCell {
        self.start
    }
    pub fn goal(&self) -> GridCell {
        self.goal
    }

    /// The same maze with another random start and goal.
    pub fn randomize<R: rand::Rng>(&self, r: &mut R) -> Option<GridProblem> {
        self.grid.random_problem(r)
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum GridProblemCell {
    Cell(Cell),
    #[display("S")]
    Start,
    #[display("G")]
    Goal,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridProblemCellParseError {
    #[error("Invalid cell {e}")]
    InvalidCell { e: CellParseError },
}

impl std::convert::TryFrom<char> for GridProblemCell {
    type Error = GridProblemCellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            'S' => Ok(GridProblemCell::Start),
            'G' => Ok(GridProblemCell::Goal),
            ch => {
                let cell =
                    Cell::try_from(ch).map_err(|e| GridProblemCellParseError::InvalidCell { e })?;
                Ok(GridProblemCell::Cell(cell))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum GridProblemParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid cell {e} found at ({x},{y})")]
    InvalidCell {
        e: GridProblemCellParseError,
        x: usize,
        y: usize,
    },
    #[error("Row {y} has {found} cells, expected {expected}")]
    RaggedRow {
        y: usize,
        expected: usize,
        found: usize,
    },
    #[error("No start 'S' found")]
    MissingStart,
    #[error("No goal 'G' found")]
    MissingGoal,
    #[error("Second start found at ({x},{y})")]
    DuplicateStart { x: usize, y: usize },
    #[error("Second goal found at ({x},{y})")]
    DuplicateGoal { x: usize, y: usize },
    #[error("Maze is too large ({x}x{y})")]
    TooLarge { x: usize, y: usize },
    #[error("I/O error when loading '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

impl std::convert::TryFrom<&str> for GridProblem {
    type Error = GridProblemParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();

        if lines.is_empty() || lines[0].is_empty() {
            return Err(GridProblemParseError::EmptyInput);
        }

        let max_x = lines[0].chars().count();
        let max_y = lines.len();
        if max_x >= GridCoord::MAX as usize || max_y >= GridCoord::MAX as usize {
            return Err(GridProblemParseError::TooLarge { x: max_x, y: max_y });
        }

        let mut map = Vec::with_capacity(max_y);
        let mut start = None;
        let mut goal = None;

        for (y, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(max_x);
            for (x, ch) in line.chars().enumerate() {
                let cell = GridProblemCell::try_from(ch)
                    .map_err(|e| GridProblemParseError::InvalidCell { e, x, y })?;
                let here = GridCell::new(x as GridCoord, y as GridCoord);

                row.push(match cell {
                    GridProblemCell::Start => {
                        if start.replace(here).is_some() {
                            return Err(GridProblemParseError::DuplicateStart { x, y });
                        }
                        Cell::Empty
                    }
                    GridProblemCell::Goal => {
                        if goal.replace(here).is_some() {
                            return Err(GridProblemParseError::DuplicateGoal { x, y });
                        }
                        Cell::Empty
                    }
                    GridProblemCell::Cell(c) => c,
                });
            }
            if row.len() != max_x {
                return Err(GridProblemParseError::RaggedRow {
                    y,
                    expected: max_x,
                    found: row.len(),
                });
            }
            map.push(row);
        }

        Ok(GridProblem {
            grid: Grid2D::new_from_map(map),
            start: start.ok_or(GridProblemParseError::MissingStart)?,
            goal: goal.ok_or(GridProblemParseError::MissingGoal)?,
        })
    }
}

impl std::convert::TryFrom<&std::path::Path> for GridProblem {
    type Error = GridProblemParseError;

    fn try_from(p: &std::path::Path) -> Result<Self, Self::Error> {
        let s = std::fs::read_to_string(p).map_err(|e| GridProblemParseError::IOError {
            p: p.to_path_buf(),
            e,
        })?;
        GridProblem::try_from(s.as_str())
    }
}

impl std::fmt::Display for GridProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let d = self.grid.dimensions();
        writeln!(
            f,
            "GridProblem({}x{}) (s:{}, g:{}):",
            d.0, d.1, self.start, self.goal
        )?;
        for (y, line) in self.grid.map.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
            for (x, cell) in line.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
                let here = GridCell::new(x as GridCoord, y as GridCoord);
                match (here == self.start, here == self.goal) {
                    (true, true) => write!(f, "!")?,
                    (true, false) => write!(f, "S")?,
                    (false, true) => write!(f, "G")?,
                    (false, false) => write!(f, "{cell}")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
