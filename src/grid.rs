use std::fmt;

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::BoardOffset;
use crate::camera::Camera;
use crate::cell::Cell;
use crate::cell::CellState;
use crate::color::Color;
use crate::neighborhood::Region;
use crate::point::Point;

/// Smallest side length for which every cell falls in exactly one [`Region`].
pub const MIN_SIDE: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("A {width}x{height} grid is too small, both sides need at least 2 cells")]
    TooSmall { width: usize, height: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardCoordsError {
    #[error("Reset the camera before selecting cells")]
    CameraNotReset,
}

/// What a renderer needs to draw one cell: a `cell_size` square at `(x, y) * cell_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPaint {
    pub x: usize,
    pub y: usize,
    pub fill: Color,

    /// `None` when strokes are turned off
    pub stroke: Option<Color>,
}

/// A fixed-size board of cells, advanced one generation at a time.
///
/// Cells are stored row by row; `(x, y)` lives at `y * width + x`.
pub struct Grid<C> {
    width: usize,
    height: usize,

    /// Side length of a cell on screen. Only used for rendering and pointer mapping.
    cell_size: u32,

    cells: Vec<C>,

    /// Builds every cell, both at construction and on reset
    factory: Box<dyn Fn() -> C>,

    /// Number of updates since construction or the last reset
    generation: u64,
}

impl<C: Cell + Default + 'static> Grid<C> {
    /// Create a grid of default cells.
    pub fn new(width: usize, height: usize, cell_size: u32) -> Result<Self, GridError> {
        Self::with_factory(width, height, cell_size, C::default)
    }
}

impl<C: Cell> Grid<C> {
    /// Create a grid, filling every slot with a fresh cell from `factory`.
    pub fn with_factory<F>(
        width: usize,
        height: usize,
        cell_size: u32,
        factory: F,
    ) -> Result<Self, GridError>
    where
        F: Fn() -> C + 'static,
    {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(GridError::TooSmall { width, height });
        }

        let cells = (0..width * height).map(|_| factory()).collect();

        debug!(width, height, cell_size, "Created grid");

        Ok(Self {
            width,
            height,
            cell_size,
            cells,
            factory: Box::new(factory),
            generation: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    /// Let every cell reseed itself from `rng`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            cell.randomize(rng);
        }

        debug!("Randomized grid");
    }

    /// Advance every cell by one generation.
    ///
    /// All cells read their neighbors from a snapshot of the current generation, so the order in
    /// which cells are updated never matters.
    pub fn update(&mut self) {
        let prev: Vec<CellState> = self.cells.iter().map(Cell::state).collect();
        let mut neighbors = Vec::with_capacity(8);

        for y in 0..self.height {
            for x in 0..self.width {
                let region = self.region(x, y);

                neighbors.clear();
                neighbors.extend(region.neighbors(x, y).map(|(nx, ny)| prev[ny * self.width + nx]));

                let i = self.xy_from(x, y);
                let next = self.cells[i].next_state(&neighbors);
                self.cells[i].set_state(next);
            }
        }

        self.generation += 1;

        debug!(generation = self.generation, "Advanced grid");
    }

    /// Throw every cell away and start over from fresh ones.
    pub fn reset_grid(&mut self) {
        let factory = &self.factory;
        self.cells = (0..self.width * self.height).map(|_| factory()).collect();
        self.generation = 0;

        debug!("Reset grid");
    }

    /// The region `(x, y)` belongs to.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is off the board. Every in-bounds coordinate of a grid of valid size is in
    /// exactly one region.
    pub fn region(&self, x: usize, y: usize) -> Region {
        let Some(region) = Region::classify(x, y, self.width, self.height) else {
            panic!(
                "({x}, {y}) is in no region of a {}x{} grid",
                self.width, self.height
            )
        };

        region
    }

    /// Coordinates of the neighbors of `(x, y)`, in the order a rule receives them.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is off the board, like [`Grid::region`].
    pub fn neighbor_coords(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        self.region(x, y).neighbors(x, y).collect()
    }

    pub fn contains(&self, x: BoardOffset, y: BoardOffset) -> bool {
        (0..self.width as BoardOffset).contains(&x) && (0..self.height as BoardOffset).contains(&y)
    }

    /// The cell at `(x, y)`, or `None` if it is off the board.
    pub fn get(&self, x: usize, y: usize) -> Option<&C> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.xy_from(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut C> {
        if x < self.width && y < self.height {
            let i = self.xy_from(x, y);
            Some(&mut self.cells[i])
        } else {
            None
        }
    }

    /// The cell at `(x, y)`. Anything off the board silently resolves to the cell at `(0, 0)`.
    pub fn cell_at(&self, x: BoardOffset, y: BoardOffset) -> &C {
        &self.cells[self.safe_index(x, y)]
    }

    /// Like [`Grid::cell_at`], with the same fallback to `(0, 0)`.
    pub fn cell_at_mut(&mut self, x: BoardOffset, y: BoardOffset) -> &mut C {
        let i = self.safe_index(x, y);
        &mut self.cells[i]
    }

    /// Cycle the state of the cell at `(x, y)`, falling back to `(0, 0)` like [`Grid::cell_at`].
    pub fn cycle_state(&mut self, x: BoardOffset, y: BoardOffset) {
        self.cell_at_mut(x, y).cycle_state();
    }

    /// Map a pointer position to board coordinates.
    ///
    /// This only works while the camera is at its identity transform, since the pan and zoom are
    /// not undone. The result may be off the board.
    pub fn board_coords(
        &self,
        pointer: Point,
        camera: &Camera,
    ) -> Result<(BoardOffset, BoardOffset), BoardCoordsError> {
        if !camera.is_identity() {
            return Err(BoardCoordsError::CameraNotReset);
        }

        let cell_size = self.cell_size as f64;

        // Round half up, negative values included
        let round = |v: f64| (v + 0.5).floor() as BoardOffset;
        let f = |v: f64| round(v / cell_size - 0.5);

        Ok((f(pointer.x), f(pointer.y)))
    }

    /// Everything a renderer needs to draw the board, one entry per cell in row order.
    pub fn paint(&self, stroke: bool) -> impl Iterator<Item = CellPaint> + '_ {
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let (x, y) = self.xy_to(i);

            CellPaint {
                x,
                y,
                fill: cell.fill_color(),
                stroke: stroke.then(|| cell.stroke_color()),
            }
        })
    }

    fn safe_index(&self, x: BoardOffset, y: BoardOffset) -> usize {
        if self.contains(x, y) {
            self.xy_from(x as usize, y as usize)
        } else {
            0
        }
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.width, n / self.width)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

/// One row per line, states separated by spaces.
impl<C: Cell> fmt::Display for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.width).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }

            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }

                write!(f, "{}", cell.state())?;
            }
        }

        Ok(())
    }
}

impl<C: Cell> fmt::Debug for Grid<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cell_size", &self.cell_size)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
