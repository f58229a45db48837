use rand::Rng;

use crate::color::Color;

/// The state of a single cell. Valid states for a variant live in `[0, states_count)`.
pub type CellState = u32;

/// Modulus of the default rule.
pub const DEFAULT_RULE_MODULUS: CellState = 8;

/// The default rule: sum the neighbor states and reduce modulo 8.
///
/// `2^32` is a multiple of 8, so wrapping on overflow does not change the result.
pub fn sum_mod_8(neighbors: &[CellState]) -> CellState {
    let sum = neighbors.iter().fold(0, |acc: CellState, &s| acc.wrapping_add(s));

    sum % DEFAULT_RULE_MODULUS
}

/// A unit of automaton state together with the rule that advances it.
///
/// A cell knows nothing about where it sits on the board; position is purely an index into the
/// [`Grid`](crate::grid::Grid).
///
/// # Neighbors
///
/// [`Cell::next_state`] only ever sees the raw states of the previous generation, never live cells.
/// Any per-cell data a variant carries beyond its state is therefore invisible to its neighbors.
pub trait Cell {
    fn state(&self) -> CellState;

    fn set_state(&mut self, state: CellState);

    /// Compute the state of this cell in the next generation from the states of its neighbors in
    /// the current one. Neighbors come in the fixed order of
    /// [`Region::offsets`](crate::neighborhood::Region::offsets).
    fn next_state(&self, neighbors: &[CellState]) -> CellState {
        sum_mod_8(neighbors)
    }

    /// Number of states this cell can be cycled or randomized through.
    fn states_count(&self) -> CellState {
        1
    }

    fn fill_color(&self) -> Color {
        Color::WHITE
    }

    fn stroke_color(&self) -> Color {
        Color::BLACK
    }

    /// Seed the cell. Does nothing unless a variant opts in.
    fn randomize<R: Rng + ?Sized>(&mut self, _rng: &mut R) {}

    /// Advance to the next state, wrapping back to 0 after the last one. Cells with a single
    /// state are left untouched.
    fn cycle_state(&mut self) {
        let n = self.states_count();
        if n <= 1 {
            return;
        }

        let next = (self.state() % n + 1) % n;
        self.set_state(next);
    }
}

/// The plain cell: one cyclable state, white, default rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BaseCell {
    state: CellState,
}

impl BaseCell {
    pub const fn new(state: CellState) -> Self {
        Self { state }
    }
}

impl Cell for BaseCell {
    fn state(&self) -> CellState {
        self.state
    }

    fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// Fill colors of [`ExampleCell`], indexed by state.
const PALETTE: [Color; 8] = [
    Color::rgb(0, 0, 0),
    Color::rgb(255, 0, 0),
    Color::rgb(255, 126, 0),
    Color::rgb(255, 255, 0),
    Color::rgb(0, 255, 0),
    Color::rgb(0, 126, 255),
    Color::rgb(255, 0, 255),
    Color::rgb(0, 255, 255),
];

/// Eight states with a fixed palette, seeded uniformly at random. Uses the default rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExampleCell {
    state: CellState,
}

impl ExampleCell {
    pub const STATES: CellState = 8;

    pub const fn new(state: CellState) -> Self {
        Self { state }
    }
}

impl Cell for ExampleCell {
    fn state(&self) -> CellState {
        self.state
    }

    fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    fn states_count(&self) -> CellState {
        Self::STATES
    }

    /// Anything past the palette is drawn white.
    fn fill_color(&self) -> Color {
        PALETTE
            .get(self.state as usize)
            .copied()
            .unwrap_or(Color::WHITE)
    }

    fn stroke_color(&self) -> Color {
        Color::rgb(127, 127, 127)
    }

    fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.state = rng.gen_range(0..self.states_count());
    }
}
