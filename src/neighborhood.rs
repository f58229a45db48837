//! Which neighbors a cell sees, depending on where it sits on the board.
//!
//! The board does not wrap. Interior cells see all 8 Moore neighbors, cells on an edge see 5 and
//! corner cells see 3. Each region lists its neighbors in a fixed order, which rules that are not
//! symmetric in their inputs can observe:
//!
//! ```notrust
//!   region           offsets (dx, dy), in order
//!   interior         (-1,-1) (-1,0) (-1,1) (0,-1) (0,1) (1,-1) (1,0) (1,1)
//!   top left         (1,0) (1,1) (0,1)
//!   top right        (-1,0) (-1,1) (0,1)
//!   bottom left      (0,-1) (1,-1) (1,0)
//!   bottom right     (-1,0) (-1,-1) (0,-1)
//!   left             (0,-1) (1,-1) (1,0) (1,1) (0,1)
//!   right            (0,-1) (-1,-1) (-1,0) (-1,1) (0,1)
//!   top              (-1,0) (-1,1) (0,1) (1,1) (1,0)
//!   bottom           (-1,0) (-1,-1) (0,-1) (1,-1) (1,0)
//! ```
//!
//! `y = 0` is the top row.

pub type Offset = (isize, isize);

const INTERIOR: [Offset; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const TOP_LEFT: [Offset; 3] = [(1, 0), (1, 1), (0, 1)];
const TOP_RIGHT: [Offset; 3] = [(-1, 0), (-1, 1), (0, 1)];
const BOTTOM_LEFT: [Offset; 3] = [(0, -1), (1, -1), (1, 0)];
const BOTTOM_RIGHT: [Offset; 3] = [(-1, 0), (-1, -1), (0, -1)];

const LEFT: [Offset; 5] = [(0, -1), (1, -1), (1, 0), (1, 1), (0, 1)];
const RIGHT: [Offset; 5] = [(0, -1), (-1, -1), (-1, 0), (-1, 1), (0, 1)];
const TOP: [Offset; 5] = [(-1, 0), (-1, 1), (0, 1), (1, 1), (1, 0)];
const BOTTOM: [Offset; 5] = [(-1, 0), (-1, -1), (0, -1), (1, -1), (1, 0)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Interior,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Left,
    Right,
    Top,
    Bottom,
}

impl Region {
    /// Classify `(x, y)` on a `width x height` board.
    ///
    /// Returns `None` for coordinates off the board, and for boards thinner than 2 cells in either
    /// direction, where a single cell would be on two opposite edges at once.
    pub fn classify(x: usize, y: usize, width: usize, height: usize) -> Option<Region> {
        if x >= width || y >= height {
            return None;
        }

        let region = match (x == 0, x + 1 == width, y == 0, y + 1 == height) {
            (false, false, false, false) => Region::Interior,
            (true, false, true, false) => Region::TopLeft,
            (false, true, true, false) => Region::TopRight,
            (true, false, false, true) => Region::BottomLeft,
            (false, true, false, true) => Region::BottomRight,
            (true, false, false, false) => Region::Left,
            (false, true, false, false) => Region::Right,
            (false, false, true, false) => Region::Top,
            (false, false, false, true) => Region::Bottom,
            _ => return None,
        };

        Some(region)
    }

    /// Neighbor offsets for this region, in the order they are handed to a rule.
    pub const fn offsets(self) -> &'static [Offset] {
        match self {
            Region::Interior => &INTERIOR,
            Region::TopLeft => &TOP_LEFT,
            Region::TopRight => &TOP_RIGHT,
            Region::BottomLeft => &BOTTOM_LEFT,
            Region::BottomRight => &BOTTOM_RIGHT,
            Region::Left => &LEFT,
            Region::Right => &RIGHT,
            Region::Top => &TOP,
            Region::Bottom => &BOTTOM,
        }
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Region::TopLeft | Region::TopRight | Region::BottomLeft | Region::BottomRight
        )
    }

    /// Absolute coordinates of the neighbors of `(x, y)`, which must lie in this region.
    pub fn neighbors(self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        self.offsets()
            .iter()
            .map(move |&(dx, dy)| (x.wrapping_add_signed(dx), y.wrapping_add_signed(dy)))
    }
}
