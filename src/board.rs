use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::EngineError;

/// Largest accepted grid width. Its square still fits a 32-bit `usize`, and coordinates and
/// counts stay within the `u32` values handed to JavaScript. Grids the heap cannot hold are
/// refused when the cells are allocated.
pub const MAX_GRID_SIZE: usize = u16::MAX as usize;

pub(crate) fn check_grid_size(n: usize) -> Result<(), EngineError> {
    if n == 0 || n > MAX_GRID_SIZE {
        return Err(EngineError::InvalidGridSize { size: n });
    }
    Ok(())
}

/// Allocate `len` copies of `value`, reporting allocation failure as an invalid grid size.
fn try_filled<T: Clone>(len: usize, value: T, grid_size: usize) -> Result<Vec<T>, EngineError> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(len)
        .map_err(|_| EngineError::InvalidGridSize { size: grid_size })?;
    items.resize(len, value);
    Ok(items)
}

/// One of the two sides. PlayerOne always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Player {
    PlayerOne,
    PlayerTwo,
}

impl Player {
    /// Contribution of one of this player's pieces to a line sum.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Player::PlayerOne => 1,
            Player::PlayerTwo => -1,
        }
    }

    #[inline]
    pub const fn other(self) -> Player {
        match self {
            Player::PlayerOne => Player::PlayerTwo,
            Player::PlayerTwo => Player::PlayerOne,
        }
    }

    /// Index used across the wasm boundary (0 for PlayerOne, 1 for PlayerTwo).
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            Player::PlayerOne => 0,
            Player::PlayerTwo => 1,
        }
    }

    pub const fn from_index(index: u8) -> Option<Player> {
        match index {
            0 => Some(Player::PlayerOne),
            1 => Some(Player::PlayerTwo),
            _ => None,
        }
    }
}

/// Occupancy of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    /// Compact encoding handed to JavaScript: 0 empty, 1 PlayerOne, 2 PlayerTwo.
    #[inline]
    pub const fn code(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(Player::PlayerOne) => 1,
            Cell::Occupied(Player::PlayerTwo) => 2,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A row, column or diagonal of exactly `n` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "camelCase")]
pub enum Line {
    Column(usize),
    Row(usize),
    Diagonal,
    AntiDiagonal,
}

impl Line {
    /// Slot of this line in the `2n + 2` sum table: columns, then rows, then both diagonals.
    #[inline]
    pub const fn slot(self, n: usize) -> usize {
        match self {
            Line::Column(x) => x,
            Line::Row(y) => n + y,
            Line::Diagonal => 2 * n,
            Line::AntiDiagonal => 2 * n + 1,
        }
    }

    pub const fn from_slot(slot: usize, n: usize) -> Option<Line> {
        if slot < n {
            Some(Line::Column(slot))
        } else if slot < 2 * n {
            Some(Line::Row(slot - n))
        } else if slot == 2 * n {
            Some(Line::Diagonal)
        } else if slot == 2 * n + 1 {
            Some(Line::AntiDiagonal)
        } else {
            None
        }
    }

    /// Coordinates `(x, y)` of every cell on this line, in increasing `x` order for diagonals.
    pub fn cells(self, n: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..n).map(move |i| match self {
            Line::Column(x) => (x, i),
            Line::Row(y) => (i, y),
            Line::Diagonal => (i, i),
            Line::AntiDiagonal => (i, n - 1 - i),
        })
    }

    /// Lines passing through `(x, y)` on an `n`-wide grid: always its column and row, plus
    /// whichever diagonals the cell sits on.
    pub fn through(x: usize, y: usize, n: usize) -> SmallVec<[Line; 4]> {
        let mut lines = SmallVec::new();
        lines.push(Line::Column(x));
        lines.push(Line::Row(y));
        if x == y {
            lines.push(Line::Diagonal);
        }
        if x.abs_diff(n - 1) == y {
            lines.push(Line::AntiDiagonal);
        }
        lines
    }
}

/// Running per-line totals. PlayerOne pieces add one, PlayerTwo pieces subtract one, so a line
/// is complete exactly when its absolute total reaches `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineSums {
    n: usize,
    sums: Vec<i32>,
}

impl LineSums {
    pub(crate) fn try_new(n: usize) -> Result<Self, EngineError> {
        Ok(Self {
            n,
            sums: try_filled(2 * n + 2, 0, n)?,
        })
    }

    pub(crate) fn clear(&mut self) {
        self.sums.fill(0);
    }

    pub(crate) fn as_slice(&self) -> &[i32] {
        &self.sums
    }

    pub(crate) fn get(&self, line: Line) -> i32 {
        self.sums[line.slot(self.n)]
    }

    /// Record a piece for `player` at `(x, y)` and report the first line it completed.
    ///
    /// Only the lines through the new piece change, so this is constant time in the grid size.
    /// Every touched line is updated even after a completion is found, keeping the table exact
    /// in terminal positions.
    ///
    /// `(x, y)` must be on the grid; the engine checks bounds before recording.
    pub(crate) fn record(&mut self, x: usize, y: usize, player: Player) -> Option<Line> {
        debug_assert!(x < self.n && y < self.n, "({x}, {y}) outside the {0}x{0} grid", self.n);
        let mut completed = None;
        for line in Line::through(x, y, self.n) {
            self.sums[line.slot(self.n)] += player.sign();
            if completed.is_none() && self.get(line).unsigned_abs() as usize == self.n {
                completed = Some(line);
            }
        }
        completed
    }
}

/// N×N occupancy grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    n: usize,
    cells: Vec<Cell>,
    occupied: usize,
}

impl Board {
    /// Empty `n`×`n` board. Fails for `n == 0`, `n > MAX_GRID_SIZE` or when the cells cannot be
    /// allocated.
    pub fn try_new(n: usize) -> Result<Self, EngineError> {
        check_grid_size(n)?;
        Ok(Self {
            n,
            cells: try_filled(n * n, Cell::Empty, n)?,
            occupied: 0,
        })
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.n + x
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.n && y < self.n
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if self.contains(x, y) {
            Some(self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    /// Occupy an empty in-bounds cell. Returns `false` and leaves the board untouched otherwise.
    pub fn place(&mut self, x: usize, y: usize, player: Player) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let index = self.idx(x, y);
        if !self.cells[index].is_empty() {
            return false;
        }
        self.cells[index] = Cell::Occupied(player);
        self.occupied += 1;
        true
    }

    pub fn occupied(&self) -> usize {
        self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.cells.len()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.occupied = 0;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn to_codes(&self) -> Vec<i8> {
        self.cells.iter().map(|cell| cell.code()).collect()
    }
}
