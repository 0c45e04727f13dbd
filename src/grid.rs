use core::fmt;

use crate::direction::Direction;

pub const GRID_SIZE: u8 = 8;
pub const CELL_COUNT: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// A position on the 8x8 board. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    x: u8,
    y: u8,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Returns `None` if either coordinate lies outside the board.
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < GRID_SIZE && y < GRID_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    pub const fn x(self) -> u8 {
        self.x
    }

    pub const fn y(self) -> u8 {
        self.y
    }

    const fn index(self) -> u8 {
        (self.y << 3) | self.x
    }

    const fn from_index(index: u8) -> Self {
        Self {
            x: index & 0b0000_0111,
            y: (index >> 3) & 0b0000_0111,
        }
    }

    /// Moves one step in `direction`, saturating at the board edges on each axis.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: clamp_axis(self.x, dx),
            y: clamp_axis(self.y, dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn clamp_axis(value: u8, delta: i8) -> u8 {
    (i16::from(value) + i16::from(delta)).clamp(0, i16::from(GRID_SIZE - 1)) as u8
}

/// A set of cells stored as a 64 bit occupancy mask, bit `y * 8 + x` per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSet {
    mask: u64,
}

impl CellSet {
    pub const EMPTY: Self = Self { mask: 0 };
    pub const FULL: Self = Self { mask: u64::MAX };

    /// Returns `true` if the cell was not yet part of the set.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let bit = bit(cell);
        let added = self.mask & bit == 0;
        self.mask |= bit;
        added
    }

    /// Returns `true` if the cell was part of the set.
    pub fn remove(&mut self, cell: Cell) -> bool {
        let bit = bit(cell);
        let removed = self.mask & bit != 0;
        self.mask &= !bit;
        removed
    }

    pub const fn contains(&self, cell: Cell) -> bool {
        self.mask & bit(cell) != 0
    }

    pub const fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// The set of all cells that are not members of `self`.
    pub const fn complement(&self) -> Self {
        Self { mask: !self.mask }
    }

    /// Iterates in row-major order, starting at the top left cell.
    pub fn iter(&self) -> impl Iterator<Item = Cell> {
        let mut mask = self.mask;
        core::iter::from_fn(move || {
            if mask == 0 {
                return None;
            }
            let index = mask.trailing_zeros() as u8;
            mask &= mask - 1;
            Some(Cell::from_index(index))
        })
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

const fn bit(cell: Cell) -> u64 {
    1 << cell.index()
}
