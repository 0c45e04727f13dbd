//! Turns raw joystick readings into one of nine directions.

use core::fmt;

/// ADC reading of an axis at rest.
pub const JOYSTICK_CENTER: u16 = 512;
pub const DEFAULT_DEADZONE: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Center,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Self; 9] = [
        Self::Center,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// Unit step as `(dx, dy)`; up is negative `y`.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Center => (0, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (1, -1),
            Self::DownLeft => (-1, 1),
            Self::DownRight => (1, 1),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Center => "CENTER",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::UpLeft => "UP_LEFT",
            Self::UpRight => "UP_RIGHT",
            Self::DownLeft => "DOWN_LEFT",
            Self::DownRight => "DOWN_RIGHT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes a pair of 10 bit axis readings with the default deadzone.
pub fn decode(raw_x: u16, raw_y: u16) -> Direction {
    decode_with(raw_x, raw_y, DEFAULT_DEADZONE)
}

/// Decodes a pair of axis readings. An axis only counts as deflected once it is
/// strictly more than `deadzone` away from [`JOYSTICK_CENTER`]; diagonals win
/// over single axes.
pub fn decode_with(raw_x: u16, raw_y: u16, deadzone: u16) -> Direction {
    let horizontal = axis(raw_x, deadzone);
    let vertical = axis(raw_y, deadzone);

    match (horizontal, vertical) {
        (-1, -1) => Direction::UpLeft,
        (1, -1) => Direction::UpRight,
        (-1, 1) => Direction::DownLeft,
        (1, 1) => Direction::DownRight,
        (0, -1) => Direction::Up,
        (0, 1) => Direction::Down,
        (-1, 0) => Direction::Left,
        (1, 0) => Direction::Right,
        _ => Direction::Center,
    }
}

fn axis(raw: u16, deadzone: u16) -> i8 {
    let offset = i32::from(raw) - i32::from(JOYSTICK_CENTER);
    let deadzone = i32::from(deadzone);
    if offset < -deadzone {
        -1
    } else if offset > deadzone {
        1
    } else {
        0
    }
}
