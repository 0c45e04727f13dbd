//! Joystick food collecting game for an 8x8 LED matrix.
//!
//! The player steers a single lit pixel with an analog joystick. A new piece of
//! food appears every second; once the last piece on the board has been eaten
//! the game is won and the matrix flashes a cross.
//!
//! The library is hardware independent: the game loop talks to an
//! [`AnalogSampler`](sampler::AnalogSampler), a [`RowDevice`](display::RowDevice),
//! a [`Clock`](clock::Clock) and an `embedded_hal` delay. The [`mcp3008`] and
//! [`max7219`] modules provide SPI drivers for the parts used by the firmware.

#![cfg_attr(not(test), no_std)]

pub mod animation;
pub mod clock;
pub mod config;
pub mod direction;
pub mod display;
pub mod game;
pub mod game_loop;
pub mod grid;
pub mod max7219;
pub mod mcp3008;
pub mod render;
pub mod sampler;

#[cfg(test)]
pub(crate) mod testing;
