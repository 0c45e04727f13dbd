#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::ErrorKind;
use rusty_joystick_game::clock::{Clock, Instant};
use rusty_joystick_game::display::{DeviceError, RowDevice};
use rusty_joystick_game::grid::Cell;
use rusty_joystick_game::sampler::{AnalogSampler, SampleError};

pub const CENTER: u16 = 512;
pub const HIGH: u16 = CENTER + 150;
pub const LOW: u16 = CENTER - 150;

pub fn cell(x: u8, y: u8) -> Cell {
    Cell::new(x, y).unwrap()
}

/// Hands out queued readings in order, reading as centered once the queue runs dry.
#[derive(Default)]
pub struct ScriptedSampler {
    readings: VecDeque<Result<u16, SampleError>>,
    pub reads: usize,
}

impl ScriptedSampler {
    pub fn with_positions(positions: &[(u16, u16)]) -> Self {
        let mut sampler = Self::default();
        for &(x, y) in positions {
            sampler.push_position(x, y);
        }
        sampler
    }

    pub fn push_position(&mut self, x: u16, y: u16) {
        self.readings.push_back(Ok(x));
        self.readings.push_back(Ok(y));
    }

    pub fn push_failure(&mut self) {
        self.readings.push_back(Err(SampleError::Bus { kind: ErrorKind::Other }));
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl AnalogSampler for ScriptedSampler {
    fn read(&mut self, _channel: u8) -> Result<u16, SampleError> {
        self.reads += 1;
        self.readings.pop_front().unwrap_or(Ok(CENTER))
    }
}

#[derive(Default)]
pub struct RecordingDevice {
    pub writes: Vec<(u8, u8)>,
    pub attempts: usize,
    pub broken_rows: u8,
}

impl RowDevice for RecordingDevice {
    fn write_row(&mut self, row: u8, bits: u8) -> Result<(), DeviceError> {
        self.attempts += 1;
        if self.broken_rows & (1 << row) != 0 {
            return Err(DeviceError::Bus { kind: ErrorKind::Other });
        }
        self.writes.push((row, bits));
        Ok(())
    }
}

/// Advances by a fixed step on every call; a zero step freezes time.
pub struct SteppingClock {
    now: u64,
    step_us: u64,
}

impl SteppingClock {
    pub fn frozen() -> Self {
        Self { now: 0, step_us: 0 }
    }

    pub fn stepping_millis(step_ms: u64) -> Self {
        Self {
            now: 0,
            step_us: step_ms * 1000,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&mut self) -> Instant {
        let now = Instant::from_ticks(self.now);
        self.now += self.step_us;
        now
    }
}

#[derive(Default)]
pub struct RecordingDelay {
    pub delays_ns: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(ns);
    }
}
