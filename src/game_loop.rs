//! Polls the joystick, advances the game, keeps the matrix up to date and plays
//! the win animation at the end.
//!
//! Everything runs on the caller's thread. The only suspension points are the
//! fixed delays between ticks and between animation frames; a stop request is
//! only looked at between two ticks, so a frame is never left half written.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::animation::{Animation, WinFlash};
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::direction::{decode_with, Direction};
use crate::display::{Bitmap, MatrixSurface, RowDevice};
use crate::game::{Game, Outcome};
use crate::render::render;
use crate::sampler::{read_joystick, AnalogSampler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    WinAnimation,
    Terminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Won,
    Stopped,
}

pub struct GameLoop<S, D, C, T> {
    sampler: S,
    surface: MatrixSurface<D>,
    clock: C,
    delay: T,
    game: Game,
    config: GameConfig,
    state: LoopState,
}

impl<S, D, C, T> GameLoop<S, D, C, T>
where
    S: AnalogSampler,
    D: RowDevice,
    C: Clock,
    T: DelayNs,
{
    /// `device` is expected to be initialised and dark.
    pub fn new(sampler: S, device: D, clock: C, delay: T, game: Game, config: GameConfig) -> Self {
        Self {
            sampler,
            surface: MatrixSurface::new(device),
            clock,
            delay,
            game,
            config,
            state: LoopState::Running,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn surface(&self) -> &MatrixSurface<D> {
        &self.surface
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn delay(&self) -> &T {
        &self.delay
    }

    /// Clears the matrix and plays until the game is won or `stop_requested`
    /// returns `true` at a tick boundary.
    pub fn run<F: FnMut() -> bool>(&mut self, mut stop_requested: F) -> RunOutcome {
        info!("starting game");
        if let Err(err) = self.surface.clear() {
            warn!("could not clear the matrix: {err}");
        }

        loop {
            match self.state {
                LoopState::Running => {
                    if stop_requested() {
                        info!("stop requested, leaving the game");
                        self.state = LoopState::Terminated;
                    } else {
                        self.tick();
                    }
                }
                LoopState::WinAnimation => self.play_win_animation(),
                LoopState::Terminated => break,
            }
        }

        match self.game.outcome() {
            Outcome::Won => RunOutcome::Won,
            Outcome::Playing => RunOutcome::Stopped,
        }
    }

    /// One tick with the direction read from the joystick. A failed read counts as centered.
    pub fn tick(&mut self) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }

        let direction = match read_joystick(&mut self.sampler) {
            Ok((x, y)) => decode_with(x, y, self.config.deadzone),
            Err(err) => {
                warn!("joystick read failed, holding position: {err}");
                Direction::Center
            }
        };
        self.tick_with(direction)
    }

    /// One tick with a given direction instead of a joystick reading.
    pub fn tick_with(&mut self, direction: Direction) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }

        let now = self.clock.now();
        let report = self.game.tick(direction, now);
        debug!("{} -> {}", direction, report.player);

        let frame = render(self.game.player(), self.game.food());
        if let Err(err) = self.surface.apply(&frame) {
            warn!("matrix update incomplete, retrying next tick: {err}");
        }

        if report.outcome == Outcome::Won {
            info!("game won");
            self.state = LoopState::WinAnimation;
        }

        self.delay.delay_us(self.config.tick_interval.to_micros());
        self.state
    }

    /// Clears the matrix and flashes the cross. Joystick input is not read.
    pub fn play_win_animation(&mut self) {
        if self.state != LoopState::WinAnimation {
            return;
        }

        if let Err(err) = self.surface.clear() {
            warn!("could not clear the matrix: {err}");
        }

        let mut animation = WinFlash::new(self.config.flash_cycles, self.config.flash_on, self.config.flash_off);
        let mut frame = Bitmap::new();
        while let Some(duration) = animation.render_frame(&mut frame) {
            let shown = if frame.is_dark() {
                self.surface.clear()
            } else {
                self.surface.apply(&frame)
            };
            if let Err(err) = shown {
                warn!("win animation frame incomplete: {err}");
            }
            self.delay.delay_us(duration.to_micros());
            frame.clear();
        }

        self.state = LoopState::Terminated;
    }
}
