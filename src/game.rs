//! The food collecting game itself.
//!
//! Every tick the player moves one step, eats the food it lands on and, once per
//! spawn interval, a new piece of food appears on a random free cell. The game is
//! won on the tick the last piece on the board is eaten.

use fugit::MicrosDurationU32;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro128StarStar;

use crate::clock::Instant;
use crate::direction::Direction;
use crate::grid::{Cell, CellSet};

/// Random picks tried before falling back to enumerating the free cells.
const SPAWN_ATTEMPTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
}

/// What happened during one [`Game::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub player: Cell,
    pub ate: bool,
    pub spawned: Option<Cell>,
    pub outcome: Outcome,
}

pub struct Game {
    rng: Xoshiro128StarStar,
    player: Cell,
    food: CellSet,
    last_spawn: Option<Instant>,
    spawn_interval: MicrosDurationU32,
    outcome: Outcome,
}

impl Game {
    /// A fresh game: player in the top left corner, no food, nothing spawned yet.
    pub fn new(seed: u64, spawn_interval: MicrosDurationU32) -> Self {
        Self {
            rng: Xoshiro128StarStar::seed_from_u64(seed),
            player: Cell::ORIGIN,
            food: CellSet::EMPTY,
            last_spawn: None,
            spawn_interval,
            outcome: Outcome::Playing,
        }
    }

    /// Places food as if it had all been spawned at `now`. Cells under the player are skipped.
    pub fn with_food<I: IntoIterator<Item = Cell>>(mut self, food: I, now: Instant) -> Self {
        for cell in food {
            if cell != self.player {
                self.food.insert(cell);
            }
        }
        self.last_spawn = Some(now);
        self
    }

    pub fn with_player(mut self, player: Cell) -> Self {
        self.player = player;
        self.food.remove(player);
        self
    }

    pub fn player(&self) -> Cell {
        self.player
    }

    pub fn food(&self) -> &CellSet {
        &self.food
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    pub fn last_spawn(&self) -> Option<Instant> {
        self.last_spawn
    }

    /// Advances the game by one tick: move, eat, maybe spawn, check for the win.
    ///
    /// A won game no longer changes. The winning tick does not spawn.
    pub fn tick(&mut self, direction: Direction, now: Instant) -> TickReport {
        if self.is_won() {
            return self.report(false, None);
        }

        let had_food = !self.food.is_empty();
        self.player = self.player.step(direction);
        let ate = self.food.remove(self.player);
        if ate {
            debug!("ate food at {}, {} left", self.player, self.food.len());
        }

        if had_food && self.food.is_empty() {
            self.outcome = Outcome::Won;
            info!("all food collected at {}", self.player);
            return self.report(ate, None);
        }

        let spawned = self.maybe_spawn(now);
        self.report(ate, spawned)
    }

    fn report(&self, ate: bool, spawned: Option<Cell>) -> TickReport {
        TickReport {
            player: self.player,
            ate,
            spawned,
            outcome: self.outcome,
        }
    }

    fn spawn_due(&self, now: Instant) -> bool {
        match self.last_spawn {
            None => true,
            Some(last) => now
                .checked_duration_since(last)
                .is_some_and(|elapsed| elapsed.to_micros() >= u64::from(self.spawn_interval.to_micros())),
        }
    }

    /// Spawns at most one piece of food, however long it has been since the last one.
    /// A full board spawns nothing and leaves the timer alone.
    fn maybe_spawn(&mut self, now: Instant) -> Option<Cell> {
        if !self.spawn_due(now) {
            return None;
        }

        let cell = self.pick_free_cell()?;
        self.food.insert(cell);
        self.last_spawn = Some(now);
        debug!("spawned food at {}, {} on the board", cell, self.food.len());
        Some(cell)
    }

    fn pick_free_cell(&mut self) -> Option<Cell> {
        let mut occupied = self.food;
        occupied.insert(self.player);

        for _ in 0..SPAWN_ATTEMPTS {
            let index = self.rng.gen_range(0..64u8);
            let cell = Cell::new(index & 0b111, index >> 3)?;
            if !occupied.contains(cell) {
                return Some(cell);
            }
        }

        let free = occupied.complement();
        match free.len() {
            0 => None,
            count => free.iter().nth(self.rng.gen_range(0..count)),
        }
    }
}
