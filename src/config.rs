//! Compile time tuning of the game.

use fugit::MicrosDurationU32;

use crate::direction::DEFAULT_DEADZONE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Distance from the joystick center, in raw ADC counts, that still reads as centered.
    pub deadzone: u16,
    /// How often a new piece of food arrives.
    pub spawn_interval: MicrosDurationU32,
    /// Pause between two ticks; sets both the input and the render cadence.
    pub tick_interval: MicrosDurationU32,
    /// MAX7219 intensity, `0..=15`. Passed through to the display driver only.
    pub brightness: u8,
    pub flash_on: MicrosDurationU32,
    pub flash_off: MicrosDurationU32,
    pub flash_cycles: u8,
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        deadzone: DEFAULT_DEADZONE,
        spawn_interval: MicrosDurationU32::millis(1000),
        tick_interval: MicrosDurationU32::millis(100),
        brightness: 0x08,
        flash_on: MicrosDurationU32::millis(100),
        flash_off: MicrosDurationU32::millis(50),
        flash_cycles: 3,
    };

    pub const fn with_deadzone(mut self, deadzone: u16) -> Self {
        self.deadzone = deadzone;
        self
    }

    pub const fn with_spawn_interval(mut self, spawn_interval: MicrosDurationU32) -> Self {
        self.spawn_interval = spawn_interval;
        self
    }

    pub const fn with_tick_interval(mut self, tick_interval: MicrosDurationU32) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!(config.deadzone, 100);
        assert_eq!(config.spawn_interval.to_millis(), 1000);
        assert_eq!(config.tick_interval.to_millis(), 100);
        assert_eq!(config.brightness, 8);
        assert_eq!(config.flash_cycles, 3);
    }

    #[test]
    fn builders_override_single_fields() {
        let config = GameConfig::DEFAULT
            .with_deadzone(40)
            .with_tick_interval(MicrosDurationU32::millis(20));
        assert_eq!(config.deadzone, 40);
        assert_eq!(config.tick_interval.to_millis(), 20);
        assert_eq!(config.spawn_interval, GameConfig::DEFAULT.spawn_interval);
    }
}
