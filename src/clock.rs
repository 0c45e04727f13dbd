/// Microsecond timestamp, the same type the RP2040 timer counter reports.
pub type Instant = fugit::TimerInstantU64<1_000_000>;

/// Monotonic time source for the spawn timer.
pub trait Clock {
    fn now(&mut self) -> Instant;
}
