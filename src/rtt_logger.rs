use log::{LevelFilter, Log, Metadata, Record};
use rtt_target::rprintln;

struct RttLogger;

static LOGGER: RttLogger = RttLogger;

impl Log for RttLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            rprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Routes `log` records to the RTT up channel. Must run before interrupts are unmasked.
pub fn init(level: LevelFilter) {
    rtt_target::rtt_init_print!();
    // SAFETY: called once from `main` while still single threaded, no interrupt
    // handler that logs is enabled yet. thumbv6m has no CAS so the racy variants are the only option.
    unsafe {
        if log::set_logger_racy(&LOGGER).is_ok() {
            log::set_max_level_racy(level);
        }
    }
}
