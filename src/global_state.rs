use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use rp_pico::hal::gpio::bank0::Gpio15;
use rp_pico::hal::gpio::{FunctionSioInput, Interrupt, Pin, PullUp};

use portable_atomic::{AtomicBool, Ordering};

/// Push switch of the joystick, active low.
pub type SwitchPin = Pin<Gpio15, FunctionSioInput, PullUp>;

pub static SHARED_STATE: Mutex<RefCell<Option<SharedState>>> = Mutex::new(RefCell::new(None));
pub static ATOMIC_STATE: AtomicState = AtomicState::new();

pub fn shared_state_interrupt_free<F>(f: F)
where
    F: FnOnce(&mut SharedState),
{
    cortex_m::interrupt::free(|cs| {
        if let Some(state) = SHARED_STATE.borrow(cs).borrow_mut().as_mut() {
            f(state);
        }
    });
}

pub fn install(state: SharedState) {
    cortex_m::interrupt::free(|cs| {
        SHARED_STATE.borrow(cs).replace(Some(state));
    });
}

pub struct AtomicState {
    stop_requested: AtomicBool,
}

impl AtomicState {
    pub const fn new() -> Self {
        Self {
            stop_requested: AtomicBool::new(false),
        }
    }

    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }
}

pub struct SharedState {
    pub switch: SwitchPin,
}

impl SharedState {
    pub fn switch_clear_interrupt(&mut self) {
        self.switch.clear_interrupt(Interrupt::EdgeLow);
    }
}
