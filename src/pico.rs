use core::cell::RefCell;

use embedded_hal::digital::OutputPin;
use embedded_hal_bus::spi::RefCellDevice;
use fugit::RateExtU32;
use log::{error, info, LevelFilter};
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal; // Hardware Abstraction Layer (higher-level drivers)
use rp_pico::hal::gpio::{FunctionSpi, Interrupt};
use rp_pico::hal::pac; // Peripheral Access Crate (low-level register access)
use rp_pico::hal::pac::interrupt;
use rp_pico::hal::Clock as _;

use rusty_joystick_game::clock::{Clock, Instant};
use rusty_joystick_game::config::GameConfig;
use rusty_joystick_game::game::Game;
use rusty_joystick_game::game_loop::GameLoop;
use rusty_joystick_game::max7219::Max7219;
use rusty_joystick_game::mcp3008::Mcp3008;

use crate::global_state::{self, SharedState, ATOMIC_STATE};
use crate::rtt_logger;

const CONFIG: GameConfig = GameConfig::DEFAULT;

struct TimerClock(hal::Timer);

impl Clock for TimerClock {
    fn now(&mut self) -> Instant {
        self.0.get_counter()
    }
}

#[entry]
fn main() -> ! {
    rtt_logger::init(LevelFilter::Info);

    let mut pac = pac::Peripherals::take().unwrap();

    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // Configure the clocks (125 MHz system clock)
    let clocks = hal::clocks::init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    ).unwrap();

    let sio = hal::Sio::new(pac.SIO); // single-cycle IO
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );
    let mut led_pin = pins.led.into_push_pull_output();
    led_pin.set_low().unwrap();

    let timer = hal::Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);

    // The ring oscillator jitters enough to seed the food placement
    let rosc = hal::rosc::RingOscillator::new(pac.ROSC).initialize();
    let seed = (0..64).fold(0u64, |seed, _| (seed << 1) | u64::from(rosc.get_random_bit()));

    // Pressing the joystick ends the game at the next tick
    let switch = pins.gpio15.into_pull_up_input();
    switch.set_interrupt_enabled(Interrupt::EdgeLow, true);
    global_state::install(SharedState { switch });

    // MCP3008 and MAX7219 share SPI0, each with its own chip select
    let spi_sclk = pins.gpio18.into_function::<FunctionSpi>();
    let spi_mosi = pins.gpio19.into_function::<FunctionSpi>();
    let spi_miso = pins.gpio16.into_function::<FunctionSpi>();
    let spi = hal::spi::Spi::<_, _, _, 8>::new(pac.SPI0, (spi_mosi, spi_miso, spi_sclk)).init(
        &mut pac.RESETS,
        clocks.peripheral_clock.freq(),
        1.MHz(),
        embedded_hal::spi::MODE_0,
    );
    let spi_bus = RefCell::new(spi);
    let adc_spi = RefCellDevice::new(&spi_bus, pins.gpio17.into_push_pull_output(), timer)
        .unwrap_or_else(|never| match never {});
    let matrix_spi = RefCellDevice::new(&spi_bus, pins.gpio20.into_push_pull_output(), timer)
        .unwrap_or_else(|never| match never {});

    let mut matrix = Max7219::new(matrix_spi);
    if let Err(err) = matrix.init(CONFIG.brightness) {
        error!("LED matrix initialisation failed: {err}");
        idle();
    }

    unsafe {
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }

    let game = Game::new(seed, CONFIG.spawn_interval);
    let mut game_loop = GameLoop::new(Mcp3008::new(adc_spi), matrix, TimerClock(timer), timer, game, CONFIG);

    led_pin.set_high().unwrap();
    let outcome = game_loop.run(|| ATOMIC_STATE.is_stop_requested());
    info!("game over: {outcome:?}");
    led_pin.set_low().unwrap();

    idle()
}

fn idle() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn IO_IRQ_BANK0() {
    global_state::shared_state_interrupt_free(SharedState::switch_clear_interrupt);
    ATOMIC_STATE.request_stop();
}
