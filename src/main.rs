#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(target_os = "none")]
mod global_state;
#[cfg(target_os = "none")]
mod pico;
#[cfg(target_os = "none")]
mod rtt_logger;

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("this is RP2040 firmware, build it with `cargo build --release --target thumbv6m-none-eabi`");
    std::process::exit(1);
}
