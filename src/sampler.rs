use embedded_hal::spi::ErrorKind;
use snafu::Snafu;

pub const X_AXIS_CHANNEL: u8 = 0;
pub const Y_AXIS_CHANNEL: u8 = 1;

/// Largest value a 10 bit converter reports.
pub const SAMPLE_MAX: u16 = 1023;

/// Errors that can occur while sampling an analog channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SampleError {
    /// The converter has no such input.
    #[snafu(display("ADC channel {channel} does not exist"))]
    InvalidChannel {
        /// The requested channel.
        channel: u8,
    },
    /// The bus transfer failed.
    #[snafu(display("ADC transfer failed: {kind}"))]
    Bus {
        /// What the bus reported.
        kind: ErrorKind,
    },
}

/// Source of raw 10 bit analog samples.
pub trait AnalogSampler {
    fn read(&mut self, channel: u8) -> Result<u16, SampleError>;
}

/// Reads the X axis, then the Y axis. Fails as a whole if either read fails.
pub fn read_joystick<S: AnalogSampler + ?Sized>(sampler: &mut S) -> Result<(u16, u16), SampleError> {
    let x = sampler.read(X_AXIS_CHANNEL)?;
    let y = sampler.read(Y_AXIS_CHANNEL)?;
    Ok((x, y))
}
