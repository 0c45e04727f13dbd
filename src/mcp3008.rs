//! MCP3008 8-channel 10 bit ADC, used to sample the joystick axes.

use embedded_hal::spi::{Error as _, SpiDevice};
use snafu::ensure;

use crate::sampler::{AnalogSampler, BusSnafu, InvalidChannelSnafu, SampleError};

pub const MAX_CHANNEL: u8 = 7;

const START_BIT: u8 = 0x01;
const SINGLE_ENDED: u8 = 0x08;

pub struct Mcp3008<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Mcp3008<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    /// Performs one single-ended conversion on `channel`.
    ///
    /// The request is a start bit, then the mode and channel in the high nibble of the
    /// second byte. The result comes back in the low two bits of the second reply byte
    /// and the whole third byte.
    pub fn read_channel(&mut self, channel: u8) -> Result<u16, SampleError> {
        ensure!(channel <= MAX_CHANNEL, InvalidChannelSnafu { channel });

        let mut buffer = [START_BIT, (SINGLE_ENDED | channel) << 4, 0x00];
        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(|err| BusSnafu { kind: err.kind() }.build())?;

        Ok((u16::from(buffer[1] & 0x03) << 8) | u16::from(buffer[2]))
    }
}

impl<SPI: SpiDevice> AnalogSampler for Mcp3008<SPI> {
    fn read(&mut self, channel: u8) -> Result<u16, SampleError> {
        self.read_channel(channel)
    }
}
