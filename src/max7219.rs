//! MAX7219 LED driver wired to a single 8x8 matrix, one digit register per row.

use embedded_hal::spi::{Error as _, SpiDevice};
use snafu::{ensure, ResultExt, Snafu};

use crate::display::{BusSnafu, DeviceError, InvalidRowSnafu, RowDevice};
use crate::grid::GRID_SIZE;

const REG_DIGIT0: u8 = 0x01;
const REG_DECODE_MODE: u8 = 0x09;
const REG_INTENSITY: u8 = 0x0A;
const REG_SCAN_LIMIT: u8 = 0x0B;
const REG_SHUTDOWN: u8 = 0x0C;
const REG_DISPLAY_TEST: u8 = 0x0F;

pub const MAX_BRIGHTNESS: u8 = 0x0F;

/// Errors that can occur while bringing up the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
pub enum InitError {
    /// The driver only has 16 intensity steps.
    #[snafu(display("brightness {brightness} is above the maximum of 15"))]
    InvalidBrightness {
        /// The requested brightness.
        brightness: u8,
    },
    /// A configuration write failed.
    #[snafu(display("could not configure the LED driver: {source}"))]
    Configure {
        /// The failed write.
        source: DeviceError,
    },
}

pub struct Max7219<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> Max7219<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    /// Wakes the driver up in raw (no BCD decode) mode with all eight rows
    /// scanned, sets the intensity and clears the matrix.
    pub fn init(&mut self, brightness: u8) -> Result<(), InitError> {
        ensure!(brightness <= MAX_BRIGHTNESS, InvalidBrightnessSnafu { brightness });

        let sequence = [
            (REG_SHUTDOWN, 0),
            (REG_DISPLAY_TEST, 0),
            (REG_SCAN_LIMIT, GRID_SIZE - 1),
            (REG_DECODE_MODE, 0),
            (REG_INTENSITY, brightness),
            (REG_SHUTDOWN, 1),
        ];
        for (register, value) in sequence {
            self.send(register, value).context(ConfigureSnafu)?;
        }

        self.clear_all().context(ConfigureSnafu)
    }

    fn send(&mut self, register: u8, value: u8) -> Result<(), DeviceError> {
        self.spi
            .write(&[register, value])
            .map_err(|err| BusSnafu { kind: err.kind() }.build())
    }
}

impl<SPI: SpiDevice> RowDevice for Max7219<SPI> {
    fn write_row(&mut self, row: u8, bits: u8) -> Result<(), DeviceError> {
        ensure!(row < GRID_SIZE, InvalidRowSnafu { row });
        self.send(REG_DIGIT0 + row, bits)
    }
}
