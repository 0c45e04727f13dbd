use embedded_hal::spi::ErrorKind;
use snafu::Snafu;

use crate::grid::{Cell, GRID_SIZE};

const ROW_COUNT: usize = GRID_SIZE as usize;

/// On/off state of the 8x8 matrix, one byte per row. The most significant bit
/// of a row is its leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitmap {
    rows: [u8; ROW_COUNT],
}

impl Bitmap {
    pub const fn new() -> Self {
        Self { rows: [0; ROW_COUNT] }
    }

    pub const fn from_rows(rows: [u8; ROW_COUNT]) -> Self {
        Self { rows }
    }

    pub fn clear(&mut self) {
        self.rows.fill(0);
    }

    pub fn set_pixel(&mut self, cell: Cell) {
        self.rows[cell.y() as usize] |= 0b1000_0000 >> cell.x();
    }

    pub const fn is_lit(&self, cell: Cell) -> bool {
        self.rows[cell.y() as usize] & (0b1000_0000 >> cell.x()) != 0
    }

    pub const fn row(&self, row: u8) -> u8 {
        self.rows[row as usize]
    }

    pub const fn rows(&self) -> &[u8; ROW_COUNT] {
        &self.rows
    }

    pub fn is_dark(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }

    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }
}

/// Errors that can occur when writing to the matrix driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DeviceError {
    /// The matrix only has rows 0 through 7.
    #[snafu(display("row {row} is outside the matrix"))]
    InvalidRow {
        /// The requested row.
        row: u8,
    },
    /// The bus transfer failed.
    #[snafu(display("matrix transfer failed: {kind}"))]
    Bus {
        /// What the bus reported.
        kind: ErrorKind,
    },
}

/// Output hardware that is written one whole 8 bit row at a time.
pub trait RowDevice {
    /// Writes `bits` to `row`; bit 7 is the leftmost column.
    fn write_row(&mut self, row: u8, bits: u8) -> Result<(), DeviceError>;

    /// Turns every LED off, stopping at the first failed row.
    fn clear_all(&mut self) -> Result<(), DeviceError> {
        for row in 0..GRID_SIZE {
            self.write_row(row, 0)?;
        }
        Ok(())
    }
}

/// One or more rows could not be written. Those rows keep their previous
/// retained state so the next [`MatrixSurface::apply`] writes them again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Snafu)]
#[snafu(display("{} row write(s) failed, last error: {last}", failed_rows.count_ones()))]
pub struct RowWriteError {
    failed_rows: u8,
    last: DeviceError,
}

impl RowWriteError {
    pub fn failed_rows(&self) -> impl Iterator<Item = u8> {
        let failed_rows = self.failed_rows;
        (0..GRID_SIZE).filter(move |row| failed_rows & (1 << row) != 0)
    }

    pub const fn last(&self) -> DeviceError {
        self.last
    }
}

/// Keeps a copy of what the device shows and only sends rows that changed.
pub struct MatrixSurface<D> {
    device: D,
    retained: Bitmap,
}

impl<D: RowDevice> MatrixSurface<D> {
    /// Assumes the device starts out dark.
    pub fn new(device: D) -> Self {
        Self {
            device,
            retained: Bitmap::new(),
        }
    }

    /// Writes every row of `desired` that differs from the retained bitmap.
    /// A failed row does not stop the remaining rows from being written.
    pub fn apply(&mut self, desired: &Bitmap) -> Result<(), RowWriteError> {
        let mut failures = Failures::default();
        for row in 0..GRID_SIZE {
            let bits = desired.row(row);
            if bits == self.retained.row(row) {
                continue;
            }
            self.write(row, bits, &mut failures);
        }
        failures.into_result()
    }

    /// Writes zero to all rows, whether or not they are already dark.
    pub fn clear(&mut self) -> Result<(), RowWriteError> {
        let mut failures = Failures::default();
        for row in 0..GRID_SIZE {
            self.write(row, 0, &mut failures);
        }
        failures.into_result()
    }

    fn write(&mut self, row: u8, bits: u8, failures: &mut Failures) {
        match self.device.write_row(row, bits) {
            Ok(()) => self.retained.rows[row as usize] = bits,
            Err(err) => failures.record(row, err),
        }
    }

    pub fn bitmap(&self) -> &Bitmap {
        &self.retained
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn release(self) -> D {
        self.device
    }
}

#[derive(Default)]
struct Failures {
    rows: u8,
    last: Option<DeviceError>,
}

impl Failures {
    fn record(&mut self, row: u8, err: DeviceError) {
        self.rows |= 1 << row;
        self.last = Some(err);
    }

    fn into_result(self) -> Result<(), RowWriteError> {
        match self.last {
            None => Ok(()),
            Some(last) => Err(RowWriteError {
                failed_rows: self.rows,
                last,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingDevice {
        writes: Vec<(u8, u8)>,
        broken_rows: u8,
    }

    impl RowDevice for RecordingDevice {
        fn write_row(&mut self, row: u8, bits: u8) -> Result<(), DeviceError> {
            if self.broken_rows & (1 << row) != 0 {
                return BusSnafu { kind: ErrorKind::Other }.fail();
            }
            self.writes.push((row, bits));
            Ok(())
        }
    }

    fn cell(x: u8, y: u8) -> Cell {
        Cell::new(x, y).unwrap()
    }

    #[test]
    fn pixels_are_msb_first() {
        let mut bitmap = Bitmap::new();
        bitmap.set_pixel(cell(0, 0));
        bitmap.set_pixel(cell(7, 2));
        bitmap.set_pixel(cell(3, 2));
        assert_eq!(bitmap.rows(), &[0x80, 0x00, 0x11, 0, 0, 0, 0, 0]);
        assert!(bitmap.is_lit(cell(3, 2)));
        assert!(!bitmap.is_lit(cell(4, 2)));
        assert_eq!(bitmap.lit_count(), 3);
    }

    #[test]
    fn only_changed_rows_are_written() {
        let mut surface = MatrixSurface::new(RecordingDevice::default());
        let desired = Bitmap::from_rows([0, 0x10, 0, 0, 0, 0, 0x01, 0]);
        surface.apply(&desired).unwrap();
        assert_eq!(surface.device().writes, vec![(1, 0x10), (6, 0x01)]);
        assert_eq!(surface.bitmap(), &desired);
    }

    #[test]
    fn applying_the_same_bitmap_twice_writes_nothing() {
        let mut surface = MatrixSurface::new(RecordingDevice::default());
        let desired = Bitmap::from_rows([0xFF, 0, 0x42, 0, 0, 0, 0, 0x18]);
        surface.apply(&desired).unwrap();
        let written = surface.device().writes.len();
        surface.apply(&desired).unwrap();
        assert_eq!(surface.device().writes.len(), written);
    }

    #[test]
    fn clear_writes_every_row() {
        let mut surface = MatrixSurface::new(RecordingDevice::default());
        surface.clear().unwrap();
        let expected: Vec<_> = (0..8).map(|row| (row, 0)).collect();
        assert_eq!(surface.device().writes, expected);
        assert!(surface.bitmap().is_dark());
    }

    #[test]
    fn failed_rows_are_retried_on_the_next_apply() {
        let mut surface = MatrixSurface::new(RecordingDevice {
            broken_rows: 0b0000_0100,
            ..RecordingDevice::default()
        });
        let desired = Bitmap::from_rows([0x01, 0, 0x80, 0x08, 0, 0, 0, 0]);

        let err = surface.apply(&desired).unwrap_err();
        assert_eq!(err.failed_rows().collect::<Vec<_>>(), vec![2]);
        assert_eq!(err.last(), DeviceError::Bus { kind: ErrorKind::Other });
        assert_eq!(surface.device().writes, vec![(0, 0x01), (3, 0x08)]);
        assert_eq!(surface.bitmap().row(2), 0);

        surface.device_mut().broken_rows = 0;
        surface.device_mut().writes.clear();
        surface.apply(&desired).unwrap();
        assert_eq!(surface.device().writes, vec![(2, 0x80)]);
        assert_eq!(surface.bitmap(), &desired);
    }

    #[test]
    fn default_clear_all_stops_at_first_failure() {
        let mut device = RecordingDevice {
            broken_rows: 0b0000_1000,
            ..RecordingDevice::default()
        };
        assert!(device.clear_all().is_err());
        assert_eq!(device.writes, vec![(0, 0), (1, 0), (2, 0)]);
    }
}
