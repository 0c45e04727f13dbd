//! In-memory stand-ins for the SPI bus used by the driver tests.

use embedded_hal::spi::{ErrorKind, ErrorType, Operation, SpiDevice};

/// Records every byte written and answers in-place transfers with `response`.
#[derive(Debug, Default)]
pub struct FakeSpi {
    pub transactions: Vec<Vec<u8>>,
    pub response: Vec<u8>,
    /// Zero based index of the transaction that should fail.
    pub fail_at: Option<usize>,
}

impl FakeSpi {
    pub fn responding(response: &[u8]) -> Self {
        Self {
            response: response.to_vec(),
            ..Self::default()
        }
    }

    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_at: Some(index),
            ..Self::default()
        }
    }
}

impl ErrorType for FakeSpi {
    type Error = ErrorKind;
}

impl SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        if self.fail_at == Some(self.transactions.len()) {
            self.transactions.push(Vec::new());
            return Err(ErrorKind::Other);
        }

        let mut written = Vec::new();
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => written.extend_from_slice(&bytes[..]),
                Operation::TransferInPlace(buffer) => {
                    written.extend_from_slice(&buffer[..]);
                    let len = buffer.len().min(self.response.len());
                    buffer[..len].copy_from_slice(&self.response[..len]);
                }
                Operation::Transfer(read, write) => {
                    written.extend_from_slice(&write[..]);
                    let len = read.len().min(self.response.len());
                    read[..len].copy_from_slice(&self.response[..len]);
                }
                Operation::Read(read) => {
                    let len = read.len().min(self.response.len());
                    read[..len].copy_from_slice(&self.response[..len]);
                }
                Operation::DelayNs(_) => {}
            }
        }
        self.transactions.push(written);
        Ok(())
    }
}
