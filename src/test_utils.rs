use embedded_hal::i2c::{Error, ErrorKind, ErrorType, Operation, SevenBitAddress};

use crate::config::*;

#[derive(Debug, PartialEq, Eq)]
pub enum FakeI2cError {
    Error,
}
impl Error for FakeI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Records every written byte and answers reads from a scripted queue.
pub struct FakeI2cBus<const N: usize, const M: usize> {
    pub write_data: heapless::Vec<u8, N>,
    pub read_data: heapless::Vec<u8, M>,
    pub transactions: usize,
}

impl<const N: usize, const M: usize> ErrorType for FakeI2cBus<N, M> {
    type Error = FakeI2cError;
}

impl<const N: usize, const M: usize> FakeI2cBus<N, M> {
    pub fn new() -> Self {
        Self {
            write_data: heapless::Vec::new(),
            read_data: heapless::Vec::new(),
            transactions: 0,
        }
    }

    pub fn new_with_read_data(read_data: &[u8]) -> Self {
        Self {
            write_data: heapless::Vec::new(),
            read_data: heapless::Vec::from_slice(read_data).unwrap(),
            transactions: 0,
        }
    }

    pub fn write_data_as_ref(&self) -> &[u8] {
        self.write_data.as_slice()
    }

    fn run(&mut self, operations: &mut [Operation<'_>]) -> Result<(), FakeI2cError> {
        self.transactions += 1;
        for operation in operations {
            match operation {
                Operation::Write(write) => {
                    self.write_data
                        .extend_from_slice(write)
                        .map_err(|_| FakeI2cError::Error)?;
                }
                Operation::Read(read) => {
                    for byte in read.iter_mut() {
                        if self.read_data.is_empty() {
                            return Err(FakeI2cError::Error);
                        }
                        *byte = self.read_data.remove(0);
                    }
                }
            }
        }
        Ok(())
    }
}

impl<const N: usize, const M: usize> embedded_hal::i2c::I2c for FakeI2cBus<N, M> {
    fn transaction(
        &mut self,
        _address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(operations)
    }
}

impl<const N: usize, const M: usize> embedded_hal_async::i2c::I2c for FakeI2cBus<N, M> {
    async fn transaction(
        &mut self,
        _address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(operations)
    }
}

const SIMULATED_PAGE_COUNT: usize = MAX_PAGE as usize + 1;

/// Register level model of an IS31FL3741: page lock, page select, ID register
/// and auto-incrementing page memory. Every written byte is also logged.
pub struct SimulatedChip {
    pub id: u8,
    pub lock: u8,
    pub page: u8,
    pub pages: [[u8; 256]; SIMULATED_PAGE_COUNT],
    pub write_log: heapless::Vec<u8, 4096>,
    pub transactions: usize,
    pub page_selects: usize,
    /// Index of a transaction to fail with a bus error.
    pub fail_at: Option<usize>,
    /// Index of an async transaction that never completes.
    pub stall_at: Option<usize>,
}

impl ErrorType for SimulatedChip {
    type Error = FakeI2cError;
}

impl SimulatedChip {
    pub fn new(id: u8) -> Self {
        Self {
            id,
            lock: 0,
            page: 0,
            pages: [[0; 256]; SIMULATED_PAGE_COUNT],
            write_log: heapless::Vec::new(),
            transactions: 0,
            page_selects: 0,
            fail_at: None,
            stall_at: None,
        }
    }

    pub fn pwm(&self, led: u16) -> u8 {
        let register = pwm_register(led);
        self.pages[register.page as usize][register.register as usize]
    }

    pub fn scaling(&self, led: u16) -> u8 {
        let register = scaling_register(led);
        self.pages[register.page as usize][register.register as usize]
    }

    fn store(&mut self, register: u8, value: u8) {
        match register {
            COMMAND_WRITE_LOCK_REGISTER => self.lock = value,
            COMMAND_REGISTER => {
                if self.lock == COMMAND_WRITE_UNLOCK && value <= MAX_PAGE {
                    self.page = value;
                    self.page_selects += 1;
                }
                // The lock re-engages after every page write.
                self.lock = 0;
            }
            ID_REGISTER => {}
            _ => {
                if self.page == RESET_REGISTER.page
                    && register == RESET_REGISTER.register
                    && value == RESET_MAGIC
                {
                    self.pages = [[0; 256]; SIMULATED_PAGE_COUNT];
                    self.page = 0;
                } else {
                    self.pages[self.page as usize][register as usize] = value;
                }
            }
        }
    }

    fn load(&self, register: u8) -> u8 {
        match register {
            ID_REGISTER => self.id,
            COMMAND_REGISTER => self.page,
            _ => self.pages[self.page as usize][register as usize],
        }
    }

    fn run(&mut self, operations: &mut [Operation<'_>]) -> Result<(), FakeI2cError> {
        let index = self.transactions;
        self.transactions += 1;
        if self.fail_at == Some(index) {
            return Err(FakeI2cError::Error);
        }

        let mut pointer: Option<u8> = None;
        for operation in operations {
            match operation {
                Operation::Write(write) => {
                    for &byte in write.iter() {
                        self.write_log.push(byte).map_err(|_| FakeI2cError::Error)?;
                        match pointer {
                            None => pointer = Some(byte),
                            Some(register) => {
                                self.store(register, byte);
                                pointer = Some(register.wrapping_add(1));
                            }
                        }
                    }
                }
                Operation::Read(read) => {
                    let mut register = pointer.unwrap_or(0);
                    for byte in read.iter_mut() {
                        *byte = self.load(register);
                        register = register.wrapping_add(1);
                    }
                    pointer = Some(register);
                }
            }
        }
        Ok(())
    }
}

impl embedded_hal::i2c::I2c for SimulatedChip {
    fn transaction(
        &mut self,
        _address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.run(operations)
    }
}

impl embedded_hal_async::i2c::I2c for SimulatedChip {
    async fn transaction(
        &mut self,
        _address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.stall_at == Some(self.transactions) {
            core::future::pending::<()>().await;
        }
        self.run(operations)
    }
}
