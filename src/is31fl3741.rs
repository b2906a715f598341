use crate::config::*;
use crate::error::IS31FL3741Error;
use crate::pixel_store::{
    check_led, Buffering, PixelStore, HIGH_FRAME_START, LOW_FRAME_END, PIXEL_BUFFER_LEN,
};
use crate::state::State;

pub trait Mode {}

#[derive(Debug)]
pub struct Async;
#[derive(Debug)]
pub struct Blocking;

impl Mode for Async {}
impl Mode for Blocking {}

/// IS31FL3741 driver.
///
/// Owns the bus handle, the cached page selection and the pixel store. The
/// chip is addressed as a flat array of 351 PWM channels; see
/// [`Matrix`](crate::Matrix) for RGB and 2D coordinates.
pub struct IS31FL3741<BUS, M: Mode> {
    bus: BUS,
    address: u8,
    state: State,
    _phantom: core::marker::PhantomData<M>,
}

// General implementation
impl<BUS, M: Mode> IS31FL3741<BUS, M> {
    /// Create a new IS31FL3741 driver without touching the bus.
    /// Call `initialize()` before use, or construct with
    /// `new_blocking`/`new_async` which do it for you.
    ///
    /// # Arguments
    /// * `bus` - The I2C bus to use
    /// * `address` - The I2C address of the device
    /// * `buffering` - Whether pixel writes are buffered until `flush()`
    pub fn new(bus: BUS, address: u8, buffering: Buffering) -> Self {
        Self {
            bus,
            address,
            state: State::new(buffering),
            _phantom: core::marker::PhantomData,
        }
    }

    pub fn into_inner(self) -> BUS {
        self.bus
    }

    pub fn inner(&self) -> &BUS {
        &self.bus
    }

    pub fn inner_mut(&mut self) -> &mut BUS {
        &mut self.bus
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// The page the driver believes is selected, `None` if unknown.
    pub fn page(&self) -> Option<u8> {
        self.state.page
    }

    pub fn buffering(&self) -> Buffering {
        self.state.pixels.buffering()
    }

    /// The pixel buffer including its leading sentinel byte, `None` when
    /// unbuffered.
    pub fn pixel_buffer(&self) -> Option<&[u8; PIXEL_BUFFER_LEN]> {
        self.state.pixels.as_bytes()
    }

    /// Number of PWM channels.
    pub fn len(&self) -> usize {
        TOTAL_LED_COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expected_id(&self) -> u8 {
        self.address << 1
    }
}

impl<BUS: embedded_hal::i2c::I2c> IS31FL3741<BUS, Blocking> {
    /// Create a driver, check the chip answers at `address` and reset it.
    ///
    /// # Returns
    /// * Err(IS31FL3741Error::DeviceNotFound) if the ID register does not match
    pub fn new_blocking(
        bus: BUS,
        address: u8,
        buffering: Buffering,
    ) -> Result<Self, IS31FL3741Error<BUS::Error>> {
        let mut is31fl3741 = Self::new(bus, address, buffering);
        is31fl3741.initialize()?;
        Ok(is31fl3741)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.bus
            .write(self.address, data)
            .map_err(IS31FL3741Error::I2c)
    }

    /// Write a single register on the currently selected page.
    pub fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.write(&[register, value])
    }

    /// Read a single register on the currently selected page.
    pub fn read_register(&mut self, register: u8) -> Result<u8, IS31FL3741Error<BUS::Error>> {
        let mut data = [0];
        self.bus
            .write_read(self.address, &[register], &mut data)
            .map_err(IS31FL3741Error::I2c)?;
        Ok(data[0])
    }

    /// Check that an IS31FL3741 answers at the configured address.
    ///
    /// # Returns
    /// * Ok(()) if the ID register reads twice the I2C address
    /// * Err(IS31FL3741Error::DeviceNotFound) otherwise
    pub fn probe(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let id = self.read_register(ID_REGISTER)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3741 {=u8:#x}: id {=u8:#x}", self.address, id);

        if id != self.expected_id() {
            return Err(IS31FL3741Error::DeviceNotFound);
        }
        Ok(())
    }

    /// Probe the device then reset it.
    pub fn initialize(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.probe()?;
        self.reset()
    }

    /// Reset all registers to their power-on defaults.
    pub fn reset(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.set_page(RESET_REGISTER.page)?;
        self.write_register(RESET_REGISTER.register, RESET_MAGIC)?;
        // The page register is back to its default as well.
        self.state.page = None;

        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3741 {=u8:#x}: reset", self.address);

        Ok(())
    }

    fn unlock(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.write_register(COMMAND_WRITE_LOCK_REGISTER, COMMAND_WRITE_UNLOCK)
    }

    /// Select a register page, unlocking the command register first.
    /// Does nothing when `page` is already selected.
    ///
    /// # Returns
    /// * Err(IS31FL3741Error::InvalidPage) if `page > 4`
    pub fn set_page(&mut self, page: u8) -> Result<(), IS31FL3741Error<BUS::Error>> {
        if page > MAX_PAGE {
            return Err(IS31FL3741Error::InvalidPage);
        }
        if self.state.page != Some(page) {
            self.unlock()?;
            self.write_register(COMMAND_REGISTER, page)?;

            #[cfg(feature = "defmt")]
            defmt::trace!("is31fl3741 {=u8:#x}: page {=u8}", self.address, page);

            self.state.page = Some(page);
        }
        Ok(())
    }

    /// Set the PWM value of a single LED.
    ///
    /// # Arguments
    /// * `led` - Raw LED index, 0 to 350
    /// * `value` - PWM duty cycle
    ///
    /// # Returns
    /// * Err(IS31FL3741Error::OutOfRange) if `led > 350`
    pub fn set_raw(&mut self, led: u16, value: u8) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let led = check_led(led).ok_or(IS31FL3741Error::OutOfRange)?;

        if self.state.pixels.set(led, value) {
            return Ok(());
        }

        let register = pwm_register(led);
        self.set_page(register.page)?;
        self.write_register(register.register, value)
    }

    /// Read back the PWM value of a single LED, from RAM when buffered.
    pub fn raw(&mut self, led: u16) -> Result<u8, IS31FL3741Error<BUS::Error>> {
        let led = check_led(led).ok_or(IS31FL3741Error::OutOfRange)?;

        if let Some(value) = self.state.pixels.get(led) {
            return Ok(value);
        }

        let register = pwm_register(led);
        self.set_page(register.page)?;
        self.read_register(register.register)
    }

    /// Send the pixel buffer to the chip. Does nothing when unbuffered.
    ///
    /// Page 0 goes out as one write taken straight from the buffer, the
    /// sentinel byte addressing its first register. Page 1 follows as a
    /// single transaction of its base address and the rest of the buffer.
    /// The buffer itself is never modified.
    pub fn flush(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        if self.state.pixels.buffering() == Buffering::Unbuffered {
            return Ok(());
        }

        self.set_page(PWM_REGISTER_BASE.page)?;
        if let PixelStore::Buffered(buffer) = &self.state.pixels {
            self.bus
                .write(self.address, &buffer[..LOW_FRAME_END])
                .map_err(IS31FL3741Error::I2c)?;
        }

        self.set_page(PWM_HIGH_REGISTER_BASE.page)?;
        if let PixelStore::Buffered(buffer) = &self.state.pixels {
            self.bus
                .transaction(
                    self.address,
                    &mut [
                        embedded_hal::i2c::Operation::Write(&[
                            PWM_HIGH_REGISTER_BASE.register,
                        ]),
                        embedded_hal::i2c::Operation::Write(&buffer[HIGH_FRAME_START..]),
                    ],
                )
                .map_err(IS31FL3741Error::I2c)?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("is31fl3741 {=u8:#x}: flushed", self.address);

        Ok(())
    }

    /// Set the same scaling value on every LED.
    pub fn set_led_scaling(&mut self, scale: u8) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let mut frame = [scale; LOW_PAGE_LED_COUNT + 1];

        frame[0] = SCALING_REGISTER_BASE.register;
        self.set_page(SCALING_REGISTER_BASE.page)?;
        self.write(&frame)?;

        frame[0] = SCALING_HIGH_REGISTER_BASE.register;
        self.set_page(SCALING_HIGH_REGISTER_BASE.page)?;
        self.write(&frame[..HIGH_PAGE_LED_COUNT + 1])?;

        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3741 {=u8:#x}: scaling {=u8}", self.address, scale);

        Ok(())
    }

    /// Set the scaling value of a single LED.
    pub fn set_scaling(&mut self, led: u16, scale: u8) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let led = check_led(led).ok_or(IS31FL3741Error::OutOfRange)?;

        let register = scaling_register(led);
        self.set_page(register.page)?;
        self.write_register(register.register, scale)
    }

    pub fn set_global_current(&mut self, current: u8) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.set_page(GCC_REGISTER.page)?;
        self.write_register(GCC_REGISTER.register, current)
    }

    pub fn global_current(&mut self) -> Result<u8, IS31FL3741Error<BUS::Error>> {
        self.set_page(GCC_REGISTER.page)?;
        self.read_register(GCC_REGISTER.register)
    }

    /// Leave (`true`) or enter (`false`) software shutdown. Other
    /// configuration bits are preserved.
    pub fn enable(&mut self, enable: bool) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.set_page(CONFIGURATION_REGISTER.page)?;
        let configuration = self.read_register(CONFIGURATION_REGISTER.register)?;
        let configuration = if enable {
            configuration | CONFIGURATION_SOFTWARE_SHUTDOWN_DISABLE
        } else {
            configuration & !CONFIGURATION_SOFTWARE_SHUTDOWN_DISABLE
        };
        self.write_register(CONFIGURATION_REGISTER.register, configuration)
    }

    pub fn is_enabled(&mut self) -> Result<bool, IS31FL3741Error<BUS::Error>> {
        self.set_page(CONFIGURATION_REGISTER.page)?;
        let configuration = self.read_register(CONFIGURATION_REGISTER.register)?;
        Ok(configuration & CONFIGURATION_SOFTWARE_SHUTDOWN_DISABLE != 0)
    }

    /// Write `data` through a raw index mapping, then flush.
    ///
    /// `data[i]` goes to LED `mapping[i]`; entries equal to [`UNMAPPED`] are
    /// skipped.
    ///
    /// # Returns
    /// * Err(IS31FL3741Error::OutOfRange) if `data` is longer than `mapping`
    pub fn write_mapped(
        &mut self,
        mapping: &[u16],
        data: &[u8],
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        if data.len() > mapping.len() {
            return Err(IS31FL3741Error::OutOfRange);
        }

        for (&led, &value) in mapping.iter().zip(data) {
            if led != UNMAPPED {
                self.set_raw(led, value)?;
            }
        }

        self.flush()
    }
}

impl<BUS: embedded_hal_async::i2c::I2c> IS31FL3741<BUS, Async> {
    /// Create a driver, check the chip answers at `address` and reset it.
    pub async fn new_async(
        bus: BUS,
        address: u8,
        buffering: Buffering,
    ) -> Result<Self, IS31FL3741Error<BUS::Error>> {
        let mut is31fl3741 = Self::new(bus, address, buffering);
        is31fl3741.initialize().await?;
        Ok(is31fl3741)
    }

    async fn write(&mut self, data: &[u8]) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.bus
            .write(self.address, data)
            .await
            .map_err(IS31FL3741Error::I2c)
    }

    pub async fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.write(&[register, value]).await
    }

    pub async fn read_register(
        &mut self,
        register: u8,
    ) -> Result<u8, IS31FL3741Error<BUS::Error>> {
        let mut data = [0];
        self.bus
            .write_read(self.address, &[register], &mut data)
            .await
            .map_err(IS31FL3741Error::I2c)?;
        Ok(data[0])
    }

    pub async fn probe(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let id = self.read_register(ID_REGISTER).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3741 {=u8:#x}: id {=u8:#x}", self.address, id);

        if id != self.expected_id() {
            return Err(IS31FL3741Error::DeviceNotFound);
        }
        Ok(())
    }

    pub async fn initialize(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.probe().await?;
        self.reset().await
    }

    pub async fn reset(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.set_page(RESET_REGISTER.page).await?;
        self.write_register(RESET_REGISTER.register, RESET_MAGIC)
            .await?;
        self.state.page = None;

        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3741 {=u8:#x}: reset", self.address);

        Ok(())
    }

    async fn unlock(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.write_register(COMMAND_WRITE_LOCK_REGISTER, COMMAND_WRITE_UNLOCK)
            .await
    }

    pub async fn set_page(&mut self, page: u8) -> Result<(), IS31FL3741Error<BUS::Error>> {
        if page > MAX_PAGE {
            return Err(IS31FL3741Error::InvalidPage);
        }
        if self.state.page != Some(page) {
            self.unlock().await?;
            self.write_register(COMMAND_REGISTER, page).await?;

            #[cfg(feature = "defmt")]
            defmt::trace!("is31fl3741 {=u8:#x}: page {=u8}", self.address, page);

            self.state.page = Some(page);
        }
        Ok(())
    }

    pub async fn set_raw(
        &mut self,
        led: u16,
        value: u8,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let led = check_led(led).ok_or(IS31FL3741Error::OutOfRange)?;

        if self.state.pixels.set(led, value) {
            return Ok(());
        }

        let register = pwm_register(led);
        self.set_page(register.page).await?;
        self.write_register(register.register, value).await
    }

    pub async fn raw(&mut self, led: u16) -> Result<u8, IS31FL3741Error<BUS::Error>> {
        let led = check_led(led).ok_or(IS31FL3741Error::OutOfRange)?;

        if let Some(value) = self.state.pixels.get(led) {
            return Ok(value);
        }

        let register = pwm_register(led);
        self.set_page(register.page).await?;
        self.read_register(register.register).await
    }

    pub async fn flush(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        if self.state.pixels.buffering() == Buffering::Unbuffered {
            return Ok(());
        }

        self.set_page(PWM_REGISTER_BASE.page).await?;
        if let PixelStore::Buffered(buffer) = &self.state.pixels {
            self.bus
                .write(self.address, &buffer[..LOW_FRAME_END])
                .await
                .map_err(IS31FL3741Error::I2c)?;
        }

        self.set_page(PWM_HIGH_REGISTER_BASE.page).await?;
        if let PixelStore::Buffered(buffer) = &self.state.pixels {
            self.bus
                .transaction(
                    self.address,
                    &mut [
                        embedded_hal_async::i2c::Operation::Write(&[
                            PWM_HIGH_REGISTER_BASE.register,
                        ]),
                        embedded_hal_async::i2c::Operation::Write(&buffer[HIGH_FRAME_START..]),
                    ],
                )
                .await
                .map_err(IS31FL3741Error::I2c)?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("is31fl3741 {=u8:#x}: flushed", self.address);

        Ok(())
    }

    pub async fn set_led_scaling(&mut self, scale: u8) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let mut frame = [scale; LOW_PAGE_LED_COUNT + 1];

        frame[0] = SCALING_REGISTER_BASE.register;
        self.set_page(SCALING_REGISTER_BASE.page).await?;
        self.write(&frame).await?;

        frame[0] = SCALING_HIGH_REGISTER_BASE.register;
        self.set_page(SCALING_HIGH_REGISTER_BASE.page).await?;
        self.write(&frame[..HIGH_PAGE_LED_COUNT + 1]).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("is31fl3741 {=u8:#x}: scaling {=u8}", self.address, scale);

        Ok(())
    }

    pub async fn set_scaling(
        &mut self,
        led: u16,
        scale: u8,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let led = check_led(led).ok_or(IS31FL3741Error::OutOfRange)?;

        let register = scaling_register(led);
        self.set_page(register.page).await?;
        self.write_register(register.register, scale).await
    }

    pub async fn set_global_current(
        &mut self,
        current: u8,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.set_page(GCC_REGISTER.page).await?;
        self.write_register(GCC_REGISTER.register, current).await
    }

    pub async fn global_current(&mut self) -> Result<u8, IS31FL3741Error<BUS::Error>> {
        self.set_page(GCC_REGISTER.page).await?;
        self.read_register(GCC_REGISTER.register).await
    }

    pub async fn enable(&mut self, enable: bool) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.set_page(CONFIGURATION_REGISTER.page).await?;
        let configuration = self
            .read_register(CONFIGURATION_REGISTER.register)
            .await?;
        let configuration = if enable {
            configuration | CONFIGURATION_SOFTWARE_SHUTDOWN_DISABLE
        } else {
            configuration & !CONFIGURATION_SOFTWARE_SHUTDOWN_DISABLE
        };
        self.write_register(CONFIGURATION_REGISTER.register, configuration)
            .await
    }

    pub async fn is_enabled(&mut self) -> Result<bool, IS31FL3741Error<BUS::Error>> {
        self.set_page(CONFIGURATION_REGISTER.page).await?;
        let configuration = self
            .read_register(CONFIGURATION_REGISTER.register)
            .await?;
        Ok(configuration & CONFIGURATION_SOFTWARE_SHUTDOWN_DISABLE != 0)
    }

    pub async fn write_mapped(
        &mut self,
        mapping: &[u16],
        data: &[u8],
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        if data.len() > mapping.len() {
            return Err(IS31FL3741Error::OutOfRange);
        }

        for (&led, &value) in mapping.iter().zip(data) {
            if led != UNMAPPED {
                self.set_raw(led, value).await?;
            }
        }

        self.flush().await
    }
}
