use crate::color::{pack, unpack, ChannelOrder};
use crate::error::IS31FL3741Error;
use crate::is31fl3741::{Async, Blocking, Mode, IS31FL3741};
use crate::mapping::CoordinateMapper;
use crate::pixel_store::Buffering;

/// RGB pixels in a board's 2D coordinate space.
///
/// Wraps an [`IS31FL3741`] with a [`CoordinateMapper`] and a
/// [`ChannelOrder`]. Colors are packed `0xRRGGBB`; no gamma correction is
/// applied.
///
/// # Example
///
/// ```no_run
/// # use is31fl3741::IS31FL3741Error;
/// # fn demo<I2C: embedded_hal::i2c::I2c>(i2c: I2C) -> Result<(), IS31FL3741Error<I2C::Error>> {
/// use is31fl3741::{boards::RgbMatrixQt, Buffering, ChannelOrder, Matrix, DEFAULT_ADDRESS};
///
/// let mut matrix = Matrix::new_blocking(
///     i2c,
///     DEFAULT_ADDRESS,
///     Buffering::Buffered,
///     RgbMatrixQt,
///     ChannelOrder::BGR,
/// )?;
/// matrix.device_mut().set_led_scaling(0xff)?;
/// matrix.device_mut().set_global_current(0xff)?;
/// matrix.device_mut().enable(true)?;
///
/// matrix.set_pixel(0, 0, 0xff0000)?;
/// matrix.flush()?;
/// # Ok(())
/// # }
/// ```
pub struct Matrix<BUS, M: Mode, MAP> {
    device: IS31FL3741<BUS, M>,
    mapper: MAP,
    order: ChannelOrder,
}

impl<BUS, M: Mode, MAP: CoordinateMapper> Matrix<BUS, M, MAP> {
    pub fn new(device: IS31FL3741<BUS, M>, mapper: MAP, order: ChannelOrder) -> Self {
        Self {
            device,
            mapper,
            order,
        }
    }

    pub fn device(&self) -> &IS31FL3741<BUS, M> {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut IS31FL3741<BUS, M> {
        &mut self.device
    }

    pub fn into_inner(self) -> IS31FL3741<BUS, M> {
        self.device
    }

    pub fn mapper(&self) -> &MAP {
        &self.mapper
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn width(&self) -> u8 {
        self.mapper.width()
    }

    pub fn height(&self) -> u8 {
        self.mapper.height()
    }

    /// Number of LED channels covered by the matrix, three per pixel.
    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize * 3
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw indices of the red, green and blue LEDs at `(x, y)`.
    pub fn channels(&self, x: u8, y: u8) -> Option<[u16; 3]> {
        if !self.mapper.contains(x, y) {
            return None;
        }
        Some(self.order.apply(self.mapper.pixel_addrs(x, y)))
    }
}

impl<BUS: embedded_hal::i2c::I2c, MAP: CoordinateMapper> Matrix<BUS, Blocking, MAP> {
    /// Probe and reset the chip, then wrap it.
    pub fn new_blocking(
        bus: BUS,
        address: u8,
        buffering: Buffering,
        mapper: MAP,
        order: ChannelOrder,
    ) -> Result<Self, IS31FL3741Error<BUS::Error>> {
        let device = IS31FL3741::new_blocking(bus, address, buffering)?;
        Ok(Self::new(device, mapper, order))
    }

    pub(crate) fn set_channels(
        &mut self,
        leds: [u16; 3],
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        for (led, value) in leds.into_iter().zip(unpack(color)) {
            self.device.set_raw(led, value)?;
        }
        Ok(())
    }

    pub(crate) fn channels_color(
        &mut self,
        leds: [u16; 3],
    ) -> Result<u32, IS31FL3741Error<BUS::Error>> {
        let mut rgb = [0; 3];
        for (value, led) in rgb.iter_mut().zip(leds) {
            *value = self.device.raw(led)?;
        }
        Ok(pack(rgb))
    }

    /// Set the color of the pixel at `(x, y)`.
    ///
    /// # Returns
    /// * Err(IS31FL3741Error::OutOfRange) if `(x, y)` is off the board
    pub fn set_pixel(
        &mut self,
        x: u8,
        y: u8,
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let leds = self.channels(x, y).ok_or(IS31FL3741Error::OutOfRange)?;
        self.set_channels(leds, color)
    }

    /// Color of the pixel at `(x, y)`.
    pub fn pixel(&mut self, x: u8, y: u8) -> Result<u32, IS31FL3741Error<BUS::Error>> {
        let leds = self.channels(x, y).ok_or(IS31FL3741Error::OutOfRange)?;
        self.channels_color(leds)
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: u32) -> Result<(), IS31FL3741Error<BUS::Error>> {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, color)?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.device.flush()
    }
}

impl<BUS: embedded_hal_async::i2c::I2c, MAP: CoordinateMapper> Matrix<BUS, Async, MAP> {
    pub async fn new_async(
        bus: BUS,
        address: u8,
        buffering: Buffering,
        mapper: MAP,
        order: ChannelOrder,
    ) -> Result<Self, IS31FL3741Error<BUS::Error>> {
        let device = IS31FL3741::new_async(bus, address, buffering).await?;
        Ok(Self::new(device, mapper, order))
    }

    pub(crate) async fn set_channels(
        &mut self,
        leds: [u16; 3],
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        for (led, value) in leds.into_iter().zip(unpack(color)) {
            self.device.set_raw(led, value).await?;
        }
        Ok(())
    }

    pub(crate) async fn channels_color(
        &mut self,
        leds: [u16; 3],
    ) -> Result<u32, IS31FL3741Error<BUS::Error>> {
        let mut rgb = [0; 3];
        for (value, led) in rgb.iter_mut().zip(leds) {
            *value = self.device.raw(led).await?;
        }
        Ok(pack(rgb))
    }

    pub async fn set_pixel(
        &mut self,
        x: u8,
        y: u8,
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let leds = self.channels(x, y).ok_or(IS31FL3741Error::OutOfRange)?;
        self.set_channels(leds, color).await
    }

    pub async fn pixel(&mut self, x: u8, y: u8) -> Result<u32, IS31FL3741Error<BUS::Error>> {
        let leds = self.channels(x, y).ok_or(IS31FL3741Error::OutOfRange)?;
        self.channels_color(leds).await
    }

    pub async fn fill(&mut self, color: u32) -> Result<(), IS31FL3741Error<BUS::Error>> {
        for y in 0..self.height() {
            for x in 0..self.width() {
                self.set_pixel(x, y, color).await?;
            }
        }
        Ok(())
    }

    pub async fn flush(&mut self) -> Result<(), IS31FL3741Error<BUS::Error>> {
        self.device.flush().await
    }
}
