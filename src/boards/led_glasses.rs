//! Adafruit LED glasses: an 18x5 grid plus a 24-LED ring around each eye.
//!
//! The grid is not fully populated. Positions without an LED (the nose
//! bridge and the outer corners) all map to [`MISSING_PIXEL`], three
//! channels the glasses leave unconnected.

use crate::color::ChannelOrder;
use crate::error::IS31FL3741Error;
use crate::is31fl3741::{Async, Blocking, Mode};
use crate::mapping::CoordinateMapper;
use crate::matrix::Matrix;
use crate::pixel_store::Buffering;

/// Raw indices used for grid positions with no LED behind them.
pub const MISSING_PIXEL: [u16; 3] = [120, 121, 314];

/// LEDs per eye ring.
pub const RING_LED_COUNT: u8 = 24;

/// Scaling applied to every LED when the glasses are brought up.
pub const GLASSES_LED_SCALING: u8 = 0xff;

/// Global current applied when the glasses are brought up.
pub const GLASSES_GLOBAL_CURRENT: u8 = 0xfe;

const GRID_WIDTH: u8 = 18;
const GRID_HEIGHT: u8 = 5;

/// Grid wiring, column major: entry `x * 5 + y`.
#[rustfmt::skip]
const GRID_MAP: [[u16; 3]; GRID_WIDTH as usize * GRID_HEIGHT as usize] = [
    [120, 121, 314], [10, 8, 9], [13, 11, 12],
    [16, 14, 15], [4, 2, 3], [217, 215, 216],
    [220, 218, 219], [223, 221, 222], [226, 224, 225],
    [214, 212, 213], [187, 185, 186], [190, 188, 189],
    [193, 191, 192], [196, 194, 195], [184, 182, 183],
    [37, 35, 36], [40, 38, 39], [43, 41, 42],
    [46, 44, 45], [34, 32, 33], [67, 65, 66],
    [70, 68, 69], [73, 71, 72], [76, 74, 75],
    [64, 62, 63], [97, 95, 96], [100, 98, 99],
    [103, 101, 102], [106, 104, 105], [94, 92, 93],
    [127, 125, 126], [130, 128, 129], [133, 131, 132],
    [136, 134, 135], [124, 122, 123], [157, 155, 156],
    [160, 158, 159], [163, 161, 162], [166, 164, 165],
    [244, 242, 243], [247, 245, 246], [250, 248, 249],
    [253, 251, 252], [256, 254, 255], [120, 121, 314],
    [345, 347, 346], [342, 344, 343], [267, 269, 268],
    [263, 265, 264], [120, 121, 314], [336, 338, 337],
    [333, 335, 334], [237, 239, 238], [233, 235, 234],
    [348, 262, 349], [327, 329, 328], [324, 326, 325],
    [207, 209, 208], [203, 205, 204], [330, 202, 331],
    [318, 320, 319], [315, 317, 316], [177, 179, 178],
    [173, 175, 174], [321, 172, 322], [309, 311, 310],
    [306, 308, 307], [147, 149, 148], [143, 145, 144],
    [312, 142, 313], [300, 302, 301], [297, 299, 298],
    [117, 119, 118], [113, 115, 114], [303, 112, 304],
    [291, 293, 292], [288, 290, 289], [87, 89, 88],
    [83, 85, 84], [294, 82, 295], [282, 284, 283],
    [279, 281, 280], [57, 59, 58], [53, 55, 54],
    [285, 52, 286], [120, 121, 314], [270, 272, 271],
    [27, 29, 28], [23, 25, 24], [276, 22, 277],
];

#[rustfmt::skip]
const LEFT_RING_MAP: [[u16; 3]; RING_LED_COUNT as usize] = [
    [341, 210, 211], [332, 180, 181], [323, 150, 151],
    [127, 125, 126], [154, 152, 153], [163, 161, 162],
    [166, 164, 165], [244, 242, 243], [259, 257, 258],
    [169, 167, 168], [139, 137, 138], [109, 107, 108],
    [79, 77, 78], [49, 47, 48], [199, 197, 198],
    [229, 227, 228], [19, 17, 18], [4, 2, 3],
    [16, 14, 15], [13, 11, 12], [10, 8, 9],
    [217, 215, 216], [7, 5, 6], [350, 240, 241],
];

#[rustfmt::skip]
const RIGHT_RING_MAP: [[u16; 3]; RING_LED_COUNT as usize] = [
    [287, 30, 31], [278, 0, 1], [273, 275, 274],
    [282, 284, 283], [270, 272, 271], [27, 29, 28],
    [23, 25, 24], [276, 22, 277], [20, 26, 21],
    [50, 56, 51], [80, 86, 81], [110, 116, 111],
    [140, 146, 141], [170, 176, 171], [200, 206, 201],
    [230, 236, 231], [260, 266, 261], [348, 262, 349],
    [233, 235, 234], [237, 239, 238], [339, 232, 340],
    [327, 329, 328], [305, 90, 91], [296, 60, 61],
];

/// The rectangular grid of the LED glasses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedGlasses;

impl LedGlasses {
    pub const WIDTH: u8 = GRID_WIDTH;
    pub const HEIGHT: u8 = GRID_HEIGHT;
}

impl CoordinateMapper for LedGlasses {
    fn width(&self) -> u8 {
        Self::WIDTH
    }

    fn height(&self) -> u8 {
        Self::HEIGHT
    }

    fn pixel_addrs(&self, x: u8, y: u8) -> [u16; 3] {
        GRID_MAP[x as usize * GRID_HEIGHT as usize + y as usize]
    }
}

/// One of the two eye rings. LEDs are numbered 0 to 23.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedRing {
    Left,
    Right,
}

impl LedRing {
    /// Raw indices of ring LED `led` in wiring order, `None` past 23.
    pub fn pixel_addrs(self, led: u8) -> Option<[u16; 3]> {
        let map = match self {
            LedRing::Left => &LEFT_RING_MAP,
            LedRing::Right => &RIGHT_RING_MAP,
        };
        map.get(led as usize).copied()
    }
}

/// The three independently addressed parts of the glasses, as laid out by
/// [`animation_sequence`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlassesStrip {
    Left,
    Grid,
    Right,
}

pub const DEFAULT_STRIP_ORDER: [GlassesStrip; 3] =
    [GlassesStrip::Left, GlassesStrip::Grid, GlassesStrip::Right];
pub const DEFAULT_LEFT_START: u8 = 21;
pub const DEFAULT_RIGHT_START: u8 = 8;

/// Raw indices in an animation sequence: every grid pixel and both rings.
pub const SEQUENCE_LEN: usize =
    (GRID_WIDTH as usize * GRID_HEIGHT as usize + 2 * RING_LED_COUNT as usize) * 3;

/// Flatten the glasses into one strip of RGB pixels for animation code.
///
/// Strips are laid out in `order`. The grid runs row by row, each ring
/// starts at the given LED and wraps around. Every pixel contributes its
/// three raw indices in wiring order, ready for
/// [`IS31FL3741::write_mapped`](crate::IS31FL3741::write_mapped).
///
/// Returns `None` if a strip appears twice in `order`.
pub fn animation_sequence(
    order: [GlassesStrip; 3],
    left_start: u8,
    right_start: u8,
) -> Option<heapless::Vec<u16, SEQUENCE_LEN>> {
    if order[0] == order[1] || order[0] == order[2] || order[1] == order[2] {
        return None;
    }

    let mut sequence = heapless::Vec::new();
    for strip in order {
        match strip {
            GlassesStrip::Grid => {
                for y in 0..GRID_HEIGHT {
                    for x in 0..GRID_WIDTH {
                        sequence
                            .extend_from_slice(&LedGlasses.pixel_addrs(x, y))
                            .ok()?;
                    }
                }
            }
            GlassesStrip::Left | GlassesStrip::Right => {
                let (ring, start) = if strip == GlassesStrip::Left {
                    (LedRing::Left, left_start)
                } else {
                    (LedRing::Right, right_start)
                };
                for pixel in 0..RING_LED_COUNT {
                    let led = ((pixel as u16 + start as u16) % RING_LED_COUNT as u16) as u8;
                    sequence.extend_from_slice(&ring.pixel_addrs(led)?).ok()?;
                }
            }
        }
    }

    Some(sequence)
}

impl<BUS, M: Mode> Matrix<BUS, M, LedGlasses> {
    /// Raw indices of a ring LED with the channel order applied.
    fn ring_channels<E>(
        &self,
        ring: LedRing,
        led: u8,
    ) -> Result<[u16; 3], IS31FL3741Error<E>> {
        ring.pixel_addrs(led)
            .map(|wired| self.order().apply(wired))
            .ok_or(IS31FL3741Error::OutOfRange)
    }
}

impl<BUS: embedded_hal::i2c::I2c> Matrix<BUS, Blocking, LedGlasses> {
    /// Probe and reset the chip, then turn every LED's scaling and the global
    /// current up and enable the outputs.
    pub fn new_glasses_blocking(
        bus: BUS,
        address: u8,
        buffering: Buffering,
        order: ChannelOrder,
    ) -> Result<Self, IS31FL3741Error<BUS::Error>> {
        let mut glasses = Self::new_blocking(bus, address, buffering, LedGlasses, order)?;

        let device = glasses.device_mut();
        device.set_led_scaling(GLASSES_LED_SCALING)?;
        device.set_global_current(GLASSES_GLOBAL_CURRENT)?;
        device.enable(true)?;

        Ok(glasses)
    }

    /// Set the color of one ring LED.
    ///
    /// # Returns
    /// * Err(IS31FL3741Error::OutOfRange) if `led > 23`
    pub fn set_ring_pixel(
        &mut self,
        ring: LedRing,
        led: u8,
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let leds = self.ring_channels(ring, led)?;
        self.set_channels(leds, color)
    }

    pub fn ring_pixel(
        &mut self,
        ring: LedRing,
        led: u8,
    ) -> Result<u32, IS31FL3741Error<BUS::Error>> {
        let leds = self.ring_channels(ring, led)?;
        self.channels_color(leds)
    }

    pub fn fill_ring(
        &mut self,
        ring: LedRing,
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        for led in 0..RING_LED_COUNT {
            self.set_ring_pixel(ring, led, color)?;
        }
        Ok(())
    }
}

impl<BUS: embedded_hal_async::i2c::I2c> Matrix<BUS, Async, LedGlasses> {
    pub async fn new_glasses_async(
        bus: BUS,
        address: u8,
        buffering: Buffering,
        order: ChannelOrder,
    ) -> Result<Self, IS31FL3741Error<BUS::Error>> {
        let mut glasses = Self::new_async(bus, address, buffering, LedGlasses, order).await?;

        let device = glasses.device_mut();
        device.set_led_scaling(GLASSES_LED_SCALING).await?;
        device.set_global_current(GLASSES_GLOBAL_CURRENT).await?;
        device.enable(true).await?;

        Ok(glasses)
    }

    pub async fn set_ring_pixel(
        &mut self,
        ring: LedRing,
        led: u8,
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        let leds = self.ring_channels(ring, led)?;
        self.set_channels(leds, color).await
    }

    pub async fn ring_pixel(
        &mut self,
        ring: LedRing,
        led: u8,
    ) -> Result<u32, IS31FL3741Error<BUS::Error>> {
        let leds = self.ring_channels(ring, led)?;
        self.channels_color(leds).await
    }

    pub async fn fill_ring(
        &mut self,
        ring: LedRing,
        color: u32,
    ) -> Result<(), IS31FL3741Error<BUS::Error>> {
        for led in 0..RING_LED_COUNT {
            self.set_ring_pixel(ring, led, color).await?;
        }
        Ok(())
    }
}
