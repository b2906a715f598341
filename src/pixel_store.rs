use crate::config::*;

/// Length of the pixel buffer: one sentinel byte followed by one PWM byte per LED.
pub const PIXEL_BUFFER_LEN: usize = TOTAL_LED_COUNT + 1;

/// End (exclusive) of the first flush frame: sentinel plus the 180 page 0 LEDs.
pub(crate) const LOW_FRAME_END: usize = LOW_PAGE_LED_COUNT + 1;

/// Start of the page 1 PWM values in the buffer.
pub(crate) const HIGH_FRAME_START: usize = LOW_FRAME_END;

/// Where pixel writes go, selected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Buffering {
    /// Every pixel write is sent to the chip immediately.
    Unbuffered,
    /// Pixel writes land in RAM and reach the chip on `flush()`.
    Buffered,
}

/// PWM storage of the driver.
///
/// In the buffered variant element 0 is always 0 so the buffer can be handed
/// to the bus as-is, the leading byte doubling as the register address.
pub enum PixelStore {
    Unbuffered,
    Buffered([u8; PIXEL_BUFFER_LEN]),
}

impl PixelStore {
    pub fn new(buffering: Buffering) -> Self {
        match buffering {
            Buffering::Unbuffered => PixelStore::Unbuffered,
            Buffering::Buffered => PixelStore::Buffered([0; PIXEL_BUFFER_LEN]),
        }
    }

    pub fn buffering(&self) -> Buffering {
        match self {
            PixelStore::Unbuffered => Buffering::Unbuffered,
            PixelStore::Buffered(_) => Buffering::Buffered,
        }
    }

    /// Buffered PWM value of `led`, `None` when unbuffered.
    /// `led` must already be range checked.
    pub fn get(&self, led: u16) -> Option<u8> {
        match self {
            PixelStore::Unbuffered => None,
            PixelStore::Buffered(buffer) => Some(buffer[1 + led as usize]),
        }
    }

    /// Store `value` for `led`. Returns false when unbuffered, in which case
    /// the caller has to write the register itself.
    pub fn set(&mut self, led: u16, value: u8) -> bool {
        match self {
            PixelStore::Unbuffered => false,
            PixelStore::Buffered(buffer) => {
                buffer[1 + led as usize] = value;
                true
            }
        }
    }

    /// Raw view of the buffer, sentinel included.
    pub fn as_bytes(&self) -> Option<&[u8; PIXEL_BUFFER_LEN]> {
        match self {
            PixelStore::Unbuffered => None,
            PixelStore::Buffered(buffer) => Some(buffer),
        }
    }
}

/// Checked conversion of a raw LED index.
pub(crate) fn check_led(led: u16) -> Option<u16> {
    if (led as usize) < TOTAL_LED_COUNT {
        Some(led)
    } else {
        None
    }
}
