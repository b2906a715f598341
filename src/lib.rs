//! Driver for the ISSI IS31FL3741 13x9 RGB LED matrix controller.
//!
//! [`IS31FL3741`] talks to the chip over an `embedded-hal` I2C bus and
//! exposes its 351 PWM channels as a flat array, either written through to
//! the chip or staged in a local buffer and sent with
//! [`flush`](IS31FL3741::flush). [`Matrix`] layers 2D coordinates and RGB
//! colors on top using a per-board [`CoordinateMapper`]; mappers for common
//! boards live in [`boards`].
//!
//! Both blocking and async buses are supported: pick the constructor
//! (`new_blocking` or `new_async`) matching your HAL.
#![no_std]

pub mod boards;
mod color;
mod config;
mod error;
mod is31fl3741;
mod mapping;
mod matrix;
mod pixel_store;
mod state;

#[cfg(test)]
mod test_utils;

pub use color::{pack, unpack, ChannelOrder};
pub use config::{DEFAULT_ADDRESS, TOTAL_LED_COUNT, UNMAPPED};
pub use error::IS31FL3741Error;
pub use is31fl3741::{Async, Blocking, Mode, IS31FL3741};
pub use mapping::CoordinateMapper;
pub use matrix::Matrix;
pub use pixel_store::{Buffering, PIXEL_BUFFER_LEN};
