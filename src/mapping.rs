/// Per-board translation from a logical `(x, y)` pixel to the raw indices
/// of its red, green and blue LEDs, in wiring order.
///
/// Implementations are pure: the same coordinate always yields the same
/// triple. They only need to be defined for `x < width()` and
/// `y < height()`; [`Matrix`](crate::Matrix) checks bounds before calling.
pub trait CoordinateMapper {
    fn width(&self) -> u8;

    fn height(&self) -> u8;

    /// Raw LED indices (0 to 350) of the pixel at `(x, y)`.
    fn pixel_addrs(&self, x: u8, y: u8) -> [u16; 3];

    /// Whether `(x, y)` lies on the board.
    fn contains(&self, x: u8, y: u8) -> bool {
        x < self.width() && y < self.height()
    }
}

impl<T: CoordinateMapper> CoordinateMapper for &T {
    fn width(&self) -> u8 {
        T::width(self)
    }

    fn height(&self) -> u8 {
        T::height(self)
    }

    fn pixel_addrs(&self, x: u8, y: u8) -> [u16; 3] {
        T::pixel_addrs(self, x, y)
    }
}
