use crate::mapping::CoordinateMapper;

/// ISSI IS31FL3741 evaluation board, 9 columns by 13 rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IssiEvb;

impl IssiEvb {
    pub const WIDTH: u8 = 9;
    pub const HEIGHT: u8 = 13;
}

impl CoordinateMapper for IssiEvb {
    fn width(&self) -> u8 {
        Self::WIDTH
    }

    fn height(&self) -> u8 {
        Self::HEIGHT
    }

    fn pixel_addrs(&self, x: u8, y: u8) -> [u16; 3] {
        let (x, y) = (x as u16, y as u16);

        let offset = if y > 2 {
            (x * 10 + 12 - y) * 3
        } else {
            (92 + x * 3 - y) * 3
        };

        [offset, offset + 1, offset + 2]
    }
}
