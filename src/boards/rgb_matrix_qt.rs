use crate::mapping::CoordinateMapper;

/// Adafruit STEMMA QT 13x9 RGB LED matrix.
///
/// Rows are wired out of order, the first ten columns take ten LEDs per row
/// and the last three take three. Odd columns and the last column have their
/// channels rotated relative to the even ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RgbMatrixQt;

impl RgbMatrixQt {
    pub const WIDTH: u8 = 13;
    pub const HEIGHT: u8 = 9;

    const ROW_MAP: [u16; 9] = [8, 5, 4, 3, 2, 1, 0, 7, 6];
}

impl CoordinateMapper for RgbMatrixQt {
    fn width(&self) -> u8 {
        Self::WIDTH
    }

    fn height(&self) -> u8 {
        Self::HEIGHT
    }

    fn pixel_addrs(&self, x: u8, y: u8) -> [u16; 3] {
        let row = Self::ROW_MAP[y as usize];
        let x = x as u16;

        let offset = if x < 10 {
            3 * (x + row * 10)
        } else {
            3 * (x + 80 + row * 3)
        };

        if x & 1 == 1 || x == 12 {
            [offset + 2, offset, offset + 1]
        } else {
            [offset, offset + 1, offset + 2]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::tests::check_mapper;

    #[test]
    fn covers_every_led_once_test() {
        let usage = check_mapper(&RgbMatrixQt);
        assert!(usage.iter().all(|&used| used == 1));
    }

    #[test]
    fn pixel_addrs_test() {
        // Row 0 is wired as row 8
        assert_eq!(RgbMatrixQt.pixel_addrs(0, 0), [240, 241, 242]);
        // Odd column, rotated channels
        assert_eq!(RgbMatrixQt.pixel_addrs(1, 6), [5, 3, 4]);
        // Right-hand block, last column
        assert_eq!(RgbMatrixQt.pixel_addrs(12, 6), [278, 276, 277]);
        assert_eq!(RgbMatrixQt.pixel_addrs(10, 0), [342, 343, 344]);
    }
}
