//! Packed 24-bit colors and the channel order of RGB LEDs.

/// Split a packed `0xRRGGBB` color into red, green and blue. Bits above the
/// low 24 are ignored.
pub fn unpack(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

pub fn pack(rgb: [u8; 3]) -> u32 {
    (rgb[0] as u32) << 16 | (rgb[1] as u32) << 8 | rgb[2] as u32
}

/// Which of the three raw LED indices returned by a mapper drives red,
/// green and blue.
///
/// Boards report the indices of an RGB LED in wiring order; the fields here
/// are positions into that triple. The named constants read in wiring order,
/// e.g. [`ChannelOrder::GRB`] means green is wired first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelOrder {
    red: u8,
    green: u8,
    blue: u8,
}

impl ChannelOrder {
    pub const RGB: ChannelOrder = ChannelOrder::from_offsets(0, 1, 2);
    pub const RBG: ChannelOrder = ChannelOrder::from_offsets(0, 2, 1);
    pub const GRB: ChannelOrder = ChannelOrder::from_offsets(1, 0, 2);
    pub const GBR: ChannelOrder = ChannelOrder::from_offsets(2, 0, 1);
    pub const BRG: ChannelOrder = ChannelOrder::from_offsets(1, 2, 0);
    pub const BGR: ChannelOrder = ChannelOrder::from_offsets(2, 1, 0);

    const fn from_offsets(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Build an order from explicit offsets.
    ///
    /// Returns `None` unless `red`, `green` and `blue` are a permutation of
    /// 0, 1 and 2.
    pub const fn new(red: u8, green: u8, blue: u8) -> Option<Self> {
        if red > 2 || green > 2 || blue > 2 {
            return None;
        }
        if red == green || red == blue || green == blue {
            return None;
        }
        Some(Self::from_offsets(red, green, blue))
    }

    /// Decode the two-bits-per-channel form `red << 4 | green << 2 | blue`.
    pub const fn from_packed(packed: u8) -> Option<Self> {
        if packed >> 6 != 0 {
            return None;
        }
        Self::new((packed >> 4) & 3, (packed >> 2) & 3, packed & 3)
    }

    pub const fn to_packed(self) -> u8 {
        self.red << 4 | self.green << 2 | self.blue
    }

    pub const fn red(&self) -> u8 {
        self.red
    }

    pub const fn green(&self) -> u8 {
        self.green
    }

    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Reorder a wiring-order triple into red, green, blue.
    pub fn apply<T: Copy>(&self, wired: [T; 3]) -> [T; 3] {
        [
            wired[self.red as usize],
            wired[self.green as usize],
            wired[self.blue as usize],
        ]
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        ChannelOrder::BGR
    }
}
