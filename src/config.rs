pub const COMMAND_REGISTER: u8 = 0xfd;
pub const COMMAND_WRITE_LOCK_REGISTER: u8 = 0xfe;
pub const COMMAND_WRITE_UNLOCK: u8 = 0xc5;
pub const ID_REGISTER: u8 = 0xfc;

/// Default 7-bit I2C address (ADDR pin tied to GND).
pub const DEFAULT_ADDRESS: u8 = 0x30;

/// Highest page index accepted by the command register.
pub const MAX_PAGE: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagedRegister {
    pub page: u8,
    pub register: u8,
}

pub const PWM_REGISTER_BASE: PagedRegister = PagedRegister {
    page: 0x00,
    register: 0x00,
};
pub const PWM_HIGH_REGISTER_BASE: PagedRegister = PagedRegister {
    page: 0x01,
    register: 0x00,
};

pub const SCALING_REGISTER_BASE: PagedRegister = PagedRegister {
    page: 0x02,
    register: 0x00,
};
pub const SCALING_HIGH_REGISTER_BASE: PagedRegister = PagedRegister {
    page: 0x03,
    register: 0x00,
};

pub const CONFIGURATION_REGISTER: PagedRegister = PagedRegister {
    page: 0x04,
    register: 0x00,
};
pub const GCC_REGISTER: PagedRegister = PagedRegister {
    page: 0x04,
    register: 0x01,
};
pub const RESET_REGISTER: PagedRegister = PagedRegister {
    page: 0x04,
    register: 0x3f,
};

pub const RESET_MAGIC: u8 = 0xae;

pub const CONFIGURATION_SOFTWARE_SHUTDOWN_DISABLE: u8 = 0b0000_0001;

pub const TOTAL_LED_COUNT: usize = 351;

/// Mapping table entry for a buffer position with no LED behind it.
pub const UNMAPPED: u16 = 0xffff;

/// LEDs whose PWM and scaling registers live on the low pages (0 and 2).
pub const LOW_PAGE_LED_COUNT: usize = 180;

/// LEDs on the high pages (1 and 3).
pub const HIGH_PAGE_LED_COUNT: usize = TOTAL_LED_COUNT - LOW_PAGE_LED_COUNT;

/// Locate the PWM register of a raw LED index. `led` must be below
/// [`TOTAL_LED_COUNT`].
pub(crate) fn pwm_register(led: u16) -> PagedRegister {
    split_register(led, PWM_REGISTER_BASE, PWM_HIGH_REGISTER_BASE)
}

/// Locate the scaling register of a raw LED index.
pub(crate) fn scaling_register(led: u16) -> PagedRegister {
    split_register(led, SCALING_REGISTER_BASE, SCALING_HIGH_REGISTER_BASE)
}

fn split_register(led: u16, low: PagedRegister, high: PagedRegister) -> PagedRegister {
    let led = led as usize;
    if led < LOW_PAGE_LED_COUNT {
        PagedRegister {
            page: low.page,
            register: low.register + led as u8,
        }
    } else {
        PagedRegister {
            page: high.page,
            register: high.register + (led - LOW_PAGE_LED_COUNT) as u8,
        }
    }
}
