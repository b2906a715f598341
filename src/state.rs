use crate::pixel_store::{Buffering, PixelStore};

pub struct State {
    /// Last page written to the command register, `None` until the first
    /// selection and again after a reset.
    pub page: Option<u8>,
    pub pixels: PixelStore,
}

impl State {
    pub fn new(buffering: Buffering) -> Self {
        Self {
            page: None,
            pixels: PixelStore::new(buffering),
        }
    }
}
