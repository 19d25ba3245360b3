//! Document scroll lock shared by the page overlays.
//!
//! The mobile menu and the lightbox both freeze page scrolling while they
//! are open (`overflow: hidden` on the root element). There is one flag, not
//! a counter: whichever overlay wrote last decides, so closing either one
//! releases the lock even if the other is still showing.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollLock {
    locked: bool,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn release(&mut self) {
        self.locked = false;
    }

    pub fn set(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Value for the root element's `overflow` style property.
    pub fn overflow(&self) -> &'static str {
        if self.locked { "hidden" } else { "" }
    }
}
