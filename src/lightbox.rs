//! Full-screen image overlay.
//!
//! Project and equipment thumbnails are links to the full-size image. A
//! click opens the image in this overlay (same tab) instead of following the
//! link. The overlay closes through its close button, a click on the dark
//! backdrop, or Escape (see [`chrome::Page::handle_key`](crate::chrome::Page::handle_key)).

use crate::scroll::ScrollLock;

/// Where inside the open overlay a click landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay element itself, around the image.
    Backdrop,
    /// The image or anything else inside the overlay.
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lightbox {
    attached: bool,
    shown: Option<Shown>,
}

impl Lightbox {
    /// A lightbox backed by an overlay and an image element on the page.
    pub fn attached() -> Self {
        Self {
            attached: true,
            shown: None,
        }
    }

    /// A page without overlay markup. Every operation is a no-op.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Show `src` in the overlay and lock page scrolling.
    ///
    /// Links without a target are ignored.
    pub fn open(&mut self, src: &str, alt: Option<&str>, scroll: &mut ScrollLock) {
        if !self.attached || src.is_empty() {
            return;
        }
        self.shown = Some(Shown {
            src: src.to_string(),
            alt: alt.unwrap_or_default().to_string(),
        });
        scroll.lock();
    }

    /// Hide the overlay, clear the image and release scrolling.
    pub fn close(&mut self, scroll: &mut ScrollLock) {
        if !self.attached {
            return;
        }
        self.shown = None;
        scroll.release();
    }

    /// Close on backdrop clicks only; clicks on the image keep it open.
    pub fn click(&mut self, target: ClickTarget, scroll: &mut ScrollLock) {
        if target == ClickTarget::Backdrop {
            self.close(scroll);
        }
    }

    pub fn is_open(&self) -> bool {
        self.shown.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn shown(&self) -> Option<&Shown> {
        self.shown.as_ref()
    }

    /// `src` and `alt` the image element should carry right now.
    pub fn image_attrs(&self) -> (&str, &str) {
        self.shown
            .as_ref()
            .map_or(("", ""), |s| (s.src.as_str(), s.alt.as_str()))
    }
}
