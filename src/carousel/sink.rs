//! Output sinks the carousel controller renders into.
//!
//! The controller never looks anything up by itself. Whoever mounts it hands
//! over the three surfaces it draws on:
//!
//! | Sink | Receives |
//! |---|---|
//! | [`SlideTrack`] | slide count (read once at mount), horizontal offset |
//! | [`SpecPanel`] | the spec lines of the active slide, replacing the old ones |
//! | [`Indicators`] | a full rebuild with N dots, then one active flag per dot |
//!
//! Production implementations live next to their rendering surface: markup
//! sinks in [`generate`](crate::generate) and DOM sinks in the `web` module.

/// The strip of slides laid out edge to edge inside the carousel viewport.
pub trait SlideTrack {
    /// Number of slides on the track. Read once when the carousel mounts.
    fn slide_count(&self) -> usize;

    /// Shift the track so that slide `index` fills the viewport.
    fn show_slide(&mut self, index: usize);
}

/// Side panel listing the specs of the active slide.
pub trait SpecPanel {
    /// Replace the panel content with `lines`.
    fn replace_lines(&mut self, lines: &[String]);
}

/// Row of clickable position dots.
pub trait Indicators {
    /// Drop any existing dots and build exactly `count` new ones.
    fn rebuild(&mut self, count: usize);

    /// Mark the dot at `position` active or inactive.
    fn set_active(&mut self, position: usize, active: bool);
}

/// Stand-in for a surface the page does not have.
///
/// Useful as the type parameter of an absent sink: `None::<Detached>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detached;

impl SlideTrack for Detached {
    fn slide_count(&self) -> usize {
        0
    }

    fn show_slide(&mut self, _index: usize) {}
}

impl SpecPanel for Detached {
    fn replace_lines(&mut self, _lines: &[String]) {}
}

impl Indicators for Detached {
    fn rebuild(&mut self, _count: usize) {}

    fn set_active(&mut self, _position: usize, _active: bool) {}
}

/// CSS transform that brings slide `index` into view.
///
/// Every slide is 100% of the viewport wide, so the track moves by whole
/// multiples of 100%.
pub fn translate_x(index: usize) -> String {
    format!("translateX(-{}%)", index * 100)
}

/// Accessible label of the dot at zero-based `position`.
pub fn dot_label(position: usize) -> String {
    format!("Slika {}", position + 1)
}
