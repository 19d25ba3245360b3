//! Equipment carousel with a synchronized spec panel.
//!
//! The carousel owns a fixed sequence of slides and exactly one active
//! index. Every way of moving (prev/next buttons, dot clicks, swipes) ends in
//! [`Carousel::go_to`], which wraps the requested index into range and then
//! redraws all three outputs from that index alone:
//!
//! ```text
//! prev / next ──┐
//! dot click ────┼──▶ go_to(i) ──▶ index = i mod N ──┬──▶ track offset
//! swipe ────────┘                                   ├──▶ spec panel
//!                                                   └──▶ active dot
//! ```
//!
//! The module is split into:
//! - **Sinks**: [`SlideTrack`], [`SpecPanel`], [`Indicators`] traits the
//!   controller draws into
//! - **Specs**: [`SpecTable`], the per-slide text with its first-entry fallback
//! - **Gesture**: [`Gesture`], the idle/dragging swipe recognizer
//!
//! ## Missing markup
//!
//! Every sink is optional. A page without dots or without a spec panel
//! still gets a working carousel; a page without a track (or with zero
//! slides) gets an inert one whose operations all do nothing.

pub mod gesture;
pub mod sink;
pub mod specs;

pub use gesture::{Gesture, SWIPE_THRESHOLD, Swipe};
pub use sink::{Detached, Indicators, SlideTrack, SpecPanel, dot_label, translate_x};
pub use specs::SpecTable;

/// Everything a carousel is mounted with.
///
/// Absent surfaces are `None`; give them a concrete type with [`Detached`].
#[derive(Debug)]
pub struct Mount<T, P, I> {
    pub track: Option<T>,
    pub panel: Option<P>,
    pub indicators: Option<I>,
    pub specs: SpecTable,
    pub swipe_threshold: f64,
}

impl<T, P, I> Mount<T, P, I> {
    /// Mount inputs with no surfaces attached and the default swipe threshold.
    pub fn new(specs: SpecTable) -> Self {
        Self {
            track: None,
            panel: None,
            indicators: None,
            specs,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }
}

#[derive(Debug)]
pub struct Carousel<T, P, I> {
    track: Option<T>,
    panel: Option<P>,
    indicators: Option<I>,
    specs: SpecTable,
    slide_count: usize,
    index: usize,
    gesture: Gesture,
    swipe_threshold: f64,
}

impl<T, P, I> Carousel<T, P, I>
where
    T: SlideTrack,
    P: SpecPanel,
    I: Indicators,
{
    /// Mount a carousel and show its first slide.
    ///
    /// The slide count is read from the track here and never again. With at
    /// least one slide, the dots are rebuilt from scratch and slide 0 is
    /// rendered before this returns.
    pub fn mount(mount: Mount<T, P, I>) -> Self {
        let slide_count = mount.track.as_ref().map_or(0, SlideTrack::slide_count);

        let mut carousel = Self {
            track: mount.track,
            panel: mount.panel,
            indicators: mount.indicators,
            specs: mount.specs,
            slide_count,
            index: 0,
            gesture: Gesture::Idle,
            swipe_threshold: mount.swipe_threshold,
        };

        if slide_count > 0 {
            if let Some(indicators) = carousel.indicators.as_mut() {
                indicators.rebuild(slide_count);
            }
            carousel.go_to(0);
        }
        carousel
    }

    /// Show slide `requested`, wrapping in both directions.
    ///
    /// Any integer is accepted: `-1` is the last slide, `N` is the first.
    /// Does nothing on an inert carousel.
    pub fn go_to(&mut self, requested: i64) {
        if self.slide_count == 0 {
            return;
        }
        let Some(track) = self.track.as_mut() else {
            return;
        };

        let n = self.slide_count as i64;
        let index = (((requested % n) + n) % n) as usize;
        self.index = index;

        track.show_slide(index);
        // An empty table leaves whatever the panel already shows.
        if !self.specs.is_empty() {
            if let Some(panel) = self.panel.as_mut() {
                panel.replace_lines(self.specs.lines_for(index));
            }
        }
        if let Some(indicators) = self.indicators.as_mut() {
            for position in 0..self.slide_count {
                indicators.set_active(position, position == index);
            }
        }
    }

    pub fn next(&mut self) {
        self.go_to(self.index as i64 + 1);
    }

    pub fn previous(&mut self) {
        self.go_to(self.index as i64 - 1);
    }

    /// Jump straight to the slide a dot stands for.
    ///
    /// Dots exist only for real slides, so an out-of-range position is a
    /// click on a dot that was never built and is ignored.
    pub fn activate_indicator(&mut self, position: usize) {
        if position < self.slide_count {
            self.go_to(position as i64);
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        if self.is_inert() {
            return;
        }
        self.gesture.start(x);
    }

    pub fn touch_move(&mut self, x: f64) {
        self.gesture.track(x);
    }

    /// Release the current touch, navigating at most once.
    pub fn touch_end(&mut self) {
        match self.gesture.release(self.swipe_threshold) {
            Some(Swipe::Next) => self.next(),
            Some(Swipe::Previous) => self.previous(),
            None => {}
        }
    }

    pub fn touch_cancel(&mut self) {
        self.gesture.cancel();
    }

    pub fn is_inert(&self) -> bool {
        self.slide_count == 0 || self.track.is_none()
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Dot that is currently marked active, if the carousel has any slides.
    pub fn active_indicator(&self) -> Option<usize> {
        (!self.is_inert()).then_some(self.index)
    }

    /// Spec lines the panel is showing.
    pub fn active_specs(&self) -> &[String] {
        if self.is_inert() {
            return &[];
        }
        self.specs.lines_for(self.index)
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn track(&self) -> Option<&T> {
        self.track.as_ref()
    }

    pub fn panel(&self) -> Option<&P> {
        self.panel.as_ref()
    }

    pub fn indicators(&self) -> Option<&I> {
        self.indicators.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::sink::tests::{RecordedOp, RecordingSink};
    use super::*;

    type TestCarousel = Carousel<RecordingSink, RecordingSink, RecordingSink>;

    fn specs(n: usize) -> SpecTable {
        SpecTable::new(
            (0..n)
                .map(|i| vec![format!("Nosivost {i}"), format!("Doseg {i}")])
                .collect(),
        )
    }

    fn mount(slides: usize, spec_sets: usize) -> TestCarousel {
        Carousel::mount(Mount {
            track: Some(RecordingSink::with_slides(slides)),
            panel: Some(RecordingSink::new()),
            indicators: Some(RecordingSink::new()),
            specs: specs(spec_sets),
            swipe_threshold: SWIPE_THRESHOLD,
        })
    }

    fn panel_lines(c: &TestCarousel) -> Vec<String> {
        c.panel().unwrap().lines.clone()
    }

    fn active_dots(c: &TestCarousel) -> Vec<usize> {
        c.indicators().unwrap().active_dots()
    }

    // =========================================================================
    // Mount
    // =========================================================================

    #[test]
    fn mount_shows_first_slide() {
        let c = mount(3, 3);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.track().unwrap().offset, Some(0));
        assert_eq!(panel_lines(&c), vec!["Nosivost 0", "Doseg 0"]);
        assert_eq!(active_dots(&c), vec![0]);
    }

    #[test]
    fn mount_builds_one_dot_per_slide() {
        let c = mount(4, 4);
        let dots = c.indicators().unwrap();
        assert_eq!(dots.dots.len(), 4);
        assert_eq!(dots.rebuild_count(), 1);
        assert_eq!(dots.operations[0], RecordedOp::Rebuild(4));
    }

    #[test]
    fn remount_rebuilds_dots_in_full() {
        let first = mount(3, 3);
        let mut dots = first.indicators.unwrap();
        dots.set_active(2, true);

        let c: TestCarousel = Carousel::mount(Mount {
            track: Some(RecordingSink::with_slides(3)),
            panel: None,
            indicators: Some(dots),
            specs: specs(3),
            swipe_threshold: SWIPE_THRESHOLD,
        });
        let dots = c.indicators().unwrap();
        assert_eq!(dots.rebuild_count(), 2);
        assert_eq!(dots.dots.len(), 3);
        assert_eq!(dots.active_dots(), vec![0]);
    }

    #[test]
    fn empty_mount_is_inert() {
        let mut c = mount(0, 3);
        assert!(c.is_inert());
        c.go_to(5);
        c.next();
        c.previous();
        c.activate_indicator(0);
        c.touch_start(300.0);
        c.touch_move(0.0);
        c.touch_end();

        assert_eq!(c.current_index(), 0);
        assert!(c.track().unwrap().operations.is_empty());
        assert!(c.panel().unwrap().operations.is_empty());
        assert!(c.indicators().unwrap().operations.is_empty());
        assert_eq!(c.active_indicator(), None);
        assert!(c.active_specs().is_empty());
    }

    #[test]
    fn mount_without_track_is_inert() {
        let mut c: Carousel<Detached, RecordingSink, RecordingSink> = Carousel::mount(Mount {
            track: None,
            panel: Some(RecordingSink::new()),
            indicators: Some(RecordingSink::new()),
            specs: specs(3),
            swipe_threshold: SWIPE_THRESHOLD,
        });
        c.next();
        assert!(c.is_inert());
        assert_eq!(c.slide_count(), 0);
        assert!(c.panel().unwrap().operations.is_empty());
        assert!(c.indicators().unwrap().operations.is_empty());
    }

    #[test]
    fn mount_new_defaults_to_literal_threshold() {
        let m: Mount<Detached, Detached, Detached> = Mount::new(SpecTable::default());
        assert_eq!(m.swipe_threshold, 50.0);
        assert!(m.track.is_none());
    }

    // =========================================================================
    // go_to
    // =========================================================================

    #[test]
    fn go_to_wraps_any_integer() {
        for n in 1..=5usize {
            let mut c = mount(n, n);
            for r in -12i64..=12 {
                c.go_to(r);
                let expected = (((r % n as i64) + n as i64) % n as i64) as usize;
                assert_eq!(c.current_index(), expected, "n={n} r={r}");
                assert!(c.current_index() < n);
            }
        }
    }

    #[test]
    fn go_to_handles_extreme_values() {
        let mut c = mount(3, 3);
        c.go_to(i64::MAX);
        assert_eq!(c.current_index(), (i64::MAX % 3) as usize);
        c.go_to(i64::MIN);
        assert_eq!(c.current_index(), ((i64::MIN % 3) + 3) as usize % 3);
    }

    #[test]
    fn go_to_updates_every_output() {
        let mut c = mount(3, 3);
        c.go_to(2);
        assert_eq!(c.track().unwrap().offset, Some(2));
        assert_eq!(panel_lines(&c), vec!["Nosivost 2", "Doseg 2"]);
        assert_eq!(active_dots(&c), vec![2]);
        assert_eq!(c.active_indicator(), Some(2));
        assert_eq!(c.active_specs(), ["Nosivost 2", "Doseg 2"]);
    }

    #[test]
    fn go_to_is_idempotent() {
        let mut c = mount(4, 4);
        c.go_to(1);
        let lines = panel_lines(&c);
        let dots = c.indicators().unwrap().dots.clone();
        c.go_to(1);
        assert_eq!(panel_lines(&c), lines);
        assert_eq!(c.indicators().unwrap().dots, dots);
        assert_eq!(c.track().unwrap().offset, Some(1));
    }

    #[test]
    fn exactly_one_dot_active_after_each_move() {
        let mut c = mount(5, 5);
        for r in [3, -1, 7, 0, 2] {
            c.go_to(r);
            assert_eq!(active_dots(&c).len(), 1);
        }
    }

    #[test]
    fn short_spec_table_falls_back_to_first_entry() {
        let mut c = mount(4, 2);
        c.go_to(3);
        assert_eq!(c.current_index(), 3);
        assert_eq!(panel_lines(&c), vec!["Nosivost 0", "Doseg 0"]);
    }

    #[test]
    fn empty_spec_table_leaves_panel_untouched() {
        let mut panel = RecordingSink::new();
        panel.lines = vec!["server-rendered".to_string()];
        let mut c: TestCarousel = Carousel::mount(Mount {
            track: Some(RecordingSink::with_slides(2)),
            panel: Some(panel),
            indicators: Some(RecordingSink::new()),
            specs: SpecTable::default(),
            swipe_threshold: SWIPE_THRESHOLD,
        });
        c.next();
        c.go_to(-1);

        let panel = c.panel().unwrap();
        assert!(
            !panel
                .operations
                .iter()
                .any(|op| matches!(op, RecordedOp::ReplaceLines(_)))
        );
        assert_eq!(panel.lines, vec!["server-rendered"]);
        assert_eq!(c.current_index(), 1);
        assert_eq!(active_dots(&c), vec![1]);
    }

    #[test]
    fn carousel_without_panel_or_dots_still_moves() {
        let mut c: Carousel<RecordingSink, Detached, Detached> = Carousel::mount(Mount {
            track: Some(RecordingSink::with_slides(3)),
            ..Mount::new(specs(3))
        });
        c.next();
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.track().unwrap().offset, Some(1));
    }

    // =========================================================================
    // Relative and absolute motion
    // =========================================================================

    #[test]
    fn previous_from_first_wraps_to_last() {
        let mut c = mount(3, 3);
        c.previous();
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn next_from_last_wraps_to_first() {
        let mut c = mount(3, 3);
        c.go_to(2);
        c.next();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn indicator_jumps_directly() {
        let mut c = mount(4, 4);
        let before = c.track().unwrap().operations.len();
        c.activate_indicator(3);
        assert_eq!(c.current_index(), 3);
        // One direct move, not three steps
        let track = c.track().unwrap();
        assert_eq!(track.operations.len(), before + 1);
        assert_eq!(track.operations.last(), Some(&RecordedOp::ShowSlide(3)));
    }

    #[test]
    fn indicator_beyond_slides_is_ignored() {
        let mut c = mount(2, 2);
        c.activate_indicator(5);
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn single_slide_always_stays_put() {
        let mut c = mount(1, 1);
        c.next();
        assert_eq!(c.current_index(), 0);
        c.previous();
        assert_eq!(c.current_index(), 0);
    }

    // =========================================================================
    // Swipe
    // =========================================================================

    #[test]
    fn swipe_of_49_does_not_navigate() {
        let mut c = mount(3, 3);
        let before = c.track().unwrap().operations.len();
        c.touch_start(200.0);
        c.touch_move(151.0);
        c.touch_end();
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.track().unwrap().operations.len(), before);
    }

    #[test]
    fn leftward_swipe_of_51_moves_next_once() {
        let mut c = mount(3, 3);
        let before = c.track().unwrap().operations.len();
        c.touch_start(200.0);
        c.touch_move(180.0);
        c.touch_move(149.0);
        c.touch_end();
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.track().unwrap().operations.len(), before + 1);
    }

    #[test]
    fn rightward_swipe_moves_previous() {
        let mut c = mount(3, 3);
        c.touch_start(100.0);
        c.touch_move(200.0);
        c.touch_end();
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn stray_end_is_ignored() {
        let mut c = mount(3, 3);
        c.touch_end();
        c.touch_move(-400.0);
        c.touch_end();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn second_end_after_swipe_does_not_repeat() {
        let mut c = mount(3, 3);
        c.touch_start(300.0);
        c.touch_move(100.0);
        c.touch_end();
        c.touch_end();
        assert_eq!(c.current_index(), 1);
        assert!(!c.gesture().is_dragging());
    }

    #[test]
    fn cancelled_touch_leaves_no_stale_delta() {
        let mut c = mount(3, 3);
        c.touch_start(300.0);
        c.touch_move(0.0);
        c.touch_cancel();
        c.touch_end();
        assert_eq!(c.current_index(), 0);

        // Next gesture starts clean: a tap must not reuse the old delta
        c.touch_start(10.0);
        c.touch_end();
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn configured_threshold_applies_to_swipes() {
        let mut c: TestCarousel = Carousel::mount(Mount {
            track: Some(RecordingSink::with_slides(3)),
            panel: None,
            indicators: None,
            specs: specs(3),
            swipe_threshold: 120.0,
        });
        c.touch_start(200.0);
        c.touch_move(100.0);
        c.touch_end();
        assert_eq!(c.current_index(), 0);

        c.touch_start(200.0);
        c.touch_move(79.0);
        c.touch_end();
        assert_eq!(c.current_index(), 1);
    }

    #[test]
    fn independent_instances_do_not_share_state() {
        let mut a = mount(3, 3);
        let mut b = mount(3, 3);
        a.next();
        b.previous();
        a.touch_start(0.0);
        assert_eq!(a.current_index(), 1);
        assert_eq!(b.current_index(), 2);
        assert!(a.gesture().is_dragging());
        assert!(!b.gesture().is_dragging());
    }
}
