//! Page chrome: mobile menu, in-page anchors, Escape handling, footer year.
//!
//! [`Page`] bundles the two overlays with the scroll lock they share so the
//! global Escape key can arbitrate between them: an open lightbox is closed
//! first, otherwise the mobile menu.

use crate::lightbox::Lightbox;
use crate::scroll::ScrollLock;
use chrono::Datelike;

/// Mobile navigation drawer toggled by the burger button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    attached: bool,
    open: bool,
}

impl MobileMenu {
    /// A menu with both the burger button and the drawer present.
    pub fn attached() -> Self {
        Self {
            attached: true,
            open: false,
        }
    }

    /// A page missing the burger or the drawer. Every operation is a no-op.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_open(&mut self, open: bool, scroll: &mut ScrollLock) {
        if !self.attached {
            return;
        }
        self.open = open;
        scroll.set(open);
    }

    pub fn toggle(&mut self, scroll: &mut ScrollLock) {
        self.set_open(!self.open, scroll);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Value of the burger's `aria-expanded` attribute.
    pub fn aria_expanded(&self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}

/// What a press of Escape did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeAction {
    ClosedLightbox,
    ClosedMenu,
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    pub menu: MobileMenu,
    pub lightbox: Lightbox,
    pub scroll: ScrollLock,
}

impl Page {
    pub fn new(menu: MobileMenu, lightbox: Lightbox) -> Self {
        Self {
            menu,
            lightbox,
            scroll: ScrollLock::new(),
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle(&mut self.scroll);
    }

    /// Close the menu, e.g. after one of its links was followed.
    pub fn close_menu(&mut self) {
        self.menu.set_open(false, &mut self.scroll);
    }

    pub fn open_lightbox(&mut self, src: &str, alt: Option<&str>) {
        self.lightbox.open(src, alt, &mut self.scroll);
    }

    pub fn close_lightbox(&mut self) {
        self.lightbox.close(&mut self.scroll);
    }

    /// Handle a global key press by its `KeyboardEvent.key` name.
    pub fn handle_key(&mut self, key: &str) -> EscapeAction {
        if key != "Escape" {
            return EscapeAction::Ignored;
        }
        if self.lightbox.is_open() {
            self.close_lightbox();
            return EscapeAction::ClosedLightbox;
        }
        self.close_menu();
        EscapeAction::ClosedMenu
    }
}

/// Resolve an in-page link to the id it should smoothly scroll to.
///
/// Only `#fragment` links whose target exists qualify; anything else is
/// left for the browser to follow normally.
pub fn scroll_target<'a>(href: Option<&'a str>, exists: impl Fn(&str) -> bool) -> Option<&'a str> {
    let id = href?.strip_prefix('#')?;
    if id.is_empty() || !exists(id) {
        return None;
    }
    Some(id)
}

/// Calendar year shown in the footer.
pub fn footer_year<D: Datelike>(today: &D) -> i32 {
    today.year()
}

pub fn current_year() -> i32 {
    footer_year(&chrono::Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn page() -> Page {
        Page::new(MobileMenu::attached(), Lightbox::attached())
    }

    // =========================================================================
    // Mobile menu
    // =========================================================================

    #[test]
    fn toggle_opens_and_locks_scroll() {
        let mut p = page();
        p.toggle_menu();
        assert!(p.menu.is_open());
        assert_eq!(p.menu.aria_expanded(), "true");
        assert!(p.scroll.is_locked());
    }

    #[test]
    fn toggle_twice_closes() {
        let mut p = page();
        p.toggle_menu();
        p.toggle_menu();
        assert!(!p.menu.is_open());
        assert_eq!(p.menu.aria_expanded(), "false");
        assert!(!p.scroll.is_locked());
    }

    #[test]
    fn menu_link_closes_menu() {
        let mut p = page();
        p.toggle_menu();
        p.close_menu();
        assert!(!p.menu.is_open());
    }

    #[test]
    fn detached_menu_ignores_toggle() {
        let mut p = Page::new(MobileMenu::detached(), Lightbox::attached());
        p.toggle_menu();
        assert!(!p.menu.is_open());
        assert!(!p.scroll.is_locked());
    }

    // =========================================================================
    // Escape arbitration
    // =========================================================================

    #[test]
    fn escape_closes_lightbox_before_menu() {
        let mut p = page();
        p.toggle_menu();
        p.open_lightbox("/a.jpg", Some("a"));

        assert_eq!(p.handle_key("Escape"), EscapeAction::ClosedLightbox);
        assert!(!p.lightbox.is_open());
        assert!(p.menu.is_open());

        assert_eq!(p.handle_key("Escape"), EscapeAction::ClosedMenu);
        assert!(!p.menu.is_open());
    }

    #[test]
    fn escape_with_nothing_open_closes_menu_harmlessly() {
        let mut p = page();
        assert_eq!(p.handle_key("Escape"), EscapeAction::ClosedMenu);
        assert!(!p.scroll.is_locked());
    }

    #[test]
    fn other_keys_are_ignored() {
        let mut p = page();
        p.open_lightbox("/a.jpg", None);
        assert_eq!(p.handle_key("Enter"), EscapeAction::Ignored);
        assert!(p.lightbox.is_open());
    }

    #[test]
    fn closing_lightbox_releases_lock_even_with_menu_open() {
        let mut p = page();
        p.toggle_menu();
        p.open_lightbox("/a.jpg", None);
        p.close_lightbox();
        assert!(p.menu.is_open());
        assert!(!p.scroll.is_locked());
    }

    // =========================================================================
    // Anchors and footer
    // =========================================================================

    #[test]
    fn scroll_target_resolves_existing_fragment() {
        let ids = ["oprema", "kontakt"];
        let exists = |id: &str| ids.contains(&id);
        assert_eq!(scroll_target(Some("#oprema"), exists), Some("oprema"));
    }

    #[test]
    fn scroll_target_rejects_non_fragments_and_missing_targets() {
        let exists = |id: &str| id == "oprema";
        assert_eq!(scroll_target(None, exists), None);
        assert_eq!(scroll_target(Some("/o-nama"), exists), None);
        assert_eq!(scroll_target(Some("https://x.hr/#oprema"), exists), None);
        assert_eq!(scroll_target(Some("#"), exists), None);
        assert_eq!(scroll_target(Some("#nema"), exists), None);
    }

    #[test]
    fn footer_year_uses_calendar_year() {
        let day = NaiveDate::from_ymd_opt(2031, 12, 31).unwrap();
        assert_eq!(footer_year(&day), 2031);
    }
}
