//! Browser bindings.
//!
//! Wires the page models to the DOM rendered by [`generate`](crate::generate).
//! Elements are found by id (`carouselTrack`, `burger`, `lightbox`, ...) and
//! by data attribute (`data-scroll`, `data-close`, `data-lightbox`,
//! `data-count`). Any element that is missing leaves its feature inert.
//!
//! Compiled only with the `web` feature:
//!
//! ```text
//! wasm-pack build --target web -- --features web
//! ```

use crate::carousel::{
    Carousel, Indicators, Mount, SWIPE_THRESHOLD, SlideTrack, SpecPanel, SpecTable, dot_label,
    translate_x,
};
use crate::chrome::{self, EscapeAction, MobileMenu, Page};
use crate::config::LeadConfig;
use crate::counter::{Counter, DEFAULT_DURATION, DEFAULT_VISIBILITY_THRESHOLD};
use crate::lead::{self, LeadForm, MISSING_FIELDS_ALERT};
use crate::lightbox::{ClickTarget, Lightbox};
use crate::theme::{PreferenceStore, STORAGE_KEY, StoreError, Theme, ThemePreference};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, FormData, HtmlElement,
    HtmlFormElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Node, NodeList, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Storage, TouchEvent, Window,
};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Some(document) = window.document() else {
        return Ok(());
    };

    if let Some(year) = document.get_element_by_id("year") {
        year.set_text_content(Some(&chrome::current_year().to_string()));
    }

    bind_theme(&window, &document)?;
    bind_scroll_links(&document)?;
    bind_page(&window, &document)?;
    bind_carousel(&document)?;
    bind_counters(&window, &document)?;
    bind_lead_form(&window, &document)?;
    Ok(())
}

// ============================================================================
// DOM helpers
// ============================================================================

fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

fn elements(list: NodeList) -> impl Iterator<Item = Element> {
    (0..list.length()).filter_map(move |i| list.item(i)?.dyn_into::<Element>().ok())
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_passive(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn first_touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn parse_threshold(raw: Option<String>, fallback: f64) -> f64 {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|t| t.is_finite() && *t > 0.0)
        .unwrap_or(fallback)
}

fn parse_duration(raw: Option<String>) -> Duration {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map_or(DEFAULT_DURATION, Duration::from_millis)
}

// ============================================================================
// Theme
// ============================================================================

/// `localStorage`, when the browser allows it.
struct LocalStorageStore {
    storage: Option<Storage>,
}

fn unavailable(err: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{err:?}"))
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(unavailable),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(unavailable),
            None => Err(StoreError::Unavailable("localStorage".to_string())),
        }
    }
}

fn bind_theme(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(root) = document.document_element() else {
        return Ok(());
    };
    let key = root
        .get_attribute("data-theme-key")
        .unwrap_or_else(|| STORAGE_KEY.to_string());
    let fallback = root
        .get_attribute("data-theme-default")
        .and_then(|v| v.parse::<Theme>().ok())
        .unwrap_or_default();
    let store = LocalStorageStore {
        storage: window.local_storage().ok().flatten(),
    };
    let pref = ThemePreference::new(store, key, fallback);

    let system_dark = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches());
    let theme = pref.resolve(system_dark).unwrap_or(fallback);
    root.set_attribute("data-theme", theme.as_str())?;

    let Some(toggle) = document.get_element_by_id("themeToggle") else {
        return Ok(());
    };
    let state = Rc::new(RefCell::new((pref, theme)));
    listen(&toggle, "click", move |_| {
        let mut guard = state.borrow_mut();
        let (pref, current) = &mut *guard;
        // Flip the page even when storage refuses the write.
        let next = pref.toggle(*current).unwrap_or_else(|_| current.toggled());
        *current = next;
        let _ = root.set_attribute("data-theme", next.as_str());
    })
}

// ============================================================================
// Anchors, menu, lightbox
// ============================================================================

fn bind_scroll_links(document: &Document) -> Result<(), JsValue> {
    for link in elements(document.query_selector_all("[data-scroll]")?) {
        let doc = document.clone();
        let href_source = link.clone();
        listen(&link, "click", move |event| {
            let href = href_source.get_attribute("href");
            let target = chrome::scroll_target(href.as_deref(), |id| {
                doc.get_element_by_id(id).is_some()
            });
            let Some(element) = target.and_then(|id| doc.get_element_by_id(id)) else {
                return;
            };
            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        })?;
    }
    Ok(())
}

/// Elements that mirror [`Page`] state.
struct PageView {
    root: Option<HtmlElement>,
    burger: Option<Element>,
    mobile: Option<HtmlElement>,
    lightbox: Option<HtmlElement>,
    image: Option<HtmlImageElement>,
}

impl PageView {
    fn render(&self, page: &Page) {
        if let (Some(burger), Some(mobile)) = (&self.burger, &self.mobile) {
            let _ = burger.set_attribute("aria-expanded", page.menu.aria_expanded());
            mobile.set_hidden(!page.menu.is_open());
        }
        if let (Some(lightbox), Some(image)) = (&self.lightbox, &self.image) {
            let (src, alt) = page.lightbox.image_attrs();
            image.set_src(src);
            image.set_alt(alt);
            lightbox.set_hidden(!page.lightbox.is_open());
        }
        if let Some(root) = &self.root {
            let _ = root.style().set_property("overflow", page.scroll.overflow());
        }
    }
}

fn bind_page(window: &Window, document: &Document) -> Result<(), JsValue> {
    let view = PageView {
        root: document
            .document_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        burger: document.get_element_by_id("burger"),
        mobile: by_id(document, "mobile"),
        lightbox: by_id(document, "lightbox"),
        image: by_id(document, "lightboxImg"),
    };
    let menu = if view.burger.is_some() && view.mobile.is_some() {
        MobileMenu::attached()
    } else {
        MobileMenu::detached()
    };
    let lightbox = if view.lightbox.is_some() && view.image.is_some() {
        Lightbox::attached()
    } else {
        Lightbox::detached()
    };
    let page = Rc::new(RefCell::new(Page::new(menu, lightbox)));
    let view = Rc::new(view);

    if let (Some(burger), Some(mobile)) = (&view.burger, &view.mobile) {
        let (p, v) = (page.clone(), view.clone());
        listen(burger, "click", move |_| {
            p.borrow_mut().toggle_menu();
            v.render(&p.borrow());
        })?;
        for link in elements(mobile.query_selector_all("[data-close]")?) {
            let (p, v) = (page.clone(), view.clone());
            listen(&link, "click", move |_| {
                p.borrow_mut().close_menu();
                v.render(&p.borrow());
            })?;
        }
    }

    for link in elements(document.query_selector_all("[data-lightbox]")?) {
        let (p, v) = (page.clone(), view.clone());
        let anchor = link.clone();
        listen(&link, "click", move |event| {
            event.prevent_default();
            let Some(src) = anchor.get_attribute("href") else {
                return;
            };
            let alt = anchor
                .query_selector("img")
                .ok()
                .flatten()
                .and_then(|img| img.get_attribute("alt"));
            p.borrow_mut().open_lightbox(&src, alt.as_deref());
            v.render(&p.borrow());
        })?;
    }

    if let Some(close) = document.get_element_by_id("lightboxClose") {
        let (p, v) = (page.clone(), view.clone());
        listen(&close, "click", move |_| {
            p.borrow_mut().close_lightbox();
            v.render(&p.borrow());
        })?;
    }

    if let Some(overlay) = &view.lightbox {
        let (p, v) = (page.clone(), view.clone());
        let backdrop = overlay.clone();
        listen(overlay, "click", move |event| {
            let on_backdrop = event
                .target()
                .and_then(|t| t.dyn_into::<Node>().ok())
                .is_some_and(|node| node.is_same_node(Some(&backdrop)));
            let target = if on_backdrop {
                ClickTarget::Backdrop
            } else {
                ClickTarget::Content
            };
            {
                let mut guard = p.borrow_mut();
                let page = &mut *guard;
                page.lightbox.click(target, &mut page.scroll);
            }
            v.render(&p.borrow());
        })?;
    }

    listen(window, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        let action = page.borrow_mut().handle_key(&key);
        if action != EscapeAction::Ignored {
            view.render(&page.borrow());
        }
    })
}

// ============================================================================
// Carousel
// ============================================================================

struct DomTrack {
    track: HtmlElement,
}

impl SlideTrack for DomTrack {
    fn slide_count(&self) -> usize {
        self.track.children().length() as usize
    }

    fn show_slide(&mut self, index: usize) {
        let _ = self
            .track
            .style()
            .set_property("transform", &translate_x(index));
    }
}

struct DomPanel {
    document: Document,
    list: Element,
}

impl SpecPanel for DomPanel {
    fn replace_lines(&mut self, lines: &[String]) {
        self.list.set_text_content(None);
        for line in lines {
            if let Ok(item) = self.document.create_element("li") {
                item.set_text_content(Some(line));
                let _ = self.list.append_child(&item);
            }
        }
    }
}

struct DomDots {
    document: Document,
    wrap: Element,
}

impl DomDots {
    fn dot(&self, position: usize) -> Result<Element, JsValue> {
        let dot = self.document.create_element("button")?;
        dot.set_class_name("carousel__dot");
        dot.set_attribute("type", "button")?;
        dot.set_attribute("aria-label", &dot_label(position))?;
        dot.set_attribute("data-index", &position.to_string())?;
        Ok(dot)
    }
}

impl Indicators for DomDots {
    fn rebuild(&mut self, count: usize) {
        self.wrap.set_text_content(None);
        for position in 0..count {
            if let Ok(dot) = self.dot(position) {
                let _ = self.wrap.append_child(&dot);
            }
        }
    }

    fn set_active(&mut self, position: usize, active: bool) {
        let Some(dot) = self.wrap.children().item(position as u32) else {
            return;
        };
        let _ = dot.class_list().toggle_with_force("is-active", active);
        let _ = dot.set_attribute("aria-current", if active { "true" } else { "false" });
    }
}

type DomCarousel = Carousel<DomTrack, DomPanel, DomDots>;

fn bind_carousel(document: &Document) -> Result<(), JsValue> {
    let specs: SpecTable = document
        .get_element_by_id("equipmentData")
        .and_then(|el| el.text_content())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default();
    let root = document.get_element_by_id("equipmentCarousel");
    let swipe_threshold = parse_threshold(
        root.as_ref()
            .and_then(|el| el.get_attribute("data-swipe-threshold")),
        SWIPE_THRESHOLD,
    );

    let carousel: Rc<RefCell<DomCarousel>> = Rc::new(RefCell::new(Carousel::mount(Mount {
        track: by_id(document, "carouselTrack").map(|track| DomTrack { track }),
        panel: document.get_element_by_id("specList").map(|list| DomPanel {
            document: document.clone(),
            list,
        }),
        indicators: document.get_element_by_id("carouselDots").map(|wrap| DomDots {
            document: document.clone(),
            wrap,
        }),
        specs,
        swipe_threshold,
    })));

    if let Some(prev) = document.get_element_by_id("carouselPrev") {
        let c = carousel.clone();
        listen(&prev, "click", move |_| c.borrow_mut().previous())?;
    }
    if let Some(next) = document.get_element_by_id("carouselNext") {
        let c = carousel.clone();
        listen(&next, "click", move |_| c.borrow_mut().next())?;
    }
    if let Some(dots) = document.get_element_by_id("carouselDots") {
        let c = carousel.clone();
        listen(&dots, "click", move |event| {
            let position = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".carousel__dot").ok().flatten())
                .and_then(|dot| dot.get_attribute("data-index"))
                .and_then(|v| v.parse::<usize>().ok());
            if let Some(position) = position {
                c.borrow_mut().activate_indicator(position);
            }
        })?;
    }

    let Some(root) = root else {
        return Ok(());
    };
    let c = carousel.clone();
    listen_passive(&root, "touchstart", move |event| {
        if let Some(x) = first_touch_x(&event) {
            c.borrow_mut().touch_start(x);
        }
    })?;
    let c = carousel.clone();
    listen_passive(&root, "touchmove", move |event| {
        if let Some(x) = first_touch_x(&event) {
            c.borrow_mut().touch_move(x);
        }
    })?;
    let c = carousel.clone();
    listen_passive(&root, "touchend", move |_| c.borrow_mut().touch_end())?;
    listen_passive(&root, "touchcancel", move |_| {
        carousel.borrow_mut().touch_cancel()
    })
}

// ============================================================================
// Counters
// ============================================================================

fn animate(window: Window, element: Element, counter: Rc<RefCell<Counter>>) -> Result<(), JsValue> {
    let started = js_sys::Date::now();
    let frame: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = frame.clone();
    let win = window.clone();

    *handle.borrow_mut() = Some(Closure::new(move || {
        let elapsed = Duration::from_secs_f64((js_sys::Date::now() - started).max(0.0) / 1000.0);
        let done = {
            let mut counter = counter.borrow_mut();
            element.set_text_content(Some(&counter.tick(elapsed)));
            counter.is_done()
        };
        if done {
            let _ = frame.borrow_mut().take();
            return;
        }
        if let Some(next) = frame.borrow().as_ref() {
            let _ = win.request_animation_frame(next.as_ref().unchecked_ref());
        }
    }));

    if let Some(first) = handle.borrow().as_ref() {
        window.request_animation_frame(first.as_ref().unchecked_ref())?;
    }
    Ok(())
}

fn bind_counters(window: &Window, document: &Document) -> Result<(), JsValue> {
    let strip = document.query_selector(".stats")?;
    let duration = parse_duration(strip.as_ref().and_then(|el| el.get_attribute("data-duration")));
    let threshold = parse_threshold(
        strip.as_ref().and_then(|el| el.get_attribute("data-threshold")),
        DEFAULT_VISIBILITY_THRESHOLD,
    )
    .min(1.0);

    for element in elements(document.query_selector_all("[data-count]")?) {
        let Some(target) = element
            .get_attribute("data-count")
            .and_then(|v| v.trim().parse::<u64>().ok())
        else {
            continue;
        };
        let suffix = element.get_attribute("data-suffix").unwrap_or_default();
        let counter = Rc::new(RefCell::new(
            Counter::new(target, suffix)
                .with_duration(duration)
                .with_threshold(threshold),
        ));

        let (win, el, c) = (window.clone(), element.clone(), counter.clone());
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if c.borrow_mut().observe(entry.intersection_ratio()) {
                        observer.disconnect();
                        // No animation frame: show the final figure.
                        if animate(win.clone(), el.clone(), c.clone()).is_err() {
                            el.set_text_content(Some(&c.borrow_mut().finish()));
                        }
                        return;
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(&element);
                callback.forget();
            }
            // No observer support: show the final figure.
            Err(_) => {
                element.set_text_content(Some(&counter.borrow_mut().finish()));
            }
        }
    }
    Ok(())
}

// ============================================================================
// Lead form
// ============================================================================

fn bind_lead_form(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(form) = by_id::<HtmlFormElement>(document, "leadForm") else {
        return Ok(());
    };
    let defaults = LeadConfig::default();
    let recipient = form
        .get_attribute("data-recipient")
        .unwrap_or(defaults.recipient);
    let subject = form.get_attribute("data-subject").unwrap_or(defaults.subject);

    let (win, source) = (window.clone(), form.clone());
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let Ok(data) = FormData::new_with_form(&source) else {
            return;
        };
        let field = |name: &str| data.get(name).as_string().unwrap_or_default();
        let submitted = LeadForm {
            name: field("name"),
            phone: field("phone"),
            location: field("location"),
            message: field("message"),
        };
        match lead::mailto_link(&submitted, &recipient, &subject) {
            Ok(link) => {
                let _ = win.location().set_href(&link);
            }
            Err(_) => {
                let _ = win.alert_with_message(MISSING_FIELDS_ALERT);
            }
        }
    })
}
