//! HTML landing page generation.
//!
//! Renders the whole site, a single page, from the [`SiteConfig`]:
//!
//! ```text
//! dist/
//! ├── index.html                 # Landing page
//! ├── style.3f9a0c1d2e.css       # Colors + base styles, content-fingerprinted
//! ├── img/...                    # Copied from assets/
//! └── pkg/...                    # Client module, if shipped in assets/
//! ```
//!
//! ## Page Sections
//!
//! - **Header**: brand, anchor nav (`data-scroll`), theme toggle, burger
//! - **Mobile menu**: hidden drawer whose links close it (`data-close`)
//! - **Hero + stats**: counters carry `data-count` / `data-suffix`
//! - **Equipment**: the carousel and its spec panel
//! - **Projects**: lightbox gallery (`data-lightbox`)
//! - **Sections**: optional markdown blocks from config
//! - **Contact**: the lead form, addressed through `data-recipient`
//! - **Lightbox + footer**
//!
//! ## Pre-rendered Carousel
//!
//! The carousel's first frame (track offset, dots, spec list) is produced by
//! mounting the real [`Carousel`] against markup sinks. The page is therefore
//! complete without scripts, and the client starts from exactly the state
//! the controller would have drawn itself.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating
//! with automatic escaping. Markdown sections go through `pulldown-cmark`.

use crate::carousel::{
    Carousel, Indicators, Mount, SlideTrack, SpecPanel, SpecTable, dot_label, translate_x,
};
use crate::config::{self, Equipment, SiteConfig};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// What a build wrote, for CLI reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub page: String,
    pub stylesheet: String,
    pub slides: usize,
    pub spec_sets: usize,
    pub stats: usize,
    pub projects: usize,
    pub sections: usize,
    pub assets_copied: usize,
    pub script: Option<String>,
}

/// Build the site into `output_dir`.
///
/// `source_dir` is the directory holding `config.toml`; its `assets/`
/// subdirectory, if any, is copied to the output root.
pub fn generate(
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
    year: i32,
) -> Result<GenerateSummary, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let assets_copied = copy_assets(&source_dir.join("assets"), output_dir)?;

    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );
    let stylesheet = fingerprinted_name("style", "css", &css);
    fs::write(output_dir.join(&stylesheet), &css)?;
    tracing::debug!(file = %stylesheet, "wrote stylesheet");

    let page = render_landing(config, &stylesheet, year)?;
    fs::write(output_dir.join("index.html"), page.into_string())?;
    tracing::debug!(dir = %output_dir.display(), "wrote index.html");

    Ok(GenerateSummary {
        page: "index.html".to_string(),
        stylesheet,
        slides: config.equipment.len(),
        spec_sets: config.carousel.specs.len(),
        stats: config.stats.len(),
        projects: config.projects.len(),
        sections: config.sections.len(),
        assets_copied,
        script: config.output.script_path().map(str::to_string),
    })
}

/// `{stem}.{first 10 hex chars of sha256}.{ext}`
fn fingerprinted_name(stem: &str, ext: &str, content: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(content.as_bytes()));
    format!("{stem}.{}.{ext}", &digest[..10])
}

/// Copy everything under `src` into `dst`, keeping relative paths.
///
/// A missing `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    tracing::debug!(count = copied, from = %src.display(), "copied assets");
    Ok(copied)
}

// ============================================================================
// Carousel markup sinks
// ============================================================================

/// Slide track rendered as a strip of lightbox links.
#[derive(Debug)]
pub struct MarkupTrack<'a> {
    slides: &'a [Equipment],
    shown: usize,
}

impl<'a> MarkupTrack<'a> {
    pub fn new(slides: &'a [Equipment]) -> Self {
        Self { slides, shown: 0 }
    }

    pub fn render(&self) -> Markup {
        html! {
            div.carousel__track #carouselTrack style={ "transform: " (translate_x(self.shown)) ";" } {
                @for (idx, slide) in self.slides.iter().enumerate() {
                    a.carousel__slide href=(slide.image) data-lightbox {
                        img src=(slide.image) alt=(slide.alt) loading=[(idx != self.shown).then_some("lazy")];
                    }
                }
            }
        }
    }
}

impl SlideTrack for MarkupTrack<'_> {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn show_slide(&mut self, index: usize) {
        self.shown = index;
    }
}

/// Spec list rendered as `<ul id="specList">`.
#[derive(Debug, Default)]
pub struct MarkupPanel {
    lines: Vec<String>,
}

impl MarkupPanel {
    pub fn render(&self) -> Markup {
        html! {
            ul #specList {
                @for line in &self.lines {
                    li { (line) }
                }
            }
        }
    }
}

impl SpecPanel for MarkupPanel {
    fn replace_lines(&mut self, lines: &[String]) {
        self.lines = lines.to_vec();
    }
}

/// Dot row rendered as buttons inside `#carouselDots`.
#[derive(Debug, Default)]
pub struct MarkupDots {
    dots: Vec<bool>,
}

impl MarkupDots {
    pub fn render(&self) -> Markup {
        html! {
            div.carousel__dots #carouselDots {
                @for (idx, active) in self.dots.iter().enumerate() {
                    button.carousel__dot.is-active[*active]
                        type="button"
                        aria-label=(dot_label(idx))
                        aria-current=(if *active { "true" } else { "false" })
                        data-index=(idx) {}
                }
            }
        }
    }
}

impl Indicators for MarkupDots {
    fn rebuild(&mut self, count: usize) {
        self.dots = vec![false; count];
    }

    fn set_active(&mut self, position: usize, active: bool) {
        if let Some(dot) = self.dots.get_mut(position) {
            *dot = active;
        }
    }
}

type MarkupCarousel<'a> = Carousel<MarkupTrack<'a>, MarkupPanel, MarkupDots>;

/// Mount the carousel against markup sinks to get its first frame.
fn prerender_carousel<'a>(slides: &'a [Equipment], specs: SpecTable, swipe_threshold: f64) -> MarkupCarousel<'a> {
    Carousel::mount(Mount {
        track: Some(MarkupTrack::new(slides)),
        panel: Some(MarkupPanel::default()),
        indicators: Some(MarkupDots::default()),
        specs,
        swipe_threshold,
    })
}

/// Spec table as JSON, safe to embed in a `<script>` element.
fn spec_table_json(specs: &SpecTable) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(specs)?.replace("</", "<\\/"))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Anchor links shared by the header nav and the mobile menu.
fn nav_links(config: &SiteConfig) -> Vec<(String, String)> {
    let mut links = vec![
        ("#oprema".to_string(), "Oprema".to_string()),
        ("#projekti".to_string(), "Projekti".to_string()),
    ];
    links.extend(
        config
            .sections
            .iter()
            .map(|s| (format!("#{}", s.id), s.title.clone())),
    );
    links.push(("#kontakt".to_string(), "Kontakt".to_string()));
    links
}

fn base_document(config: &SiteConfig, stylesheet: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.lang)
            data-theme-key=(config.theme.storage_key)
            data-theme-default=(config.theme.default.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (config.site.name) " | " (config.site.tagline) }
                meta name="description" content=(config.site.tagline);
                link rel="stylesheet" href=(stylesheet);
                @if let Some(script) = config.output.script_path() {
                    script type="module" {
                        (PreEscaped(format!(
                            "import init from \"./{}\";\ninit();",
                            script.trim_start_matches("./")
                        )))
                    }
                }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(config: &SiteConfig, links: &[(String, String)]) -> Markup {
    html! {
        header.site-header {
            div.container.site-header__inner {
                a.brand href="#top" data-scroll { (config.site.name) }
                nav.site-nav aria-label="Glavni izbornik" {
                    @for (href, label) in links {
                        a href=(href) data-scroll { (label) }
                    }
                }
                button.theme-toggle #themeToggle type="button" aria-label="Promijeni temu" { "◐" }
                button.burger #burger type="button" aria-label="Izbornik"
                    aria-expanded="false" aria-controls="mobile" {
                    span {}
                    span {}
                    span {}
                }
            }
        }
        nav.mobile-menu #mobile hidden {
            @for (href, label) in links {
                a href=(href) data-scroll data-close { (label) }
            }
        }
    }
}

fn hero(config: &SiteConfig) -> Markup {
    let tel: String = config
        .site
        .phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    html! {
        section.hero {
            div.container {
                h1 { (config.site.name) }
                p { (config.site.tagline) }
                div.hero__actions {
                    a.btn href="#kontakt" data-scroll { "Zatraži ponudu" }
                    a.btn.btn--ghost href={ "tel:" (tel) } { (config.site.phone) }
                }
            }
        }
    }
}

fn stats(config: &SiteConfig) -> Markup {
    html! {
        @if !config.stats.is_empty() {
            div.container.stats
                data-duration=(config.counter.duration_ms)
                data-threshold=(config.counter.visibility_threshold) {
                @for stat in &config.stats {
                    div.stat {
                        span.stat__value data-count=(stat.value) data-suffix=(stat.suffix) {
                            "0" (stat.suffix)
                        }
                        span.stat__label { (stat.label) }
                    }
                }
            }
        }
    }
}

fn equipment(config: &SiteConfig) -> Result<Markup, GenerateError> {
    let specs = config.spec_table();
    let specs_json = spec_table_json(&specs)?;
    let carousel = prerender_carousel(
        &config.equipment,
        specs,
        config.carousel.swipe_threshold,
    );

    Ok(html! {
        section #oprema {
            div.container {
                h2 { "Oprema" }
                div.equipment {
                    div.carousel #equipmentCarousel
                        data-swipe-threshold=(config.carousel.swipe_threshold) {
                        div.carousel__viewport {
                            @if let Some(track) = carousel.track() {
                                (track.render())
                            }
                        }
                        @if carousel.slide_count() > 1 {
                            button.carousel__nav.carousel__nav--prev #carouselPrev
                                type="button" aria-label="Prethodna" { "‹" }
                            button.carousel__nav.carousel__nav--next #carouselNext
                                type="button" aria-label="Sljedeća" { "›" }
                        }
                        @if let Some(dots) = carousel.indicators() {
                            (dots.render())
                        }
                    }
                    aside.specs {
                        h3 { "Specifikacije" }
                        @if let Some(panel) = carousel.panel() {
                            (panel.render())
                        }
                    }
                }
                script type="application/json" #equipmentData { (PreEscaped(specs_json)) }
            }
        }
    })
}

fn projects(config: &SiteConfig) -> Markup {
    html! {
        @if !config.projects.is_empty() {
            section #projekti {
                div.container {
                    h2 { "Projekti" }
                    div.gallery {
                        @for project in &config.projects {
                            a.gallery__item href=(project.image) data-lightbox {
                                img src=(project.image) alt=(project.alt) loading="lazy";
                            }
                        }
                    }
                }
            }
        }
    }
}

fn markdown_sections(config: &SiteConfig) -> Markup {
    html! {
        @for section in &config.sections {
            section id=(section.id) {
                div.container {
                    h2 { (section.title) }
                    div.prose { (PreEscaped(markdown_to_html(&section.body))) }
                }
            }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

fn contact(config: &SiteConfig) -> Markup {
    html! {
        section #kontakt {
            div.container {
                h2 { "Kontakt" }
                p { "Opišite posao i javit ćemo vam se s ponudom." }
                form.lead-form #leadForm novalidate
                    data-recipient=(config.lead.recipient)
                    data-subject=(config.lead.subject) {
                    label { "Ime i prezime" input type="text" name="name" autocomplete="name"; }
                    label { "Telefon" input type="tel" name="phone" autocomplete="tel"; }
                    label { "Lokacija" input type="text" name="location"; }
                    label { "Opis posla" textarea name="message" rows="5" {} }
                    button.btn type="submit" { "Pošalji upit" }
                }
            }
        }
    }
}

fn lightbox() -> Markup {
    html! {
        div.lightbox #lightbox hidden role="dialog" aria-modal="true" {
            button.lightbox__close #lightboxClose type="button" aria-label="Zatvori" { "×" }
            img #lightboxImg src="" alt="";
        }
    }
}

fn footer(config: &SiteConfig, year: i32) -> Markup {
    html! {
        footer.site-footer {
            div.container {
                "© " span #year { (year) } " " (config.site.name)
                " · " a href={ "mailto:" (config.site.email) } { (config.site.email) }
                " · " (config.site.phone)
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Render the complete landing page.
pub fn render_landing(
    config: &SiteConfig,
    stylesheet: &str,
    year: i32,
) -> Result<Markup, GenerateError> {
    let links = nav_links(config);
    let equipment = equipment(config)?;

    let content = html! {
        (site_header(config, &links))
        main #top {
            (hero(config))
            (stats(config))
            (equipment)
            (projects(config))
            (markdown_sections(config))
            (contact(config))
        }
        (lightbox())
        (footer(config, year))
    };

    Ok(base_document(config, stylesheet, content))
}

// ============================================================================
// Tests
// ============================================================================
