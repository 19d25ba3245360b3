//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! describe a complete placeholder site; the user's `config.toml` overrides
//! any part of it.
//!
//! ## Config File Location
//!
//! ```text
//! site/
//! ├── config.toml     # Site config (overrides stock defaults)
//! └── assets/         # Copied verbatim to the output root (images, favicon)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! name = "Dubrovnik Dizalica"
//! tagline = "Najam dizalica i autodizalica s operaterom"
//! phone = "+385 00 000 0000"
//! email = "info@dubrovnikdizalica.com"
//! lang = "hr"
//!
//! [lead]
//! recipient = "info@dubrovnikdizalica.com"
//! subject = "Upit – najam dizalice"
//!
//! [carousel]
//! swipe_threshold = 50.0     # Horizontal travel needed for a swipe
//! specs = [["Nosivost: ..."], ["..."]]  # One list per equipment slide
//!
//! [theme]
//! default = "light"          # Used when nothing is stored and no OS preference
//! storage_key = "theme"
//!
//! [counter]
//! duration_ms = 1600
//! visibility_threshold = 0.4
//!
//! [colors.light] / [colors.dark]
//! background, surface, text, text_muted, accent, border
//!
//! [output]
//! script = "pkg/crane_landing.js"   # Client module; "" to ship no script
//!
//! [[equipment]]   image, alt
//! [[stats]]       label, value, suffix
//! [[projects]]    image, alt
//! [[sections]]    id, title, body (markdown)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: override just the values you want. Tables merge
//! key by key; arrays (`equipment`, `stats`, `carousel.specs`, ...) replace
//! the stock array as a whole. Unknown keys are rejected to catch typos early.

use crate::carousel::{SWIPE_THRESHOLD, SpecTable};
use crate::counter::{DEFAULT_DURATION, DEFAULT_VISIBILITY_THRESHOLD};
use crate::theme::{STORAGE_KEY, Theme};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Business identity shown in the header, hero and footer.
    pub site: SiteInfo,
    /// Where lead form submissions are addressed.
    pub lead: LeadConfig,
    /// Equipment carousel behaviour and spec lists.
    pub carousel: CarouselConfig,
    /// Theme preference defaults.
    pub theme: ThemeConfig,
    /// Statistics counter animation.
    pub counter: CounterConfig,
    /// Color schemes for light and dark themes.
    pub colors: ColorConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Equipment carousel slides, in display order.
    pub equipment: Vec<Equipment>,
    /// Numbers in the stats strip.
    pub stats: Vec<Stat>,
    /// Project gallery images.
    pub projects: Vec<Project>,
    /// Free-form markdown sections rendered between gallery and contact.
    pub sections: Vec<Section>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteInfo::default(),
            lead: LeadConfig::default(),
            carousel: CarouselConfig::default(),
            theme: ThemeConfig::default(),
            counter: CounterConfig::default(),
            colors: ColorConfig::default(),
            output: OutputConfig::default(),
            equipment: default_equipment(),
            stats: default_stats(),
            projects: default_projects(),
            sections: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let recipient = self.lead.recipient.trim();
        if recipient.is_empty() || !recipient.contains('@') {
            return Err(ConfigError::Validation(
                "lead.recipient must be an email address".into(),
            ));
        }
        let threshold = self.carousel.swipe_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold must be a positive number".into(),
            ));
        }
        let visibility = self.counter.visibility_threshold;
        if !(visibility > 0.0 && visibility <= 1.0) {
            return Err(ConfigError::Validation(
                "counter.visibility_threshold must be in (0, 1]".into(),
            ));
        }
        if self.counter.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "counter.duration_ms must be non-zero".into(),
            ));
        }
        if let Some(section) = self.sections.iter().find(|s| s.id.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "sections: '{}' needs a non-empty id",
                section.title
            )));
        }
        Ok(())
    }

    /// Problems worth reporting that do not stop a build.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let slides = self.equipment.len();
        let specs = self.carousel.specs.len();
        if slides > 0 && specs < slides {
            warnings.push(format!(
                "carousel.specs has {specs} entries for {slides} equipment slides; \
                 slides past the end show the first entry"
            ));
        }
        if specs > slides {
            warnings.push(format!(
                "carousel.specs has {} entries that no equipment slide uses",
                specs - slides
            ));
        }
        warnings
    }

    /// Spec lines per slide, in the shape the carousel consumes.
    pub fn spec_table(&self) -> SpecTable {
        SpecTable::new(self.carousel.specs.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    /// Value of `<html lang>`.
    pub lang: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Dubrovnik Dizalica".to_string(),
            tagline: "Najam dizalica i autodizalica s operaterom".to_string(),
            phone: "+385 00 000 0000".to_string(),
            email: "info@dubrovnikdizalica.com".to_string(),
            lang: "hr".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeadConfig {
    /// Address the `mailto:` link is sent to.
    pub recipient: String,
    /// Email subject line.
    pub subject: String,
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            recipient: "info@dubrovnikdizalica.com".to_string(),
            subject: "Upit – najam dizalice".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Horizontal travel a touch must exceed to count as a swipe.
    pub swipe_threshold: f64,
    /// Spec lines shown next to the carousel, one list per slide.
    pub specs: Vec<Vec<String>>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        let spec = |last: &str| {
            vec![
                "Nosivost: [upiši]".to_string(),
                "Doseg ruke: [upiši]".to_string(),
                "Radna visina: [upiši]".to_string(),
                format!("{last}: [upiši]"),
            ]
        };
        Self {
            swipe_threshold: SWIPE_THRESHOLD,
            specs: vec![
                spec("Dodatna oprema"),
                spec("Stabilizacija / pristup"),
                spec("Operater + plan podizanja"),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme when nothing is stored and the OS expresses no preference.
    pub default: Theme,
    /// Key the preference is stored under.
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Theme::Light,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    /// Milliseconds a counter takes to reach its value.
    pub duration_ms: u64,
    /// Share of a counter that must be visible before it starts.
    pub visibility_threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION.as_millis() as u64,
            visibility_threshold: DEFAULT_VISIBILITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Path of the client ES module, relative to the output root.
    /// Empty to publish the page without a script.
    pub script: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            script: "pkg/crane_landing.js".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn script_path(&self) -> Option<&str> {
        Some(self.script.trim()).filter(|s| !s.is_empty())
    }
}

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Equipment {
    /// Full-size image path, also opened in the lightbox.
    pub image: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub label: String,
    pub value: u64,
    #[serde(default)]
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub image: String,
    #[serde(default)]
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    /// Anchor id, reachable from the nav as `#id`.
    pub id: String,
    pub title: String,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
}

fn default_equipment() -> Vec<Equipment> {
    (1..=3)
        .map(|i| Equipment {
            image: format!("img/oprema-{i}.jpg"),
            alt: format!("Dizalica {i}"),
        })
        .collect()
}

fn default_stats() -> Vec<Stat> {
    vec![
        Stat {
            label: "godina iskustva".to_string(),
            value: 15,
            suffix: "+".to_string(),
        },
        Stat {
            label: "završenih projekata".to_string(),
            value: 500,
            suffix: "+".to_string(),
        },
        Stat {
            label: "dostupnost".to_string(),
            value: 24,
            suffix: "/7".to_string(),
        },
    ]
}

fn default_projects() -> Vec<Project> {
    (1..=6)
        .map(|i| Project {
            image: format!("img/projekt-{i}.jpg"),
            alt: format!("Projekt {i}"),
        })
        .collect()
}

/// Color configuration for light and dark themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Cards, header, spec panel.
    pub surface: String,
    pub text: String,
    /// Secondary text: labels, captions, footer.
    pub text_muted: String,
    /// Buttons, active dot, counter numbers.
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f4f5f7".to_string(),
            text: "#14171c".to_string(),
            text_muted: "#5c6470".to_string(),
            accent: "#f2a900".to_string(),
            border: "#dde1e6".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0e1013".to_string(),
            surface: "#181b20".to_string(),
            text: "#eef0f3".to_string(),
            text_muted: "#9aa3ae".to_string(),
            accent: "#ffbe1a".to_string(),
            border: "#2a2f36".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config.toml, using stock defaults");
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// validates the result, and logs non-fatal warnings.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# crane-landing configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Tables merge key by key with the defaults; arrays replace them whole.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Business identity
# ---------------------------------------------------------------------------
[site]
name = "Dubrovnik Dizalica"
tagline = "Najam dizalica i autodizalica s operaterom"
phone = "+385 00 000 0000"
email = "info@dubrovnikdizalica.com"
# Value of <html lang>.
lang = "hr"

# ---------------------------------------------------------------------------
# Contact form -> mailto link
# ---------------------------------------------------------------------------
[lead]
recipient = "info@dubrovnikdizalica.com"
subject = "Upit – najam dizalice"

# ---------------------------------------------------------------------------
# Equipment carousel
# ---------------------------------------------------------------------------
[carousel]
# Horizontal travel (CSS pixels) a touch must exceed to count as a swipe.
swipe_threshold = 50.0

# Spec lines shown next to the carousel, one list per [[equipment]] slide.
# Slides without their own list show the first one.
specs = [
    ["Nosivost: [upiši]", "Doseg ruke: [upiši]", "Radna visina: [upiši]", "Dodatna oprema: [upiši]"],
    ["Nosivost: [upiši]", "Doseg ruke: [upiši]", "Radna visina: [upiši]", "Stabilizacija / pristup: [upiši]"],
    ["Nosivost: [upiši]", "Doseg ruke: [upiši]", "Radna visina: [upiši]", "Operater + plan podizanja: [upiši]"],
]

# ---------------------------------------------------------------------------
# Theme preference
# ---------------------------------------------------------------------------
[theme]
# "light" or "dark"; used when nothing is stored and the OS has no preference.
default = "light"
# Key the visitor's choice is stored under.
storage_key = "theme"

# ---------------------------------------------------------------------------
# Statistics counters
# ---------------------------------------------------------------------------
[counter]
duration_ms = 1600
# Share of a counter (0-1] that must be visible before it starts.
visibility_threshold = 0.4

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f4f5f7"
text = "#14171c"
text_muted = "#5c6470"
accent = "#f2a900"
border = "#dde1e6"

[colors.dark]
background = "#0e1013"
surface = "#181b20"
text = "#eef0f3"
text_muted = "#9aa3ae"
accent = "#ffbe1a"
border = "#2a2f36"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Client module built with `wasm-pack build --target web -- --features web`.
# Set to "" to publish a page without scripts.
script = "pkg/crane_landing.js"

# ---------------------------------------------------------------------------
# Content
# ---------------------------------------------------------------------------
[[equipment]]
image = "img/oprema-1.jpg"
alt = "Dizalica 1"

[[equipment]]
image = "img/oprema-2.jpg"
alt = "Dizalica 2"

[[equipment]]
image = "img/oprema-3.jpg"
alt = "Dizalica 3"

[[stats]]
label = "godina iskustva"
value = 15
suffix = "+"

[[stats]]
label = "završenih projekata"
value = 500
suffix = "+"

[[stats]]
label = "dostupnost"
value = 24
suffix = "/7"

[[projects]]
image = "img/projekt-1.jpg"
alt = "Projekt 1"

[[projects]]
image = "img/projekt-2.jpg"
alt = "Projekt 2"

[[projects]]
image = "img/projekt-3.jpg"
alt = "Projekt 3"

[[projects]]
image = "img/projekt-4.jpg"
alt = "Projekt 4"

[[projects]]
image = "img/projekt-5.jpg"
alt = "Projekt 5"

[[projects]]
image = "img/projekt-6.jpg"
alt = "Projekt 6"

# Markdown sections, rendered between the projects and the contact form.
# [[sections]]
# id = "o-nama"
# title = "O nama"
# body = """
# Obiteljska tvrtka s **15 godina** iskustva.
# """
"##
}

/// Generate CSS custom properties from color config.
///
/// An explicit `data-theme` on `<html>` wins; without one, the OS preference
/// picks the scheme.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| {
        format!(
            "{indent}--color-bg: {};\n\
             {indent}--color-surface: {};\n\
             {indent}--color-text: {};\n\
             {indent}--color-text-muted: {};\n\
             {indent}--color-accent: {};\n\
             {indent}--color-border: {};",
            scheme.background,
            scheme.surface,
            scheme.text,
            scheme.text_muted,
            scheme.accent,
            scheme.border,
        )
    };
    format!(
        ":root {{\n{light}\n}}\n\n\
         :root[data-theme=\"dark\"] {{\n{dark}\n}}\n\n\
         @media (prefers-color-scheme: dark) {{\n    :root:not([data-theme=\"light\"]) {{\n{dark_nested}\n    }}\n}}",
        light = vars(&colors.light, "    "),
        dark = vars(&colors.dark, "    "),
        dark_nested = vars(&colors.dark, "        "),
    )
}
