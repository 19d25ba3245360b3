//! CLI output formatting for every subcommand.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each entity on the
//! page (equipment slide, stat, project, section) leads with its positional
//! index and what a visitor would see; the image path or spec lines follow
//! as indented context. The result reads as an inventory of the page.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Equipment
//! 001 Dizalica 1
//!     Image: img/oprema-1.jpg
//!     Nosivost: [upiši]
//!     Doseg ruke: [upiši]
//!
//! Stats
//! 001 15+ godina iskustva
//!
//! Projects
//! 001 Projekt 1
//!     Image: img/projekt-1.jpg
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Build
//!
//! ```text
//! Page → index.html
//! Stylesheet → style.3f9a0c1d2e.css
//! Script → pkg/crane_landing.js
//!
//! Generated 3 slides, 3 stats, 6 projects, 0 sections, copied 9 assets
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::config::SiteConfig;
use crate::generate::GenerateSummary;
use crate::theme::Theme;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}...", &text[..cut]),
    }
}

/// "1 slide" / "3 slides"
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the content inventory of a resolved config.
///
/// Each equipment slide lists the spec lines the carousel will show for it,
/// including the first-set fallback when the spec list is short.
pub fn format_check_output(config: &SiteConfig, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let specs = config.spec_table();

    lines.push("Equipment".to_string());
    if config.equipment.is_empty() {
        lines.push(format!("{}(none, carousel is inert)", indent(1)));
    }
    for (i, item) in config.equipment.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item.alt));
        lines.push(format!("{}Image: {}", indent(1), item.image));
        for spec in specs.lines_for(i) {
            lines.push(format!("{}{}", indent(1), spec));
        }
    }

    if !config.stats.is_empty() {
        lines.push(String::new());
        lines.push("Stats".to_string());
        for (i, stat) in config.stats.iter().enumerate() {
            lines.push(format!(
                "{} {}{} {}",
                format_index(i + 1),
                stat.value,
                stat.suffix,
                stat.label
            ));
        }
    }

    if !config.projects.is_empty() {
        lines.push(String::new());
        lines.push("Projects".to_string());
        for (i, project) in config.projects.iter().enumerate() {
            lines.push(format!("{} {}", format_index(i + 1), project.alt));
            lines.push(format!("{}Image: {}", indent(1), project.image));
        }
    }

    if !config.sections.is_empty() {
        lines.push(String::new());
        lines.push("Sections".to_string());
        for (i, section) in config.sections.iter().enumerate() {
            lines.push(format!(
                "{} {} (#{})",
                format_index(i + 1),
                section.title,
                section.id
            ));
            let first_line = section.body.lines().find(|l| !l.trim().is_empty());
            if let Some(text) = first_line {
                lines.push(format!("{}{}", indent(1), truncate_desc(text.trim(), 60)));
            }
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").is_file() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }
    if source_root.join("assets").is_dir() {
        lines.push(format!("{}assets/", indent(1)));
    }

    let warnings = config.warnings();
    if !warnings.is_empty() {
        lines.push(String::new());
        lines.extend(format_warnings(&warnings));
    }

    lines
}

pub fn print_check_output(config: &SiteConfig, source_root: &Path) {
    for line in format_check_output(config, source_root) {
        println!("{}", line);
    }
}

/// Format non-fatal config warnings.
pub fn format_warnings(warnings: &[String]) -> Vec<String> {
    let mut lines = vec!["Warnings".to_string()];
    lines.extend(warnings.iter().map(|w| format!("{}{}", indent(1), w)));
    lines
}

// ============================================================================
// build
// ============================================================================

/// Format what a build wrote.
pub fn format_build_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Page → {}", summary.page),
        format!("Stylesheet → {}", summary.stylesheet),
    ];
    match &summary.script {
        Some(script) => lines.push(format!("Script → {}", script)),
        None => lines.push("Script → (none)".to_string()),
    }
    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}, {}, copied {}",
        plural(summary.slides, "slide"),
        plural(summary.stats, "stat"),
        plural(summary.projects, "project"),
        plural(summary.sections, "section"),
        plural(summary.assets_copied, "asset"),
    ));
    lines
}

pub fn print_build_output(summary: &GenerateSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// theme
// ============================================================================

/// Format the stored theme preference.
pub fn format_theme_status(stored: Option<Theme>, fallback: Theme, store_path: &Path) -> Vec<String> {
    let current = match stored {
        Some(theme) => format!("Theme: {}", theme),
        None => format!("Theme: {} (nothing stored, default)", fallback),
    };
    vec![current, format!("{}Store: {}", indent(1), store_path.display())]
}

pub fn print_theme_status(stored: Option<Theme>, fallback: Theme, store_path: &Path) {
    for line in format_theme_status(stored, fallback, store_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
