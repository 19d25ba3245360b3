//! # Crane Landing
//!
//! Landing page for a crane-rental business: one static HTML page plus the
//! small amount of client behaviour it needs. There is no backend. The
//! only thing ever persisted is the visitor's light/dark choice, and leads
//! go out through the visitor's own mail client.
//!
//! # Architecture: Models, Sinks, Bindings
//!
//! Every interactive piece of the page is a plain Rust state machine that
//! knows nothing about the DOM:
//!
//! ```text
//!   input (click, touch, key, scroll)
//!        │
//!        ▼
//!   model (Carousel, Page, Lightbox, Counter, ThemePreference, LeadForm)
//!        │
//!        ▼
//!   sink  ─┬─ markup sinks   → initial HTML at build time   (generate)
//!          ├─ DOM sinks      → live page in the browser      (web)
//!          └─ recording sinks → assertions in unit tests
//! ```
//!
//! The same [`carousel::Carousel`] that drives the live page also renders
//! its first frame into `index.html`, so the page is complete without
//! scripts and the client never disagrees with the server about where it
//! starts.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Equipment carousel: wrap-around index, dots, spec panel, swipe gestures |
//! | [`scroll`] | Page scroll lock shared by the menu and the lightbox |
//! | [`chrome`] | Mobile menu, Escape handling, anchor scrolling, footer year |
//! | [`lightbox`] | Full-screen image overlay |
//! | [`theme`] | Light/dark preference and the stores it lives in |
//! | [`counter`] | Stats that count up once scrolled into view |
//! | [`lead`] | Contact form validation and `mailto:` link building |
//! | [`config`] | `config.toml` loading, merging, validation, color CSS |
//! | [`generate`] | Renders `index.html` and the fingerprinted stylesheet with Maud |
//! | [`output`] | CLI output formatting |
//! | `web` | DOM bindings, compiled with the `web` feature for `wasm32` |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, interpolation is
//! auto-escaped, and there is no template directory to ship.
//!
//! ## Sinks as Traits
//!
//! The carousel talks to three collaborators (slide track, spec panel, dot
//! row), each behind a small trait in [`carousel::sink`]. A missing
//! collaborator is simply absent, and every operation that would touch it
//! is skipped. Markup missing from a page therefore degrades to a no-op
//! instead of an error.
//!
//! ## Sparse Config Over Stock Defaults
//!
//! The stock config describes a complete placeholder site. A user's
//! `config.toml` only needs the values that differ; see
//! [`config::merge_toml`].

pub mod carousel;
pub mod chrome;
pub mod config;
pub mod counter;
pub mod generate;
pub mod lead;
pub mod lightbox;
pub mod output;
pub mod scroll;
pub mod theme;

#[cfg(feature = "web")]
pub mod web;
