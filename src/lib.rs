//! # Folio Interact
//!
//! Client-side interactivity for a single-page portfolio site, written in Rust
//! and compiled to WebAssembly. The page's HTML and CSS stay hand-written; this
//! crate adds the behaviour: the mobile menu, scroll reveals, smooth anchor
//! scrolling, the contact form flow and a handful of animations.
//!
//! # Architecture: Components Over a DOM Seam
//!
//! ```text
//! web-sys handles ──▶ dom traits ──▶ components ──▶ Page ◀── gloo listeners
//!                      (Element,      (navigation,    (fans events
//!                       Viewport,      reveal, ...)    out)
//!                       Scheduler)
//! ```
//!
//! Components never touch `window` or `document`. They receive trait-object
//! handles to exactly the elements they drive, plus a [`dom::Scheduler`] for
//! anything delayed. Two consequences:
//!
//! - **Testability**: every component runs natively against a recording
//!   in-memory DOM and a hand-cranked clock, so timing behaviour (auto-hide,
//!   typing, bar refills, request timeouts) is tested deterministically.
//! - **Explicit wiring**: [`page::Page::mount`] is the only place that looks
//!   elements up. A missing element disables its feature instead of throwing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`dom`] | `Element`/`Document`/`Viewport`/`Scheduler` traits, `sleep` future, threshold geometry |
//! | [`navigation`] | Mobile menu toggle, icon glyph sync, close on link click or Escape |
//! | [`reveal`] | Tags sections and reveals them once they rise above the fold |
//! | [`smooth_scroll`] | Routes in-page anchor clicks to a header-offset smooth scroll |
//! | [`submission`] | Contact form state machine: guard, request, timeout, banner |
//! | [`transport`] | `Transport` trait and the `reqwest` implementation |
//! | [`animate`] | Skill bar refills and the fire-once hero chart |
//! | [`typing`] | Typewriter reveal of the hero tagline |
//! | [`polish`] | Card hover, keyboard focus styling, link tracking, field focus, load effects |
//! | [`styles`] | Stylesheet injected at startup, generated from configured colours |
//! | [`page`] | Mounts every component and dispatches page events |
//! | [`config`] | `folio.toml` loading, validation and merging |
//! | [`logging`] | `tracing` layer writing single-line events to a console sink |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Guaranteed Control Release
//!
//! The submit button is disabled by acquiring a guard and re-enabled by
//! dropping it. Success, failure, timeout and a dropped future all pass
//! through the same `Drop`, so the button cannot stay stuck in "Sending...".
//!
//! ## Timeouts Are Races
//!
//! The request future is raced against a scheduler sleep with
//! `futures::future::select`. Whichever finishes first decides the outcome;
//! the loser is dropped. A hung endpoint costs the visitor at most the
//! configured timeout.
//!
//! ## One Transport, Two Targets
//!
//! `reqwest` compiles to `fetch` on wasm32 and to hyper natively, so the
//! `folio probe` command exercises the exact request and classification the
//! page uses.
//!
//! ## Configuration in the Page
//!
//! Selectors, delays and colours live in `folio.toml`. The browser build reads
//! the same TOML from an inline `<script type="text/toml" id="folio-config">`
//! block, and `folio check` validates it before deploy.

pub mod animate;
pub mod config;
pub mod dom;
pub mod logging;
pub mod navigation;
pub mod output;
pub mod page;
pub mod polish;
pub mod reveal;
pub mod smooth_scroll;
pub mod styles;
pub mod submission;
pub mod transport;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod web;
