//! Marquee core crate.
//!
//! This crate intentionally separates page-behavior concerns into layers:
//!
//! - `dom`: arena element tree carrying the markup contract (ids, classes,
//!   data-attributes) that behaviors bind to and mutate.
//! - `viewport`: derived narrow/wide classification against the shared
//!   breakpoint, plus scroll geometry.
//! - `layout`: pure panel/tab state machines and the viewport-transition
//!   reset functions.
//! - `store`: key-value store seam standing in for durable and
//!   session-scoped browser storage.
//! - `spy`: scroll-spy band geometry and section scans.
//! - `events`: explicit subscription registry replacing ad-hoc listener
//!   closures.
//!
//! The critical design rule is that everything here is host-independent and
//! deterministic: state transitions are plain functions over plain data, so
//! every observable behavior of the page layer can be tested without a
//! browser.

pub mod dom;
pub mod events;
pub mod layout;
pub mod spy;
pub mod store;
pub mod viewport;

pub use dom::{Document, NodeId};
pub use events::{Binding, Bindings, EventKind};
pub use layout::{
    compute_tab_layout, compute_toggle_layout, PanelState, TabGroupState, ToggleGroupState,
    ViewportGate, WideDefault,
};
pub use spy::{active_section, fallback_section, SectionRect, SPY_BAND_BOTTOM, SPY_BAND_TOP};
pub use store::{KvStore, MemoryStore, FLAG_TRUE};
pub use viewport::{ViewportMode, ViewportRect, BREAKPOINT_PX};
