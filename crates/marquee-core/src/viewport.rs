//! Viewport classification and scroll geometry.
//!
//! The mode is derived, never stored: every component consults the same
//! breakpoint so narrow/wide decisions stay consistent across the page.

use serde::{Deserialize, Serialize};

/// The single fixed breakpoint separating narrow from wide layouts.
pub const BREAKPOINT_PX: u32 = 768;

/// Derived narrow/wide classification of the current viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportMode {
    Narrow,
    Wide,
}

impl ViewportMode {
    /// Classify a width against a breakpoint. Widths at the breakpoint
    /// itself count as narrow.
    pub fn classify(width: u32, breakpoint: u32) -> Self {
        if width <= breakpoint {
            ViewportMode::Narrow
        } else {
            ViewportMode::Wide
        }
    }

    pub fn is_narrow(self) -> bool {
        matches!(self, ViewportMode::Narrow)
    }
}

/// Visible slice of the document, in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub scroll_y: f64,
    pub height: f64,
}
