//! Pure panel and tab state machines.
//!
//! Viewport-transition resets are expressed as plain functions over these
//! states (`compute_toggle_layout`, `compute_tab_layout`), decoupled from
//! any event source, so the resize behavior is testable on its own.
//!
//! Toggle groups and tab groups deliberately stay two distinct machines:
//! clicking the active tab of a tab group closes it (zero active is valid),
//! while a toggle group returning to wide mode falls back to its configured
//! wide default. These are intentionally different UX choices, not one
//! machine with two configurations.

use crate::viewport::ViewportMode;
use serde::{Deserialize, Serialize};

/// Binary visibility state of a toggleable panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    Collapsed,
    Expanded,
}

/// What wide mode forces a toggle group's panels into.
///
/// Accordions render permanently expanded on wide layouts; the hamburger
/// sidebar renders closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WideDefault {
    Expanded,
    Collapsed,
}

/// Whether a trigger acts on every viewport or only on narrow ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportGate {
    NarrowOnly,
    Always,
}

/// A set of independent toggleable panels sharing one trigger policy.
///
/// Each panel carries a narrow-mode active marker (the `active` class in the
/// markup). The effective panel state consults the viewport mode: wide mode
/// follows the group's wide default, narrow mode follows the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleGroupState {
    markers: Vec<bool>,
    wide_default: WideDefault,
    gate: ViewportGate,
}

impl ToggleGroupState {
    pub fn new(len: usize, wide_default: WideDefault, gate: ViewportGate) -> Self {
        Self {
            markers: vec![false; len],
            wide_default,
            gate,
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn wide_default(&self) -> WideDefault {
        self.wide_default
    }

    pub fn gate(&self) -> ViewportGate {
        self.gate
    }

    pub fn marker(&self, index: usize) -> bool {
        self.markers.get(index).copied().unwrap_or(false)
    }

    pub fn set_marker(&mut self, index: usize, on: bool) {
        if let Some(m) = self.markers.get_mut(index) {
            *m = on;
        }
    }

    /// Flip a panel's marker in response to its trigger. Returns whether the
    /// click acted; gated groups ignore clicks on wide viewports.
    pub fn toggle(&mut self, index: usize, mode: ViewportMode) -> bool {
        if self.gate == ViewportGate::NarrowOnly && !mode.is_narrow() {
            return false;
        }
        match self.markers.get_mut(index) {
            Some(m) => {
                *m = !*m;
                true
            }
            None => false,
        }
    }

    /// The visible state of a panel under the given viewport mode.
    pub fn effective(&self, index: usize, mode: ViewportMode) -> PanelState {
        match mode {
            ViewportMode::Wide => match self.wide_default {
                WideDefault::Expanded => PanelState::Expanded,
                WideDefault::Collapsed => PanelState::Collapsed,
            },
            ViewportMode::Narrow => {
                if self.marker(index) {
                    PanelState::Expanded
                } else {
                    PanelState::Collapsed
                }
            }
        }
    }

    pub fn clear_markers(&mut self) {
        for m in &mut self.markers {
            *m = false;
        }
    }
}

/// Mutually exclusive panels keyed by tab index.
///
/// Invariant: at most one tab is active; clicking the active tab closes it,
/// leaving zero active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroupState {
    len: usize,
    active: Option<usize>,
    default_active: usize,
}

impl TabGroupState {
    pub fn new(len: usize, default_active: usize) -> Self {
        Self {
            len,
            active: if len == 0 { None } else { Some(default_active.min(len - 1)) },
            default_active,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn default_active(&self) -> usize {
        self.default_active
    }

    /// Activate a tab, or deactivate it if it is already the active one.
    /// Returns the new active tab.
    pub fn activate(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return self.active;
        }
        self.active = if self.active == Some(index) {
            None
        } else {
            Some(index)
        };
        self.active
    }
}

/// Apply a viewport transition to a toggle group: entering wide mode clears
/// every narrow marker; entering narrow mode changes nothing.
pub fn compute_toggle_layout(mode: ViewportMode, state: &ToggleGroupState) -> ToggleGroupState {
    let mut next = state.clone();
    if !mode.is_narrow() {
        next.clear_markers();
    }
    next
}

/// Apply a viewport transition to a tab group: entering wide mode restores
/// the designated default tab; entering narrow mode changes nothing.
pub fn compute_tab_layout(mode: ViewportMode, state: &TabGroupState) -> TabGroupState {
    let mut next = state.clone();
    if !mode.is_narrow() && next.len > 0 {
        next.active = Some(next.default_active.min(next.len - 1));
    }
    next
}
