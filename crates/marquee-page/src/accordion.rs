//! Accordion toggle groups and tab groups.
//!
//! Toggle groups are scanned from the fixed data-attribute vocabulary of the
//! markup contract; each variant pairs a root attribute with the class or
//! attribute locating its clickable header. All variants share the same
//! machine: the `active` class on the root mirrors the narrow-mode marker,
//! and returning to a wide viewport clears every marker (desktop CSS shows
//! the panels permanently expanded). The staff-page items toggle is the one
//! ungated variant, acting on any viewport.
//!
//! Tab groups (`data-tab-group`) are mutually exclusive with an intentional
//! twist: clicking the active tab closes it, leaving no panel expanded.

use marquee_core::{
    compute_tab_layout, compute_toggle_layout, Document, NodeId, TabGroupState, ToggleGroupState,
    ViewportGate, ViewportMode, WideDefault,
};
use tracing::debug;

const ACTIVE_CLASS: &str = "active";

/// How a toggle variant locates its header inside the root.
#[derive(Debug, Clone, Copy)]
pub enum HeaderBy {
    Class(&'static str),
    Attr(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ToggleSpec {
    pub root_attr: &'static str,
    pub header: HeaderBy,
    pub gate: ViewportGate,
}

/// The toggle vocabulary of the delivered markup, in page init order.
pub const TOGGLE_SPECS: &[ToggleSpec] = &[
    ToggleSpec {
        root_attr: "data-program-card",
        header: HeaderBy::Class("card-header"),
        gate: ViewportGate::NarrowOnly,
    },
    ToggleSpec {
        root_attr: "data-schedule-row",
        header: HeaderBy::Class("day-label"),
        gate: ViewportGate::NarrowOnly,
    },
    ToggleSpec {
        root_attr: "data-access-item",
        header: HeaderBy::Class("access-item-header"),
        gate: ViewportGate::NarrowOnly,
    },
    ToggleSpec {
        root_attr: "data-items-mobile",
        header: HeaderBy::Class("items-mobile-header"),
        gate: ViewportGate::NarrowOnly,
    },
    ToggleSpec {
        root_attr: "data-floormap-item",
        header: HeaderBy::Attr("data-floormap-header"),
        gate: ViewportGate::NarrowOnly,
    },
    ToggleSpec {
        root_attr: "data-staff-items",
        header: HeaderBy::Class("staff-items-header"),
        gate: ViewportGate::Always,
    },
];

/// One scanned toggle group: parallel root/header lists plus the pure state.
#[derive(Debug)]
pub struct ToggleBehavior {
    roots: Vec<NodeId>,
    headers: Vec<NodeId>,
    state: ToggleGroupState,
}

impl ToggleBehavior {
    /// Scan one variant. Returns `None` when the page has no matching roots
    /// (or none with a header), which is not an error.
    pub fn scan(doc: &Document, spec: &ToggleSpec) -> Option<Self> {
        let mut roots = Vec::new();
        let mut headers = Vec::new();
        for root in doc.with_attr(spec.root_attr) {
            let header = match spec.header {
                HeaderBy::Class(class) => doc.descendant_with_class(root, class),
                HeaderBy::Attr(attr) => doc.descendant_with_attr(root, attr),
            };
            if let Some(header) = header {
                roots.push(root);
                headers.push(header);
            }
        }
        if roots.is_empty() {
            debug!(attr = spec.root_attr, "no toggle roots found, skipping");
            return None;
        }
        let state = ToggleGroupState::new(roots.len(), WideDefault::Expanded, spec.gate);
        Some(Self {
            roots,
            headers,
            state,
        })
    }

    pub fn headers(&self) -> &[NodeId] {
        &self.headers
    }

    pub fn state(&self) -> &ToggleGroupState {
        &self.state
    }

    /// Header click: flip the marker (viewport permitting) and mirror it as
    /// the root's `active` class.
    pub fn on_header_click(&mut self, doc: &mut Document, index: usize, mode: ViewportMode) {
        if !self.state.toggle(index, mode) {
            return;
        }
        if self.state.marker(index) {
            doc.add_class(self.roots[index], ACTIVE_CLASS);
        } else {
            doc.remove_class(self.roots[index], ACTIVE_CLASS);
        }
    }

    /// Wide viewports show every panel expanded; the mobile markers go away.
    pub fn on_wide(&mut self, doc: &mut Document) {
        self.state = compute_toggle_layout(ViewportMode::Wide, &self.state);
        for root in &self.roots {
            doc.remove_class(*root, ACTIVE_CLASS);
        }
    }
}

/// Pair each schedule row's time slots with its activities into a generated
/// mobile container, so narrow layouts can show them interleaved. Rows
/// missing either cell are left untouched.
pub fn restructure_schedule_rows(doc: &mut Document) {
    for row in doc.with_attr("data-schedule-row") {
        let details = doc.descendants_with_class(row, "schedule-detail");
        let (Some(time_cell), Some(activity_cell)) = (details.get(1).copied(), details.get(2).copied())
        else {
            continue;
        };
        let slots = doc.descendants_with_class(time_cell, "time-slot");
        let activities = doc.descendants_with_class(activity_cell, "activity");

        let container = doc.append(time_cell, "div");
        doc.add_class(container, "schedule-mobile-container");
        for (slot, activity) in slots.iter().zip(activities.iter()) {
            let pair = doc.append(container, "div");
            doc.add_class(pair, "schedule-pair");
            doc.clone_subtree(*slot, pair);
            doc.clone_subtree(*activity, pair);
        }
    }
}

/// One `data-tab-group`: triggers and panels linked by tab key.
#[derive(Debug)]
pub struct TabBehavior {
    triggers: Vec<NodeId>,
    panels: Vec<NodeId>,
    state: TabGroupState,
}

impl TabBehavior {
    /// Scan every tab group on the page. Triggers without a matching panel
    /// are dropped from their group.
    pub fn scan_all(doc: &mut Document) -> Vec<Self> {
        let mut groups = Vec::new();
        for root in doc.with_attr("data-tab-group") {
            let mut triggers = Vec::new();
            let mut panels = Vec::new();
            for trigger in doc.descendants(root) {
                let Some(key) = doc.attr(trigger, "data-tab").map(str::to_string) else {
                    continue;
                };
                let panel = doc
                    .descendants(root)
                    .into_iter()
                    .find(|n| doc.attr(*n, "data-tab-panel") == Some(key.as_str()));
                if let Some(panel) = panel {
                    triggers.push(trigger);
                    panels.push(panel);
                } else {
                    debug!(key = key.as_str(), "tab trigger without panel, dropped");
                }
            }
            if triggers.is_empty() {
                continue;
            }
            let mut group = Self {
                state: TabGroupState::new(triggers.len(), 0),
                triggers,
                panels,
            };
            group.sync(doc);
            groups.push(group);
        }
        groups
    }

    pub fn triggers(&self) -> &[NodeId] {
        &self.triggers
    }

    pub fn state(&self) -> &TabGroupState {
        &self.state
    }

    /// Trigger click: activate, or close when already active.
    pub fn on_trigger_click(&mut self, doc: &mut Document, index: usize) {
        self.state.activate(index);
        self.sync(doc);
    }

    /// Wide viewports restore the designated default tab.
    pub fn on_wide(&mut self, doc: &mut Document) {
        self.state = compute_tab_layout(ViewportMode::Wide, &self.state);
        self.sync(doc);
    }

    fn sync(&self, doc: &mut Document) {
        for i in 0..self.triggers.len() {
            if self.state.active() == Some(i) {
                doc.add_class(self.triggers[i], ACTIVE_CLASS);
                doc.add_class(self.panels[i], ACTIVE_CLASS);
            } else {
                doc.remove_class(self.triggers[i], ACTIVE_CLASS);
                doc.remove_class(self.panels[i], ACTIVE_CLASS);
            }
        }
    }
}
