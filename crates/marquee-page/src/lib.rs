//! Marquee page crate.
//!
//! Wires the core machinery into the concrete behaviors of the promotional
//! site: hamburger menu, accordion toggle groups, tab groups, scroll-spy,
//! smooth in-page navigation, the persisted checklist, and the staff-page
//! password gate. `setup_page` scans a document once, constructs every
//! behavior with its dependencies injected, and returns a [`PageController`]
//! that routes host events through an explicit binding table. Every entry
//! point degrades to a silent no-op when its markup is absent: the same
//! engine runs on pages carrying any subset of the vocabulary.

pub mod accordion;
pub mod checklist;
pub mod gate;
pub mod host;
pub mod menu;
pub mod nav;
pub mod scrollspy;

pub use accordion::{restructure_schedule_rows, TabBehavior, ToggleBehavior, TOGGLE_SPECS};
pub use checklist::Checklist;
pub use gate::{
    DigestError, DigestProvider, GateConfig, GateController, GatePhase, Sha256Provider,
    ERROR_DISMISS_MS, SESSION_KEY,
};
pub use host::{Host, HostEffect};
pub use menu::{MenuController, SUBMENU_REVEAL_DELAY_MS};
pub use nav::SmoothNav;
pub use scrollspy::ScrollSpy;

use marquee_core::{
    Bindings, Document, EventKind, KvStore, NodeId, SectionRect, ViewportMode, ViewportRect,
    BREAKPOINT_PX,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Page-level configuration. Everything has a default except the gate,
/// which only exists on pages that configure an expected digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default = "default_breakpoint")]
    pub breakpoint_px: u32,
    #[serde(default)]
    pub gate: Option<GateConfig>,
}

fn default_breakpoint() -> u32 {
    BREAKPOINT_PX
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: default_breakpoint(),
            gate: None,
        }
    }
}

/// Behavior tag routed through the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Behavior {
    MenuHamburger,
    MenuOverlay,
    MenuLink,
    MenuSubmenu,
    Toggle { group: usize, index: usize },
    Tab { group: usize, index: usize },
    NavLink,
    ChecklistItem,
    GateSubmit,
}

/// All page behaviors behind one event-routing facade.
///
/// The controller is handed every host event verbatim (click, change,
/// enter, resize, scroll); unbound nodes and missing optional sections are
/// silent no-ops. `dispose` tears the routing down.
#[derive(Debug)]
pub struct PageController {
    bindings: Bindings<Behavior>,
    breakpoint: u32,
    mode: ViewportMode,
    disposed: bool,
    menu: Option<MenuController>,
    toggles: Vec<ToggleBehavior>,
    tabs: Vec<TabBehavior>,
    spy: Option<ScrollSpy>,
    nav: SmoothNav,
    checklist: Option<Checklist>,
    gate: Option<GateController>,
}

/// Scan the document and assemble the page behaviors.
///
/// `durable` backs the checklist, `session` the gate flag, `digest` the
/// gate check; unused handles are simply never consulted on pages lacking
/// the matching markup.
pub fn setup_page(
    doc: &mut Document,
    config: PageConfig,
    durable: Box<dyn KvStore>,
    session: Box<dyn KvStore>,
    digest: Box<dyn DigestProvider>,
    initial_width: u32,
) -> PageController {
    let mode = ViewportMode::classify(initial_width, config.breakpoint_px);
    let mut bindings = Bindings::new();

    let checklist = Checklist::setup(doc, durable);
    if let Some(checklist) = &checklist {
        for input in checklist.inputs() {
            bindings.bind(input, EventKind::Change, Behavior::ChecklistItem);
        }
    }

    let nav = SmoothNav::setup(doc);
    for link in nav.links() {
        bindings.bind(*link, EventKind::Click, Behavior::NavLink);
    }

    let menu = MenuController::setup(doc);
    if let Some(menu) = &menu {
        bindings.bind(menu.hamburger(), EventKind::Click, Behavior::MenuHamburger);
        bindings.bind(menu.overlay(), EventKind::Click, Behavior::MenuOverlay);
        for link in menu.links() {
            bindings.bind(*link, EventKind::Click, Behavior::MenuLink);
        }
        if let Some(link) = menu.submenu_link() {
            bindings.bind(link, EventKind::Click, Behavior::MenuSubmenu);
        }
    }

    restructure_schedule_rows(doc);
    let mut toggles = Vec::new();
    for spec in TOGGLE_SPECS {
        if let Some(toggle) = ToggleBehavior::scan(doc, spec) {
            let group = toggles.len();
            for (index, header) in toggle.headers().iter().enumerate() {
                bindings.bind(*header, EventKind::Click, Behavior::Toggle { group, index });
            }
            toggles.push(toggle);
        }
    }

    let tabs = TabBehavior::scan_all(doc);
    for (group, tab) in tabs.iter().enumerate() {
        for (index, trigger) in tab.triggers().iter().enumerate() {
            bindings.bind(*trigger, EventKind::Click, Behavior::Tab { group, index });
        }
    }

    let spy = ScrollSpy::setup(doc);

    let gate = match config.gate {
        Some(gate_config) => {
            let gate = GateController::setup(doc, gate_config, session, digest);
            if let Some(gate) = &gate {
                bindings.bind(gate.button(), EventKind::Click, Behavior::GateSubmit);
                bindings.bind(gate.input(), EventKind::KeyEnter, Behavior::GateSubmit);
            }
            gate
        }
        None => None,
    };

    debug!(
        bindings = bindings.len(),
        toggles = toggles.len(),
        tabs = tabs.len(),
        "page behaviors assembled"
    );

    PageController {
        bindings,
        breakpoint: config.breakpoint_px,
        mode,
        disposed: false,
        menu,
        toggles,
        tabs,
        spy,
        nav,
        checklist,
        gate,
    }
}

impl PageController {
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    pub fn gate(&self) -> Option<&GateController> {
        self.gate.as_ref()
    }

    /// A click anywhere on the page. Bound behaviors fire in registration
    /// order; everything else is ignored.
    pub fn click(&mut self, doc: &mut Document, host: &mut Host, node: NodeId) {
        if self.disposed {
            return;
        }
        let behaviors: Vec<Behavior> = self
            .bindings
            .matches(node, EventKind::Click)
            .copied()
            .collect();
        for behavior in behaviors {
            self.run(doc, host, node, behavior);
        }
    }

    /// A change event (checkbox toggle).
    pub fn change(&mut self, doc: &mut Document, node: NodeId) {
        if self.disposed {
            return;
        }
        let hit = self
            .bindings
            .matches(node, EventKind::Change)
            .any(|b| *b == Behavior::ChecklistItem);
        if hit {
            if let Some(checklist) = &mut self.checklist {
                checklist.on_change(doc, node);
            }
        }
    }

    /// Enter pressed inside a bound input (the gate password field).
    pub fn key_enter(&mut self, doc: &mut Document, host: &mut Host, node: NodeId) {
        if self.disposed {
            return;
        }
        let hit = self
            .bindings
            .matches(node, EventKind::KeyEnter)
            .any(|b| *b == Behavior::GateSubmit);
        if hit {
            if let Some(gate) = &mut self.gate {
                gate.attempt_login(doc, host);
            }
        }
    }

    /// Every viewport resize, undebounced. Transitioning into wide mode
    /// applies each behavior's wide-mode reset.
    pub fn resize(&mut self, doc: &mut Document, host: &mut Host, width: u32) {
        if self.disposed {
            return;
        }
        let next = ViewportMode::classify(width, self.breakpoint);
        let entered_wide = self.mode.is_narrow() && !next.is_narrow();
        self.mode = next;
        if !entered_wide {
            return;
        }
        if let Some(menu) = &mut self.menu {
            menu.on_wide(doc, host);
        }
        for toggle in &mut self.toggles {
            toggle.on_wide(doc);
        }
        for tab in &mut self.tabs {
            tab.on_wide(doc);
        }
    }

    /// Every scroll event: feed the spy the current section geometry.
    pub fn scroll(&mut self, doc: &mut Document, viewport: &ViewportRect, sections: &[SectionRect]) {
        if self.disposed {
            return;
        }
        if let Some(spy) = &self.spy {
            spy.on_scroll(doc, viewport, sections);
        }
    }

    /// Initial-load highlight, with the scroll-position fallback scan.
    pub fn prime_scroll(
        &mut self,
        doc: &mut Document,
        viewport: &ViewportRect,
        sections: &[SectionRect],
    ) {
        if self.disposed {
            return;
        }
        if let Some(spy) = &self.spy {
            spy.prime(doc, viewport, sections);
        }
    }

    /// Host timer callback for the gate's transient error.
    pub fn dismiss_gate_error(&mut self, doc: &mut Document) {
        if let Some(gate) = &self.gate {
            gate.dismiss_error(doc);
        }
    }

    /// Debug entry point: wipe the persisted checklist.
    pub fn reset_checklist(&mut self, doc: &mut Document) {
        if let Some(checklist) = &mut self.checklist {
            checklist.reset(doc);
        }
    }

    /// Dispose of every subscription; a disposed controller routes nothing.
    pub fn dispose(&mut self) {
        self.bindings.clear();
        self.disposed = true;
    }

    fn run(&mut self, doc: &mut Document, host: &mut Host, node: NodeId, behavior: Behavior) {
        match behavior {
            Behavior::MenuHamburger => {
                if let Some(menu) = &mut self.menu {
                    menu.toggle(doc, host);
                }
            }
            Behavior::MenuOverlay => {
                if let Some(menu) = &mut self.menu {
                    menu.close(doc, host);
                }
            }
            Behavior::MenuLink => {
                let mode = self.mode;
                if let Some(menu) = &mut self.menu {
                    menu.on_link_click(doc, host, node, mode);
                }
            }
            Behavior::MenuSubmenu => {
                let mode = self.mode;
                if let Some(menu) = &mut self.menu {
                    menu.toggle_submenu(doc, host, mode);
                }
            }
            Behavior::Toggle { group, index } => {
                if let Some(toggle) = self.toggles.get_mut(group) {
                    toggle.on_header_click(doc, index, self.mode);
                }
            }
            Behavior::Tab { group, index } => {
                if let Some(tab) = self.tabs.get_mut(group) {
                    tab.on_trigger_click(doc, index);
                }
            }
            Behavior::NavLink => {
                self.nav.on_click(doc, host, node);
            }
            Behavior::ChecklistItem => {
                // checkbox activation arrives as a change event
            }
            Behavior::GateSubmit => {
                if let Some(gate) = &mut self.gate {
                    gate.attempt_login(doc, host);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::MemoryStore;

    // sha256("password")
    const PASSWORD_DIGEST: &str =
        "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8";

    fn landing_doc() -> Document {
        let mut doc = Document::new();

        let hamburger = doc.append(doc.root(), "button");
        doc.set_id(hamburger, "hamburger");
        let sidebar = doc.append(doc.root(), "aside");
        doc.set_id(sidebar, "sidebar");
        let overlay = doc.append(doc.root(), "div");
        doc.set_id(overlay, "overlay");
        let nav = doc.append(sidebar, "nav");
        doc.add_class(nav, "sidebar-nav");
        for id in ["program", "access"] {
            let link = doc.append(nav, "a");
            doc.set_attr(link, "href", &format!("#{id}"));
        }

        for id in ["program", "access"] {
            let section = doc.append(doc.root(), "section");
            doc.set_id(section, id);
        }

        for _ in 0..2 {
            let card = doc.append(doc.root(), "div");
            doc.set_attr(card, "data-program-card", "");
            let header = doc.append(card, "div");
            doc.add_class(header, "card-header");
        }

        let li = doc.append(doc.root(), "li");
        doc.add_class(li, "checklist-item");
        let input = doc.append(li, "input");
        doc.set_attr(input, "data-item", "tent");

        doc
    }

    fn controller(doc: &mut Document, width: u32) -> PageController {
        setup_page(
            doc,
            PageConfig::default(),
            Box::<MemoryStore>::default(),
            Box::<MemoryStore>::default(),
            Box::new(Sha256Provider),
            width,
        )
    }

    #[test]
    fn test_card_toggle_and_wide_reset_through_the_controller() {
        let mut doc = landing_doc();
        let mut page = controller(&mut doc, 375);
        let mut host = Host::new();
        assert_eq!(page.mode(), ViewportMode::Narrow);

        let cards = doc.with_attr("data-program-card");
        let header = doc
            .descendant_with_class(cards[0], "card-header")
            .expect("header present");

        page.click(&mut doc, &mut host, header);
        assert!(doc.has_class(cards[0], "active"));

        page.resize(&mut doc, &mut host, 1024);
        assert_eq!(page.mode(), ViewportMode::Wide);
        assert!(!doc.has_class(cards[0], "active"), "wide reset clears markers");

        // wide clicks are no-ops for gated toggles
        page.click(&mut doc, &mut host, header);
        assert!(!doc.has_class(cards[0], "active"));
    }

    #[test]
    fn test_sidebar_link_click_scrolls_and_closes_the_menu() {
        let mut doc = landing_doc();
        let mut page = controller(&mut doc, 375);
        let mut host = Host::new();

        let hamburger = doc.by_id("hamburger").expect("hamburger");
        page.click(&mut doc, &mut host, hamburger);
        host.drain();

        let sidebar = doc.by_id("sidebar").expect("sidebar");
        let link = doc.descendants_with_tag(sidebar, "a")[0];
        let target = doc.by_id("program").expect("section");
        page.click(&mut doc, &mut host, link);

        let effects = host.drain();
        assert!(effects.contains(&HostEffect::ScrollToNode(target)));
        assert!(effects.contains(&HostEffect::PushAddress("#program".to_string())));
        assert!(effects.contains(&HostEffect::SetScrollLock(false)), "menu closed");
        assert!(!doc.has_class(sidebar, "active"));
    }

    #[test]
    fn test_checklist_change_routes_through_the_controller() {
        let mut doc = landing_doc();
        let mut page = controller(&mut doc, 375);

        let input = doc.with_attr("data-item")[0];
        page.change(&mut doc, input);
        let container = doc.parent(input).expect("container");
        assert!(doc.has_class(container, "checked"));

        page.reset_checklist(&mut doc);
        assert!(!doc.has_class(container, "checked"));
    }

    #[test]
    fn test_scroll_spy_highlights_via_the_controller() {
        let mut doc = landing_doc();
        let mut page = controller(&mut doc, 1024);

        let sections = vec![
            SectionRect::new("program", 0.0, 600.0),
            SectionRect::new("access", 600.0, 600.0),
        ];
        let viewport = ViewportRect {
            scroll_y: 500.0,
            height: 600.0,
        };
        page.scroll(&mut doc, &viewport, &sections);

        let sidebar = doc.by_id("sidebar").expect("sidebar");
        let links = doc.descendants_with_tag(sidebar, "a");
        assert!(doc.has_class(links[1], "active"));
        assert!(!doc.has_class(links[0], "active"));
    }

    #[test]
    fn test_gate_flows_through_click_and_enter() {
        let mut doc = Document::new();
        let overlay = doc.append(doc.root(), "div");
        doc.set_id(overlay, "passwordOverlay");
        let input = doc.append(overlay, "input");
        doc.set_id(input, "passwordInput");
        let button = doc.append(overlay, "button");
        doc.set_id(button, "passwordBtn");
        let error = doc.append(overlay, "p");
        doc.set_id(error, "passwordError");
        let content = doc.append(doc.root(), "main");
        doc.set_id(content, "mainContent");
        doc.add_class(content, "content-hidden");

        let mut page = setup_page(
            &mut doc,
            PageConfig {
                gate: Some(GateConfig::new(PASSWORD_DIGEST)),
                ..PageConfig::default()
            },
            Box::<MemoryStore>::default(),
            Box::<MemoryStore>::default(),
            Box::new(Sha256Provider),
            1024,
        );
        let mut host = Host::new();

        doc.set_attr(input, "value", "wrong");
        page.key_enter(&mut doc, &mut host, input);
        assert_eq!(
            page.gate().map(GateController::phase),
            Some(GatePhase::Locked)
        );
        assert!(doc.has_class(error, "show"));
        page.dismiss_gate_error(&mut doc);
        assert!(!doc.has_class(error, "show"));

        doc.set_attr(input, "value", "password");
        page.click(&mut doc, &mut host, button);
        assert_eq!(
            page.gate().map(GateController::phase),
            Some(GatePhase::Unlocked)
        );
        assert!(!doc.has_class(content, "content-hidden"));
    }

    #[test]
    fn test_disposed_controller_routes_nothing() {
        let mut doc = landing_doc();
        let mut page = controller(&mut doc, 375);
        let mut host = Host::new();

        let hamburger = doc.by_id("hamburger").expect("hamburger");
        page.dispose();
        page.click(&mut doc, &mut host, hamburger);
        let sidebar = doc.by_id("sidebar").expect("sidebar");
        assert!(!doc.has_class(sidebar, "active"));
        assert!(host.drain().is_empty());
    }

    #[test]
    fn test_empty_page_sets_up_without_behaviors() {
        let mut doc = Document::new();
        let stray = doc.append(doc.root(), "div");
        let mut page = controller(&mut doc, 375);
        let mut host = Host::new();

        // nothing is bound, nothing panics
        page.click(&mut doc, &mut host, stray);
        page.resize(&mut doc, &mut host, 1400);
        page.scroll(
            &mut doc,
            &ViewportRect {
                scroll_y: 0.0,
                height: 800.0,
            },
            &[],
        );
        assert!(host.drain().is_empty());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: PageConfig = serde_json::from_str("{}").expect("defaults apply");
        assert_eq!(config.breakpoint_px, BREAKPOINT_PX);
        assert!(config.gate.is_none());

        let config: PageConfig = serde_json::from_str(
            r#"{"breakpointPx": 900, "gate": {"expectedDigest": "ab"}}"#,
        )
        .expect("explicit values parse");
        assert_eq!(config.breakpoint_px, 900);
        let gate = config.gate.expect("gate config present");
        assert_eq!(gate.expected_digest, "ab");
        assert_eq!(gate.session_key, SESSION_KEY);
    }
}
