//! Hamburger navigation menu.
//!
//! The menu is three elements moving together: the `#hamburger` button, the
//! `#sidebar` panel, and the `#overlay` backdrop, all marked with the
//! `active` class while open. Body scrolling is locked while the sidebar is
//! open. The blog entry (`.sidebar-nav .has-submenu`) opens an inline
//! submenu on narrow viewports instead of navigating.

use crate::host::{Host, HostEffect};
use marquee_core::{Document, NodeId, ViewportMode};
use tracing::debug;

const ACTIVE_CLASS: &str = "active";

/// Milliseconds the host waits before revealing an opened submenu, so the
/// open animation has settled.
pub const SUBMENU_REVEAL_DELAY_MS: u64 = 150;

#[derive(Debug)]
pub struct MenuController {
    hamburger: NodeId,
    sidebar: NodeId,
    overlay: NodeId,
    links: Vec<NodeId>,
    submenu_item: Option<NodeId>,
    submenu_link: Option<NodeId>,
}

impl MenuController {
    /// Discover the menu elements. Pages without a hamburger menu get no
    /// controller and no error.
    pub fn setup(doc: &Document) -> Option<Self> {
        let hamburger = doc.by_id("hamburger");
        let sidebar = doc.by_id("sidebar");
        let overlay = doc.by_id("overlay");
        let (Some(hamburger), Some(sidebar), Some(overlay)) = (hamburger, sidebar, overlay)
        else {
            debug!("hamburger menu elements absent, skipping menu setup");
            return None;
        };

        let nav = doc.descendant_with_class(sidebar, "sidebar-nav");
        let links = nav
            .map(|nav| doc.descendants_with_tag(nav, "a"))
            .unwrap_or_default();
        let submenu_item = nav.and_then(|nav| doc.descendant_with_class(nav, "has-submenu"));
        let submenu_link =
            submenu_item.and_then(|item| doc.descendants_with_tag(item, "a").first().copied());

        Some(Self {
            hamburger,
            sidebar,
            overlay,
            links,
            submenu_item,
            submenu_link,
        })
    }

    pub fn hamburger(&self) -> NodeId {
        self.hamburger
    }

    pub fn overlay(&self) -> NodeId {
        self.overlay
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    pub fn submenu_link(&self) -> Option<NodeId> {
        self.submenu_link
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.sidebar, ACTIVE_CLASS)
    }

    /// Hamburger click: flip the menu and the scroll lock.
    pub fn toggle(&mut self, doc: &mut Document, host: &mut Host) {
        doc.toggle_class(self.hamburger, ACTIVE_CLASS);
        let open = doc.toggle_class(self.sidebar, ACTIVE_CLASS);
        doc.toggle_class(self.overlay, ACTIVE_CLASS);
        host.emit(HostEffect::SetScrollLock(open));
    }

    pub fn close(&mut self, doc: &mut Document, host: &mut Host) {
        doc.remove_class(self.hamburger, ACTIVE_CLASS);
        doc.remove_class(self.sidebar, ACTIVE_CLASS);
        doc.remove_class(self.overlay, ACTIVE_CLASS);
        host.emit(HostEffect::SetScrollLock(false));
    }

    /// Sidebar link click: close the menu on narrow viewports, except for
    /// links whose parent item carries a submenu.
    pub fn on_link_click(
        &mut self,
        doc: &mut Document,
        host: &mut Host,
        link: NodeId,
        mode: ViewportMode,
    ) {
        if !mode.is_narrow() {
            return;
        }
        if let Some(parent) = doc.parent(link) {
            if doc.has_class(parent, "has-submenu") {
                return;
            }
        }
        self.close(doc, host);
    }

    /// Submenu link click. Returns whether the click was intercepted (narrow
    /// only); opening the submenu schedules a delayed reveal of its last
    /// entry.
    pub fn toggle_submenu(
        &mut self,
        doc: &mut Document,
        host: &mut Host,
        mode: ViewportMode,
    ) -> bool {
        let Some(item) = self.submenu_item else {
            return false;
        };
        if !mode.is_narrow() {
            return false;
        }
        let opened = doc.toggle_class(item, ACTIVE_CLASS);
        if opened {
            if let Some(last) = doc
                .descendant_with_class(item, "submenu")
                .and_then(|submenu| doc.descendants_with_tag(submenu, "li").last().copied())
            {
                host.emit(HostEffect::ScrollIntoView {
                    node: last,
                    delay_ms: SUBMENU_REVEAL_DELAY_MS,
                });
            }
        }
        true
    }

    /// Wide viewports render the desktop navigation: menu closed, submenu
    /// collapsed, scroll released.
    pub fn on_wide(&mut self, doc: &mut Document, host: &mut Host) {
        self.close(doc, host);
        if let Some(item) = self.submenu_item {
            doc.remove_class(item, ACTIVE_CLASS);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_doc() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let hamburger = doc.append(doc.root(), "button");
        doc.set_id(hamburger, "hamburger");
        let sidebar = doc.append(doc.root(), "aside");
        doc.set_id(sidebar, "sidebar");
        let overlay = doc.append(doc.root(), "div");
        doc.set_id(overlay, "overlay");
        let nav = doc.append(sidebar, "nav");
        doc.add_class(nav, "sidebar-nav");
        (doc, hamburger, sidebar, overlay)
    }

    #[test]
    fn test_setup_skips_silently_when_elements_missing() {
        let doc = Document::new();
        assert!(MenuController::setup(&doc).is_none());
    }

    #[test]
    fn test_toggle_moves_all_three_elements_and_locks_scroll() {
        let (mut doc, hamburger, sidebar, overlay) = menu_doc();
        let mut menu = MenuController::setup(&doc).expect("menu elements present");
        let mut host = Host::new();

        menu.toggle(&mut doc, &mut host);
        assert!(doc.has_class(hamburger, "active"));
        assert!(doc.has_class(sidebar, "active"));
        assert!(doc.has_class(overlay, "active"));
        assert_eq!(host.drain(), vec![HostEffect::SetScrollLock(true)]);

        menu.toggle(&mut doc, &mut host);
        assert!(!menu.is_open(&doc));
        assert_eq!(host.drain(), vec![HostEffect::SetScrollLock(false)]);
    }

    #[test]
    fn test_narrow_link_click_closes_except_submenu_parents() {
        let (mut doc, _, sidebar, _) = menu_doc();
        let nav = doc.descendant_with_class(sidebar, "sidebar-nav").expect("nav");
        let plain = doc.append(nav, "li");
        let plain_link = doc.append(plain, "a");
        let blog = doc.append(nav, "li");
        doc.add_class(blog, "has-submenu");
        let blog_link = doc.append(blog, "a");

        let mut menu = MenuController::setup(&doc).expect("menu elements present");
        let mut host = Host::new();
        menu.toggle(&mut doc, &mut host);

        menu.on_link_click(&mut doc, &mut host, blog_link, ViewportMode::Narrow);
        assert!(menu.is_open(&doc), "submenu parent link must not close the menu");

        menu.on_link_click(&mut doc, &mut host, plain_link, ViewportMode::Narrow);
        assert!(!menu.is_open(&doc));

        menu.toggle(&mut doc, &mut host);
        menu.on_link_click(&mut doc, &mut host, plain_link, ViewportMode::Wide);
        assert!(menu.is_open(&doc), "wide viewports never auto-close");
    }

    #[test]
    fn test_submenu_toggle_is_narrow_only_and_reveals_last_entry() {
        let (mut doc, _, sidebar, _) = menu_doc();
        let nav = doc.descendant_with_class(sidebar, "sidebar-nav").expect("nav");
        let blog = doc.append(nav, "li");
        doc.add_class(blog, "has-submenu");
        doc.append(blog, "a");
        let submenu = doc.append(blog, "ul");
        doc.add_class(submenu, "submenu");
        doc.append(submenu, "li");
        let last = doc.append(submenu, "li");

        let mut menu = MenuController::setup(&doc).expect("menu elements present");
        let mut host = Host::new();

        assert!(!menu.toggle_submenu(&mut doc, &mut host, ViewportMode::Wide));
        assert!(!doc.has_class(blog, "active"));

        assert!(menu.toggle_submenu(&mut doc, &mut host, ViewportMode::Narrow));
        assert!(doc.has_class(blog, "active"));
        assert_eq!(
            host.drain(),
            vec![HostEffect::ScrollIntoView {
                node: last,
                delay_ms: SUBMENU_REVEAL_DELAY_MS,
            }]
        );

        // closing emits no reveal
        assert!(menu.toggle_submenu(&mut doc, &mut host, ViewportMode::Narrow));
        assert!(host.drain().is_empty());
    }

    #[test]
    fn test_wide_reset_closes_menu_and_submenu() {
        let (mut doc, _, sidebar, _) = menu_doc();
        let nav = doc.descendant_with_class(sidebar, "sidebar-nav").expect("nav");
        let blog = doc.append(nav, "li");
        doc.add_class(blog, "has-submenu");
        doc.append(blog, "a");

        let mut menu = MenuController::setup(&doc).expect("menu elements present");
        let mut host = Host::new();
        menu.toggle(&mut doc, &mut host);
        menu.toggle_submenu(&mut doc, &mut host, ViewportMode::Narrow);
        host.drain();

        menu.on_wide(&mut doc, &mut host);
        assert!(!menu.is_open(&doc));
        assert!(!doc.has_class(blog, "active"));
        assert_eq!(host.drain(), vec![HostEffect::SetScrollLock(false)]);
    }
}
