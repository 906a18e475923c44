//! Smooth in-page navigation.
//!
//! Clicks on same-page fragment links are intercepted: instead of the
//! default jump the host is asked to animate the scroll and to update the
//! address bar without adding a reloading navigation entry. Bare `#` and
//! empty hrefs keep their default behavior; fragments without a matching
//! element scroll nowhere.

use crate::host::{Host, HostEffect};
use marquee_core::{Document, NodeId};

#[derive(Debug)]
pub struct SmoothNav {
    links: Vec<NodeId>,
}

impl SmoothNav {
    /// All fragment links on the page. An empty scan is fine: the behavior
    /// simply never fires.
    pub fn setup(doc: &Document) -> Self {
        let links = doc.select(|d, n| {
            d.tag(n) == "a"
                && d.attr(n, "href")
                    .is_some_and(|href| href.starts_with('#'))
        });
        Self { links }
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// Fragment link click. Returns whether the default jump was cancelled.
    pub fn on_click(&self, doc: &Document, host: &mut Host, link: NodeId) -> bool {
        let Some(href) = doc.attr(link, "href") else {
            return false;
        };
        if href == "#" || href.is_empty() {
            return false;
        }
        let href = href.to_string();
        if let Some(target) = doc.by_id(&href[1..]) {
            host.emit(HostEffect::ScrollToNode(target));
            host.emit(HostEffect::PushAddress(href));
        }
        true
    }
}
