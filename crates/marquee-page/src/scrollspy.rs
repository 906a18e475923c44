//! Scroll-spy: highlight the nav entry of the section under the reader.
//!
//! Geometry lives in the core `spy` module; this controller owns the mapping
//! from section ids to sidebar nav links and keeps exactly one entry marked
//! `active`. Sections are reported by the host (it owns layout), the
//! controller only decides which entry wins.

use marquee_core::{active_section, fallback_section, Document, NodeId, SectionRect, ViewportRect};
use tracing::debug;

const ACTIVE_CLASS: &str = "active";

#[derive(Debug)]
pub struct ScrollSpy {
    entries: Vec<(String, NodeId)>,
}

impl ScrollSpy {
    /// Map `.sidebar-nav` fragment links to the section ids they point at.
    /// Pages without a nav or without fragment links get no spy.
    pub fn setup(doc: &Document) -> Option<Self> {
        let nav = doc.with_class("sidebar-nav").first().copied()?;
        let mut entries = Vec::new();
        for link in doc.descendants_with_tag(nav, "a") {
            let Some(href) = doc.attr(link, "href") else {
                continue;
            };
            let Some(fragment) = href.strip_prefix('#') else {
                continue;
            };
            if fragment.is_empty() {
                continue;
            }
            entries.push((fragment.to_string(), link));
        }
        if entries.is_empty() {
            debug!("no fragment nav links, skipping scroll-spy");
            return None;
        }
        Some(Self { entries })
    }

    /// Every scroll event: when a section intersects the band, its nav entry
    /// becomes the single active one. When nothing intersects, the previous
    /// highlight stays.
    pub fn on_scroll(
        &self,
        doc: &mut Document,
        viewport: &ViewportRect,
        sections: &[SectionRect],
    ) {
        if let Some(id) = active_section(viewport, sections) {
            self.apply(doc, id);
        }
    }

    /// Initial load: take the intersecting section, or fall back to the
    /// scroll-position scan so the page never starts without a highlight
    /// (unless it has no sections at all).
    pub fn prime(&self, doc: &mut Document, viewport: &ViewportRect, sections: &[SectionRect]) {
        if let Some(id) =
            active_section(viewport, sections).or_else(|| fallback_section(viewport, sections))
        {
            self.apply(doc, id);
        }
    }

    fn apply(&self, doc: &mut Document, id: &str) {
        for (section_id, link) in &self.entries {
            if section_id == id {
                doc.add_class(*link, ACTIVE_CLASS);
            } else {
                doc.remove_class(*link, ACTIVE_CLASS);
            }
        }
    }
}
