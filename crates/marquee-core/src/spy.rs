//! Scroll-spy band geometry.
//!
//! A section is "active" while it intersects the observation band: the
//! vertical slice of the viewport between 20% and 70% of its height. At
//! initial load nothing may intersect yet, so a scroll-position fallback
//! scan picks a starting section.

use crate::viewport::ViewportRect;
use serde::{Deserialize, Serialize};

/// Top of the observation band, as a fraction of viewport height.
pub const SPY_BAND_TOP: f64 = 0.20;
/// Bottom of the observation band, as a fraction of viewport height.
pub const SPY_BAND_BOTTOM: f64 = 0.70;

/// A labeled section's extent in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRect {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionRect {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn band(viewport: &ViewportRect) -> (f64, f64) {
    (
        viewport.scroll_y + viewport.height * SPY_BAND_TOP,
        viewport.scroll_y + viewport.height * SPY_BAND_BOTTOM,
    )
}

/// The id of the active section: the first one in document order whose
/// extent intersects the band. `None` when nothing intersects.
pub fn active_section<'a>(
    viewport: &ViewportRect,
    sections: &'a [SectionRect],
) -> Option<&'a str> {
    let (band_top, band_bottom) = band(viewport);
    sections
        .iter()
        .find(|s| s.top < band_bottom && s.bottom() > band_top)
        .map(|s| s.id.as_str())
}

/// Initial-load scan: the last section whose top edge sits at or above the
/// band top. Used only when no section intersects the band yet.
pub fn fallback_section<'a>(
    viewport: &ViewportRect,
    sections: &'a [SectionRect],
) -> Option<&'a str> {
    let (band_top, _) = band(viewport);
    sections
        .iter()
        .rev()
        .find(|s| s.top <= band_top)
        .map(|s| s.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_sections() -> Vec<SectionRect> {
        vec![
            SectionRect::new("a", 0.0, 500.0),
            SectionRect::new("b", 500.0, 500.0),
            SectionRect::new("c", 1000.0, 500.0),
        ]
    }

    #[test]
    fn test_only_band_intersecting_section_is_active() {
        let sections = three_sections();
        // band [520, 820] touches b only
        let viewport = ViewportRect {
            scroll_y: 400.0,
            height: 600.0,
        };
        assert_eq!(active_section(&viewport, &sections), Some("b"));

        // scroll past b entirely: band [1360, 1860] covers only c
        let viewport = ViewportRect {
            scroll_y: 1160.0,
            height: 1000.0,
        };
        assert_eq!(active_section(&viewport, &sections), Some("c"));
    }

    #[test]
    fn test_tie_goes_to_first_section_in_document_order() {
        let sections = three_sections();
        // band [700, 1200] touches both b and c
        let viewport = ViewportRect {
            scroll_y: 500.0,
            height: 1000.0,
        };
        assert_eq!(active_section(&viewport, &sections), Some("b"));
    }

    #[test]
    fn test_no_intersection_yields_none() {
        let sections = three_sections();
        let viewport = ViewportRect {
            scroll_y: 5000.0,
            height: 800.0,
        };
        assert_eq!(active_section(&viewport, &sections), None);
    }

    #[test]
    fn test_fallback_picks_last_section_above_band_top() {
        let sections = three_sections();
        let viewport = ViewportRect {
            scroll_y: 900.0,
            height: 1000.0,
        };
        // band top at 1100: sections a (0) and b (500) and c (1000) all start
        // at or above it; the last one wins.
        assert_eq!(fallback_section(&viewport, &sections), Some("c"));

        let top_of_page = ViewportRect {
            scroll_y: 0.0,
            height: 1000.0,
        };
        assert_eq!(fallback_section(&top_of_page, &sections), Some("a"));
    }

    #[test]
    fn test_empty_section_list_is_a_no_op() {
        let viewport = ViewportRect {
            scroll_y: 0.0,
            height: 800.0,
        };
        assert_eq!(active_section(&viewport, &[]), None);
        assert_eq!(fallback_section(&viewport, &[]), None);
    }
}
