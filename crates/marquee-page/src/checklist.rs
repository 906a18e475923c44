//! Persisted packing checklist.
//!
//! Each checkbox carries its persistence key in `data-item`; the checked
//! flag round-trips through the injected durable store as the literal
//! `"true"`/`"false"`. The containing `.checklist-item` mirrors the state
//! with a `checked` class. `reset` is the debug entry point that wipes every
//! stored key and the visual state with it.

use marquee_core::{Document, KvStore, NodeId, FLAG_TRUE};
use tracing::debug;

const CHECKED_CLASS: &str = "checked";
const CHECKED_ATTR: &str = "checked";

#[derive(Debug)]
struct ChecklistItem {
    input: NodeId,
    container: NodeId,
    key: String,
}

pub struct Checklist {
    items: Vec<ChecklistItem>,
    store: Box<dyn KvStore>,
}

impl Checklist {
    /// Scan checkbox inputs inside `.checklist-item` containers and restore
    /// their saved state from the store. Pages without a checklist get no
    /// controller.
    pub fn setup(doc: &mut Document, store: Box<dyn KvStore>) -> Option<Self> {
        let mut items = Vec::new();
        for input in doc.with_attr("data-item") {
            if doc.tag(input) != "input" {
                continue;
            }
            let Some(container) = doc.parent(input).filter(|p| doc.has_class(*p, "checklist-item"))
            else {
                continue;
            };
            let key = doc
                .attr(input, "data-item")
                .unwrap_or_default()
                .to_string();
            if key.is_empty() {
                continue;
            }
            items.push(ChecklistItem {
                input,
                container,
                key,
            });
        }
        if items.is_empty() {
            debug!("no checklist items, skipping checklist setup");
            return None;
        }

        // restore persisted state before any interaction
        for item in &items {
            if store.flag(&item.key) {
                doc.set_attr(item.input, CHECKED_ATTR, FLAG_TRUE);
                doc.add_class(item.container, CHECKED_CLASS);
            }
        }
        Some(Self { items, store })
    }

    pub fn inputs(&self) -> Vec<NodeId> {
        self.items.iter().map(|i| i.input).collect()
    }

    pub fn is_checked(&self, doc: &Document, input: NodeId) -> bool {
        doc.has_attr(input, CHECKED_ATTR)
    }

    /// A change event on a checkbox: flip its state, write it through to the
    /// store, and mirror it on the container class.
    pub fn on_change(&mut self, doc: &mut Document, input: NodeId) {
        let Some(item) = self.items.iter().find(|i| i.input == input) else {
            return;
        };
        let now_checked = !doc.has_attr(item.input, CHECKED_ATTR);
        if now_checked {
            doc.set_attr(item.input, CHECKED_ATTR, FLAG_TRUE);
            doc.add_class(item.container, CHECKED_CLASS);
        } else {
            doc.remove_attr(item.input, CHECKED_ATTR);
            doc.remove_class(item.container, CHECKED_CLASS);
        }
        self.store
            .set(&item.key, if now_checked { "true" } else { "false" });
    }

    /// Debug entry point: clear every persisted entry and its visual state.
    pub fn reset(&mut self, doc: &mut Document) {
        for item in &self.items {
            self.store.remove(&item.key);
            doc.remove_attr(item.input, CHECKED_ATTR);
            doc.remove_class(item.container, CHECKED_CLASS);
        }
    }
}

impl std::fmt::Debug for Checklist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Checklist")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}
