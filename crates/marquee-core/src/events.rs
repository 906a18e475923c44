//! Event subscription registry.
//!
//! Instead of closures captured by ad-hoc listeners, every behavior
//! registers an explicit binding of (node, event kind) to a behavior tag the
//! controller routes on. Dispatch walks the table in registration order, so
//! multiple handlers on one node fire in the order they were bound.
//! `clear` is the disposer: a cleared registry routes nothing.

use crate::dom::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Change,
    KeyEnter,
}

#[derive(Debug, Clone)]
pub struct Binding<B> {
    pub node: NodeId,
    pub kind: EventKind,
    pub behavior: B,
}

#[derive(Debug, Clone)]
pub struct Bindings<B> {
    entries: Vec<Binding<B>>,
}

impl<B> Bindings<B> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn bind(&mut self, node: NodeId, kind: EventKind, behavior: B) {
        self.entries.push(Binding {
            node,
            kind,
            behavior,
        });
    }

    /// Behaviors bound to this (node, kind) pair, in registration order.
    pub fn matches(&self, node: NodeId, kind: EventKind) -> impl Iterator<Item = &B> {
        self.entries
            .iter()
            .filter(move |b| b.node == node && b.kind == kind)
            .map(|b| &b.behavior)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dispose of every subscription.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<B> Default for Bindings<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_dispatch_preserves_registration_order() {
        let mut doc = Document::new();
        let node = doc.append(doc.root(), "a");
        let mut bindings: Bindings<&str> = Bindings::new();
        bindings.bind(node, EventKind::Click, "first");
        bindings.bind(node, EventKind::Click, "second");
        bindings.bind(node, EventKind::Change, "other-kind");

        let hits: Vec<&str> = bindings.matches(node, EventKind::Click).copied().collect();
        assert_eq!(hits, vec!["first", "second"]);
    }

    #[test]
    fn test_cleared_registry_routes_nothing() {
        let mut doc = Document::new();
        let node = doc.append(doc.root(), "button");
        let mut bindings: Bindings<u32> = Bindings::new();
        bindings.bind(node, EventKind::Click, 1);
        bindings.clear();
        assert!(bindings.is_empty());
        assert_eq!(bindings.matches(node, EventKind::Click).count(), 0);
    }
}
