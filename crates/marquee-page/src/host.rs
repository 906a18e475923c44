//! Host effect queue.
//!
//! Anything a behavior needs from the environment beyond the element tree
//! (animated scrolling, address-bar updates, focus, timers, scroll locking)
//! is emitted as a value for the host to apply, in emission order. The host
//! drives timers: a `ScheduleErrorDismiss` effect is the request, the host
//! calls back into the gate's `dismiss_error` when the delay elapses.

use marquee_core::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    /// Smooth-scroll the viewport so the node's top edge is in view.
    ScrollToNode(NodeId),
    /// Update the address bar to the fragment without a reloading navigation.
    PushAddress(String),
    /// Lock or release body scrolling while the menu overlay is open.
    SetScrollLock(bool),
    /// Move input focus to the node.
    Focus(NodeId),
    /// Dismiss the gate error message after the delay.
    ScheduleErrorDismiss { after_ms: u64 },
    /// Reveal the node inside the viewport after the delay (submenu open).
    ScrollIntoView { node: NodeId, delay_ms: u64 },
}

/// FIFO queue of pending effects.
#[derive(Debug, Default)]
pub struct Host {
    queue: Vec<HostEffect>,
}

impl Host {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, effect: HostEffect) {
        self.queue.push(effect);
    }

    /// Pending effects without consuming them.
    pub fn effects(&self) -> &[HostEffect] {
        &self.queue
    }

    /// Take every pending effect, oldest first.
    pub fn drain(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.queue)
    }
}
