//! Client-side password gate for the staff page.
//!
//! The gate is a deterrent, not real security: the verification digest ships
//! with the page, so all it guarantees is that the passphrase itself never
//! appears in the delivered code. Input is hashed with SHA-256, lowercase
//! hex encoded, and compared in constant time against the configured digest.
//! A successful check sets a session-scoped flag so the prompt is skipped
//! for the rest of the session; a new session requires re-entry.

use crate::host::{Host, HostEffect};
use marquee_core::{Document, KvStore, NodeId, FLAG_TRUE};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Session store key carrying the logged-in flag.
pub const SESSION_KEY: &str = "staffLoggedIn";
/// Milliseconds before a transient gate error is dismissed.
pub const ERROR_DISMISS_MS: u64 = 3000;

const ERROR_SHOW_CLASS: &str = "show";
const CONTENT_HIDDEN_CLASS: &str = "content-hidden";
const DISABLED_ATTR: &str = "disabled";
const VALUE_ATTR: &str = "value";

const IDLE_LABEL: &str = "Log in";
const BUSY_LABEL: &str = "Checking...";
const MSG_EMPTY: &str = "Please enter the password";
const MSG_MISMATCH: &str = "Incorrect password";
const MSG_FAILURE: &str = "Something went wrong, please try again";

/// Failure inside the digest primitive.
#[derive(Debug, Clone)]
pub struct DigestError {
    pub message: String,
}

impl DigestError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Injected one-way digest capability: the gate logic never touches the
/// cryptographic backend directly, so it is testable without one.
pub trait DigestProvider {
    /// Digest the input and return it lowercase hex encoded.
    fn digest_hex(&self, input: &[u8]) -> Result<String, DigestError>;
}

/// SHA-256 backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Provider;

impl DigestProvider for Sha256Provider {
    fn digest_hex(&self, input: &[u8]) -> Result<String, DigestError> {
        let mut hasher = Sha256::new();
        hasher.update(input);
        Ok(hex::encode(hasher.finalize()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatePhase {
    Locked,
    Checking,
    Unlocked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateConfig {
    /// Compiled-in expected digest, lowercase hex.
    pub expected_digest: String,
    #[serde(default = "default_session_key")]
    pub session_key: String,
}

fn default_session_key() -> String {
    SESSION_KEY.to_string()
}

impl GateConfig {
    pub fn new(expected_digest: impl Into<String>) -> Self {
        Self {
            expected_digest: expected_digest.into(),
            session_key: default_session_key(),
        }
    }
}

pub struct GateController {
    overlay: NodeId,
    content: NodeId,
    input: NodeId,
    button: NodeId,
    error: NodeId,
    phase: GatePhase,
    config: GateConfig,
    session: Box<dyn KvStore>,
    digest: Box<dyn DigestProvider>,
}

impl GateController {
    /// Discover the gate elements and restore the session. Pages without a
    /// gate get no controller; an already-authenticated session reveals the
    /// content immediately, with no digest computed.
    pub fn setup(
        doc: &mut Document,
        config: GateConfig,
        session: Box<dyn KvStore>,
        digest: Box<dyn DigestProvider>,
    ) -> Option<Self> {
        let (Some(overlay), Some(content), Some(input), Some(button), Some(error)) = (
            doc.by_id("passwordOverlay"),
            doc.by_id("mainContent"),
            doc.by_id("passwordInput"),
            doc.by_id("passwordBtn"),
            doc.by_id("passwordError"),
        ) else {
            debug!("gate elements absent, skipping gate setup");
            return None;
        };

        let mut gate = Self {
            overlay,
            content,
            input,
            button,
            error,
            phase: GatePhase::Locked,
            config,
            session,
            digest,
        };
        doc.set_text(gate.button, IDLE_LABEL);
        if gate.session.flag(&gate.config.session_key) {
            debug!("session flag present, revealing gated content");
            gate.reveal(doc);
            gate.phase = GatePhase::Unlocked;
        }
        Some(gate)
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn input(&self) -> NodeId {
        self.input
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    /// Run the password check against the input field's current value.
    /// Both the button click and the Enter key land here; anything but a
    /// Locked gate ignores the attempt, so a check already in flight (or a
    /// terminal Unlocked gate) cannot be re-entered.
    pub fn attempt_login(&mut self, doc: &mut Document, host: &mut Host) {
        if self.phase != GatePhase::Locked {
            return;
        }
        let value = doc.attr(self.input, VALUE_ATTR).unwrap_or("").to_string();
        if value.is_empty() {
            self.show_error(doc, host, MSG_EMPTY);
            return;
        }

        self.phase = GatePhase::Checking;
        doc.set_attr(self.button, DISABLED_ATTR, FLAG_TRUE);
        doc.set_text(self.button, BUSY_LABEL);

        match self.digest.digest_hex(value.as_bytes()) {
            Ok(hex) if digest_matches(&hex, &self.config.expected_digest) => {
                self.session.set(&self.config.session_key, FLAG_TRUE);
                self.reveal(doc);
                self.phase = GatePhase::Unlocked;
            }
            Ok(_) => {
                self.phase = GatePhase::Locked;
                self.show_error(doc, host, MSG_MISMATCH);
            }
            Err(err) => {
                warn!(error = err.message.as_str(), "gate digest computation failed");
                self.phase = GatePhase::Locked;
                self.show_error(doc, host, MSG_FAILURE);
            }
        }

        // always release the submit control, success included
        doc.remove_attr(self.button, DISABLED_ATTR);
        doc.set_text(self.button, IDLE_LABEL);
    }

    /// Called by the host when the error-dismiss delay elapses.
    pub fn dismiss_error(&self, doc: &mut Document) {
        doc.remove_class(self.error, ERROR_SHOW_CLASS);
    }

    fn show_error(&self, doc: &mut Document, host: &mut Host, message: &str) {
        doc.set_text(self.error, message);
        doc.add_class(self.error, ERROR_SHOW_CLASS);
        doc.set_attr(self.input, VALUE_ATTR, "");
        host.emit(HostEffect::Focus(self.input));
        host.emit(HostEffect::ScheduleErrorDismiss {
            after_ms: ERROR_DISMISS_MS,
        });
    }

    fn reveal(&self, doc: &mut Document) {
        doc.set_attr(self.overlay, "style", "display:none");
        doc.remove_class(self.content, CONTENT_HIDDEN_CLASS);
    }
}

impl std::fmt::Debug for GateController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateController")
            .field("phase", &self.phase)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Constant-time digest comparison; unequal lengths never match.
fn digest_matches(computed: &str, expected: &str) -> bool {
    computed.len() == expected.len()
        && bool::from(computed.as_bytes().ct_eq(expected.as_bytes()))
}
