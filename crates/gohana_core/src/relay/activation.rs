//! Activation event filtering and relay outcome types.

/// Host action tag recognized as an "open this resource" request.
pub const ACTION_VIEW: &str = "android.intent.action.VIEW";

/// Result of delivering one activation event to the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Action was not a view request or carried no resource reference.
    Ignored,
    /// Runtime was ready; the reference was handed to its endpoint.
    Forwarded,
    /// Runtime was ready but its endpoint rejected the call; nothing retained.
    Dropped,
    /// Runtime not ready; reference stored as the pending import.
    Buffered {
        /// Whether an earlier pending import was overwritten.
        replaced: bool,
    },
}

impl ActivationOutcome {
    /// Stable label used in logs and FFI responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::Forwarded => "forwarded",
            Self::Dropped => "dropped",
            Self::Buffered { replaced: false } => "buffered",
            Self::Buffered { replaced: true } => "buffered_replaced",
        }
    }
}

/// Result of one readiness signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyOutcome {
    /// Relay became ready; there was nothing pending.
    Ready,
    /// Relay became ready and handed the pending import to the runtime.
    DeliveredPending,
    /// Relay became ready but the endpoint rejected the pending import.
    DroppedPending,
    /// Relay became ready with no attached runtime; the pending import stays buffered.
    ReadyWithoutRuntime,
    /// Relay was already ready in this session; nothing happened.
    AlreadyReady,
}

impl ReadyOutcome {
    /// Stable label used in logs and FFI responses.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::DeliveredPending => "delivered_pending",
            Self::DroppedPending => "dropped_pending",
            Self::ReadyWithoutRuntime => "ready_without_runtime",
            Self::AlreadyReady => "already_ready",
        }
    }
}

/// Extracts the resource reference from an activation when it is an import request.
///
/// Returns `None` for unrecognized actions and for missing or blank references.
pub fn import_target<'a>(action: &str, resource_ref: Option<&'a str>) -> Option<&'a str> {
    if action != ACTION_VIEW {
        return None;
    }
    resource_ref.filter(|value| !value.trim().is_empty())
}
