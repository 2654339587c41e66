//! Pending-import state machine for one host process.
//!
//! # Responsibility
//! - Hold at most one pending import while the runtime is not ready.
//! - Forward imports to the attached runtime once it signals readiness.
//!
//! # Invariants
//! - `pending`, `readiness` and the attached runtime are guarded by one lock.
//! - Take/clear/send of the pending import happens under that lock, so a
//!   concurrent activation is never lost to the handoff or delivered twice.
//! - A second activation before readiness overwrites the first (last-write-wins).
//! - Readiness is monotonic within one runtime session.
//! - Relay operations never fail and never panic; delivery is fire-and-forget.

use crate::logging::describe_resource_ref;
use crate::relay::activation::{import_target, ActivationOutcome, ReadyOutcome};
use crate::relay::sink::{OutboundCall, RuntimeSink};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Identifier of one attached runtime instance.
pub type SessionId = Uuid;

/// Runtime readiness within the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Readiness {
    #[default]
    NotReady,
    Ready,
}

struct AttachedRuntime {
    session_id: SessionId,
    sink: Arc<dyn RuntimeSink>,
}

#[derive(Default)]
struct RelayState {
    readiness: Readiness,
    pending: Option<String>,
    runtime: Option<AttachedRuntime>,
}

/// Relay that defers external open requests until the runtime is ready.
///
/// One instance per host process; share it with `Arc` between the activation
/// entry point and the runtime's inbound channel handler.
#[derive(Default)]
pub struct IntentRelay {
    state: Mutex<RelayState>,
}

impl IntentRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the outbound endpoint of a new runtime instance.
    ///
    /// Starts a new session in `NotReady`. A pending import is kept and will
    /// be delivered when the new runtime signals readiness.
    pub fn attach_runtime(&self, sink: Arc<dyn RuntimeSink>) -> SessionId {
        let session_id = Uuid::new_v4();
        let mut state = self.lock();
        if let Some(previous) = state.runtime.as_ref() {
            info!(
                "event=runtime_detach module=relay status=replaced session={}",
                previous.session_id
            );
        }
        state.readiness = Readiness::NotReady;
        state.runtime = Some(AttachedRuntime { session_id, sink });
        info!(
            "event=runtime_attach module=relay status=ok session={} pending={}",
            session_id,
            state.pending.is_some()
        );
        session_id
    }

    /// Drops the current runtime endpoint and returns to `NotReady`.
    ///
    /// Returns the ended session, or `None` when nothing was attached.
    pub fn detach_runtime(&self) -> Option<SessionId> {
        let mut state = self.lock();
        state.readiness = Readiness::NotReady;
        let detached = state.runtime.take().map(|runtime| runtime.session_id);
        if let Some(session_id) = detached {
            info!(
                "event=runtime_detach module=relay status=ok session={}",
                session_id
            );
        }
        detached
    }

    /// Handles one host activation event.
    ///
    /// Only view actions with a non-blank reference are considered. When the
    /// runtime is ready the reference is forwarded immediately and not kept;
    /// otherwise it becomes the pending import, replacing any earlier one.
    pub fn on_activation(&self, action: &str, resource_ref: Option<&str>) -> ActivationOutcome {
        let Some(target) = import_target(action, resource_ref) else {
            debug!(
                "event=activation module=relay status=ignored has_ref={}",
                resource_ref.is_some()
            );
            return ActivationOutcome::Ignored;
        };

        let mut guard = self.lock();
        let state = &mut *guard;
        if state.readiness == Readiness::Ready {
            if let Some(runtime) = state.runtime.as_ref() {
                return if forward(runtime, target.to_string()) {
                    ActivationOutcome::Forwarded
                } else {
                    ActivationOutcome::Dropped
                };
            }
        }

        let replaced = state.pending.replace(target.to_string()).is_some();
        info!(
            "event=activation module=relay status=buffered replaced={} {}",
            replaced,
            describe_resource_ref(target)
        );
        ActivationOutcome::Buffered { replaced }
    }

    /// Handles the runtime's readiness handshake.
    ///
    /// The first call in a session flips readiness and hands over the pending
    /// import, if any. Later calls are no-ops and never re-deliver.
    pub fn on_runtime_ready(&self) -> ReadyOutcome {
        let mut guard = self.lock();
        let state = &mut *guard;
        if state.readiness == Readiness::Ready {
            debug!("event=runtime_ready module=relay status=already_ready");
            return ReadyOutcome::AlreadyReady;
        }
        state.readiness = Readiness::Ready;

        let Some(runtime) = state.runtime.as_ref() else {
            warn!(
                "event=runtime_ready module=relay status=no_runtime pending={}",
                state.pending.is_some()
            );
            return ReadyOutcome::ReadyWithoutRuntime;
        };
        info!(
            "event=runtime_ready module=relay status=ok session={}",
            runtime.session_id
        );

        match state.pending.take() {
            None => ReadyOutcome::Ready,
            Some(pending) => {
                if forward(runtime, pending) {
                    ReadyOutcome::DeliveredPending
                } else {
                    ReadyOutcome::DroppedPending
                }
            }
        }
    }

    /// Returns a copy of the pending import, if any.
    pub fn pending_import(&self) -> Option<String> {
        self.lock().pending.clone()
    }

    pub fn readiness(&self) -> Readiness {
        self.lock().readiness
    }

    pub fn is_ready(&self) -> bool {
        self.readiness() == Readiness::Ready
    }

    /// Returns the session of the attached runtime.
    pub fn session_id(&self) -> Option<SessionId> {
        self.lock().runtime.as_ref().map(|runtime| runtime.session_id)
    }

    // State is consistent after every statement, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, RelayState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn forward(runtime: &AttachedRuntime, resource_ref: String) -> bool {
    let described = describe_resource_ref(&resource_ref);
    match runtime.sink.send(OutboundCall::ImportResource { resource_ref }) {
        Ok(()) => {
            info!(
                "event=import_forward module=relay status=ok session={} {}",
                runtime.session_id, described
            );
            true
        }
        Err(err) => {
            warn!(
                "event=import_forward module=relay status=dropped session={} {} error={}",
                runtime.session_id, described, err
            );
            false
        }
    }
}
