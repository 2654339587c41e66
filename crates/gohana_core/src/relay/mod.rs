//! Intent relay between host activations and the embedded runtime.
//!
//! The relay buffers at most one external "open resource" request until the
//! runtime announces readiness, then forwards it exactly once. Once ready,
//! activations are forwarded immediately.

pub mod activation;
pub mod intent_relay;
pub mod sink;
