//! Outbound runtime endpoint contracts.
//!
//! # Responsibility
//! - Define the send-only endpoint used to push calls into the runtime.
//! - Provide a `std::sync::mpsc` backed endpoint for in-process runtimes.
//!
//! # Invariants
//! - `send` is fire-and-forget: it never blocks on the runtime and is never retried.
//! - Implementations must not call back into the relay from `send`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::mpsc::Sender;

/// Channel name used for intent traffic in both directions.
pub const INTENT_CHANNEL: &str = "gohana/intent";
/// Wire method name for host -> runtime import requests.
pub const METHOD_IMPORT_RESOURCE: &str = "importGohanaFile";

/// Host -> runtime call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum OutboundCall {
    /// Asks the runtime to import the referenced resource.
    #[serde(rename = "importGohanaFile")]
    ImportResource { resource_ref: String },
}

impl OutboundCall {
    /// Wire method name on the intent channel.
    pub fn method(&self) -> &'static str {
        match self {
            Self::ImportResource { .. } => METHOD_IMPORT_RESOURCE,
        }
    }
}

/// Delivery failure reported by an outbound endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Receiving side of the endpoint is gone.
    Disconnected,
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disconnected => write!(f, "runtime endpoint is disconnected"),
        }
    }
}

impl Error for SinkError {}

/// Send-only endpoint into one runtime instance.
pub trait RuntimeSink: Send + Sync {
    fn send(&self, call: OutboundCall) -> Result<(), SinkError>;
}

/// Runtime endpoint backed by an unbounded mpsc channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<OutboundCall>,
}

impl ChannelSink {
    pub fn new(sender: Sender<OutboundCall>) -> Self {
        Self { sender }
    }
}

impl RuntimeSink for ChannelSink {
    fn send(&self, call: OutboundCall) -> Result<(), SinkError> {
        self.sender.send(call).map_err(|_| SinkError::Disconnected)
    }
}
