//! Broadcast message types and header stamping

use crate::status::KernelStatus;
use core_types::{ClientId, MessageId};
use serde::{Deserialize, Serialize};

/// Header identifying one emitted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    /// Unique identifier for this message
    pub msg_id: MessageId,
    /// Client id of the connection that emitted the message
    pub session: ClientId,
    /// User the connection was opened as
    pub username: String,
}

impl MessageHeader {
    /// Creates a header with a fresh message id
    pub fn new(session: ClientId, username: impl Into<String>) -> Self {
        Self {
            msg_id: MessageId::new(),
            session,
            username: username.into(),
        }
    }
}

/// Parent header correlating a broadcast with its originating request
///
/// `msg_id` holds the identifier of the most recent outbound request
/// on the emitting kernel, or the empty string when no request has
/// been issued yet. `session` always equals the emitting kernel's
/// client id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentHeader {
    /// Identifier of the correlated request ("" if none)
    pub msg_id: String,
    /// Client id of the emitting connection
    pub session: ClientId,
}

impl ParentHeader {
    /// Stamps a parent header from the correlation state of a kernel
    pub fn stamp(session: ClientId, last_request: impl Into<String>) -> Self {
        Self {
            msg_id: last_request.into(),
            session,
        }
    }

    /// Returns whether this broadcast correlates to a known request
    pub fn is_correlated(&self) -> bool {
        !self.msg_id.is_empty()
    }
}

/// Payload of a broadcast message, tagged with its wire message type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msg_type", content = "content", rename_all = "snake_case")]
pub enum BroadcastContent {
    /// Kernel execution-state change
    Status { execution_state: KernelStatus },
    /// Echo of code submitted for execution
    ExecuteInput { code: String, execution_count: u64 },
}

impl BroadcastContent {
    /// Returns the wire `msg_type` string for this payload
    pub fn kind(&self) -> &'static str {
        match self {
            BroadcastContent::Status { .. } => "status",
            BroadcastContent::ExecuteInput { .. } => "execute_input",
        }
    }
}

/// An out-of-band broadcast message (source term: "iopub message")
///
/// Broadcasts represent kernel status or execution output, as opposed
/// to a direct reply to a specific request. They fan out to every
/// listener on every layer of the emulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    /// Identity of this emission
    pub header: MessageHeader,
    /// Correlation to the most recent request on the emitting kernel
    pub parent_header: ParentHeader,
    /// Message payload, tagged with the wire message type
    #[serde(flatten)]
    pub content: BroadcastContent,
}

impl BroadcastMessage {
    /// Creates a broadcast stamped for the given connection
    pub fn new(
        session: ClientId,
        username: impl Into<String>,
        last_request: impl Into<String>,
        content: BroadcastContent,
    ) -> Self {
        Self {
            header: MessageHeader::new(session, username),
            parent_header: ParentHeader::stamp(session, last_request),
            content,
        }
    }

    /// Returns the wire `msg_type` string for this message
    pub fn kind(&self) -> &'static str {
        self.content.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_gets_fresh_msg_id() {
        let client = ClientId::new();
        let a = MessageHeader::new(client, "tester");
        let b = MessageHeader::new(client, "tester");
        assert_ne!(a.msg_id, b.msg_id);
        assert_eq!(a.session, client);
    }

    #[test]
    fn test_parent_header_empty_when_uncorrelated() {
        let parent = ParentHeader::stamp(ClientId::new(), "");
        assert!(!parent.is_correlated());
        assert_eq!(parent.msg_id, "");
    }

    #[test]
    fn test_parent_header_correlated() {
        let request = MessageId::new();
        let parent = ParentHeader::stamp(ClientId::new(), request.as_uuid().to_string());
        assert!(parent.is_correlated());
        assert_eq!(parent.msg_id, request.as_uuid().to_string());
    }

    #[test]
    fn test_broadcast_sessions_match() {
        let client = ClientId::new();
        let message = BroadcastMessage::new(
            client,
            "tester",
            "",
            BroadcastContent::Status {
                execution_state: KernelStatus::Busy,
            },
        );
        assert_eq!(message.header.session, client);
        assert_eq!(message.parent_header.session, client);
        assert_eq!(message.kind(), "status");
    }

    #[test]
    fn test_status_message_wire_shape() {
        let message = BroadcastMessage::new(
            ClientId::new(),
            "tester",
            "",
            BroadcastContent::Status {
                execution_state: KernelStatus::Busy,
            },
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["msg_type"], "status");
        assert_eq!(json["content"]["execution_state"], "busy");
        assert_eq!(json["parent_header"]["msg_id"], "");
    }

    #[test]
    fn test_execute_input_wire_shape() {
        let message = BroadcastMessage::new(
            ClientId::new(),
            "tester",
            "abc",
            BroadcastContent::ExecuteInput {
                code: "print(1)".to_string(),
                execution_count: 3,
            },
        );
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["msg_type"], "execute_input");
        assert_eq!(json["content"]["code"], "print(1)");
        assert_eq!(json["content"]["execution_count"], 3);
        assert_eq!(json["parent_header"]["msg_id"], "abc");
    }
}
