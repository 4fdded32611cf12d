//! IPC message protocol definitions
//!
//! All messages are JSON-encoded, prefixed with a 4-byte little-endian
//! length. The UI drives every session control through these requests;
//! the daemon never acts on its own.

use serde::{Deserialize, Serialize};

/// Requests from UI to daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Ping to check connectivity
    Ping,

    /// Request current daemon status
    GetStatus,

    /// Start a recording session
    Start,

    /// Stop the active recording session
    Stop,

    /// Append a line to the transcript
    AddText { text: String },

    /// Remove all transcript lines
    ClearTranscript,

    /// Fetch the full transcript
    GetTranscript,
}

/// Responses from daemon to UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Pong response to ping
    Pong,

    /// Current daemon status
    Status(DaemonStatus),

    /// Command accepted
    Ack,

    /// Full transcript contents
    Transcript { lines: Vec<String> },

    /// Error response
    Error { code: String, message: String },
}

/// Full daemon status snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonStatus {
    /// Daemon version
    pub version: String,

    /// Whether a recording session is active
    pub recording: bool,

    /// Number of transcript lines held
    pub transcript_lines: usize,

    /// Uptime in seconds
    pub uptime_secs: u64,
}

impl Default for DaemonStatus {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            recording: false,
            transcript_lines: 0,
            uptime_secs: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let req = Request::AddText {
            text: "note1".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("add_text"));
        assert!(json.contains("note1"));
    }

    #[test]
    fn test_request_deserialization() {
        let json = r#"{"type":"start"}"#;
        let req: Request = serde_json::from_str(json).unwrap();
        assert!(matches!(req, Request::Start));
    }

    #[test]
    fn test_response_serialization() {
        let resp = Response::Status(DaemonStatus::default());
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("status"));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_transcript_response_roundtrip() {
        let resp = Response::Transcript {
            lines: vec!["a".into(), "b".into()],
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: Response = serde_json::from_str(&json).unwrap();
        match back {
            Response::Transcript { lines } => assert_eq!(lines, ["a", "b"]),
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
