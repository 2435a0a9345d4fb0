// File: ./src/error.rs
// Errors a request can fail with. The Display text is what callers see in
// the `error` field of a response.
use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    UnknownType(String),
    InvalidPayload { kind: String, reason: String },
    Serialization(String),
    Panicked(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::UnknownType(kind) => write!(f, "Unknown message type: {}", kind),
            EngineError::InvalidPayload { kind, reason } => {
                write!(f, "Invalid payload for {}: {}", kind, reason)
            }
            EngineError::Serialization(reason) => {
                write!(f, "Failed to serialize result: {}", reason)
            }
            EngineError::Panicked(msg) => write!(f, "Engine handler panicked: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}
