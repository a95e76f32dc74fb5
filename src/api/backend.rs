use std::fmt;

use async_trait::async_trait;

use super::types::GreetResponse;

/// Errors that can occur while asking the backend for a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GreetError {
    /// Client could not be built (bad TLS setup, invalid timeout).
    Config(String),
    /// Network-level failure (connection refused, DNS, timeout).
    Network(String),
    /// The backend answered with a non-2xx status.
    Status { status: u16, body: String },
    /// The body was not JSON, or had no string `message` field.
    Decode(String),
}

impl fmt::Display for GreetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreetError::Config(msg) => write!(f, "client error: {msg}"),
            GreetError::Network(msg) => write!(f, "network error: {msg}"),
            GreetError::Status { status, body } if body.is_empty() => {
                write!(f, "backend returned HTTP {status}")
            }
            GreetError::Status { status, body } => {
                write!(f, "backend returned HTTP {status}: {body}")
            }
            GreetError::Decode(msg) => write!(f, "unexpected reply: {msg}"),
        }
    }
}

impl std::error::Error for GreetError {}

/// Anything that can turn a topic into a reply.
#[async_trait]
pub trait GreetBackend: Send + Sync {
    /// Where requests go, for display.
    fn endpoint(&self) -> &str;

    async fn greet(&self, topic: &str) -> Result<GreetResponse, GreetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_with_and_without_body() {
        let bare = GreetError::Status {
            status: 502,
            body: String::new(),
        };
        assert_eq!(bare.to_string(), "backend returned HTTP 502");

        let with_body = GreetError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(with_body.to_string(), "backend returned HTTP 500: boom");
    }

    #[test]
    fn test_network_display() {
        let err = GreetError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "network error: connection refused");
    }
}
