use thiserror::Error;

pub type OutreachResult<T> = Result<T, OutreachError>;

/// Classification of upstream collaborator failures. Retriable failures may
/// be retried by the caller with backoff; the core never retries internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    Retriable,
    Fatal,
}

impl std::fmt::Display for UpstreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamKind::Retriable => write!(f, "retriable"),
            UpstreamKind::Fatal => write!(f, "fatal"),
        }
    }
}

#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream {service} error ({kind}): {message}")]
    Upstream {
        service: &'static str,
        kind: UpstreamKind,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl OutreachError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// A transient upstream failure (timeout, rate limit, 5xx).
    pub fn retriable(service: &'static str, msg: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            kind: UpstreamKind::Retriable,
            message: msg.into(),
        }
    }

    /// A permanent upstream rejection (bad credentials, invalid payload).
    pub fn fatal(service: &'static str, msg: impl Into<String>) -> Self {
        Self::Upstream {
            service,
            kind: UpstreamKind::Fatal,
            message: msg.into(),
        }
    }

    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            Self::Upstream {
                kind: UpstreamKind::Retriable,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_classification() {
        let err = OutreachError::retriable("generator", "timeout after 30s");
        assert!(err.is_retriable());

        let err = OutreachError::fatal("sendgrid", "invalid api key");
        assert!(!err.is_retriable());

        let err = OutreachError::validation("missing subject");
        assert!(!err.is_retriable());
    }

    #[test]
    fn test_display_messages() {
        let err = OutreachError::not_found("campaign", "abc-123");
        assert_eq!(err.to_string(), "campaign not found: abc-123");

        let err = OutreachError::conflict("outcome already finalized");
        assert_eq!(err.to_string(), "Conflict: outcome already finalized");
    }
}
