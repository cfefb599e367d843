use thiserror::Error;

/// Failure kinds surfaced by the I/O layers.
///
/// Carried inside `anyhow::Error` and recovered with `downcast_ref` where the
/// kind matters (HTTP status mapping).
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("network error: {0}")]
    Network(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid wiki url: {0}")]
    InvalidUrl(String),

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl TrackerError {
    /// Kind attached anywhere in an error chain
    pub fn find(error: &anyhow::Error) -> Option<&TrackerError> {
        error.chain().find_map(|cause| cause.downcast_ref::<TrackerError>())
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to storage errors
pub fn storage_context(operation: &str) -> String {
    format!("Failed to {}", operation)
}

/// Wrap a network failure as a `Network` kind
pub fn network_error<E: std::fmt::Display>(url: &str, error: E) -> anyhow::Error {
    anyhow::Error::new(TrackerError::Network(format!("{error}"))).context(fetch_context(url))
}

/// Wrap a storage failure as a `Storage` kind
pub fn storage_error<E: std::fmt::Display>(operation: &str, error: E) -> anyhow::Error {
    anyhow::Error::new(TrackerError::Storage(format!("{error}")))
        .context(storage_context(operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_find_kind_through_context() {
        let error = Err::<(), _>(TrackerError::NotFound("tier 4".to_string()))
            .context("loading filters")
            .unwrap_err();
        assert!(matches!(TrackerError::find(&error), Some(TrackerError::NotFound(_))));
    }

    #[test]
    fn test_wrapped_errors_keep_kind() {
        let error = network_error("https://liquipedia.net/dota2/Tier_1", "timed out");
        assert!(matches!(TrackerError::find(&error), Some(TrackerError::Network(_))));
        assert_eq!(error.to_string(), "Failed to fetch from: https://liquipedia.net/dota2/Tier_1");

        let error = storage_error("insert tournament", "disk full");
        assert!(matches!(TrackerError::find(&error), Some(TrackerError::Storage(_))));
    }

    #[test]
    fn test_plain_errors_have_no_kind() {
        assert!(TrackerError::find(&anyhow::anyhow!("boom")).is_none());
    }
}
