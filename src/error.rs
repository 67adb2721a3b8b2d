//! Domain errors raised by the portal core

use std::path::PathBuf;

/// Failures the portal core can report to its views
///
/// None of these are fatal: every variant degrades to a safe default
/// (logged out, unchanged thread, pending attachment discarded).
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    /// Login attempted without accepting the terms of use
    #[error("Você precisa aceitar os Termos de Uso e a Política de Privacidade.")]
    Precondition,

    /// A persisted record exists but could not be decoded
    #[error("stored record '{key}' could not be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Send with neither text nor attachment
    #[error("nothing to send")]
    EmptySubmission,

    /// The chosen attachment could not be inspected
    #[error("could not read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A session-scoped action ran while nobody was signed in
    #[error("no user is signed in")]
    SignedOut,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_message_is_the_login_alert() {
        assert_eq!(
            PortalError::Precondition.to_string(),
            "Você precisa aceitar os Termos de Uso e a Política de Privacidade."
        );
    }

    #[test]
    fn test_decode_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = PortalError::Decode {
            key: "unex.session".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("stored record 'unex.session'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
