use std::fmt;

/// Errors surfaced by the transport and stored in hook state.
///
/// `Unauthorized` and `Validation` are kept apart from the generic transport
/// failures: the first forces a session transition, the second is meant for
/// inline display next to the form that caused it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
    Unauthorized(String),
    Validation(String),
}

impl AppError {
    /// True when the backend rejected the bearer credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// True when the backend rejected the request on business rules.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            AppError::Unauthorized(message) => write!(formatter, "Session expired: {message}"),
            AppError::Validation(message) => write!(formatter, "{message}"),
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn predicates_match_only_their_variant() {
        let unauthorized = AppError::Unauthorized("token revoked".to_string());
        let validation = AppError::Validation("name is required".to_string());
        let network = AppError::Network("offline".to_string());

        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_validation());
        assert!(validation.is_validation());
        assert!(!network.is_unauthorized());
        assert!(!network.is_validation());
    }

    #[test]
    fn validation_message_is_rendered_verbatim() {
        let err = AppError::Validation("Smeta total exceeds project budget".to_string());
        assert_eq!(err.to_string(), "Smeta total exceeds project budget");

        let http = AppError::Http {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(http.to_string(), "Request failed (503): maintenance");
    }
}
