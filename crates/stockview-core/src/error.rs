use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Shape problems detected on a single inbound field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field is required")]
    Missing,
    #[error("expected a string, found {found}")]
    NotAString { found: &'static str },
    #[error("request body must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be 8 digits formatted YYYYMMDD: '{value}'")]
    DateNotNumeric { value: String },
    #[error("date '{value}' is not a valid calendar date")]
    InvalidDate { value: String },
    #[error("end_date must not be earlier than start_date")]
    DateRangeReversed,

    #[error(
        "invalid interval '{value}', expected one of daily, weekly, monthly, quarterly, yearly"
    )]
    InvalidInterval { value: String },
}

/// A validation problem attributed to a named request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub error: ValidationError,
}

impl FieldError {
    pub const fn new(field: &'static str, error: ValidationError) -> Self {
        Self { field, error }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.error)
    }
}

/// Every offending field of a rejected request, in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the offending fields.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|error| error.field).collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid request: ")?;
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Fetch failure classification used by callers to pick a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Validation,
    UpstreamUnavailable,
    UpstreamError,
    NoDataFound,
    MalformedRow,
}

impl FetchErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamError => "upstream_error",
            Self::NoDataFound => "no_data_found",
            Self::MalformedRow => "malformed_row",
        }
    }
}

impl Display for FetchErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged failure of the validate → fetch → parse pipeline.
///
/// `UpstreamError` keeps the raw upstream body for diagnostics only: neither
/// `Display` nor [`FetchError::public_message`] include it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },

    #[error("upstream returned status {status}")]
    UpstreamError { status: u16, body: String },

    #[error("upstream returned no data for the requested symbol and date range")]
    NoDataFound,

    #[error("malformed upstream row at line {line}: {problem}")]
    MalformedRow { line: u64, problem: String },
}

impl FetchError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    pub fn malformed_row(line: u64, problem: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            problem: problem.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Validation(_) => FetchErrorKind::Validation,
            Self::UpstreamUnavailable { .. } => FetchErrorKind::UpstreamUnavailable,
            Self::UpstreamError { .. } => FetchErrorKind::UpstreamError,
            Self::NoDataFound => FetchErrorKind::NoDataFound,
            Self::MalformedRow { .. } => FetchErrorKind::MalformedRow,
        }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "request.invalid",
            Self::UpstreamUnavailable { .. } => "upstream.unavailable",
            Self::UpstreamError { .. } => "upstream.error",
            Self::NoDataFound => "upstream.no_data",
            Self::MalformedRow { .. } => "upstream.malformed_row",
        }
    }

    /// Only transport failures are worth another attempt.
    pub const fn retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable { .. })
    }

    /// Errors the caller can fix by changing the request.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NoDataFound)
    }

    /// Message safe to hand to an external caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::UpstreamUnavailable { .. } => {
                String::from("data source is unavailable; try again later")
            }
            Self::UpstreamError { .. } | Self::MalformedRow { .. } => {
                String::from("data source failure")
            }
            Self::NoDataFound => {
                String::from("no data available; check the symbol and date range")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_list_every_field() {
        let errors = ValidationErrors::new(vec![
            FieldError::new("symbol", ValidationError::Missing),
            FieldError::new("end_date", ValidationError::Missing),
        ]);

        assert_eq!(errors.fields(), vec!["symbol", "end_date"]);
        assert_eq!(
            errors.to_string(),
            "invalid request: symbol: field is required; end_date: field is required"
        );
    }

    #[test]
    fn upstream_error_hides_body() {
        let error = FetchError::UpstreamError {
            status: 500,
            body: String::from("<html>stack trace</html>"),
        };

        assert!(!error.to_string().contains("stack trace"));
        assert!(!error.public_message().contains("stack trace"));
        assert_eq!(error.code(), "upstream.error");
    }

    #[test]
    fn only_transport_failures_are_retryable() {
        assert!(FetchError::unavailable("timeout").retryable());
        assert!(!FetchError::NoDataFound.retryable());
        assert!(!FetchError::malformed_row(2, "bad").retryable());
    }

    #[test]
    fn malformed_row_is_reported_like_upstream_failure() {
        let malformed = FetchError::malformed_row(3, "field 'open' is not a number: 'x'");
        let upstream = FetchError::UpstreamError {
            status: 502,
            body: String::new(),
        };

        assert_eq!(malformed.public_message(), upstream.public_message());
        assert!(!malformed.is_client_error());
        assert!(FetchError::NoDataFound.is_client_error());
    }
}
