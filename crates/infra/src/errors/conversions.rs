//! Conversions from external infrastructure errors into domain errors.

use daysheet_domain::DaysheetError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub DaysheetError);

impl From<InfraError> for DaysheetError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<DaysheetError> for InfraError {
    fn from(value: DaysheetError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoDaysheetError {
    fn into_daysheet(self) -> DaysheetError;
}

/// Map a non-success HTTP status (plus a snippet of the body) to a domain
/// error.
pub fn status_error(status: StatusCode, body: &str) -> DaysheetError {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("unknown status");
    let mut message = format!("HTTP {code} {reason}");
    let snippet: String = body.trim().chars().take(200).collect();
    if !snippet.is_empty() {
        message.push_str(": ");
        message.push_str(&snippet);
    }

    match code {
        401 | 403 => DaysheetError::Auth(message),
        404 => DaysheetError::NotFound(message),
        429 => DaysheetError::Network(message),
        400..=499 => DaysheetError::InvalidInput(message),
        _ => DaysheetError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → DaysheetError */
/* -------------------------------------------------------------------------- */

impl IntoDaysheetError for HttpError {
    fn into_daysheet(self) -> DaysheetError {
        if self.is_timeout() {
            return DaysheetError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return DaysheetError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return DaysheetError::Serialization(format!("invalid HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, "");
        }

        DaysheetError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_daysheet())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → DaysheetError */
/* -------------------------------------------------------------------------- */

impl IntoDaysheetError for std::io::Error {
    fn into_daysheet(self) -> DaysheetError {
        use std::io::ErrorKind;

        match self.kind() {
            ErrorKind::NotFound => DaysheetError::NotFound(self.to_string()),
            ErrorKind::PermissionDenied => {
                DaysheetError::CacheWrite(format!("permission denied: {self}"))
            }
            _ => DaysheetError::Internal(format!("I/O error: {self}")),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(value: std::io::Error) -> Self {
        InfraError(value.into_daysheet())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → DaysheetError */
/* -------------------------------------------------------------------------- */

impl IntoDaysheetError for serde_json::Error {
    fn into_daysheet(self) -> DaysheetError {
        DaysheetError::Serialization(format!(
            "JSON error at line {} column {}: {}",
            self.line(),
            self.column(),
            self
        ))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_daysheet())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
