//! The set of HTTP status codes that denote an error condition

use std::collections::BTreeSet;

use http::StatusCode;

/// Errors raised when building an [`ErrorStatusCodes`] set from raw codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusCodeError {
    #[error("{0} is not a valid HTTP status code")]
    Invalid(u16),
    #[error("{0} is not a client or server error status code")]
    NotAnError(u16),
}

/// Read-only set of status codes treated as errors.
///
/// The default set holds every 4xx and 5xx code with a registered reason
/// phrase. Deployments that want a narrower or wider set build one with
/// [`ErrorStatusCodes::from_codes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorStatusCodes {
    codes: BTreeSet<u16>,
}

impl Default for ErrorStatusCodes {
    fn default() -> Self {
        let codes = (400..=599)
            .filter_map(|code| StatusCode::from_u16(code).ok())
            .filter(|status| status.canonical_reason().is_some())
            .map(|status| status.as_u16())
            .collect();
        Self { codes }
    }
}

impl ErrorStatusCodes {
    /// Build a set from explicit codes.
    ///
    /// # Errors
    /// Returns [`StatusCodeError::Invalid`] for values that are not HTTP status
    /// codes and [`StatusCodeError::NotAnError`] for codes outside `400..=599`.
    pub fn from_codes<I>(codes: I) -> Result<Self, StatusCodeError>
    where
        I: IntoIterator<Item = u16>,
    {
        let codes = codes
            .into_iter()
            .map(|code| {
                let status = StatusCode::from_u16(code).map_err(|_| StatusCodeError::Invalid(code))?;
                if status.is_client_error() || status.is_server_error() {
                    Ok(code)
                } else {
                    Err(StatusCodeError::NotAnError(code))
                }
            })
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { codes })
    }

    #[must_use]
    pub fn contains(&self, status: StatusCode) -> bool {
        self.codes.contains(&status.as_u16())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.codes.iter().copied()
    }
}
