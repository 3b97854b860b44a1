//! Serde configuration for the plugin options

use std::sync::Arc;

use problem_details::{ErrorStatusCodes, MappingStrategy, StatusCodeError};
use serde::{Deserialize, Serialize};

use crate::plugin::ProblemDetailsOptions;

/// Errors that can occur while turning configuration into plugin options
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid error_status_codes: {0}")]
    ErrorStatusCodes(#[from] StatusCodeError),
}

/// Problem details plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemDetailsConfig {
    /// Status codes rewritten into problem documents. Absent means every
    /// known 4xx and 5xx code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_status_codes: Option<Vec<u16>>,

    /// Leave responses that already are `application/problem+json` untouched
    #[serde(default = "default_preserve_problem_responses")]
    pub preserve_problem_responses: bool,
}

fn default_preserve_problem_responses() -> bool {
    true
}

impl Default for ProblemDetailsConfig {
    fn default() -> Self {
        Self {
            error_status_codes: None,
            preserve_problem_responses: default_preserve_problem_responses(),
        }
    }
}

impl ProblemDetailsConfig {
    /// Resolve the configured status set.
    ///
    /// # Errors
    /// Returns `ConfigError::ErrorStatusCodes` if a configured code is not an
    /// HTTP error status.
    pub fn error_status_codes(&self) -> Result<ErrorStatusCodes, ConfigError> {
        match &self.error_status_codes {
            Some(codes) => Ok(ErrorStatusCodes::from_codes(codes.iter().copied())?),
            None => Ok(ErrorStatusCodes::default()),
        }
    }

    /// Build registration options around `strategy`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration is invalid.
    pub fn into_options(
        self,
        strategy: Arc<dyn MappingStrategy>,
    ) -> Result<ProblemDetailsOptions, ConfigError> {
        let codes = self.error_status_codes()?;
        Ok(ProblemDetailsOptions::new(strategy)
            .with_error_status_codes(codes)
            .preserve_problem_responses(self.preserve_problem_responses))
    }
}
