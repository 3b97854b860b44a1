//! RFC 9457 Problem Details for HTTP APIs (pure data model)

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Problem type used when no more specific type applies.
pub const ABOUT_BLANK: &str = "about:blank";

/// Members defined by RFC 9457 that extensions may not shadow.
const RESERVED_MEMBERS: [&str; 5] = ["type", "title", "status", "detail", "instance"];

/// Custom serializer for `StatusCode` to u16
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// Custom deserializer for `StatusCode` from u16
fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

fn default_type_url() -> String {
    ABOUT_BLANK.to_owned()
}

/// Response extension recording the status of the [`ProblemDocument`] a
/// response body was rendered from.
///
/// A response only holds a faithful problem document when this marker is
/// present and equals the response status; headers alone prove nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedProblem(pub StatusCode);

/// Errors raised while building a [`ProblemDocument`].
#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
    #[error("'{name}' is a reserved problem member and cannot be used as an extension")]
    ReservedMember { name: String },
    #[error("extension member '{name}' could not be serialized: {source}")]
    Extension {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// RFC 9457 problem document.
///
/// A document built from a status alone serializes as
/// `{"type":"about:blank","status":<code>}`; every optional member is omitted
/// until it is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ProblemDocument {
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type", default = "default_type_url")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The HTTP status code for this occurrence of the problem.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    /// A human-readable explanation specific to this occurrence of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// A URI reference that identifies the specific occurrence of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Mapper-specific extension members, flattened into the top-level object.
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl ProblemDocument {
    /// Create a document of type `about:blank` for the given status.
    pub fn new(status: StatusCode) -> Self {
        Self {
            type_url: default_type_url(),
            title: None,
            status,
            detail: None,
            instance: None,
            extensions: Map::new(),
        }
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    /// Add an extension member.
    ///
    /// # Errors
    /// Returns [`ProblemError::ReservedMember`] if `name` collides with a member
    /// defined by RFC 9457, or [`ProblemError::Extension`] if `value` cannot be
    /// represented as JSON.
    pub fn with_extension(
        mut self,
        name: impl Into<String>,
        value: impl Serialize,
    ) -> Result<Self, ProblemError> {
        let name = name.into();
        if RESERVED_MEMBERS.contains(&name.as_str()) {
            return Err(ProblemError::ReservedMember { name });
        }
        let value = serde_json::to_value(value)
            .map_err(|source| ProblemError::Extension {
                name: name.clone(),
                source,
            })?;
        self.extensions.insert(name, value);
        Ok(self)
    }

    /// Look up an extension member by name.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    /// True when the document still carries the generic `about:blank` type.
    #[must_use]
    pub fn is_about_blank(&self) -> bool {
        self.type_url == ABOUT_BLANK
    }
}

/// Axum integration: make `ProblemDocument` directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ProblemDocument {
    fn into_response(self) -> axum::response::Response {
        use axum::http::HeaderValue;

        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp.extensions_mut().insert(RenderedProblem(status));
        resp
    }
}
