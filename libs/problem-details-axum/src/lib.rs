//! Problem details plugin for axum
//!
//! Registers a pre-response hook on a router that rewrites error responses
//! into RFC 9457 problem documents (`application/problem+json`):
//! - handlers returning [`HandlerError`] are mapped through the injected
//!   [`MappingStrategy`](problem_details::MappingStrategy)
//! - other responses whose status is in the configured error set get a
//!   document derived from the status code alone
//! - everything else passes through unchanged
//!
//! # Example
//!
//! ```ignore
//! use problem_details::MapperRegistry;
//! use problem_details_axum::{
//!     HandlerError, ProblemDetailsOptions, ProblemDetailsPlugin, RegistryMappingStrategy,
//! };
//!
//! async fn handler() -> Result<&'static str, HandlerError> {
//!     Err(std::io::Error::other("disk on fire").into())
//! }
//!
//! let strategy = RegistryMappingStrategy::new(Arc::new(MapperRegistry::new()));
//! let app = ProblemDetailsPlugin::register(
//!     Router::new().route("/", get(handler)),
//!     ProblemDetailsOptions::new(Arc::new(strategy)),
//! );
//! // GET / -> 500 {"type":"about:blank","status":500}
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod error;
mod plugin;
mod response;
mod strategy;

pub use config::{ConfigError, ProblemDetailsConfig};
pub use error::HandlerError;
pub use plugin::{
    Interceptor, PluginInfo, ProblemDetailsOptions, ProblemDetailsPlugin, on_pre_response,
};
pub use response::{ResponseKind, is_problem_response};
pub use strategy::RegistryMappingStrategy;
