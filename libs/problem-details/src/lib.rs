//! Problem documents and error mapping
//!
//! This crate provides pure data types and lookup structures for producing
//! RFC 9457 problem documents, with no dependency on an HTTP framework unless
//! the `axum` feature is enabled. It includes:
//! - The problem document itself (`ProblemDocument`)
//! - Static problem type definitions (`ProblemDef`)
//! - The set of status codes treated as errors (`ErrorStatusCodes`)
//! - Error and status code mappers, and the `MapperRegistry` resolving them
//! - The `MappingStrategy` contract used by response interceptors
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod mapper;
pub mod problem;
pub mod registry;
pub mod status_codes;
pub mod strategy;

// Re-export commonly used types
pub use catalog::ProblemDef;
pub use mapper::{DefaultErrorMapper, ErrorMapper, FnMapper, StatusCodeErrorMapper};
pub use problem::{
    ABOUT_BLANK, APPLICATION_PROBLEM_JSON, ProblemDocument, ProblemError, RenderedProblem,
};
pub use registry::MapperRegistry;
pub use status_codes::{ErrorStatusCodes, StatusCodeError};
pub use strategy::MappingStrategy;
