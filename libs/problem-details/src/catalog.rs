//! Static problem type definitions for application mappers

use crate::problem::ProblemDocument;
use http::StatusCode;

/// Static problem type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDef {
    pub status: u16,
    pub title: &'static str,
    pub type_url: &'static str,
}

impl ProblemDef {
    /// Convert this definition into a `ProblemDocument` with the given detail
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> ProblemDocument {
        // Invalid codes in a static table still have to produce a document
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        ProblemDocument::new(status)
            .with_type(self.type_url)
            .with_title(self.title)
            .with_detail(detail)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn problem_def_to_problem_works() {
        let def = ProblemDef {
            status: StatusCode::NOT_FOUND.as_u16(),
            title: "Not Found",
            type_url: "https://errors.example.com/TEST_NOT_FOUND",
        };

        let problem = def.as_problem("Resource missing");
        assert_eq!(problem.status, StatusCode::NOT_FOUND);
        assert_eq!(problem.title.as_deref(), Some("Not Found"));
        assert_eq!(problem.detail.as_deref(), Some("Resource missing"));
        assert_eq!(
            problem.type_url,
            "https://errors.example.com/TEST_NOT_FOUND"
        );
    }

    #[test]
    fn invalid_status_falls_back_to_500() {
        let def = ProblemDef {
            status: 42,
            title: "Broken",
            type_url: "https://errors.example.com/BROKEN",
        };
        assert_eq!(
            def.as_problem("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
