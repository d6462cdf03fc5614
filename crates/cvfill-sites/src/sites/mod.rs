//! The site integrations, one module per recruiting platform.
//!
//! Each integration pairs a pure form mapper with a detector and an
//! async filler. The dispatcher walks [`integrations`] in priority order
//! and the first detector that fires wins.

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::error::FillError;

pub mod bamboohr;
pub mod element_app;
pub mod erecruiter;
pub mod greenhouse;
pub mod lever;
pub mod recruitify;
pub mod solid_jobs;
pub mod traffit;
pub mod workday;

#[async_trait]
pub trait SiteIntegration: Send + Sync {
    /// Platform name, also used as the outcome's `form_type`.
    fn name(&self) -> &'static str;

    /// Pure URL check: the hostname test is mandatory for every site,
    /// optionally narrowed by path.
    fn matches_location(&self, location: &PageLocation) -> bool;

    /// Full detection. The default is the URL check alone; sites with a
    /// marker-element fallback override this (the hostname test still
    /// gates the marker probe).
    async fn detect(&self, session: &Session) -> Result<bool, FillError> {
        Ok(self.matches_location(&session.page_location().await?))
    }

    /// Map the resume and options onto the page and write every field
    /// that resolves. Returns the number of fields written; unresolved
    /// fields are skipped, never errors.
    async fn fill(
        &self,
        session: &Session,
        resume: &ResumeDocument,
        options: &FillOptions,
    ) -> Result<u32, FillError>;
}

/// All integrations in dispatch priority order.
#[must_use]
pub fn integrations() -> Vec<Box<dyn SiteIntegration>> {
    vec![
        Box::new(solid_jobs::SolidJobs),
        Box::new(traffit::Traffit),
        Box::new(erecruiter::ERecruiter),
        Box::new(recruitify::Recruitify),
        Box::new(greenhouse::Greenhouse),
        Box::new(lever::Lever),
        Box::new(workday::Workday),
        Box::new(element_app::ElementApp),
        Box::new(bamboohr::BambooHr),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order_is_stable() {
        let names: Vec<&str> = integrations().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "SOLID.jobs",
                "Traffit",
                "eRecruiter",
                "Recruitify",
                "Greenhouse",
                "Lever",
                "Workday",
                "ElementApp",
                "BambooHR",
            ]
        );
    }

    #[test]
    fn unrelated_host_matches_no_integration() {
        let location = PageLocation::parse("https://example.com/jobs/apply");
        assert!(integrations()
            .iter()
            .all(|s| !s.matches_location(&location)));
    }
}
