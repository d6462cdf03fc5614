//! ElementApp application forms (`*.elementapp.ai`).
//!
//! Standard HTML inputs with plain ids for the basics and fixed UUID ids
//! for the posting's custom questions; the UUIDs live in one table here.
//! English level is translated from the Polish fluency words to CEFR and
//! the timezone question is answered with the browser's own IANA zone.

use async_trait::async_trait;

use cvfill_core::{FillOptions, ResumeDocument};
use cvfill_driver::{scripts, PageLocation, Session};

use crate::error::FillError;
use crate::sites::SiteIntegration;

const FORM_MARKER: &str = "input#firstName";

// Custom-question input ids of the hosted form. UUIDs cannot start a CSS
// id selector, hence the attribute form.
const SALARY_ID: &str = "[id=\"4ae8a0f8-55b5-4832-a358-81eff02b4cd8\"]";
const HYBRID_ID: &str = "[id=\"6890c0b3-107f-49fc-902e-151f4b335a9a\"]";
const ENGLISH_ID: &str = "[id=\"18735447-d833-4f00-a8c3-ec01d15320bf\"]";
const AVAILABILITY_ID: &str = "[id=\"b2c12e78-bffb-444b-8038-577bfd69cb3d\"]";

const DEFAULT_HYBRID_ANSWER: &str =
    "Tak, akceptuję pracę hybrydową z Warszawy (1 dzień w tygodniu)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementAppForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub expected_salary: String,
    pub hybrid_work: String,
    pub english_level: String,
    pub availability: String,
    pub timezone: String,
}

/// CEFR grade for a Polish fluency word; unknown words pass through and
/// an absent level defaults to B2.
#[must_use]
pub fn cefr_english_level(level: Option<&str>) -> String {
    let Some(level) = level else {
        return "B2".to_string();
    };
    match level.to_lowercase().as_str() {
        "dobra" => "B2",
        "bardzo dobra" => "C1",
        "biegła" => "C2",
        "komunikatywna" => "B1",
        "podstawowa" => "A2",
        "brak" => "A1",
        _ => level,
    }
    .to_string()
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, options: &FillOptions, timezone: &str) -> ElementAppForm {
    let basics = &resume.basics;
    let english = basics
        .x_language_skills
        .as_ref()
        .and_then(|l| l.english.as_deref())
        .or(options.english_level.as_deref());
    ElementAppForm {
        first_name: resume.first_name(),
        last_name: resume.last_name(),
        email: basics.email.clone().unwrap_or_default(),
        phone_number: basics.phone.clone().unwrap_or_default(),
        expected_salary: basics
            .x_expected_salary
            .clone()
            .or_else(|| options.expected_salary.clone())
            .unwrap_or_default(),
        hybrid_work: options
            .hybrid_work
            .clone()
            .unwrap_or_else(|| DEFAULT_HYBRID_ANSWER.to_string()),
        english_level: cefr_english_level(english),
        availability: basics
            .x_availability
            .clone()
            .or_else(|| options.availability_date.clone())
            .unwrap_or_else(|| "natychmiast".to_string()),
        timezone: timezone.to_string(),
    }
}

pub struct ElementApp;

#[async_trait]
impl SiteIntegration for ElementApp {
    fn name(&self) -> &'static str {
        "ElementApp"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("elementapp.ai") && location.path.contains("/application/")
    }

    async fn detect(&self, session: &Session) -> Result<bool, FillError> {
        let location = session.page_location().await?;
        if !location.host_matches("elementapp.ai") {
            return Ok(false);
        }
        if location.path.contains("/application/") {
            return Ok(true);
        }
        Ok(session.find(FORM_MARKER).await?.is_some())
    }

    async fn fill(
        &self,
        session: &Session,
        resume: &ResumeDocument,
        options: &FillOptions,
    ) -> Result<u32, FillError> {
        let timezone = session
            .execute(scripts::BROWSER_TIMEZONE, vec![])
            .await?
            .as_str()
            .unwrap_or_default()
            .to_string();
        let form = map_form(resume, options, &timezone);
        let mut filled = 0;

        let fields: [(&str, &str); 9] = [
            ("input#firstName", &form.first_name),
            ("input#lastName", &form.last_name),
            ("input#email", &form.email),
            ("input#phoneNumber", &form.phone_number),
            ("input#timezone", &form.timezone),
            (SALARY_ID, &form.expected_salary),
            (HYBRID_ID, &form.hybrid_work),
            (ENGLISH_ID, &form.english_level),
            (AVAILABILITY_ID, &form.availability),
        ];
        for (selector, value) in fields {
            if value.is_empty() {
                continue;
            }
            if let Some(element) = session.find(selector).await? {
                session.fill_field(&element, value).await?;
                filled += 1;
            }
        }

        tracing::debug!(filled, "ElementApp form filled");
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvfill_core::resume::{Basics, LanguageSkills};

    #[test]
    fn maps_polish_fluency_words_to_cefr() {
        assert_eq!(cefr_english_level(Some("dobra")), "B2");
        assert_eq!(cefr_english_level(Some("Bardzo dobra")), "C1");
        assert_eq!(cefr_english_level(Some("biegła")), "C2");
        assert_eq!(cefr_english_level(Some("komunikatywna")), "B1");
        assert_eq!(cefr_english_level(Some("podstawowa")), "A2");
        assert_eq!(cefr_english_level(Some("brak")), "A1");
        assert_eq!(cefr_english_level(Some("C1")), "C1");
        assert_eq!(cefr_english_level(None), "B2");
    }

    #[test]
    fn extension_fields_and_timezone_flow_through() {
        let resume = ResumeDocument {
            basics: Basics {
                name: Some("Jan Nowak".to_string()),
                x_expected_salary: Some("180".to_string()),
                x_language_skills: Some(LanguageSkills {
                    polish: None,
                    english: Some("dobra".to_string()),
                }),
                ..Basics::default()
            },
            ..ResumeDocument::default()
        };
        let form = map_form(&resume, &FillOptions::default(), "Europe/Warsaw");
        assert_eq!(form.expected_salary, "180");
        assert_eq!(form.english_level, "B2");
        assert_eq!(form.timezone, "Europe/Warsaw");
        assert_eq!(form.hybrid_work, DEFAULT_HYBRID_ANSWER);
        assert_eq!(form.availability, "natychmiast");
    }

    #[test]
    fn location_requires_host_and_application_path() {
        let site = ElementApp;
        assert!(site.matches_location(&PageLocation::parse(
            "https://hire.elementapp.ai/application/123"
        )));
        assert!(!site.matches_location(&PageLocation::parse("https://hire.elementapp.ai/jobs")));
        assert!(!site.matches_location(&PageLocation::parse("https://example.ai/application/1")));
    }
}
