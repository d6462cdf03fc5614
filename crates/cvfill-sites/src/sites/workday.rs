//! Workday application flows (`*.myworkdayjobs.com`).
//!
//! Workday is a React single-page app with no stable selectors, so every
//! field is resolved by label text. Work history spans multiple entries;
//! an add-section button is clicked between entries and dates go in as
//! `MM/YYYY`.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Datelike;
use serde_json::json;

use cvfill_core::{parse_flex_date, FillOptions, ResumeDocument};
use cvfill_driver::{PageLocation, Session};

use crate::consent;
use crate::error::FillError;
use crate::fields::fill_chain;
use crate::sites::SiteIntegration;

const APPLY_MARKER: &str = "[data-automation-id*=\"apply\"]";
const SETTLE_DELAY: Duration = Duration::from_millis(1500);
const ENTRY_RENDER_DELAY: Duration = Duration::from_millis(500);

/// Click the first button whose text contains the argument. args: text.
/// Returns whether a button was found.
const CLICK_BUTTON_BY_TEXT: &str = r#"
const wanted = String(arguments[0]).toLowerCase();
const buttons = document.querySelectorAll('button, [role="button"]');
for (const button of buttons) {
  if (button.textContent.toLowerCase().includes(wanted)) {
    button.click();
    return true;
  }
}
return false;
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkHistoryEntry {
    pub company: String,
    pub position: String,
    /// `MM/YYYY`, or the raw string when unparseable.
    pub start_date: String,
    /// Empty for a current position.
    pub end_date: String,
    pub current_job: bool,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkdayForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub linkedin_url: String,
    pub website_url: String,
    pub work_history: Vec<WorkHistoryEntry>,
}

/// `MM/YYYY` rendering of a resume date; unparseable input passes
/// through unchanged.
#[must_use]
pub fn workday_date(raw: &str) -> String {
    parse_flex_date(raw).map_or_else(
        || raw.to_string(),
        |d| format!("{:02}/{}", d.month(), d.year()),
    )
}

#[must_use]
pub fn map_form(resume: &ResumeDocument, _options: &FillOptions) -> WorkdayForm {
    let work_history = resume
        .work
        .iter()
        .map(|job| {
            let current_job = job.end_date.as_deref().map_or(true, str::is_empty);
            WorkHistoryEntry {
                company: job.name.clone().unwrap_or_default(),
                position: job.position.clone().unwrap_or_default(),
                start_date: job
                    .start_date
                    .as_deref()
                    .map(workday_date)
                    .unwrap_or_default(),
                end_date: if current_job {
                    String::new()
                } else {
                    job.end_date.as_deref().map(workday_date).unwrap_or_default()
                },
                current_job,
                description: job.summary.clone().unwrap_or_default(),
            }
        })
        .collect();
    WorkdayForm {
        first_name: resume.first_name(),
        last_name: resume.last_name(),
        email: resume.basics.email.clone().unwrap_or_default(),
        phone: resume.basics.phone.clone().unwrap_or_default(),
        city: resume
            .basics
            .location
            .as_ref()
            .and_then(|l| l.city.clone())
            .unwrap_or_default(),
        linkedin_url: resume
            .profile_url(&["linkedin"])
            .unwrap_or_default()
            .to_string(),
        website_url: resume.basics.url.clone().unwrap_or_default(),
        work_history,
    }
}

pub struct Workday;

#[async_trait]
impl SiteIntegration for Workday {
    fn name(&self) -> &'static str {
        "Workday"
    }

    fn matches_location(&self, location: &PageLocation) -> bool {
        location.host_matches("myworkdayjobs.com") && location.path.contains("/apply")
    }

    async fn detect(&self, session: &Session) -> Result<bool, FillError> {
        let location = session.page_location().await?;
        if !location.host_matches("myworkdayjobs.com") {
            return Ok(false);
        }
        if location.path.contains("/apply") {
            return Ok(true);
        }
        Ok(session.find(APPLY_MARKER).await?.is_some())
    }

    async fn fill(
        &self,
        session: &Session,
        resume: &ResumeDocument,
        options: &FillOptions,
    ) -> Result<u32, FillError> {
        let form = map_form(resume, options);
        tokio::time::sleep(SETTLE_DELAY).await;

        let mut written = HashSet::new();
        let mut filled = 0;

        let basic_fields: [(&[&str], &str); 7] = [
            (&["first name", "given name"], &form.first_name),
            (&["last name", "family name", "surname"], &form.last_name),
            (&["email", "e-mail"], &form.email),
            (&["phone", "telephone", "mobile"], &form.phone),
            (&["city", "location"], &form.city),
            (&["linkedin"], &form.linkedin_url),
            (&["website", "personal website"], &form.website_url),
        ];
        for (labels, value) in basic_fields {
            if fill_chain(session, &mut written, &[], labels, value).await? {
                filled += 1;
            }
        }

        for (index, entry) in form.work_history.iter().enumerate() {
            if index > 0 {
                let added = session
                    .execute(CLICK_BUTTON_BY_TEXT, vec![json!("add")])
                    .await?
                    .as_bool()
                    .unwrap_or(false);
                if !added {
                    tracing::warn!(index, "no add-section button found, stopping work history");
                    break;
                }
                tokio::time::sleep(ENTRY_RENDER_DELAY).await;
            }
            filled += self
                .fill_work_entry(session, &mut written, entry)
                .await?;
        }

        filled += consent::check_consent_boxes(session, None).await?;

        tracing::debug!(filled, "Workday form filled");
        Ok(filled)
    }
}

impl Workday {
    async fn fill_work_entry(
        &self,
        session: &Session,
        written: &mut HashSet<cvfill_driver::Element>,
        entry: &WorkHistoryEntry,
    ) -> Result<u32, FillError> {
        let mut filled = 0;
        let entry_fields: [(&[&str], &str); 5] = [
            (&["company", "employer", "organization"], &entry.company),
            (&["job title", "title", "position", "role"], &entry.position),
            (&["start date", "from date"], &entry.start_date),
            (&["end date", "to date"], &entry.end_date),
            (
                &["description", "responsibilities", "duties"],
                &entry.description,
            ),
        ];
        for (labels, value) in entry_fields {
            if fill_chain(session, written, &[], labels, value).await? {
                filled += 1;
            }
        }

        if entry.current_job {
            for checkbox in consent::scan_checkboxes(session, None).await? {
                let label = checkbox.label.to_lowercase();
                if (label.contains("current") || label.contains("present")) && !checkbox.checked {
                    session.click(&checkbox.element).await?;
                    filled += 1;
                    break;
                }
            }
        }
        Ok(filled)
    }
}
