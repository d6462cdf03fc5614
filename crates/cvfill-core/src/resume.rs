//! JSON Resume document model.
//!
//! Every field is optional: documents come from user-maintained JSON and
//! the mappers must degrade to empty strings rather than fail, so the
//! helpers here never panic on absent data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fallback start date for work entries without one, used only for
/// ordering and the experience estimate.
const DEFAULT_WORK_START: &str = "2000-01-01";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub basics: Basics,
    pub work: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillGroup>,
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Basics {
    pub name: Option<String>,
    pub label: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub location: Option<Location>,
    pub profiles: Vec<Profile>,
    /// Conventional extension keys carried by some documents; sites that
    /// know about them prefer these over caller options.
    #[serde(rename = "x-availability")]
    pub x_availability: Option<String>,
    #[serde(rename = "x-expectedSalary")]
    pub x_expected_salary: Option<String>,
    #[serde(rename = "x-preferredContractType")]
    pub x_preferred_contract_type: Option<String>,
    #[serde(rename = "x-languageSkills")]
    pub x_language_skills: Option<LanguageSkills>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub network: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageSkills {
    pub polish: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkEntry {
    /// Company name (JSON Resume calls this `name`).
    pub name: Option<String>,
    pub position: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub summary: Option<String>,
    pub location: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub study_type: Option<String>,
    pub area: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(rename = "x-status")]
    pub x_status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillGroup {
    pub name: Option<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LanguageEntry {
    pub language: Option<String>,
    pub fluency: Option<String>,
}

impl ResumeDocument {
    /// Full name as given, or empty string.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.basics.name.as_deref().unwrap_or("")
    }

    /// First whitespace-separated token of the name.
    #[must_use]
    pub fn first_name(&self) -> String {
        self.full_name()
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string()
    }

    /// Everything after the first token, joined by single spaces.
    /// `"Anna Maria Kowalska"` → `"Maria Kowalska"`.
    #[must_use]
    pub fn last_name(&self) -> String {
        self.full_name()
            .split_whitespace()
            .skip(1)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// URL of the first profile whose network matches any of `networks`
    /// case-insensitively.
    #[must_use]
    pub fn profile_url(&self, networks: &[&str]) -> Option<&str> {
        self.basics.profiles.iter().find_map(|p| {
            let network = p.network.as_deref()?;
            if networks.iter().any(|n| network.eq_ignore_ascii_case(n)) {
                p.url.as_deref()
            } else {
                None
            }
        })
    }

    /// Start date of the earliest work entry. Entries without a parseable
    /// start date count as `2000-01-01`.
    #[must_use]
    pub fn earliest_work_start(&self) -> Option<NaiveDate> {
        let fallback = parse_flex_date(DEFAULT_WORK_START)?;
        self.work
            .iter()
            .map(|w| {
                w.start_date
                    .as_deref()
                    .and_then(parse_flex_date)
                    .unwrap_or(fallback)
            })
            .min()
    }

    /// Advisory whole-years-of-experience estimate: years between the
    /// earliest work start date and `today` at 365.25 days per year,
    /// rounded to the nearest whole year. Zero when there is no work
    /// history. Imprecise near year boundaries by construction; only used
    /// to pick bucketed experience-range options on some sites.
    #[must_use]
    pub fn experience_years(&self, today: NaiveDate) -> u32 {
        let Some(start) = self.earliest_work_start() else {
            return 0;
        };
        let days = (today - start).num_days();
        if days <= 0 {
            return 0;
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        #[allow(clippy::cast_sign_loss)]
        {
            (days as f64 / 365.25).round() as u32
        }
    }
}

/// Parse the date formats seen in resume documents: `YYYY-MM-DD`,
/// `YYYY-MM`, or bare `YYYY` (the latter two snap to the first day).
#[must_use]
pub fn parse_flex_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    NaiveDate::parse_from_str(&format!("{s}-01-01"), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume_with_name(name: Option<&str>) -> ResumeDocument {
        ResumeDocument {
            basics: Basics {
                name: name.map(str::to_string),
                ..Basics::default()
            },
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn splits_multi_part_name() {
        let resume = resume_with_name(Some("Anna Maria Kowalska"));
        assert_eq!(resume.first_name(), "Anna");
        assert_eq!(resume.last_name(), "Maria Kowalska");
    }

    #[test]
    fn missing_name_yields_empty_parts() {
        let resume = resume_with_name(None);
        assert_eq!(resume.first_name(), "");
        assert_eq!(resume.last_name(), "");
    }

    #[test]
    fn blank_name_yields_empty_parts() {
        let resume = resume_with_name(Some("   "));
        assert_eq!(resume.first_name(), "");
        assert_eq!(resume.last_name(), "");
    }

    #[test]
    fn single_token_name_has_empty_last_name() {
        let resume = resume_with_name(Some("Cher"));
        assert_eq!(resume.first_name(), "Cher");
        assert_eq!(resume.last_name(), "");
    }

    #[test]
    fn profile_lookup_is_case_insensitive_first_match_wins() {
        let resume = ResumeDocument {
            basics: Basics {
                profiles: vec![
                    Profile {
                        network: Some("GitHub".to_string()),
                        url: Some("https://github.com/anna".to_string()),
                    },
                    Profile {
                        network: Some("LinkedIn".to_string()),
                        url: Some("https://linkedin.com/in/anna".to_string()),
                    },
                    Profile {
                        network: Some("linkedin".to_string()),
                        url: Some("https://linkedin.com/in/other".to_string()),
                    },
                ],
                ..Basics::default()
            },
            ..ResumeDocument::default()
        };
        assert_eq!(
            resume.profile_url(&["linkedin"]),
            Some("https://linkedin.com/in/anna")
        );
        assert_eq!(
            resume.profile_url(&["website", "portfolio"]),
            None,
            "no matching network"
        );
    }

    #[test]
    fn experience_years_uses_earliest_start_regardless_of_order() {
        let resume = ResumeDocument {
            work: vec![
                WorkEntry {
                    start_date: Some("2020-06-01".to_string()),
                    ..WorkEntry::default()
                },
                WorkEntry {
                    start_date: Some("2015-01-01".to_string()),
                    ..WorkEntry::default()
                },
            ],
            ..ResumeDocument::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(resume.experience_years(today), 9);
    }

    #[test]
    fn experience_years_zero_without_work_history() {
        let resume = ResumeDocument::default();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(resume.experience_years(today), 0);
    }

    #[test]
    fn missing_start_dates_default_to_2000() {
        let resume = ResumeDocument {
            work: vec![WorkEntry::default()],
            ..ResumeDocument::default()
        };
        assert_eq!(
            resume.earliest_work_start(),
            NaiveDate::from_ymd_opt(2000, 1, 1)
        );
    }

    #[test]
    fn parses_flexible_date_formats() {
        assert_eq!(
            parse_flex_date("2021-03-15"),
            NaiveDate::from_ymd_opt(2021, 3, 15)
        );
        assert_eq!(
            parse_flex_date("2021-03"),
            NaiveDate::from_ymd_opt(2021, 3, 1)
        );
        assert_eq!(parse_flex_date("2021"), NaiveDate::from_ymd_opt(2021, 1, 1));
        assert_eq!(parse_flex_date("soon"), None);
    }

    #[test]
    fn deserializes_extension_keys() {
        let json = r#"{
            "basics": {
                "name": "Jan Nowak",
                "x-availability": "od zaraz",
                "x-expectedSalary": "25000",
                "x-languageSkills": {"english": "dobra", "polish": "ojczysty"}
            },
            "education": [{"institution": "UW", "x-status": "Not completed"}]
        }"#;
        let resume: ResumeDocument = serde_json::from_str(json).unwrap();
        assert_eq!(resume.basics.x_availability.as_deref(), Some("od zaraz"));
        assert_eq!(resume.basics.x_expected_salary.as_deref(), Some("25000"));
        assert_eq!(
            resume
                .basics
                .x_language_skills
                .as_ref()
                .and_then(|l| l.english.as_deref()),
            Some("dobra")
        );
        assert_eq!(
            resume.education[0].x_status.as_deref(),
            Some("Not completed")
        );
    }
}
