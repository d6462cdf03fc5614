//! Plain-text rendering of a resume document, used where a form offers a
//! free-text CV field. Section order is fixed; work date ranges use
//! Polish month names and `Present` for open-ended jobs.

use chrono::{Datelike, NaiveDate};

use cvfill_core::resume::ResumeDocument;
use cvfill_core::parse_flex_date;

const POLISH_MONTHS: [&str; 12] = [
    "styczeń",
    "luty",
    "marzec",
    "kwiecień",
    "maj",
    "czerwiec",
    "lipiec",
    "sierpień",
    "wrzesień",
    "październik",
    "listopad",
    "grudzień",
];

fn month_year(date: NaiveDate) -> String {
    let month = POLISH_MONTHS[date.month0() as usize];
    format!("{month} {}", date.year())
}

fn render_date(raw: Option<&str>) -> String {
    raw.and_then(parse_flex_date)
        .map(month_year)
        .unwrap_or_default()
}

fn year_of(raw: Option<&str>) -> String {
    raw.and_then(parse_flex_date)
        .map(|d| d.year().to_string())
        .unwrap_or_default()
}

#[must_use]
pub fn render_resume_text(resume: &ResumeDocument) -> String {
    let basics = &resume.basics;
    let mut text = String::new();

    text.push_str(&format!("{}\n", resume.full_name()));
    if let Some(label) = &basics.label {
        text.push_str(&format!("{label}\n"));
    }
    text.push('\n');

    if let Some(email) = &basics.email {
        text.push_str(&format!("Email: {email}\n"));
    }
    if let Some(phone) = &basics.phone {
        text.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(url) = &basics.url {
        text.push_str(&format!("Website: {url}\n"));
    }
    if let Some(linkedin) = resume.profile_url(&["linkedin"]) {
        text.push_str(&format!("LinkedIn: {linkedin}\n"));
    }
    text.push('\n');

    if let Some(summary) = &basics.summary {
        text.push_str(&format!("SUMMARY\n{summary}\n\n"));
    }

    if !resume.work.is_empty() {
        text.push_str("WORK EXPERIENCE\n");
        for job in &resume.work {
            let position = job.position.as_deref().unwrap_or("Position");
            let company = job.name.as_deref().unwrap_or("Company");
            text.push_str(&format!("\n{position} at {company}\n"));
            let start = render_date(job.start_date.as_deref());
            let end = if job.end_date.is_some() {
                render_date(job.end_date.as_deref())
            } else {
                "Present".to_string()
            };
            text.push_str(&format!("{start} - {end}\n"));
            if let Some(location) = &job.location {
                text.push_str(&format!("{location}\n"));
            }
            if let Some(summary) = &job.summary {
                text.push_str(&format!("{summary}\n"));
            }
            for highlight in &job.highlights {
                text.push_str(&format!("• {highlight}\n"));
            }
        }
        text.push('\n');
    }

    if !resume.education.is_empty() {
        text.push_str("EDUCATION\n");
        for edu in &resume.education {
            let degree = edu.study_type.as_deref().unwrap_or("Degree");
            let area = edu.area.as_deref().unwrap_or("Field");
            text.push_str(&format!("\n{degree} in {area}\n"));
            text.push_str(&format!(
                "{}\n",
                edu.institution.as_deref().unwrap_or("Institution")
            ));
            let start_year = year_of(edu.start_date.as_deref());
            let end_year = year_of(edu.end_date.as_deref());
            if !start_year.is_empty() || !end_year.is_empty() {
                text.push_str(&format!("{start_year} - {end_year}\n"));
            }
        }
        text.push('\n');
    }

    if !resume.skills.is_empty() {
        text.push_str("SKILLS\n");
        for group in &resume.skills {
            if let Some(name) = &group.name {
                text.push_str(&format!("{name}: {}\n", group.keywords.join(", ")));
            }
        }
        text.push('\n');
    }

    if !resume.languages.is_empty() {
        text.push_str("LANGUAGES\n");
        for lang in &resume.languages {
            text.push_str(&format!(
                "{} - {}\n",
                lang.language.as_deref().unwrap_or(""),
                lang.fluency.as_deref().unwrap_or("")
            ));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use cvfill_core::resume::{Basics, LanguageEntry, SkillGroup, WorkEntry};

    fn sample_resume() -> ResumeDocument {
        ResumeDocument {
            basics: Basics {
                name: Some("Anna Kowalska".to_string()),
                label: Some("Engineer".to_string()),
                email: Some("anna@example.com".to_string()),
                summary: Some("Builds things.".to_string()),
                ..Basics::default()
            },
            work: vec![WorkEntry {
                name: Some("Acme".to_string()),
                position: Some("Engineer".to_string()),
                start_date: Some("2020-03-01".to_string()),
                end_date: None,
                highlights: vec!["Shipped the widget".to_string()],
                ..WorkEntry::default()
            }],
            skills: vec![SkillGroup {
                name: Some("Backend".to_string()),
                keywords: vec!["Rust".to_string(), "SQL".to_string()],
            }],
            languages: vec![LanguageEntry {
                language: Some("angielski".to_string()),
                fluency: Some("dobra".to_string()),
            }],
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn renders_position_at_company_with_month_year_range() {
        let text = render_resume_text(&sample_resume());
        assert!(text.contains("Engineer at Acme"));
        assert!(text.contains("marzec 2020 - Present"));
    }

    #[test]
    fn renders_sections_in_fixed_order() {
        let text = render_resume_text(&sample_resume());
        let summary = text.find("SUMMARY").unwrap();
        let work = text.find("WORK EXPERIENCE").unwrap();
        let skills = text.find("SKILLS").unwrap();
        let languages = text.find("LANGUAGES").unwrap();
        assert!(summary < work && work < skills && skills < languages);
    }

    #[test]
    fn renders_contact_lines_and_bullets() {
        let text = render_resume_text(&sample_resume());
        assert!(text.contains("Email: anna@example.com"));
        assert!(text.contains("• Shipped the widget"));
        assert!(text.contains("Backend: Rust, SQL"));
        assert!(text.contains("angielski - dobra"));
    }

    #[test]
    fn missing_position_and_company_use_placeholders() {
        let resume = ResumeDocument {
            work: vec![WorkEntry::default()],
            ..ResumeDocument::default()
        };
        let text = render_resume_text(&resume);
        assert!(text.contains("Position at Company"));
    }

    #[test]
    fn rendering_is_pure() {
        let resume = sample_resume();
        assert_eq!(render_resume_text(&resume), render_resume_text(&resume));
    }
}
