//! Shared consent-checkbox heuristic.
//!
//! One page scan collects every checkbox with its label text; boxes whose
//! label matches the consent vocabulary are clicked when unchecked.
//! Clicking (instead of assigning `.checked`) keeps framework state and
//! visual state in sync.

use serde_json::Value;

use cvfill_driver::{scripts, Element, Session};

use crate::error::FillError;

/// Label fragments that mark a checkbox as a consent clause, in English
/// and Polish.
pub const CONSENT_KEYWORDS: &[&str] = &[
    "consent",
    "agree",
    "privacy",
    "terms",
    "gdpr",
    "acknowledge",
    "accept",
    "policy",
    "zgod",
    "zgadzam",
    "akceptuj",
    "wyrażam",
    "przetwarzanie",
    "rodo",
];

#[must_use]
pub fn label_indicates_consent(label: &str) -> bool {
    let label = label.to_lowercase();
    CONSENT_KEYWORDS.iter().any(|kw| label.contains(kw))
}

pub(crate) struct ScannedBox {
    pub(crate) element: Element,
    pub(crate) label: String,
    pub(crate) checked: bool,
}

pub(crate) async fn scan_checkboxes(
    session: &Session,
    scope: Option<&str>,
) -> Result<Vec<ScannedBox>, FillError> {
    let scope_arg = scope.map_or(Value::Null, |s| Value::String(s.to_string()));
    let value = session
        .execute(scripts::COLLECT_CHECKBOXES, vec![scope_arg])
        .await?;
    let mut boxes = Vec::new();
    for entry in value.as_array().into_iter().flatten() {
        let Some(element) = entry.get("element").and_then(Element::from_value) else {
            continue;
        };
        boxes.push(ScannedBox {
            element,
            label: entry
                .get("label")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            checked: entry
                .get("checked")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        });
    }
    Ok(boxes)
}

/// Click every unchecked checkbox whose label matches the consent
/// vocabulary. `scope` narrows the scan to a CSS selector; `None` scans
/// the whole document. Returns the number of boxes clicked.
///
/// # Errors
///
/// Returns [`FillError`] on driver failure.
pub async fn check_consent_boxes(
    session: &Session,
    scope: Option<&str>,
) -> Result<u32, FillError> {
    let mut clicked = 0;
    for checkbox in scan_checkboxes(session, scope).await? {
        if checkbox.checked || !label_indicates_consent(&checkbox.label) {
            continue;
        }
        session.click(&checkbox.element).await?;
        tracing::debug!(label = %checkbox.label, "clicked consent checkbox");
        clicked += 1;
    }
    Ok(clicked)
}

/// Click every unchecked checkbox under `scope` regardless of label.
/// Some forms gate submission on all of their clauses, so their site
/// integration opts into this blanket policy.
///
/// # Errors
///
/// Returns [`FillError`] on driver failure.
pub async fn check_all_boxes(session: &Session, scope: Option<&str>) -> Result<u32, FillError> {
    let mut clicked = 0;
    for checkbox in scan_checkboxes(session, scope).await? {
        if checkbox.checked {
            continue;
        }
        session.click(&checkbox.element).await?;
        clicked += 1;
    }
    Ok(clicked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_english_and_polish_vocabulary() {
        assert!(label_indicates_consent(
            "I agree to the privacy policy"
        ));
        assert!(label_indicates_consent(
            "Wyrażam zgodę na przetwarzanie moich danych osobowych"
        ));
        assert!(label_indicates_consent("Akceptuję regulamin"));
        assert!(label_indicates_consent("RODO clause"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(label_indicates_consent("I AGREE to the terms"));
    }

    #[test]
    fn ignores_unrelated_labels() {
        assert!(!label_indicates_consent("Subscribe to newsletter"));
        assert!(!label_indicates_consent("Remember me"));
        assert!(!label_indicates_consent(""));
    }
}
