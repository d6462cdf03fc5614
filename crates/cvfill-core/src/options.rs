use serde::{Deserialize, Serialize};

/// Per-run answers for questions a resume document does not carry.
///
/// Every field is optional. Sites consult these after the document's own
/// extension fields and fall back to their own hardcoded defaults when
/// both are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillOptions {
    /// Preferred employment form, e.g. `B2B` or `UoP`.
    pub employment_type: Option<String>,
    /// City offered as current location.
    pub location: Option<String>,
    /// Expected salary, digits only; sites add their own currency suffix.
    pub expected_salary: Option<String>,
    /// Free-text availability, e.g. `Natychmiast` or `2 weeks notice`.
    pub availability_date: Option<String>,
    pub cover_letter: Option<String>,
    pub salary_currency: Option<String>,
    /// Whether to tick optional future-recruitment consents.
    pub agree_to_future_recruitment: Option<bool>,
    /// `Remote`, `Hybrid` or `Onsite`.
    pub work_mode: Option<String>,
    /// Free-text answer for hybrid-arrangement questions.
    pub hybrid_work: Option<String>,
    pub english_level: Option<String>,
    pub polish_level: Option<String>,
    pub contract_type: Option<String>,
}
