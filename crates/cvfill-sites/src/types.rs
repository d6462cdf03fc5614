/// What started a fill attempt. Automatic triggers carry extra loop
/// protection (reload detection) that manual ones skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillTrigger {
    Manual,
    Auto,
}

/// Result record of a dispatch, reported to the caller and shown in the
/// on-page notification.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    pub success: bool,
    pub message: String,
    /// Site name, or one of `unknown`, `disabled`, `skipped`,
    /// `already_filled`.
    pub form_type: String,
}

/// Result of a detection-only pass.
#[derive(Debug, Clone)]
pub struct DetectOutcome {
    pub detected: bool,
    pub form_type: String,
    pub url: String,
}
