//! Transient on-page notification, shown after dispatch decides an
//! outcome. Fillers never call this themselves.

use serde_json::json;

use cvfill_driver::{scripts, Session};

use crate::error::FillError;

/// Show a corner notification in the page. Failures here are the
/// caller's to downgrade; a missed notification must not fail a fill.
///
/// # Errors
///
/// Returns [`FillError`] on driver failure.
pub async fn show_notification(
    session: &Session,
    message: &str,
    success: bool,
) -> Result<(), FillError> {
    session
        .execute(scripts::SHOW_NOTIFICATION, vec![json!(message), json!(success)])
        .await?;
    Ok(())
}
