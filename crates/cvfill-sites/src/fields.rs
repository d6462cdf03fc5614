//! Field-resolution helpers shared by the site integrations: selector
//! chains with label-text fallback, native and overlay dropdowns, and a
//! dedup set so two lookup paths never write the same element twice.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::json;

use cvfill_driver::{scripts, Element, Session};

use crate::error::FillError;

const OVERLAY_OPEN_PAUSE: Duration = Duration::from_millis(150);
const OVERLAY_PICK_PAUSE: Duration = Duration::from_millis(100);

pub(crate) async fn find_first(
    session: &Session,
    selectors: &[&str],
) -> Result<Option<Element>, FillError> {
    for css in selectors {
        if let Some(element) = session.find(css).await? {
            return Ok(Some(element));
        }
    }
    Ok(None)
}

pub(crate) async fn find_by_label(
    session: &Session,
    labels: &[&str],
) -> Result<Option<Element>, FillError> {
    for label in labels {
        let value = session
            .execute(scripts::FIND_BY_LABEL, vec![json!(label)])
            .await?;
        if let Some(element) = Element::from_value(&value) {
            return Ok(Some(element));
        }
    }
    Ok(None)
}

/// Resolve a field by trying CSS selectors first, then label text, and
/// write `value` into it. Elements already written this run are skipped,
/// as are empty values. Returns whether a write happened.
pub(crate) async fn fill_chain(
    session: &Session,
    filled: &mut HashSet<Element>,
    selectors: &[&str],
    labels: &[&str],
    value: &str,
) -> Result<bool, FillError> {
    if value.is_empty() {
        return Ok(false);
    }
    let element = match find_first(session, selectors).await? {
        Some(element) => Some(element),
        None => find_by_label(session, labels).await?,
    };
    let Some(element) = element else {
        return Ok(false);
    };
    if !filled.insert(element.clone()) {
        return Ok(false);
    }
    session.fill_field(&element, value).await?;
    Ok(true)
}

/// Pick an option of a native `<select>` by option-text substring.
pub(crate) async fn select_native_option(
    session: &Session,
    element: &Element,
    wanted: &str,
) -> Result<bool, FillError> {
    let value = session
        .execute(
            scripts::SELECT_NATIVE_OPTION,
            vec![element.to_arg(), json!(wanted)],
        )
        .await?;
    Ok(value.as_bool().unwrap_or(false))
}

/// Drive an overlay dropdown (Angular Material style): click the trigger,
/// wait for the option list to render, then click the first option whose
/// text contains `wanted` case-insensitively.
pub(crate) async fn select_overlay_option(
    session: &Session,
    trigger: &Element,
    option_css: &str,
    wanted: &str,
) -> Result<bool, FillError> {
    session.click(trigger).await?;
    tokio::time::sleep(OVERLAY_OPEN_PAUSE).await;
    let wanted = wanted.to_lowercase();
    for option in session.find_all(option_css).await? {
        let text = session.text(&option).await?;
        if text.to_lowercase().contains(&wanted) {
            session.click(&option).await?;
            tokio::time::sleep(OVERLAY_PICK_PAUSE).await;
            return Ok(true);
        }
    }
    Ok(false)
}
