//! Fill dispatch: guard checks, site selection, and outcome reporting.
//!
//! The dispatcher owns everything that is not site specific. It refuses
//! to run twice on the same page (a successful fill leaves markers in
//! session and local storage), walks the integrations in priority order,
//! and records the outcome both for the caller and as an on-page
//! notification.

use chrono::Utc;

use cvfill_core::{FillOptions, ResumeDocument, Settings};
use cvfill_driver::Session;

use crate::error::FillError;
use crate::notify::show_notification;
use crate::sites::integrations;
use crate::types::{DetectOutcome, FillOutcome, FillTrigger};

fn page_key(url: &str) -> String {
    format!("cvfill_{url}")
}

/// True when the page was filled recently enough that another pass would
/// double-write. Session storage survives SPA navigation within the tab;
/// the local-storage timestamp covers full reloads inside the window.
async fn recently_filled(
    session: &Session,
    url: &str,
    window_secs: u64,
) -> Result<bool, FillError> {
    let key = page_key(url);
    if session.session_storage_get(&key).await?.is_some() {
        return Ok(true);
    }
    if let Some(raw) = session.local_storage_get(&format!("{key}_time")).await? {
        if let Ok(marked_at) = raw.parse::<i64>() {
            let elapsed = Utc::now().timestamp_millis() - marked_at;
            #[allow(clippy::cast_possible_wrap)]
            if elapsed >= 0 && elapsed < (window_secs as i64) * 1000 {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

async fn mark_filled(session: &Session, url: &str) -> Result<(), FillError> {
    let key = page_key(url);
    session.session_storage_set(&key, "filled").await?;
    session
        .local_storage_set(
            &format!("{key}_time"),
            &Utc::now().timestamp_millis().to_string(),
        )
        .await?;
    Ok(())
}

async fn notify(session: &Session, message: &str, success: bool) {
    if let Err(err) = show_notification(session, message, success).await {
        tracing::warn!(error = %err, "could not show page notification");
    }
}

/// Run one fill attempt against the current page.
///
/// Guard order: the feature toggle (both triggers), then for automatic
/// triggers the reload check, then the already-filled markers. After the
/// guards the first integration whose detector fires gets to fill;
/// markers are written only when it reports at least one field.
///
/// # Errors
///
/// Returns [`FillError`] when the driver fails during the guard checks.
/// Site fill failures are reported in the outcome, not as errors.
pub async fn dispatch_fill(
    session: &Session,
    resume: &ResumeDocument,
    options: &FillOptions,
    settings: &Settings,
    trigger: FillTrigger,
) -> Result<FillOutcome, FillError> {
    if !settings.auto_fill_enabled {
        return Ok(FillOutcome {
            success: false,
            message: "Form filling is disabled".to_string(),
            form_type: "disabled".to_string(),
        });
    }

    if trigger == FillTrigger::Auto && session.was_reload().await? {
        tracing::debug!("page reload detected, skipping automatic fill");
        return Ok(FillOutcome {
            success: false,
            message: "Page was reloaded, skipping".to_string(),
            form_type: "skipped".to_string(),
        });
    }

    let location = session.page_location().await?;
    if recently_filled(session, &location.url, settings.fill_window_secs).await? {
        tracing::debug!(url = %location.url, "page already filled recently");
        return Ok(FillOutcome {
            success: false,
            message: "This page was already filled".to_string(),
            form_type: "already_filled".to_string(),
        });
    }

    for site in integrations() {
        let detected = match site.detect(session).await {
            Ok(detected) => detected,
            Err(err) => {
                tracing::warn!(site = site.name(), error = %err, "detection failed");
                continue;
            }
        };
        if !detected {
            continue;
        }
        tracing::debug!(site = site.name(), url = %location.url, "detected application form");

        return match site.fill(session, resume, options).await {
            Ok(filled) if filled > 0 => {
                mark_filled(session, &location.url).await?;
                let message = format!("{} form filled ({filled} field(s))", site.name());
                notify(session, &message, true).await;
                Ok(FillOutcome {
                    success: true,
                    message,
                    form_type: site.name().to_string(),
                })
            }
            Ok(_) => Ok(FillOutcome {
                success: false,
                message: format!("{} form detected but no fields matched", site.name()),
                form_type: site.name().to_string(),
            }),
            Err(err) => {
                tracing::error!(site = site.name(), error = %err, "fill failed");
                let message = format!("Failed to fill {} form", site.name());
                notify(session, &message, false).await;
                Ok(FillOutcome {
                    success: false,
                    message,
                    form_type: site.name().to_string(),
                })
            }
        };
    }

    Ok(FillOutcome {
        success: false,
        message: "No supported application form on this page".to_string(),
        form_type: "unknown".to_string(),
    })
}

/// Detection-only pass over the integrations, in the same priority order
/// as [`dispatch_fill`].
///
/// # Errors
///
/// Returns [`FillError`] when the driver fails to report the page URL.
pub async fn detect_form(session: &Session) -> Result<DetectOutcome, FillError> {
    let location = session.page_location().await?;
    for site in integrations() {
        match site.detect(session).await {
            Ok(true) => {
                return Ok(DetectOutcome {
                    detected: true,
                    form_type: site.name().to_string(),
                    url: location.url,
                });
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!(site = site.name(), error = %err, "detection failed");
            }
        }
    }
    Ok(DetectOutcome {
        detected: false,
        form_type: "unknown".to_string(),
        url: location.url,
    })
}
