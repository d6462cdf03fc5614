//! Site integrations and fill dispatch.
//!
//! A [`sites::SiteIntegration`] knows one recruiting platform: how to
//! recognise its application form and how to map a resume onto it. The
//! [`dispatch`] module runs the guard checks, picks the first integration
//! that detects the page, and reports a [`FillOutcome`].

pub mod consent;
pub mod dispatch;
mod error;
mod fields;
pub mod notify;
pub mod render;
pub mod sites;
mod types;

pub use dispatch::{detect_form, dispatch_fill};
pub use error::FillError;
pub use render::render_resume_text;
pub use sites::{integrations, SiteIntegration};
pub use types::{DetectOutcome, FillOutcome, FillTrigger};
