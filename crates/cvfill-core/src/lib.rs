//! Shared domain types for cvfill: the JSON Resume document model,
//! per-run fill options, and environment-based settings.

pub mod config;
pub mod options;
pub mod resume;

pub use config::{load_settings, load_settings_from_env, ConfigError, Settings};
pub use options::FillOptions;
pub use resume::{parse_flex_date, Basics, ResumeDocument, WorkEntry};
