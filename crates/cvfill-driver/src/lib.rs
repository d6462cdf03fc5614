//! W3C WebDriver client used to drive a live browser: session lifecycle,
//! element lookup, script execution, and the framework-safe field-write
//! sequence.

pub mod error;
pub mod scripts;
pub mod session;

pub use error::DriverError;
pub use session::{Element, PageLocation, Session};
