//! Declarative state enforcement for the tstoy settings file
//!
//! A [`ConfigStore`] resolves the settings file for a [`Scope`], reads what
//! is there, and reconciles it with desired [`Settings`]:
//!
//! - [`ConfigStore::load_observed_settings`] reports the current state
//! - [`ConfigStore::enforce`] creates, updates or deletes the file, writing
//!   only when something differs
//! - [`ConfigStore::test`] compares without writing
//!
//! Unknown keys in the file survive every rewrite.

pub mod compare;
pub mod document;
pub mod enforce;
pub mod error;
pub mod paths;
pub mod schema;
pub mod settings;
pub mod store;
pub mod types;

pub use compare::TestReport;
pub use document::{Document, Updates};
pub use enforce::{Action, EnforceError, Enforcement};
pub use error::{Error, Result};
pub use paths::{PathResolver, ScopePaths};
pub use schema::resource_schema;
pub use settings::Settings;
pub use store::{ConfigStore, Observation};
pub use types::{Ensure, Frequency, Scope};
