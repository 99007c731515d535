//! Filesystem primitives for the tstoy configuration resource
//!
//! Provides whole-file reads that report absence distinctly, atomic
//! whole-file writes, and removal.

pub mod error;
pub mod io;

pub use error::{Error, IoOperation, Result};
