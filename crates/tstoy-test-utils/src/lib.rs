//! Shared test utilities for the tstoy-resource workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`scopes`]: [`TestScopes`](scopes::TestScopes), a pair of throwaway
//!   machine and user configuration directories

pub mod scopes;

pub use scopes::TestScopes;
