//! Command implementations for tstoy-cli
//!
//! Each command writes its JSON to the given writer so callers decide
//! where stdout goes.

pub mod get;
pub mod path;
pub mod schema;
pub mod set;
pub mod test;

pub use get::run_get;
pub use path::run_show_path;
pub use schema::run_schema;
pub use set::run_set;
pub use test::run_test;

#[cfg(test)]
pub(crate) mod fixtures {
    use tstoy_config::{ConfigStore, ScopePaths};
    use tstoy_test_utils::TestScopes;

    pub fn store(scopes: &TestScopes) -> ConfigStore {
        ConfigStore::new(ScopePaths::rooted(scopes.machine_dir(), scopes.user_dir()))
    }

    pub fn lines(out: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }
}
