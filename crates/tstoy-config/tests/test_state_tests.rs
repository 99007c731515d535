//! Desired-state checks never touch the file

use pretty_assertions::assert_eq;
use tstoy_config::{ConfigStore, Ensure, Frequency, Scope, ScopePaths, Settings};
use tstoy_test_utils::TestScopes;

fn store(scopes: &TestScopes) -> ConfigStore {
    ConfigStore::new(ScopePaths::rooted(scopes.machine_dir(), scopes.user_dir()))
}

#[test]
fn test_reports_drift_without_writing() {
    let scopes = TestScopes::new();
    scopes.write_config("user", r#"{"updates": {"automatic": true, "checkFrequency": 10}}"#);
    let modified = scopes.modified("user");

    let desired = Settings::for_scope(Scope::User)
        .with_update_automatically(true)
        .with_update_frequency(Frequency::new(20).unwrap());
    let report = store(&scopes).test(&desired).unwrap();

    assert!(!report.in_desired_state);
    assert_eq!(report.differing_properties, vec!["updateFrequency"]);
    assert_eq!(report.actual_state.update_frequency, Some(Frequency::new(10).unwrap()));
    assert_eq!(scopes.modified("user"), modified);
}

#[test]
fn test_in_desired_state_after_enforce() {
    let scopes = TestScopes::new();
    let store = store(&scopes);
    let desired = Settings::for_scope(Scope::Machine)
        .with_ensure(Ensure::Present)
        .with_update_automatically(false);

    assert!(!store.test(&desired).unwrap().in_desired_state);
    store.enforce(&desired).unwrap();
    assert!(store.test(&desired).unwrap().in_desired_state);
}

#[test]
fn test_absent_matches_missing_file() {
    let scopes = TestScopes::new();
    let report = store(&scopes).test(&Settings::absent(Scope::User)).unwrap();

    assert!(report.in_desired_state);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        serde_json::json!({
            "inDesiredState": true,
            "actualState": {"scope": "user", "ensure": "absent"},
            "differingProperties": []
        })
    );
}
