//! End-to-end reconciliation against real files in a temporary tree

use pretty_assertions::assert_eq;
use serde_json::json;
use tstoy_config::{
    Action, ConfigStore, Ensure, Error, Frequency, Scope, ScopePaths, Settings,
};
use tstoy_test_utils::TestScopes;

fn store(scopes: &TestScopes) -> ConfigStore {
    ConfigStore::new(ScopePaths::rooted(scopes.machine_dir(), scopes.user_dir()))
}

fn present(scope: Scope) -> Settings {
    Settings::for_scope(scope).with_ensure(Ensure::Present)
}

#[test]
fn test_enforce_twice_writes_once() {
    let scopes = TestScopes::new();
    let store = store(&scopes);
    let desired = present(Scope::User)
        .with_update_automatically(true)
        .with_update_frequency(Frequency::new(7).unwrap());

    let first = store.enforce(&desired).unwrap();
    assert_eq!(first.action, Action::Created);
    let content = scopes.read_config("user");
    let modified = scopes.modified("user");

    let second = store.enforce(&desired).unwrap();
    assert_eq!(second.action, Action::Unchanged);
    assert_eq!(scopes.read_config("user"), content);
    assert_eq!(scopes.modified("user"), modified);
    assert_eq!(first.settings, second.settings);
}

#[test]
fn test_absent_when_already_absent_is_noop() {
    let scopes = TestScopes::new();

    let result = store(&scopes).enforce(&Settings::absent(Scope::User)).unwrap();

    assert_eq!(result.action, Action::Unchanged);
    assert_eq!(
        serde_json::to_value(&result.settings).unwrap(),
        json!({"scope": "user", "ensure": "absent"})
    );
    assert_eq!(
        result.settings.config_path(),
        Some(scopes.config_path("user").as_path())
    );
    assert!(!scopes.user_dir().exists());
}

#[test]
fn test_create_then_observe() {
    let scopes = TestScopes::new();
    let store = store(&scopes);
    let desired = present(Scope::Machine).with_update_frequency(Frequency::new(30).unwrap());

    let result = store.enforce(&desired).unwrap();

    assert_eq!(result.action, Action::Created);
    assert_eq!(scopes.read_json("machine"), json!({"updates": {"checkFrequency": 30}}));

    let observed = store.load_observed_settings(Scope::Machine).unwrap();
    assert_eq!(observed.ensure, Some(Ensure::Present));
    assert_eq!(observed.update_frequency, Some(Frequency::new(30).unwrap()));
    assert_eq!(observed.update_automatically, None);
    scopes.assert_config_absent("user");
}

#[test]
fn test_create_without_fields_writes_empty_object() {
    let scopes = TestScopes::new();

    let result = store(&scopes).enforce(&Settings::for_scope(Scope::User)).unwrap();

    assert_eq!(result.action, Action::Created);
    assert_eq!(result.settings.ensure, Some(Ensure::Present));
    assert_eq!(scopes.read_json("user"), json!({}));
}

#[test]
fn test_partial_update_carries_unspecified_fields() {
    let scopes = TestScopes::new();
    scopes.write_config(
        "machine",
        r#"{"updates": {"automatic": true, "checkFrequency": 10}}"#,
    );

    let desired = present(Scope::Machine).with_update_frequency(Frequency::new(45).unwrap());
    let result = store(&scopes).enforce(&desired).unwrap();

    assert_eq!(result.action, Action::Updated);
    assert_eq!(
        scopes.read_json("machine"),
        json!({"updates": {"automatic": true, "checkFrequency": 45}})
    );
}

#[test]
fn test_unrelated_keys_survive_update() {
    let scopes = TestScopes::new();
    scopes.write_config(
        "user",
        r#"{"custom": {"x": 1}, "updates": {"automatic": false, "channel": "beta"}, "zeta": [1, 2]}"#,
    );

    let desired = present(Scope::User).with_update_automatically(true);
    store(&scopes).enforce(&desired).unwrap();

    let written = scopes.read_json("user");
    assert_eq!(
        written,
        json!({"custom": {"x": 1}, "updates": {"automatic": true, "channel": "beta"}, "zeta": [1, 2]})
    );
    let keys: Vec<_> = written.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["custom", "updates", "zeta"]);
}

#[test]
fn test_zero_frequency_is_unset() {
    let scopes = TestScopes::new();
    scopes.write_config("user", r#"{"updates": {"checkFrequency": 12}}"#);

    let mut desired = present(Scope::User);
    desired.update_frequency = Frequency::optional(0).unwrap();
    let result = store(&scopes).enforce(&desired).unwrap();

    assert_eq!(result.action, Action::Unchanged);
    assert_eq!(scopes.read_json("user"), json!({"updates": {"checkFrequency": 12}}));
}

#[test]
fn test_out_of_range_frequency_fails_before_io() {
    let scopes = TestScopes::new();
    let desired = present(Scope::User).with_update_frequency(Frequency::unchecked(91));

    let err = store(&scopes).enforce(&desired).unwrap_err();

    assert!(matches!(err.source, Error::OutOfRange { value: 91, .. }), "{err:?}");
    assert!(err.observed.is_none());
    assert!(!scopes.user_dir().exists());
}

#[test]
fn test_out_of_range_frequency_ignored_when_absent() {
    let scopes = TestScopes::new();
    let desired = Settings::absent(Scope::User).with_update_frequency(Frequency::unchecked(91));

    let result = store(&scopes).enforce(&desired).unwrap();
    assert_eq!(result.action, Action::Unchanged);
}

#[test]
fn test_out_of_range_frequency_from_json_deletes_when_absent() {
    let scopes = TestScopes::new();
    scopes.write_config("user", "{}");
    let desired =
        Settings::from_json(r#"{"scope":"user","ensure":"absent","updateFrequency":91}"#).unwrap();

    let result = store(&scopes).enforce(&desired).unwrap();

    assert_eq!(result.action, Action::Deleted);
    scopes.assert_config_absent("user");
}

#[cfg(unix)]
#[test]
fn test_write_failure_reports_observed_state() {
    let scopes = TestScopes::new();
    let path = scopes.block_writes("user");
    let desired = present(Scope::User).with_update_frequency(Frequency::new(30).unwrap());

    let err = store(&scopes).enforce(&desired).unwrap_err();

    assert!(matches!(err.source, Error::Fs(_)), "{err:?}");
    let observed = err.observed.expect("observed state after a failed write");
    assert_eq!(
        serde_json::to_value(&observed).unwrap(),
        json!({"scope": "user", "ensure": "absent"})
    );
    assert_eq!(observed.config_path(), Some(path.as_path()));
    assert!(std::fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
    assert!(!path.exists());
}

#[cfg(unix)]
#[test]
fn test_update_keeps_permissions_and_symlink() {
    use std::os::unix::fs::PermissionsExt;

    let scopes = TestScopes::new();
    let real = scopes.root().join("shared.json");
    std::fs::write(&real, r#"{"updates": {"checkFrequency": 10}}"#).unwrap();
    std::fs::set_permissions(&real, std::fs::Permissions::from_mode(0o640)).unwrap();
    std::fs::create_dir_all(scopes.machine_dir()).unwrap();
    std::os::unix::fs::symlink(&real, scopes.config_path("machine")).unwrap();

    let desired = present(Scope::Machine).with_update_frequency(Frequency::new(45).unwrap());
    let result = store(&scopes).enforce(&desired).unwrap();

    assert_eq!(result.action, Action::Updated);
    let link = std::fs::symlink_metadata(scopes.config_path("machine")).unwrap();
    assert!(link.file_type().is_symlink());
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&std::fs::read_to_string(&real).unwrap())
            .unwrap(),
        json!({"updates": {"checkFrequency": 45}})
    );
    let mode = std::fs::metadata(&real).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
}

#[test]
fn test_delete_removes_file_then_noop() {
    let scopes = TestScopes::new();
    let store = store(&scopes);
    store
        .enforce(&present(Scope::Machine).with_update_automatically(false))
        .unwrap();
    scopes.assert_config_exists("machine");

    let first = store.enforce(&Settings::absent(Scope::Machine)).unwrap();
    assert_eq!(first.action, Action::Deleted);
    scopes.assert_config_absent("machine");

    let second = store.enforce(&Settings::absent(Scope::Machine)).unwrap();
    assert_eq!(second.action, Action::Unchanged);
}

#[test]
fn test_missing_scope_fails() {
    let scopes = TestScopes::new();
    let err = store(&scopes).enforce(&Settings::default()).unwrap_err();

    assert!(err.source.is_validation());
    assert!(err.to_string().contains("Scope"), "{err}");
}

#[test]
fn test_malformed_file_is_not_overwritten() {
    let scopes = TestScopes::new();
    scopes.write_config("user", "{ not json");

    let err = store(&scopes)
        .enforce(&present(Scope::User).with_update_automatically(true))
        .unwrap_err();

    assert!(matches!(err.source, Error::Decode { .. }), "{err:?}");
    assert!(err.observed.is_none());
    assert_eq!(scopes.read_config("user"), "{ not json");
}

#[test]
fn test_non_object_updates_section_reports_observed_state() {
    let scopes = TestScopes::new();
    scopes.write_config("user", r#"{"updates": 5}"#);

    let err = store(&scopes)
        .enforce(&present(Scope::User).with_update_automatically(true))
        .unwrap_err();

    assert!(matches!(err.source, Error::Decode { .. }), "{err:?}");
    assert_eq!(scopes.read_config("user"), r#"{"updates": 5}"#);
}

#[test]
fn test_scopes_are_independent() {
    let scopes = TestScopes::new();
    let store = store(&scopes);
    store
        .enforce(&present(Scope::Machine).with_update_frequency(Frequency::new(1).unwrap()))
        .unwrap();
    store
        .enforce(&present(Scope::User).with_update_frequency(Frequency::new(90).unwrap()))
        .unwrap();

    store.enforce(&Settings::absent(Scope::User)).unwrap();

    scopes.assert_config_absent("user");
    assert_eq!(scopes.read_json("machine"), json!({"updates": {"checkFrequency": 1}}));
}
