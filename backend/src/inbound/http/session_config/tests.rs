//! Session configuration parsing across build modes.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use uuid::Uuid;

struct KeyFile {
    path: PathBuf,
}

impl KeyFile {
    fn with_len(len: usize) -> Self {
        let path = std::env::temp_dir().join(format!("taskhub-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        Self { path }
    }

    fn path(&self) -> String {
        self.path.display().to_string()
    }
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_env<'a>(key: &'a str, overrides: &[(&'a str, &'a str)]) -> MockEnv {
    let mut vars: Vec<(&str, &str)> = vec![
        (KEY_FILE_ENV, key),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ];
    for (name, value) in overrides {
        vars.retain(|(existing, _)| existing != name);
        vars.push((*name, *value));
    }
    env_with(&vars)
}

fn release_error(env: &MockEnv) -> SessionConfigError {
    match session_settings_from_env(env, BuildMode::Release) {
        Ok(_) => panic!("release configuration should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn complete_release_configuration_is_accepted() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let env = release_env(&key.path(), &[]);

    let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid settings");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(#[case] missing: &'static str) {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let path = key.path();
    let vars: Vec<(&str, &str)> = [
        (KEY_FILE_ENV, path.as_str()),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]
    .into_iter()
    .filter(|(name, _)| *name != missing)
    .collect();

    let error = release_error(&env_with(&vars));

    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_rejects_unparseable_cookie_secure(#[case] value: &str) {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let error = release_error(&release_env(&key.path(), &[(COOKIE_SECURE_ENV, value)]));
    assert!(matches!(
        error,
        SessionConfigError::InvalidEnv { name: COOKIE_SECURE_ENV, .. }
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let error = release_error(&release_env(&key.path(), &[(ALLOW_EPHEMERAL_ENV, "yes")]));
    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_short_keys() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN - 1);
    let error = release_error(&release_env(&key.path(), &[]));
    assert!(matches!(
        error,
        SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1
    ));
}

#[rstest]
fn release_rejects_missing_key_file() {
    let missing = std::env::temp_dir().join(format!("absent-{}", Uuid::new_v4()));
    let path = missing.display().to_string();
    let error = release_error(&release_env(&path, &[]));
    assert!(matches!(error, SessionConfigError::KeyRead { .. }));
}

#[rstest]
fn release_rejects_same_site_none_without_secure_cookie() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let env = release_env(
        &key.path(),
        &[(COOKIE_SECURE_ENV, "0"), (SAMESITE_ENV, "None")],
    );
    assert!(matches!(
        release_error(&env),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let env = env_with(&[(KEY_FILE_ENV, "/nonexistent/taskhub/key")]);

    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");

    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
#[case("sideways", SameSite::Lax)]
#[case("none", SameSite::None)]
#[case("STRICT", SameSite::Strict)]
fn debug_same_site_parsing(#[case] value: &str, #[case] expected: SameSite) {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/taskhub/key"),
        (SAMESITE_ENV, value),
    ]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
    assert_eq!(settings.same_site, expected);
}

#[rstest]
fn short_keys_are_tolerated_in_debug() {
    let key = KeyFile::with_len(8);
    let env = env_with(&[(KEY_FILE_ENV, key.path().as_str())]);
    assert!(session_settings_from_env(&env, BuildMode::Debug).is_ok());
}

#[rstest]
fn fingerprint_is_stable_for_a_key_file() {
    let key = KeyFile::with_len(SESSION_KEY_MIN_LEN);
    let env = release_env(&key.path(), &[]);
    let first = session_settings_from_env(&env, BuildMode::Release).expect("settings");
    let second = session_settings_from_env(&env, BuildMode::Release).expect("settings");

    assert_eq!(first.key_fingerprint(), second.key_fingerprint());
    assert_eq!(first.key_fingerprint().len(), FINGERPRINT_BYTES * 2);
    assert!(!format!("{first:?}").contains("kkkk"));
}

#[rstest]
#[case("1", Some(true))]
#[case(" Yes ", Some(true))]
#[case("n", Some(false))]
#[case("FALSE", Some(false))]
#[case("2", None)]
fn boolean_toggles(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool(raw), expected);
}
