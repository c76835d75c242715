//! Integration tests for seed registry parsing and file loading.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::fs;

use example_data::{RegistryError, SeedRegistry};
use rstest::rstest;

const VALID_JSON: &str = r#"{
    "version": 1,
    "countryCodes": ["GB", "us", "JP"],
    "seeds": [
        {"name": "quiet-heron", "seed": 2026, "peerCount": 12},
        {"name": "still-pond", "seed": 1234, "peerCount": 5}
    ]
}"#;

#[test]
fn parses_valid_registry() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

    assert_eq!(registry.version(), 1);
    assert_eq!(registry.country_codes(), ["GB", "US", "JP"]);
    assert_eq!(registry.seeds().len(), 2);
}

#[test]
fn finds_seed_by_name() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");
    let seed = registry.find_seed("still-pond").expect("seed found");

    assert_eq!(seed.name(), "still-pond");
    assert_eq!(seed.seed(), 1234);
    assert_eq!(seed.peer_count(), 5);
}

#[test]
fn returns_error_for_unknown_seed() {
    let registry = SeedRegistry::from_json(VALID_JSON).expect("valid registry");

    assert_eq!(
        registry.find_seed("unknown"),
        Err(RegistryError::SeedNotFound {
            name: "unknown".to_owned()
        })
    );
}

#[rstest]
#[case::malformed_json("not valid json")]
#[case::missing_version(
    r#"{"countryCodes": ["GB"], "seeds": [{"name": "a", "seed": 1, "peerCount": 1}]}"#
)]
#[case::legacy_user_count(
    r#"{"version": 1, "countryCodes": ["GB"], "seeds": [{"name": "a", "seed": 1, "userCount": 1}]}"#
)]
fn rejects_json_with_parse_error(#[case] json: &str) {
    let result = SeedRegistry::from_json(json);
    assert!(matches!(result, Err(RegistryError::ParseError { .. })));
}

#[rstest]
#[case::unsupported_version(
    r#"{"version": 99, "countryCodes": ["GB"], "seeds": [{"name": "a", "seed": 1, "peerCount": 1}]}"#,
    RegistryError::UnsupportedVersion { expected: 1, actual: 99 }
)]
#[case::invalid_country(
    r#"{"version": 1, "countryCodes": ["GB", "GBR"], "seeds": [{"name": "a", "seed": 1, "peerCount": 1}]}"#,
    RegistryError::InvalidCountryCode { index: 1, value: "GBR".to_owned() }
)]
#[case::no_countries(
    r#"{"version": 1, "countryCodes": [], "seeds": [{"name": "a", "seed": 1, "peerCount": 1}]}"#,
    RegistryError::EmptyCountryCodes
)]
#[case::empty_seeds(
    r#"{"version": 1, "countryCodes": ["GB"], "seeds": []}"#,
    RegistryError::EmptySeeds
)]
fn rejects_invalid_registry(#[case] json: &str, #[case] expected: RegistryError) {
    assert_eq!(SeedRegistry::from_json(json), Err(expected));
}

#[test]
fn loads_registry_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("peers.json");
    fs::write(&path, VALID_JSON).expect("write registry");

    let registry = SeedRegistry::from_file(&path).expect("load registry");

    assert_eq!(registry, SeedRegistry::from_json(VALID_JSON).expect("parse"));
}

#[test]
fn missing_file_reports_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");

    let result = SeedRegistry::from_file(&path);

    assert!(matches!(result, Err(RegistryError::IoError { path: p, .. }) if p == path));
}
