//! Structural checks over the shipped scenario library
//!
//! These run without a browser: every YAML file must parse, validate,
//! and reference only roles and fixture files the suite can actually
//! resolve.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chumchon_common::{CredentialRegistry, FixtureArena};
use chumchon_e2e::scenario::{Scenario, Step};

fn specs_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("specs")
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root")
}

#[test]
fn every_shipped_scenario_parses_and_validates() {
    let scenarios = Scenario::load_all(&specs_dir()).expect("scenario library loads");
    assert!(
        scenarios.len() >= 10,
        "expected the full library, found {}",
        scenarios.len()
    );
    for scenario in &scenarios {
        scenario.validate().expect("scenario validates");
    }
}

#[test]
fn scenario_names_are_unique() {
    let scenarios = Scenario::load_all(&specs_dir()).unwrap();
    let mut seen = HashSet::new();
    for scenario in &scenarios {
        assert!(
            seen.insert(scenario.name.clone()),
            "duplicate scenario name: {}",
            scenario.name
        );
    }
}

#[test]
fn every_login_role_resolves_in_the_default_registry() {
    let registry = CredentialRegistry::default();
    for scenario in Scenario::load_all(&specs_dir()).unwrap() {
        if let Some(role) = scenario.login_as {
            registry
                .lookup(role)
                .unwrap_or_else(|e| panic!("scenario '{}': {}", scenario.name, e));
        }
    }
}

#[test]
fn upload_fixture_files_exist() {
    let root = workspace_root();
    for scenario in Scenario::load_all(&specs_dir()).unwrap() {
        for step in &scenario.steps {
            if let Step::Upload { file, .. } = step {
                assert!(
                    root.join(file).is_file(),
                    "scenario '{}' uploads missing file {}",
                    scenario.name,
                    file
                );
            }
        }
    }
}

#[test]
fn negative_login_scenarios_assert_the_thai_validation_messages() {
    let scenarios = Scenario::load_all(&specs_dir()).unwrap();

    let wrong_password = scenarios
        .iter()
        .find(|s| s.name == "login-wrong-password")
        .expect("wrong-password scenario present");
    assert!(wrong_password.login_as.is_none());
    assert!(scenario_asserts_text(wrong_password, "รหัสผ่านไม่ถูกต้อง"));

    let empty_fields = scenarios
        .iter()
        .find(|s| s.name == "login-empty-fields")
        .expect("empty-fields scenario present");
    assert!(scenario_asserts_text(empty_fields, "กรุณาป้อนอีเมล"));
    assert!(scenario_asserts_text(empty_fields, "กรุณาป้อนรหัสผ่าน"));
}

#[test]
fn records_created_by_scenarios_are_run_scoped() {
    // Any value a scenario types into a "create" form must carry the
    // run ID so parallel runs and reruns never collide.
    for scenario in Scenario::load_all(&specs_dir()).unwrap() {
        if !scenario.tags.iter().any(|t| t == "crud") {
            continue;
        }
        let creates_unique_record = scenario.steps.iter().any(|step| {
            matches!(step, Step::Fill { value, .. } if value.contains("{{run_id}}"))
        });
        assert!(
            creates_unique_record,
            "crud scenario '{}' creates no run-scoped record",
            scenario.name
        );
    }
}

#[test]
fn every_placeholder_in_the_library_resolves() {
    use chumchon_e2e::scenario::Locator;

    let arena = FixtureArena::with_run_id("r1");
    let check = |scenario: &str, raw: &str| {
        let resolved = arena.substitute(raw);
        assert!(
            !resolved.contains("{{"),
            "scenario '{}': unresolved placeholder in {:?}",
            scenario,
            raw
        );
    };

    for scenario in Scenario::load_all(&specs_dir()).unwrap() {
        for step in &scenario.steps {
            match step {
                Step::Fill { locator, value } | Step::Select { locator, value } => {
                    check(&scenario.name, value);
                    if let Locator::Role { name, .. } = locator {
                        check(&scenario.name, name);
                    }
                }
                Step::Click { locator, .. }
                | Step::Assert { locator, .. }
                | Step::DismissIfVisible { locator } => {
                    match locator {
                        Locator::Role { name, .. } => check(&scenario.name, name),
                        Locator::Text(t) => check(&scenario.name, t),
                        _ => {}
                    }
                    if let Step::Assert {
                        text, text_contains, ..
                    } = step
                    {
                        if let Some(t) = text {
                            check(&scenario.name, t);
                        }
                        if let Some(t) = text_contains {
                            check(&scenario.name, t);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

fn scenario_asserts_text(scenario: &Scenario, needle: &str) -> bool {
    use chumchon_e2e::scenario::Locator;
    scenario.steps.iter().any(|step| match step {
        Step::Assert {
            locator: Locator::Text(t),
            visible: Some(true),
            ..
        } => t == needle,
        _ => false,
    })
}
