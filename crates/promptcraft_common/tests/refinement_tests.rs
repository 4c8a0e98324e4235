//! Iterative refinement history tests.

use chrono::{TimeZone, Utc};
use promptcraft_common::error::PromptcraftError;
use promptcraft_common::refinement::{RefinementLab, RefinementLog};

#[test]
fn n_tests_give_n_versions() {
    let mut lab = RefinementLab::new();
    for i in 1..=5 {
        lab.draft = format!("Version {}", i);
        let prompt = lab.prepare().unwrap();
        let version = lab.record(prompt, format!("Antwort {}", i));
        assert_eq!(version, i);
    }
    assert_eq!(lab.history().len(), 5);
}

#[test]
fn entries_are_unchanged_by_later_appends() {
    let mut log = RefinementLog::new();
    let t0 = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
    let first = log.append_at("Erkläre Bienen", "Bienen sind Insekten.", t0).clone();

    for i in 0..10 {
        log.append(format!("Variante {}", i), "...");
    }

    assert_eq!(log.get(1), Some(&first));
    assert_eq!(log.len(), 11);
}

#[test]
fn load_copies_prompt_without_truncating() {
    let mut lab = RefinementLab::new();
    lab.record("Erste Idee", "a");
    lab.record("Zweite Idee", "b");
    lab.record("Dritte Idee", "c");

    assert_eq!(lab.load(1).unwrap(), "Erste Idee");
    assert_eq!(lab.draft, "Erste Idee");
    assert_eq!(lab.history().len(), 3);

    // Testing again appends after the newest version
    let prompt = lab.prepare().unwrap();
    assert_eq!(lab.record(prompt, "a2"), 4);
    assert_eq!(lab.history().latest().map(|e| e.prompt.as_str()), Some("Erste Idee"));
}

#[test]
fn load_unknown_version_fails() {
    let mut lab = RefinementLab::new();
    lab.draft = "Entwurf".to_string();
    assert!(matches!(lab.load(1), Err(PromptcraftError::UnknownVersion(1))));
    assert_eq!(lab.draft, "Entwurf");
}

#[test]
fn timestamps_are_non_decreasing() {
    let mut log = RefinementLog::new();
    log.append("a", "1");
    log.append("b", "2");
    let entries = log.entries();
    assert!(entries[0].timestamp <= entries[1].timestamp);
}
