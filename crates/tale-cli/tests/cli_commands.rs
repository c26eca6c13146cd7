//! Integration tests for the CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Write the forest test story into a temp directory.
fn forest_story() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("forest.json");
    fs::write(
        &path,
        r#"{
    "title": "Forest of Choices",
    "start": "start",
    "scenes": {
        "start": {
            "text": "You stand at the forest's edge.",
            "choices": [
                {"text": "Follow the guide", "next": "clearing", "setFlags": {"metGuide": true}}
            ]
        },
        "clearing": {
            "text": "A clearing opens before you.",
            "choices": [
                {
                    "text": "Press on",
                    "next": [
                        {"if": {"metGuide": true}, "scene": "safePath"},
                        {"if": {}, "scene": "dangerPath"}
                    ]
                }
            ]
        },
        "safePath": {
            "text": "The guide leads you home.",
            "isEnding": true,
            "endingTitle": "Safe Return",
            "endingText": "You made it out."
        },
        "dangerPath": {
            "text": "Shadows close in.",
            "isEnding": true,
            "endingTitle": "Lost"
        }
    }
}"#,
    )
    .unwrap();
    (dir, path)
}

#[test]
fn check_accepts_a_clean_story() {
    let (_dir, story) = forest_story();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("check")
        .arg(&story)
        .assert()
        .success()
        .stdout(predicate::str::contains("no problems found"));
}

#[test]
fn check_reports_authoring_warnings() {
    let dir = TempDir::new().unwrap();
    let story = dir.path().join("broken.json");
    fs::write(
        &story,
        r#"{
    "start": "start",
    "scenes": {
        "start": {
            "text": "...",
            "choices": [{"text": "go", "next": "missing"}]
        },
        "island": {"text": "unreachable and choiceless"}
    }
}"#,
    )
    .unwrap();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("check")
        .arg(&story)
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist"))
        .stdout(predicate::str::contains("2 warnings"));
}

#[test]
fn check_rejects_malformed_documents() {
    let dir = TempDir::new().unwrap();
    let story = dir.path().join("bad.json");
    fs::write(&story, "{not json").unwrap();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("check")
        .arg(&story)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid story document"));
}

#[test]
fn play_through_to_an_ending() {
    let (dir, story) = forest_story();
    let saves = dir.path().join("saves");

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("1\n1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Forest of Choices"))
        .stdout(predicate::str::contains("forest's edge"))
        .stdout(predicate::str::contains("[1] Follow the guide"))
        .stdout(predicate::str::contains("A clearing opens"))
        // metGuide is set, so first-match-wins resolves to the safe path.
        .stdout(predicate::str::contains("Safe Return"))
        .stdout(predicate::str::contains("You made it out."));

    // The walk left an auto snapshot behind.
    assert!(saves.join("story-save-forest-auto.json").exists());
}

#[test]
fn play_offers_resume_from_auto_save() {
    let (dir, story) = forest_story();
    let saves = dir.path().join("saves");

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("1\nquit\n")
        .assert()
        .success();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("y\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Resume from auto-save?"))
        .stdout(predicate::str::contains("(resumed from auto-save)"))
        .stdout(predicate::str::contains("A clearing opens"));
}

#[test]
fn play_declining_resume_starts_fresh() {
    let (dir, story) = forest_story();
    let saves = dir.path().join("saves");

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("1\nquit\n")
        .assert()
        .success();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("n\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("forest's edge"));
}

#[test]
fn play_manual_save_and_undo() {
    let (dir, story) = forest_story();
    let saves = dir.path().join("saves");

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("1\nsave camp\nback\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to \"camp\""))
        // back from the clearing re-renders the start scene.
        .stdout(predicate::str::contains("forest's edge"));

    assert!(saves.join("story-save-forest-camp.json").exists());
}

#[test]
fn saves_lists_slots_newest_first() {
    let (dir, story) = forest_story();
    let saves = dir.path().join("saves");

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("save camp\nquit\n")
        .assert()
        .success();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("saves")
        .arg("forest")
        .arg("--saves-dir")
        .arg(&saves)
        .assert()
        .success()
        .stdout(predicate::str::contains("camp"))
        .stdout(predicate::str::contains("auto"))
        .stdout(predicate::str::contains("2 saves"));
}

#[test]
fn saves_on_empty_directory() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("saves")
        .arg("forest")
        .arg("--saves-dir")
        .arg(dir.path().join("nothing-here"))
        .assert()
        .success()
        .stdout(predicate::str::contains("No saves found"));
}

#[test]
fn saves_clear_removes_everything() {
    let (dir, story) = forest_story();
    let saves = dir.path().join("saves");

    Command::cargo_bin("tale")
        .unwrap()
        .arg("play")
        .arg(&story)
        .arg("--saves-dir")
        .arg(&saves)
        .write_stdin("1\nsave camp\nquit\n")
        .assert()
        .success();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("saves")
        .arg("forest")
        .arg("--saves-dir")
        .arg(&saves)
        .arg("--clear")
        .assert()
        .success();

    Command::cargo_bin("tale")
        .unwrap()
        .arg("saves")
        .arg("forest")
        .arg("--saves-dir")
        .arg(&saves)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saves found"));
}
