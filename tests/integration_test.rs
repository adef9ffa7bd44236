use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn pinitup_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pinitup"))
}

fn run(dir: &Path, args: &[&str]) -> Output {
    pinitup_cmd().current_dir(dir).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn board_ids(dir: &Path) -> Vec<String> {
    let output = run(dir, &["list", "--json"]);
    assert!(output.status.success());
    let notes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    notes
        .iter()
        .map(|n| n["id"].as_str().unwrap().to_string())
        .collect()
}

fn board_texts(dir: &Path) -> Vec<String> {
    let output = run(dir, &["list", "--json"]);
    let notes: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    notes
        .iter()
        .map(|n| n["text"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_init_creates_pinitup_directory() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["init"]);

    assert!(output.status.success());
    assert!(tmp.path().join(".pinitup").exists());
    assert!(tmp.path().join(".pinitup/storage.json").exists());
    assert!(tmp.path().join(".pinitup/config.json").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = TempDir::new().unwrap();

    run(tmp.path(), &["init"]);
    let output = run(tmp.path(), &["init"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Already initialized"));
}

#[test]
fn test_add_without_init_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "Hello"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Not in a pinitup project"));
}

#[test]
fn test_empty_board_message() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No sticky notes yet. Create new one!"));
}

#[test]
fn test_add_blank_text_is_noop() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let output = run(tmp.path(), &["add", "   "]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Nothing to pin"));
    assert!(board_ids(tmp.path()).is_empty());
}

#[test]
fn test_add_prepends_and_persists() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let output = run(tmp.path(), &["add", "First"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Created!"));
    assert!(stdout(&output).contains("First"));

    run(tmp.path(), &["add", "  Second  "]);

    assert_eq!(board_texts(tmp.path()), vec!["Second", "First"]);

    let raw = std::fs::read_to_string(tmp.path().join(".pinitup/storage.json")).unwrap();
    let storage: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let notes: Vec<serde_json::Value> =
        serde_json::from_str(storage["sticky-notes"].as_str().unwrap()).unwrap();
    assert_eq!(notes.len(), 2);
    for key in [
        "id", "text", "font", "bgColor", "textColor", "mood", "rotation", "pinColor", "date",
    ] {
        assert!(notes[0].get(key).is_some(), "missing field {}", key);
    }
    let rotation = notes[0]["rotation"].as_i64().unwrap();
    assert!((-6..=6).contains(&rotation));
}

#[test]
fn test_add_json_output() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let output = run(tmp.path(), &["add", "As JSON", "--json"]);
    assert!(output.status.success());
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["text"], "As JSON");
}

#[test]
fn test_add_from_stdin() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let mut child = pinitup_cmd()
        .current_dir(tmp.path())
        .args(["add", "--stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"from a pipe\nsecond line\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    assert_eq!(board_texts(tmp.path()), vec!["from a pipe\nsecond line"]);
}

#[test]
fn test_move_places_note_before_target() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    for text in ["C", "B", "A"] {
        run(tmp.path(), &["add", text]);
    }
    assert_eq!(board_texts(tmp.path()), vec!["A", "B", "C"]);

    let ids = board_ids(tmp.path());
    let output = run(tmp.path(), &["move", &ids[2], "--before", &ids[0]]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Moved"));
    assert_eq!(board_texts(tmp.path()), vec!["C", "A", "B"]);

    // Positions work too: move the note at position 1 before position 3.
    let output = run(tmp.path(), &["move", "1", "--before", "3"]);
    assert!(output.status.success());
    assert_eq!(board_texts(tmp.path()), vec!["A", "C", "B"]);
}

#[test]
fn test_move_onto_itself_is_noop() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    run(tmp.path(), &["add", "B"]);
    run(tmp.path(), &["add", "A"]);

    let output = run(tmp.path(), &["move", "1", "--before", "1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Nothing to move"));
    assert_eq!(board_texts(tmp.path()), vec!["A", "B"]);
}

#[test]
fn test_show_and_delete() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    run(tmp.path(), &["add", "Keep"]);
    run(tmp.path(), &["add", "Drop"]);

    let ids = board_ids(tmp.path());

    let output = run(tmp.path(), &["show", &ids[0][..10]]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Drop"));
    assert!(stdout(&output).contains("Rotation: rotate("));

    let output = run(tmp.path(), &["delete", &ids[0]]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Deleted note"));
    assert_eq!(board_texts(tmp.path()), vec!["Keep"]);

    let output = run(tmp.path(), &["delete", &ids[0]]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Note not found"));
}

#[test]
fn test_clear_requires_force_when_not_interactive() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    run(tmp.path(), &["add", "Something"]);

    let output = run(tmp.path(), &["clear"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));
    assert_eq!(board_ids(tmp.path()).len(), 1);

    let output = run(tmp.path(), &["clear", "--force"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Cleared 1 notes"));
    assert!(board_ids(tmp.path()).is_empty());
}

#[test]
fn test_clear_empty_board() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let output = run(tmp.path(), &["clear"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No notes to clear"));
}

#[test]
fn test_corrupt_saved_notes_start_empty() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    std::fs::write(
        tmp.path().join(".pinitup/storage.json"),
        r#"{"sticky-notes": "[{\"id\": 12}"}"#,
    )
    .unwrap();

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No sticky notes yet"));

    // The board keeps working after discarding the bad data.
    run(tmp.path(), &["add", "Fresh start"]);
    assert_eq!(board_texts(tmp.path()), vec!["Fresh start"]);
}

#[test]
fn test_corrupt_storage_file_is_recovered() {
    for raw in ["not json", r#"{"sticky-notes": []}"#] {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), &["init"]);
        let storage = tmp.path().join(".pinitup/storage.json");
        std::fs::write(&storage, raw).unwrap();

        let output = run(tmp.path(), &["list"]);
        assert!(output.status.success(), "list failed on {:?}: {}", raw, stderr(&output));
        assert!(stdout(&output).contains("No sticky notes yet"));

        let output = run(tmp.path(), &["add", "Back in business"]);
        assert!(output.status.success(), "add failed on {:?}: {}", raw, stderr(&output));
        assert_eq!(board_texts(tmp.path()), vec!["Back in business"]);

        // The next write replaced the broken file with a readable one.
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&storage).unwrap()).unwrap();
        assert!(saved["sticky-notes"].is_string());
    }
}

#[test]
fn test_list_renders_cards() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    run(tmp.path(), &["add", "Card text"]);

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Sticky notes:"));
    assert!(out.contains("Card text"));
    assert!(out.contains("rotate("));
    assert!(out.contains("pin #"));
}
