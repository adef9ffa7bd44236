use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use crate::board::{Board, CardView, Confirm, EMPTY_MESSAGE};
use crate::config::Config;
use crate::error::{PinError, Result};
use crate::note::Note;
use crate::store::{FileStorage, NoteStore};

const PINITUP_DIR: &str = ".pinitup";
const STORAGE_FILE: &str = "storage.json";
const CONFIG_FILE: &str = "config.json";

/// Find the project root by looking for .pinitup/ or .git/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(PINITUP_DIR).exists() || current.join(".git").exists() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_board(root: &Path) -> Result<Board<FileStorage>> {
    let dir = root.join(PINITUP_DIR);
    let storage = FileStorage::open(&dir.join(STORAGE_FILE))?;
    let config = Config::load(&dir.join(CONFIG_FILE))?;

    let store = NoteStore::open(storage, &config);
    Ok(Board::new(store, &config, Instant::now()))
}

/// Resolve a user-supplied reference: full id, 1-based board position, or
/// unique id prefix, in that order.
fn find_note<'a>(notes: &'a [Note], query: &str) -> Result<&'a Note> {
    if query.is_empty() {
        return Err(PinError::NoteNotFound(query.to_string()));
    }

    if let Some(note) = notes.iter().find(|n| n.id == query) {
        return Ok(note);
    }

    if let Ok(pos) = query.parse::<usize>() {
        if let Some(note) = pos.checked_sub(1).and_then(|i| notes.get(i)) {
            return Ok(note);
        }
    }

    let mut matches = notes.iter().filter(|n| n.id.starts_with(query));
    match (matches.next(), matches.next()) {
        (Some(note), None) => Ok(note),
        (Some(_), Some(_)) => Err(PinError::AmbiguousId(query.to_string())),
        _ => Err(PinError::NoteNotFound(query.to_string())),
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Confirmation on the terminal, or unconditional with `--force`.
struct TerminalConfirm {
    force: bool,
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        if self.force {
            return true;
        }

        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim().eq_ignore_ascii_case("y")
    }
}

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;
    let dir = root.join(PINITUP_DIR);

    if dir.exists() {
        return Err(PinError::AlreadyInitialized);
    }

    fs::create_dir_all(&dir)?;
    FileStorage::create(&dir.join(STORAGE_FILE))?;
    Config::default().save(&dir.join(CONFIG_FILE))?;

    info!(path = %dir.display(), "initialized board");
    println!("Initialized pinitup board in {}", root.display());

    Ok(())
}

pub fn handle_add(text: Option<String>, stdin: bool, json: bool) -> Result<()> {
    let root = find_project_root();
    let mut board = open_board(&root)?;

    let text = if stdin {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        content
    } else {
        text.unwrap_or_default()
    };

    let now = Instant::now();
    board.set_input(text);
    let created = board.submit(now)?;
    let label = board.create_label(now);
    board.close()?;

    match created {
        Some(note) if json => println!("{}", serde_json::to_string_pretty(&note)?),
        Some(note) => println!(
            "{} ({}) [{}] {}",
            label,
            note.short_id(),
            note.mood,
            first_line(&note.text)
        ),
        None => println!("Nothing to pin: note text is empty."),
    }

    Ok(())
}

fn print_card(position: usize, card: &CardView) {
    let short: String = card.id.chars().take(7).collect();
    let mut lines = card.text.lines();

    println!(
        "  {:>2}. ({}) [{}] {}",
        position,
        short,
        card.mood,
        lines.next().unwrap_or("")
    );
    for line in lines {
        println!("      {}", line);
    }
    println!(
        "      {} on {}, ink {}, pin {}, {} | {}",
        card.font_family(),
        card.bg_color,
        card.text_color,
        card.pin_color,
        card.transform,
        card.date_label
    );
}

pub fn handle_list(json: bool) -> Result<()> {
    let root = find_project_root();
    let board = open_board(&root)?;

    if json {
        println!("{}", serde_json::to_string_pretty(board.store().notes())?);
    } else if board.is_empty() {
        println!("{}", EMPTY_MESSAGE);
    } else {
        println!("Sticky notes:\n");
        for (i, card) in board.cards().iter().enumerate() {
            print_card(i + 1, card);
        }
    }

    Ok(())
}

pub fn handle_show(id: String, json: bool) -> Result<()> {
    let root = find_project_root();
    let board = open_board(&root)?;

    let notes = board.store().notes();
    let note = find_note(notes, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        let position = notes.iter().position(|n| n.id == note.id).unwrap_or(0);
        let card = CardView::new(note, position, false);
        println!("Note {} ({})", position + 1, card.id);
        println!("Mood: {}", card.mood);
        println!("Font: {}", card.font);
        println!("Colors: {} on {}, pin {}", card.text_color, card.bg_color, card.pin_color);
        println!("Rotation: {}", card.transform);
        println!("Created: {}", card.date_label);
        println!("\n{}", card.text);
    }

    Ok(())
}

pub fn handle_delete(id: String) -> Result<()> {
    let root = find_project_root();
    let mut board = open_board(&root)?;

    let note = find_note(board.store().notes(), &id)?.clone();
    board.delete(&note.id)?;
    board.close()?;

    println!("Deleted note ({}) - {}", note.short_id(), first_line(&note.text));

    Ok(())
}

pub fn handle_move(id: String, before: String) -> Result<()> {
    let root = find_project_root();
    let mut board = open_board(&root)?;

    let moved = find_note(board.store().notes(), &id)?.clone();
    let target = find_note(board.store().notes(), &before)?.clone();

    // Same path as a drag from `moved` dropped on `target`.
    let moved_any = match board.drag_start(&moved.id) {
        Some(payload) => {
            let result = board.drop_on(&payload, &target.id);
            board.drag_end();
            result?
        }
        None => false,
    };
    board.close()?;

    if moved_any {
        println!(
            "Moved ({}) before ({}) - {}",
            moved.short_id(),
            target.short_id(),
            first_line(&moved.text)
        );
    } else {
        println!("Nothing to move.");
    }

    Ok(())
}

pub fn handle_clear(force: bool) -> Result<()> {
    let root = find_project_root();
    let mut board = open_board(&root)?;

    let count = board.store().len();
    if count == 0 {
        println!("No notes to clear.");
        return Ok(());
    }

    if !force && !atty::is(atty::Stream::Stdin) {
        return Err(PinError::ConfirmationRequired);
    }

    let cleared = board.clear_all(&mut TerminalConfirm { force })?;
    board.close()?;

    if cleared {
        println!("Cleared {} notes.", count);
    } else {
        println!("Cancelled.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            text: format!("text of {}", id),
            font: "Schoolbell, cursive".to_string(),
            bg_color: "#F0FFF0".to_string(),
            text_color: "#006400".to_string(),
            mood: "🎉 Festive".to_string(),
            rotation: 2,
            pin_color: "#2F4F4F".to_string(),
            date: Utc::now(),
        }
    }

    #[test]
    fn test_find_note_by_full_id() {
        let notes = vec![note("lrx1aaa"), note("lrx1aab")];
        assert_eq!(find_note(&notes, "lrx1aab").unwrap().id, "lrx1aab");
    }

    #[test]
    fn test_find_note_by_position() {
        let notes = vec![note("lrx1aaa"), note("lrx1bbb")];
        assert_eq!(find_note(&notes, "2").unwrap().id, "lrx1bbb");
        assert!(matches!(find_note(&notes, "0"), Err(PinError::NoteNotFound(_))));
        assert!(matches!(find_note(&notes, "3"), Err(PinError::NoteNotFound(_))));
    }

    #[test]
    fn test_find_note_by_prefix() {
        let notes = vec![note("lrx1aaa"), note("lrx1bbb")];
        assert_eq!(find_note(&notes, "lrx1b").unwrap().id, "lrx1bbb");
        assert!(matches!(find_note(&notes, "lrx1"), Err(PinError::AmbiguousId(_))));
        assert!(matches!(find_note(&notes, "zzz"), Err(PinError::NoteNotFound(_))));
    }

    #[test]
    fn test_find_note_empty_query() {
        let notes = vec![note("lrx1aaa")];
        assert!(matches!(find_note(&notes, ""), Err(PinError::NoteNotFound(_))));

        let notes = vec![note("lrx1aaa"), note("lrx1bbb")];
        assert!(matches!(find_note(&notes, ""), Err(PinError::NoteNotFound(_))));
    }

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("one\ntwo"), "one");
        assert_eq!(first_line(""), "");
    }
}
