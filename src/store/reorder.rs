// src/store/reorder.rs
//! Drag-and-drop reordering as a plain sequence operation.

use crate::note::Note;

/// Move the note `moved_id` so it sits immediately before `target_id`.
///
/// Returns `false` and leaves `notes` untouched when the ids are equal or
/// either one is missing. The relative order of every other note is kept.
pub fn reorder_in_place(notes: &mut Vec<Note>, moved_id: &str, target_id: &str) -> bool {
    if moved_id == target_id {
        return false;
    }

    let Some(from) = notes.iter().position(|n| n.id == moved_id) else {
        return false;
    };
    if !notes.iter().any(|n| n.id == target_id) {
        return false;
    }

    let moved = notes.remove(from);
    // Target index is taken after removal so the note lands before it in
    // both drag directions.
    let to = notes
        .iter()
        .position(|n| n.id == target_id)
        .unwrap_or(notes.len());
    notes.insert(to, moved);
    true
}

/// Pure form of [`reorder_in_place`]: returns the reordered sequence.
pub fn reorder(notes: &[Note], moved_id: &str, target_id: &str) -> Vec<Note> {
    let mut out = notes.to_vec();
    reorder_in_place(&mut out, moved_id, target_id);
    out
}
