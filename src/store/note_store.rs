// src/store/note_store.rs
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::reorder::reorder_in_place;
use super::storage::KeyValueStorage;
use crate::config::{Config, PersistPolicy};
use crate::error::Result;
use crate::note::Note;

/// What `load` found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key yet
    Missing,
    /// This many notes were restored
    Loaded(usize),
    /// Stored data was unreadable or malformed and was ignored
    Discarded,
}

/// Permission to clear the store, handed out by [`NoteStore::request_clear`].
///
/// A token only works against the revision it was issued for: any mutation
/// in between makes it stale.
#[derive(Debug, PartialEq, Eq)]
pub struct ClearToken {
    revision: u64,
}

/// The ordered note sequence plus the storage it is persisted to.
///
/// Index 0 is the front of the board (newest by default).
pub struct NoteStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    persist: PersistPolicy,
    notes: Vec<Note>,
    revision: u64,
    rng: StdRng,
}

impl<S: KeyValueStorage> NoteStore<S> {
    /// An empty store over `storage`. Nothing is read until [`load`](Self::load).
    pub fn new(storage: S, config: &Config) -> Self {
        Self {
            storage,
            key: config.storage_key.clone(),
            persist: config.persist,
            notes: Vec::new(),
            revision: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Start-of-life hook: build the store and restore whatever is stored.
    pub fn open(storage: S, config: &Config) -> Self {
        let mut store = Self::new(storage, config);
        let outcome = store.load();
        info!(?outcome, persist = %config.persist, "note store opened");
        store
    }

    /// Replace the random source with a seeded one.
    pub fn with_rng(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// End-of-life hook: flush the sequence and hand the storage back.
    pub fn close(mut self) -> Result<S> {
        self.save()?;
        info!(notes = self.notes.len(), "note store closed");
        Ok(self.storage)
    }

    /// Replace the in-memory sequence with the stored one.
    ///
    /// Never fails: unreadable or malformed data is logged and the store
    /// starts empty.
    pub fn load(&mut self) -> LoadOutcome {
        self.notes.clear();
        self.revision += 1;

        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Missing,
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read saved notes");
                return LoadOutcome::Discarded;
            }
        };

        let notes: Vec<Note> = match serde_json::from_str(&raw) {
            Ok(notes) => notes,
            Err(e) => {
                warn!(key = %self.key, error = %e, "error loading saved notes, starting empty");
                return LoadOutcome::Discarded;
            }
        };

        if let Some((id, problem)) = notes
            .iter()
            .find_map(|n| n.defect().map(|problem| (n.id.clone(), problem)))
        {
            warn!(key = %self.key, id = %id, problem, "saved notes contain an invalid note, starting empty");
            return LoadOutcome::Discarded;
        }

        let duplicate = {
            let mut seen = HashSet::new();
            notes
                .iter()
                .find(|n| !seen.insert(n.id.as_str()))
                .map(|n| n.id.clone())
        };
        if let Some(id) = duplicate {
            warn!(key = %self.key, id = %id, "saved notes contain a duplicate id, starting empty");
            return LoadOutcome::Discarded;
        }

        let count = notes.len();
        self.notes = notes;
        debug!(count, "loaded notes");
        LoadOutcome::Loaded(count)
    }

    /// Write the whole sequence under the storage key.
    pub fn save(&mut self) -> Result<()> {
        write_notes(&mut self.storage, &self.key, &self.notes)
    }

    /// Create a note from `text` and put it at the front.
    ///
    /// Returns `None` without touching anything when `text` is blank.
    pub fn create(&mut self, text: &str) -> Result<Option<Note>> {
        self.create_at(text, Utc::now())
    }

    pub fn create_at(&mut self, text: &str, now: DateTime<Utc>) -> Result<Option<Note>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let note = Note::new(text.to_string(), now, &mut self.rng);
        let mut next = self.notes.clone();
        next.insert(0, note.clone());
        self.commit(next)?;
        debug!(id = %note.id, mood = %note.mood, "created note");
        Ok(Some(note))
    }

    /// Remove the note with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next.remove(index);
        self.commit(next)?;
        debug!(id, "deleted note");
        Ok(true)
    }

    /// First half of clearing: `None` when there is nothing to clear.
    pub fn request_clear(&self) -> Option<ClearToken> {
        if self.notes.is_empty() {
            return None;
        }
        Some(ClearToken {
            revision: self.revision,
        })
    }

    /// Second half of clearing: empties the store if `token` is still current.
    pub fn confirm_clear(&mut self, token: ClearToken) -> Result<bool> {
        if token.revision != self.revision {
            debug!(
                token = token.revision,
                current = self.revision,
                "ignoring stale clear token"
            );
            return Ok(false);
        }

        let cleared = self.notes.len();
        self.commit(Vec::new())?;
        debug!(cleared, "cleared all notes");
        Ok(true)
    }

    /// Move `moved_id` to sit immediately before `target_id`.
    pub fn reorder(&mut self, moved_id: &str, target_id: &str) -> Result<bool> {
        let mut next = self.notes.clone();
        if !reorder_in_place(&mut next, moved_id, target_id) {
            return Ok(false);
        }
        self.commit(next)?;
        debug!(moved = moved_id, target = target_id, "reordered note");
        Ok(true)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Bumped on every load and mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Install `next` as the sequence. Under the eager policy it is written
    /// first, and a failed write leaves the store untouched.
    fn commit(&mut self, next: Vec<Note>) -> Result<()> {
        if self.persist == PersistPolicy::Eager {
            write_notes(&mut self.storage, &self.key, &next)?;
        }
        self.notes = next;
        self.revision += 1;
        Ok(())
    }
}

fn write_notes<S: KeyValueStorage>(storage: &mut S, key: &str, notes: &[Note]) -> Result<()> {
    let json = serde_json::to_string(notes)?;
    storage.set(key, json)?;
    debug!(count = notes.len(), "saved notes");
    Ok(())
}
