// src/board/mod.rs
//! Headless sticky-note board.
//!
//! Holds the presentation state that sits on top of a [`NoteStore`]: the
//! text input, the create button label, the splash overlay, and the drag
//! session. Time is passed in explicitly so the two cosmetic timers are
//! deterministic.

mod card;

pub use card::{format_card_date, CardView, DRAGGING_OPACITY};

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::note::Note;
use crate::store::{KeyValueStorage, NoteStore};

pub const CREATE_LABEL: &str = "Create Sticky Note";
pub const CREATED_LABEL: &str = "Created!";
pub const CLEAR_PROMPT: &str = "Are you sure you want to delete all notes?";
pub const EMPTY_MESSAGE: &str = "No sticky notes yet. Create new one!";
pub const DRAG_FORMAT: &str = "text/plain";

/// Asks the user a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Data carried from drag start to drop: the source note's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    format: String,
    data: String,
}

impl DragPayload {
    pub fn text(data: impl Into<String>) -> Self {
        Self {
            format: DRAG_FORMAT.to_string(),
            data: data.into(),
        }
    }

    #[cfg(test)]
    fn with_format(format: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            data: data.into(),
        }
    }

    /// The payload data if it was set under `format`, like `getData`.
    pub fn get(&self, format: &str) -> Option<&str> {
        (self.format == format).then_some(self.data.as_str())
    }
}

pub struct Board<S: KeyValueStorage> {
    store: NoteStore<S>,
    input: String,
    splash_until: Instant,
    created_until: Option<Instant>,
    created_label_duration: Duration,
    dragging: Option<String>,
}

impl<S: KeyValueStorage> Board<S> {
    /// Wrap an opened store. The splash overlay starts at `now`.
    pub fn new(store: NoteStore<S>, config: &Config, now: Instant) -> Self {
        Self {
            store,
            input: String::new(),
            splash_until: now + config.splash_duration(),
            created_until: None,
            created_label_duration: config.created_label_duration(),
            dragging: None,
        }
    }

    pub fn store(&self) -> &NoteStore<S> {
        &self.store
    }

    /// Flush the store and hand back its storage.
    pub fn close(self) -> Result<S> {
        self.store.close()
    }

    pub fn splash_visible(&self, now: Instant) -> bool {
        now < self.splash_until
    }

    pub fn create_label(&self, now: Instant) -> &'static str {
        match self.created_until {
            Some(until) if now < until => CREATED_LABEL,
            _ => CREATE_LABEL,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Create a note from the current input, as the create button does.
    ///
    /// On success the input is cleared and the button reads "Created!" for
    /// the configured duration. Blank input changes nothing, and neither
    /// does a failed save: the input is kept for another try.
    pub fn submit(&mut self, now: Instant) -> Result<Option<Note>> {
        let created = self.store.create(&self.input)?;
        if created.is_some() {
            self.input.clear();
            self.created_until = Some(now + self.created_label_duration);
        }
        Ok(created)
    }

    /// Keyboard handling for the text box: Enter submits, Shift+Enter
    /// inserts a line break. Other keys are left to `set_input`.
    pub fn key_down(&mut self, key: &str, shift: bool, now: Instant) -> Result<Option<Note>> {
        if key != "Enter" {
            return Ok(None);
        }
        if shift {
            self.input.push('\n');
            return Ok(None);
        }
        self.submit(now)
    }

    pub fn delete(&mut self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }

    /// Clear every note after asking `confirmer`. Nothing is asked when the
    /// board is already empty.
    pub fn clear_all<C: Confirm + ?Sized>(&mut self, confirmer: &mut C) -> Result<bool> {
        let Some(token) = self.store.request_clear() else {
            return Ok(false);
        };
        if !confirmer.confirm(CLEAR_PROMPT) {
            debug!("clear all declined");
            return Ok(false);
        }
        self.store.confirm_clear(token)
    }

    /// Begin dragging `id`. Returns the payload to carry to the drop target.
    pub fn drag_start(&mut self, id: &str) -> Option<DragPayload> {
        self.store.get(id)?;
        self.dragging = Some(id.to_string());
        Some(DragPayload::text(id))
    }

    pub fn drag_end(&mut self) {
        self.dragging = None;
    }

    /// Drop `payload` onto the card `target_id`.
    pub fn drop_on(&mut self, payload: &DragPayload, target_id: &str) -> Result<bool> {
        let Some(moved_id) = payload.get(DRAG_FORMAT) else {
            return Ok(false);
        };
        self.store.reorder(moved_id, target_id)
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.store
            .notes()
            .iter()
            .enumerate()
            .map(|(i, note)| CardView::new(note, i, self.dragging.as_deref() == Some(note.id.as_str())))
            .collect()
    }
}
