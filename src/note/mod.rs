mod id;
pub mod palette;

pub use id::{generate_id, to_base36};
pub use palette::Style;

use palette::{
    is_palette_member, BACKGROUND_COLORS, FONTS, MOODS, PIN_COLORS, ROTATION_RANGE, TEXT_COLORS,
};

use chrono::{DateTime, SubsecRound, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A sticky note.
///
/// Only `id` and `text` are meaningful content; every other field is
/// decoration drawn once at creation and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Note {
    pub id: String,
    pub text: String,
    pub font: String,
    pub bg_color: String,
    pub text_color: String,
    pub mood: String,
    pub rotation: i32,
    pub pin_color: String,
    pub date: DateTime<Utc>,
}

impl Note {
    /// Build a note with a fresh id and a randomized style.
    ///
    /// Callers are expected to have rejected blank text already.
    pub fn new<R: Rng>(text: String, now: DateTime<Utc>, rng: &mut R) -> Self {
        let now = now.trunc_subsecs(3);
        let id = generate_id(&now, rng);
        let style = Style::random(rng);
        Self {
            id,
            text,
            font: style.font,
            bg_color: style.bg_color,
            text_color: style.text_color,
            mood: style.mood,
            rotation: style.rotation,
            pin_color: style.pin_color,
            date: now,
        }
    }

    /// What is wrong with a note read back from storage, if anything.
    pub fn defect(&self) -> Option<&'static str> {
        if self.id.is_empty() {
            return Some("empty id");
        }
        if self.text.trim().is_empty() {
            return Some("blank text");
        }
        if !ROTATION_RANGE.contains(&self.rotation) {
            return Some("rotation out of range");
        }
        let in_palettes = is_palette_member(&FONTS, &self.font)
            && is_palette_member(&BACKGROUND_COLORS, &self.bg_color)
            && is_palette_member(&TEXT_COLORS, &self.text_color)
            && is_palette_member(&MOODS, &self.mood)
            && is_palette_member(&PIN_COLORS, &self.pin_color);
        if !in_palettes {
            return Some("style outside the palettes");
        }
        None
    }

    /// First seven characters of the id, for compact display.
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}
