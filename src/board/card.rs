// src/board/card.rs
//! Display projection of a note.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;

use crate::note::Note;

/// Opacity of a card while it is being dragged.
pub const DRAGGING_OPACITY: f32 = 0.4;

/// Everything needed to draw one sticky note on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub text: String,
    pub font: String,
    pub bg_color: String,
    pub text_color: String,
    pub pin_color: String,
    pub mood: String,
    pub rotation: i32,
    /// CSS transform, e.g. `rotate(-3deg)`
    pub transform: String,
    /// Staggered appear animation, 0.1s per position
    pub animation_delay: String,
    pub date_label: String,
    pub opacity: f32,
}

impl CardView {
    pub fn new(note: &Note, index: usize, dragging: bool) -> Self {
        Self::in_zone(note, index, dragging, &Local)
    }

    pub fn in_zone<Tz: TimeZone>(note: &Note, index: usize, dragging: bool, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            id: note.id.clone(),
            text: note.text.clone(),
            font: note.font.clone(),
            bg_color: note.bg_color.clone(),
            text_color: note.text_color.clone(),
            pin_color: note.pin_color.clone(),
            mood: note.mood.clone(),
            rotation: note.rotation,
            transform: format!("rotate({}deg)", note.rotation),
            animation_delay: animation_delay(index),
            date_label: format_card_date(&note.date, tz),
            opacity: if dragging { DRAGGING_OPACITY } else { 1.0 },
        }
    }

    /// The font family without its generic fallback, e.g. `Handlee`.
    pub fn font_family(&self) -> &str {
        self.font.split(',').next().unwrap_or(&self.font).trim()
    }
}

/// `index * 0.1s` without a trailing `.0`, e.g. `0s`, `0.3s`, `1s`.
fn animation_delay(index: usize) -> String {
    match index % 10 {
        0 => format!("{}s", index / 10),
        tenths => format!("{}.{}s", index / 10, tenths),
    }
}

/// Short month, day, and 12-hour time, e.g. `Mar 5, 02:07 PM`.
pub fn format_card_date<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format("%b %-d, %I:%M %p").to_string()
}
