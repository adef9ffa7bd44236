// src/note/palette.rs
//! Fixed style palettes for sticky notes.
//!
//! Every decorative attribute of a note is drawn once, uniformly, from one
//! of these tables when the note is created.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

pub const FONTS: [&str; 10] = [
    "Amatic SC, cursive",
    "Gloria Hallelujah, cursive",
    "Handlee, cursive",
    "Patrick Hand, cursive",
    "Annie Use Your Telescope, cursive",
    "Coming Soon, cursive",
    "Crafty Girls, cursive",
    "Fontdiner Swanky, cursive",
    "Schoolbell, cursive",
    "Special Elite, serif",
];

pub const BACKGROUND_COLORS: [&str; 10] = [
    "#FFFACD", "#E6E6FA", "#F0FFF0", "#FFE4E1", "#E0FFFF", "#F5F5DC", "#F0E68C", "#FFF5EE",
    "#F5FFFA", "#FAF0E6",
];

pub const TEXT_COLORS: [&str; 10] = [
    "#2F2F2F", "#4B0082", "#006400", "#8B0000", "#483D8B", "#2E8B57", "#8A2BE2", "#A52A2A",
    "#556B2F", "#4682B4",
];

pub const MOODS: [&str; 10] = [
    "🌟 Inspired",
    "🌈 Joyful",
    "🕊️ Peaceful",
    "🔥 Passionate",
    "🌙 Reflective",
    "⚡ Dynamic",
    "🍃 Serene",
    "🎉 Festive",
    "📚 Thoughtful",
    "🌺 Cheerful",
];

pub const PIN_COLORS: [&str; 5] = ["#FF4500", "#8A2BE2", "#228B22", "#FFD700", "#2F4F4F"];

/// Rotation in whole degrees, both ends inclusive.
pub const ROTATION_RANGE: RangeInclusive<i32> = -6..=6;

/// The decorative attributes assigned to a note at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub font: String,
    pub bg_color: String,
    pub text_color: String,
    pub mood: String,
    pub rotation: i32,
    pub pin_color: String,
}

impl Style {
    /// Draw each attribute independently and uniformly from its palette.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            font: pick(rng, &FONTS),
            bg_color: pick(rng, &BACKGROUND_COLORS),
            text_color: pick(rng, &TEXT_COLORS),
            mood: pick(rng, &MOODS),
            rotation: rng.gen_range(ROTATION_RANGE),
            pin_color: pick(rng, &PIN_COLORS),
        }
    }
}

fn pick<R: Rng>(rng: &mut R, palette: &[&str]) -> String {
    // Palettes are non-empty constants, so `choose` always yields a value.
    palette.choose(rng).copied().unwrap_or_default().to_string()
}

pub fn is_palette_member(palette: &[&str], value: &str) -> bool {
    palette.contains(&value)
}
