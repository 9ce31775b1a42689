use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub red: u8,

    pub green: u8,

    pub blue: u8,
}

impl Color {
    /// Reported to the frontend while no reading has been stored yet.
    pub const NEUTRAL: Color = Color {
        red: 128,
        green: 128,
        blue: 128,
    };

    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestColor {
    pub color: Color,

    pub updated_at: DateTime<Utc>,
}
