//! Background music model types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mood {
    Romantic,
    LoFi,
    Bollywood,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub url: String,
    pub mood: Mood,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        mood: Mood,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            mood,
        }
    }
}

/// The stock playlist shipped with the celebration pages.
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new(
            "romantic-piano",
            "Romantic Piano",
            "/music/romantic-piano.mp3",
            Mood::Romantic,
        ),
        Track::new("lo-fi-cute", "Cute Lo-Fi", "/music/lo-fi-cute.mp3", Mood::LoFi),
        Track::new(
            "bollywood-love",
            "Bollywood Love",
            "/music/bollywood-love.mp3",
            Mood::Bollywood,
        ),
    ]
}

/// Playback volume, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Volume(f32);

impl Volume {
    pub const SILENT: Volume = Volume(0.0);
    pub const MAX: Volume = Volume(1.0);

    /// Clamps into range; NaN becomes silence.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::SILENT;
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Volume(0.5)
    }
}

impl From<f32> for Volume {
    fn from(value: f32) -> Self {
        Volume::new(value)
    }
}

impl From<Volume> for f32 {
    fn from(value: Volume) -> Self {
        value.0
    }
}
