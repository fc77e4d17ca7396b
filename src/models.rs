use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Header of the first column in Words tables, also the first-key field of processed rows
pub const FIRST_FIELD: &str = "first/second";

/// Header of the first column in Edges/Corners tables
pub const EDGE_FIRST_FIELD: &str = "1st ->";

/// Cell or header value meaning "no entry"
pub const SENTINEL: &str = "-";

/// Returns true if a cell holds a usable value
pub fn is_filled(value: &str) -> bool {
    !value.is_empty() && value != SENTINEL
}

/// Represents the supported drill modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Words,
    Edges,
    Corners,
}

impl Mode {
    /// Returns the stored identifier (e.g., "words")
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Words => "words",
            Mode::Edges => "edges",
            Mode::Corners => "corners",
        }
    }

    /// Returns the human readable label (e.g., "Words")
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Words => "Words",
            Mode::Edges => "Edges",
            Mode::Corners => "Corners",
        }
    }

    /// Edges and corners store an algorithm per pair, words store a word
    pub fn has_algorithm(&self) -> bool {
        !matches!(self, Mode::Words)
    }

    /// Build the pair string. Edges/corners put the second letter first.
    pub fn pair_string(&self, first: &str, second: &str) -> String {
        match self {
            Mode::Words => format!("{}{}", first, second),
            Mode::Edges | Mode::Corners => format!("{}{}", second, first),
        }
    }

    /// Returns all supported modes
    pub fn all() -> &'static [Mode] {
        &[Mode::Words, Mode::Edges, Mode::Corners]
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "words" => Ok(Mode::Words),
            "edges" => Ok(Mode::Edges),
            "corners" => Ok(Mode::Corners),
            other => Err(format!("unknown mode: {}", other)),
        }
    }
}

/// One CSV record as ordered (header, cell) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Get the cell under a header
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A processed table row: the first key and its second-key associations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillRow {
    pub first: String,
    /// Second key to word or algorithm, in column order
    pub entries: Vec<(String, String)>,
}

impl DrillRow {
    /// Get the value for a second key
    pub fn get(&self, second: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == second)
            .map(|(_, v)| v.as_str())
    }

    /// Second keys that have a usable value
    pub fn candidates(&self) -> Vec<&(String, String)> {
        self.entries
            .iter()
            .filter(|(k, v)| k != FIRST_FIELD && is_filled(v))
            .collect()
    }
}

/// A drill the trainer quizzes the user on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillPair {
    pub pair: String,
    pub first: String,
    pub second: String,
    pub value: String,
}

/// A pair value split into word or algorithm, depending on the mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillValue {
    pub word: String,
    pub algorithm: String,
}

impl DrillValue {
    pub fn parse(value: &str, has_algorithm: bool) -> Self {
        if value.is_empty() {
            return Self::default();
        }
        if has_algorithm {
            Self {
                word: String::new(),
                algorithm: value.trim().to_string(),
            }
        } else {
            Self {
                word: value.trim().to_string(),
                algorithm: String::new(),
            }
        }
    }
}

/// Image URLs for one search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    pub high: String,
    pub low: String,
}

impl ImagePair {
    /// Get the URL for a quality setting
    pub fn url(&self, quality: ImageQuality) -> &str {
        match quality {
            ImageQuality::High => &self.high,
            ImageQuality::Low => &self.low,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    #[default]
    High,
    Low,
}

impl FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(ImageQuality::High),
            "low" => Ok(ImageQuality::Low),
            other => Err(format!("unknown image quality: {}", other)),
        }
    }
}

/// User preferences, persisted as one JSON record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub show_images: bool,
    pub image_quality: ImageQuality,
    pub current_mode: Mode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_images: false,
            image_quality: ImageQuality::High,
            current_mode: Mode::Words,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Only "light" selects the light theme, anything else is dark
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Class the UI root carries for this theme
    pub fn root_class(&self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some("dark"),
            Theme::Light => None,
        }
    }
}
