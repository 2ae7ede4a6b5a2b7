//! Live departures and timetable slots.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LineRef, normalize_name};

/// Label the TAN API uses for a tram that is about to arrive.
const IMMINENT_LABEL: &str = "Proche";

/// Spoken replacement for [`IMMINENT_LABEL`].
const IMMINENT_PHRASE: &str = "moins de 2 minutes";

/// Named termini of the tram lines and the direction code they map to.
///
/// Each physical line has exactly two ends; the TAN API addresses them as
/// direction 1 and direction 2.
const TERMINI: &[(&str, Direction)] = &[
    ("Beaujoire", Direction::Two),
    ("Ranzay", Direction::Two),
    ("François Mitterand", Direction::One),
    ("François Mitterrand", Direction::One),
    ("Jamet", Direction::One),
    ("Orvault Grand-Val", Direction::One),
    ("Gare de Pont Rousseau", Direction::Two),
    ("Marcel Paul", Direction::One),
    ("Neustrie", Direction::Two),
];

/// Error returned for a direction code other than 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction code: {0}")]
pub struct InvalidDirection(pub u8);

/// Which of a line's two termini a vehicle is heading toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    One,
    Two,
}

impl Direction {
    /// The numeric code used by the TAN API.
    pub fn code(self) -> u8 {
        match self {
            Direction::One => 1,
            Direction::Two => 2,
        }
    }

    /// Look up the direction code of a named terminus.
    ///
    /// Comparison ignores case, accents and punctuation.
    ///
    /// ```
    /// use tram_server::domain::Direction;
    ///
    /// assert_eq!(Direction::from_terminus("beaujoire"), Some(Direction::Two));
    /// assert_eq!(Direction::from_terminus("Orvault Grand Val"), Some(Direction::One));
    /// assert_eq!(Direction::from_terminus("Commerce"), None);
    /// ```
    pub fn from_terminus(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        if wanted.is_empty() {
            return None;
        }
        TERMINI
            .iter()
            .find(|(terminus, _)| normalize_name(terminus) == wanted)
            .map(|(_, direction)| *direction)
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Direction::One),
            2 => Ok(Direction::Two),
            other => Err(InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.code()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Free-text time-to-arrival, normalized for speech.
///
/// `"Proche"` becomes `"moins de 2 minutes"` and the API's `"5mn"` becomes
/// `"5 minutes"`; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtaLabel(String);

impl EtaLabel {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == IMMINENT_LABEL {
            return EtaLabel(IMMINENT_PHRASE.to_string());
        }

        let minutes = trimmed
            .strip_suffix("mn")
            .map(str::trim_end)
            .and_then(|n| n.parse::<u32>().ok());
        match minutes {
            Some(1) => EtaLabel("1 minute".to_string()),
            Some(n) => EtaLabel(format!("{n} minutes")),
            None => EtaLabel(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EtaLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live departure from a station.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub line: LineRef,
    pub direction: Direction,
    pub eta: EtaLabel,
    pub terminus: String,

    /// TAN stop-point code (`codeArret`) the vehicle leaves from, when known.
    pub stop_code: Option<String>,
}

/// A timetable slot: an hour label and the minute labels within it.
///
/// TAN splits times as `heure: "14h"` and `passages: ["05", "25"]`; a spoken
/// time is the concatenation, `"14h05"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "heure")]
    pub time: String,

    #[serde(default)]
    pub passages: Vec<String>,
}

impl ScheduleEntry {
    pub fn new(time: impl Into<String>, passages: Vec<String>) -> Self {
        Self {
            time: time.into(),
            passages,
        }
    }

    /// The spoken time of the passage at `index`, if there is one.
    pub fn slot(&self, index: usize) -> Option<String> {
        self.passages
            .get(index)
            .filter(|p| !p.trim().is_empty())
            .map(|p| format!("{}{}", self.time, p))
    }

    pub fn has_passages(&self) -> bool {
        self.slot(0).is_some()
    }
}
