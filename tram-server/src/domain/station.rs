//! Stations and the lines serving them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Lines numbered 1 to this value are operated by tram on the TAN network.
const MAX_TRAM_LINE: u32 = 3;

/// Mode of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    Tram,
    Other,
}

impl LineKind {
    /// Map a TAN `typeLigne` code. Only `1` means tram; busway (2),
    /// bus (3) and navibus (4) are all `Other`.
    pub fn from_type_code(code: u8) -> Self {
        if code == 1 {
            LineKind::Tram
        } else {
            LineKind::Other
        }
    }
}

/// A line serving a station.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineRef {
    /// Public line number ("1", "C6", "NA"...).
    pub number: String,
    pub kind: LineKind,
}

impl LineRef {
    pub fn new(number: impl Into<String>, kind: LineKind) -> Self {
        Self {
            number: number.into(),
            kind,
        }
    }

    pub fn tram(number: impl Into<String>) -> Self {
        Self::new(number, LineKind::Tram)
    }

    /// Classify a line from its number alone.
    ///
    /// Station listings only carry line numbers, so the tram lines are
    /// recognised by number there.
    pub fn from_number(number: impl Into<String>) -> Self {
        let number = number.into();
        let kind = if is_tram_number(&number) {
            LineKind::Tram
        } else {
            LineKind::Other
        };
        Self { number, kind }
    }

    pub fn is_tram(&self) -> bool {
        self.kind == LineKind::Tram
    }
}

/// Whether a line number designates one of the tram lines (1 to 3).
pub fn is_tram_number(number: &str) -> bool {
    number
        .trim()
        .parse::<u32>()
        .is_ok_and(|n| (1..=MAX_TRAM_LINE).contains(&n))
}

/// A stop area ("lieu") on the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// TAN `codeLieu`, e.g. "COMM".
    pub code: String,

    /// Human-readable name, e.g. "Commerce".
    pub name: String,

    pub location: Option<Coordinates>,

    pub lines: Vec<LineRef>,
}

impl Station {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            location: None,
            lines: Vec::new(),
        }
    }

    pub fn with_lines(mut self, lines: Vec<LineRef>) -> Self {
        self.lines = lines;
        self
    }

    pub fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }

    /// Whether at least one tram line stops here.
    pub fn serves_tram(&self) -> bool {
        self.lines.iter().any(LineRef::is_tram)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A station returned by a proximity search, with the distance as
/// reported upstream ("120 m").
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub station: Station,
    pub distance: String,
}

/// Normalize a stop or terminus name for comparison.
///
/// Lower-cases, folds French diacritics, and collapses every run of
/// non-alphanumeric characters into a single space.
///
/// ```
/// use tram_server::domain::normalize_name;
///
/// assert_eq!(normalize_name("  Gare de Pont-Rousseau "), "gare de pont rousseau");
/// assert_eq!(normalize_name("François Mitterand"), "francois mitterand");
/// ```
pub fn normalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        let folded: &str = match c {
            'à' | 'â' | 'ä' | 'á' => "a",
            'ç' => "c",
            'é' | 'è' | 'ê' | 'ë' => "e",
            'î' | 'ï' | 'í' => "i",
            'ô' | 'ö' | 'ó' => "o",
            'ù' | 'û' | 'ü' | 'ú' => "u",
            'ÿ' => "y",
            'œ' => "oe",
            'æ' => "ae",
            c if c.is_alphanumeric() => {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(c);
                continue;
            }
            _ => {
                pending_space = true;
                continue;
            }
        };
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push_str(folded);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tram_numbers() {
        assert!(is_tram_number("1"));
        assert!(is_tram_number("2"));
        assert!(is_tram_number(" 3 "));
        assert!(!is_tram_number("0"));
        assert!(!is_tram_number("4"));
        assert!(!is_tram_number("C6"));
        assert!(!is_tram_number(""));
    }

    #[test]
    fn line_kind_from_type_code() {
        assert_eq!(LineKind::from_type_code(1), LineKind::Tram);
        assert_eq!(LineKind::from_type_code(2), LineKind::Other);
        assert_eq!(LineKind::from_type_code(3), LineKind::Other);
    }

    #[test]
    fn line_from_number() {
        assert!(LineRef::from_number("2").is_tram());
        assert!(!LineRef::from_number("C1").is_tram());
        assert!(!LineRef::from_number("23").is_tram());
    }

    #[test]
    fn station_serves_tram() {
        let commerce = Station::new("COMM", "Commerce")
            .with_lines(vec![LineRef::from_number("C1"), LineRef::from_number("2")]);
        assert!(commerce.serves_tram());

        let bus_only = Station::new("BOUF", "Bouffay").with_lines(vec![LineRef::from_number("C1")]);
        assert!(!bus_only.serves_tram());
    }

    #[test]
    fn normalize_folds_accents_and_punctuation() {
        assert_eq!(normalize_name("Foch - Cathédrale"), "foch cathedrale");
        assert_eq!(normalize_name("Orvault Grand-Val"), "orvault grand val");
        assert_eq!(normalize_name("Hôtel Dieu"), "hotel dieu");
        assert_eq!(normalize_name("---"), "");
    }
}
