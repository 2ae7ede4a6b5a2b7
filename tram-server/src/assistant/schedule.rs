//! Multi-turn timetable pagination.
//!
//! A detailed query (`horaires_arret`) fetches the timetable of one line in
//! one direction at a stop, speaks its first slot, and stores the remaining
//! timetable as a [`PaginationSession`] in the `horaires_arret_suivant` turn
//! context. Each follow-up (`horaires_arret_suivant`) moves the session's
//! cursor forward and speaks the slot it lands on, until the timetable is
//! exhausted and the context is cleared.
//!
//! The session lives entirely in the turn context: nothing is kept on the
//! server between turns.
//!
//! ```text
//! NO_SESSION --query--> ACTIVE --next--> ACTIVE
//!                         |                |
//!                         +------next------+--> EXHAUSTED (context cleared)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::conversation::{Conversation, Outcome, TurnContext};
use crate::domain::{Direction, ScheduleEntry};
use crate::tan::TransitClient;

use super::error::{AssistantError, Parameter, Subject};
use super::messages;
use super::stop::{requested_stop, resolve_station};

/// Turn context holding the active session.
pub const SCHEDULE_CONTEXT: &str = "horaires_arret_suivant";

/// Turns a freshly opened session stays alive for.
pub const SESSION_LIFESPAN: u32 = 5;

const LINE_PARAMETER: &str = "ligne";
const DIRECTION_PARAMETER: &str = "direction";

/// How a follow-up moves through the timetable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PagingPolicy {
    /// The Nth follow-up reads passage N of entry N.
    ///
    /// Entry and passage advance together, so most of a timetable is never
    /// spoken.
    #[default]
    Lockstep,

    /// Walk every passage of an entry, then continue with the first passage
    /// of the next entry that has one.
    Sequential,
}

/// Error for an unrecognised paging policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown paging policy: {0} (expected lockstep or sequential)")]
pub struct UnknownPagingPolicy(pub String);

impl FromStr for PagingPolicy {
    type Err = UnknownPagingPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lockstep" => Ok(PagingPolicy::Lockstep),
            "sequential" => Ok(PagingPolicy::Sequential),
            _ => Err(UnknownPagingPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PagingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagingPolicy::Lockstep => f.write_str("lockstep"),
            PagingPolicy::Sequential => f.write_str("sequential"),
        }
    }
}

/// Position of the last spoken slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(deserialize_with = "whole_number")]
    pub entry: usize,

    #[serde(deserialize_with = "whole_number")]
    pub passage: usize,
}

impl Cursor {
    pub fn new(entry: usize, passage: usize) -> Self {
        Self { entry, passage }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entry, self.passage)
    }
}

/// Result of moving a session forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// The cursor moved; speak this slot.
    Next(String),

    /// No slot left under the policy.
    Exhausted,
}

/// A timetable being read out across turns.
///
/// Serialized as the parameters of the [`SCHEDULE_CONTEXT`] turn context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationSession {
    #[serde(rename = "arret")]
    pub station_name: String,

    #[serde(rename = "ligne")]
    pub line_number: String,

    #[serde(deserialize_with = "direction_code")]
    pub direction: Direction,

    #[serde(rename = "prochainsHoraires")]
    pub entries: Vec<ScheduleEntry>,

    #[serde(rename = "curseur", default)]
    pub cursor: Cursor,

    /// Carried by the context lifespan, not the parameters.
    #[serde(skip)]
    pub remaining_turns: u32,
}

impl PaginationSession {
    /// Start a session on the first slot of `entries`.
    ///
    /// Returns `None` when there is nothing to speak: no entries, or a first
    /// entry without passages.
    pub fn open(
        station_name: impl Into<String>,
        line_number: impl Into<String>,
        direction: Direction,
        entries: Vec<ScheduleEntry>,
    ) -> Option<Self> {
        if !entries.first()?.has_passages() {
            return None;
        }

        Some(Self {
            station_name: station_name.into(),
            line_number: line_number.into(),
            direction,
            entries,
            cursor: Cursor::default(),
            remaining_turns: SESSION_LIFESPAN,
        })
    }

    /// The slot under the cursor.
    pub fn current_slot(&self) -> Option<String> {
        self.entries
            .get(self.cursor.entry)?
            .slot(self.cursor.passage)
    }

    /// Move the cursor forward under `policy`.
    ///
    /// On exhaustion the cursor is left where it was.
    pub fn advance(&mut self, policy: PagingPolicy) -> Advance {
        let next = match policy {
            PagingPolicy::Lockstep => self.lockstep_next(),
            PagingPolicy::Sequential => self.sequential_next(),
        };

        match next {
            Some((cursor, slot)) => {
                self.cursor = cursor;
                Advance::Next(slot)
            }
            None => Advance::Exhausted,
        }
    }

    fn lockstep_next(&self) -> Option<(Cursor, String)> {
        let turn = self.cursor.entry + 1;
        let slot = self.entries.get(turn)?.slot(turn)?;
        Some((Cursor::new(turn, turn), slot))
    }

    fn sequential_next(&self) -> Option<(Cursor, String)> {
        let Cursor { entry, passage } = self.cursor;

        if let Some(slot) = self.entries.get(entry).and_then(|e| e.slot(passage + 1)) {
            return Some((Cursor::new(entry, passage + 1), slot));
        }

        self.entries
            .iter()
            .enumerate()
            .skip(entry + 1)
            .find_map(|(i, e)| e.slot(0).map(|slot| (Cursor::new(i, 0), slot)))
    }

    /// Restore a session from its turn context.
    ///
    /// A context whose parameters do not describe a session is ignored.
    pub fn from_context(context: &TurnContext) -> Option<Self> {
        match serde_json::from_value::<Self>(Value::Object(context.parameters.clone())) {
            Ok(mut session) => {
                session.remaining_turns = context.lifespan;
                Some(session)
            }
            Err(e) => {
                warn!(error = %e, context = %context.name, "ignoring unreadable schedule session");
                None
            }
        }
    }

    /// The turn-context parameters describing this session.
    pub fn to_parameters(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Dialogflow hands context numbers back as floats (`2.0`).
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
    T::Error: fmt::Display,
{
    let n = f64::deserialize(deserializer)?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(de::Error::custom(format!("not a whole number: {n}")));
    }
    T::try_from(n as u64).map_err(de::Error::custom)
}

fn direction_code<'de, D>(deserializer: D) -> Result<Direction, D::Error>
where
    D: Deserializer<'de>,
{
    let code: u8 = whole_number(deserializer)?;
    Direction::try_from(code).map_err(de::Error::custom)
}

/// Handle a detailed timetable query and open a session.
///
/// Parameters are checked before anything is fetched: the stop first, then
/// the direction, then the line.
pub async fn query(
    transit: &dyn TransitClient,
    conv: &Conversation,
) -> Result<Outcome, AssistantError> {
    let stop = requested_stop(conv)?;
    let direction = conv
        .parameter_text(DIRECTION_PARAMETER)
        .and_then(|d| Direction::from_terminus(&d))
        .ok_or(AssistantError::MissingParameter(Parameter::Direction))?;
    let line = conv
        .parameter_text(LINE_PARAMETER)
        .ok_or(AssistantError::MissingParameter(Parameter::Line))?;

    let station = resolve_station(transit, &stop).await?;
    let entries = transit.scheduled_times(&station, &line, direction).await?;

    let session = PaginationSession::open(&station.name, &line, direction, entries)
        .ok_or(AssistantError::NoData(Subject::Schedule))?;
    let slot = session
        .current_slot()
        .ok_or(AssistantError::NoData(Subject::Schedule))?;

    info!(
        station = %station.name,
        line = %line,
        direction = %direction,
        entries = session.entries.len(),
        "opened schedule session"
    );

    Ok(Outcome::say(messages::next_departure(&slot)).set_turn_context(
        SCHEDULE_CONTEXT,
        SESSION_LIFESPAN,
        session.to_parameters(),
    ))
}

/// Handle a "next one" follow-up on the active session.
pub fn next(conv: &Conversation, policy: PagingPolicy) -> Result<Outcome, AssistantError> {
    let mut session = conv
        .turn_context(SCHEDULE_CONTEXT)
        .and_then(PaginationSession::from_context)
        .ok_or(AssistantError::NoActiveSession)?;

    match session.advance(policy) {
        Advance::Next(slot) => {
            // The platform counts the lifespan down once per turn; echo it
            // back as received so only the cursor changes.
            let remaining = session.remaining_turns;
            info!(
                station = %session.station_name,
                line = %session.line_number,
                cursor = %session.cursor,
                remaining,
                "advanced schedule session"
            );

            let outcome = Outcome::say(messages::next_departure(&slot));
            if remaining == 0 {
                Ok(outcome.clear_turn_context(SCHEDULE_CONTEXT))
            } else {
                Ok(outcome.set_turn_context(SCHEDULE_CONTEXT, remaining, session.to_parameters()))
            }
        }
        Advance::Exhausted => {
            info!(
                station = %session.station_name,
                line = %session.line_number,
                cursor = %session.cursor,
                "schedule session exhausted"
            );
            Ok(Outcome::say(messages::SCHEDULE_EXHAUSTED).clear_turn_context(SCHEDULE_CONTEXT))
        }
    }
}
