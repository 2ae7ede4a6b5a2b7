//! Domain types for the tram assistant.
//!
//! These types describe the transit data the assistant talks about:
//! stations, the lines serving them, live departures and timetable slots.
//! They are independent of both the TAN wire format and the Dialogflow
//! conversation format.

mod departure;
mod location;
mod station;

pub use departure::{Departure, Direction, EtaLabel, InvalidDirection, ScheduleEntry};
pub use location::Coordinates;
pub use station::{LineKind, LineRef, NearbyStation, Station, is_tram_number, normalize_name};
