//! Recoverable assistant errors.
//!
//! Every variant is turned into a fixed sentence at the handler boundary;
//! none of them fails the webhook call.

use std::fmt;

use crate::tan::TanError;

use super::messages;

/// A required slot the user did not fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Direction,
    Line,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Direction => f.write_str("direction"),
            Parameter::Line => f.write_str("ligne"),
        }
    }
}

/// What an empty upstream answer was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Station,
    WaitTimes,
    Schedule,
    NearbyStops,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Station => f.write_str("matching station"),
            Subject::WaitTimes => f.write_str("tram waiting times"),
            Subject::Schedule => f.write_str("scheduled times"),
            Subject::NearbyStops => f.write_str("nearby tram stops"),
        }
    }
}

/// Errors a handler recovers from by answering with a fixed sentence.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// No stop in the request and no favorite saved
    #[error("no stop given and no favorite stop saved")]
    MissingStop,

    /// A required parameter was not supplied or not recognised
    #[error("missing parameter: {0}")]
    MissingParameter(Parameter),

    /// Upstream answered, but with nothing usable
    #[error("no {0} available")]
    NoData(Subject),

    /// Follow-up intent without a live pagination session
    #[error("no active schedule session")]
    NoActiveSession,

    /// Transit API call failed
    #[error("transit API unavailable: {0}")]
    UpstreamUnavailable(#[from] TanError),
}

impl AssistantError {
    /// The sentence spoken to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            AssistantError::MissingStop => messages::MISSING_STOP,
            AssistantError::MissingParameter(Parameter::Direction) => messages::MISSING_DIRECTION,
            AssistantError::MissingParameter(Parameter::Line) => messages::MISSING_LINE,
            AssistantError::NoData(Subject::Station) => messages::UNKNOWN_STOP,
            AssistantError::NoData(Subject::WaitTimes) => messages::NO_WAIT_TIMES,
            AssistantError::NoData(Subject::Schedule) => messages::NO_SCHEDULE,
            AssistantError::NoData(Subject::NearbyStops) => messages::NO_NEARBY_STOPS,
            AssistantError::NoActiveSession => messages::NOT_UNDERSTOOD,
            AssistantError::UpstreamUnavailable(_) => messages::UPSTREAM_UNAVAILABLE,
        }
    }
}
