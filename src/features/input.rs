use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{FatigueError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = FatigueError;

    fn from_str(value: &str) -> Result<Self> {
        TimeOfDay::ALL
            .into_iter()
            .find(|t| t.as_str() == value.trim())
            .ok_or_else(|| {
                FatigueError::invalid_input(
                    "time_of_day",
                    format!("'{value}' is not one of Morning, Afternoon, Evening"),
                )
            })
    }
}

/// A form submission exactly as the presentation layer collected it.
///
/// Nothing here is trusted yet; convert with [`RawSessionInput::try_from`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionForm {
    pub session_duration: i64,
    pub decision_count: i64,
    pub undo_count: i64,
    pub error_rate: f64,
    /// "Yes" or "No"
    pub break_taken: String,
    pub time_of_day: String,
}

impl Default for SessionForm {
    fn default() -> Self {
        Self {
            session_duration: 30,
            decision_count: 10,
            undo_count: 2,
            error_rate: 0.10,
            break_taken: "No".into(),
            time_of_day: TimeOfDay::Morning.as_str().into(),
        }
    }
}

/// Validated session metrics for one inference request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSessionInput {
    session_duration: i64,
    decision_count: i64,
    undo_count: i64,
    error_rate: f64,
    break_taken: bool,
    time_of_day: TimeOfDay,
}

impl RawSessionInput {
    pub fn new(
        session_duration: i64,
        decision_count: i64,
        undo_count: i64,
        error_rate: f64,
        break_taken: bool,
        time_of_day: TimeOfDay,
    ) -> Result<Self> {
        if session_duration < 1 {
            return Err(FatigueError::invalid_input(
                "session_duration",
                format!("must be at least 1 minute, got {session_duration}"),
            ));
        }
        if decision_count < 0 {
            return Err(FatigueError::invalid_input(
                "decision_count",
                format!("must not be negative, got {decision_count}"),
            ));
        }
        if undo_count < 0 {
            return Err(FatigueError::invalid_input(
                "undo_count",
                format!("must not be negative, got {undo_count}"),
            ));
        }
        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&error_rate) {
            return Err(FatigueError::invalid_input(
                "error_rate",
                format!("must be within [0, 1], got {error_rate}"),
            ));
        }

        Ok(Self {
            session_duration,
            decision_count,
            undo_count,
            error_rate,
            break_taken,
            time_of_day,
        })
    }

    pub fn session_duration(&self) -> i64 {
        self.session_duration
    }

    pub fn decision_count(&self) -> i64 {
        self.decision_count
    }

    pub fn undo_count(&self) -> i64 {
        self.undo_count
    }

    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    pub fn break_taken(&self) -> bool {
        self.break_taken
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }
}

fn parse_break_taken(value: &str) -> Result<bool> {
    match value.trim() {
        "Yes" => Ok(true),
        "No" => Ok(false),
        other => Err(FatigueError::invalid_input(
            "break_taken",
            format!("'{other}' is not one of Yes, No"),
        )),
    }
}

impl TryFrom<&SessionForm> for RawSessionInput {
    type Error = FatigueError;

    fn try_from(form: &SessionForm) -> Result<Self> {
        RawSessionInput::new(
            form.session_duration,
            form.decision_count,
            form.undo_count,
            form.error_rate,
            parse_break_taken(&form.break_taken)?,
            form.time_of_day.parse()?,
        )
    }
}
