//! Note entity and deadline arithmetic.
//!
//! # Responsibility
//! - Represent one note with title, description, deadline and creation time.
//! - Parse user deadline input and render remaining time for display.
//!
//! # Invariants
//! - Deadline input must match `YYYY-MM-DD HH:MM:SS` exactly.
//! - `remaining_time` is signed; a passed deadline is not an error.

use chrono::{Local, NaiveDateTime, TimeDelta};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input format accepted by create/edit paths, also used for display.
pub const DEADLINE_INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DEADLINE_INPUT_LEN: usize = 19;
const SECONDS_PER_DAY: i64 = 86_400;

/// Deadline text did not match [`DEADLINE_INPUT_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineFormatError {
    pub input: String,
}

impl Display for DeadlineFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid deadline `{}`; expected format YYYY-MM-DD HH:MM:SS",
            self.input
        )
    }
}

impl Error for DeadlineFormatError {}

/// One user note.
///
/// Fields are private so the store stays the only writer; identity
/// (title uniqueness) is enforced by `NoteStore`, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    title: String,
    description: String,
    deadline: NaiveDateTime,
    created_at: NaiveDateTime,
}

impl Note {
    /// Creates a note stamped with the current local time.
    ///
    /// No validation is applied to `title` or `description`; empty strings
    /// are accepted.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: NaiveDateTime,
    ) -> Self {
        Self::with_created_at(title, description, deadline, local_now())
    }

    /// Creates a note with a caller-provided creation time.
    pub fn with_created_at(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: NaiveDateTime,
        created_at: NaiveDateTime,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            deadline,
            created_at,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Deadline rendered in the input format, for pre-filling edit forms.
    pub fn deadline_input(&self) -> String {
        self.deadline.format(DEADLINE_INPUT_FORMAT).to_string()
    }

    /// Signed time left until the deadline, measured from now.
    pub fn remaining_time(&self) -> TimeDelta {
        self.remaining_time_at(local_now())
    }

    pub fn remaining_time_at(&self, now: NaiveDateTime) -> TimeDelta {
        self.deadline - now
    }

    /// Human-readable remaining time; changes on every call.
    pub fn format_deadline(&self) -> String {
        format_remaining(self.remaining_time())
    }

    pub fn format_deadline_at(&self, now: NaiveDateTime) -> String {
        format_remaining(self.remaining_time_at(now))
    }

    /// Snapshot for detail views, with remaining time computed fresh.
    pub fn details(&self) -> NoteDetails {
        self.details_at(local_now())
    }

    pub fn details_at(&self, now: NaiveDateTime) -> NoteDetails {
        NoteDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            deadline: self.deadline,
            created_at: self.created_at,
            remaining: self.remaining_time_at(now),
        }
    }

    /// Replaces every mutable field at once. `created_at` is untouched.
    pub(crate) fn apply_edit(
        &mut self,
        title: String,
        description: String,
        deadline: NaiveDateTime,
    ) {
        self.title = title;
        self.description = description;
        self.deadline = deadline;
    }
}

/// Display snapshot of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDetails {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub remaining: TimeDelta,
}

impl Display for NoteDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Deadline: {}", self.deadline.format(DEADLINE_INPUT_FORMAT))?;
        writeln!(
            f,
            "Created At: {}",
            self.created_at.format(DEADLINE_INPUT_FORMAT)
        )?;
        write!(f, "Remaining Time: {}", format_remaining(self.remaining))
    }
}

/// Parses deadline input in the exact `YYYY-MM-DD HH:MM:SS` shape.
///
/// chrono alone tolerates unpadded fields and collapsed whitespace, so the
/// fixed layout is checked first.
pub fn parse_deadline_input(input: &str) -> Result<NaiveDateTime, DeadlineFormatError> {
    let invalid = || DeadlineFormatError {
        input: input.to_string(),
    };

    if !has_deadline_input_shape(input) {
        return Err(invalid());
    }

    NaiveDateTime::parse_from_str(input, DEADLINE_INPUT_FORMAT).map_err(|_| invalid())
}

/// Renders a signed duration as `[-][D day(s), ]HH:MM:SS`.
///
/// Sub-second precision is dropped.
pub fn format_remaining(delta: TimeDelta) -> String {
    let total = delta.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let magnitude = total.unsigned_abs();

    let days = magnitude / SECONDS_PER_DAY as u64;
    let rest = magnitude % SECONDS_PER_DAY as u64;
    let clock = format!(
        "{:02}:{:02}:{:02}",
        rest / 3600,
        (rest % 3600) / 60,
        rest % 60
    );

    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day, {clock}"),
        n => format!("{sign}{n} days, {clock}"),
    }
}

pub(crate) fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn has_deadline_input_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != DEADLINE_INPUT_LEN {
        return false;
    }

    bytes.iter().enumerate().all(|(idx, byte)| match idx {
        4 | 7 => *byte == b'-',
        10 => *byte == b' ',
        13 | 16 => *byte == b':',
        _ => byte.is_ascii_digit(),
    })
}

#[cfg(test)]
mod tests {
    use super::{format_remaining, parse_deadline_input, Note};
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .expect("valid test timestamp")
    }

    #[test]
    fn parse_accepts_exact_format() {
        let parsed = parse_deadline_input("2024-03-15 17:30:00").expect("valid input");
        assert_eq!(parsed, at(2024, 3, 15, 17, 30, 0));
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for input in [
            "not-a-date",
            "",
            "2024-03-15T17:30:00",
            "2024-3-15 17:30:00",
            "2024-03-15  17:30:0",
            " 2024-03-15 17:30:00",
            "2024-03-15 17:30",
            "2024-02-30 10:00:00",
            "2024-03-15 24:00:00",
        ] {
            let err = parse_deadline_input(input).expect_err("input must be rejected");
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn format_remaining_covers_day_boundaries_and_sign() {
        assert_eq!(format_remaining(TimeDelta::zero()), "00:00:00");
        assert_eq!(format_remaining(TimeDelta::seconds(3599)), "00:59:59");
        assert_eq!(format_remaining(TimeDelta::days(1)), "1 day, 00:00:00");
        assert_eq!(
            format_remaining(TimeDelta::seconds(2 * 86_400 + 3 * 3600 + 4 * 60 + 5)),
            "2 days, 03:04:05"
        );
        assert_eq!(format_remaining(TimeDelta::hours(-1)), "-01:00:00");
        assert_eq!(
            format_remaining(TimeDelta::seconds(-(86_400 + 61))),
            "-1 day, 00:01:01"
        );
    }

    #[test]
    fn remaining_time_is_signed() {
        let now = at(2024, 3, 15, 12, 0, 0);
        let future = Note::new("f", "", at(2024, 3, 16, 12, 0, 0));
        let past = Note::new("p", "", at(2024, 3, 15, 11, 0, 0));

        assert_eq!(future.remaining_time_at(now), TimeDelta::days(1));
        assert_eq!(past.remaining_time_at(now), TimeDelta::hours(-1));
        assert_eq!(past.format_deadline_at(now), "-01:00:00");
    }

    #[test]
    fn details_display_lists_all_fields() {
        let note = Note::with_created_at(
            "Groceries",
            "milk",
            at(2024, 3, 15, 17, 30, 0),
            at(2024, 3, 14, 9, 0, 0),
        );
        let rendered = note.details_at(at(2024, 3, 15, 16, 30, 0)).to_string();

        assert_eq!(
            rendered,
            "Title: Groceries\n\
             Description: milk\n\
             Deadline: 2024-03-15 17:30:00\n\
             Created At: 2024-03-14 09:00:00\n\
             Remaining Time: 01:00:00"
        );
    }

    #[test]
    fn deadline_input_round_trips_through_parser() {
        let note = Note::new("t", "d", at(2030, 1, 2, 3, 4, 5));
        assert_eq!(note.deadline_input(), "2030-01-02 03:04:05");
        assert_eq!(
            parse_deadline_input(&note.deadline_input()).expect("valid"),
            note.deadline()
        );
    }
}
