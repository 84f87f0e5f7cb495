//! Time-range lines such as `T: 645am - 730am, 815am - 12pm`.
//!
//! A line holds comma separated spans, each a pair of clock times joined by a
//! dash. Every clock time of a line lands on the same reference date, so the
//! difference between the two ends of a span is its duration. Parsing is all
//! or nothing: the first malformed span fails the whole line.
//!
//! ```text
//! T: 0645 - 0730, 0815 - 1200
//! 0645 - 0730, 0815 - 1200 (4h30m -> 4.50h -> 16200s)
//! ```

mod token;

use chrono::{NaiveDateTime, TimeDelta};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use token::{normalize_military, normalize_standard};

/// Marker every time-range line starts with.
pub const PREFIX: &str = "T:";

#[derive(Debug, thiserror::Error)]
pub enum TimeRangeError {
    #[error("{0} is not a valid time range")]
    MissingPrefix(String),
    #[error("missing range in {0}")]
    MissingRange(String),
    #[error("not enough digits in {0}")]
    MalformedToken(String),
    #[error("invalid clock time '{token}': {source}")]
    InvalidTime {
        token: String,
        #[source]
        source: chrono::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, TimeRangeError>;

/// Token grammar of a time-range line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    /// 12-hour tokens with an `am`/`pm` suffix, e.g. `645am`.
    Standard,
    /// 24-hour tokens of exactly four digits, e.g. `0645`.
    #[default]
    Military,
}

impl Notation {
    /// chrono format used when rendering an interval end.
    pub fn output_format(self) -> &'static str {
        match self {
            Notation::Standard => "%I:%M%p",
            Notation::Military => "%H%M",
        }
    }

    fn parse_token(self, token: &str) -> Result<NaiveDateTime> {
        match self {
            Notation::Standard => token::parse_standard_token(token),
            Notation::Military => token::parse_military_token(token),
        }
    }

    // Shape checks for both ends run before either end is parsed.
    fn check_token(self, token: &str) -> Result<()> {
        match self {
            Notation::Standard => Ok(()),
            Notation::Military => normalize_military(token).map(|_| ()),
        }
    }

    /// Parse a full line into its intervals and total.
    pub fn parse(self, line: &str) -> Result<TimeRanges> {
        let intervals = split_spans(line)?
            .into_iter()
            .map(|(left, right)| {
                self.check_token(left)?;
                self.check_token(right)?;
                let start = self.parse_token(left)?;
                let end = self.parse_token(right)?;
                Ok(Interval::new(start, end))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TimeRanges::new(self, intervals))
    }

    /// Parse a line and render it with its duration summary.
    pub fn process(self, line: &str) -> Result<String> {
        self.parse(line).map(|ranges| ranges.render())
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Standard => write!(f, "standard"),
            Notation::Military => write!(f, "military"),
        }
    }
}

impl FromStr for Notation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "12h" => Ok(Notation::Standard),
            "military" | "24h" => Ok(Notation::Military),
            other => Err(format!("unknown notation '{}' (expected standard or military)", other)),
        }
    }
}

/// A start/end pair on the reference date with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Interval {
    /// Build an interval, swapping the ends when they arrive reversed.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if start > end {
            debug!("Swapping reversed span {} - {}", start.time(), end.time());
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    fn render(&self, notation: Notation) -> String {
        let format = notation.output_format();
        format!("{} - {}", self.start.format(format), self.end.format(format))
    }
}

/// Parsed intervals of one line, in input order, plus their total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRanges {
    notation: Notation,
    intervals: Vec<Interval>,
    total: TimeDelta,
}

impl TimeRanges {
    fn new(notation: Notation, intervals: Vec<Interval>) -> Self {
        let total = intervals.iter().fold(TimeDelta::zero(), |acc, interval| acc + interval.duration());
        Self { notation, intervals, total }
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn total(&self) -> TimeDelta {
        self.total
    }

    pub fn summary(&self) -> DurationSummary {
        DurationSummary::from(self.total)
    }

    /// The intervals alone, e.g. `06:45AM - 07:30AM, 08:15AM - 12:00PM`.
    pub fn render_intervals(&self) -> String {
        self.intervals
            .iter()
            .map(|interval| interval.render(self.notation))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Intervals followed by the summary suffix.
    pub fn render(&self) -> String {
        format!("{} ({})", self.render_intervals(), self.summary())
    }
}

/// Total duration split into whole hours and leftover minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationSummary {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl DurationSummary {
    pub fn decimal_hours(&self) -> f64 {
        self.hours as f64 + self.minutes as f64 / 60.0
    }
}

impl From<TimeDelta> for DurationSummary {
    fn from(total: TimeDelta) -> Self {
        Self {
            hours: total.num_hours(),
            minutes: total.num_minutes() % 60,
            seconds: total.num_seconds(),
        }
    }
}

impl fmt::Display for DurationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}h{}m -> {:.2}h -> {}s",
            self.hours,
            self.minutes,
            self.decimal_hours(),
            self.seconds
        )
    }
}

/// Parse a line of 12-hour spans and render the summary line.
pub fn parse_standard(line: &str) -> Result<String> {
    Notation::Standard.process(line)
}

/// Parse a line of 24-hour spans and render the summary line.
pub fn parse_military(line: &str) -> Result<String> {
    Notation::Military.process(line)
}

fn split_spans(line: &str) -> Result<Vec<(&str, &str)>> {
    let body = line
        .strip_prefix(PREFIX)
        .ok_or_else(|| TimeRangeError::MissingPrefix(line.to_string()))?;

    body.trim()
        .split(',')
        .map(|span| {
            let (left, right) = span.split_once('-').unwrap_or((span, ""));
            let right = right.trim();
            if right.is_empty() {
                return Err(TimeRangeError::MissingRange(span.trim().to_string()));
            }
            Ok((left.trim(), right))
        })
        .collect()
}
