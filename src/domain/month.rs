//! Month keys, month references and transaction month filters

use crate::error::{Result, SpendwiseError};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar year and month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(MonthKey { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse a strict `YYYY-MM` key
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.len() != 7 {
            return Err(SpendwiseError::InvalidMonth(input.to_string()));
        }
        NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|_| SpendwiseError::InvalidMonth(input.to_string()))
    }

    /// The month before this one
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            MonthKey {
                year: self.year - 1,
                month: 12,
            }
        } else {
            MonthKey {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Best-effort extraction of the month a free-text date label refers to.
    ///
    /// Recognizes ISO dates and date-times, `YYYY/MM/DD`, day-first
    /// `DD-MM-YYYY`, the `ctime` layout (`Mon Jan  5 10:00:00 2024`, any run
    /// of spaces) and bare `YYYY-MM` labels. Formats are tried in that order.
    /// Slash dates with the year last (`01/05/2024`) are ambiguous between
    /// day-first and month-first and are not recognized.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.split_whitespace().collect::<Vec<_>>().join(" ");
        let label = label.as_str();
        if label.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(label) {
            return Some(Self::from_date(dt.date_naive()));
        }

        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%a %b %d %H:%M:%S %Y",
        ];
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(label, format) {
                return Some(Self::from_date(dt.date()));
            }
        }

        const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y"];
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(label, format) {
                return Some(Self::from_date(date));
            }
        }

        Self::parse(label).ok()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A month as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthReference {
    /// Month containing today
    Current,
    /// Month before the current one
    Previous,
    /// Explicit `YYYY-MM`
    Specific(MonthKey),
}

impl MonthReference {
    /// Parse a month reference string
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        match normalized.as_str() {
            "current" | "this" | "now" => Ok(MonthReference::Current),
            "last" | "previous" | "prev" => Ok(MonthReference::Previous),
            _ => MonthKey::parse(&normalized).map(MonthReference::Specific),
        }
    }

    /// Resolve this reference against today's date
    pub fn resolve(&self, today: NaiveDate) -> MonthKey {
        match self {
            MonthReference::Current => MonthKey::from_date(today),
            MonthReference::Previous => MonthKey::from_date(today).previous(),
            MonthReference::Specific(key) => *key,
        }
    }
}

/// How transaction date labels are matched against a month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthMatch {
    /// Parse each label into a year-month and compare
    #[default]
    Calendar,
    /// Legacy behavior: the label contains the `YYYY-MM` text
    Substring,
}

impl MonthMatch {
    pub fn filter_for(&self, key: MonthKey) -> MonthFilter {
        match self {
            MonthMatch::Calendar => MonthFilter::Calendar(key),
            MonthMatch::Substring => MonthFilter::Substring(key.to_string()),
        }
    }
}

impl fmt::Display for MonthMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthMatch::Calendar => f.write_str("calendar"),
            MonthMatch::Substring => f.write_str("substring"),
        }
    }
}

impl FromStr for MonthMatch {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calendar" => Ok(MonthMatch::Calendar),
            "substring" => Ok(MonthMatch::Substring),
            _ => Err(format!(
                "Invalid month_match: '{}'. Valid values are: calendar, substring",
                s
            )),
        }
    }
}

/// Selects the transactions that belong to one month
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthFilter {
    Calendar(MonthKey),
    /// Matches any label containing the text, including labels that merely
    /// mention it (e.g. "2024-011").
    Substring(String),
}

impl MonthFilter {
    pub fn matches(&self, label: &str) -> bool {
        match self {
            MonthFilter::Calendar(key) => MonthKey::from_label(label) == Some(*key),
            MonthFilter::Substring(text) => label.contains(text.as_str()),
        }
    }
}
