//! Log level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity scale, most severe first.
///
/// The numeric value is the rank: a lower rank is more severe. An entry
/// passes a logger whose threshold is `t` iff `entry.level <= t`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    #[default]
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Every level, most severe first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Canonical uppercase name.
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Parse a level from its canonical name, ignoring case.
    ///
    /// The input is uppercased with Unicode rules before the exact match, so
    /// `"ınfo"` (dotless i) matches `INFO`.
    ///
    /// Only the five canonical names match. Decorated or abbreviated
    /// spellings such as `"WARNING"` and numeric strings yield `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_fanout_logger::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("debug"), Some(LogLevel::Debug));
    /// assert_eq!(LogLevel::parse("WARNING"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let upper = name.to_uppercase();
        Self::ALL
            .into_iter()
            .find(|level| level.to_str() == upper)
    }

    /// Whether an entry at this level passes a logger configured at `threshold`.
    #[inline]
    pub fn passes(&self, threshold: LogLevel) -> bool {
        *self <= threshold
    }
}

/// Free-function form of [`LogLevel::parse`].
pub fn parse_level(name: &str) -> Option<LogLevel> {
    LogLevel::parse(name)
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| LoggerError::InvalidLevel(s.to_string()))
    }
}
