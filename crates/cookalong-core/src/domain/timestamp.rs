//! Video-relative timestamps in `MM:SS` / `HH:MM:SS` text form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

/// A video-relative position, stored as whole seconds.
///
/// The recipe document carries timestamps as text (`"05:30"`, `"1:02:03"`);
/// this type parses them on deserialization and formats them back on
/// serialization, so the rest of the engine works in plain seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(u32);

impl Timestamp {
    /// Build a timestamp from whole seconds.
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Seconds elapsed from the start of the video.
    pub const fn as_secs(self) -> u32 {
        self.0
    }

    /// Position as fractional seconds, for comparison with player samples.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl FromStr for Timestamp {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RecipeError::InvalidTimestamp {
            value: s.to_string(),
        };
        let fields = s
            .trim()
            .split(':')
            .map(|field| field.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        let total = match fields[..] {
            // Two-field minutes are unbounded: long videos legitimately carry
            // windows like "75:10".
            [minutes, seconds] if seconds < 60 => minutes * 60 + seconds,
            [hours, minutes, seconds] if minutes < 60 && seconds < 60 => {
                hours * 3600 + minutes * 60 + seconds
            }
            _ => return Err(invalid()),
        };
        Ok(Self(total))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = RecipeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        if hours > 0 {
            write!(f, "{hours}:{minutes:02}:{seconds:02}")
        } else {
            write!(f, "{minutes:02}:{seconds:02}")
        }
    }
}
