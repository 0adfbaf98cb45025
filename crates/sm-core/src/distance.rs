//! Walking distances and the no-path sentinel.
//!
//! Layout files store one value per `"src->dst"` pair: either a number or the
//! marker [`NO_PATH_MARKER`] (`"∞"`).  [`Distance`] is the parsed form used by
//! the routing engine; [`RawDistance`] is the on-disk form, kept unparsed so a
//! malformed value can be skipped at graph-build time instead of failing the
//! whole load.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SmError;

/// Textual form of an infinite distance ("no direct path").
pub const NO_PATH_MARKER: &str = "∞";

/// `"∞"` after a UTF-8 → cp1252 → UTF-8 round trip.  Older layout files
/// written on Windows contain this instead of the real marker.
const MOJIBAKE_NO_PATH_MARKER: &str = "âˆž";

// ── Distance ──────────────────────────────────────────────────────────────────

/// A non-negative walking distance, or [`Distance::INFINITE`].
///
/// Construction through [`Distance::new`] folds NaN, negative and infinite
/// inputs into the sentinel, so every `Distance` is either a finite value
/// `>= 0` or exactly `INFINITE`.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
pub struct Distance(f64);

impl Distance {
    pub const ZERO: Distance = Distance(0.0);

    /// "Unreachable" / "no direct path".
    pub const INFINITE: Distance = Distance(f64::INFINITY);

    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            Distance(value)
        } else {
            Self::INFINITE
        }
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        !self.is_finite()
    }

    /// Total order over distances, `INFINITE` last.
    #[inline]
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Parse the textual form.  Returns `None` for malformed input.
    ///
    /// Accepts numbers, `"∞"`, its mis-encoded form, and `inf`/`infinity` in
    /// any case.
    pub fn parse(text: &str) -> Option<Distance> {
        let text = text.trim();
        if text == NO_PATH_MARKER || text == MOJIBAKE_NO_PATH_MARKER {
            return Some(Self::INFINITE);
        }
        if text.eq_ignore_ascii_case("inf") || text.eq_ignore_ascii_case("infinity") {
            return Some(Self::INFINITE);
        }
        text.parse::<f64>().ok().filter(|v| !v.is_nan()).map(Distance::new)
    }
}

impl Add for Distance {
    type Output = Distance;

    #[inline]
    fn add(self, rhs: Distance) -> Distance {
        Distance(self.0 + rhs.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_finite() {
            write!(f, "{}", self.0)
        } else {
            f.write_str(NO_PATH_MARKER)
        }
    }
}

impl FromStr for Distance {
    type Err = SmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Distance::parse(s).ok_or_else(|| SmError::Parse(format!("invalid distance {s:?}")))
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawDistance::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDistance::deserialize(deserializer)?;
        raw.resolve()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid distance {raw}")))
    }
}

// ── RawDistance ───────────────────────────────────────────────────────────────

/// A distance exactly as it appears in a layout file.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDistance {
    Number(f64),
    Text(String),
}

impl RawDistance {
    /// Parse into a [`Distance`]; `None` means the entry is malformed.
    pub fn resolve(&self) -> Option<Distance> {
        match self {
            RawDistance::Number(v) if v.is_nan() => None,
            RawDistance::Number(v) => Some(Distance::new(*v)),
            RawDistance::Text(s) => Distance::parse(s),
        }
    }
}

impl From<Distance> for RawDistance {
    fn from(d: Distance) -> Self {
        if d.is_finite() {
            RawDistance::Number(d.value())
        } else {
            RawDistance::Text(NO_PATH_MARKER.to_owned())
        }
    }
}

impl From<f64> for RawDistance {
    fn from(v: f64) -> Self {
        RawDistance::from(Distance::new(v))
    }
}

impl fmt::Display for RawDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawDistance::Number(v) => write!(f, "{v}"),
            RawDistance::Text(s) => write!(f, "{s:?}"),
        }
    }
}
