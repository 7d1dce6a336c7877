//! Expiry and view-quota policy values for share links.

use std::fmt;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// How long a share link stays valid after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareDuration {
    /// One hour.
    #[serde(rename = "1_hour")]
    OneHour,
    /// One day.
    #[serde(rename = "1_day")]
    OneDay,
    /// Seven days.
    #[serde(rename = "7_days")]
    SevenDays,
}

impl ShareDuration {
    /// The duration added to the creation time to get the expiry.
    pub fn as_delta(self) -> TimeDelta {
        match self {
            Self::OneHour => TimeDelta::hours(1),
            Self::OneDay => TimeDelta::days(1),
            Self::SevenDays => TimeDelta::days(7),
        }
    }
}

impl std::str::FromStr for ShareDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1_hour" => Ok(Self::OneHour),
            "1_day" => Ok(Self::OneDay),
            "7_days" => Ok(Self::SevenDays),
            other => Err(format!(
                "Invalid share duration '{other}', expected one of 1_hour, 1_day, 7_days"
            )),
        }
    }
}

/// Maximum number of successful views. `Unlimited` is stored as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ViewLimit {
    /// A single view.
    One,
    /// Five views.
    Five,
    /// Ten views.
    Ten,
    /// No quota.
    Unlimited,
}

impl ViewLimit {
    /// The stored `max_views` value.
    pub fn max_views(self) -> i32 {
        match self {
            Self::One => 1,
            Self::Five => 5,
            Self::Ten => 10,
            Self::Unlimited => 0,
        }
    }
}

impl TryFrom<u32> for ViewLimit {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            0 => Ok(Self::Unlimited),
            other => Err(format!(
                "Invalid view limit {other}, expected one of 1, 5, 10 or 0 (unlimited)"
            )),
        }
    }
}

impl From<ViewLimit> for u32 {
    fn from(limit: ViewLimit) -> u32 {
        limit.max_views() as u32
    }
}

/// Result of checking a link against its policy, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCheck {
    /// Neither expired nor exhausted.
    Open,
    /// `now >= expires_at`. Takes precedence over exhaustion.
    Expired,
    /// `max_views > 0 && view_count >= max_views`.
    LimitReached,
}

/// Display-only count of views left on a link.
///
/// Serializes as a number, or as the string `"∞"` when unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewsRemaining {
    /// Remaining views under a quota.
    Limited(u32),
    /// No quota; rendered as `∞`.
    Unlimited,
}

impl fmt::Display for ViewsRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unlimited => write!(f, "∞"),
        }
    }
}

impl Serialize for ViewsRemaining {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limited(n) => serializer.serialize_u32(*n),
            Self::Unlimited => serializer.serialize_str("∞"),
        }
    }
}
