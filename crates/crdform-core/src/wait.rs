//! Wait conditions attached to resource upserts and deletes
//!
//! The attribute blocks (`wait_for` / `wait_for_delete`) carry durations as
//! strings. They are resolved into [`WaitCondition`] / [`DeleteWait`] before
//! polling so that malformed input is rejected up front.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::jsonpath::JsonPath;

/// Default timeout for a wait condition
pub const DEFAULT_TIMEOUT: &str = "30s";

/// Default interval between polls
pub const DEFAULT_POLL_INTERVAL: &str = "5s";

/// Ceiling used when a negative timeout asks for an unbounded wait
pub const UNBOUNDED_WAIT: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn default_timeout() -> String {
    DEFAULT_TIMEOUT.to_string()
}

fn default_poll_interval() -> String {
    DEFAULT_POLL_INTERVAL.to_string()
}

/// One `wait_for` block as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitForUpsert {
    /// Path expression evaluated against the live object
    pub jsonpath: String,

    /// Expected value; any non-empty value matches when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

impl WaitForUpsert {
    /// Create a block with default timeout and interval
    pub fn new(jsonpath: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            jsonpath: jsonpath.into(),
            value: value.map(String::from),
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }

    /// Set the timeout string
    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Set the poll interval string
    pub fn with_poll_interval(mut self, interval: impl Into<String>) -> Self {
        self.poll_interval = interval.into();
        self
    }

    /// Parse the block into a condition ready for polling
    pub fn resolve(&self) -> Result<WaitCondition> {
        Ok(WaitCondition {
            json_path: JsonPath::parse(&self.jsonpath)?,
            expected_value: self.value.clone(),
            timeout: WaitTimeout::parse(&self.timeout)?,
            poll_interval: parse_poll_interval(&self.poll_interval)?,
        })
    }
}

/// The `wait_for_delete` block as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitForDelete {
    #[serde(default = "default_timeout")]
    pub timeout: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval: String,
}

impl Default for WaitForDelete {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            poll_interval: default_poll_interval(),
        }
    }
}

impl WaitForDelete {
    pub fn resolve(&self) -> Result<DeleteWait> {
        Ok(DeleteWait {
            timeout: WaitTimeout::parse(&self.timeout)?,
            poll_interval: parse_poll_interval(&self.poll_interval)?,
        })
    }
}

/// How long a poller may wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitTimeout {
    /// Evaluate once and never sleep
    Once,
    /// Keep polling until the duration has elapsed
    Within(Duration),
}

impl WaitTimeout {
    /// Parse a signed duration string
    ///
    /// Zero means [`WaitTimeout::Once`]; any negative value waits up to
    /// [`UNBOUNDED_WAIT`].
    pub fn parse(value: &str) -> Result<Self> {
        let (negative, duration) = parse_duration(value)?;
        Ok(if negative && !duration.is_zero() {
            WaitTimeout::Within(UNBOUNDED_WAIT)
        } else if duration.is_zero() {
            WaitTimeout::Once
        } else {
            WaitTimeout::Within(duration)
        })
    }
}

impl fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitTimeout::Once => f.write_str("0s"),
            WaitTimeout::Within(d) => write!(f, "{:?}", d),
        }
    }
}

/// A resolved upsert condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitCondition {
    pub json_path: JsonPath,
    pub expected_value: Option<String>,
    pub timeout: WaitTimeout,
    pub poll_interval: Duration,
}

impl fmt::Display for WaitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expected_value {
            Some(v) => write!(f, "{} == {:?}", self.json_path, v),
            None => write!(f, "{} is set", self.json_path),
        }
    }
}

/// A resolved delete condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteWait {
    pub timeout: WaitTimeout,
    pub poll_interval: Duration,
}

fn parse_poll_interval(value: &str) -> Result<Duration> {
    let (negative, duration) = parse_duration(value)?;
    if negative || duration.is_zero() {
        return Err(CoreError::InvalidDuration {
            value: value.to_string(),
            message: "poll interval must be positive".to_string(),
        });
    }
    Ok(duration)
}

/// Parse a Go-style duration string (e.g. "30s", "1m30s", "1.5h", "-1s")
///
/// Returns the sign separately since [`Duration`] is unsigned.
pub fn parse_duration(value: &str) -> Result<(bool, Duration)> {
    let err = |message: &str| CoreError::InvalidDuration {
        value: value.to_string(),
        message: message.to_string(),
    };

    let mut rest = value.trim();
    let negative = if let Some(stripped) = rest.strip_prefix('-') {
        rest = stripped;
        true
    } else {
        rest = rest.strip_prefix('+').unwrap_or(rest);
        false
    };

    if rest == "0" {
        return Ok((negative, Duration::ZERO));
    }
    if rest.is_empty() {
        return Err(err("empty duration"));
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| err("missing unit"))?;
        if num_len == 0 {
            return Err(err("expected a number"));
        }
        let (int_part, frac_part) = rest[..num_len]
            .split_once('.')
            .unwrap_or((&rest[..num_len], ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err("expected a number"));
        }
        rest = &rest[num_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit_nanos: u128 = match &rest[..unit_len] {
            "ns" => 1,
            "us" | "µs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60 * 1_000_000_000,
            "h" => 3_600 * 1_000_000_000,
            _ => return Err(err("unknown unit (expected ns, us, ms, s, m or h)")),
        };
        rest = &rest[unit_len..];

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| err("invalid number"))?
        };
        let frac_digits = &frac_part[..frac_part.len().min(18)];
        let fraction: u128 = if frac_digits.is_empty() {
            0
        } else {
            frac_digits.parse().map_err(|_| err("invalid number"))?
        };
        let scale = 10u128.pow(frac_digits.len() as u32);

        total_nanos = whole
            .checked_mul(unit_nanos)
            .and_then(|n| n.checked_add(fraction * unit_nanos / scale))
            .and_then(|n| n.checked_add(total_nanos))
            .ok_or_else(|| err("duration out of range"))?;
    }

    let secs = u64::try_from(total_nanos / 1_000_000_000).map_err(|_| err("duration out of range"))?;
    let nanos = (total_nanos % 1_000_000_000) as u32;
    Ok((negative, Duration::new(secs, nanos)))
}
