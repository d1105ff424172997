// SPDX-License-Identifier: MPL-2.0
//! Localized "time ago" phrases.
//!
//! The elapsed time is bucketed by descending thresholds (years, months,
//! days, hours, minutes, seconds) using fixed divisors: a month is 30 days
//! and a year is 365 days. The translation context is passed on every call
//! so a locale switch takes effect immediately.
//!
//! # Examples
//!
//! ```
//! use portal_front::i18n::{time_ago, I18n, Locale};
//!
//! let i18n = I18n::new(Locale::Ru, Locale::En).unwrap();
//! let now_ms = 1_700_000_000_000;
//! let phrase = time_ago::time_since_at(&i18n, now_ms - 5 * 60_000, now_ms);
//! assert_eq!(phrase, "5 минут назад");
//! ```

use super::fluent::I18n;
use chrono::Utc;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_MONTH: i64 = 2_592_000;
pub const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Catalog key of the trailing "ago" word.
const AGO_KEY: &str = "interval.ago";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

impl TimeUnit {
    /// Buckets in the order they are tried.
    const DESCENDING: [TimeUnit; 6] = [
        TimeUnit::Years,
        TimeUnit::Months,
        TimeUnit::Days,
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
    ];

    pub fn divisor(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1,
            TimeUnit::Minutes => SECONDS_PER_MINUTE,
            TimeUnit::Hours => SECONDS_PER_HOUR,
            TimeUnit::Days => SECONDS_PER_DAY,
            TimeUnit::Months => SECONDS_PER_MONTH,
            TimeUnit::Years => SECONDS_PER_YEAR,
        }
    }

    /// Pluralized catalog key, e.g. `interval.minutes`.
    pub fn key(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "interval.seconds",
            TimeUnit::Minutes => "interval.minutes",
            TimeUnit::Hours => "interval.hours",
            TimeUnit::Days => "interval.days",
            TimeUnit::Months => "interval.months",
            TimeUnit::Years => "interval.years",
        }
    }
}

/// Elapsed time reduced to its largest whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeTime {
    pub magnitude: i64,
    pub unit: TimeUnit,
}

impl RelativeTime {
    /// Buckets an elapsed-seconds count. Negative counts (timestamps in the
    /// future, usually clock skew) are clamped to zero seconds.
    pub fn from_elapsed_secs(elapsed: i64) -> Self {
        let elapsed = elapsed.max(0);
        let unit = TimeUnit::DESCENDING
            .into_iter()
            .find(|unit| elapsed >= unit.divisor())
            .unwrap_or(TimeUnit::Seconds);
        Self {
            magnitude: elapsed / unit.divisor(),
            unit,
        }
    }

    /// Elapsed time between two millisecond timestamps, floored to whole
    /// seconds.
    pub fn between(timestamp_ms: i64, now_ms: i64) -> Self {
        let elapsed = now_ms.saturating_sub(timestamp_ms).div_euclid(1000);
        Self::from_elapsed_secs(elapsed)
    }

    /// "<magnitude> <unit> ago" in the context's active locale.
    pub fn format(&self, i18n: &I18n) -> String {
        format!(
            "{} {}",
            i18n.tr_count(self.unit.key(), self.magnitude),
            i18n.tr(AGO_KEY)
        )
    }
}

/// Formats a past millisecond timestamp relative to the current time.
pub fn time_since(i18n: &I18n, timestamp_ms: i64) -> String {
    time_since_at(i18n, timestamp_ms, Utc::now().timestamp_millis())
}

/// Like [`time_since`] with an explicit "now".
pub fn time_since_at(i18n: &I18n, timestamp_ms: i64, now_ms: i64) -> String {
    RelativeTime::between(timestamp_ms, now_ms).format(i18n)
}
