//! # Report Module
//!
//! Window resolution and result types of the sales summary.
//!
//! ## Window Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  start     end       resolved window                                    │
//! │  ───────   ───────   ──────────────────────────────────────────────     │
//! │  (none)    (any)     today 00:00:00  ..=  today 23:59:59                │
//! │  (any)     (none)    today 00:00:00  ..=  today 23:59:59                │
//! │  D1        D2        D1    00:00:00  ..=  D2    23:59:59                │
//! │  D1 > D2             rejected (VALIDATION)                              │
//! │  not YYYY-MM-DD      rejected (VALIDATION)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Resolution never reads the clock: the caller passes `today`, and the
//! timezone used to turn calendar days into instants is a parameter too.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;

/// Calendar date format accepted for report bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Name reported when the window holds no sales.
pub const NO_BEST_SELLER: &str = "-";

// =============================================================================
// Report Window
// =============================================================================

/// An inclusive window of local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// The same window as UTC instants, ready to compare against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    /// The whole of one calendar day.
    pub fn day(date: NaiveDate) -> Self {
        ReportWindow {
            start: date.and_time(NaiveTime::MIN),
            end: end_of_day(date),
        }
    }

    /// Resolves optional `YYYY-MM-DD` bounds into a window.
    ///
    /// If either bound is missing or blank the window is `today`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use kasir_core::ReportWindow;
    ///
    /// let today = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    /// let window = ReportWindow::resolve(Some("2026-01-01"), Some("2026-01-31"), today).unwrap();
    /// assert_eq!(window.end.to_string(), "2026-01-31 23:59:59");
    /// ```
    pub fn resolve(start: Option<&str>, end: Option<&str>, today: NaiveDate) -> CoreResult<Self> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        let (Some(start), Some(end)) = (start, end) else {
            return Ok(ReportWindow::day(today));
        };

        let start_date = parse_date("start", start)?;
        let end_date = parse_date("end", end)?;

        if start_date > end_date {
            return Err(ValidationError::InvertedRange {
                start_field: "start".to_string(),
                end_field: "end".to_string(),
            }
            .into());
        }

        Ok(ReportWindow {
            start: start_date.and_time(NaiveTime::MIN),
            end: end_of_day(end_date),
        })
    }

    /// Interprets the window in `tz` and converts it to UTC.
    ///
    /// A bound that falls in a DST gap is read as if it were UTC; an
    /// ambiguous bound widens the window (earliest start, latest end).
    pub fn in_timezone<Tz: TimeZone>(&self, tz: &Tz) -> UtcWindow {
        let start = tz
            .from_local_datetime(&self.start)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&self.start));
        let end = tz
            .from_local_datetime(&self.end)
            .latest()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&self.end));

        UtcWindow { start, end }
    }
}

fn parse_date(field: &str, value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidDateFormat {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()
    })
}

/// `23:59:59` of `date`.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + Duration::seconds(86_399)
}

// =============================================================================
// Summary Types
// =============================================================================

/// Best-selling product of a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BestSeller {
    pub name: String,
    /// Total quantity sold within the window.
    pub sold: i64,
}

impl BestSeller {
    /// Sentinel for a window without sales.
    pub fn none() -> Self {
        BestSeller {
            name: NO_BEST_SELLER.to_string(),
            sold: 0,
        }
    }
}

/// Sales summary over a window. Derived from the ledger on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub total_revenue: Money,
    pub total_transaction: i64,
    pub best_seller: BestSeller,
}

impl SalesSummary {
    pub fn empty() -> Self {
        SalesSummary {
            total_revenue: Money::zero(),
            total_transaction: 0,
            best_seller: BestSeller::none(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
