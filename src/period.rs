use crate::utils::{
    end_of_week, first_day_of_month, last_day_of_month, prev_month_end, start_of_week,
    sub_months_clamped,
};
use chrono::{Datelike, Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

/// Resolved comparison window: a user-selected current period and the
/// derived previous period of identical length immediately preceding it,
/// with zero gap and zero overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBounds {
    pub current_start: NaiveDate,
    pub current_end: NaiveDate,
    pub previous_start: NaiveDate,
    pub previous_end: NaiveDate,
}

impl PeriodBounds {
    /// Inclusive day count of the current window; always >= 1.
    pub fn duration_days(&self) -> i64 {
        ((self.current_end - self.current_start).num_days() + 1).max(1)
    }
}

/// Derive the previous period for an inclusive `(start, end)` selection.
///
/// `previous_end` is the day before `start`; `previous_start` keeps the
/// window length identical. A reversed selection still yields a one-day
/// window rather than an error.
pub fn resolve_periods(start: NaiveDate, end: NaiveDate) -> PeriodBounds {
    let mut duration_days = (end - start).num_days() + 1;
    if duration_days < 1 {
        duration_days = 1;
    }

    let derived = start.checked_sub_days(Days::new(1)).and_then(|prev_end| {
        prev_end
            .checked_sub_days(Days::new(duration_days as u64 - 1))
            .map(|prev_start| (prev_start, prev_end))
    });

    let (previous_start, previous_end) = match derived {
        Some(pair) => pair,
        // Recomputed independently so an invalid anchor does not propagate.
        None => start
            .checked_sub_days(Days::new(duration_days as u64))
            .and_then(|ps| {
                ps.checked_add_days(Days::new(duration_days as u64 - 1))
                    .map(|pe| (ps, pe))
            })
            .unwrap_or((start, start)),
    };

    debug!(
        "Resolved periods: current {}..{} ({} days), previous {}..{}",
        start, end, duration_days, previous_start, previous_end
    );

    PeriodBounds {
        current_start: start,
        current_end: end,
        previous_start,
        previous_end,
    }
}

/// Named preset date ranges relative to "today". Tokens are the
/// case-sensitive identifiers the view layer sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuickFilter {
    #[serde(rename = "none")]
    NoFilter,
    #[serde(rename = "day_prev_day")]
    DayPrevDay,
    #[serde(rename = "day_last_month_same")]
    DayLastMonthSame,
    #[serde(rename = "day_last_year_same")]
    DayLastYearSame,
    #[serde(rename = "week_last_week")]
    WeekLastWeek,
    #[serde(rename = "week_last_month")]
    WeekLastMonth,
    #[serde(rename = "week_last_year")]
    WeekLastYear,
    #[serde(rename = "month_last_month")]
    MonthLastMonth,
    #[serde(rename = "month_last_year_same")]
    MonthLastYearSame,
    #[serde(rename = "year_prev_1")]
    YearPrev1,
    #[serde(rename = "year_prev_2")]
    YearPrev2,
    #[serde(rename = "year_prev_3")]
    YearPrev3,
}

impl QuickFilter {
    /// Parse a filter token. Unrecognized tokens return `None`; the caller
    /// leaves the current range unchanged.
    pub fn parse(token: &str) -> Option<Self> {
        let filter = match token {
            "none" => Self::NoFilter,
            "day_prev_day" => Self::DayPrevDay,
            "day_last_month_same" => Self::DayLastMonthSame,
            "day_last_year_same" => Self::DayLastYearSame,
            "week_last_week" => Self::WeekLastWeek,
            "week_last_month" => Self::WeekLastMonth,
            "week_last_year" => Self::WeekLastYear,
            "month_last_month" => Self::MonthLastMonth,
            "month_last_year_same" => Self::MonthLastYearSame,
            "year_prev_1" => Self::YearPrev1,
            "year_prev_2" => Self::YearPrev2,
            "year_prev_3" => Self::YearPrev3,
            _ => return None,
        };
        Some(filter)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::NoFilter => "none",
            Self::DayPrevDay => "day_prev_day",
            Self::DayLastMonthSame => "day_last_month_same",
            Self::DayLastYearSame => "day_last_year_same",
            Self::WeekLastWeek => "week_last_week",
            Self::WeekLastMonth => "week_last_month",
            Self::WeekLastYear => "week_last_year",
            Self::MonthLastMonth => "month_last_month",
            Self::MonthLastYearSame => "month_last_year_same",
            Self::YearPrev1 => "year_prev_1",
            Self::YearPrev2 => "year_prev_2",
            Self::YearPrev3 => "year_prev_3",
        }
    }

    /// Resolve to an inclusive `(start, end)` pair relative to `today`.
    ///
    /// `NoFilter` resets to the default trailing-3-full-months window ending
    /// on the last day of the previous calendar month. Month/year stepping
    /// clamps to month ends.
    pub fn resolve(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Self::NoFilter => {
                let end = prev_month_end(today);
                let start = first_day_of_month(sub_months_clamped(end, 2));
                (start, end)
            }
            Self::DayPrevDay => {
                let day = today.checked_sub_days(Days::new(1)).unwrap_or(today);
                (day, day)
            }
            Self::DayLastMonthSame => {
                let day = sub_months_clamped(today, 1);
                (day, day)
            }
            Self::DayLastYearSame => {
                let day = sub_months_clamped(today, 12);
                (day, day)
            }
            Self::WeekLastWeek => {
                let anchor = today.checked_sub_days(Days::new(7)).unwrap_or(today);
                (start_of_week(anchor), end_of_week(anchor))
            }
            Self::WeekLastMonth => {
                let anchor = sub_months_clamped(today, 1);
                (start_of_week(anchor), end_of_week(anchor))
            }
            Self::WeekLastYear => {
                let anchor = sub_months_clamped(today, 12);
                (start_of_week(anchor), end_of_week(anchor))
            }
            Self::MonthLastMonth => {
                let anchor = sub_months_clamped(today, 1);
                (
                    first_day_of_month(anchor),
                    last_day_of_month(anchor.year(), anchor.month()),
                )
            }
            Self::MonthLastYearSame => {
                let anchor = sub_months_clamped(today, 12);
                (
                    first_day_of_month(anchor),
                    last_day_of_month(anchor.year(), anchor.month()),
                )
            }
            Self::YearPrev1 => year_bounds(today.year()),
            Self::YearPrev2 => year_bounds(today.year() - 1),
            Self::YearPrev3 => year_bounds(today.year() - 2),
        }
    }
}

fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
    )
}
