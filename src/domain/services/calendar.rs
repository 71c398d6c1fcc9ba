use chrono::{Datelike, Days, NaiveDate, Weekday};

/// How far past the requested start date a calendar window extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMode {
    /// Through the end of the start date's month, extended forward to the
    /// Saturday that completes the last calendar row.
    EndOfMonth,
    /// A fixed 31-day span counted from the preceding Sunday.
    FixedThirtyOne,
}

impl WindowMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "EOM" => Some(Self::EndOfMonth),
            "31" => Some(Self::FixedThirtyOne),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndOfMonth => "EOM",
            Self::FixedThirtyOne => "31",
        }
    }
}

/// The Sunday on or before `date`.
pub fn preceding_sunday(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_sunday()))
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next_month.map_or(date, |d| d - Days::new(1))
}

/// Expands a requested start date into the gapless, ordered list of dates the
/// calendar grid shows. The window always begins on the Sunday on/before the
/// start date so rows align to week boundaries.
pub fn expand_window(start: NaiveDate, mode: WindowMode) -> Vec<NaiveDate> {
    let window_start = preceding_sunday(start);

    let window_end = match mode {
        WindowMode::EndOfMonth => {
            let month_end = last_day_of_month(start);
            // Extend to the Saturday on/after the month end.
            let days_to_saturday = match month_end.weekday() {
                Weekday::Sat => 0,
                other => 6 - other.num_days_from_sunday(),
            };
            month_end + Days::new(u64::from(days_to_saturday))
        }
        WindowMode::FixedThirtyOne => window_start + Days::new(31),
    };

    window_start
        .iter_days()
        .take_while(|d| *d <= window_end)
        .collect()
}
