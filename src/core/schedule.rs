use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The seven valid short day tokens, in the stored `Mon,Tue,...` format
pub const DAY_TOKENS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Parse a short day token like `"Mon"`. Tokens are trimmed but otherwise
/// matched exactly, mirroring how they are stored.
pub fn parse_day_token(token: &str) -> Option<Weekday> {
    match token.trim() {
        "Mon" => Some(Weekday::Mon),
        "Tue" => Some(Weekday::Tue),
        "Wed" => Some(Weekday::Wed),
        "Thu" => Some(Weekday::Thu),
        "Fri" => Some(Weekday::Fri),
        "Sat" => Some(Weekday::Sat),
        "Sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Short display name for a weekday (`"Mon"`, `"Tue"`, ...)
pub fn day_token(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// A company's recurring availability configuration
///
/// Exactly one variant is active per company; which one is a schema choice
/// made where the preference row is written, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WorkingSchedule {
    /// Recurring weekly day list. The opening hours are display-only
    /// `H:MM AM/PM` strings and play no part in the availability math.
    #[serde(rename_all = "camelCase")]
    Weekly {
        working_days: Vec<Weekday>,
        #[serde(default)]
        start_time: Option<String>,
        #[serde(default)]
        end_time: Option<String>,
    },
    /// Recurring weekday band (possibly wrapping past Saturday) that is only
    /// valid inside an absolute, inclusive calendar-date window.
    #[serde(rename_all = "camelCase")]
    DateBand {
        start_day: Weekday,
        end_day: Weekday,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

/// Availability state of a company at a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    Now,
    Tomorrow,
    OnDay(Weekday),
    NotAvailable,
}

impl Availability {
    /// Human-readable label, the exact strings clients display and filter by
    pub fn label(&self) -> String {
        match self {
            Availability::Now => "Available Now".to_string(),
            Availability::Tomorrow => "Available Tomorrow".to_string(),
            Availability::OnDay(day) => format!("Available {}", day_token(*day)),
            Availability::NotAvailable => "Not available".to_string(),
        }
    }

    /// Case-insensitive comparison against a requested label
    pub fn matches_label(&self, wanted: &str) -> bool {
        self.label().eq_ignore_ascii_case(wanted.trim())
    }

    /// Short name of the day this state points at, relative to `today`.
    /// Empty when not available.
    pub fn day_name(&self, today: NaiveDate) -> &'static str {
        match self {
            Availability::Now => day_token(today.weekday()),
            Availability::Tomorrow => day_token(today.weekday().succ()),
            Availability::OnDay(day) => day_token(*day),
            Availability::NotAvailable => "",
        }
    }
}

/// Compute a company's availability for `today`
///
/// A missing schedule, or a weekly schedule with no configured days, is
/// simply not available; it is never an error. `today` is injected so the
/// evaluation stays deterministic — callers read the wall clock once at the
/// request boundary.
pub fn availability(schedule: Option<&WorkingSchedule>, today: NaiveDate) -> Availability {
    let Some(schedule) = schedule else {
        return Availability::NotAvailable;
    };

    match schedule {
        WorkingSchedule::Weekly { working_days, .. } => weekly_availability(working_days, today),
        WorkingSchedule::DateBand {
            start_day,
            end_day,
            start_date,
            end_date,
        } => date_band_availability(*start_day, *end_day, *start_date, *end_date, today),
    }
}

/// Weekly day-list evaluation: today, else the nearest day in a 7-day scan
fn weekly_availability(working_days: &[Weekday], today: NaiveDate) -> Availability {
    if working_days.is_empty() {
        return Availability::NotAvailable;
    }

    if working_days.contains(&today.weekday()) {
        return Availability::Now;
    }

    for offset in 1..=7u64 {
        let candidate = today + Days::new(offset);
        if working_days.contains(&candidate.weekday()) {
            return if offset == 1 {
                Availability::Tomorrow
            } else {
                Availability::OnDay(candidate.weekday())
            };
        }
    }

    Availability::NotAvailable
}

/// Day-band evaluation: a candidate day must sit inside the weekday band
/// AND inside the calendar window.
fn date_band_availability(
    start_day: Weekday,
    end_day: Weekday,
    start_date: NaiveDate,
    end_date: NaiveDate,
    today: NaiveDate,
) -> Availability {
    if in_band(start_day, end_day, today.weekday()) && in_window(start_date, end_date, today) {
        return Availability::Now;
    }

    for offset in 1..=7u64 {
        let candidate = today + Days::new(offset);
        if in_band(start_day, end_day, candidate.weekday())
            && in_window(start_date, end_date, candidate)
        {
            return if offset == 1 {
                Availability::Tomorrow
            } else {
                Availability::OnDay(candidate.weekday())
            };
        }
    }

    Availability::NotAvailable
}

/// Circular weekday-band membership, Sunday-based (Sun=0..Sat=6).
/// A band whose end precedes its start wraps past Saturday.
#[inline]
fn in_band(start: Weekday, end: Weekday, day: Weekday) -> bool {
    let start_idx = start.num_days_from_sunday();
    let end_idx = end.num_days_from_sunday();
    let day_idx = day.num_days_from_sunday();

    if end_idx >= start_idx {
        day_idx >= start_idx && day_idx <= end_idx
    } else {
        day_idx >= start_idx || day_idx <= end_idx
    }
}

/// Inclusive date-window membership; dates are already day-granular
#[inline]
fn in_window(start: NaiveDate, end: NaiveDate, day: NaiveDate) -> bool {
    day >= start && day <= end
}
