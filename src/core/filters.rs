use chrono::{NaiveDate, Weekday};
use thiserror::Error;

use crate::core::distance::{haversine_distance, km_to_miles};
use crate::core::schedule::{availability, parse_day_token, WorkingSchedule, DAY_TOKENS};
use crate::models::{Coordinate, DistanceUnit, RangeSpec, SearchCriteria, ServiceListing};

/// Errors for invalid filter input. Raised before any filtering runs; the
/// matching pipeline itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid working days: {}. Valid days are: {}", .invalid.join(", "), DAY_TOKENS.join(", "))]
    InvalidWorkingDays { invalid: Vec<String> },
}

/// Parse a comma-separated day filter like `"Mon,Tue"` into typed weekdays
///
/// Every token must be one of the seven valid short names; any unknown token
/// fails the whole request rather than being skipped.
pub fn parse_working_days(raw: &str) -> Result<Vec<Weekday>, FilterError> {
    let mut days = Vec::new();
    let mut invalid = Vec::new();

    for token in raw.split(',') {
        let token = token.trim();
        match parse_day_token(token) {
            Some(day) => days.push(day),
            None => invalid.push(token.to_string()),
        }
    }

    if !invalid.is_empty() {
        return Err(FilterError::InvalidWorkingDays { invalid });
    }

    Ok(days)
}

/// Radius check for one company
///
/// A company without a stored position or configured range is simply not
/// discoverable. The computed distance is compared against the threshold of
/// whichever unit the company chose.
#[inline]
pub fn within_range(
    customer: Coordinate,
    company: Option<Coordinate>,
    range: Option<&RangeSpec>,
) -> bool {
    let (Some(position), Some(range)) = (company, range) else {
        return false;
    };

    let distance_km = haversine_distance(
        customer.latitude,
        customer.longitude,
        position.latitude,
        position.longitude,
    );

    match range.unit {
        DistanceUnit::Miles => km_to_miles(distance_km) <= range.range_miles,
        DistanceUnit::Kilometers => distance_km <= range.range_km,
    }
}

/// Case-insensitive exact match on the owning company's business type
#[inline]
pub fn matches_business_type(listing: &ServiceListing, wanted: &str) -> bool {
    let wanted = wanted.trim().to_lowercase();
    listing
        .company
        .business_type
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        == wanted
}

/// Working-day overlap against the requested day set
///
/// Only companies on the weekly day-list schedule can match; a company on
/// the date-band schedule, or with no schedule at all, never does.
#[inline]
pub fn matches_working_days(listing: &ServiceListing, wanted: &[Weekday]) -> bool {
    match listing.company_schedule() {
        Some(WorkingSchedule::Weekly { working_days, .. }) if !working_days.is_empty() => {
            wanted.iter().any(|day| working_days.contains(day))
        }
        _ => false,
    }
}

/// The staged criteria pipeline over a listing snapshot
///
/// Each stage runs only when its criterion is present and the stages compose
/// by logical AND; relative input order is preserved. Absent coordinates skip
/// the geo stage entirely.
pub fn apply_criteria(
    listings: Vec<ServiceListing>,
    criteria: &SearchCriteria,
    today: NaiveDate,
) -> Vec<ServiceListing> {
    listings
        .into_iter()
        .filter(|listing| match criteria.position {
            Some(position) => {
                within_range(position, listing.company_coordinate(), listing.company_range())
            }
            None => true,
        })
        .filter(|listing| match &criteria.business_type {
            Some(wanted) => matches_business_type(listing, wanted),
            None => true,
        })
        .filter(|listing| match &criteria.working_days {
            Some(wanted) => matches_working_days(listing, wanted),
            None => true,
        })
        .filter(|listing| match &criteria.availability {
            Some(wanted) => availability(listing.company_schedule(), today).matches_label(wanted),
            None => true,
        })
        .collect()
}
