use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::core::schedule::{Availability, WorkingSchedule};

/// Geographic position in signed decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Unit a company chose for its catchment radius
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Miles,
}

impl DistanceUnit {
    /// Parse the stored unit column; anything unrecognized falls back to
    /// kilometers.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("miles") => DistanceUnit::Miles,
            _ => DistanceUnit::Kilometers,
        }
    }
}

/// A company's configured catchment radius
///
/// Both unit columns are persisted side by side; the one named by `unit` is
/// authoritative and the other may be stale. Nothing reconciles the two when
/// they disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    #[serde(rename = "distanceRangeKilometer")]
    pub range_km: f64,
    #[serde(rename = "distanceRangeMiles")]
    pub range_miles: f64,
    #[serde(rename = "distanceUnit", default)]
    pub unit: DistanceUnit,
}

impl RangeSpec {
    pub fn kilometers(range_km: f64) -> Self {
        Self {
            range_km,
            range_miles: 0.0,
            unit: DistanceUnit::Kilometers,
        }
    }

    pub fn miles(range_miles: f64) -> Self {
        Self {
            range_km: 0.0,
            range_miles,
            unit: DistanceUnit::Miles,
        }
    }
}

/// Where a service is rendered: at the company, at the customer, or either
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceLocation {
    #[serde(rename = "in-call")]
    InCall,
    #[serde(rename = "out-call")]
    OutCall,
    #[serde(rename = "both")]
    Both,
}

impl ServiceLocation {
    /// Parse the stored enum column value
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "in-call" => Some(ServiceLocation::InCall),
            "out-call" => Some(ServiceLocation::OutCall),
            "both" => Some(ServiceLocation::Both),
            _ => None,
        }
    }
}

/// How a service's price is quoted
///
/// The wire spellings are fixed; mobile clients match on them literally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateType {
    #[serde(rename = "Fixed Price")]
    FixedPrice,
    #[serde(rename = "By hour")]
    ByHour,
    #[serde(rename = "By Room")]
    ByRoom,
    #[serde(rename = "By Window")]
    ByWindow,
}

impl RateType {
    /// Parse the stored enum column value
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "Fixed Price" => Some(RateType::FixedPrice),
            "By hour" => Some(RateType::ByHour),
            "By Room" => Some(RateType::ByRoom),
            "By Window" => Some(RateType::ByWindow),
            _ => None,
        }
    }
}

/// One service as published by a company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: i64,
    #[serde(rename = "serviceName")]
    pub name: String,
    pub description: String,
    pub location: ServiceLocation,
    #[serde(rename = "rateType")]
    pub rate_type: RateType,
    pub price: f64,
    #[serde(rename = "timeDuration", default)]
    pub time_duration: Option<i32>,
    #[serde(rename = "numberOfRooms", default)]
    pub number_of_rooms: Option<i32>,
    #[serde(rename = "numberOfWindows", default)]
    pub number_of_windows: Option<i32>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// A company's display profile. Every field except the id may be absent for
/// companies that never completed registration; fallbacks are applied at the
/// wire boundary, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: i64,
    #[serde(rename = "businessName", default)]
    pub business_name: Option<String>,
    #[serde(rename = "businessType", default)]
    pub business_type: Option<String>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "coverImageUrl", default)]
    pub cover_image_url: Option<String>,
}

/// A company's matching preferences: position, catchment and schedule
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyPreference {
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub range: Option<RangeSpec>,
    #[serde(default)]
    pub schedule: Option<WorkingSchedule>,
}

/// One denormalized row from the data provider: a service joined with its
/// owning company's profile and preference. The provider emits these ordered
/// by service id ascending, so the first listing seen for a company belongs
/// to its first-created service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListing {
    pub service: ServiceRecord,
    pub company: CompanyRecord,
    #[serde(default)]
    pub preference: Option<CompanyPreference>,
}

impl ServiceListing {
    /// The owning company's stored position, if any
    pub fn company_coordinate(&self) -> Option<Coordinate> {
        self.preference.as_ref().and_then(|p| p.coordinate)
    }

    /// The owning company's configured catchment, if any
    pub fn company_range(&self) -> Option<&RangeSpec> {
        self.preference.as_ref().and_then(|p| p.range.as_ref())
    }

    /// The owning company's active schedule, if any
    pub fn company_schedule(&self) -> Option<&WorkingSchedule> {
        self.preference.as_ref().and_then(|p| p.schedule.as_ref())
    }
}

/// A company's profile and preference independent of any service row,
/// as fetched for the business-details lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub company: CompanyRecord,
    #[serde(default)]
    pub preference: Option<CompanyPreference>,
}

impl CompanyEntry {
    pub fn schedule(&self) -> Option<&WorkingSchedule> {
        self.preference.as_ref().and_then(|p| p.schedule.as_ref())
    }
}

/// Parsed search criteria for a directory filter request
///
/// Day tokens are parsed and validated before this is built; the core never
/// sees raw comma-separated strings. Every criterion is optional and they
/// compose by logical AND.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub position: Option<Coordinate>,
    pub business_type: Option<String>,
    pub working_days: Option<Vec<Weekday>>,
    pub availability: Option<String>,
}

/// Per-request aggregation result for one company
///
/// Display fields come from the first service seen for the company during
/// aggregation; `lowest_price` tracks the minimum across all of its services.
/// Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessSummary {
    pub company_id: i64,
    pub business_image: Option<String>,
    pub cover_image_url: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub availability: Availability,
    pub location: ServiceLocation,
    pub lowest_price: f64,
}
