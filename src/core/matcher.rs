use chrono::NaiveDate;

use crate::core::aggregate::group_by_business;
use crate::core::filters::{apply_criteria, within_range};
use crate::models::{BusinessSummary, Coordinate, SearchCriteria, ServiceListing};

/// Summary messages carried alongside each result set; mobile clients show
/// these verbatim.
const MSG_RETRIEVED: &str = "Businesses retrieved successfully";
const MSG_NONE_NEARBY: &str = "No Business Found in your Location";
const MSG_FILTERED: &str = "Businesses filtered successfully";
const MSG_NONE_FOR_FILTERS: &str = "No Business Found for given filters";

/// Result of one discovery or filter request
#[derive(Debug)]
pub struct MatchResult {
    pub businesses: Vec<BusinessSummary>,
    pub message: &'static str,
    pub total_listings: usize,
}

/// Matching orchestrator
///
/// Runs the filter stages over a listing snapshot fetched by the caller,
/// then groups the survivors per business. Pure and synchronous: the
/// snapshot is owned by the request, `today` is injected, and nothing here
/// touches storage or shared state, so any number of requests can run
/// concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Radius-only discovery around a customer position
    ///
    /// Keeps every listing whose owning company's catchment contains the
    /// customer, then aggregates per business.
    pub fn discover(
        &self,
        position: Coordinate,
        listings: Vec<ServiceListing>,
        today: NaiveDate,
    ) -> MatchResult {
        let total_listings = listings.len();

        let nearby: Vec<ServiceListing> = listings
            .into_iter()
            .filter(|listing| {
                within_range(position, listing.company_coordinate(), listing.company_range())
            })
            .collect();

        let businesses = group_by_business(&nearby, today);
        let message = if businesses.is_empty() {
            MSG_NONE_NEARBY
        } else {
            MSG_RETRIEVED
        };

        MatchResult {
            businesses,
            message,
            total_listings,
        }
    }

    /// Criteria filtering over the directory
    ///
    /// Every criterion is optional and independently combinable; day tokens
    /// must already be parsed (see `filters::parse_working_days`), so this
    /// cannot fail.
    pub fn filter(
        &self,
        criteria: &SearchCriteria,
        listings: Vec<ServiceListing>,
        today: NaiveDate,
    ) -> MatchResult {
        let total_listings = listings.len();

        let filtered = apply_criteria(listings, criteria, today);
        let businesses = group_by_business(&filtered, today);
        let message = if businesses.is_empty() {
            MSG_NONE_FOR_FILTERS
        } else {
            MSG_FILTERED
        };

        MatchResult {
            businesses,
            message,
            total_listings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::WorkingSchedule;
    use crate::models::{
        CompanyPreference, CompanyRecord, RangeSpec, RateType, ServiceLocation, ServiceRecord,
    };
    use chrono::Weekday;

    fn listing(company_id: i64, service_id: i64, price: f64, coordinate: Coordinate) -> ServiceListing {
        ServiceListing {
            service: ServiceRecord {
                id: service_id,
                name: format!("Service {}", service_id),
                description: "desc".to_string(),
                location: ServiceLocation::Both,
                rate_type: RateType::FixedPrice,
                price,
                time_duration: None,
                number_of_rooms: None,
                number_of_windows: None,
                image_url: "https://cdn.test/s.jpg".to_string(),
            },
            company: CompanyRecord {
                id: company_id,
                business_name: Some(format!("Business {}", company_id)),
                business_type: Some("Cleaning".to_string()),
                image_url: None,
                cover_image_url: None,
            },
            preference: Some(CompanyPreference {
                coordinate: Some(coordinate),
                range: Some(RangeSpec::kilometers(10.0)),
                schedule: Some(WorkingSchedule::Weekly {
                    working_days: vec![Weekday::Mon, Weekday::Tue],
                    start_time: None,
                    end_time: None,
                }),
            }),
        }
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_discover_filters_by_radius() {
        let matcher = Matcher::new();
        let customer = Coordinate::new(40.7128, -74.0060);

        let listings = vec![
            listing(1, 11, 40.0, Coordinate::new(40.7200, -74.0060)), // ~0.8 km
            listing(2, 21, 25.0, Coordinate::new(41.5000, -74.0000)), // ~88 km
        ];

        let result = matcher.discover(customer, listings, monday());
        assert_eq!(result.total_listings, 2);
        assert_eq!(result.businesses.len(), 1);
        assert_eq!(result.businesses[0].company_id, 1);
        assert_eq!(result.message, "Businesses retrieved successfully");
    }

    #[test]
    fn test_discover_no_match_message() {
        let matcher = Matcher::new();
        let customer = Coordinate::new(0.0, 0.0);

        let listings = vec![listing(1, 11, 40.0, Coordinate::new(40.72, -74.0))];
        let result = matcher.discover(customer, listings, monday());

        assert!(result.businesses.is_empty());
        assert_eq!(result.message, "No Business Found in your Location");
    }

    #[test]
    fn test_filter_empty_criteria_returns_everything() {
        let matcher = Matcher::new();
        let listings = vec![
            listing(1, 11, 40.0, Coordinate::new(40.72, -74.0)),
            listing(2, 21, 25.0, Coordinate::new(41.50, -74.0)),
        ];

        let result = matcher.filter(&SearchCriteria::default(), listings, monday());
        assert_eq!(result.businesses.len(), 2);
        assert_eq!(result.message, "Businesses filtered successfully");
    }

    #[test]
    fn test_filter_no_match_message() {
        let matcher = Matcher::new();
        let listings = vec![listing(1, 11, 40.0, Coordinate::new(40.72, -74.0))];

        let criteria = SearchCriteria {
            business_type: Some("Plumbing".to_string()),
            ..Default::default()
        };
        let result = matcher.filter(&criteria, listings, monday());

        assert!(result.businesses.is_empty());
        assert_eq!(result.message, "No Business Found for given filters");
    }

    #[test]
    fn test_filter_aggregates_lowest_price() {
        let matcher = Matcher::new();
        let near = Coordinate::new(40.7200, -74.0060);
        let listings = vec![
            listing(1, 11, 50.0, near),
            listing(1, 12, 20.0, near),
            listing(1, 13, 35.0, near),
        ];

        let criteria = SearchCriteria {
            position: Some(Coordinate::new(40.7128, -74.0060)),
            ..Default::default()
        };
        let result = matcher.filter(&criteria, listings, monday());

        assert_eq!(result.businesses.len(), 1);
        assert_eq!(result.businesses[0].lowest_price, 20.0);
    }
}
