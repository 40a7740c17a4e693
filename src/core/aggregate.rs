use std::collections::HashMap;

use chrono::NaiveDate;

use crate::core::schedule::availability;
use crate::models::{BusinessSummary, ServiceListing};

/// Group filtered listings into one entry per owning company
///
/// Output order is the order each company first appears in the input, which
/// the provider guarantees is service-creation order. Display fields and the
/// service location are taken from that first listing and never overwritten;
/// later listings of the same company only lower the running minimum price.
/// Single pass, no backtracking.
pub fn group_by_business(listings: &[ServiceListing], today: NaiveDate) -> Vec<BusinessSummary> {
    let mut businesses: Vec<BusinessSummary> = Vec::new();
    let mut index_by_company: HashMap<i64, usize> = HashMap::new();

    for listing in listings {
        match index_by_company.get(&listing.company.id) {
            Some(&index) => {
                let entry = &mut businesses[index];
                if listing.service.price < entry.lowest_price {
                    entry.lowest_price = listing.service.price;
                }
            }
            None => {
                index_by_company.insert(listing.company.id, businesses.len());
                businesses.push(BusinessSummary {
                    company_id: listing.company.id,
                    business_image: listing.company.image_url.clone(),
                    cover_image_url: listing.company.cover_image_url.clone(),
                    business_name: listing.company.business_name.clone(),
                    business_type: listing.company.business_type.clone(),
                    availability: availability(listing.company_schedule(), today),
                    location: listing.service.location,
                    lowest_price: listing.service.price,
                });
            }
        }
    }

    businesses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::{Availability, WorkingSchedule};
    use crate::models::{
        CompanyPreference, CompanyRecord, RateType, ServiceLocation, ServiceRecord,
    };
    use chrono::Weekday;

    fn listing_with_price(company_id: i64, service_id: i64, price: f64) -> ServiceListing {
        ServiceListing {
            service: ServiceRecord {
                id: service_id,
                name: format!("Service {}", service_id),
                description: "desc".to_string(),
                location: if service_id % 2 == 0 {
                    ServiceLocation::OutCall
                } else {
                    ServiceLocation::InCall
                },
                rate_type: RateType::ByHour,
                price,
                time_duration: Some(60),
                number_of_rooms: None,
                number_of_windows: None,
                image_url: format!("https://cdn.test/{}.jpg", service_id),
            },
            company: CompanyRecord {
                id: company_id,
                business_name: Some(format!("Business {}", company_id)),
                business_type: Some("Cleaning".to_string()),
                image_url: Some(format!("https://cdn.test/biz{}.jpg", company_id)),
                cover_image_url: None,
            },
            preference: Some(CompanyPreference {
                coordinate: None,
                range: None,
                schedule: Some(WorkingSchedule::Weekly {
                    working_days: vec![Weekday::Mon],
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
    fn test_lowest_price_wins() {
        let listings = vec![
            listing_with_price(1, 11, 50.0),
            listing_with_price(1, 12, 20.0),
            listing_with_price(1, 13, 35.0),
        ];

        let businesses = group_by_business(&listings, monday());
        assert_eq!(businesses.len(), 1);
        assert_eq!(businesses[0].lowest_price, 20.0);
    }

    #[test]
    fn test_representative_fields_from_first_listing() {
        let listings = vec![
            listing_with_price(1, 11, 50.0),
            listing_with_price(1, 12, 20.0),
        ];

        let businesses = group_by_business(&listings, monday());
        // Service 11 is odd, so the representative location is InCall even
        // though the cheaper service 12 is OutCall
        assert_eq!(businesses[0].location, ServiceLocation::InCall);
        assert_eq!(businesses[0].business_name.as_deref(), Some("Business 1"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let listings = vec![
            listing_with_price(7, 71, 10.0),
            listing_with_price(3, 31, 5.0),
            listing_with_price(7, 72, 1.0),
            listing_with_price(5, 51, 8.0),
        ];

        let businesses = group_by_business(&listings, monday());
        let order: Vec<i64> = businesses.iter().map(|b| b.company_id).collect();
        assert_eq!(order, vec![7, 3, 5]);
        assert_eq!(businesses[0].lowest_price, 1.0);
    }

    #[test]
    fn test_availability_computed_per_company() {
        let listings = vec![listing_with_price(1, 11, 50.0)];
        let businesses = group_by_business(&listings, monday());
        assert_eq!(businesses[0].availability, Availability::Now);
    }

    #[test]
    fn test_empty_input() {
        let businesses = group_by_business(&[], monday());
        assert!(businesses.is_empty());
    }
}
