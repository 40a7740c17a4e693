use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::schedule::Availability;
use crate::models::domain::{BusinessSummary, RateType, ServiceLocation, ServiceRecord};

/// Placeholder strings substituted for missing company profile fields.
/// Clients render these literally, so they are part of the wire contract;
/// internally the model stays `Option`-clean and the substitution happens
/// only here.
pub const UNKNOWN_BUSINESS_NAME: &str = "Unknown";
pub const UNKNOWN_BUSINESS_TYPE: &str = "Unknown Business Type";
pub const UNKNOWN_BUSINESS_IMAGE: &str = "Unknown Business Profile Image";
pub const UNKNOWN_COVER_IMAGE: &str = "Unknown Cover Image";

/// One business entry in a discovery or filter response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessPayload {
    pub id: i64,
    #[serde(rename = "businessImage")]
    pub business_image: String,
    #[serde(rename = "coverImageUrl")]
    pub cover_image_url: String,
    #[serde(rename = "businessName")]
    pub business_name: String,
    #[serde(rename = "businessType")]
    pub business_type: String,
    pub availability: String,
    pub location: ServiceLocation,
    pub price: String,
}

impl From<BusinessSummary> for BusinessPayload {
    fn from(summary: BusinessSummary) -> Self {
        Self {
            id: summary.company_id,
            business_image: summary
                .business_image
                .unwrap_or_else(|| UNKNOWN_BUSINESS_IMAGE.to_string()),
            cover_image_url: summary
                .cover_image_url
                .unwrap_or_else(|| UNKNOWN_COVER_IMAGE.to_string()),
            business_name: summary
                .business_name
                .unwrap_or_else(|| UNKNOWN_BUSINESS_NAME.to_string()),
            business_type: summary
                .business_type
                .unwrap_or_else(|| UNKNOWN_BUSINESS_TYPE.to_string()),
            availability: summary.availability.label(),
            location: summary.location,
            price: summary.lowest_price.to_string(),
        }
    }
}

/// Response for the discovery and filter endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessesResponse {
    pub message: String,
    pub data: Vec<BusinessPayload>,
}

/// One service entry in a business-details response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDetailPayload {
    pub id: i64,
    #[serde(rename = "serviceName")]
    pub service_name: String,
    pub description: String,
    pub location: ServiceLocation,
    #[serde(rename = "rateType")]
    pub rate_type: RateType,
    pub price: String,
    #[serde(rename = "timeDuration")]
    pub time_duration: Option<i32>,
    #[serde(rename = "numberOfRooms")]
    pub number_of_rooms: Option<i32>,
    #[serde(rename = "numberOfWindows")]
    pub number_of_windows: Option<i32>,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl From<ServiceRecord> for ServiceDetailPayload {
    fn from(service: ServiceRecord) -> Self {
        Self {
            id: service.id,
            service_name: service.name,
            description: service.description,
            location: service.location,
            rate_type: service.rate_type,
            price: service.price.to_string(),
            time_duration: service.time_duration,
            number_of_rooms: service.number_of_rooms,
            number_of_windows: service.number_of_windows,
            image_url: service.image_url,
        }
    }
}

/// Body of a business-details response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessDetailsPayload {
    #[serde(rename = "businessImage")]
    pub business_image: String,
    #[serde(rename = "coverImageUrl")]
    pub cover_image_url: String,
    #[serde(rename = "businessName")]
    pub business_name: String,
    #[serde(rename = "businessType")]
    pub business_type: String,
    pub availability: String,
    #[serde(rename = "availabilityDay")]
    pub availability_day: String,
    pub services: Vec<ServiceDetailPayload>,
}

impl BusinessDetailsPayload {
    /// Assemble the details payload from a company's profile, its computed
    /// availability and its service list
    pub fn assemble(
        business_name: Option<String>,
        business_type: Option<String>,
        business_image: Option<String>,
        cover_image_url: Option<String>,
        availability: Availability,
        today: NaiveDate,
        services: Vec<ServiceRecord>,
    ) -> Self {
        Self {
            business_image: business_image.unwrap_or_else(|| UNKNOWN_BUSINESS_IMAGE.to_string()),
            cover_image_url: cover_image_url.unwrap_or_else(|| UNKNOWN_COVER_IMAGE.to_string()),
            business_name: business_name.unwrap_or_else(|| UNKNOWN_BUSINESS_NAME.to_string()),
            business_type: business_type.unwrap_or_else(|| UNKNOWN_BUSINESS_TYPE.to_string()),
            availability: availability.label(),
            availability_day: availability.day_name(today).to_string(),
            services: services.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for the business-details endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessDetailsResponse {
    pub message: String,
    pub data: BusinessDetailsPayload,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
