// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BusinessSummary, CompanyEntry, CompanyPreference, CompanyRecord, Coordinate, DistanceUnit,
    RangeSpec, RateType, SearchCriteria, ServiceListing, ServiceLocation, ServiceRecord,
};
pub use requests::{FilterBusinessesRequest, NearbyBusinessesRequest};
pub use responses::{
    BusinessDetailsPayload, BusinessDetailsResponse, BusinessPayload, BusinessesResponse,
    ErrorResponse, HealthResponse, ServiceDetailPayload,
};
