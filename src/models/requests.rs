use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to list businesses whose catchment contains the customer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyBusinessesRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Request to filter the directory; every criterion is optional and they
/// combine independently. `workingDays` is a comma-separated short-day
/// string like `"Mon,Tue"`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterBusinessesRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(alias = "business_type", rename = "businessType", default)]
    pub business_type: Option<String>,
    #[serde(alias = "working_days", rename = "workingDays", default)]
    pub working_days: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
}
