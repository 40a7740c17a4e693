use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use validator::Validate;

use crate::core::filters::parse_working_days;
use crate::core::schedule::availability;
use crate::core::Matcher;
use crate::models::{
    BusinessDetailsPayload, BusinessDetailsResponse, BusinessesResponse, Coordinate,
    ErrorResponse, FilterBusinessesRequest, HealthResponse, NearbyBusinessesRequest,
    SearchCriteria, ServiceListing,
};
use crate::services::{DirectoryCache, PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub cache: Option<Arc<DirectoryCache>>,
    pub matcher: Matcher,
}

/// Configure all business-directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/businesses/nearby", web::post().to(nearby_businesses))
        .route("/businesses/filter", web::post().to(filter_businesses))
        .route("/businesses/{id}", web::get().to(business_details));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}

/// Load the directory snapshot, preferring the cache when one is configured.
/// Any cache failure falls back to PostgreSQL.
async fn load_listings(state: &AppState) -> Result<Vec<ServiceListing>, PostgresError> {
    if let Some(cache) = &state.cache {
        match cache.listings().await {
            Ok(listings) => return Ok(listings),
            Err(e) => tracing::debug!("Listing snapshot not in cache: {}", e),
        }
    }

    let listings = state.postgres.fetch_listings().await?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.store_listings(&listings).await {
            tracing::warn!("Failed to cache listing snapshot: {}", e);
        }
    }

    Ok(listings)
}

/// Find businesses around the customer
///
/// POST /api/v1/businesses/nearby
///
/// Request body:
/// ```json
/// {
///   "latitude": 40.7128,
///   "longitude": -74.0060
/// }
/// ```
async fn nearby_businesses(
    state: web::Data<AppState>,
    req: web::Json<NearbyBusinessesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for nearby request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let position = Coordinate::new(req.latitude, req.longitude);

    let listings = match load_listings(&state).await {
        Ok(listings) => listings,
        Err(e) => {
            tracing::error!("Failed to fetch listings: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    // The wall clock is read once here; everything below is deterministic
    let today = Utc::now().date_naive();
    let result = state.matcher.discover(position, listings, today);

    tracing::info!(
        "Returning {} businesses near ({}, {}) from {} listings",
        result.businesses.len(),
        position.latitude,
        position.longitude,
        result.total_listings
    );

    HttpResponse::Ok().json(BusinessesResponse {
        message: result.message.to_string(),
        data: result.businesses.into_iter().map(Into::into).collect(),
    })
}

/// Filter the directory by any combination of criteria
///
/// POST /api/v1/businesses/filter
///
/// Request body (all fields optional):
/// ```json
/// {
///   "latitude": 40.7128,
///   "longitude": -74.0060,
///   "businessType": "Cleaning",
///   "workingDays": "Mon,Tue",
///   "availability": "Available Now"
/// }
/// ```
async fn filter_businesses(
    state: web::Data<AppState>,
    req: web::Json<FilterBusinessesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for filter request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Day tokens are validated before anything else runs; a bad token
    // rejects the whole request
    let working_days = match &req.working_days {
        Some(raw) => match parse_working_days(raw) {
            Ok(days) => Some(days),
            Err(e) => {
                tracing::info!("Rejected filter request: {}", e);
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "Invalid filter".to_string(),
                    message: e.to_string(),
                    status_code: 400,
                });
            }
        },
        None => None,
    };

    // Geo filtering needs both halves of the position
    let position = match (req.latitude, req.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
        _ => None,
    };

    let criteria = SearchCriteria {
        position,
        business_type: req.business_type.clone(),
        working_days,
        availability: req.availability.clone(),
    };

    let listings = match load_listings(&state).await {
        Ok(listings) => listings,
        Err(e) => {
            tracing::error!("Failed to fetch listings: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch listings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let today = Utc::now().date_naive();
    let result = state.matcher.filter(&criteria, listings, today);

    tracing::info!(
        "Filter kept {} businesses from {} listings",
        result.businesses.len(),
        result.total_listings
    );

    HttpResponse::Ok().json(BusinessesResponse {
        message: result.message.to_string(),
        data: result.businesses.into_iter().map(Into::into).collect(),
    })
}

/// Full details for one business: profile, availability and service list
///
/// GET /api/v1/businesses/{id}
async fn business_details(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let company_id = path.into_inner();

    let entry = match state.postgres.fetch_company(company_id).await {
        Ok(entry) => entry,
        Err(PostgresError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Not found".to_string(),
                message,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch company {}: {}", company_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch company".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let services = match state.postgres.fetch_company_services(company_id).await {
        Ok(services) => services,
        Err(e) => {
            tracing::error!("Failed to fetch services for {}: {}", company_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch services".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let today = Utc::now().date_naive();
    let current = availability(entry.schedule(), today);

    let payload = BusinessDetailsPayload::assemble(
        entry.company.business_name,
        entry.company.business_type,
        entry.company.image_url,
        entry.company.cover_image_url,
        current,
        today,
        services,
    );

    HttpResponse::Ok().json(BusinessDetailsResponse {
        message: "Business details retrieved successfully".to_string(),
        data: payload,
    })
}
