use std::time::Duration;

use chrono::{NaiveDate, Weekday};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::core::schedule::{parse_day_token, WorkingSchedule};
use crate::models::{
    CompanyEntry, CompanyPreference, CompanyRecord, Coordinate, DistanceUnit, RangeSpec, RateType,
    ServiceListing, ServiceLocation, ServiceRecord,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

const LISTINGS_QUERY: &str = r#"
    SELECT
        s.id AS service_id,
        s.service_name,
        s.description,
        s.location,
        s.rate_type,
        s.price,
        s.time_duration,
        s.number_of_rooms,
        s.number_of_windows,
        s.image_url AS service_image,
        u.id AS company_id,
        c.business_name,
        c.business_type,
        c.image_url AS business_image,
        c.cover_image_url,
        p.latitude,
        p.longitude,
        p.distance_range_km,
        p.distance_range_miles,
        p.distance_unit,
        p.working_days,
        p.start_time,
        p.end_time,
        p.start_day,
        p.end_day,
        p.start_date,
        p.end_date
    FROM services s
    JOIN users u ON u.id = s.user_id
    LEFT JOIN company_details c ON c.user_id = u.id
    LEFT JOIN company_preferences p ON p.user_id = u.id
    WHERE u.role = 'company' AND u.is_verified = true
    ORDER BY s.id ASC
"#;

/// Data provider for the service directory
///
/// Fetches the fully joined, denormalized listing snapshot the matching
/// engine runs over. Rows come back ordered by service id ascending so the
/// first listing seen per company is its first-created service; the
/// aggregator relies on that. The engine itself never queries storage.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch the full directory snapshot: every service of every verified
    /// company, joined with the owner's profile and preference
    pub async fn fetch_listings(&self) -> Result<Vec<ServiceListing>, PostgresError> {
        let rows = sqlx::query(LISTINGS_QUERY).fetch_all(&self.pool).await?;

        let listings: Vec<ServiceListing> = rows.iter().filter_map(listing_from_row).collect();

        tracing::debug!("Fetched {} service listings", listings.len());

        Ok(listings)
    }

    /// Fetch one company's profile and preference for the details lookup
    pub async fn fetch_company(&self, company_id: i64) -> Result<CompanyEntry, PostgresError> {
        let query = r#"
            SELECT
                u.id AS company_id,
                c.business_name,
                c.business_type,
                c.image_url AS business_image,
                c.cover_image_url,
                p.latitude,
                p.longitude,
                p.distance_range_km,
                p.distance_range_miles,
                p.distance_unit,
                p.working_days,
                p.start_time,
                p.end_time,
                p.start_day,
                p.end_day,
                p.start_date,
                p.end_date
            FROM users u
            LEFT JOIN company_details c ON c.user_id = u.id
            LEFT JOIN company_preferences p ON p.user_id = u.id
            WHERE u.id = $1 AND u.role = 'company' AND u.is_verified = true
        "#;

        let row = sqlx::query(query)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                PostgresError::NotFound("Business not found or not a verified company".to_string())
            })?;

        Ok(CompanyEntry {
            company: company_from_row(&row),
            preference: preference_from_row(&row),
        })
    }

    /// Fetch one company's services, oldest first
    pub async fn fetch_company_services(
        &self,
        company_id: i64,
    ) -> Result<Vec<ServiceRecord>, PostgresError> {
        let query = r#"
            SELECT
                s.id AS service_id,
                s.service_name,
                s.description,
                s.location,
                s.rate_type,
                s.price,
                s.time_duration,
                s.number_of_rooms,
                s.number_of_windows,
                s.image_url AS service_image
            FROM services s
            WHERE s.user_id = $1
            ORDER BY s.id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(company_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().filter_map(service_from_row).collect())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn service_from_row(row: &PgRow) -> Option<ServiceRecord> {
    let location_raw: String = row.get("location");
    let Some(location) = ServiceLocation::from_stored(&location_raw) else {
        tracing::warn!("Skipping service with unknown location value: {}", location_raw);
        return None;
    };

    let rate_raw: String = row.get("rate_type");
    let Some(rate_type) = RateType::from_stored(&rate_raw) else {
        tracing::warn!("Skipping service with unknown rate type: {}", rate_raw);
        return None;
    };

    Some(ServiceRecord {
        id: row.get("service_id"),
        name: row.get("service_name"),
        description: row.get("description"),
        location,
        rate_type,
        price: row.get("price"),
        time_duration: row.get("time_duration"),
        number_of_rooms: row.get("number_of_rooms"),
        number_of_windows: row.get("number_of_windows"),
        image_url: row.get("service_image"),
    })
}

fn company_from_row(row: &PgRow) -> CompanyRecord {
    CompanyRecord {
        id: row.get("company_id"),
        business_name: row.get("business_name"),
        business_type: row.get("business_type"),
        image_url: row.get("business_image"),
        cover_image_url: row.get("cover_image_url"),
    }
}

fn preference_from_row(row: &PgRow) -> Option<CompanyPreference> {
    let latitude: Option<f64> = row.get("latitude");
    let longitude: Option<f64> = row.get("longitude");
    let coordinate = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
        _ => None,
    };

    let unit_raw: Option<String> = row.get("distance_unit");
    let unit = DistanceUnit::from_stored(unit_raw.as_deref());
    let range_km: Option<f64> = row.get("distance_range_km");
    let range_miles: Option<f64> = row.get("distance_range_miles");
    let range = match (range_km, range_miles) {
        (None, None) => None,
        (km, miles) => Some(RangeSpec {
            range_km: km.unwrap_or(0.0),
            range_miles: miles.unwrap_or(0.0),
            unit,
        }),
    };

    let schedule = schedule_from_row(row);

    // A company that never saved a preference joins as all-null columns
    if coordinate.is_none() && range.is_none() && schedule.is_none() {
        return None;
    }

    Some(CompanyPreference {
        coordinate,
        range,
        schedule,
    })
}

/// Decide which schedule variant the stored columns describe: a populated
/// weekly day list wins; otherwise all four band/window columns must be
/// present; otherwise the company has no schedule.
fn schedule_from_row(row: &PgRow) -> Option<WorkingSchedule> {
    let working_days: Option<String> = row.get("working_days");
    if let Some(raw) = working_days {
        // Stored day lists are lenient: unknown tokens are skipped, not errors
        let days: Vec<Weekday> = raw.split(',').filter_map(parse_day_token).collect();
        if !days.is_empty() {
            return Some(WorkingSchedule::Weekly {
                working_days: days,
                start_time: row.get("start_time"),
                end_time: row.get("end_time"),
            });
        }
    }

    let start_day: Option<String> = row.get("start_day");
    let end_day: Option<String> = row.get("end_day");
    let start_date: Option<NaiveDate> = row.get("start_date");
    let end_date: Option<NaiveDate> = row.get("end_date");

    match (
        start_day.as_deref().and_then(parse_day_token),
        end_day.as_deref().and_then(parse_day_token),
        start_date,
        end_date,
    ) {
        (Some(start_day), Some(end_day), Some(start_date), Some(end_date)) => {
            Some(WorkingSchedule::DateBand {
                start_day,
                end_day,
                start_date,
                end_date,
            })
        }
        _ => None,
    }
}

fn listing_from_row(row: &PgRow) -> Option<ServiceListing> {
    let service = service_from_row(row)?;

    Some(ServiceListing {
        service,
        company: company_from_row(row),
        preference: preference_from_row(row),
    })
}
