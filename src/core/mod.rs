// Core algorithm exports
pub mod aggregate;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod schedule;

pub use aggregate::group_by_business;
pub use distance::{haversine_distance, km_to_miles, MILES_PER_KM};
pub use filters::{apply_criteria, parse_working_days, within_range, FilterError};
pub use matcher::{MatchResult, Matcher};
pub use schedule::{availability, Availability, WorkingSchedule};
