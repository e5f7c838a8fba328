// Call construction and location helpers
pub mod distance;
pub mod query;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box, to_iso6709, BoundingBox};
pub use query::{ApiCall, CollectionFormat, CollectionParam, ProgressListener};
